use serde::{Deserialize, Serialize};

/// Body shape the classification service returns on failure statuses.
///
/// The `error` field is best-effort: the service may answer with an empty or
/// non-JSON body, in which case callers substitute their own fallback text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
