use serde::{Deserialize, Serialize};

/// Category label the service assigns to actionable emails. Every other
/// label (including a missing one) is treated as the neutral class.
pub const CATEGORY_PRODUCTIVE: &str = "Produtivo";
pub const CATEGORY_UNPRODUCTIVE: &str = "Improdutivo";

pub fn is_productive(categoria: &str) -> bool {
    categoria == CATEGORY_PRODUCTIVE
}

/// `/process` response exactly as it appears on the wire. Every field is
/// optional; the service is free to omit any of them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassificationResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categoria: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motivo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resposta_sugerida: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counts: Option<DashboardCounts>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<HistoryEntry>>,
}

/// Cumulative per-category totals maintained by the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardCounts {
    #[serde(rename = "Produtivo", default)]
    pub produtivo: u64,
    #[serde(rename = "Improdutivo", default)]
    pub improdutivo: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(default)]
    pub categoria: String,
    #[serde(default)]
    pub preview: String,
}

/// Fully-populated view of one classification outcome.
///
/// This is the single normalization step: renderers downstream never apply
/// defaults themselves. `counts`/`history` stay `None` when the wire response
/// omitted them, which downstream reads as "leave the current display alone".
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationView {
    pub categoria: String,
    pub motivo: String,
    pub resposta_sugerida: String,
    pub counts: Option<DashboardCounts>,
    pub history: Option<Vec<HistoryEntry>>,
}

impl ClassificationView {
    pub fn is_productive(&self) -> bool {
        is_productive(&self.categoria)
    }
}

impl From<ClassificationResponse> for ClassificationView {
    fn from(raw: ClassificationResponse) -> Self {
        Self {
            categoria: raw
                .categoria
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| CATEGORY_UNPRODUCTIVE.to_string()),
            motivo: raw.motivo.unwrap_or_default(),
            resposta_sugerida: raw.resposta_sugerida.unwrap_or_default(),
            counts: raw.counts,
            history: raw.history,
        }
    }
}
