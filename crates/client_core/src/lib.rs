use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client, StatusCode,
};
use shared::{
    error::ErrorBody,
    protocol::{ClassificationResponse, ClassificationView},
};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

pub use reqwest::StatusCode as HttpStatus;

/// Substituted when a failure response carries no usable `error` field,
/// including empty and non-JSON bodies.
pub const FALLBACK_FAILURE_MESSAGE: &str = "Error processing";

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("invalid server url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error(transparent)]
    Network(#[from] reqwest::Error),
    /// The service answered with a failure status. `message` is the body's
    /// `error` field when present, [`FALLBACK_FAILURE_MESSAGE`] otherwise.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
    #[error(transparent)]
    Parse(#[from] serde_json::Error),
}

/// One email to classify: pasted text plus an optional uploaded file.
///
/// The service accepts either; when both are present it prefers the pasted
/// text, so the client forwards whatever the form currently holds as-is.
#[derive(Debug, Clone)]
pub struct EmailSubmission {
    pub email_text: String,
    pub attachment: Option<AttachmentUpload>,
}

impl EmailSubmission {
    pub fn from_text(email_text: impl Into<String>) -> Self {
        Self {
            email_text: email_text.into(),
            attachment: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AttachmentUpload {
    pub filename: String,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Seam between the GUI backend worker and the network. Tests substitute a
/// scripted implementation so submit-cycle handling can run without a server.
#[async_trait]
pub trait ClassifierEndpoint: Send + Sync {
    async fn classify(&self, submission: EmailSubmission)
        -> Result<ClassificationView, ProcessError>;
}

/// HTTP client for the classification service's `POST /process` endpoint.
#[derive(Debug)]
pub struct ProcessClient {
    http: Client,
    server_url: String,
}

impl ProcessClient {
    pub fn new(server_url: impl Into<String>) -> Result<Self, ProcessError> {
        let server_url = server_url.into();
        Url::parse(&server_url)?;
        Ok(Self {
            http: Client::new(),
            server_url: server_url.trim_end_matches('/').to_string(),
        })
    }

    /// Submit one email and return the normalized classification outcome.
    ///
    /// The response body is parsed as JSON regardless of HTTP status: failure
    /// statuses are reported through [`ProcessError::Rejected`] with the
    /// server-supplied message, success statuses must carry a parseable
    /// classification payload.
    pub async fn submit(
        &self,
        submission: EmailSubmission,
    ) -> Result<ClassificationView, ProcessError> {
        let mut form = Form::new().text("email_text", submission.email_text);
        if let Some(attachment) = submission.attachment {
            let mut part = Part::bytes(attachment.bytes).file_name(attachment.filename);
            if let Some(mime) = &attachment.mime_type {
                part = part.mime_str(mime)?;
            }
            form = form.part("file", part);
        }

        let response = self
            .http
            .post(format!("{}/process", self.server_url))
            .multipart(form)
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;
        debug!(%status, bytes = body.len(), "received /process response");

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.error)
                .unwrap_or_else(|| FALLBACK_FAILURE_MESSAGE.to_string());
            warn!(%status, %message, "classification request rejected");
            return Err(ProcessError::Rejected { status, message });
        }

        let raw: ClassificationResponse = serde_json::from_slice(&body)?;
        Ok(ClassificationView::from(raw))
    }
}

#[async_trait]
impl ClassifierEndpoint for ProcessClient {
    async fn classify(
        &self,
        submission: EmailSubmission,
    ) -> Result<ClassificationView, ProcessError> {
        self.submit(submission).await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
