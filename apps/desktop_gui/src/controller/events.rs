//! UI/backend events and error modeling for the desktop GUI controller.

use client_core::ProcessError;
use shared::protocol::ClassificationView;

pub enum UiEvent {
    Info(String),
    Classified {
        request_seq: u64,
        view: ClassificationView,
    },
    SubmitFailed {
        request_seq: u64,
        error: UiError,
    },
    /// Failure not tied to a submission, e.g. worker startup.
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Validation,
    Parse,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Submit,
    General,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    /// Classify a free-form message, used where no typed error is available
    /// (worker startup, queue plumbing).
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("timeout")
            || message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("unreachable")
            || message_lower.contains("disconnect")
            || message_lower.contains("startup failure")
        {
            UiErrorCategory::Transport
        } else if message_lower.contains("invalid")
            || message_lower.contains("missing")
            || message_lower.contains("malformed")
        {
            UiErrorCategory::Validation
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn from_process_error(context: UiErrorContext, err: &ProcessError) -> Self {
        let category = match err {
            ProcessError::Network(_) => UiErrorCategory::Transport,
            ProcessError::Rejected { .. } | ProcessError::InvalidUrl(_) => {
                UiErrorCategory::Validation
            }
            ProcessError::Parse(_) => UiErrorCategory::Parse,
        };
        Self {
            category,
            context,
            message: err.to_string(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Transport => "Transport",
        UiErrorCategory::Validation => "Validation",
        UiErrorCategory::Parse => "Response",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

pub fn context_label(context: UiErrorContext) -> &'static str {
    match context {
        UiErrorContext::BackendStartup => "startup",
        UiErrorContext::Submit => "submit",
        UiErrorContext::General => "command dispatch",
    }
}

/// One-line rendering for the status bar.
pub fn status_line(err: &UiError) -> String {
    format!(
        "{} error during {}: {}",
        err_label(err.category()),
        context_label(err.context()),
        err.message()
    )
}
