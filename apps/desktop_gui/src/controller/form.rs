//! Submit-cycle state for the classification form.
//!
//! This is the reducer the UI paints from: it owns the loading flag, the
//! error panel text, the result panel, and the dashboard/history views, and
//! applies one submission outcome at a time. It has no egui dependency so
//! the whole submit cycle is testable without a display.

use shared::protocol::{is_productive, ClassificationView, DashboardCounts, HistoryEntry};

/// Muted row shown when the service reports an empty history.
pub const HISTORY_PLACEHOLDER: &str = "No items yet";

/// Contents of the revealed result panel. `reply_draft` is bound to an
/// editable text field; the user may rework it until the next successful
/// submission overwrites it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultPanel {
    pub categoria: String,
    pub motivo: String,
    pub reply_draft: String,
}

impl ResultPanel {
    pub fn is_productive(&self) -> bool {
        is_productive(&self.categoria)
    }
}

#[derive(Debug, Default)]
pub struct FormController {
    next_request_seq: u64,
    /// Sequence number of the latest submission still awaiting an outcome.
    /// Outcomes for any other sequence number are dropped: the last request
    /// the user initiated always wins the render, regardless of response
    /// arrival order.
    in_flight: Option<u64>,
    error: Option<String>,
    result: Option<ResultPanel>,
    counts: DashboardCounts,
    history: Vec<HistoryEntry>,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a submission: clears the error panel, hides the result panel,
    /// shows the loading indicator, and returns the sequence number the
    /// backend must echo with the outcome.
    pub fn begin_submit(&mut self) -> u64 {
        self.next_request_seq += 1;
        let request_seq = self.next_request_seq;
        self.in_flight = Some(request_seq);
        self.error = None;
        self.result = None;
        request_seq
    }

    pub fn apply_success(&mut self, request_seq: u64, view: ClassificationView) {
        if self.in_flight != Some(request_seq) {
            return;
        }
        self.in_flight = None;
        self.result = Some(ResultPanel {
            categoria: view.categoria,
            motivo: view.motivo,
            reply_draft: view.resposta_sugerida,
        });
        if let Some(counts) = view.counts {
            self.counts = counts;
        }
        if let Some(history) = view.history {
            self.history = history;
        }
    }

    pub fn apply_failure(&mut self, request_seq: u64, message: String) {
        if self.in_flight != Some(request_seq) {
            return;
        }
        self.in_flight = None;
        self.error = Some(message);
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn result(&self) -> Option<&ResultPanel> {
        self.result.as_ref()
    }

    pub fn result_mut(&mut self) -> Option<&mut ResultPanel> {
        self.result.as_mut()
    }

    pub fn counts(&self) -> DashboardCounts {
        self.counts
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }
}
