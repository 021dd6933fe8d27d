//! Backend commands queued from UI to backend worker.

use std::path::PathBuf;

pub enum BackendCommand {
    Submit {
        /// Monotonic sequence number assigned by the form controller; the
        /// matching outcome event echoes it so stale responses can be dropped.
        request_seq: u64,
        email_text: String,
        attachment_path: Option<PathBuf>,
    },
}
