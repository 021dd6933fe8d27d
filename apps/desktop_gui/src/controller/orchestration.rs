//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{status_line, UiError, UiErrorContext};

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) {
    let cmd_name = match &cmd {
        BackendCommand::Submit { .. } => "submit_email",
    };

    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->backend command"),
        Err(TrySendError::Full(_)) => {
            let err = UiError::from_message(
                UiErrorContext::General,
                "UI command queue is full; please retry",
            );
            *status = status_line(&err);
        }
        Err(TrySendError::Disconnected(_)) => {
            let err = UiError::from_message(
                UiErrorContext::General,
                "backend command processor disconnected (possible startup/runtime failure); restart the app",
            );
            *status = status_line(&err);
        }
    }
}
