//! Backend worker: owns the tokio runtime and the HTTP client, drains the
//! UI command queue, and answers with outcome events.

use std::{path::PathBuf, thread};

use anyhow::Result;
use client_core::{AttachmentUpload, ClassifierEndpoint, EmailSubmission, ProcessClient};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn spawn_backend_thread(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    server_url: String,
) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let client = match ProcessClient::new(&server_url) {
                Ok(client) => client,
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_process_error(
                        UiErrorContext::BackendStartup,
                        &err,
                    )));
                    tracing::error!("invalid server url '{server_url}': {err}");
                    return;
                }
            };
            let _ = ui_tx.try_send(UiEvent::Info(format!("Ready - service at {server_url}")));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Submit {
                        request_seq,
                        email_text,
                        attachment_path,
                    } => {
                        handle_submit(&client, &ui_tx, request_seq, email_text, attachment_path)
                            .await;
                    }
                }
            }
        });
    });
}

async fn handle_submit(
    endpoint: &dyn ClassifierEndpoint,
    ui_tx: &Sender<UiEvent>,
    request_seq: u64,
    email_text: String,
    attachment_path: Option<PathBuf>,
) {
    let submission = match build_submission(email_text, attachment_path).await {
        Ok(submission) => submission,
        Err(err) => {
            let _ = ui_tx.try_send(UiEvent::SubmitFailed {
                request_seq,
                error: UiError::from_message(UiErrorContext::Submit, err.to_string()),
            });
            return;
        }
    };

    match endpoint.classify(submission).await {
        Ok(view) => {
            let _ = ui_tx.try_send(UiEvent::Classified { request_seq, view });
        }
        Err(err) => {
            let _ = ui_tx.try_send(UiEvent::SubmitFailed {
                request_seq,
                error: UiError::from_process_error(UiErrorContext::Submit, &err),
            });
        }
    }
}

async fn build_submission(
    email_text: String,
    attachment_path: Option<PathBuf>,
) -> Result<EmailSubmission> {
    let attachment = match attachment_path {
        Some(path) => {
            let bytes = tokio::fs::read(&path).await?;
            let filename = path
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or("attachment.bin")
                .to_string();
            let mime_type = mime_guess::from_path(&path).first_raw().map(str::to_string);
            Some(AttachmentUpload {
                filename,
                mime_type,
                bytes,
            })
        }
        None => None,
    };
    Ok(EmailSubmission {
        email_text,
        attachment,
    })
}
