use super::*;
use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode as AxumStatusCode,
    routing::post,
    Router,
};
use shared::protocol::{DashboardCounts, CATEGORY_UNPRODUCTIVE};
use tokio::{
    net::TcpListener,
    sync::{oneshot, Mutex},
};

#[derive(Debug)]
struct ReceivedField {
    name: String,
    filename: Option<String>,
    content: Vec<u8>,
}

#[derive(Clone)]
struct ServerState {
    tx: Arc<Mutex<Option<oneshot::Sender<Vec<ReceivedField>>>>>,
    status: u16,
    body: &'static str,
}

async fn handle_process(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> (AxumStatusCode, String) {
    let mut fields = Vec::new();
    while let Some(field) = multipart.next_field().await.expect("multipart field") {
        let name = field.name().unwrap_or_default().to_string();
        let filename = field.file_name().map(str::to_string);
        let content = field.bytes().await.expect("field bytes").to_vec();
        fields.push(ReceivedField {
            name,
            filename,
            content,
        });
    }
    if let Some(tx) = state.tx.lock().await.take() {
        let _ = tx.send(fields);
    }
    (
        AxumStatusCode::from_u16(state.status).expect("status"),
        state.body.to_string(),
    )
}

async fn spawn_process_server(
    status: u16,
    body: &'static str,
) -> (String, oneshot::Receiver<Vec<ReceivedField>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let (tx, rx) = oneshot::channel();
    let state = ServerState {
        tx: Arc::new(Mutex::new(Some(tx))),
        status,
        body,
    };
    let app = Router::new()
        .route("/process", post(handle_process))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), rx)
}

#[tokio::test]
async fn submits_email_text_as_multipart_field() {
    let (server_url, fields_rx) = spawn_process_server(200, "{}").await;
    let client = ProcessClient::new(server_url).expect("client");

    client
        .submit(EmailSubmission::from_text("please review the contract"))
        .await
        .expect("submit");

    let fields = fields_rx.await.expect("fields");
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].name, "email_text");
    assert_eq!(fields[0].content, b"please review the contract");
}

#[tokio::test]
async fn submits_attachment_as_named_file_part() {
    let (server_url, fields_rx) = spawn_process_server(200, "{}").await;
    let client = ProcessClient::new(server_url).expect("client");

    client
        .submit(EmailSubmission {
            email_text: String::new(),
            attachment: Some(AttachmentUpload {
                filename: "mail.txt".to_string(),
                mime_type: Some("text/plain".to_string()),
                bytes: b"hello from a file".to_vec(),
            }),
        })
        .await
        .expect("submit");

    let fields = fields_rx.await.expect("fields");
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0].name, "email_text");
    assert_eq!(fields[1].name, "file");
    assert_eq!(fields[1].filename.as_deref(), Some("mail.txt"));
    assert_eq!(fields[1].content, b"hello from a file");
}

#[tokio::test]
async fn success_response_normalizes_into_view() {
    let (server_url, _fields_rx) = spawn_process_server(
        200,
        r#"{
            "categoria": "Produtivo",
            "motivo": "urgent request",
            "resposta_sugerida": "Dear sir...",
            "counts": {"Produtivo": 5, "Improdutivo": 2},
            "history": [{"categoria": "Produtivo", "preview": "..."}]
        }"#,
    )
    .await;
    let client = ProcessClient::new(server_url).expect("client");

    let view = client
        .submit(EmailSubmission::from_text("urgent: contract"))
        .await
        .expect("submit");

    assert!(view.is_productive());
    assert_eq!(view.motivo, "urgent request");
    assert_eq!(view.resposta_sugerida, "Dear sir...");
    assert_eq!(
        view.counts,
        Some(DashboardCounts {
            produtivo: 5,
            improdutivo: 2
        })
    );
    let history = view.history.expect("history");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].categoria, "Produtivo");
}

#[tokio::test]
async fn bare_success_body_yields_neutral_defaults() {
    let (server_url, _fields_rx) = spawn_process_server(200, "{}").await;
    let client = ProcessClient::new(server_url).expect("client");

    let view = client
        .submit(EmailSubmission::from_text("hi"))
        .await
        .expect("submit");

    assert_eq!(view.categoria, CATEGORY_UNPRODUCTIVE);
    assert_eq!(view.motivo, "");
    assert_eq!(view.resposta_sugerida, "");
    assert!(view.counts.is_none());
    assert!(view.history.is_none());
}

#[tokio::test]
async fn failure_status_surfaces_server_error_message() {
    let (server_url, _fields_rx) =
        spawn_process_server(400, r#"{"error": "Invalid file"}"#).await;
    let client = ProcessClient::new(server_url).expect("client");

    let err = client
        .submit(EmailSubmission::from_text(""))
        .await
        .expect_err("must fail");

    match &err {
        ProcessError::Rejected { status, message } => {
            assert_eq!(status.as_u16(), 400);
            assert_eq!(message, "Invalid file");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.to_string(), "Invalid file");
}

#[tokio::test]
async fn failure_status_with_empty_body_uses_fallback_message() {
    let (server_url, _fields_rx) = spawn_process_server(500, "").await;
    let client = ProcessClient::new(server_url).expect("client");

    let err = client
        .submit(EmailSubmission::from_text("hi"))
        .await
        .expect_err("must fail");

    assert_eq!(err.to_string(), FALLBACK_FAILURE_MESSAGE);
}

#[tokio::test]
async fn failure_status_with_unrelated_json_uses_fallback_message() {
    let (server_url, _fields_rx) = spawn_process_server(502, r#"{"detail": "boom"}"#).await;
    let client = ProcessClient::new(server_url).expect("client");

    let err = client
        .submit(EmailSubmission::from_text("hi"))
        .await
        .expect_err("must fail");

    assert_eq!(err.to_string(), FALLBACK_FAILURE_MESSAGE);
}

#[tokio::test]
async fn malformed_success_body_is_a_parse_error() {
    let (server_url, _fields_rx) = spawn_process_server(200, "<!doctype html>").await;
    let client = ProcessClient::new(server_url).expect("client");

    let err = client
        .submit(EmailSubmission::from_text("hi"))
        .await
        .expect_err("must fail");

    assert!(matches!(err, ProcessError::Parse(_)), "got {err:?}");
}

#[test]
fn rejects_unparseable_server_url() {
    let err = ProcessClient::new("not a url").expect_err("must fail");
    assert!(matches!(err, ProcessError::InvalidUrl(_)));
}
