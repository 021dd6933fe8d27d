use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use client_core::{AttachmentUpload, EmailSubmission, ProcessClient};

/// Submit one email to the classification service and print the outcome.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value = "http://127.0.0.1:5000")]
    server_url: String,
    /// Email text to classify.
    #[arg(long, conflicts_with = "file")]
    text: Option<String>,
    /// Path to a .txt or .pdf email file to upload instead of pasted text.
    #[arg(long)]
    file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let submission = match (&args.text, &args.file) {
        (Some(text), None) => EmailSubmission::from_text(text.clone()),
        (None, Some(path)) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let filename = path
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or("attachment.bin")
                .to_string();
            let mime_type = mime_guess::from_path(path).first_raw().map(str::to_string);
            EmailSubmission {
                email_text: String::new(),
                attachment: Some(AttachmentUpload {
                    filename,
                    mime_type,
                    bytes,
                }),
            }
        }
        _ => bail!("provide exactly one of --text or --file"),
    };

    let client = ProcessClient::new(&args.server_url)?;
    let view = client.submit(submission).await?;

    println!("categoria: {}", view.categoria);
    if !view.motivo.is_empty() {
        println!("motivo: {}", view.motivo);
    }
    if !view.resposta_sugerida.is_empty() {
        println!("resposta sugerida:\n{}", view.resposta_sugerida);
    }
    if let Some(counts) = view.counts {
        println!(
            "totals: Produtivo={} Improdutivo={}",
            counts.produtivo, counts.improdutivo
        );
    }

    Ok(())
}
