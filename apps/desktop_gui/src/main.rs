mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;

use backend_bridge::commands::BackendCommand;
use backend_bridge::runtime::spawn_backend_thread;
use controller::events::UiEvent;
use ui::TriageApp;

#[derive(Parser, Debug)]
struct Args {
    /// Base URL of the classification service.
    #[arg(long, default_value = "http://127.0.0.1:5000")]
    server_url: String,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    spawn_backend_thread(cmd_rx, ui_tx, args.server_url.clone());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Email Triage")
            .with_inner_size([900.0, 720.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Email Triage",
        options,
        Box::new(move |_cc| Ok(Box::new(TriageApp::new(cmd_tx, ui_rx, args.server_url)))),
    )
}
