use std::path::PathBuf;

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{status_line, UiEvent};
use crate::controller::form::{FormController, HISTORY_PLACEHOLDER};
use crate::controller::orchestration::dispatch_backend_command;

pub struct TriageApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    server_url: String,

    email_text: String,
    attachment_path: Option<PathBuf>,

    form: FormController,
    status: String,
}

impl TriageApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        server_url: String,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            server_url,
            email_text: String::new(),
            attachment_path: None,
            form: FormController::new(),
            status: "Starting backend worker...".to_string(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::Classified { request_seq, view } => {
                    self.form.apply_success(request_seq, view);
                }
                UiEvent::SubmitFailed { request_seq, error } => {
                    self.form.apply_failure(request_seq, error.message().to_string());
                }
                UiEvent::Error(err) => {
                    self.status = status_line(&err);
                }
            }
        }
    }

    fn try_submit(&mut self) {
        let request_seq = self.form.begin_submit();
        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::Submit {
                request_seq,
                email_text: self.email_text.clone(),
                attachment_path: self.attachment_path.clone(),
            },
            &mut self.status,
        );
    }

    fn show_form_section(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("Email text").strong());
        ui.add(
            egui::TextEdit::multiline(&mut self.email_text)
                .hint_text("Paste the email content here, or attach a file below")
                .desired_rows(6)
                .desired_width(f32::INFINITY),
        );

        ui.horizontal(|ui| {
            if ui.button("Attach .txt/.pdf file").clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Email files", &["txt", "pdf"])
                    .pick_file()
                {
                    self.attachment_path = Some(path);
                }
            }
            let mut clear_attachment = false;
            if let Some(path) = &self.attachment_path {
                let name = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("attachment");
                ui.weak(name);
                if ui.small_button("Remove").clicked() {
                    clear_attachment = true;
                }
            }
            if clear_attachment {
                self.attachment_path = None;
            }
        });

        ui.add_space(4.0);
        ui.horizontal(|ui| {
            // Submit stays enabled while a request is in flight; a resubmit
            // supersedes the pending request rather than being blocked.
            if ui
                .button(egui::RichText::new("Classify").strong())
                .clicked()
            {
                self.try_submit();
            }
            if self.form.is_loading() {
                ui.add(egui::Spinner::new());
                ui.weak("Processing...");
            }
        });
    }

    fn show_error_panel(&mut self, ui: &mut egui::Ui) {
        if let Some(message) = self.form.error() {
            egui::Frame::NONE
                .fill(egui::Color32::from_rgb(111, 53, 53))
                .stroke(egui::Stroke::new(
                    1.0,
                    egui::Color32::from_rgb(175, 96, 96),
                ))
                .corner_radius(8.0)
                .inner_margin(egui::Margin::symmetric(10, 8))
                .show(ui, |ui| {
                    ui.label(egui::RichText::new(message).color(egui::Color32::WHITE));
                });
            ui.add_space(6.0);
        }
    }

    fn show_result_panel(&mut self, ui: &mut egui::Ui) {
        let Some(result) = self.form.result_mut() else {
            return;
        };

        egui::Frame::NONE
            .fill(ui.visuals().faint_bg_color)
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    category_badge(ui, &result.categoria, result.is_productive());
                    if !result.motivo.is_empty() {
                        ui.weak(&result.motivo);
                    }
                });
                ui.add_space(4.0);
                ui.label(egui::RichText::new("Suggested reply").strong());
                ui.add(
                    egui::TextEdit::multiline(&mut result.reply_draft)
                        .desired_rows(4)
                        .desired_width(f32::INFINITY),
                );
            });
        ui.add_space(6.0);
    }

    fn show_dashboard(&self, ui: &mut egui::Ui) {
        let counts = self.form.counts();
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Produtivo").strong());
            ui.label(counts.produtivo.to_string());
            ui.separator();
            ui.label(egui::RichText::new("Improdutivo").strong());
            ui.label(counts.improdutivo.to_string());
        });
    }

    fn show_history(&self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("History").strong());
        egui::ScrollArea::vertical()
            .max_height(220.0)
            .auto_shrink([false, true])
            .show(ui, |ui| {
                if self.form.history().is_empty() {
                    ui.weak(HISTORY_PLACEHOLDER);
                    return;
                }
                for entry in self.form.history() {
                    ui.horizontal(|ui| {
                        category_badge(
                            ui,
                            &entry.categoria,
                            shared::protocol::is_productive(&entry.categoria),
                        );
                        ui.label(&entry.preview);
                    });
                }
            });
    }
}

impl eframe::App for TriageApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        // Outcome events arrive from the worker thread while the UI is idle.
        if self.form.is_loading() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Email Triage");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak(&self.server_url);
                });
            });
            ui.separator();

            self.show_form_section(ui);
            ui.add_space(8.0);
            self.show_error_panel(ui);
            self.show_result_panel(ui);
            ui.separator();
            self.show_dashboard(ui);
            ui.add_space(4.0);
            self.show_history(ui);

            ui.add_space(8.0);
            ui.horizontal_wrapped(|ui| {
                ui.small("Status:");
                ui.small(egui::RichText::new(&self.status).weak());
            });
        });
    }
}

fn badge_fill(productive: bool) -> egui::Color32 {
    if productive {
        egui::Color32::from_rgb(67, 160, 71)
    } else {
        egui::Color32::from_rgb(109, 110, 115)
    }
}

fn category_badge(ui: &mut egui::Ui, text: &str, productive: bool) {
    egui::Frame::NONE
        .fill(badge_fill(productive))
        .corner_radius(6.0)
        .inner_margin(egui::Margin::symmetric(8, 3))
        .show(ui, |ui| {
            ui.label(
                egui::RichText::new(text)
                    .color(egui::Color32::WHITE)
                    .strong(),
            );
        });
}
