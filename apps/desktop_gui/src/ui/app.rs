use std::{ops::RangeInclusive, time::Duration};

use client_core::{ClientSettings, Panel, UiState};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::{
    domain::{DENSITY_RANGE, KNOWN_MATERIALS, STIFFNESS_RANGE},
    form::FormInput,
};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;

const MATERIAL_PLACEHOLDER: &str = "Select material";

#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    pub server_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

impl StartupConfig {
    /// Flags given on the command line win over file and environment settings.
    pub fn apply_to(&self, mut settings: ClientSettings) -> ClientSettings {
        if let Some(server_url) = &self.server_url {
            settings.server_url = server_url.clone();
        }
        if let Some(timeout) = self.request_timeout_secs {
            settings.request_timeout_secs = Some(timeout);
        }
        settings
    }
}

fn range_hint(range: &RangeInclusive<i64>) -> String {
    format!("{}-{}", range.start(), range.end())
}

pub struct DesktopGuiApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    stiffness: String,
    density: String,
    material: String,
    form_state: UiState,
    pending_scroll: Option<Panel>,
    status: String,
}

impl DesktopGuiApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            stiffness: String::new(),
            density: String::new(),
            material: String::new(),
            form_state: UiState::Idle,
            pending_scroll: None,
            status: "Starting prediction worker...".to_string(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.apply_event(event);
        }
    }

    fn apply_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Info(message) => {
                self.status = message;
            }
            UiEvent::StateChanged(state) => {
                self.pending_scroll = state.revealed_panel();
                self.form_state = state;
            }
            UiEvent::BackendFailed(message) => {
                tracing::error!("prediction worker unavailable: {message}");
                self.status = format!("Prediction worker unavailable: {message}");
            }
        }
    }

    fn form_input(&self) -> FormInput {
        FormInput::new(
            self.stiffness.clone(),
            self.density.clone(),
            self.material.clone(),
        )
    }

    fn submit(&mut self) {
        if !self.form_state.submit_enabled() {
            return;
        }
        let input = self.form_input();
        dispatch_backend_command(&self.cmd_tx, BackendCommand::Submit(input), &mut self.status);
    }

    fn show_form(&mut self, ui: &mut egui::Ui) {
        ui.heading("Metastructure Recommendation");
        ui.add_space(8.0);

        egui::Grid::new("prediction_form")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.label("Stiffness");
                ui.add(
                    egui::TextEdit::singleline(&mut self.stiffness)
                        .hint_text(range_hint(&STIFFNESS_RANGE)),
                );
                ui.end_row();

                ui.label("Density");
                ui.add(
                    egui::TextEdit::singleline(&mut self.density)
                        .hint_text(range_hint(&DENSITY_RANGE)),
                );
                ui.end_row();

                ui.label("Material");
                let selected = if self.material.is_empty() {
                    MATERIAL_PLACEHOLDER.to_string()
                } else {
                    self.material.clone()
                };
                egui::ComboBox::from_id_salt("material")
                    .selected_text(selected)
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut self.material, String::new(), MATERIAL_PLACEHOLDER);
                        for material in KNOWN_MATERIALS {
                            ui.selectable_value(&mut self.material, material.to_string(), material);
                        }
                    });
                ui.end_row();
            });

        ui.add_space(8.0);
        let button = egui::Button::new(self.form_state.submit_label().text());
        let clicked = ui
            .add_enabled(self.form_state.submit_enabled(), button)
            .clicked();
        let enter_pressed = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if clicked || enter_pressed {
            self.submit();
        }
    }

    fn show_output(&mut self, ui: &mut egui::Ui) {
        ui.add_space(12.0);

        if let Some(result) = self.form_state.result().cloned() {
            let response = egui::Frame::group(ui.style())
                .show(ui, |ui| {
                    ui.label(egui::RichText::new("Recommended Structure").strong());
                    ui.heading(result.structure.as_str());
                    ui.label(format!("Confidence: {}", result.confidence_text));
                    if !result.description.is_empty() {
                        ui.label(result.description.as_str());
                    }
                })
                .response;
            self.scroll_if_pending(Panel::Result, &response);
        }

        if let Some(message) = self.form_state.error_message().map(str::to_string) {
            let response = egui::Frame::group(ui.style())
                .show(ui, |ui| {
                    ui.colored_label(egui::Color32::from_rgb(220, 80, 80), message);
                })
                .response;
            self.scroll_if_pending(Panel::Error, &response);
        }
    }

    fn scroll_if_pending(&mut self, panel: Panel, response: &egui::Response) {
        if self.pending_scroll == Some(panel) {
            response.scroll_to_me(None);
            self.pending_scroll = None;
        }
    }
}

impl eframe::App for DesktopGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.small(self.status.as_str());
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    self.show_form(ui);
                    self.show_output(ui);
                });
        });

        if self.form_state == UiState::Submitting {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
