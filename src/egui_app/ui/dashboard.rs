//! Analysis dashboard page: submission form, loading overlay, results.

use eframe::egui::{self, RichText};

use super::{EguiApp, chart, fields, style};

impl EguiApp {
    pub(super) fn render_dashboard(&mut self, ui: &mut egui::Ui) {
        let mut submit = false;
        let mut pick_dataset = false;
        let mut clear_dataset = false;
        {
            let dashboard = &mut self.controller.ui.dashboard;
            let running = dashboard.analysis_running;

            ui.heading("Model Analysis");
            ui.add_space(8.0);

            fields::text_row(ui, "Model name", &mut dashboard.model_name, !running, true);
            fields::text_row(ui, "Epochs", &mut dashboard.epochs, !running, true);

            ui.horizontal(|ui| {
                ui.label("Dataset");
                if ui
                    .add_enabled(!running, egui::Button::new("Choose file..."))
                    .clicked()
                {
                    pick_dataset = true;
                }
                match &dashboard.dataset {
                    Some(path) => {
                        let name = path
                            .file_name()
                            .and_then(|name| name.to_str())
                            .unwrap_or("dataset");
                        ui.label(RichText::new(name).color(style::MUTED_TEXT));
                        if ui.add_enabled(!running, egui::Button::new("✖")).clicked() {
                            clear_dataset = true;
                        }
                    }
                    None => {
                        ui.label(RichText::new("none selected").color(style::MUTED_TEXT));
                    }
                }
            });

            if let Some(error) = dashboard.form_error.as_deref() {
                ui.label(RichText::new(error).color(style::ERROR_TEXT));
            }

            ui.add_space(8.0);
            if ui
                .add_enabled(!running, egui::Button::new("Analyze"))
                .clicked()
            {
                submit = true;
            }

            if running {
                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Training and evaluating...");
                });
            }

            if let Some(results) = &dashboard.results {
                ui.add_space(16.0);
                ui.separator();
                ui.heading("Results");
                ui.horizontal(|ui| {
                    ui.label("Test accuracy:");
                    ui.label(
                        RichText::new(&results.accuracy_text)
                            .strong()
                            .color(style::SUCCESS_TEXT),
                    );
                });
                ui.add_space(8.0);
                chart::draw_accuracy_chart(ui, &results.chart);
            }
        }

        if pick_dataset {
            if let Some(path) = rfd::FileDialog::new().pick_file() {
                self.controller.ui.dashboard.dataset = Some(path);
            }
        }
        if clear_dataset {
            self.controller.ui.dashboard.dataset = None;
        }
        if submit {
            self.controller.begin_analysis();
        }
    }
}
