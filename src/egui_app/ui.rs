//! egui renderer for the application UI.

mod auth;
mod chart;
mod dashboard;
mod fields;
mod reset;
/// Colors shared across the UI.
pub mod style;

use eframe::egui::{self, Align2, Color32, Frame, RichText};

use crate::config;
use crate::egui_app::controller::AppController;
use crate::egui_app::state::AppPage;

/// Smallest window the layout is designed for.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(720.0, 520.0);

/// Renders the egui UI using the shared controller state.
pub struct EguiApp {
    controller: AppController,
    visuals_set: bool,
}

impl EguiApp {
    /// Create the app from persisted configuration.
    pub fn new() -> Self {
        Self::with_controller(AppController::new(config::load_or_default()))
    }

    /// Create the app around an existing controller.
    pub fn with_controller(controller: AppController) -> Self {
        Self {
            controller,
            visuals_set: false,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        visuals.window_fill = Color32::from_rgb(14, 14, 16);
        visuals.panel_fill = Color32::from_rgb(18, 18, 20);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar")
            .frame(Frame::none().fill(Color32::from_rgb(26, 26, 30)))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.add_space(8.0);
                    ui.label(RichText::new("Trainboard").strong().color(Color32::WHITE));
                    ui.separator();
                    for page in AppPage::ALL {
                        let selected = self.controller.ui.page == page;
                        if ui.selectable_label(selected, page.title()).clicked() {
                            self.controller.ui.page = page;
                        }
                    }
                });
            });
    }

    fn render_status(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .frame(Frame::none().fill(Color32::BLACK))
            .show(ctx, |ui| {
                let status = &self.controller.ui.status;
                ui.horizontal(|ui| {
                    ui.add_space(8.0);
                    ui.painter().circle_filled(
                        ui.cursor().min + egui::vec2(6.0, 10.0),
                        5.0,
                        status.badge_color(),
                    );
                    ui.add_space(16.0);
                    ui.label(RichText::new(&status.text).color(Color32::LIGHT_GRAY));
                });
            });
    }

    /// Blocking alert modal, the desktop analog of the browser alert.
    fn render_alert_modal(&mut self, ctx: &egui::Context) {
        let Some(message) = self.controller.ui.alert.clone() else {
            return;
        };
        let mut dismissed = false;
        egui::Window::new("Analysis error")
            .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .collapsible(false)
            .resizable(false)
            .default_width(420.0)
            .show(ctx, |ui| {
                ui.label(&message);
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        if dismissed || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.controller.dismiss_alert();
        }
    }
}

impl Default for EguiApp {
    fn default() -> Self {
        Self::new()
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.controller.poll_background_jobs();
        self.render_top_bar(ctx);
        self.render_status(ctx);
        egui::CentralPanel::default().show(ctx, |ui| match self.controller.ui.page {
            AppPage::Dashboard => self.render_dashboard(ui),
            AppPage::Auth => self.render_auth(ui),
            AppPage::Reset => self.render_reset(ui),
        });
        self.render_alert_modal(ctx);

        // Keep polling while a request is in flight so the result lands
        // without user input.
        if self.controller.analysis_in_progress() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
