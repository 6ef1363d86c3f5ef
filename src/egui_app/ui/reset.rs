//! Reset page: a single password-reset form with two visibility toggles.

use eframe::egui::{self, RichText};

use super::style::StatusTone;
use super::{EguiApp, fields, style};
use crate::validation::{MatchState, StrengthRule};

impl EguiApp {
    pub(super) fn render_reset(&mut self, ui: &mut egui::Ui) {
        let mut password_edited = false;
        let mut confirm_edited = false;
        let mut toggle_password = false;
        let mut toggle_confirm = false;
        let mut submit = false;
        {
            let reset = &mut self.controller.ui.reset;
            ui.heading("Choose a new password");
            ui.add_space(8.0);

            let row = fields::password_row(
                ui,
                "reset_password",
                "New password",
                &mut reset.password,
                reset.show_password,
                true,
            );
            if row.focused {
                reset.show_rules = true;
            }
            password_edited = row.changed;
            toggle_password = row.toggled;

            if reset.show_rules {
                for rule in StrengthRule::ALL {
                    let passed = reset.strength.passed(rule);
                    let (marker, color) = if passed {
                        ("✔", style::SUCCESS_TEXT)
                    } else {
                        ("•", style::MUTED_TEXT)
                    };
                    ui.label(RichText::new(format!("{marker} {}", rule.label())).color(color));
                }
            }

            let row = fields::password_row(
                ui,
                "reset_confirm",
                "Confirm password",
                &mut reset.confirm,
                reset.show_confirm,
                true,
            );
            confirm_edited = row.changed;
            toggle_confirm = row.toggled;

            if let Some(message) = reset.match_state.message() {
                let color = if reset.match_state == MatchState::Match {
                    style::SUCCESS_TEXT
                } else {
                    style::ERROR_TEXT
                };
                ui.label(RichText::new(message).color(color));
            }

            ui.add_space(8.0);
            if ui.button("Update password").clicked() {
                submit = true;
            }
        }

        if password_edited {
            self.controller.reset_password_edited();
        }
        if confirm_edited {
            self.controller.reset_confirm_edited();
        }
        if toggle_password {
            self.controller.toggle_reset_password();
        }
        if toggle_confirm {
            self.controller.toggle_reset_confirm();
        }
        if submit {
            tracing::info!("Password reset form submitted");
            self.controller
                .set_status("Password reset submitted", StatusTone::Info);
        }
    }
}
