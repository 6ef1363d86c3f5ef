//! Auth page: register/login/forgot sections with live validation.

use eframe::egui::{self, RichText};

use super::{EguiApp, fields, style};
use crate::egui_app::state::FormSection;
use crate::validation::{MatchState, StrengthRule};

#[derive(Clone, Copy, Debug, Default)]
struct AuthActions {
    go_to: Option<FormSection>,
    submit: bool,
    password_edited: bool,
    confirm_edited: bool,
    toggle_password: bool,
}

impl EguiApp {
    pub(super) fn render_auth(&mut self, ui: &mut egui::Ui) {
        let mut actions = AuthActions::default();
        {
            let auth = &mut self.controller.ui.auth;
            ui.heading(auth.action.title());
            ui.add_space(8.0);

            // Only the active section is rendered; the others contribute
            // nothing to the frame, let alone the submission.
            for section in FormSection::ALL {
                if !auth.section_inputs(section).visible {
                    continue;
                }
                let inputs = *auth.section_inputs(section);
                match section {
                    FormSection::Register => {
                        fields::text_row(
                            ui,
                            "Name",
                            &mut auth.register.name,
                            inputs.enabled,
                            inputs.required,
                        );
                        fields::text_row(
                            ui,
                            "Email",
                            &mut auth.register.email,
                            inputs.enabled,
                            inputs.required,
                        );

                        let row = fields::password_row(
                            ui,
                            "auth_password",
                            "Password",
                            &mut auth.password,
                            auth.show_password,
                            inputs.enabled,
                        );
                        if row.focused {
                            auth.show_rules = true;
                        }
                        actions.password_edited |= row.changed;
                        actions.toggle_password |= row.toggled;

                        if auth.show_rules {
                            for rule in StrengthRule::ALL {
                                let passed = auth.strength.passed(rule);
                                let (marker, color) = if passed {
                                    ("✔", style::SUCCESS_TEXT)
                                } else {
                                    ("•", style::MUTED_TEXT)
                                };
                                ui.label(
                                    RichText::new(format!("{marker} {}", rule.label()))
                                        .color(color),
                                );
                            }
                        }

                        ui.horizontal(|ui| {
                            ui.label("Confirm password");
                            let response = ui.add_enabled(
                                inputs.enabled,
                                egui::TextEdit::singleline(&mut auth.confirm)
                                    .id(egui::Id::new("auth_confirm"))
                                    .password(true)
                                    .desired_width(220.0),
                            );
                            actions.confirm_edited |= response.changed();
                        });

                        if let Some(message) = auth.match_state.message() {
                            let color = if auth.match_state == MatchState::Match {
                                style::SUCCESS_TEXT
                            } else {
                                style::ERROR_TEXT
                            };
                            ui.label(RichText::new(message).color(color));
                        }
                    }
                    FormSection::Login => {
                        fields::text_row(
                            ui,
                            "Email",
                            &mut auth.login.email,
                            inputs.enabled,
                            inputs.required,
                        );
                        ui.horizontal(|ui| {
                            ui.label("Password *");
                            ui.add_enabled(
                                inputs.enabled,
                                egui::TextEdit::singleline(&mut auth.login.password)
                                    .id(egui::Id::new("login_password"))
                                    .password(true)
                                    .desired_width(220.0),
                            );
                        });
                        if ui.link("Forgot password?").clicked() {
                            actions.go_to = Some(FormSection::Forgot);
                        }
                    }
                    FormSection::Forgot => {
                        fields::text_row(
                            ui,
                            "Email",
                            &mut auth.forgot.email,
                            inputs.enabled,
                            inputs.required,
                        );
                    }
                }
            }

            if let Some(error) = auth.submit_error.as_deref() {
                ui.label(RichText::new(error).color(style::ERROR_TEXT));
            }

            ui.add_space(8.0);
            let submit_label = match auth.action {
                FormSection::Register => "Create account",
                FormSection::Login => "Sign in",
                FormSection::Forgot => "Send reset link",
            };
            if ui.button(submit_label).clicked() {
                actions.submit = true;
            }

            ui.add_space(12.0);
            if auth.go_login_visible && ui.link("Already have an account? Sign in").clicked() {
                actions.go_to = Some(FormSection::Login);
            }
            if auth.go_register_visible && ui.link("Need an account? Register").clicked() {
                actions.go_to = Some(FormSection::Register);
            }
        }

        if actions.password_edited {
            self.controller.auth_password_edited();
        }
        if actions.confirm_edited {
            self.controller.auth_confirm_edited();
        }
        if actions.toggle_password {
            self.controller.toggle_auth_password();
        }
        if actions.submit {
            self.controller.submit_auth();
        }
        if let Some(target) = actions.go_to {
            self.controller.show_section(target);
        }
    }
}
