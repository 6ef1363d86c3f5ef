//! Reusable form field widgets.

use eframe::egui::{self, TextEdit};

/// What happened to a password row this frame.
#[derive(Clone, Copy, Debug, Default)]
pub(super) struct PasswordRowResponse {
    pub changed: bool,
    pub toggled: bool,
    pub focused: bool,
}

/// A labeled password input with a visibility toggle button.
///
/// Parametrized by a stable `id` so the same routine serves every
/// button/field pair on the auth and reset pages. The button shows an eye
/// while the value is hidden and a lock while it is revealed; two clicks
/// return the field to its original state.
pub(super) fn password_row(
    ui: &mut egui::Ui,
    id: &str,
    label: &str,
    value: &mut String,
    shown: bool,
    enabled: bool,
) -> PasswordRowResponse {
    let mut out = PasswordRowResponse::default();
    ui.horizontal(|ui| {
        ui.label(label);
        let edit = TextEdit::singleline(value)
            .id(egui::Id::new(id))
            .password(!shown)
            .desired_width(220.0);
        let response = ui.add_enabled(enabled, edit);
        out.changed = response.changed();
        out.focused = response.gained_focus();

        let (icon, hover) = if shown {
            ("🔒", "Hide password")
        } else {
            ("👁", "Show password")
        };
        if ui
            .add_enabled(enabled, egui::Button::new(icon))
            .on_hover_text(hover)
            .clicked()
        {
            out.toggled = true;
        }
    });
    out
}

/// A labeled single-line text input; returns whether it changed.
pub(super) fn text_row(
    ui: &mut egui::Ui,
    label: &str,
    value: &mut String,
    enabled: bool,
    required: bool,
) -> bool {
    let mut changed = false;
    ui.horizontal(|ui| {
        let text = if required {
            format!("{label} *")
        } else {
            label.to_string()
        };
        ui.label(text);
        let response = ui.add_enabled(enabled, TextEdit::singleline(value).desired_width(220.0));
        changed = response.changed();
    });
    changed
}
