//! Colors shared across the UI.

use egui::Color32;

/// Tone of the footer status badge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTone {
    Idle,
    Info,
    Error,
}

/// Badge color for a status tone.
pub fn status_tone_color(tone: StatusTone) -> Color32 {
    match tone {
        StatusTone::Idle => Color32::from_rgb(110, 110, 110),
        StatusTone::Info => Color32::from_rgb(96, 170, 255),
        StatusTone::Error => ERROR_TEXT,
    }
}

/// Training-accuracy series color.
pub const TRAINING_SERIES: Color32 = Color32::from_rgb(75, 192, 192);
/// Validation-accuracy series color.
pub const VALIDATION_SERIES: Color32 = Color32::from_rgb(255, 99, 132);

/// Positive indicator text (match message, satisfied rules).
pub const SUCCESS_TEXT: Color32 = Color32::from_rgb(96, 200, 120);
/// Negative indicator text (mismatch, submit guard errors).
pub const ERROR_TEXT: Color32 = Color32::from_rgb(235, 90, 90);
/// De-emphasized text (unsatisfied rules, hints).
pub const MUTED_TEXT: Color32 = Color32::from_rgb(150, 150, 150);

/// Chart plot background.
pub const CHART_FILL: Color32 = Color32::from_rgb(20, 20, 24);
/// Chart gridline color.
pub const CHART_GRID: Color32 = Color32::from_rgb(48, 48, 54);
