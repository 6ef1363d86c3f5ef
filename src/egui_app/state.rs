//! Shared state types for the egui UI.
//!
//! Everything here is transient and UI-local; nothing is persisted. The
//! controller mutates these types and the renderer reads them.

use std::path::PathBuf;

use serde::Deserialize;

use crate::egui_app::ui::style::{self, StatusTone};
use crate::training_api::TrainingHistory;
use crate::validation::{MatchState, StrengthReport};

/// Page selected in the top bar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AppPage {
    #[default]
    Dashboard,
    Auth,
    Reset,
}

impl AppPage {
    /// All pages, in top-bar order.
    pub const ALL: [AppPage; 3] = [AppPage::Dashboard, AppPage::Auth, AppPage::Reset];

    /// Top-bar label for the page.
    pub fn title(self) -> &'static str {
        match self {
            AppPage::Dashboard => "Dashboard",
            AppPage::Auth => "Account",
            AppPage::Reset => "Reset Password",
        }
    }
}

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub page: AppPage,
    pub status: StatusBarState,
    pub dashboard: DashboardState,
    pub auth: AuthFormState,
    pub reset: ResetFormState,
    /// Blocking message shown in a modal until dismissed.
    pub alert: Option<String>,
}

/// Status text + tone shown in the footer.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBarState {
    pub text: String,
    pub tone: StatusTone,
}

impl Default for StatusBarState {
    fn default() -> Self {
        Self {
            text: "Ready".into(),
            tone: StatusTone::Idle,
        }
    }
}

/// Dashboard form and result state.
#[derive(Clone, Debug, Default)]
pub struct DashboardState {
    pub model_name: String,
    /// Epoch count as typed; parsed when the form is submitted.
    pub epochs: String,
    pub dataset: Option<PathBuf>,
    /// Inline message for a rejected form, cleared on the next submission.
    pub form_error: Option<String>,
    /// True while an analyze request is in flight; drives the loading overlay.
    pub analysis_running: bool,
    /// Result of the last successful analysis. Replacing this drops the
    /// previous chart, so at most one chart model exists at a time.
    pub results: Option<AnalysisResults>,
}

/// Rendered outcome of one successful analysis.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisResults {
    /// Test accuracy formatted as a percentage, e.g. `"95.67%"`.
    pub accuracy_text: String,
    pub chart: AccuracyChart,
}

/// Line-chart model built from the training history.
#[derive(Clone, Debug, PartialEq)]
pub struct AccuracyChart {
    /// Epoch axis labels, 1-indexed, one per training point.
    pub epochs: Vec<u32>,
    pub training: Vec<f64>,
    pub validation: Vec<f64>,
}

impl AccuracyChart {
    /// Build the chart model from the server-supplied history.
    pub fn from_history(history: &TrainingHistory) -> Self {
        let epochs = (1..=history.accuracy.len() as u32).collect();
        Self {
            epochs,
            training: history.accuracy.clone(),
            validation: history.val_accuracy.clone(),
        }
    }
}

/// Format a `[0, 1]` accuracy as a percentage with two decimals.
pub fn format_accuracy(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

/// One of the mutually exclusive auth form sections.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FormSection {
    #[default]
    Register,
    Login,
    Forgot,
}

impl FormSection {
    /// All sections, in display order.
    pub const ALL: [FormSection; 3] = [
        FormSection::Register,
        FormSection::Login,
        FormSection::Forgot,
    ];

    /// Heading shown above the section.
    pub fn title(self) -> &'static str {
        match self {
            FormSection::Register => "Create account",
            FormSection::Login => "Sign in",
            FormSection::Forgot => "Forgot password",
        }
    }
}

/// Visibility and input attributes of one auth section.
///
/// Inputs in the active section are enabled and required; inputs everywhere
/// else are disabled and non-required so an inactive section can never
/// contribute values to a submission.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SectionInputs {
    pub visible: bool,
    pub enabled: bool,
    pub required: bool,
}

impl SectionInputs {
    /// Apply the active/inactive invariant in one step.
    pub fn set_active(&mut self, active: bool) {
        self.visible = active;
        self.enabled = active;
        self.required = active;
    }
}

/// Register-section field values.
#[derive(Clone, Debug, Default)]
pub struct RegisterFields {
    pub name: String,
    pub email: String,
}

/// Login-section field values.
#[derive(Clone, Debug, Default)]
pub struct LoginFields {
    pub email: String,
    pub password: String,
}

/// Forgot-section field values.
#[derive(Clone, Debug, Default)]
pub struct ForgotFields {
    pub email: String,
}

/// Auth page state: section machine plus live validation.
#[derive(Clone, Debug, Default)]
pub struct AuthFormState {
    /// Action submitted with the form; mirrors the active section.
    pub action: FormSection,
    pub register_inputs: SectionInputs,
    pub login_inputs: SectionInputs,
    pub forgot_inputs: SectionInputs,
    pub register: RegisterFields,
    pub login: LoginFields,
    pub forgot: ForgotFields,
    /// Register-section password under validation.
    pub password: String,
    pub confirm: String,
    pub show_password: bool,
    /// Whether the strength checklist is revealed (shown on first focus).
    pub show_rules: bool,
    pub strength: StrengthReport,
    pub match_state: MatchState,
    /// Error text set by the register submit guard.
    pub submit_error: Option<String>,
    pub go_login_visible: bool,
    pub go_register_visible: bool,
}

impl AuthFormState {
    /// Input attributes of `section`.
    pub fn section_inputs(&self, section: FormSection) -> &SectionInputs {
        match section {
            FormSection::Register => &self.register_inputs,
            FormSection::Login => &self.login_inputs,
            FormSection::Forgot => &self.forgot_inputs,
        }
    }

    /// Mutable input attributes of `section`.
    pub fn section_inputs_mut(&mut self, section: FormSection) -> &mut SectionInputs {
        match section {
            FormSection::Register => &mut self.register_inputs,
            FormSection::Login => &mut self.login_inputs,
            FormSection::Forgot => &mut self.forgot_inputs,
        }
    }
}

/// Reset page state: one form, two password fields.
#[derive(Clone, Debug, Default)]
pub struct ResetFormState {
    pub password: String,
    pub confirm: String,
    pub show_password: bool,
    pub show_confirm: bool,
    pub show_rules: bool,
    pub strength: StrengthReport,
    pub match_state: MatchState,
}

impl StatusBarState {
    /// Convenience constructor used by the controller.
    pub fn new(text: impl Into<String>, tone: StatusTone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }

    /// Color for the footer badge.
    pub fn badge_color(&self) -> egui::Color32 {
        style::status_tone_color(self.tone)
    }
}
