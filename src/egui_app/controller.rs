//! Maintains app state and bridges page actions to the egui renderer.
//!
//! The controller owns the background job channel: the analyze request runs
//! on a worker thread and reports back over mpsc, so the UI stays responsive
//! while the service trains. A single in-flight flag keeps the submit
//! handler single-flight; a second submission while one is running is
//! ignored instead of racing the first.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use crate::config::AppConfig;
use crate::egui_app::state::{
    AccuracyChart, AnalysisResults, FormSection, StatusBarState, UiState, format_accuracy,
};
use crate::egui_app::ui::style::StatusTone;
use crate::training_api::{self, AnalyzeError, AnalyzeRequest, AnalyzeResponse};
use crate::validation::{self, MISMATCH_MESSAGE, StrengthReport};

/// Message shown when a failure has no server-provided explanation.
const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred. Check the log for details.";

pub(crate) enum JobMessage {
    AnalysisFinished(Result<AnalyzeResponse, AnalyzeError>),
}

/// Maintains app state and bridges core logic to the egui UI.
pub struct AppController {
    pub ui: UiState,
    config: AppConfig,
    message_tx: Sender<JobMessage>,
    message_rx: Receiver<JobMessage>,
    analysis_in_progress: bool,
}

impl AppController {
    /// Build a controller from loaded settings and show the configured
    /// initial auth section.
    pub fn new(config: AppConfig) -> Self {
        let (message_tx, message_rx) = mpsc::channel();
        let mut controller = Self {
            ui: UiState::default(),
            config,
            message_tx,
            message_rx,
            analysis_in_progress: false,
        };
        let initial = controller.config.initial_section;
        controller.show_section(initial);
        controller
    }

    /// Update the footer status line.
    pub fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.ui.status = StatusBarState::new(text, tone);
    }

    /// Dismiss the blocking alert modal.
    pub fn dismiss_alert(&mut self) {
        self.ui.alert = None;
    }

    // ---- auth page ----

    /// Switch the auth form to `target`.
    ///
    /// Exactly one section ends up visible with enabled+required inputs;
    /// the other two end up hidden with disabled, non-required inputs. The
    /// nav links swap so only the one leading away from `target` shows.
    pub fn show_section(&mut self, target: FormSection) {
        self.ui.auth.action = target;
        for section in FormSection::ALL {
            self.ui
                .auth
                .section_inputs_mut(section)
                .set_active(section == target);
        }
        self.ui.auth.go_login_visible = target == FormSection::Register;
        self.ui.auth.go_register_visible = target != FormSection::Register;
    }

    /// Re-run live validation after a register password edit.
    ///
    /// The match check re-runs here too, not only on confirm edits, so a
    /// password change immediately flips a stale match indicator.
    pub fn auth_password_edited(&mut self) {
        let auth = &mut self.ui.auth;
        auth.strength = StrengthReport::evaluate(&auth.password);
        auth.match_state = validation::validate_match(&auth.password, &auth.confirm);
    }

    /// Re-run the match check after a confirm-field edit.
    pub fn auth_confirm_edited(&mut self) {
        let auth = &mut self.ui.auth;
        auth.match_state = validation::validate_match(&auth.password, &auth.confirm);
    }

    /// Flip visibility of the register password field.
    pub fn toggle_auth_password(&mut self) {
        self.ui.auth.show_password = !self.ui.auth.show_password;
    }

    /// Submit the auth form. Returns whether the submission went through.
    ///
    /// Live validation can be bypassed (paste then submit), so the register
    /// section re-checks the match here and blocks on a mismatch.
    pub fn submit_auth(&mut self) -> bool {
        let auth = &self.ui.auth;
        if auth.action == FormSection::Register && auth.password != auth.confirm {
            self.ui.auth.submit_error = Some(MISMATCH_MESSAGE.to_string());
            return false;
        }
        self.ui.auth.submit_error = None;
        let action = self.ui.auth.action;
        tracing::info!("Auth form submitted with action {action:?}");
        let status = match action {
            FormSection::Register => "Registration submitted",
            FormSection::Login => "Login submitted",
            FormSection::Forgot => "Password reset email requested",
        };
        self.set_status(status, StatusTone::Info);
        true
    }

    // ---- reset page ----

    /// Re-run live validation after a reset password edit.
    pub fn reset_password_edited(&mut self) {
        let reset = &mut self.ui.reset;
        reset.strength = StrengthReport::evaluate(&reset.password);
        reset.match_state = validation::validate_match(&reset.password, &reset.confirm);
    }

    /// Re-run the match check after a reset confirm-field edit.
    pub fn reset_confirm_edited(&mut self) {
        let reset = &mut self.ui.reset;
        reset.match_state = validation::validate_match(&reset.password, &reset.confirm);
    }

    /// Flip visibility of the reset password field.
    pub fn toggle_reset_password(&mut self) {
        self.ui.reset.show_password = !self.ui.reset.show_password;
    }

    /// Flip visibility of the reset confirm field.
    pub fn toggle_reset_confirm(&mut self) {
        self.ui.reset.show_confirm = !self.ui.reset.show_confirm;
    }

    // ---- dashboard ----

    /// Whether an analyze request is currently in flight.
    pub fn analysis_in_progress(&self) -> bool {
        self.analysis_in_progress
    }

    /// Submit the dashboard form.
    ///
    /// Returns false when the form is invalid or a request is already in
    /// flight; the in-flight case is ignored rather than queued.
    pub fn begin_analysis(&mut self) -> bool {
        if self.analysis_in_progress {
            return false;
        }
        let Some(request) = self.build_analyze_request() else {
            return false;
        };

        self.analysis_in_progress = true;
        self.ui.dashboard.analysis_running = true;
        // Prior results stay hidden until the new ones arrive.
        self.ui.dashboard.results = None;
        self.set_status("Analyzing...", StatusTone::Info);

        let base_url = self.config.server_url.clone();
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = training_api::analyze(&base_url, &request);
            let _ = tx.send(JobMessage::AnalysisFinished(result));
        });
        true
    }

    fn build_analyze_request(&mut self) -> Option<AnalyzeRequest> {
        self.ui.dashboard.form_error = None;
        let model_name = self.ui.dashboard.model_name.trim().to_string();
        if model_name.is_empty() {
            self.ui.dashboard.form_error = Some("Model name is required".to_string());
            return None;
        }
        let epochs = match self.ui.dashboard.epochs.trim().parse::<u32>() {
            Ok(epochs) if epochs > 0 => epochs,
            _ => {
                self.ui.dashboard.form_error =
                    Some("Epochs must be a positive number".to_string());
                return None;
            }
        };
        Some(AnalyzeRequest {
            model_name,
            epochs,
            dataset: self.ui.dashboard.dataset.clone(),
        })
    }

    /// Drain finished background jobs and fold them into UI state.
    pub fn poll_background_jobs(&mut self) {
        while let Ok(message) = self.message_rx.try_recv() {
            match message {
                JobMessage::AnalysisFinished(result) => {
                    // The loading state is released on every outcome,
                    // success or not.
                    self.analysis_in_progress = false;
                    self.ui.dashboard.analysis_running = false;
                    self.apply_analysis_result(result);
                }
            }
        }
    }

    fn apply_analysis_result(&mut self, result: Result<AnalyzeResponse, AnalyzeError>) {
        match result {
            Ok(response) => {
                let chart = AccuracyChart::from_history(&response.training_history);
                let epochs = chart.epochs.len();
                // Replacing the option drops any chart from a prior run
                // before the new one becomes visible.
                self.ui.dashboard.results = Some(AnalysisResults {
                    accuracy_text: format_accuracy(response.test_accuracy),
                    chart,
                });
                self.set_status(
                    format!("Analysis finished after {epochs} epoch(s)"),
                    StatusTone::Info,
                );
            }
            Err(AnalyzeError::Server(message)) => {
                self.ui.alert = Some(format!("Error: {message}"));
                self.set_status("Analysis rejected by the service", StatusTone::Error);
            }
            Err(err) => {
                tracing::error!("Analyze request failed: {err}");
                self.ui.alert = Some(UNEXPECTED_ERROR_MESSAGE.to_string());
                self.set_status("Analysis failed", StatusTone::Error);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::tests::serve_once;
    use crate::training_api::TrainingHistory;
    use crate::validation::MatchState;
    use std::net::TcpListener;
    use std::time::{Duration, Instant};

    fn controller_with_url(server_url: &str) -> AppController {
        AppController::new(AppConfig {
            server_url: server_url.to_string(),
            initial_section: FormSection::Register,
        })
    }

    fn controller() -> AppController {
        controller_with_url(training_api::DEFAULT_BASE_URL)
    }

    fn fill_dashboard_form(controller: &mut AppController) {
        controller.ui.dashboard.model_name = "cnn-small".to_string();
        controller.ui.dashboard.epochs = "3".to_string();
    }

    /// Poll jobs until `done` holds or the deadline passes.
    fn wait_until(controller: &mut AppController, done: impl Fn(&AppController) -> bool) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !done(controller) {
            assert!(Instant::now() < deadline, "timed out waiting for job");
            controller.poll_background_jobs();
            std::thread::sleep(Duration::from_millis(10));
        }
    }

    fn unused_local_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}", addr)
    }

    #[test]
    fn initial_section_comes_from_config() {
        let controller = AppController::new(AppConfig {
            server_url: training_api::DEFAULT_BASE_URL.to_string(),
            initial_section: FormSection::Login,
        });
        assert_eq!(controller.ui.auth.action, FormSection::Login);
        assert!(controller.ui.auth.login_inputs.visible);
        assert!(!controller.ui.auth.register_inputs.visible);
    }

    #[test]
    fn show_section_activates_exactly_one_section() {
        let mut controller = controller();
        for target in FormSection::ALL {
            controller.show_section(target);
            assert_eq!(controller.ui.auth.action, target);
            for section in FormSection::ALL {
                let inputs = controller.ui.auth.section_inputs(section);
                if section == target {
                    assert!(inputs.visible && inputs.enabled && inputs.required);
                } else {
                    assert!(!inputs.visible && !inputs.enabled && !inputs.required);
                }
            }
        }
    }

    #[test]
    fn nav_links_swap_with_the_active_section() {
        let mut controller = controller();
        controller.show_section(FormSection::Register);
        assert!(controller.ui.auth.go_login_visible);
        assert!(!controller.ui.auth.go_register_visible);

        controller.show_section(FormSection::Login);
        assert!(!controller.ui.auth.go_login_visible);
        assert!(controller.ui.auth.go_register_visible);

        controller.show_section(FormSection::Forgot);
        assert!(!controller.ui.auth.go_login_visible);
        assert!(controller.ui.auth.go_register_visible);
    }

    #[test]
    fn password_edits_refresh_strength_and_match() {
        let mut controller = controller();
        controller.ui.auth.password = "A1@abcdef".to_string();
        controller.ui.auth.confirm = "A1@abcdef".to_string();
        controller.auth_password_edited();
        assert!(controller.ui.auth.strength.all_passed());
        assert_eq!(controller.ui.auth.match_state, MatchState::Match);

        // A later password edit must flip a stale match indicator.
        controller.ui.auth.password = "A1@abcdef!".to_string();
        controller.auth_password_edited();
        assert_eq!(controller.ui.auth.match_state, MatchState::Mismatch);
    }

    #[test]
    fn confirm_edits_refresh_match_only() {
        let mut controller = controller();
        controller.ui.auth.password = "A1@abcdef".to_string();
        controller.auth_confirm_edited();
        assert_eq!(controller.ui.auth.match_state, MatchState::Empty);

        controller.ui.auth.confirm = "A1@abcdef".to_string();
        controller.auth_confirm_edited();
        assert_eq!(controller.ui.auth.match_state, MatchState::Match);
    }

    #[test]
    fn register_submit_blocks_on_mismatch() {
        let mut controller = controller();
        controller.show_section(FormSection::Register);
        controller.ui.auth.password = "A1@abcdef".to_string();
        controller.ui.auth.confirm = "A1@abcdee".to_string();
        assert!(!controller.submit_auth());
        assert_eq!(
            controller.ui.auth.submit_error.as_deref(),
            Some(MISMATCH_MESSAGE)
        );

        controller.ui.auth.confirm = "A1@abcdef".to_string();
        assert!(controller.submit_auth());
        assert!(controller.ui.auth.submit_error.is_none());
    }

    #[test]
    fn mismatch_guard_only_applies_to_register() {
        let mut controller = controller();
        controller.show_section(FormSection::Login);
        controller.ui.auth.password = "A1@abcdef".to_string();
        controller.ui.auth.confirm = "different".to_string();
        assert!(controller.submit_auth());
        assert!(controller.ui.auth.submit_error.is_none());
    }

    #[test]
    fn visibility_toggles_return_to_the_original_state() {
        let mut controller = controller();
        assert!(!controller.ui.auth.show_password);
        controller.toggle_auth_password();
        assert!(controller.ui.auth.show_password);
        controller.toggle_auth_password();
        assert!(!controller.ui.auth.show_password);

        controller.toggle_reset_password();
        controller.toggle_reset_confirm();
        assert!(controller.ui.reset.show_password);
        assert!(controller.ui.reset.show_confirm);
        controller.toggle_reset_password();
        assert!(!controller.ui.reset.show_password);
        // The two reset toggles are independent.
        assert!(controller.ui.reset.show_confirm);
    }

    #[test]
    fn reset_page_shares_validation_behavior() {
        let mut controller = controller();
        controller.ui.reset.password = "A1@abcdef".to_string();
        controller.ui.reset.confirm = "A1@abcde".to_string();
        controller.reset_password_edited();
        assert!(controller.ui.reset.strength.all_passed());
        assert_eq!(controller.ui.reset.match_state, MatchState::Mismatch);

        controller.ui.reset.confirm.push('f');
        controller.reset_confirm_edited();
        assert_eq!(controller.ui.reset.match_state, MatchState::Match);
    }

    #[test]
    fn invalid_dashboard_form_is_rejected_inline() {
        let mut controller = controller();
        controller.ui.dashboard.model_name = "  ".to_string();
        controller.ui.dashboard.epochs = "3".to_string();
        assert!(!controller.begin_analysis());
        assert!(controller.ui.dashboard.form_error.is_some());
        assert!(!controller.ui.dashboard.analysis_running);

        controller.ui.dashboard.model_name = "cnn-small".to_string();
        controller.ui.dashboard.epochs = "zero".to_string();
        assert!(!controller.begin_analysis());
        assert_eq!(
            controller.ui.dashboard.form_error.as_deref(),
            Some("Epochs must be a positive number")
        );
    }

    #[test]
    fn successful_analysis_updates_results_and_clears_loading() {
        let json = concat!(
            r#"{"test_accuracy":0.9567,"training_history":"#,
            r#"{"accuracy":[0.5,0.7,0.9],"val_accuracy":[0.4,0.6,0.85]}}"#
        );
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
            json.len(),
            json
        );
        let url = serve_once(response);
        let mut controller = controller_with_url(&url);
        fill_dashboard_form(&mut controller);

        assert!(controller.begin_analysis());
        assert!(controller.ui.dashboard.analysis_running);
        wait_until(&mut controller, |c| !c.analysis_in_progress());

        let results = controller.ui.dashboard.results.as_ref().unwrap();
        assert_eq!(results.accuracy_text, "95.67%");
        assert_eq!(results.chart.epochs, vec![1, 2, 3]);
        assert_eq!(results.chart.training, vec![0.5, 0.7, 0.9]);
        assert_eq!(results.chart.validation, vec![0.4, 0.6, 0.85]);
        assert!(!controller.ui.dashboard.analysis_running);
        assert!(controller.ui.alert.is_none());
    }

    #[test]
    fn server_error_surfaces_as_blocking_alert() {
        let json = r#"{"error":"No dataset provided"}"#;
        let response = format!(
            "HTTP/1.1 400 Bad Request\r\nContent-Length: {}\r\n\r\n{}",
            json.len(),
            json
        );
        let url = serve_once(response);
        let mut controller = controller_with_url(&url);
        fill_dashboard_form(&mut controller);

        assert!(controller.begin_analysis());
        wait_until(&mut controller, |c| !c.analysis_in_progress());

        assert_eq!(
            controller.ui.alert.as_deref(),
            Some("Error: No dataset provided")
        );
        assert!(controller.ui.dashboard.results.is_none());
        assert!(!controller.ui.dashboard.analysis_running);
    }

    #[test]
    fn transport_error_surfaces_generic_alert() {
        let url = unused_local_url();
        let mut controller = controller_with_url(&url);
        fill_dashboard_form(&mut controller);

        assert!(controller.begin_analysis());
        wait_until(&mut controller, |c| !c.analysis_in_progress());

        assert_eq!(controller.ui.alert.as_deref(), Some(UNEXPECTED_ERROR_MESSAGE));
        assert!(controller.ui.dashboard.results.is_none());
        assert!(!controller.ui.dashboard.analysis_running);
    }

    #[test]
    fn second_submission_while_in_flight_is_ignored() {
        let json = r#"{"test_accuracy":0.5,"training_history":{"accuracy":[0.5],"val_accuracy":[0.4]}}"#;
        let response = format!("HTTP/1.1 200 OK\r\nContent-Length: {}\r\n\r\n{}", json.len(), json);
        let url = serve_once(response);
        let mut controller = controller_with_url(&url);
        fill_dashboard_form(&mut controller);

        assert!(controller.begin_analysis());
        assert!(!controller.begin_analysis());
        wait_until(&mut controller, |c| !c.analysis_in_progress());

        // Only the one in-flight request reported back.
        assert!(controller.message_rx.try_recv().is_err());
        assert!(controller.ui.dashboard.results.is_some());
    }

    #[test]
    fn repeat_analysis_replaces_the_previous_chart() {
        let mut controller = controller();
        let first = TrainingHistory {
            accuracy: vec![0.2, 0.4],
            val_accuracy: vec![0.1, 0.3],
        };
        let second = TrainingHistory {
            accuracy: vec![0.5, 0.7, 0.9],
            val_accuracy: vec![0.4, 0.6, 0.85],
        };
        controller.apply_analysis_result(Ok(AnalyzeResponse {
            test_accuracy: 0.5,
            training_history: first,
        }));
        controller.apply_analysis_result(Ok(AnalyzeResponse {
            test_accuracy: 0.9567,
            training_history: second,
        }));

        let results = controller.ui.dashboard.results.as_ref().unwrap();
        assert_eq!(results.accuracy_text, "95.67%");
        assert_eq!(results.chart.epochs, vec![1, 2, 3]);
    }
}
