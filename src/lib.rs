//! Library exports for reuse in integration tests.
/// Application directory helpers.
pub mod app_dirs;
/// Persisted application settings.
pub mod config;
/// Shared egui UI modules.
pub mod egui_app;
pub(crate) mod http_client;
/// Logging setup.
pub mod logging;
/// Client for the remote training service.
pub mod training_api;
/// Password strength and confirmation-match checks.
pub mod validation;
