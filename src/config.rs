//! Persisted application settings.
//!
//! A small TOML file in the `.trainboard` directory names the training
//! service and the section the auth page opens on. A missing file means
//! defaults; an unreadable or invalid file also falls back to defaults, with
//! a logged warning, so a bad edit never blocks startup.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::{app_dirs, egui_app::state::FormSection, training_api};

/// Filename of the app configuration inside the `.trainboard` directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Settings loaded at startup.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Base URL of the training service.
    #[serde(default = "default_server_url")]
    pub server_url: String,
    /// Section the auth page shows first.
    #[serde(default)]
    pub initial_section: FormSection,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            initial_section: FormSection::default(),
        }
    }
}

fn default_server_url() -> String {
    training_api::DEFAULT_BASE_URL.to_string()
}

/// Errors that can occur while loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The application directory could not be resolved.
    #[error(transparent)]
    Dir(#[from] app_dirs::AppDirError),
    /// The config file exists but could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The config file is not valid TOML for [`AppConfig`].
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Load the configuration, treating a missing file as defaults.
pub fn load() -> Result<AppConfig, ConfigError> {
    let path = app_dirs::app_root_dir()?.join(CONFIG_FILE_NAME);
    load_from(&path)
}

/// Load the configuration, falling back to defaults on any failure.
pub fn load_or_default() -> AppConfig {
    match load() {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Using default configuration: {err}");
            AppConfig::default()
        }
    }
}

fn load_from(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = load_from(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.server_url, training_api::DEFAULT_BASE_URL);
        assert_eq!(config.initial_section, FormSection::Register);
    }

    #[test]
    fn parses_full_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            "server_url = \"http://train.example:8080\"\ninitial_section = \"login\"\n",
        )
        .unwrap();
        let config = load_from(&path).unwrap();
        assert_eq!(config.server_url, "http://train.example:8080");
        assert_eq!(config.initial_section, FormSection::Login);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "initial_section = \"forgot\"\n").unwrap();
        let config = load_from(&path).unwrap();
        assert_eq!(config.server_url, training_api::DEFAULT_BASE_URL);
        assert_eq!(config.initial_section, FormSection::Forgot);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "initial_section = \"admin\"\n").unwrap();
        assert!(matches!(
            load_from(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
