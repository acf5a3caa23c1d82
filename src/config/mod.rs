//! Process configuration.
//!
//! One explicit [`Config`] value is constructed at startup and passed by
//! reference into the orchestrator and analyzer. There are no ambient
//! globals: the API credential, model name and store location all live here.

use anyhow::{Context, Result};
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_DATA_FILE: &str = "reviews_data.csv";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Gemini API key. Usually supplied via `GEMINI_API_KEY` rather than the
    /// config file.
    pub api_key: Option<String>,

    /// Model used for triage.
    pub model: String,

    /// Location of the review table. Relative paths resolve against the app
    /// directory (`~/.feedback-triage`).
    pub data_file: PathBuf,

    /// Upper bound on a single triage request; expiry is handled as an
    /// analyzer failure.
    pub request_timeout_secs: u64,

    // Computed at load time, never persisted.
    #[serde(skip)]
    pub config_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            config_path: PathBuf::new(),
        }
    }
}

impl Config {
    /// Load `~/.feedback-triage/config.toml`, creating it with defaults on
    /// first run.
    pub fn load_or_init() -> Result<Self> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .context("Could not find home directory")?;
        let app_dir = home.join(".feedback-triage");

        Self::load_or_init_at(&app_dir)
    }

    /// Same as [`Config::load_or_init`] but rooted at an explicit directory.
    pub fn load_or_init_at(app_dir: &Path) -> Result<Self> {
        let config_path = app_dir.join("config.toml");

        if !app_dir.exists() {
            fs::create_dir_all(app_dir).context("Failed to create .feedback-triage directory")?;
        }

        let mut config = if config_path.exists() {
            let contents =
                fs::read_to_string(&config_path).context("Failed to read config file")?;
            toml::from_str::<Config>(&contents).context("Failed to parse config file")?
        } else {
            let config = Config::default();
            let toml_str =
                toml::to_string_pretty(&config).context("Failed to serialize config")?;
            fs::write(&config_path, toml_str).context("Failed to write config file")?;
            config
        };

        config.config_path = config_path;
        if config.data_file.is_relative() {
            config.data_file = app_dir.join(&config.data_file);
        }

        Ok(config)
    }

    /// Apply environment variable overrides to config.
    pub fn apply_env_overrides(&mut self) {
        // API key: GEMINI_API_KEY, falling back to GOOGLE_API_KEY
        if let Ok(key) =
            std::env::var("GEMINI_API_KEY").or_else(|_| std::env::var("GOOGLE_API_KEY"))
        {
            if !key.is_empty() {
                self.api_key = Some(key);
            }
        }

        // Model: FEEDBACK_TRIAGE_MODEL
        if let Ok(model) = std::env::var("FEEDBACK_TRIAGE_MODEL") {
            if !model.is_empty() {
                self.model = model;
            }
        }

        // Store location: FEEDBACK_TRIAGE_DATA_FILE
        if let Ok(data_file) = std::env::var("FEEDBACK_TRIAGE_DATA_FILE") {
            if !data_file.is_empty() {
                self.data_file = PathBuf::from(data_file);
            }
        }

        // Request timeout: FEEDBACK_TRIAGE_TIMEOUT_SECS
        if let Ok(timeout_str) = std::env::var("FEEDBACK_TRIAGE_TIMEOUT_SECS") {
            if let Ok(timeout) = timeout_str.parse::<u64>() {
                if timeout > 0 {
                    self.request_timeout_secs = timeout;
                }
            }
        }
    }

    /// The external credential is a startup requirement: absence is fatal
    /// before any command runs, never a per-request error.
    pub fn require_api_key(&self) -> std::result::Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn first_run_writes_defaults_and_resolves_data_file() {
        let tmp = TempDir::new().unwrap();
        let app_dir = tmp.path().join(".feedback-triage");

        let config = Config::load_or_init_at(&app_dir).unwrap();

        assert!(app_dir.join("config.toml").exists());
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.data_file, app_dir.join("reviews_data.csv"));
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn reload_round_trips_persisted_values() {
        let tmp = TempDir::new().unwrap();
        let app_dir = tmp.path().join(".feedback-triage");

        Config::load_or_init_at(&app_dir).unwrap();
        fs::write(
            app_dir.join("config.toml"),
            "model = \"gemini-2.0-pro\"\nrequest_timeout_secs = 5\n",
        )
        .unwrap();

        let config = Config::load_or_init_at(&app_dir).unwrap();
        assert_eq!(config.model, "gemini-2.0-pro");
        assert_eq!(config.request_timeout_secs, 5);
    }

    #[test]
    fn missing_api_key_is_a_config_error() {
        let config = Config::default();
        assert!(matches!(
            config.require_api_key(),
            Err(ConfigError::MissingApiKey)
        ));
    }

    #[test]
    fn empty_api_key_counts_as_missing() {
        let config = Config {
            api_key: Some(String::new()),
            ..Config::default()
        };
        assert!(config.require_api_key().is_err());
    }

    #[test]
    fn present_api_key_is_returned() {
        let config = Config {
            api_key: Some("test-key".into()),
            ..Config::default()
        };
        assert_eq!(config.require_api_key().unwrap(), "test-key");
    }
}
