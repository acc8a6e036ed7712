//! Runtime settings.
//!
//! Settings come from an optional JSON file; command-line flags are applied on
//! top by the binary. Every field has a default so an empty object is valid.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::notify::DEFAULT_NOTICE_SECS;
use crate::theme::Theme;

const MAX_NOTICE_SECS: u64 = 24 * 60 * 60;

/// What to do when the user submits blank text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyInputPolicy {
    /// Show an error-kind notification.
    #[default]
    Notify,
    /// Leave everything as it is without feedback.
    Ignore,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Theme at startup.
    pub theme: Theme,
    /// Seconds a status message stays visible.
    pub notice_secs: u64,
    pub empty_input: EmptyInputPolicy,
    /// `tracing` filter directive, e.g. `info` or `tasklist=debug`.
    pub log_level: String,
    /// Directory for the log file. Logging is off when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            notice_secs: DEFAULT_NOTICE_SECS,
            empty_input: EmptyInputPolicy::default(),
            log_level: "info".to_string(),
            log_dir: None,
        }
    }
}

impl Config {
    /// Load settings from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, is not valid JSON,
    /// names an unknown field, or sets `notice_secs` to zero.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise return defaults.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// Reject values that would make the UI misbehave.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroNoticeDuration`] when `notice_secs` is 0.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.notice_secs == 0 {
            return Err(ConfigError::ZeroNoticeDuration);
        }
        Ok(())
    }

    /// Notice duration, capped at one day.
    pub fn notice_duration(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.notice_secs.min(MAX_NOTICE_SECS) as i64)
    }
}
