//! Error types for task submission and configuration loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by task-list transitions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskError {
    /// The submitted text is empty after trimming.
    #[error("task cannot be empty")]
    EmptyInput,
}

/// Errors returned while loading settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid JSON for [`crate::config::Config`].
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A notice duration of zero would clear messages before they are drawn.
    #[error("notice_secs must be at least 1")]
    ZeroNoticeDuration,
}

/// Errors returned while installing the log subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log filter '{filter}': {reason}")]
    InvalidFilter { filter: String, reason: String },

    #[error("failed to create log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open log file in {path}: {source}")]
    OpenFile {
        path: PathBuf,
        #[source]
        source: tracing_appender::rolling::InitError,
    },

    #[error("failed to install log subscriber: {0}")]
    Install(String),
}
