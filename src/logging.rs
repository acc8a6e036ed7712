//! Log subscriber setup.
//!
//! The terminal UI owns stdout and stderr while it runs, so logs are written to
//! `tasklist.log` in a configured directory through a non-blocking writer. With
//! no directory configured nothing is installed and `tracing` macros are no-ops.

use std::fs;
use std::path::Path;

use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

use crate::error::LoggingError;

const LOG_FILE_NAME: &str = "tasklist.log";

/// Install a file-backed subscriber.
///
/// `RUST_LOG` wins over `level` when set. The returned guard flushes buffered
/// lines when dropped and must be kept alive until shutdown.
///
/// # Errors
///
/// Returns [`LoggingError`] if the filter does not parse, the directory cannot
/// be created, the log file cannot be opened, or a global subscriber is
/// already installed.
pub fn init_logging(level: &str, log_dir: &Path) -> Result<WorkerGuard, LoggingError> {
    let filter = match std::env::var("RUST_LOG") {
        Ok(env) if !env.trim().is_empty() => parse_filter(&env)?,
        _ => parse_filter(level)?,
    };

    fs::create_dir_all(log_dir).map_err(|source| LoggingError::CreateDir {
        path: log_dir.to_path_buf(),
        source,
    })?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE_NAME)
        .build(log_dir)
        .map_err(|source| LoggingError::OpenFile {
            path: log_dir.to_path_buf(),
            source,
        })?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|err| LoggingError::Install(err.to_string()))?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        log_dir = %log_dir.display(),
        "logging started"
    );
    Ok(guard)
}

fn parse_filter(directive: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(directive).map_err(|err| LoggingError::InvalidFilter {
        filter: directive.to_string(),
        reason: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_filter() {
        let err = parse_filter("tasklist=loud").expect_err("bad level");
        assert!(matches!(err, LoggingError::InvalidFilter { .. }));
    }

    #[test]
    fn unopenable_log_file_is_an_error() {
        let dir = tempfile::tempdir().expect("create temp dir");
        fs::create_dir(dir.path().join(LOG_FILE_NAME)).expect("block the log file name");

        let err = init_logging("info", dir.path()).expect_err("log file is a directory");

        assert!(matches!(err, LoggingError::OpenFile { .. }));
        assert!(err.to_string().contains(&dir.path().display().to_string()));
    }

    #[test]
    fn accepts_plain_level() {
        assert!(parse_filter("debug").is_ok());
    }
}
