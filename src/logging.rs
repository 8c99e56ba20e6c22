//! Logger setup for the CLI and the TUI.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

use crate::config::GuideConfig;

/// Where log lines go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Stderr, keeping stdout for console text
    Stderr,
    /// The configured `log_file`, or nowhere when none is set
    File,
}

/// `RUST_LOG` when set, else the configured filter
pub fn env_filter(config: &GuideConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.log_filter)
            .with_context(|| format!("Invalid log filter '{}'", config.log_filter)),
    }
}

/// Initializes the logging subsystem.
pub fn init(config: &GuideConfig, target: LogTarget) -> Result<()> {
    let filter = env_filter(config)?;

    match target {
        LogTarget::Stderr => tracing_subscriber::fmt()
            .compact()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| anyhow!("Failed to install logger: {e}"))?,
        LogTarget::File => {
            // Drawing owns the terminal, so the TUI only logs to a file
            let Some(path) = config.log_file.as_deref() else {
                return Ok(());
            };
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(open_log_file(path)?))
                .try_init()
                .map_err(|e| anyhow!("Failed to install logger: {e}"))?
        }
    }

    tracing::debug!(?target, "logging started");
    Ok(())
}

fn open_log_file(path: &Path) -> Result<std::fs::File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_filter_is_reported() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let config = GuideConfig {
            log_filter: "btcguide=loud".to_string(),
            ..GuideConfig::default()
        };
        assert!(env_filter(&config).is_err());
        assert!(env_filter(&GuideConfig::default()).is_ok());
    }

    #[test]
    fn test_file_target_without_path_is_silent() {
        let config = GuideConfig::default();
        assert!(init(&config, LogTarget::File).is_ok());
    }

    #[test]
    fn test_open_log_file_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("guide.log");
        open_log_file(&path).unwrap();
        assert!(path.exists());
        assert!(open_log_file(&dir.path().join("missing/guide.log")).is_err());
    }
}
