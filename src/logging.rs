//! Structured logging setup.
//!
//! Events are emitted with `tracing` throughout the crate; this module
//! installs the `tracing-subscriber` formatter. `OSCISIM_LOG` takes
//! precedence over the configured level.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::error::{SimError, SimResult};

/// Environment variable holding a filter directive.
pub const LOG_ENV: &str = "OSCISIM_LOG";

/// Build the event filter from the environment or the configured level.
///
/// # Errors
///
/// Returns `Logging` if the configured directive does not parse.
pub fn filter(config: &LoggingConfig) -> SimResult<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.level)
        .map_err(|e| SimError::Logging(format!("invalid level '{}': {e}", config.level)))
}

/// Install the global subscriber, writing to the configured file or stderr.
///
/// # Errors
///
/// Returns error if the filter is invalid, the log file cannot be opened,
/// or a subscriber is already installed.
pub fn init(config: &LoggingConfig) -> SimResult<()> {
    let filter = filter(config)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let result = match &config.file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };
    result.map_err(|e| SimError::Logging(e.to_string()))
}

/// Install a file subscriber only when a log file is configured.
///
/// Terminal front ends use this so log lines never land on the alternate
/// screen. Returns whether a subscriber was installed.
///
/// # Errors
///
/// Same as [`init`].
pub fn init_file_only(config: &LoggingConfig) -> SimResult<bool> {
    if config.file.is_none() {
        return Ok(false);
    }
    init(config).map(|()| true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(level: &str) -> LoggingConfig {
        LoggingConfig {
            level: level.to_string(),
            file: None,
        }
    }

    #[test]
    fn test_filter_accepts_directives() {
        assert!(filter(&config("warn")).is_ok());
        assert!(filter(&config("oscisim=debug,warn")).is_ok());
    }

    #[test]
    fn test_filter_rejects_bad_level() {
        if std::env::var_os(LOG_ENV).is_some() {
            return;
        }
        let err = filter(&config("oscisim=loudest")).err();
        assert!(matches!(err, Some(SimError::Logging(_))));
    }

    #[test]
    fn test_init_file_only_skips_without_file() {
        assert!(!init_file_only(&config("info")).expect("no-op"));
    }

    #[test]
    fn test_init_reports_unopenable_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let cfg = LoggingConfig {
            level: "info".to_string(),
            file: Some(dir.path().join("missing").join("oscisim.log")),
        };
        assert!(matches!(init(&cfg), Err(SimError::Io(_))));
    }
}
