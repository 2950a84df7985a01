//! Logging configuration and initialization.

use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_level() -> String {
    "info".into()
}

fn default_format() -> String {
    "pretty".into()
}

impl LoggingConfig {
    /// Apply command-line overrides on top of the file values.
    #[must_use]
    pub fn with_overrides(mut self, level: Option<&str>, json: bool) -> Self {
        if let Some(level) = level {
            self.level = level.to_string();
        }
        if json {
            self.format = "json".into();
        }
        self
    }

    /// Initialize the tracing subscriber. `RUST_LOG` wins over the configured level.
    ///
    /// Logs go to stderr so the command output on stdout stays clean.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format.as_str() {
            "json" => {
                fmt()
                    .json()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .init();
            }
            _ => {
                fmt()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .init();
            }
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_flags_override_file_values() {
        let config = LoggingConfig::default().with_overrides(Some("debug"), true);
        assert_eq!(config.level, "debug");
        assert_eq!(config.format, "json");
    }

    #[test]
    fn absent_flags_keep_file_values() {
        let config = LoggingConfig::default().with_overrides(None, false);
        assert_eq!(config.level, "info");
        assert_eq!(config.format, "pretty");
    }
}
