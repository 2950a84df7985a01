use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(
        code(propmatch::config),
        help("check the configuration file against the documented sections")
    )]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(code(propmatch::domain))]
    Domain(#[from] DomainError),

    /// A required input could not be read; the run aborts before writing anything.
    #[error("required {resource} unavailable at {}: {source}", path.display())]
    #[diagnostic(
        code(propmatch::input),
        help("pass the file explicitly with --catalog or set [inputs] catalog in the config")
    )]
    RequiredInput {
        resource: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    #[diagnostic(code(propmatch::io))]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    #[diagnostic(code(propmatch::json))]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    #[diagnostic(code(propmatch::csv))]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
