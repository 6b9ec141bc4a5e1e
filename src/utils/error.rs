//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors raised while loading or validating graph configuration
///
/// All of these are reported at startup, before any line is ingested.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Start-of-trace line cannot be empty")]
    EmptyStartLine,

    #[error("At least one connector line must be configured")]
    NoConnectors,

    #[error("Connector line #{0} is empty")]
    EmptyConnector(usize),

    #[error("Invalid {name}: {value} (must be within 0.0..=1.0)")]
    InvalidThreshold { name: &'static str, value: f64 },

    #[error("Invalid line pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Line pattern must have at least 3 capture groups (thread, category, message), found {0}")]
    MissingCaptureGroups(usize),

    #[error("Failed to read config file: {0}")]
    ReadFailed(#[from] std::io::Error),

    #[error("Config TOML parse error: {0}")]
    TomlParseFailed(#[from] toml::de::Error),
}

/// Errors that can occur while reading a log file
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to read log: {0}")]
    ReadFailed(#[from] std::io::Error),

    #[error("Invalid log input: {0}")]
    InvalidInput(String),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Failed to write CSV: {0}")]
    CsvFailed(#[from] csv::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
