//! Extraction error types.

use thiserror::Error;

use crate::types::FieldKey;

/// Errors raised while building the extractor. All of them are fatal and
/// must stop the agent before the first line is read.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("gluster_log_level must contain at least one severity character")]
    EmptySeverityAlphabet,

    #[error("output field name for '{key}' must not be empty")]
    EmptyFieldName { key: FieldKey },

    #[error("output field name '{name}' is used by both '{first}' and '{second}'")]
    DuplicateFieldName {
        name: String,
        first: FieldKey,
        second: FieldKey,
    },

    #[error("invalid time format: {0}")]
    InvalidTimeFormat(String),

    #[error("invalid line pattern: {0}")]
    Pattern(String),

    #[error("cannot resolve hostname: {0}")]
    Hostname(String),
}

/// Errors raised while extracting a single line.
///
/// A line that simply does not match is never an error. The time format is
/// checked at build, so this only fires when a matched line carries a
/// calendar value the pattern admits but chrono rejects, such as second 65.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("cannot derive timestamp from '{input}' with format '{format}': {message}")]
    Timestamp {
        input: String,
        format: String,
        message: String,
    },
}

/// Convenience alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience alias for per-line extraction results.
pub type ExtractResult<T> = Result<T, ExtractError>;
