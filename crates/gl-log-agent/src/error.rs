//! Agent config and I/O error types.

use thiserror::Error;

/// Agent settings rejected at startup.
#[derive(Debug, Error)]
pub enum AgentConfigError {
    #[error("'tag' option is required on glusterfs_log input")]
    MissingTag,
}

/// Errors that can occur while reading log lines.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("source not found: {0}")]
    NotFound(String),
}

/// Errors that can occur while emitting events.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for agent config results.
pub type AgentConfigResult<T> = Result<T, AgentConfigError>;

/// Convenience alias for line source results.
pub type SourceResult<T> = Result<T, SourceError>;

/// Convenience alias for event sink results.
pub type SinkResult<T> = Result<T, SinkError>;
