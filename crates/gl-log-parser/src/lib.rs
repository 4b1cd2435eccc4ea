//! GlusterFS log extraction core.
//!
//! Classifies raw GlusterFS server log lines and turns them into structured
//! records: a compiled line pattern built from a configurable severity
//! alphabet, a resolved field-name map, and a stateless `Extractor` that
//! yields a matched event, a fallback event for unparseable lines, or a skip.

pub mod config;
pub mod error;
pub mod extract;
pub mod fields;
pub mod pattern;
pub mod types;

// Re-export key types for convenience
pub use config::ExtractorConfig;
pub use error::{ConfigError, ConfigResult, ExtractError, ExtractResult};
pub use extract::Extractor;
pub use fields::{FieldMap, FieldNames};
pub use pattern::{LinePattern, SeverityAlphabet};
pub use types::{Event, Extracted, FieldKey, GlusterLevel, Record};
