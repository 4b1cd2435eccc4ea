//! GlusterFS log agent, library crate.
//!
//! Wires a line source, the `gl-log-parser` extractor and an event sink into
//! a single pass over a GlusterFS log file. Modules are public so the
//! end-to-end test crate can drive the pipeline with mocks.

pub mod config;
pub mod error;
pub mod mock;
pub mod pipeline;
pub mod sink;
pub mod source;

// Re-export key types for convenience
pub use config::AgentConfig;
pub use error::{
    AgentConfigError, AgentConfigResult, SinkError, SinkResult, SourceError, SourceResult,
};
pub use mock::{MockLineSource, MockSink};
pub use pipeline::RunStats;
pub use sink::{EmittedEvent, EventSink, JsonLinesSink};
pub use source::{FileLineSource, LineSource};
