//! Shared test harness for E2E integration tests.
//!
//! Builds an agent config + extractor and drives the real pipeline against
//! either the mock source or a temporary log file on disk.

#![allow(dead_code)]

use std::io::Write;

use gl_log_agent::config::AgentConfig;
use gl_log_agent::pipeline::{self, RunStats};
use gl_log_agent::sink::{EmittedEvent, JsonLinesSink};
use gl_log_agent::source::{FileLineSource, LineSource};
use gl_log_agent::MockSink;
use gl_log_parser::Extractor;

/// Hostname pinned in every harness config so records are deterministic.
pub const HOSTNAME: &str = "gluster-node-1";

/// End-to-end harness: one validated config and the extractor built from it.
pub struct TestHarness {
    pub config: AgentConfig,
    pub extractor: Extractor,
}

impl TestHarness {
    /// Build from agent TOML, pinning the parser hostname to [`HOSTNAME`]
    /// unless the TOML overrides it.
    pub fn from_toml(toml: &str) -> Self {
        let mut config = AgentConfig::from_toml_str(toml).expect("valid agent config");
        if config.parser.hostname.is_none() {
            config.parser.hostname = Some(HOSTNAME.to_string());
        }
        let extractor = config.parser.build().expect("extractor builds");
        Self { config, extractor }
    }

    /// Harness reading `path` with default parser settings.
    pub fn for_path(path: &str) -> Self {
        Self::from_toml(&format!("tag = \"glusterfs.e2e\"\npath = \"{path}\"\n"))
    }

    /// Run the pipeline against `source`, collecting events in a mock sink.
    pub async fn run_with(&self, source: &dyn LineSource) -> (RunStats, Vec<EmittedEvent>) {
        let sink = MockSink::new();
        let stats = pipeline::run(&self.config, &self.extractor, source, &sink)
            .await
            .expect("pipeline run");
        (stats, sink.events())
    }

    /// Run the pipeline against the file source and return the JSON lines
    /// the binary would print.
    pub async fn run_to_json_lines(&self) -> (RunStats, Vec<serde_json::Value>) {
        let sink = JsonLinesSink::new(Vec::new());
        let stats = pipeline::run(&self.config, &self.extractor, &FileLineSource, &sink)
            .await
            .expect("pipeline run");
        let output = String::from_utf8(sink.into_inner()).expect("utf-8 output");
        let lines = output
            .lines()
            .map(|l| serde_json::from_str(l).expect("json line"))
            .collect();
        (stats, lines)
    }
}

/// Write `lines` to a temporary log file.
pub fn temp_log(lines: &[&str]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    for line in lines {
        writeln!(file, "{line}").expect("write line");
    }
    file.flush().expect("flush");
    file
}
