//! Agent configuration, loadable from TOML.

use gl_log_parser::ExtractorConfig;
use serde::Deserialize;

use crate::error::{AgentConfigError, AgentConfigResult};

/// Top-level configuration for the GlusterFS log agent.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Routing tag stamped on every emitted event. Required.
    #[serde(default)]
    pub tag: String,
    /// GlusterFS log file to read.
    pub path: String,
    /// Only process the last N lines of the file.
    #[serde(default)]
    pub tail_lines: Option<usize>,
    /// Line extraction settings.
    #[serde(default)]
    pub parser: ExtractorConfig,
}

impl AgentConfig {
    /// Load and validate config from a TOML file path.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate config from TOML text.
    pub fn from_toml_str(contents: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the settings the extractor itself does not own.
    pub fn validate(&self) -> AgentConfigResult<()> {
        if self.tag.trim().is_empty() {
            return Err(AgentConfigError::MissingTag);
        }
        Ok(())
    }
}
