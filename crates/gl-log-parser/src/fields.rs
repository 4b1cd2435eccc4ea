//! Output field naming.

use serde::Deserialize;

use crate::error::{ConfigError, ConfigResult};
use crate::types::FieldKey;

/// Per-key output name overrides, as read from configuration.
/// Keys left unset keep their default name.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldNames {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub time_usec: Option<String>,
    #[serde(default)]
    pub gluster_log_level: Option<String>,
    #[serde(default)]
    pub source_file_name: Option<String>,
    #[serde(default)]
    pub source_line: Option<String>,
    #[serde(default)]
    pub function_name: Option<String>,
    #[serde(default)]
    pub component_name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub hostname: Option<String>,
}

impl FieldNames {
    pub fn get(&self, key: FieldKey) -> Option<&str> {
        let name = match key {
            FieldKey::Date => &self.date,
            FieldKey::Time => &self.time,
            FieldKey::TimeUsec => &self.time_usec,
            FieldKey::GlusterLogLevel => &self.gluster_log_level,
            FieldKey::SourceFileName => &self.source_file_name,
            FieldKey::SourceLine => &self.source_line,
            FieldKey::FunctionName => &self.function_name,
            FieldKey::ComponentName => &self.component_name,
            FieldKey::Message => &self.message,
            FieldKey::Hostname => &self.hostname,
        };
        name.as_deref()
    }
}

/// Resolved mapping from semantic key to output field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMap {
    entries: Vec<(FieldKey, String)>,
}

impl FieldMap {
    /// Resolve every key against `names`.
    ///
    /// Empty names and names shared by two keys are rejected: either would
    /// make a field silently vanish from every record.
    pub fn build(names: &FieldNames) -> ConfigResult<Self> {
        let mut entries: Vec<(FieldKey, String)> = Vec::with_capacity(FieldKey::ALL.len());
        for key in FieldKey::ALL {
            let name = names.get(key).unwrap_or(key.as_str());
            if name.trim().is_empty() {
                return Err(ConfigError::EmptyFieldName { key });
            }
            if let Some((first, _)) = entries.iter().find(|(_, n)| n == name) {
                return Err(ConfigError::DuplicateFieldName {
                    name: name.to_string(),
                    first: *first,
                    second: key,
                });
            }
            entries.push((key, name.to_string()));
        }
        Ok(Self { entries })
    }

    /// Output name for `key`, if the map carries it.
    pub fn get(&self, key: FieldKey) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, name)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &str)> {
        self.entries.iter().map(|(k, name)| (*k, name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for FieldMap {
    fn default() -> Self {
        Self {
            entries: FieldKey::ALL
                .iter()
                .map(|k| (*k, k.as_str().to_string()))
                .collect(),
        }
    }
}
