//! Extractor configuration, loadable from TOML and validated on build.

use chrono::NaiveDateTime;
use chrono::format::{Item, StrftimeItems};
use serde::Deserialize;

use crate::error::{ConfigError, ConfigResult};
use crate::extract::Extractor;
use crate::fields::{FieldMap, FieldNames};
use crate::pattern::{DEFAULT_SEVERITY_ALPHABET, LinePattern, SeverityAlphabet};

/// Format used to turn the captured date and time into a timestamp.
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// A date and time shaped exactly like the pattern's captures, with every
// component distinct so swapped fields are caught.
const REFERENCE_DATETIME: &str = "2015-03-02 10:22:33";
const REFERENCE_EPOCH: i64 = 1_425_291_753;

/// User-facing extractor settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtractorConfig {
    /// Characters accepted as the single-letter severity code.
    #[serde(default = "default_gluster_log_level")]
    pub gluster_log_level: String,
    /// Emit a diagnostic record for `[`-prefixed lines that fail to match.
    #[serde(default = "default_handle_parse_failure")]
    pub handle_parse_failure: bool,
    /// Hostname attached to every record. Defaults to the local host name.
    #[serde(default)]
    pub hostname: Option<String>,
    /// strftime format applied to `"<date> <time>"`.
    #[serde(default = "default_time_format")]
    pub time_format: String,
    /// Output field name overrides.
    #[serde(default)]
    pub fields: FieldNames,
}

fn default_gluster_log_level() -> String {
    DEFAULT_SEVERITY_ALPHABET.to_string()
}

fn default_handle_parse_failure() -> bool {
    true
}

fn default_time_format() -> String {
    DEFAULT_TIME_FORMAT.to_string()
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            gluster_log_level: default_gluster_log_level(),
            handle_parse_failure: default_handle_parse_failure(),
            hostname: None,
            time_format: default_time_format(),
            fields: FieldNames::default(),
        }
    }
}

impl ExtractorConfig {
    /// Validate the settings and freeze them into an `Extractor`.
    pub fn build(&self) -> ConfigResult<Extractor> {
        let alphabet = SeverityAlphabet::new(&self.gluster_log_level)?;
        let pattern = LinePattern::build(&alphabet)?;
        let fields = FieldMap::build(&self.fields)?;
        validate_time_format(&self.time_format)?;
        let hostname = match &self.hostname {
            Some(name) if name.trim().is_empty() => {
                return Err(ConfigError::Hostname("hostname override is empty".into()));
            }
            Some(name) => name.clone(),
            None => local_hostname()?,
        };

        tracing::debug!(
            gluster_log_level = %alphabet,
            handle_parse_failure = self.handle_parse_failure,
            hostname = %hostname,
            time_format = %self.time_format,
            "glusterfs extractor configured"
        );

        Ok(Extractor::from_parts(
            alphabet,
            pattern,
            fields,
            hostname,
            self.time_format.clone(),
            self.handle_parse_failure,
        ))
    }
}

fn validate_time_format(format: &str) -> ConfigResult<()> {
    if format.trim().is_empty() {
        return Err(ConfigError::InvalidTimeFormat("format is empty".into()));
    }
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(ConfigError::InvalidTimeFormat(format!(
            "'{format}' contains an unknown specifier"
        )));
    }
    // The format must read the pattern's own "<date> <time>" captures back
    // to the same instant, or every matched line would fail later.
    match NaiveDateTime::parse_from_str(REFERENCE_DATETIME, format) {
        Ok(ndt) if ndt.and_utc().timestamp() == REFERENCE_EPOCH => Ok(()),
        Ok(ndt) => Err(ConfigError::InvalidTimeFormat(format!(
            "'{format}' reads '{REFERENCE_DATETIME}' as {ndt}"
        ))),
        Err(e) => Err(ConfigError::InvalidTimeFormat(format!(
            "'{format}' cannot parse '{REFERENCE_DATETIME}': {e}"
        ))),
    }
}

/// Resolve this machine's host name.
pub fn local_hostname() -> ConfigResult<String> {
    hostname::get()
        .map_err(|e| ConfigError::Hostname(e.to_string()))?
        .into_string()
        .map_err(|raw| ConfigError::Hostname(format!("{raw:?} is not valid UTF-8")))
}
