//! Core extraction types: semantic field keys, GlusterFS levels, records
//! and the per-line extraction outcome.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ── Field Key ─────────────────────────────────────────────────

/// Semantic identity of a record field, independent of its output name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    Date,
    Time,
    TimeUsec,
    GlusterLogLevel,
    SourceFileName,
    SourceLine,
    FunctionName,
    ComponentName,
    Message,
    Hostname,
}

impl FieldKey {
    /// Every key, in record order.
    pub const ALL: [FieldKey; 10] = [
        Self::Date,
        Self::Time,
        Self::TimeUsec,
        Self::GlusterLogLevel,
        Self::SourceFileName,
        Self::SourceLine,
        Self::FunctionName,
        Self::ComponentName,
        Self::Message,
        Self::Hostname,
    ];

    /// The default output name, which is also the configuration key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Time => "time",
            Self::TimeUsec => "time_usec",
            Self::GlusterLogLevel => "gluster_log_level",
            Self::SourceFileName => "source_file_name",
            Self::SourceLine => "source_line",
            Self::FunctionName => "function_name",
            Self::ComponentName => "component_name",
            Self::Message => "message",
            Self::Hostname => "hostname",
        }
    }
}

impl std::fmt::Display for FieldKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Gluster Level ─────────────────────────────────────────────

/// GlusterFS single-letter log level, ordered from least to most severe.
///
/// Variant declaration order matters because `#[derive(Ord)]` uses it,
/// so Trace < Debug < Info < Notice < Warning < Error < Critical < Alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlusterLevel {
    Trace,
    Debug,
    Info,
    Notice,
    Warning,
    Error,
    Critical,
    Alert,
}

impl GlusterLevel {
    /// All known levels, least severe first.
    pub const ALL: [GlusterLevel; 8] = [
        Self::Trace,
        Self::Debug,
        Self::Info,
        Self::Notice,
        Self::Warning,
        Self::Error,
        Self::Critical,
        Self::Alert,
    ];

    /// Map a GlusterFS level letter to a known level.
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'T' => Some(Self::Trace),
            'D' => Some(Self::Debug),
            'I' => Some(Self::Info),
            'N' => Some(Self::Notice),
            'W' => Some(Self::Warning),
            'E' => Some(Self::Error),
            'C' => Some(Self::Critical),
            'A' => Some(Self::Alert),
            _ => None,
        }
    }

    pub fn code(&self) -> char {
        match self {
            Self::Trace => 'T',
            Self::Debug => 'D',
            Self::Info => 'I',
            Self::Notice => 'N',
            Self::Warning => 'W',
            Self::Error => 'E',
            Self::Critical => 'C',
            Self::Alert => 'A',
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Notice => "notice",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
            Self::Alert => "alert",
        }
    }
}

impl std::fmt::Display for GlusterLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Record ────────────────────────────────────────────────────

/// A structured record keyed by output field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(BTreeMap<String, String>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub(crate) fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.0.insert(name.to_string(), value.into());
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }
}

// ── Event ─────────────────────────────────────────────────────

/// One extracted log event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Unix timestamp in whole seconds.
    pub timestamp: i64,
    pub record: Record,
}

// ── Extraction Outcome ────────────────────────────────────────

/// Outcome of classifying a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extracted {
    /// The line is a well-formed GlusterFS entry.
    Matched(Event),
    /// The line looked like an entry but did not match; the event carries
    /// a diagnostic message embedding the raw line.
    Fallback(Event),
    /// Not a log line in this format.
    Skip,
}

impl Extracted {
    pub fn event(&self) -> Option<&Event> {
        match self {
            Self::Matched(event) | Self::Fallback(event) => Some(event),
            Self::Skip => None,
        }
    }

    pub fn into_event(self) -> Option<Event> {
        match self {
            Self::Matched(event) | Self::Fallback(event) => Some(event),
            Self::Skip => None,
        }
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, Self::Skip)
    }
}
