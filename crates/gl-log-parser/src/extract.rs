//! Line classification and record extraction.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::{ExtractError, ExtractResult};
use crate::fields::FieldMap;
use crate::pattern::{LineCaptures, LinePattern, SeverityAlphabet};
use crate::types::{Event, Extracted, FieldKey, GlusterLevel, Record};

/// Component name stamped on records for lines that failed to parse.
pub const FALLBACK_COMPONENT: &str = "fluent-plugin-glusterfs";

/// Severity code stamped on records for lines that failed to parse.
pub const FALLBACK_LEVEL: &str = "I";

/// Immutable, ready-to-use GlusterFS line extractor.
///
/// Built once by [`ExtractorConfig::build`](crate::ExtractorConfig::build);
/// every `extract` call only reads it, so a single instance can be shared
/// across threads.
#[derive(Debug, Clone)]
pub struct Extractor {
    alphabet: SeverityAlphabet,
    pattern: LinePattern,
    fields: FieldMap,
    hostname: String,
    time_format: String,
    handle_parse_failure: bool,
}

impl Extractor {
    pub(crate) fn from_parts(
        alphabet: SeverityAlphabet,
        pattern: LinePattern,
        fields: FieldMap,
        hostname: String,
        time_format: String,
        handle_parse_failure: bool,
    ) -> Self {
        Self {
            alphabet,
            pattern,
            fields,
            hostname,
            time_format,
            handle_parse_failure,
        }
    }

    pub fn alphabet(&self) -> &SeverityAlphabet {
        &self.alphabet
    }

    pub fn pattern(&self) -> &LinePattern {
        &self.pattern
    }

    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn handles_parse_failure(&self) -> bool {
        self.handle_parse_failure
    }

    /// Classify one raw line against the wall clock.
    pub fn extract(&self, line: &str) -> ExtractResult<Extracted> {
        self.extract_at(line, Utc::now())
    }

    /// Classify one raw line. `now` is only used for fallback records.
    pub fn extract_at(&self, line: &str, now: DateTime<Utc>) -> ExtractResult<Extracted> {
        let line = trim_line_ending(line);

        if !line.starts_with('[') {
            return Ok(Extracted::Skip);
        }

        if let Some(caps) = self.pattern.captures(line) {
            return self.matched(&caps).map(Extracted::Matched);
        }

        if self.handle_parse_failure {
            Ok(Extracted::Fallback(self.fallback(line, now)))
        } else {
            Ok(Extracted::Skip)
        }
    }

    /// Known GlusterFS level of an extracted record, if any.
    pub fn level(&self, record: &Record) -> Option<GlusterLevel> {
        let name = self.fields.get(FieldKey::GlusterLogLevel)?;
        let mut chars = record.get(name)?.chars();
        match (chars.next(), chars.next()) {
            (Some(code), None) => GlusterLevel::from_code(code),
            _ => None,
        }
    }

    fn matched(&self, caps: &LineCaptures<'_>) -> ExtractResult<Event> {
        let mut record = Record::new();
        for (key, name) in self.fields.iter() {
            match caps.get(key) {
                Some(value) => record.insert(name, value),
                None if key == FieldKey::Hostname => record.insert(name, self.hostname.as_str()),
                None => {}
            }
        }

        let timestamp = self.timestamp(caps.date, caps.time)?;
        Ok(Event { timestamp, record })
    }

    fn timestamp(&self, date: &str, time: &str) -> ExtractResult<i64> {
        let input = format!("{date} {time}");
        NaiveDateTime::parse_from_str(&input, &self.time_format)
            .map(|ndt| ndt.and_utc().timestamp())
            .map_err(|e| ExtractError::Timestamp {
                input,
                format: self.time_format.clone(),
                message: e.to_string(),
            })
    }

    fn fallback(&self, line: &str, now: DateTime<Utc>) -> Event {
        let message = format!("Could not parse the line : {line}");
        let values = [
            (FieldKey::Date, now.format("%Y-%m-%d").to_string()),
            (FieldKey::Time, now.format("%H:%M:%S").to_string()),
            (FieldKey::GlusterLogLevel, FALLBACK_LEVEL.to_string()),
            (FieldKey::ComponentName, FALLBACK_COMPONENT.to_string()),
            (FieldKey::Message, message),
            (FieldKey::Hostname, self.hostname.clone()),
        ];

        let mut record = Record::new();
        for (key, value) in values {
            if let Some(name) = self.fields.get(key) {
                record.insert(name, value);
            }
        }

        Event {
            timestamp: now.timestamp(),
            record,
        }
    }
}

fn trim_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
