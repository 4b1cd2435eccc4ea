//! Line pattern construction for GlusterFS log entries.
//!
//! A GlusterFS entry looks like:
//!
//! ```text
//! [2015-03-02 10:22:33.123456] E [posix.c:1234:posix_removexattr] 0-test-posix: lstat on path failed
//! ```
//!
//! The pattern is assembled once from fragments and the configured severity
//! alphabet, then reused for every line.

use regex::Regex;

use crate::error::{ConfigError, ConfigResult};
use crate::types::FieldKey;

/// Default GlusterFS severity letters.
pub const DEFAULT_SEVERITY_ALPHABET: &str = "TDINWECA";

// Digits are spelled `[0-9]` because `\d` is Unicode-aware in `regex`.
const RE_DATE: &str = "[0-9]{4}-[01][0-9]-[0-3][0-9]";
const RE_TIME: &str = "[0-2][0-9]:[0-5][0-9]:[0-6][0-9]";
const RE_TIME_USEC: &str = "[0-9]{6}";
const RE_SOURCE_LINE: &str = "[0-9]*";
const RE_COMPONENT: &str = "[^:]*";
const RE_MESSAGE: &str = ".*";
// Anything but the entry delimiters `[`, `]`, `:` and space.
const RE_UNDELIMITED: &str = r"[^\[\]: ]*";

// ── Severity Alphabet ─────────────────────────────────────────

/// The set of single-character severity codes a line may carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeverityAlphabet {
    codes: Vec<char>,
}

impl SeverityAlphabet {
    /// Build from the characters of `codes`, dropping repeats.
    pub fn new(codes: &str) -> ConfigResult<Self> {
        let mut unique = Vec::new();
        for c in codes.chars() {
            if !unique.contains(&c) {
                unique.push(c);
            }
        }
        if unique.is_empty() {
            return Err(ConfigError::EmptySeverityAlphabet);
        }
        Ok(Self { codes: unique })
    }

    pub fn contains(&self, code: char) -> bool {
        self.codes.contains(&code)
    }

    pub fn codes(&self) -> &[char] {
        &self.codes
    }

    /// Regex character class matching exactly one code, e.g. `[TDINWECA]`.
    /// Metacharacters are escaped so they match literally.
    pub fn to_class(&self) -> String {
        let mut class = String::from("[");
        let mut buf = [0u8; 4];
        for c in &self.codes {
            class.push_str(&regex::escape(c.encode_utf8(&mut buf)));
        }
        class.push(']');
        class
    }
}

impl Default for SeverityAlphabet {
    fn default() -> Self {
        Self {
            codes: DEFAULT_SEVERITY_ALPHABET.chars().collect(),
        }
    }
}

impl std::fmt::Display for SeverityAlphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for c in &self.codes {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

// ── Line Pattern ──────────────────────────────────────────────

/// Compiled GlusterFS line pattern.
#[derive(Debug, Clone)]
pub struct LinePattern {
    regex: Regex,
}

impl LinePattern {
    pub fn build(alphabet: &SeverityAlphabet) -> ConfigResult<Self> {
        let source = format!(
            r"^\[({RE_DATE}) ({RE_TIME})\.({RE_TIME_USEC})\] ({level}) \[({RE_UNDELIMITED}):({RE_SOURCE_LINE}):({RE_UNDELIMITED})\] ({RE_COMPONENT}): ({RE_MESSAGE})",
            level = alphabet.to_class(),
        );
        let regex = Regex::new(&source).map_err(|e| ConfigError::Pattern(e.to_string()))?;
        tracing::debug!(pattern = %regex.as_str(), "glusterfs line pattern built");
        Ok(Self { regex })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn is_match(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }

    /// Match `line` and borrow the nine captured fields from it.
    pub fn captures<'a>(&self, line: &'a str) -> Option<LineCaptures<'a>> {
        let caps = self.regex.captures(line)?;
        let group = |i: usize| caps.get(i).map_or("", |m| m.as_str());
        Some(LineCaptures {
            date: group(1),
            time: group(2),
            time_usec: group(3),
            level: group(4),
            source_file_name: group(5),
            source_line: group(6),
            function_name: group(7),
            component_name: group(8),
            message: group(9),
        })
    }
}

/// Fields captured from one matching line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCaptures<'a> {
    pub date: &'a str,
    pub time: &'a str,
    pub time_usec: &'a str,
    pub level: &'a str,
    pub source_file_name: &'a str,
    pub source_line: &'a str,
    pub function_name: &'a str,
    pub component_name: &'a str,
    pub message: &'a str,
}

impl<'a> LineCaptures<'a> {
    /// Captured value for `key`. The hostname is never part of the line.
    pub fn get(&self, key: FieldKey) -> Option<&'a str> {
        match key {
            FieldKey::Date => Some(self.date),
            FieldKey::Time => Some(self.time),
            FieldKey::TimeUsec => Some(self.time_usec),
            FieldKey::GlusterLogLevel => Some(self.level),
            FieldKey::SourceFileName => Some(self.source_file_name),
            FieldKey::SourceLine => Some(self.source_line),
            FieldKey::FunctionName => Some(self.function_name),
            FieldKey::ComponentName => Some(self.component_name),
            FieldKey::Message => Some(self.message),
            FieldKey::Hostname => None,
        }
    }
}
