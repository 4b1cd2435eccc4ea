//! Single pass over a GlusterFS log: source → extractor → sink.

use std::collections::BTreeMap;

use anyhow::Context;
use gl_log_parser::{Extracted, Extractor, GlusterLevel};
use serde::Serialize;

use crate::config::AgentConfig;
use crate::sink::{EmittedEvent, EventSink};
use crate::source::LineSource;

/// Counters for one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Lines read from the source.
    pub lines: usize,
    /// Lines that matched the GlusterFS pattern.
    pub matched: usize,
    /// `[`-prefixed lines emitted as parse-failure records.
    pub fallback: usize,
    /// Lines dropped as not being log entries.
    pub skipped: usize,
    /// Matched entries per known level.
    pub by_level: BTreeMap<GlusterLevel, usize>,
}

impl RunStats {
    /// Events handed to the sink.
    pub fn emitted(&self) -> usize {
        self.matched + self.fallback
    }
}

/// Read the configured file and push every extracted event to `sink`.
pub async fn run(
    config: &AgentConfig,
    extractor: &Extractor,
    source: &dyn LineSource,
    sink: &dyn EventSink,
) -> anyhow::Result<RunStats> {
    let lines = match config.tail_lines {
        Some(count) => source.tail_lines(&config.path, count).await,
        None => source.read_lines(&config.path).await,
    }
    .with_context(|| format!("reading {}", config.path))?;

    tracing::info!(path = %config.path, lines = lines.len(), "log file loaded");

    let stats = process_lines(&lines, &config.tag, extractor, sink).await?;

    tracing::info!(
        path = %config.path,
        matched = stats.matched,
        fallback = stats.fallback,
        skipped = stats.skipped,
        "log file processed"
    );
    Ok(stats)
}

/// Extract and emit `lines` in order.
///
/// Stops at the first timestamp error: a matched line whose date the time
/// format rejects means the extractor is misconfigured.
pub async fn process_lines(
    lines: &[String],
    tag: &str,
    extractor: &Extractor,
    sink: &dyn EventSink,
) -> anyhow::Result<RunStats> {
    let mut stats = RunStats::default();

    for (i, line) in lines.iter().enumerate() {
        stats.lines += 1;
        let line_number = i + 1;

        let extracted = match extractor.extract(line) {
            Ok(extracted) => extracted,
            Err(e) => {
                tracing::error!(line_number, error = %e, "matched line has an unusable timestamp");
                return Err(e).with_context(|| format!("extracting line {line_number}"));
            }
        };

        let event = match extracted {
            Extracted::Matched(event) => {
                stats.matched += 1;
                if let Some(level) = extractor.level(&event.record) {
                    *stats.by_level.entry(level).or_default() += 1;
                }
                event
            }
            Extracted::Fallback(event) => {
                stats.fallback += 1;
                tracing::debug!(line_number, "line did not match the glusterfs pattern");
                event
            }
            Extracted::Skip => {
                stats.skipped += 1;
                continue;
            }
        };

        sink.emit(EmittedEvent::new(tag, event))
            .await
            .with_context(|| format!("emitting line {line_number}"))?;
    }

    sink.flush().await.context("flushing events")?;
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{BRICK_LOG_PATH, GLUSTERD_LOG_PATH, MockLineSource, MockSink};
    use gl_log_parser::ExtractorConfig;

    fn config(path: &str) -> AgentConfig {
        AgentConfig {
            tag: "glusterfs.test".into(),
            path: path.into(),
            tail_lines: None,
            parser: ExtractorConfig {
                hostname: Some("gluster-node-1".into()),
                ..Default::default()
            },
        }
    }

    #[tokio::test]
    async fn run_brick_sample() {
        let config = config(BRICK_LOG_PATH);
        let extractor = config.parser.build().unwrap();
        let source = MockLineSource::with_brick_sample();
        let sink = MockSink::new();

        let stats = run(&config, &extractor, &source, &sink).await.unwrap();
        assert_eq!(stats.lines, 8);
        assert_eq!(stats.matched, 5);
        assert_eq!(stats.fallback, 1);
        assert_eq!(stats.skipped, 2);
        assert_eq!(stats.emitted(), 6);
        assert_eq!(stats.by_level.get(&GlusterLevel::Info), Some(&2));
        assert_eq!(stats.by_level.get(&GlusterLevel::Critical), Some(&1));

        let events = sink.events();
        assert_eq!(events.len(), 6);
        assert!(events.iter().all(|e| e.tag == "glusterfs.test"));
        assert_eq!(events[2].record.get("function_name"), Some("posix_removexattr"));
        assert_eq!(events[2].time, 1_425_291_753);
        assert!(events[4]
            .record
            .get("message")
            .unwrap()
            .starts_with("Could not parse the line : [2015-03-02 10:22:41]"));
        assert_eq!(sink.flush_count(), 1);
    }

    #[tokio::test]
    async fn run_tail_lines() {
        let mut config = config(GLUSTERD_LOG_PATH);
        config.tail_lines = Some(2);
        let extractor = config.parser.build().unwrap();
        let sink = MockSink::new();

        let stats = run(&config, &extractor, &MockLineSource::with_glusterd_sample(), &sink)
            .await
            .unwrap();
        assert_eq!(stats.lines, 2);
        assert_eq!(stats.by_level.get(&GlusterLevel::Warning), Some(&1));
        assert_eq!(stats.by_level.get(&GlusterLevel::Alert), Some(&1));
    }

    #[tokio::test]
    async fn run_without_fallback_drops_unparsed_lines() {
        let mut config = config(BRICK_LOG_PATH);
        config.parser.handle_parse_failure = false;
        let extractor = config.parser.build().unwrap();
        let sink = MockSink::new();

        let stats = run(&config, &extractor, &MockLineSource::with_brick_sample(), &sink)
            .await
            .unwrap();
        assert_eq!(stats.fallback, 0);
        assert_eq!(stats.skipped, 3);
        assert_eq!(sink.events().len(), 5);
    }

    #[tokio::test]
    async fn run_missing_file_is_error() {
        let config = config("/nonexistent.log");
        let extractor = config.parser.build().unwrap();
        let result = run(&config, &extractor, &MockLineSource::new(), &MockSink::new()).await;
        let err = result.unwrap_err();
        assert!(err.to_string().contains("/nonexistent.log"));
    }

    #[tokio::test]
    async fn timestamp_error_stops_processing() {
        let config = config(BRICK_LOG_PATH);
        let extractor = config.parser.build().unwrap();
        let sink = MockSink::new();
        let lines = vec![
            "[2015-03-02 10:22:33.123456] E [posix.c:1234:posix_removexattr] 0-test-posix: ok".to_string(),
            "[2015-03-02 10:22:69.123456] E [posix.c:1234:posix_removexattr] 0-test-posix: bad".to_string(),
            "[2015-03-02 10:22:34.123456] E [posix.c:1234:posix_removexattr] 0-test-posix: never".to_string(),
        ];

        let err = process_lines(&lines, "t", &extractor, &sink)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("line 2"));
        assert_eq!(sink.events().len(), 1);
        assert_eq!(sink.flush_count(), 0);
    }
}
