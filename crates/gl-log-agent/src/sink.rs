//! Event sink abstraction: hand extracted events to the next stage.

use async_trait::async_trait;
use gl_log_parser::{Event, Record};
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;

use crate::error::{SinkError, SinkResult};

/// A tagged event as it leaves the agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmittedEvent {
    pub tag: String,
    /// Unix timestamp in seconds.
    pub time: i64,
    pub record: Record,
}

impl EmittedEvent {
    pub fn new(tag: &str, event: Event) -> Self {
        Self {
            tag: tag.to_string(),
            time: event.timestamp,
            record: event.record,
        }
    }
}

/// Destination for extracted events.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Emit one event. Order of calls is the order of the input lines.
    async fn emit(&self, event: EmittedEvent) -> SinkResult<()>;

    /// Flush anything buffered.
    async fn flush(&self) -> SinkResult<()>;
}

/// Writes one JSON object per line to any async writer (stdout in the binary).
pub struct JsonLinesSink<W> {
    writer: Mutex<W>,
}

impl<W> JsonLinesSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

#[async_trait]
impl<W> EventSink for JsonLinesSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn emit(&self, event: EmittedEvent) -> SinkResult<()> {
        let mut line =
            serde_json::to_vec(&event).map_err(|e| SinkError::Serialization(e.to_string()))?;
        line.push(b'\n');
        self.writer
            .lock()
            .await
            .write_all(&line)
            .await
            .map_err(|e| SinkError::Io(e.to_string()))
    }

    async fn flush(&self) -> SinkResult<()> {
        self.writer
            .lock()
            .await
            .flush()
            .await
            .map_err(|e| SinkError::Io(e.to_string()))
    }
}
