//! Mock line source and event sink for testing: serve pre-loaded GlusterFS
//! logs and record every emitted event.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{SinkResult, SourceError, SourceResult};
use crate::sink::{EmittedEvent, EventSink};
use crate::source::LineSource;

/// Path of the brick log served by [`MockLineSource::with_brick_sample`].
pub const BRICK_LOG_PATH: &str = "/var/log/glusterfs/bricks/data-brick1.log";

/// Path of the management daemon log served by
/// [`MockLineSource::with_glusterd_sample`].
pub const GLUSTERD_LOG_PATH: &str = "/var/log/glusterfs/glusterd.log";

/// A mock line source that serves pre-loaded content by path.
pub struct MockLineSource {
    files: HashMap<String, Vec<String>>,
}

impl MockLineSource {
    pub fn new() -> Self {
        Self {
            files: HashMap::new(),
        }
    }

    /// Add a file with the given lines.
    pub fn add_file(&mut self, path: impl Into<String>, lines: Vec<String>) {
        self.files.insert(path.into(), lines);
    }

    /// Create a mock with a brick log: 5 well-formed entries, one
    /// `[`-prefixed line that does not parse, and two continuation lines.
    pub fn with_brick_sample() -> Self {
        let mut m = Self::new();
        m.add_file(
            BRICK_LOG_PATH,
            vec![
                "[2015-03-02 10:22:30.000123] I [glusterfsd.c:1959:main] 0-/usr/sbin/glusterfsd: Started running /usr/sbin/glusterfsd version 3.6.2".into(),
                "[2015-03-02 10:22:31.104512] I [graph.c:269:gf_add_cmdline_options] 0-test-server: adding option 'listen-port' for volume 'test-server' with value '49152'".into(),
                "[2015-03-02 10:22:33.123456] E [posix.c:1234:posix_removexattr] 0-test-posix: lstat on path failed".into(),
                "Final graph:".into(),
                "+------------------------------------------------------------------------------+".into(),
                "[2015-03-02 10:22:40.551203] W [socket.c:590:__socket_rwv] 0-test-client: readv on 192.168.1.10:24007 failed (No data available)".into(),
                "[2015-03-02 10:22:41] truncated entry without microseconds".into(),
                "[2015-03-02 10:23:01.999999] C [rpc-clnt.c:362:saved_frames_unwind] 0-test-client: forced unwinding frame type(GlusterFS 3.3) op(LOOKUP(27))".into(),
            ],
        );
        m
    }

    /// Create a mock with a short glusterd log at mixed levels.
    pub fn with_glusterd_sample() -> Self {
        let mut m = Self::new();
        m.add_file(
            GLUSTERD_LOG_PATH,
            vec![
                "[2015-03-02 09:00:00.000001] D [glusterd-utils.c:8123:glusterd_friend_find] 0-management: Friend not found".into(),
                "[2015-03-02 09:00:01.000002] N [glusterd-handshake.c:1020:__glusterd_mgmt_hndsk_versions_ack] 0-management: Handshake done".into(),
                "[2015-03-02 09:00:02.000003] W [glusterd-op-sm.c:4021:glusterd_op_modify_op_ctx] 0-management: op_ctx modification failed".into(),
                "[2015-03-02 09:00:03.000004] A [glusterd-quorum.c:88:glusterd_quorum_check] 0-management: Server quorum lost".into(),
            ],
        );
        m
    }
}

impl Default for MockLineSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LineSource for MockLineSource {
    async fn read_lines(&self, path: &str) -> SourceResult<Vec<String>> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(path.to_string()))
    }
}

/// Mock implementation of the `EventSink` trait.
///
/// Stores every emitted event in memory for test verification.
/// Thread-safe via `Mutex` (fine for test contexts).
pub struct MockSink {
    events: Mutex<Vec<EmittedEvent>>,
    flushes: Mutex<usize>,
}

impl MockSink {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            flushes: Mutex::new(0),
        }
    }

    /// Get all emitted events, in emission order.
    pub fn events(&self) -> Vec<EmittedEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Number of times `flush` was called.
    pub fn flush_count(&self) -> usize {
        *self.flushes.lock().unwrap()
    }
}

impl Default for MockSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventSink for MockSink {
    async fn emit(&self, event: EmittedEvent) -> SinkResult<()> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }

    async fn flush(&self) -> SinkResult<()> {
        *self.flushes.lock().unwrap() += 1;
        Ok(())
    }
}
