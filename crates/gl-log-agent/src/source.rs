//! Line source abstraction: read raw log lines from files or mocks.

use async_trait::async_trait;

use crate::error::{SourceError, SourceResult};

/// Abstraction over where raw GlusterFS log lines come from.
///
/// The agent only reads; following a growing file and rotation belong to
/// whatever feeds it.
#[async_trait]
pub trait LineSource: Send + Sync {
    /// Read all lines from the given path.
    async fn read_lines(&self, path: &str) -> SourceResult<Vec<String>>;

    /// Read the last `count` lines from the given path.
    async fn tail_lines(&self, path: &str, count: usize) -> SourceResult<Vec<String>> {
        let all = self.read_lines(path).await?;
        let start = all.len().saturating_sub(count);
        Ok(all[start..].to_vec())
    }
}

/// Reads log lines from the local filesystem.
pub struct FileLineSource;

#[async_trait]
impl LineSource for FileLineSource {
    async fn read_lines(&self, path: &str) -> SourceResult<Vec<String>> {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SourceError::NotFound(path.to_string())
            } else {
                SourceError::Io(format!("{path}: {e}"))
            }
        })?;
        // GlusterFS messages may embed arbitrary path bytes; keep the line
        // rather than failing the whole file.
        let content = String::from_utf8_lossy(&bytes);
        Ok(content.lines().map(String::from).collect())
    }
}
