//! Log Sink Port - Durable Run Log Storage
//!
//! The run log is buffered in memory during the run and handed over
//! exactly once at the end. The sink's only job is to store that one
//! artifact durably.

use anyhow::Result;
use async_trait::async_trait;

/// Destination for a finalized run log.
#[async_trait]
pub trait LogSink: Send + Sync {
  /// Persist `contents` under `file_name`. Called at most once per run.
  async fn export(&self, file_name: &str, contents: &str) -> Result<()>;
}
