//! File Log Sink - Run Log Export to Local Disk
//!
//! Writes the finalized run log under the configured export directory.
//! The directory is created on first export so a fresh deployment works
//! without manual setup.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::info;

use crate::ports::log_sink::LogSink;

/// Stores run logs as plain files in one directory.
pub struct FileLogSink {
    export_dir: PathBuf,
}

impl FileLogSink {
    pub fn new(export_dir: impl Into<PathBuf>) -> Self {
        Self {
            export_dir: export_dir.into(),
        }
    }
}

#[async_trait]
impl LogSink for FileLogSink {
    async fn export(&self, file_name: &str, contents: &str) -> Result<()> {
        tokio::fs::create_dir_all(&self.export_dir)
            .await
            .with_context(|| {
                format!("Failed to create log directory {}", self.export_dir.display())
            })?;

        let path = self.export_dir.join(file_name);
        tokio::fs::write(&path, contents)
            .await
            .with_context(|| format!("Failed to write run log {}", path.display()))?;

        info!(path = %path.display(), "Run log exported");
        Ok(())
    }
}
