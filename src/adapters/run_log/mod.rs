//! Run Log - Buffered Per-Run Log Artifact
//!
//! Every run produces one durable log file: an ordered sequence of
//! timestamped leveled lines, buffered in memory while the run executes
//! and flushed to a `LogSink` exactly once at the very end — on the
//! success path and on every abort path alike. Each appended line is
//! also mirrored to `tracing` so the operator sees live output.

pub mod file_sink;

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{debug, error, info, warn};

use crate::ports::log_sink::LogSink;

/// In-memory buffer for one run's log lines.
///
/// Interior mutability so the client and the orchestrator can share one
/// handle; the run is single-threaded, the mutex is never contended.
pub struct RunLog {
    app_name: String,
    started_at: DateTime<Utc>,
    lines: Mutex<Vec<String>>,
    finalized: AtomicBool,
}

impl RunLog {
    pub fn new(app_name: &str) -> Self {
        Self {
            app_name: app_name.to_string(),
            started_at: Utc::now(),
            lines: Mutex::new(Vec::new()),
            finalized: AtomicBool::new(false),
        }
    }

    pub fn debug(&self, message: impl AsRef<str>) {
        debug!("{}", message.as_ref());
        self.append("DEBUG", message.as_ref());
    }

    pub fn info(&self, message: impl AsRef<str>) {
        info!("{}", message.as_ref());
        self.append("INFO", message.as_ref());
    }

    pub fn warn(&self, message: impl AsRef<str>) {
        warn!("{}", message.as_ref());
        self.append("WARN", message.as_ref());
    }

    pub fn error(&self, message: impl AsRef<str>) {
        error!("{}", message.as_ref());
        self.append("ERROR", message.as_ref());
    }

    fn append(&self, level: &str, message: &str) {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        self.lines
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(format!("{timestamp} [{level}] {message}"));
    }

    /// Name of the exported artifact: `{app}.{run start, ISO-8601}.log`.
    pub fn file_name(&self) -> String {
        format!(
            "{}.{}.log",
            self.app_name,
            self.started_at.to_rfc3339_opts(SecondsFormat::Millis, true)
        )
    }

    /// Hand the buffered lines to the sink.
    ///
    /// Idempotent: the first call exports, later calls are no-ops. The
    /// caller invokes this on every exit path, so idempotence is what
    /// turns "flush on every path" into "flush exactly once".
    pub async fn finalize(&self, sink: &dyn LogSink) -> Result<()> {
        if self.finalized.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        let lines = std::mem::take(
            &mut *self
                .lines
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner),
        );
        sink.export(&self.file_name(), &lines.join("\n")).await
    }
}
