//! Skip-event sinks
//!
//! [`SkipLog`] appends one line per event to a file, [`TracingSkipSink`] only
//! logs, and [`SkipRecorder`] keeps events in memory.

use crate::output::traits::{OutputError, OutputResult, SkipSink};
use crate::state::SkipEvent;
use chrono::{SecondsFormat, Utc};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Append-only skip log file
///
/// Each line reads `[<timestamp>] Domain: <domain>, URL: <url>, Reason: <reason>`.
#[derive(Debug)]
pub struct SkipLog {
    path: PathBuf,
    // Serializes appends from concurrent callers
    lock: Mutex<()>,
}

impl SkipLog {
    /// Opens (creating parent directories) a skip log at `path`
    pub fn open(path: impl AsRef<Path>) -> OutputResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    /// Path of the log file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Formats one skip-log line, without the trailing newline
pub fn format_skip_line(event: &SkipEvent, timestamp: &str) -> String {
    format!("[{}] {}", timestamp, event)
}

impl SkipSink for SkipLog {
    fn record_skip(&self, event: &SkipEvent) -> OutputResult<()> {
        tracing::info!("Skipped {} ({})", event.url, event.reason);

        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let line = format_skip_line(event, &timestamp);

        let _guard = self
            .lock
            .lock()
            .map_err(|_| OutputError::Write("skip log lock poisoned".to_string()))?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)?;

        Ok(())
    }
}

/// Sink that only reports skips through tracing
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSkipSink;

impl SkipSink for TracingSkipSink {
    fn record_skip(&self, event: &SkipEvent) -> OutputResult<()> {
        tracing::info!("Skipped {} ({})", event.url, event.reason);
        Ok(())
    }
}

/// Sink that keeps every event in memory
#[derive(Debug, Default)]
pub struct SkipRecorder {
    events: Mutex<Vec<SkipEvent>>,
}

impl SkipRecorder {
    /// Creates an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the recorded events in arrival order
    pub fn events(&self) -> Vec<SkipEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl SkipSink for SkipRecorder {
    fn record_skip(&self, event: &SkipEvent) -> OutputResult<()> {
        self.events
            .lock()
            .map_err(|_| OutputError::Write("skip recorder lock poisoned".to_string()))?
            .push(event.clone());
        Ok(())
    }
}
