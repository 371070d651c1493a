//! Output handler traits and types
//!
//! This module defines the trait interface for skip-event sinks and the
//! errors output operations can raise.

use crate::state::SkipEvent;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("Failed to serialize results: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Receiver of skip events emitted while walking a site
///
/// Sinks are shared by reference with the traverser; a failing sink is
/// reported through tracing and never interrupts a crawl.
pub trait SkipSink: Send + Sync {
    /// Records one skip event
    ///
    /// # Arguments
    ///
    /// * `event` - The domain, URL and reason of the skip
    fn record_skip(&self, event: &SkipEvent) -> OutputResult<()>;
}
