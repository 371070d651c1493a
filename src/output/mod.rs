//! Output module for crawl results and skip events
//!
//! This module handles:
//! - The per-page and per-domain result model
//! - Recording skip events (append-only log, tracing, in-memory)
//! - Persisting the results index as timestamped JSON
//! - Printing a per-domain summary after a run

mod json;
mod results;
mod skip_log;
mod stats;
mod traits;

pub use json::{results_file_name, save_results};
pub use results::{DomainResult, PageAnalysis, ResultsIndex};
pub use skip_log::{SkipLog, SkipRecorder, TracingSkipSink};
pub use stats::{print_summary, RunStatistics};
pub use traits::{OutputError, OutputResult, SkipSink};
