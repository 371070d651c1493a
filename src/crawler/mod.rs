//! Crawler module for site discovery and page analysis
//!
//! This module contains the crawl-and-analyze engine, including:
//! - Breadth-first, depth-bounded discovery of same-site subpages
//! - Per-page signal extraction in isolated render sessions
//! - Chunked, bounded-concurrency analysis of discovered pages
//! - Per-domain orchestration and result aggregation

mod analyzer;
mod orchestrator;
mod scheduler;
mod traverser;

#[cfg(test)]
pub(crate) mod scripted;

pub use analyzer::{analyze_page, has_map_embed, MAP_EMBED_MARKERS};
pub use orchestrator::{run_scan, Orchestrator};
pub use scheduler::{analyze_all, AnalysisScheduler};
pub use traverser::{traverse_site, Frontier, QueueEntry, Traverser};
