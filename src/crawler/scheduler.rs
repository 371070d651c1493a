//! Scheduler for batched page analysis
//!
//! This module handles:
//! - Splitting a domain's subpages into chunks of the concurrency limit
//! - Running one chunk at a time, all pages of a chunk concurrently
//! - Keeping results in the order of the input URLs

use crate::config::CrawlerConfig;
use crate::crawler::analyzer::analyze_page;
use crate::output::PageAnalysis;
use crate::render::Renderer;
use futures::future::join_all;
use std::time::Duration;

/// Runs page analyses in consecutive chunks
///
/// A chunk only starts after every page of the previous chunk has finished,
/// so at most `concurrency_limit` render sessions are open at any time.
#[derive(Debug, Clone)]
pub struct AnalysisScheduler {
    concurrency_limit: usize,
    timeout: Duration,
}

impl AnalysisScheduler {
    /// Creates a scheduler
    ///
    /// A limit of zero is treated as one.
    pub fn new(concurrency_limit: usize, timeout: Duration) -> Self {
        Self {
            concurrency_limit: concurrency_limit.max(1),
            timeout,
        }
    }

    /// Creates a scheduler from crawler configuration
    pub fn from_config(config: &CrawlerConfig) -> Self {
        Self::new(
            config.max_concurrent_pages as usize,
            config.navigation_timeout(),
        )
    }

    /// Maximum number of pages analyzed at once
    pub fn concurrency_limit(&self) -> usize {
        self.concurrency_limit
    }

    /// Number of chunks needed for `pages` URLs
    pub fn chunk_count(&self, pages: usize) -> usize {
        pages.div_ceil(self.concurrency_limit)
    }

    /// Analyzes every URL and returns the results in input order
    pub async fn run(&self, renderer: &dyn Renderer, urls: &[String]) -> Vec<PageAnalysis> {
        let mut results = Vec::with_capacity(urls.len());
        let chunks = self.chunk_count(urls.len());

        for (index, chunk) in urls.chunks(self.concurrency_limit).enumerate() {
            tracing::debug!(
                "Analyzing chunk {}/{} ({} pages)",
                index + 1,
                chunks,
                chunk.len()
            );

            let analyses = join_all(
                chunk
                    .iter()
                    .map(|url| analyze_page(renderer, url, self.timeout)),
            )
            .await;
            results.extend(analyses);
        }

        results
    }
}

/// Analyzes every URL, `concurrency_limit` pages at a time
pub async fn analyze_all(
    renderer: &dyn Renderer,
    urls: &[String],
    concurrency_limit: usize,
    timeout: Duration,
) -> Vec<PageAnalysis> {
    AnalysisScheduler::new(concurrency_limit, timeout)
        .run(renderer, urls)
        .await
}
