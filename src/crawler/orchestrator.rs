//! Scan orchestrator - per-domain pipeline and run loop
//!
//! For every domain, in input order:
//! 1. Fetch robots.txt (missing or unreadable means unrestricted)
//! 2. Walk the site breadth-first to discover subpages
//! 3. Analyze the subpages in chunks
//! 4. Aggregate the analyses into a [`DomainResult`]
//!
//! A domain that fails is logged and left out of the results; the run
//! continues with the next domain.

use crate::config::Config;
use crate::crawler::scheduler::AnalysisScheduler;
use crate::crawler::traverser::Traverser;
use crate::output::{DomainResult, ResultsIndex, SkipSink};
use crate::render::Renderer;
use crate::robots;
use crate::Result;
use reqwest::Client;
use std::sync::Arc;

/// Drives a scan over a list of domains
pub struct Orchestrator {
    config: Arc<Config>,
    renderer: Arc<dyn Renderer>,
    skips: Arc<dyn SkipSink>,
    robots_client: Client,
    scheduler: AnalysisScheduler,
}

impl Orchestrator {
    /// Creates a new orchestrator
    ///
    /// # Arguments
    ///
    /// * `config` - The scan configuration
    /// * `renderer` - Session factory shared by traversal and analysis
    /// * `skips` - Receiver of skip events
    ///
    /// # Returns
    ///
    /// * `Ok(Orchestrator)` - Ready to run
    /// * `Err(ScanError)` - The robots.txt HTTP client could not be built
    pub fn new(config: Config, renderer: Arc<dyn Renderer>, skips: Arc<dyn SkipSink>) -> Result<Self> {
        let robots_client =
            robots::build_client(&config.user_agent.browser, config.crawler.navigation_timeout())?;
        let scheduler = AnalysisScheduler::from_config(&config.crawler);

        Ok(Self {
            config: Arc::new(config),
            renderer,
            skips,
            robots_client,
            scheduler,
        })
    }

    /// Scans every domain sequentially
    ///
    /// # Returns
    ///
    /// Results for the domains that completed, in input order. Domains that
    /// failed are absent.
    pub async fn run(&self, domains: &[String]) -> ResultsIndex {
        let mut index = ResultsIndex::new();
        let start_time = std::time::Instant::now();

        for (position, domain) in domains.iter().enumerate() {
            tracing::info!("Processing domain {}/{}: {}", position + 1, domains.len(), domain);

            match self.process_domain(domain).await {
                Ok(result) => {
                    tracing::info!(
                        "Finished {}: {} subpages, {} cookies",
                        domain,
                        result.total_subpages_analyzed,
                        result.total_cookies_found
                    );
                    index.insert(domain.clone(), result);
                }
                Err(e) => {
                    tracing::error!("Error processing domain {}: {}", domain, e);
                }
            }
        }

        tracing::info!(
            "Scan complete: {} of {} domains in {:.1}s",
            index.len(),
            domains.len(),
            start_time.elapsed().as_secs_f64()
        );

        index
    }

    /// Runs the full pipeline for one domain
    ///
    /// # Returns
    ///
    /// * `Ok(DomainResult)` - Aggregate over every discovered subpage
    /// * `Err(ScanError)` - The site walk could not start
    pub async fn process_domain(&self, domain: &str) -> Result<DomainResult> {
        let policy = robots::fetch_policy(
            &self.robots_client,
            domain,
            &self.config.user_agent.robots_agent,
        )
        .await;

        let subpages = Traverser::new(domain, policy.as_ref(), &self.config.crawler, self.skips.as_ref())
            .run(self.renderer.as_ref())
            .await?;

        tracing::debug!(
            "Analyzing {} subpages of {} in {} chunks",
            subpages.len(),
            domain,
            self.scheduler.chunk_count(subpages.len())
        );

        let analyses = self.scheduler.run(self.renderer.as_ref(), &subpages).await;

        Ok(DomainResult::from_analyses(analyses))
    }
}

/// Convenience function to scan a list of domains
///
/// # Example
///
/// ```no_run
/// use site_signals::config::Config;
/// use site_signals::crawler::run_scan;
/// use site_signals::output::TracingSkipSink;
/// use site_signals::render::HttpRenderer;
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::default();
/// let renderer = Arc::new(HttpRenderer::new(&config));
/// let domains = vec!["https://example.com".to_string()];
/// let results = run_scan(config, renderer, Arc::new(TracingSkipSink), &domains).await?;
/// println!("{} domains scanned", results.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_scan(
    config: Config,
    renderer: Arc<dyn Renderer>,
    skips: Arc<dyn SkipSink>,
    domains: &[String],
) -> Result<ResultsIndex> {
    let orchestrator = Orchestrator::new(config, renderer, skips)?;
    Ok(orchestrator.run(domains).await)
}
