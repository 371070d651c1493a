//! Site traverser - breadth-first subpage discovery for one domain
//!
//! The traverser owns a [`Frontier`] (FIFO queue, seen set, visited set and
//! discovered subpages) for exactly one domain. Pages are rendered one at a
//! time through a single render session, because every step depends on the
//! queue state left by the previous one.
//!
//! Gates applied to each discovered link, in order:
//! 1. href is followable (not fragment-only, `mailto:` or `tel:`)
//! 2. href resolves against the page URL
//! 3. URL passes the admission filter
//! 4. URL is same-site under the configured rule
//! 5. URL has not been seen before
//! 6. robots.txt allows it (otherwise one skip event is recorded)

use crate::config::CrawlerConfig;
use crate::output::SkipSink;
use crate::render::{RedirectMode, RenderSession, Renderer};
use crate::robots::{self, RobotsPolicy};
use crate::state::{SkipEvent, SkipReason, VisitOutcome};
use crate::url::{is_admissible, is_followable_href, resolve_link};
use crate::{RenderError, RenderResult};
use std::collections::{HashSet, VecDeque};
use std::time::Duration;
use url::Url;

/// A URL waiting in the traversal queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueEntry {
    /// The URL to visit
    pub url: String,

    /// BFS distance from the domain root
    pub depth: u32,
}

/// Traversal state for a single domain
///
/// `seen` holds every URL ever queued or rejected by robots.txt, so nothing
/// is queued twice. `visited` holds every URL rendered, so nothing is
/// rendered twice.
#[derive(Debug)]
pub struct Frontier {
    queue: VecDeque<QueueEntry>,
    seen: HashSet<String>,
    visited: HashSet<String>,
    subpages: Vec<String>,
}

impl Frontier {
    /// Creates a frontier holding only the domain root at depth 0
    pub fn new(root: &str) -> Self {
        let mut seen = HashSet::new();
        seen.insert(root.to_string());

        Self {
            queue: VecDeque::from([QueueEntry {
                url: root.to_string(),
                depth: 0,
            }]),
            seen,
            visited: HashSet::new(),
            subpages: Vec::new(),
        }
    }

    /// Removes the head of the queue
    pub fn next_entry(&mut self) -> Option<QueueEntry> {
        self.queue.pop_front()
    }

    /// Returns whether a URL was already queued or rejected
    pub fn is_seen(&self, url: &str) -> bool {
        self.seen.contains(url)
    }

    /// Remembers a URL without queueing it
    pub fn mark_seen(&mut self, url: String) {
        self.seen.insert(url);
    }

    /// Returns whether a URL was already rendered
    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Records that a URL is being rendered
    pub fn mark_visited(&mut self, url: &str) {
        self.visited.insert(url.to_string());
    }

    /// Queues a newly discovered subpage and records it
    ///
    /// # Returns
    ///
    /// * `true` - The URL was new and has been queued
    /// * `false` - The URL was already seen; nothing changed
    pub fn enqueue(&mut self, url: String, depth: u32) -> bool {
        if !self.seen.insert(url.clone()) {
            return false;
        }

        self.subpages.push(url.clone());
        self.queue.push_back(QueueEntry { url, depth });
        true
    }

    /// Subpages discovered so far, in discovery order
    pub fn subpages(&self) -> &[String] {
        &self.subpages
    }

    /// Ends traversal and hands over the discovered subpages
    pub fn into_subpages(self) -> Vec<String> {
        self.subpages
    }
}

/// Breadth-first walker for one domain
pub struct Traverser<'a> {
    domain: &'a str,
    policy: Option<&'a RobotsPolicy>,
    config: &'a CrawlerConfig,
    skips: &'a dyn SkipSink,
}

impl<'a> Traverser<'a> {
    /// Creates a traverser for a domain root
    ///
    /// # Arguments
    ///
    /// * `domain` - Domain root (scheme + host)
    /// * `policy` - The domain's robots policy, `None` when unknown
    /// * `config` - Depth limit, navigation timeout and same-site rule
    /// * `skips` - Receiver of skip events
    pub fn new(
        domain: &'a str,
        policy: Option<&'a RobotsPolicy>,
        config: &'a CrawlerConfig,
        skips: &'a dyn SkipSink,
    ) -> Self {
        Self {
            domain,
            policy,
            config,
            skips,
        }
    }

    /// Walks the domain and returns its discovered subpages
    ///
    /// One render session is opened for the whole walk and closed exactly
    /// once before returning. The session reports redirects instead of
    /// following them, so a redirecting page is skipped. Per-page failures
    /// are reported as skip events and never end the walk.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<String>)` - Deduplicated subpages in BFS discovery order
    /// * `Err(RenderError)` - No render session could be opened
    pub async fn run(&self, renderer: &dyn Renderer) -> RenderResult<Vec<String>> {
        let mut session = renderer.open_session(RedirectMode::Report).await?;
        let mut frontier = Frontier::new(self.domain);

        self.walk(session.as_mut(), &mut frontier).await;

        session.close().await;

        tracing::info!(
            "Found {} subpages for {}",
            frontier.subpages().len(),
            self.domain
        );
        Ok(frontier.into_subpages())
    }

    async fn walk(&self, session: &mut dyn RenderSession, frontier: &mut Frontier) {
        while let Some(entry) = frontier.next_entry() {
            if entry.depth > self.config.max_depth {
                tracing::trace!("Not expanding {} at depth {}", entry.url, entry.depth);
                continue;
            }

            if frontier.is_visited(&entry.url) {
                continue;
            }

            if !robots::is_allowed(self.policy, &entry.url) {
                self.skip(&entry.url, SkipReason::DisallowedByRobots);
                continue;
            }

            tracing::info!("Visiting: {}", entry.url);
            frontier.mark_visited(&entry.url);

            match visit_page(session, &entry.url, self.config.navigation_timeout()).await {
                VisitOutcome::Expanded { hrefs } => {
                    self.admit_links(frontier, &entry, &hrefs);
                }
                outcome => {
                    if let Some(reason) = outcome.skip_reason() {
                        self.skip(&entry.url, reason);
                    }
                }
            }
        }
    }

    /// Runs every href of an expanded page through the admission gates
    fn admit_links(&self, frontier: &mut Frontier, page: &QueueEntry, hrefs: &[String]) {
        let base = match Url::parse(&page.url) {
            Ok(base) => base,
            Err(e) => {
                tracing::debug!("Cannot resolve links against {}: {}", page.url, e);
                return;
            }
        };

        for href in hrefs.iter().filter(|href| is_followable_href(href)) {
            let link = match resolve_link(href, &base) {
                Some(link) => link,
                None => {
                    tracing::debug!("Dropping unresolvable link {:?} on {}", href, page.url);
                    continue;
                }
            };

            if !is_admissible(&link)
                || !self.config.same_site.matches(self.domain, &link)
                || frontier.is_seen(&link)
            {
                continue;
            }

            if !robots::is_allowed(self.policy, &link) {
                self.skip(&link, SkipReason::DisallowedByRobots);
                frontier.mark_seen(link);
                continue;
            }

            frontier.enqueue(link, page.depth + 1);
        }
    }

    fn skip(&self, url: &str, reason: SkipReason) {
        let event = SkipEvent::new(self.domain, url, reason);
        if let Err(e) = self.skips.record_skip(&event) {
            tracing::warn!("Failed to record skip of {}: {}", url, e);
        }
    }
}

/// Renders one page and decides whether its links may be followed
///
/// Only an HTTP 200 main response is expanded; a missing response, any
/// other status (redirects included) is skipped, and navigation errors or
/// timeouts become failures.
pub(crate) async fn visit_page(
    session: &mut dyn RenderSession,
    url: &str,
    timeout: Duration,
) -> VisitOutcome {
    let status = match tokio::time::timeout(timeout, session.navigate(url)).await {
        Ok(Ok(status)) => status,
        Ok(Err(e)) => return VisitOutcome::Failed(e.to_string()),
        Err(_) => {
            let error = RenderError::Timeout {
                url: url.to_string(),
                timeout_ms: timeout.as_millis() as u64,
            };
            return VisitOutcome::Failed(error.to_string());
        }
    };

    if status != Some(200) {
        return VisitOutcome::Skipped(SkipReason::NonSuccessResponse);
    }

    match session.anchor_hrefs().await {
        Ok(hrefs) => VisitOutcome::Expanded { hrefs },
        Err(e) => VisitOutcome::Failed(e.to_string()),
    }
}

/// Walks a domain breadth-first and returns its discovered subpages
///
/// Convenience wrapper around [`Traverser`].
pub async fn traverse_site(
    renderer: &dyn Renderer,
    domain: &str,
    policy: Option<&RobotsPolicy>,
    config: &CrawlerConfig,
    skips: &dyn SkipSink,
) -> RenderResult<Vec<String>> {
    Traverser::new(domain, policy, config, skips)
        .run(renderer)
        .await
}
