//! Per-page analysis
//!
//! Each page is analyzed in its own render session so no cookie state leaks
//! between pages. Failures never propagate: a page that cannot be loaded or
//! inspected yields an analysis with default values.

use crate::output::PageAnalysis;
use crate::render::{RedirectMode, RenderSession, Renderer};
use crate::{RenderError, RenderResult};
use std::time::Duration;

/// Iframe `src` substrings that identify an embedded Google map
pub const MAP_EMBED_MARKERS: &[&str] = &["google.com/maps"];

/// Returns true if any iframe source embeds a Google map
pub fn has_map_embed(iframe_sources: &[String]) -> bool {
    iframe_sources
        .iter()
        .any(|src| MAP_EMBED_MARKERS.iter().any(|marker| src.contains(marker)))
}

/// Analyzes one page for cookies, forms and embedded maps
///
/// Opens a fresh session, navigates, inspects the document and closes the
/// session again on every path. Redirects are followed, so a moved page is
/// analyzed at its target. The response status is not checked; an error
/// page is analyzed like any other.
///
/// # Arguments
///
/// * `renderer` - Session factory
/// * `url` - The page to analyze
/// * `timeout` - Navigation timeout
///
/// # Returns
///
/// The page's analysis; all fields are defaults if anything failed.
pub async fn analyze_page(renderer: &dyn Renderer, url: &str, timeout: Duration) -> PageAnalysis {
    let mut session = match renderer.open_session(RedirectMode::Follow).await {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!("Error analyzing {}: {}", url, e);
            return PageAnalysis::empty(url);
        }
    };

    let result = inspect(session.as_mut(), url, timeout).await;
    session.close().await;

    match result {
        Ok(analysis) => analysis,
        Err(e) => {
            tracing::warn!("Error analyzing {}: {}", url, e);
            PageAnalysis::empty(url)
        }
    }
}

async fn inspect(
    session: &mut dyn RenderSession,
    url: &str,
    timeout: Duration,
) -> RenderResult<PageAnalysis> {
    tracing::debug!("Analyzing page: {}", url);

    match tokio::time::timeout(timeout, session.navigate(url)).await {
        Ok(navigation) => {
            navigation?;
        }
        Err(_) => {
            return Err(RenderError::Timeout {
                url: url.to_string(),
                timeout_ms: timeout.as_millis() as u64,
            })
        }
    }

    let cookies = session.cookies().await?;
    let has_form = session.has_form().await?;
    let iframes = session.iframe_sources().await?;

    Ok(PageAnalysis {
        url: url.to_string(),
        cookies,
        has_form,
        has_google_maps: has_map_embed(&iframes),
    })
}
