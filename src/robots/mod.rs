//! Robots.txt handling module
//!
//! This module fetches and parses a domain's robots.txt. A policy that cannot
//! be obtained for any reason is reported as `None`, which every caller treats
//! as "no restriction known".

mod parser;

pub use parser::RobotsPolicy;

use reqwest::Client;
use std::time::Duration;

/// Builds the HTTP client used for robots.txt requests
///
/// Unlike page navigation, robots.txt requests follow redirects.
pub fn build_client(user_agent: &str, timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Builds the robots.txt location for a domain root
pub fn robots_url(domain: &str) -> String {
    format!("{}/robots.txt", domain.trim_end_matches('/'))
}

/// Fetches robots.txt for a domain
///
/// Issues exactly one request for `<domain>/robots.txt`.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `domain` - The domain root (scheme + host)
/// * `user_agent` - The agent token whose rules apply
///
/// # Returns
///
/// * `Some(RobotsPolicy)` - Successfully fetched and parsed robots.txt
/// * `None` - Transport failure, non-success status, or unreadable body
pub async fn fetch_policy(client: &Client, domain: &str, user_agent: &str) -> Option<RobotsPolicy> {
    let url = robots_url(domain);

    let response = match client.get(&url).send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!("Could not fetch robots.txt for {}: {}", domain, e);
            return None;
        }
    };

    if !response.status().is_success() {
        tracing::debug!(
            "robots.txt for {} answered {}, allowing all",
            domain,
            response.status()
        );
        return None;
    }

    match response.text().await {
        Ok(body) => Some(RobotsPolicy::from_content(&body, user_agent)),
        Err(e) => {
            tracing::warn!("Could not read robots.txt for {}: {}", domain, e);
            None
        }
    }
}

/// Checks if a URL is allowed by an optional policy
///
/// # Returns
///
/// * `true` - If there is no policy or the policy allows the URL
/// * `false` - If the policy disallows the URL
pub fn is_allowed(policy: Option<&RobotsPolicy>, url: &str) -> bool {
    policy.map_or(true, |p| p.is_allowed(url))
}
