//! HTTP-backed renderer
//!
//! This module implements the rendering client on top of reqwest:
//! - Building one HTTP client per session with the configured user agent
//! - Navigation that either reports a 3xx or follows it, per session
//! - Collecting `Set-Cookie` headers into a per-session cookie list
//! - Answering DOM queries from the last loaded body
//! - Error classification (timeouts vs. other navigation failures)

use crate::config::Config;
use crate::render::dom::{extract_hrefs, extract_iframe_sources, has_form};
use crate::render::{CookieRecord, RedirectMode, RenderSession, Renderer};
use crate::{RenderError, RenderResult};
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;

/// Redirect hops a following session accepts before failing
const MAX_REDIRECTS: usize = 10;

/// Builds an HTTP client for a single render session
///
/// # Arguments
///
/// * `user_agent` - The User-Agent header value
/// * `timeout` - Whole-request timeout for a navigation
/// * `redirects` - Whether a 3xx is reported or followed
///
/// # Example
///
/// ```no_run
/// use site_signals::render::{build_session_client, RedirectMode};
/// use std::time::Duration;
///
/// let client =
///     build_session_client("Mozilla/5.0", Duration::from_secs(15), RedirectMode::Follow).unwrap();
/// ```
pub fn build_session_client(
    user_agent: &str,
    timeout: Duration,
    redirects: RedirectMode,
) -> Result<Client, reqwest::Error> {
    let policy = match redirects {
        RedirectMode::Report => Policy::none(),
        RedirectMode::Follow => Policy::limited(MAX_REDIRECTS),
    };

    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .redirect(policy)
        .cookie_store(true)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Renderer that loads pages over plain HTTP
#[derive(Debug, Clone)]
pub struct HttpRenderer {
    user_agent: String,
    timeout: Duration,
}

impl HttpRenderer {
    /// Creates a renderer from the crawler configuration
    pub fn new(config: &Config) -> Self {
        Self {
            user_agent: config.user_agent.browser.clone(),
            timeout: config.crawler.navigation_timeout(),
        }
    }

    /// Creates a renderer with explicit settings
    pub fn with_settings(user_agent: impl Into<String>, timeout: Duration) -> Self {
        Self {
            user_agent: user_agent.into(),
            timeout,
        }
    }
}

#[async_trait]
impl Renderer for HttpRenderer {
    async fn open_session(&self, redirects: RedirectMode) -> RenderResult<Box<dyn RenderSession>> {
        let client = build_session_client(&self.user_agent, self.timeout, redirects)
            .map_err(|e| RenderError::Launch(e.to_string()))?;

        Ok(Box::new(HttpSession::new(client, self.timeout)))
    }
}

/// One HTTP browsing context with its own connection pool and cookies
#[derive(Debug)]
pub struct HttpSession {
    client: Option<Client>,
    timeout: Duration,
    body: Option<String>,
    cookies: Vec<CookieRecord>,
}

impl HttpSession {
    /// Wraps a client built by [`build_session_client`]
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self {
            client: Some(client),
            timeout,
            body: None,
            cookies: Vec::new(),
        }
    }

    #[cfg(test)]
    fn is_closed(&self) -> bool {
        self.client.is_none()
    }

    fn loaded_body(&self) -> RenderResult<&str> {
        self.body.as_deref().ok_or(RenderError::NoPage)
    }

    /// Stores a cookie, replacing an earlier one with the same name and domain
    fn store_cookie(&mut self, cookie: CookieRecord) {
        match self
            .cookies
            .iter_mut()
            .find(|c| c.name == cookie.name && c.domain == cookie.domain)
        {
            Some(existing) => *existing = cookie,
            None => self.cookies.push(cookie),
        }
    }

    fn classify_error(&self, url: &str, error: reqwest::Error) -> RenderError {
        if error.is_timeout() {
            RenderError::Timeout {
                url: url.to_string(),
                timeout_ms: self.timeout.as_millis() as u64,
            }
        } else {
            RenderError::Navigation {
                url: url.to_string(),
                message: error.to_string(),
            }
        }
    }
}

/// Derives the owning domain reported for a cookie
///
/// A `Domain` attribute produces a domain cookie (`.example.com`); without
/// one the cookie is host-only and owned by the response host.
fn cookie_domain(attribute: Option<&str>, host: &str) -> String {
    match attribute {
        Some(domain) if !domain.is_empty() => format!(".{}", domain.trim_start_matches('.')),
        _ => host.to_string(),
    }
}

#[async_trait]
impl RenderSession for HttpSession {
    async fn navigate(&mut self, url: &str) -> RenderResult<Option<u16>> {
        self.body = None;

        let client = self
            .client
            .as_ref()
            .ok_or_else(|| RenderError::Launch("session is closed".to_string()))?;

        let response = match client.get(url).send().await {
            Ok(response) => response,
            Err(e) => return Err(self.classify_error(url, e)),
        };

        let status = response.status().as_u16();
        let host = response.url().host_str().unwrap_or_default().to_string();

        let received: Vec<CookieRecord> = response
            .cookies()
            .map(|cookie| CookieRecord::new(cookie.name(), cookie_domain(cookie.domain(), &host)))
            .collect();
        for cookie in received {
            self.store_cookie(cookie);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return Err(self.classify_error(url, e)),
        };
        self.body = Some(body);

        Ok(Some(status))
    }

    async fn anchor_hrefs(&mut self) -> RenderResult<Vec<String>> {
        Ok(extract_hrefs(self.loaded_body()?))
    }

    async fn cookies(&mut self) -> RenderResult<Vec<CookieRecord>> {
        Ok(self.cookies.clone())
    }

    async fn has_form(&mut self) -> RenderResult<bool> {
        Ok(has_form(self.loaded_body()?))
    }

    async fn iframe_sources(&mut self) -> RenderResult<Vec<String>> {
        Ok(extract_iframe_sources(self.loaded_body()?))
    }

    async fn close(&mut self) {
        self.client = None;
        self.body = None;
        self.cookies.clear();
    }
}
