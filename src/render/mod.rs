//! Page-rendering client
//!
//! The crawl engine talks to pages only through the [`Renderer`] and
//! [`RenderSession`] traits: open an isolated session, navigate, then query
//! the loaded document for anchors, cookies, forms and iframes.
//!
//! [`HttpRenderer`] is the default implementation. It fetches pages over
//! HTTP and answers DOM queries from the parsed response body, so it sees
//! what the server sends but runs no scripts. With the `browser` feature,
//! `BrowserRenderer` loads pages in headless Chromium instead.

#[cfg(feature = "browser")]
mod browser;
mod dom;
mod http;

#[cfg(feature = "browser")]
pub use browser::{BrowserRenderer, BrowserSession};
pub use dom::{extract_hrefs, extract_iframe_sources, has_form};
pub use http::{build_session_client, HttpRenderer, HttpSession};

use crate::RenderResult;
use async_trait::async_trait;
use serde::Serialize;

/// A cookie as seen by a render session
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CookieRecord {
    /// Cookie name
    pub name: String,

    /// Owning domain (`.example.com` for domain cookies, `example.com` for host-only)
    #[serde(rename = "type")]
    pub domain: String,
}

impl CookieRecord {
    /// Creates a new cookie record
    pub fn new(name: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            domain: domain.into(),
        }
    }
}

/// How a session treats redirects on navigation
///
/// The site walk needs to see a 3xx so it can skip the page; analysis wants
/// the page the redirect leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectMode {
    /// Stop at the redirect and report its status
    Report,
    /// Follow redirects and report the final status
    Follow,
}

/// Factory for isolated rendering sessions
///
/// Every session is independent: no cookies, history or connection state is
/// shared between two sessions.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Opens a fresh session with the given redirect handling
    async fn open_session(&self, redirects: RedirectMode) -> RenderResult<Box<dyn RenderSession>>;
}

/// One isolated browsing context
///
/// Extraction methods describe the document loaded by the most recent
/// successful [`navigate`](RenderSession::navigate).
#[async_trait]
pub trait RenderSession: Send {
    /// Navigates to `url` and waits for the DOM to be ready
    ///
    /// # Returns
    ///
    /// * `Ok(Some(status))` - HTTP status of the main response
    /// * `Ok(None)` - Navigation produced no response
    /// * `Err(RenderError)` - Navigation failed
    async fn navigate(&mut self, url: &str) -> RenderResult<Option<u16>>;

    /// Raw `href` attribute values of every anchor, in document order
    async fn anchor_hrefs(&mut self) -> RenderResult<Vec<String>>;

    /// All cookies visible in this session
    async fn cookies(&mut self) -> RenderResult<Vec<CookieRecord>>;

    /// Whether a `<form>` element exists anywhere in the document
    async fn has_form(&mut self) -> RenderResult<bool>;

    /// `src` attribute values of every iframe
    async fn iframe_sources(&mut self) -> RenderResult<Vec<String>>;

    /// Releases the session; closing twice is a no-op
    async fn close(&mut self);
}
