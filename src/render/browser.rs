//! Headless Chromium renderer
//!
//! Each session launches its own browser process, so cookies and storage
//! never carry over between sessions. Pages are queried through script
//! evaluation after the load event, which means script-inserted anchors,
//! forms and iframes are visible.
//!
//! Chromium always follows redirects. The main document's network events are
//! used to recover the status a [`RedirectMode::Report`] session must see.

use crate::config::Config;
use crate::render::{CookieRecord, RedirectMode, RenderSession, Renderer};
use crate::{RenderError, RenderResult};
use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::network::{
    EnableParams, EventRequestWillBeSent, EventResponseReceived, RequestId, ResourceType,
};
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::{FutureExt, StreamExt};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::task::JoinHandle;

const ANCHOR_HREFS_JS: &str =
    "Array.from(document.querySelectorAll('a[href]'), a => a.getAttribute('href'))";
const HAS_FORM_JS: &str = "document.querySelector('form') !== null";
const IFRAME_SOURCES_JS: &str =
    "Array.from(document.querySelectorAll('iframe[src]'), f => f.getAttribute('src'))";

/// Renderer that drives a headless Chromium
#[derive(Debug, Clone)]
pub struct BrowserRenderer {
    user_agent: String,
    timeout: Duration,
}

impl BrowserRenderer {
    /// Creates a renderer from the crawler configuration
    pub fn new(config: &Config) -> Self {
        Self {
            user_agent: config.user_agent.browser.clone(),
            timeout: config.crawler.navigation_timeout(),
        }
    }
}

#[async_trait]
impl Renderer for BrowserRenderer {
    async fn open_session(&self, redirects: RedirectMode) -> RenderResult<Box<dyn RenderSession>> {
        let config = BrowserConfig::builder()
            .arg(format!("--user-agent={}", self.user_agent))
            .request_timeout(self.timeout)
            .build()
            .map_err(RenderError::Launch)?;

        let (mut browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| RenderError::Launch(e.to_string()))?;

        let handle = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = match open_page(&browser).await {
            Ok(page) => page,
            Err(e) => {
                let _ = browser.close().await;
                let _ = browser.wait().await;
                handle.abort();
                return Err(e);
            }
        };

        Ok(Box::new(BrowserSession {
            browser: Some(browser),
            handle: Some(handle),
            page: Some(page),
            redirects,
            loaded: None,
        }))
    }
}

async fn open_page(browser: &Browser) -> RenderResult<Page> {
    let page = browser
        .new_page("about:blank")
        .await
        .map_err(|e| RenderError::Launch(e.to_string()))?;
    page.execute(EnableParams::default())
        .await
        .map_err(|e| RenderError::Launch(e.to_string()))?;
    Ok(page)
}

/// One browser process with a single tab
pub struct BrowserSession {
    browser: Option<Browser>,
    handle: Option<JoinHandle<()>>,
    page: Option<Page>,
    redirects: RedirectMode,
    /// URL of the last successful navigation
    loaded: Option<String>,
}

impl BrowserSession {
    fn page(&self) -> RenderResult<&Page> {
        self.page.as_ref().ok_or_else(|| RenderError::Launch("session is closed".to_string()))
    }

    fn loaded_page(&self) -> RenderResult<(&Page, &str)> {
        let url = self.loaded.as_deref().ok_or(RenderError::NoPage)?;
        Ok((self.page()?, url))
    }

    async fn evaluate<T: DeserializeOwned>(&self, expression: &str) -> RenderResult<T> {
        let (page, url) = self.loaded_page()?;
        let failed = |message: String| RenderError::Navigation {
            url: url.to_string(),
            message,
        };

        page.evaluate(expression)
            .await
            .map_err(|e| failed(e.to_string()))?
            .into_value::<T>()
            .map_err(|e| failed(e.to_string()))
    }
}

/// Picks the status a session reports for its main document
///
/// `hops` holds the statuses of redirect responses in the order they were
/// received; `final_status` is the status of the document finally loaded.
fn main_document_status(
    redirects: RedirectMode,
    hops: &[i64],
    final_status: Option<i64>,
) -> Option<u16> {
    let status = match redirects {
        RedirectMode::Report => hops.first().copied().or(final_status),
        RedirectMode::Follow => final_status,
    };
    status.and_then(|s| u16::try_from(s).ok())
}

#[async_trait]
impl RenderSession for BrowserSession {
    async fn navigate(&mut self, url: &str) -> RenderResult<Option<u16>> {
        self.loaded = None;
        let page = self.page()?;
        let failed = |message: String| RenderError::Navigation {
            url: url.to_string(),
            message,
        };

        let mut requests = page
            .event_listener::<EventRequestWillBeSent>()
            .await
            .map_err(|e| failed(e.to_string()))?;
        let mut responses = page
            .event_listener::<EventResponseReceived>()
            .await
            .map_err(|e| failed(e.to_string()))?;

        page.goto(url).await.map_err(|e| failed(e.to_string()))?;

        // The main document is the first document request after navigation
        // starts; its redirects reuse the same request id.
        let mut document: Option<RequestId> = None;
        let mut hops = Vec::new();
        while let Some(Some(event)) = requests.next().now_or_never() {
            if event.r#type != Some(ResourceType::Document) {
                continue;
            }
            let id = document.get_or_insert_with(|| event.request_id.clone());
            if *id != event.request_id {
                continue;
            }
            if let Some(redirect) = &event.redirect_response {
                hops.push(redirect.status);
            }
        }

        let mut final_status = None;
        while let Some(Some(event)) = responses.next().now_or_never() {
            if event.r#type == ResourceType::Document
                && document.as_ref().map_or(true, |id| *id == event.request_id)
            {
                final_status = Some(event.response.status);
                break;
            }
        }

        self.loaded = Some(url.to_string());
        Ok(main_document_status(self.redirects, &hops, final_status))
    }

    async fn anchor_hrefs(&mut self) -> RenderResult<Vec<String>> {
        self.evaluate(ANCHOR_HREFS_JS).await
    }

    async fn cookies(&mut self) -> RenderResult<Vec<CookieRecord>> {
        let (page, url) = self.loaded_page()?;
        let cookies = page.get_cookies().await.map_err(|e| RenderError::Navigation {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        Ok(cookies
            .into_iter()
            .map(|cookie| CookieRecord::new(cookie.name, cookie.domain))
            .collect())
    }

    async fn has_form(&mut self) -> RenderResult<bool> {
        self.evaluate(HAS_FORM_JS).await
    }

    async fn iframe_sources(&mut self) -> RenderResult<Vec<String>> {
        self.evaluate(IFRAME_SOURCES_JS).await
    }

    async fn close(&mut self) {
        self.loaded = None;
        if let Some(page) = self.page.take() {
            let _ = page.close().await;
        }
        if let Some(mut browser) = self.browser.take() {
            if let Err(e) = browser.close().await {
                tracing::debug!("Browser close failed: {}", e);
            }
            let _ = browser.wait().await;
        }
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
