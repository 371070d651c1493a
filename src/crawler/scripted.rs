//! Scripted renderer for engine tests
//!
//! Pages are described up front; sessions record every navigation and keep
//! counters for opened, closed and concurrently active sessions.

use crate::render::{CookieRecord, RedirectMode, RenderSession, Renderer};
use crate::{RenderError, RenderResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub(crate) struct ScriptedPage {
    pub status: Option<u16>,
    pub hrefs: Vec<String>,
    pub cookies: Vec<CookieRecord>,
    pub has_form: bool,
    pub iframes: Vec<String>,
    pub delay: Duration,
    pub fail: Option<String>,
    /// Target of a 301 answer
    pub redirect: Option<String>,
}

impl ScriptedPage {
    pub fn ok(hrefs: &[&str]) -> Self {
        Self {
            status: Some(200),
            hrefs: hrefs.iter().map(|h| h.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn redirect(target: &str) -> Self {
        Self {
            status: Some(301),
            redirect: Some(target.to_string()),
            ..Self::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            fail: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Debug, Default)]
pub(crate) struct Shared {
    pages: HashMap<String, ScriptedPage>,
    pub opened: AtomicUsize,
    pub closed: AtomicUsize,
    active: AtomicUsize,
    pub peak: AtomicUsize,
    /// Sessions opened while no other session was active
    pub waves: AtomicUsize,
    navigations: Mutex<Vec<String>>,
    modes: Mutex<Vec<RedirectMode>>,
    refuse_sessions: bool,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct ScriptedRenderer {
    shared: Arc<Shared>,
}

impl ScriptedRenderer {
    pub fn new(pages: Vec<(&str, ScriptedPage)>) -> Self {
        Self {
            shared: Arc::new(Shared {
                pages: pages
                    .into_iter()
                    .map(|(url, page)| (url.to_string(), page))
                    .collect(),
                ..Shared::default()
            }),
        }
    }

    pub fn refusing() -> Self {
        Self {
            shared: Arc::new(Shared {
                refuse_sessions: true,
                ..Shared::default()
            }),
        }
    }

    pub fn navigations(&self) -> Vec<String> {
        self.shared.navigations.lock().unwrap().clone()
    }

    /// Redirect mode of every opened session, in opening order
    pub fn modes(&self) -> Vec<RedirectMode> {
        self.shared.modes.lock().unwrap().clone()
    }

    pub fn opened(&self) -> usize {
        self.shared.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.shared.closed.load(Ordering::SeqCst)
    }

    pub fn peak(&self) -> usize {
        self.shared.peak.load(Ordering::SeqCst)
    }

    pub fn waves(&self) -> usize {
        self.shared.waves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Renderer for ScriptedRenderer {
    async fn open_session(&self, redirects: RedirectMode) -> RenderResult<Box<dyn RenderSession>> {
        if self.shared.refuse_sessions {
            return Err(RenderError::Launch("browser unavailable".to_string()));
        }

        let previously_active = self.shared.active.fetch_add(1, Ordering::SeqCst);
        if previously_active == 0 {
            self.shared.waves.fetch_add(1, Ordering::SeqCst);
        }
        self.shared
            .peak
            .fetch_max(previously_active + 1, Ordering::SeqCst);
        self.shared.opened.fetch_add(1, Ordering::SeqCst);
        self.shared.modes.lock().unwrap().push(redirects);

        Ok(Box::new(ScriptedSession {
            shared: Arc::clone(&self.shared),
            redirects,
            current: None,
            closed: false,
        }))
    }
}

struct ScriptedSession {
    shared: Arc<Shared>,
    redirects: RedirectMode,
    current: Option<ScriptedPage>,
    closed: bool,
}

impl ScriptedSession {
    fn lookup(&self, url: &str) -> ScriptedPage {
        self.shared
            .pages
            .get(url)
            .cloned()
            .unwrap_or_else(|| ScriptedPage::status(404))
    }

    fn page(&self) -> RenderResult<&ScriptedPage> {
        self.current.as_ref().ok_or(RenderError::NoPage)
    }
}

#[async_trait]
impl RenderSession for ScriptedSession {
    async fn navigate(&mut self, url: &str) -> RenderResult<Option<u16>> {
        self.shared.navigations.lock().unwrap().push(url.to_string());
        self.current = None;

        let mut page = self.lookup(url);
        if self.redirects == RedirectMode::Follow {
            for _ in 0..10 {
                match page.redirect.clone() {
                    Some(target) => page = self.lookup(&target),
                    None => break,
                }
            }
        }

        if !page.delay.is_zero() {
            tokio::time::sleep(page.delay).await;
        }

        if let Some(message) = &page.fail {
            return Err(RenderError::Navigation {
                url: url.to_string(),
                message: message.clone(),
            });
        }

        let status = page.status;
        self.current = Some(page);
        Ok(status)
    }

    async fn anchor_hrefs(&mut self) -> RenderResult<Vec<String>> {
        Ok(self.page()?.hrefs.clone())
    }

    async fn cookies(&mut self) -> RenderResult<Vec<CookieRecord>> {
        Ok(self.page()?.cookies.clone())
    }

    async fn has_form(&mut self) -> RenderResult<bool> {
        Ok(self.page()?.has_form)
    }

    async fn iframe_sources(&mut self) -> RenderResult<Vec<String>> {
        Ok(self.page()?.iframes.clone())
    }

    async fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.shared.active.fetch_sub(1, Ordering::SeqCst);
            self.shared.closed.fetch_add(1, Ordering::SeqCst);
        }
    }
}
