//! Test utilities: a scripted in-memory browser and summarizer
//!
//! `FakeBrowser` serves pages from a URL -> `PageScript` table and counts
//! every tab it opens and closes, plus the peak number open at once.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use kodegen_tools_leadscrape::extractor::listing::{FEED_SELECTOR, PLACE_LINK_SELECTOR};
use kodegen_tools_leadscrape::{
    BrowserDriver, BrowserLauncher, GenerationOptions, PageHandle, PipelineConfig, ScrapeError,
    ScrapeResult, Summarizer,
};

pub const WEBSITE_SELECTOR: &str = r#"a[data-item-id="authority"]"#;
pub const PHONE_SELECTOR: &str = r#"button[data-item-id^="phone:tel:"]"#;
pub const RATING_SELECTOR: &str = r#"span[aria-label*=" stars "][aria-label*=" Reviews"]"#;
pub const VIEWPORT_SELECTOR: &str = r#"meta[name="viewport"]"#;

/// How navigation to a scripted page behaves
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Nav {
    #[default]
    Ok,
    Fail,
    Hang,
}

/// Canned DOM answers for one URL
#[derive(Debug, Clone, Default)]
pub struct PageScript {
    pub nav: Nav,
    pub counts: HashMap<String, usize>,
    pub attributes: HashMap<(String, String), Vec<String>>,
    pub texts: HashMap<String, String>,
    /// Text present in `textContent` but not rendered, so absent from `innerText`
    pub hidden_texts: HashMap<String, String>,
    pub markup: String,
    /// Every selector query returns a browser error
    pub broken_queries: bool,
}

impl PageScript {
    pub fn with_count(mut self, selector: &str, n: usize) -> Self {
        self.counts.insert(selector.to_string(), n);
        self
    }

    pub fn with_attr(mut self, selector: &str, name: &str, values: &[&str]) -> Self {
        self.attributes.insert(
            (selector.to_string(), name.to_string()),
            values.iter().map(|v| (*v).to_string()).collect(),
        );
        self
    }

    pub fn with_text(mut self, selector: &str, text: &str) -> Self {
        self.texts.insert(selector.to_string(), text.to_string());
        self
    }

    pub fn with_hidden_text(mut self, selector: &str, text: &str) -> Self {
        self.hidden_texts.insert(selector.to_string(), text.to_string());
        self
    }

    pub fn with_markup(mut self, markup: &str) -> Self {
        self.markup = markup.to_string();
        self
    }

    pub fn failing() -> Self {
        Self {
            nav: Nav::Fail,
            ..Self::default()
        }
    }

    pub fn hanging() -> Self {
        Self {
            nav: Nav::Hang,
            ..Self::default()
        }
    }

    fn matches(&self, selector: &str) -> usize {
        if let Some(n) = self.counts.get(selector) {
            return *n;
        }
        let has_attr = self.attributes.keys().any(|(s, _)| s == selector);
        let has_text =
            self.texts.contains_key(selector) || self.hidden_texts.contains_key(selector);
        usize::from(has_attr || has_text)
    }
}

/// Listing view with a feed containing `hrefs`
pub fn listing_page(hrefs: &[&str]) -> PageScript {
    PageScript::default()
        .with_count(FEED_SELECTOR, 1)
        .with_attr(PLACE_LINK_SELECTOR, "href", hrefs)
}

/// Detail page for one business
pub fn detail_page(name: &str, website: Option<&str>, phone: Option<&str>, rating: Option<&str>) -> PageScript {
    let mut page = PageScript::default().with_text("h1", name);
    if let Some(website) = website {
        page = page.with_attr(WEBSITE_SELECTOR, "href", &[website]);
    }
    if let Some(phone) = phone {
        page = page.with_attr(PHONE_SELECTOR, "aria-label", &[&format!("Phone: {phone}")]);
    }
    if let Some(label) = rating {
        page = page.with_attr(RATING_SELECTOR, "aria-label", &[label]);
    }
    page
}

/// Business website with the given markup and body text
pub fn website_page(markup: &str, viewport: bool, body: &str) -> PageScript {
    PageScript::default()
        .with_markup(markup)
        .with_count(VIEWPORT_SELECTOR, usize::from(viewport))
        .with_text("body", body)
}

pub fn maps_search(query: &str) -> String {
    kodegen_tools_leadscrape::utils::search_url(query)
}

#[derive(Debug, Default)]
pub struct BrowserState {
    pages: Mutex<HashMap<String, PageScript>>,
    nav_delay: Mutex<Duration>,
    pub opened: AtomicUsize,
    pub closed: AtomicUsize,
    open_now: AtomicUsize,
    pub max_open: AtomicUsize,
    pub evaluations: AtomicUsize,
    pub visits: Mutex<Vec<String>>,
}

impl BrowserState {
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn max_open(&self) -> usize {
        self.max_open.load(Ordering::SeqCst)
    }

    pub fn visits(&self) -> Vec<String> {
        self.visits.lock().unwrap().clone()
    }
}

/// Scripted browser; clones share state
#[derive(Debug, Clone, Default)]
pub struct FakeBrowser {
    pub state: Arc<BrowserState>,
}

impl FakeBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(self, url: &str, script: PageScript) -> Self {
        self.state
            .pages
            .lock()
            .unwrap()
            .insert(url.to_string(), script);
        self
    }

    /// Every navigation sleeps this long before resolving
    pub fn nav_delay(self, delay: Duration) -> Self {
        *self.state.nav_delay.lock().unwrap() = delay;
        self
    }
}

impl BrowserDriver for FakeBrowser {
    type Page = FakePage;

    async fn new_page(&self) -> ScrapeResult<FakePage> {
        self.state.opened.fetch_add(1, Ordering::SeqCst);
        let now = self.state.open_now.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.max_open.fetch_max(now, Ordering::SeqCst);
        Ok(FakePage {
            state: Arc::clone(&self.state),
            script: Mutex::new(None),
        })
    }

    async fn close(self) -> ScrapeResult<()> {
        Ok(())
    }
}

pub struct FakePage {
    state: Arc<BrowserState>,
    script: Mutex<Option<PageScript>>,
}

impl FakePage {
    fn script(&self) -> ScrapeResult<PageScript> {
        let script = self.script.lock().unwrap().clone();
        match script {
            Some(script) if script.broken_queries => {
                Err(ScrapeError::Browser("page crashed".to_string()))
            }
            Some(script) => Ok(script),
            None => Err(ScrapeError::Browser("page not navigated".to_string())),
        }
    }
}

impl PageHandle for FakePage {
    async fn goto(&self, url: &str) -> ScrapeResult<()> {
        self.state.visits.lock().unwrap().push(url.to_string());
        let delay = *self.state.nav_delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let script = self.state.pages.lock().unwrap().get(url).cloned();
        let Some(script) = script else {
            return Err(ScrapeError::Navigation {
                url: url.to_string(),
                message: "net::ERR_NAME_NOT_RESOLVED".to_string(),
            });
        };

        match script.nav {
            Nav::Ok => {
                *self.script.lock().unwrap() = Some(script);
                Ok(())
            }
            Nav::Fail => Err(ScrapeError::Navigation {
                url: url.to_string(),
                message: "net::ERR_CONNECTION_RESET".to_string(),
            }),
            Nav::Hang => std::future::pending().await,
        }
    }

    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> ScrapeResult<()> {
        if self.script()?.matches(selector) > 0 {
            Ok(())
        } else {
            Err(ScrapeError::SelectorNotFound {
                selector: selector.to_string(),
                timeout,
            })
        }
    }

    async fn count(&self, selector: &str) -> ScrapeResult<usize> {
        Ok(self.script()?.matches(selector))
    }

    async fn attribute(&self, selector: &str, name: &str) -> ScrapeResult<Option<String>> {
        Ok(self
            .script()?
            .attributes
            .get(&(selector.to_string(), name.to_string()))
            .and_then(|values| values.first().cloned()))
    }

    async fn attributes(&self, selector: &str, name: &str) -> ScrapeResult<Vec<String>> {
        Ok(self
            .script()?
            .attributes
            .get(&(selector.to_string(), name.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    async fn text_content(&self, selector: &str) -> ScrapeResult<Option<String>> {
        let script = self.script()?;
        Ok(script
            .texts
            .get(selector)
            .or_else(|| script.hidden_texts.get(selector))
            .cloned())
    }

    async fn inner_text(&self, selector: &str) -> ScrapeResult<Option<String>> {
        Ok(self.script()?.texts.get(selector).cloned())
    }

    async fn content(&self) -> ScrapeResult<String> {
        Ok(self.script()?.markup)
    }

    async fn evaluate(&self, _script: &str) -> ScrapeResult<serde_json::Value> {
        self.state.evaluations.fetch_add(1, Ordering::SeqCst);
        Ok(serde_json::Value::from(1200))
    }

    async fn close(self) -> ScrapeResult<()> {
        self.state.closed.fetch_add(1, Ordering::SeqCst);
        self.state.open_now.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Hands out clones of one `FakeBrowser`; selected launches fail
#[derive(Debug, Default)]
pub struct FakeLauncher {
    pub browser: FakeBrowser,
    failing_launches: HashSet<usize>,
    pub launches: AtomicUsize,
}

impl FakeLauncher {
    pub fn new(browser: FakeBrowser) -> Self {
        Self {
            browser,
            ..Self::default()
        }
    }

    /// Make the `n`th launch (1-based) fail
    pub fn fail_launch(mut self, n: usize) -> Self {
        self.failing_launches.insert(n);
        self
    }

    pub fn state(&self) -> Arc<BrowserState> {
        Arc::clone(&self.browser.state)
    }
}

impl BrowserLauncher for FakeLauncher {
    type Browser = FakeBrowser;

    async fn launch(&self) -> ScrapeResult<FakeBrowser> {
        let n = self.launches.fetch_add(1, Ordering::SeqCst) + 1;
        if self.failing_launches.contains(&n) {
            return Err(ScrapeError::Browser("Failed to launch browser".to_string()));
        }
        Ok(self.browser.clone())
    }
}

/// Summarizer that echoes the client name, or fails every call
#[derive(Debug, Default)]
pub struct FakeSummarizer {
    pub fail: bool,
    pub delay: Duration,
    pub calls: AtomicUsize,
    pub in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl FakeSummarizer {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

impl Summarizer for FakeSummarizer {
    async fn summarize(&self, prompt: &str, _options: &GenerationOptions) -> ScrapeResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.fail {
            return Err(ScrapeError::GenerationFailure("provider unavailable".to_string()));
        }
        let client = prompt
            .lines()
            .find_map(|line| line.strip_prefix("Client: "))
            .unwrap_or("?");
        Ok(format!("Hello {client}"))
    }
}

/// Config tuned for fast tests: no settle pause, one scroll cycle
pub fn test_config(queries: &[&str]) -> PipelineConfig {
    PipelineConfig::builder()
        .queries(queries.iter().copied())
        .scroll_count(1)
        .settle_interval(Duration::ZERO)
        .heading_wait(Duration::from_millis(10))
        .page_timeout(Duration::from_secs(2))
        .build()
        .unwrap()
}
