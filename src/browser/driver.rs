//! Browser automation boundary
//!
//! The orchestration layer only talks to these traits. `ChromiumBrowser`
//! implements them over chromiumoxide; tests provide a scripted fake.

#![allow(async_fn_in_trait)]

use std::time::Duration;

use crate::error::ScrapeResult;

/// One browser instance plus its shared browsing context
///
/// Shared read-only across all concurrent tasks of a phase. Every task opens
/// its own tab through `new_page` and owns it exclusively.
pub trait BrowserDriver {
    type Page: PageHandle;

    /// Open a new blank tab
    async fn new_page(&self) -> ScrapeResult<Self::Page>;

    /// Close the browser and release its resources
    async fn close(self) -> ScrapeResult<()>;
}

/// Produces one browser per phase
pub trait BrowserLauncher {
    type Browser: BrowserDriver;

    async fn launch(&self) -> ScrapeResult<Self::Browser>;
}

/// Capability set of a single open tab
///
/// Selector queries return `Ok(None)` / `Ok(0)` / empty vectors when nothing
/// matches. `Err` is reserved for communication failures.
pub trait PageHandle {
    /// Navigate and wait for the "content parsed" readiness signal
    ///
    /// Unbounded; `PageSession` applies the navigation deadline.
    async fn goto(&self, url: &str) -> ScrapeResult<()>;

    /// Wait until at least one element matches `selector`
    ///
    /// Fails with `ScrapeError::SelectorNotFound` when the deadline passes.
    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> ScrapeResult<()>;

    /// Number of elements matching `selector`
    async fn count(&self, selector: &str) -> ScrapeResult<usize>;

    /// Attribute of the first element matching `selector`
    async fn attribute(&self, selector: &str, name: &str) -> ScrapeResult<Option<String>>;

    /// Attribute of every element matching `selector`, in document order
    async fn attributes(&self, selector: &str, name: &str) -> ScrapeResult<Vec<String>>;

    /// `textContent` of the first element matching `selector`
    async fn text_content(&self, selector: &str) -> ScrapeResult<Option<String>>;

    /// Rendered `innerText` of the first element matching `selector`
    async fn inner_text(&self, selector: &str) -> ScrapeResult<Option<String>>;

    /// Serialized markup of the whole document
    async fn content(&self) -> ScrapeResult<String>;

    /// Evaluate a script in the page, returning its JSON result
    async fn evaluate(&self, script: &str) -> ScrapeResult<serde_json::Value>;

    /// Close the tab
    async fn close(self) -> ScrapeResult<()>;
}
