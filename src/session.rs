//! Page session lifecycle
//!
//! One session owns one tab from open to close:
//!
//! ```text
//! Created -> Navigating -> Ready -> Extracting -> Closed
//!                 \                      \
//!                  +--------> Failed <----+
//! ```
//!
//! The tab is closed on every exit path once it has been opened, including
//! when the extraction body returns an error or panics.

use futures::FutureExt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

use crate::browser::{BrowserDriver, PageHandle};
use crate::error::{ScrapeError, ScrapeResult};
use crate::lead::FetchOutcome;

/// Lifecycle state of a `PageSession`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Created,
    Navigating,
    Ready,
    Extracting,
    Closed,
    Failed,
}

/// Bound a navigation future by `timeout`, mapping expiry to `NavigationTimeout`
pub async fn with_page_timeout<F, T>(operation: F, timeout: Duration, url: &str) -> ScrapeResult<T>
where
    F: Future<Output = ScrapeResult<T>>,
{
    match tokio::time::timeout(timeout, operation).await {
        Ok(result) => result,
        Err(_) => Err(ScrapeError::NavigationTimeout {
            url: url.to_string(),
            timeout,
        }),
    }
}

/// A single-tab visit against a shared browser
pub struct PageSession<'b, B: BrowserDriver> {
    browser: &'b B,
    state: SessionState,
}

impl<'b, B: BrowserDriver> PageSession<'b, B> {
    #[must_use]
    pub fn new(browser: &'b B) -> Self {
        Self {
            browser,
            state: SessionState::Created,
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    fn transition(&mut self, next: SessionState) {
        trace!("Page session {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    /// Open a tab, navigate to `locator`, run `body` against the ready page, close the tab.
    ///
    /// Never returns an error: every failure is folded into `FetchOutcome::Failed`.
    pub async fn visit<T, F>(&mut self, locator: &str, timeout: Duration, body: F) -> FetchOutcome<T>
    where
        F: AsyncFnOnce(&B::Page) -> ScrapeResult<T>,
    {
        let started = Instant::now();
        self.transition(SessionState::Navigating);

        let page = match self.browser.new_page().await {
            Ok(page) => page,
            Err(e) => {
                self.transition(SessionState::Failed);
                debug!("Could not open tab for {locator}: {e}");
                return FetchOutcome::Failed(e);
            }
        };

        let result = match with_page_timeout(page.goto(locator), timeout, locator).await {
            Ok(()) => {
                self.transition(SessionState::Ready);
                self.transition(SessionState::Extracting);
                match AssertUnwindSafe(body(&page)).catch_unwind().await {
                    Ok(result) => result,
                    Err(_) => Err(ScrapeError::ExtractionFailure {
                        field: "page",
                        message: "extraction panicked".to_string(),
                    }),
                }
            }
            Err(e) => Err(e),
        };

        if let Err(e) = page.close().await {
            debug!("Failed to close tab for {locator}: {e}");
        }

        match result {
            Ok(value) => {
                self.transition(SessionState::Closed);
                debug!("Visited {locator} in {:?}", started.elapsed());
                FetchOutcome::Success(value)
            }
            Err(e) => {
                self.transition(SessionState::Failed);
                debug!("Visit to {locator} failed after {:?}: {e}", started.elapsed());
                FetchOutcome::Failed(e)
            }
        }
    }
}

/// Run one page visit in a fresh session
pub async fn with_page<B, T, F>(
    browser: &B,
    locator: &str,
    timeout: Duration,
    body: F,
) -> FetchOutcome<T>
where
    B: BrowserDriver,
    F: AsyncFnOnce(&B::Page) -> ScrapeResult<T>,
{
    PageSession::new(browser).visit(locator, timeout, body).await
}
