//! chromiumoxide implementation of the browser boundary

use chromiumoxide::browser::Browser;
use chromiumoxide::cdp::browser_protocol::page::NavigateParams;
use chromiumoxide::page::Page;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::cleanup::{CleanupResult, cleanup_browser_and_data};
use super::driver::{BrowserDriver, BrowserLauncher, PageHandle};
use super::scripts;
use super::setup::launch_browser;
use crate::error::{ScrapeError, ScrapeResult};
use crate::utils::constants::POLL_INTERVAL;

/// Launches one headless Chromium per phase
#[derive(Debug, Clone)]
pub struct ChromiumLauncher {
    headless: bool,
}

impl ChromiumLauncher {
    #[must_use]
    pub fn new(headless: bool) -> Self {
        Self { headless }
    }
}

impl BrowserLauncher for ChromiumLauncher {
    type Browser = ChromiumBrowser;

    async fn launch(&self) -> ScrapeResult<ChromiumBrowser> {
        let user_data_dir =
            std::env::temp_dir().join(format!("kodegen_leadscrape_{}", Uuid::new_v4()));
        let (browser, handler) = launch_browser(self.headless, user_data_dir.clone())
            .await
            .map_err(|e| ScrapeError::Browser(format!("{e:#}")))?;
        info!("Browser launched (headless={})", self.headless);
        Ok(ChromiumBrowser {
            browser,
            handler,
            user_data_dir: Some(user_data_dir),
        })
    }
}

/// A running Chromium process with its CDP handler task
pub struct ChromiumBrowser {
    browser: Browser,
    handler: JoinHandle<()>,
    user_data_dir: Option<PathBuf>,
}

impl BrowserDriver for ChromiumBrowser {
    type Page = ChromiumPage;

    async fn new_page(&self) -> ScrapeResult<ChromiumPage> {
        let page = self.browser.new_page("about:blank").await?;
        Ok(ChromiumPage { page })
    }

    async fn close(mut self) -> ScrapeResult<()> {
        let Some(dir) = self.user_data_dir.take() else {
            return Ok(());
        };
        let result = cleanup_browser_and_data(&mut self.browser, &dir).await;
        // Handler must outlive browser.close(), otherwise the CDP reply is lost
        self.handler.abort();
        match result {
            CleanupResult::Success => {
                debug!("Browser and profile cleanup completed");
                Ok(())
            }
            CleanupResult::PartialFailure(errors) => {
                warn!("Browser cleanup completed with failures: {errors:?}");
                Err(ScrapeError::Browser(errors.join("; ")))
            }
        }
    }
}

impl Drop for ChromiumBrowser {
    fn drop(&mut self) {
        self.handler.abort();
        if let Some(dir) = self.user_data_dir.take() {
            warn!("ChromiumBrowser dropped without close(), removing {}", dir.display());
            if let Err(e) = std::fs::remove_dir_all(&dir) {
                warn!("Failed to remove profile directory {}: {e}", dir.display());
            }
        }
    }
}

#[derive(Deserialize)]
struct ReadyState {
    state: String,
    href: String,
}

#[derive(Deserialize)]
struct Nullable<T> {
    value: Option<T>,
}

/// One chromiumoxide tab
pub struct ChromiumPage {
    page: Page,
}

impl ChromiumPage {
    async fn eval_into<T: DeserializeOwned>(&self, script: &str) -> ScrapeResult<T> {
        self.page
            .evaluate(script)
            .await?
            .into_value::<T>()
            .map_err(ScrapeError::browser)
    }

    async fn navigate_and_wait(&self, url: &str) -> ScrapeResult<()> {
        let response = self
            .page
            .execute(NavigateParams::new(url))
            .await
            .map_err(|e| ScrapeError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        if let Some(error_text) = response.result.error_text.as_ref() {
            return Err(ScrapeError::Navigation {
                url: url.to_string(),
                message: error_text.clone(),
            });
        }

        // "interactive" is DOMContentLoaded; subresources may still be loading
        loop {
            if let Ok(ready) = self.eval_into::<ReadyState>(scripts::READY_STATE_SCRIPT).await
                && ready.href != "about:blank"
                && matches!(ready.state.as_str(), "interactive" | "complete")
            {
                return Ok(());
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}

impl PageHandle for ChromiumPage {
    async fn goto(&self, url: &str) -> ScrapeResult<()> {
        self.navigate_and_wait(url).await
    }

    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> ScrapeResult<()> {
        let start = Instant::now();
        loop {
            if self.count(selector).await.unwrap_or(0) > 0 {
                debug!("'{selector}' appeared after {:?}", start.elapsed());
                return Ok(());
            }
            if start.elapsed() >= timeout {
                return Err(ScrapeError::SelectorNotFound {
                    selector: selector.to_string(),
                    timeout,
                });
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn count(&self, selector: &str) -> ScrapeResult<usize> {
        self.eval_into(&scripts::count(selector)).await
    }

    async fn attribute(&self, selector: &str, name: &str) -> ScrapeResult<Option<String>> {
        let found: Nullable<String> = self
            .eval_into(&scripts::first_attribute(selector, name))
            .await?;
        Ok(found.value)
    }

    async fn attributes(&self, selector: &str, name: &str) -> ScrapeResult<Vec<String>> {
        self.eval_into(&scripts::all_attributes(selector, name)).await
    }

    async fn text_content(&self, selector: &str) -> ScrapeResult<Option<String>> {
        let found: Nullable<String> = self.eval_into(&scripts::text_content(selector)).await?;
        Ok(found.value)
    }

    async fn inner_text(&self, selector: &str) -> ScrapeResult<Option<String>> {
        let found: Nullable<String> = self.eval_into(&scripts::inner_text(selector)).await?;
        Ok(found.value)
    }

    async fn content(&self) -> ScrapeResult<String> {
        Ok(self.page.content().await?)
    }

    async fn evaluate(&self, script: &str) -> ScrapeResult<serde_json::Value> {
        self.eval_into(script).await
    }

    async fn close(self) -> ScrapeResult<()> {
        Ok(self.page.close().await?)
    }
}
