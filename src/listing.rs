//! Listing view collection for one query
//!
//! Opens the search view, waits for the results feed, scrolls it a fixed
//! number of times at a constant pace, then harvests and deduplicates the
//! detail-page links. Scrolling is not adaptive: under- or over-collection
//! is accepted.

use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::browser::{BrowserDriver, PageHandle, scripts};
use crate::config::PipelineConfig;
use crate::error::ScrapeError;
use crate::extractor::listing::FEED_SELECTOR;
use crate::extractor::{FieldExtractor, ListingLinks};
use crate::lead::FetchOutcome;
use crate::session::with_page;
use crate::utils::{search_url, strip_query};

const MAPS_ORIGIN: &str = "https://www.google.com";

/// Canonical detail-page locators for one query, in discovery order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
    pub query: String,
    pub locators: Vec<String>,
}

impl CandidateSet {
    #[must_use]
    pub fn empty(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            locators: Vec::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.locators.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locators.is_empty()
    }
}

/// Canonicalise, deduplicate and cap harvested links.
///
/// Links are keyed on the locator with its query string removed; the first
/// occurrence wins and discovery order is kept.
#[must_use]
pub fn dedupe_candidates<I, S>(hrefs: I, cap: usize) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for href in hrefs {
        let href = href.as_ref().trim();
        if href.is_empty() {
            continue;
        }
        let canonical = strip_query(href);
        let canonical = if canonical.starts_with('/') {
            format!("{MAPS_ORIGIN}{canonical}")
        } else {
            canonical.to_string()
        };
        if seen.insert(canonical.clone()) {
            out.push(canonical);
            if out.len() >= cap {
                break;
            }
        }
    }

    out
}

/// Drives the listing view for one query at a time
#[derive(Debug, Clone)]
pub struct ListingCollector {
    scroll_count: u32,
    settle_interval: Duration,
    feed_wait_timeout: Duration,
    navigation_timeout: Duration,
    max_candidates: usize,
}

impl ListingCollector {
    #[must_use]
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            scroll_count: config.scroll_count(),
            settle_interval: config.settle_interval(),
            feed_wait_timeout: config.feed_wait_timeout(),
            navigation_timeout: config.listing_timeout(),
            max_candidates: config.max_candidates(),
        }
    }

    /// Collect candidates for `query`.
    ///
    /// A missing feed or a failed navigation yields an empty set; neither is
    /// an error at this level.
    pub async fn collect<B: BrowserDriver>(&self, browser: &B, query: &str) -> CandidateSet {
        let url = search_url(query);
        info!("Collecting listings for '{query}'");

        let outcome = with_page(browser, &url, self.navigation_timeout, async |page| {
            if page
                .wait_for_selector(FEED_SELECTOR, self.feed_wait_timeout)
                .await
                .is_err()
            {
                return Err(ScrapeError::FeedNotFound {
                    query: query.to_string(),
                });
            }

            self.scroll_feed(page).await;
            Ok(ListingLinks.extract(page).await.unwrap_or_default())
        })
        .await;

        match outcome {
            FetchOutcome::Success(hrefs) => {
                let harvested = hrefs.len();
                let locators = dedupe_candidates(hrefs, self.max_candidates);
                info!(
                    "Found {} candidates for '{query}' ({harvested} links harvested)",
                    locators.len()
                );
                CandidateSet {
                    query: query.to_string(),
                    locators,
                }
            }
            FetchOutcome::Failed(e @ ScrapeError::FeedNotFound { .. }) => {
                warn!("{e}; skipping query");
                CandidateSet::empty(query)
            }
            FetchOutcome::Failed(e) => {
                warn!("Listing view for '{query}' failed: {e}");
                CandidateSet::empty(query)
            }
        }
    }

    async fn scroll_feed<P: PageHandle>(&self, page: &P) {
        let script = scripts::scroll_to_bottom(FEED_SELECTOR);
        for cycle in 1..=self.scroll_count {
            match page.evaluate(&script).await {
                Ok(height) => debug!("Scroll {cycle}/{}: feed height {height}", self.scroll_count),
                Err(e) => debug!("Scroll {cycle}/{} failed: {e}", self.scroll_count),
            }
            tokio::time::sleep(self.settle_interval).await;
        }
    }
}
