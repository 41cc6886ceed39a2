//! Builder methods available for all states
//!
//! This module contains methods that can be called on the builder
//! regardless of its current type state.

use std::path::PathBuf;
use std::time::Duration;

use super::builder::PipelineConfigBuilder;

impl<State> PipelineConfigBuilder<State> {
    /// Run the browser without a visible window (default `true`)
    #[must_use]
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Maximum tabs open at once during the detail and enrichment phases
    ///
    /// Must be between 1 and 50. Default 5.
    #[must_use]
    pub fn max_concurrent_pages(mut self, limit: usize) -> Self {
        self.max_concurrent_pages = limit;
        self
    }

    /// Number of scroll cycles on the results feed (at most 100, default 10)
    #[must_use]
    pub fn scroll_count(mut self, count: u32) -> Self {
        self.scroll_count = count;
        self
    }

    #[must_use]
    pub fn settle_interval(mut self, interval: Duration) -> Self {
        self.settle_interval = interval;
        self
    }

    #[must_use]
    pub fn feed_wait_timeout(mut self, timeout: Duration) -> Self {
        self.feed_wait_timeout = timeout;
        self
    }

    #[must_use]
    pub fn listing_timeout(mut self, timeout: Duration) -> Self {
        self.listing_timeout = timeout;
        self
    }

    /// Navigation budget for each detail page and business website
    #[must_use]
    pub fn page_timeout(mut self, timeout: Duration) -> Self {
        self.page_timeout = timeout;
        self
    }

    #[must_use]
    pub fn heading_wait(mut self, wait: Duration) -> Self {
        self.heading_wait = wait;
        self
    }

    #[must_use]
    pub fn max_candidates(mut self, max: usize) -> Self {
        self.max_candidates = max;
        self
    }

    #[must_use]
    pub fn generation_concurrency(mut self, limit: usize) -> Self {
        self.generation_concurrency = limit;
        self
    }

    #[must_use]
    pub fn generation_timeout(mut self, timeout: Duration) -> Self {
        self.generation_timeout = timeout;
        self
    }

    #[must_use]
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    #[must_use]
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Credential for the summarization provider. Blank keys are treated as absent.
    #[must_use]
    pub fn api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key;
        self
    }

    /// Output file; the extension selects the sink (`.json` or CSV)
    #[must_use]
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }
}
