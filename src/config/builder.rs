//! Type-safe builder for `PipelineConfig` using the typestate pattern
//!
//! `build()` only exists once queries have been supplied, and validates
//! every numeric bound before handing out a config.

use std::marker::PhantomData;
use std::path::PathBuf;
use std::time::Duration;

use super::types::PipelineConfig;
use crate::error::{ScrapeError, ScrapeResult};
use crate::utils::{
    DEFAULT_MAX_CONCURRENT_PAGES, DEFAULT_MODEL, DEFAULT_OUTPUT_FILE, DEFAULT_SCROLL_COUNT,
    FEED_WAIT_TIMEOUT, GENERATION_CONCURRENCY, GENERATION_MAX_TOKENS, GENERATION_TEMPERATURE,
    GENERATION_TIMEOUT, HEADING_WAIT_TIMEOUT, LISTING_NAVIGATION_TIMEOUT, MAX_CANDIDATES,
    MAX_CONCURRENT_PAGES_LIMIT, MAX_SCROLL_COUNT, PAGE_VISIT_TIMEOUT, SCROLL_SETTLE_INTERVAL,
};

// Type states for the builder
pub struct WithQueries;

pub struct PipelineConfigBuilder<State = ()> {
    pub(crate) queries: Vec<String>,
    pub(crate) headless: bool,
    pub(crate) max_concurrent_pages: usize,
    pub(crate) scroll_count: u32,
    pub(crate) settle_interval: Duration,
    pub(crate) feed_wait_timeout: Duration,
    pub(crate) listing_timeout: Duration,
    pub(crate) page_timeout: Duration,
    pub(crate) heading_wait: Duration,
    pub(crate) max_candidates: usize,
    pub(crate) generation_concurrency: usize,
    pub(crate) generation_timeout: Duration,
    pub(crate) max_tokens: u32,
    pub(crate) temperature: f32,
    pub(crate) model: String,
    pub(crate) api_key: Option<String>,
    pub(crate) output_path: PathBuf,
    pub(crate) _phantom: PhantomData<State>,
}

impl Default for PipelineConfigBuilder<()> {
    fn default() -> Self {
        Self {
            queries: Vec::new(),
            headless: true,
            max_concurrent_pages: DEFAULT_MAX_CONCURRENT_PAGES,
            scroll_count: DEFAULT_SCROLL_COUNT,
            settle_interval: SCROLL_SETTLE_INTERVAL,
            feed_wait_timeout: FEED_WAIT_TIMEOUT,
            listing_timeout: LISTING_NAVIGATION_TIMEOUT,
            page_timeout: PAGE_VISIT_TIMEOUT,
            heading_wait: HEADING_WAIT_TIMEOUT,
            max_candidates: MAX_CANDIDATES,
            generation_concurrency: GENERATION_CONCURRENCY,
            generation_timeout: GENERATION_TIMEOUT,
            max_tokens: GENERATION_MAX_TOKENS,
            temperature: GENERATION_TEMPERATURE,
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            _phantom: PhantomData,
        }
    }
}

impl PipelineConfig {
    /// Create a builder for configuring a `PipelineConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> PipelineConfigBuilder<()> {
        PipelineConfigBuilder::default()
    }
}

impl PipelineConfigBuilder<()> {
    /// Set the searches to run. Required.
    pub fn queries<I, S>(self, queries: I) -> PipelineConfigBuilder<WithQueries>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PipelineConfigBuilder {
            queries: queries.into_iter().map(Into::into).collect(),
            headless: self.headless,
            max_concurrent_pages: self.max_concurrent_pages,
            scroll_count: self.scroll_count,
            settle_interval: self.settle_interval,
            feed_wait_timeout: self.feed_wait_timeout,
            listing_timeout: self.listing_timeout,
            page_timeout: self.page_timeout,
            heading_wait: self.heading_wait,
            max_candidates: self.max_candidates,
            generation_concurrency: self.generation_concurrency,
            generation_timeout: self.generation_timeout,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            model: self.model,
            api_key: self.api_key,
            output_path: self.output_path,
            _phantom: PhantomData,
        }
    }
}

fn non_zero(name: &str, value: Duration) -> ScrapeResult<Duration> {
    if value.is_zero() {
        return Err(ScrapeError::Config(format!("{name} must be greater than zero")));
    }
    Ok(value)
}

// Build method only available when all required fields are set
impl PipelineConfigBuilder<WithQueries> {
    pub fn build(self) -> ScrapeResult<PipelineConfig> {
        let queries: Vec<String> = self
            .queries
            .into_iter()
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty())
            .collect();
        if queries.is_empty() {
            return Err(ScrapeError::Config(
                "at least one non-blank query is required".to_string(),
            ));
        }

        if !(1..=MAX_CONCURRENT_PAGES_LIMIT).contains(&self.max_concurrent_pages) {
            return Err(ScrapeError::Config(format!(
                "max_concurrent_pages must be between 1 and {MAX_CONCURRENT_PAGES_LIMIT}, got {}",
                self.max_concurrent_pages
            )));
        }

        if self.scroll_count > MAX_SCROLL_COUNT {
            return Err(ScrapeError::Config(format!(
                "scroll_count must be at most {MAX_SCROLL_COUNT}, got {}",
                self.scroll_count
            )));
        }

        if self.max_candidates == 0 {
            return Err(ScrapeError::Config(
                "max_candidates must be at least 1".to_string(),
            ));
        }

        if self.generation_concurrency == 0 {
            return Err(ScrapeError::Config(
                "generation_concurrency must be at least 1".to_string(),
            ));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ScrapeError::Config(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            )));
        }

        if self.model.trim().is_empty() {
            return Err(ScrapeError::Config("model must not be empty".to_string()));
        }

        Ok(PipelineConfig {
            queries,
            headless: self.headless,
            max_concurrent_pages: self.max_concurrent_pages,
            scroll_count: self.scroll_count,
            settle_interval: self.settle_interval,
            feed_wait_timeout: non_zero("feed_wait_timeout", self.feed_wait_timeout)?,
            listing_timeout: non_zero("listing_timeout", self.listing_timeout)?,
            page_timeout: non_zero("page_timeout", self.page_timeout)?,
            heading_wait: self.heading_wait,
            max_candidates: self.max_candidates,
            generation_concurrency: self.generation_concurrency,
            generation_timeout: non_zero("generation_timeout", self.generation_timeout)?,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            model: self.model,
            api_key: self.api_key.filter(|k| !k.trim().is_empty()),
            output_path: self.output_path,
        })
    }
}
