//! Getter methods for `PipelineConfig`

use std::path::Path;
use std::time::Duration;

use super::types::PipelineConfig;
use crate::summarize::GenerationOptions;

impl PipelineConfig {
    #[must_use]
    pub fn queries(&self) -> &[String] {
        &self.queries
    }

    #[must_use]
    pub fn headless(&self) -> bool {
        self.headless
    }

    #[must_use]
    pub fn max_concurrent_pages(&self) -> usize {
        self.max_concurrent_pages
    }

    #[must_use]
    pub fn scroll_count(&self) -> u32 {
        self.scroll_count
    }

    #[must_use]
    pub fn settle_interval(&self) -> Duration {
        self.settle_interval
    }

    #[must_use]
    pub fn feed_wait_timeout(&self) -> Duration {
        self.feed_wait_timeout
    }

    #[must_use]
    pub fn listing_timeout(&self) -> Duration {
        self.listing_timeout
    }

    #[must_use]
    pub fn page_timeout(&self) -> Duration {
        self.page_timeout
    }

    #[must_use]
    pub fn heading_wait(&self) -> Duration {
        self.heading_wait
    }

    #[must_use]
    pub fn max_candidates(&self) -> usize {
        self.max_candidates
    }

    #[must_use]
    pub fn generation_concurrency(&self) -> usize {
        self.generation_concurrency
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    #[must_use]
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Per-request parameters handed to the summarizer
    #[must_use]
    pub fn generation_options(&self) -> GenerationOptions {
        GenerationOptions {
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            timeout: self.generation_timeout,
        }
    }
}
