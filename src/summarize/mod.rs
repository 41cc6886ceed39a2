//! Outreach opener generation
//!
//! The pipeline only needs `Summarizer::summarize`; `OpenAiSummarizer` is the
//! production provider. Failures never leave `OpenerGenerator`: they become
//! the fixed fallback text.

#![allow(async_fn_in_trait)]

pub mod generator;
pub mod openai;
pub mod prompt;

pub use generator::OpenerGenerator;
pub use openai::OpenAiSummarizer;
pub use prompt::build_prompt;

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{ScrapeError, ScrapeResult};

/// Per-request generation parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout: Duration,
}

/// Black-box text generation
pub trait Summarizer {
    /// Generate text for `prompt`. Timeouts and provider errors are `GenerationFailure`.
    async fn summarize(&self, prompt: &str, options: &GenerationOptions) -> ScrapeResult<String>;
}

/// Summarizer used when no provider credential is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct Unconfigured;

impl Summarizer for Unconfigured {
    async fn summarize(&self, _prompt: &str, _options: &GenerationOptions) -> ScrapeResult<String> {
        Err(ScrapeError::GenerationFailure(
            "no API key configured".to_string(),
        ))
    }
}

impl<S: Summarizer> Summarizer for &S {
    async fn summarize(&self, prompt: &str, options: &GenerationOptions) -> ScrapeResult<String> {
        (**self).summarize(prompt, options).await
    }
}
