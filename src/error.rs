//! Error types for lead collection and enrichment
//!
//! Per-item failures (`NavigationTimeout`, `ExtractionFailure`, `GenerationFailure`)
//! are converted to sentinel values or record omission at the smallest scope.
//! Only setup failures (browser launch, configuration, sink I/O) reach the caller.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for scraping operations
pub type ScrapeResult<T> = Result<T, ScrapeError>;

/// Error taxonomy for the scraping pipeline
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The readiness signal was not observed before the deadline
    #[error("Navigation to {url} timed out after {timeout:?}")]
    NavigationTimeout { url: String, timeout: Duration },

    /// Navigation raised a network-level error
    #[error("Navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    /// An expected element never appeared. Extractors treat this as "feature absent".
    #[error("Selector '{selector}' not found within {timeout:?}")]
    SelectorNotFound { selector: String, timeout: Duration },

    /// A field was present but malformed
    #[error("Failed to extract {field}: {message}")]
    ExtractionFailure { field: &'static str, message: String },

    /// The external summarizer timed out or returned an error
    #[error("Generation failed: {0}")]
    GenerationFailure(String),

    /// The listing results container never appeared for a query
    #[error("Results feed not found for query '{query}'")]
    FeedNotFound { query: String },

    /// Browser process or CDP communication failure
    #[error("Browser error: {0}")]
    Browser(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV writer error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON encoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScrapeError {
    /// Shorthand for a browser-level failure
    pub fn browser(err: impl std::fmt::Display) -> Self {
        Self::Browser(err.to_string())
    }

    /// Whether this error means the page never became ready
    #[must_use]
    pub fn is_navigation_failure(&self) -> bool {
        matches!(self, Self::NavigationTimeout { .. } | Self::Navigation { .. })
    }
}

impl From<chromiumoxide::error::CdpError> for ScrapeError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        Self::Browser(err.to_string())
    }
}
