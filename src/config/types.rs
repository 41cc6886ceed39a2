//! Core configuration type for a lead collection run

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Validated parameters for one pipeline run
///
/// Built through `PipelineConfig::builder()`; every field has been checked by
/// the time the pipeline sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Free-text searches, processed in order. Never empty.
    pub(crate) queries: Vec<String>,
    pub(crate) headless: bool,

    /// Admission limit shared by the detail and enrichment phases
    pub(crate) max_concurrent_pages: usize,

    /// Incremental-load cycles on each listing view
    pub(crate) scroll_count: u32,
    pub(crate) settle_interval: Duration,
    pub(crate) feed_wait_timeout: Duration,
    pub(crate) listing_timeout: Duration,

    /// Navigation budget for detail pages and business websites
    pub(crate) page_timeout: Duration,
    pub(crate) heading_wait: Duration,

    /// Candidates kept per query after deduplication
    pub(crate) max_candidates: usize,

    pub(crate) generation_concurrency: usize,
    pub(crate) generation_timeout: Duration,
    pub(crate) max_tokens: u32,
    pub(crate) temperature: f32,
    pub(crate) model: String,

    #[serde(skip_serializing, default)]
    pub(crate) api_key: Option<String>,

    pub(crate) output_path: PathBuf,
}
