//! Shared configuration constants for leadscrape
//!
//! Default values used by `PipelineConfig` and the browser driver.

use std::time::Duration;

/// Default maximum number of concurrently open tabs per phase
pub const DEFAULT_MAX_CONCURRENT_PAGES: usize = 5;

/// Hard upper bound accepted for `max_concurrent_pages`
///
/// Each tab costs a renderer process; past this the browser itself becomes the bottleneck.
pub const MAX_CONCURRENT_PAGES_LIMIT: usize = 50;

/// Default number of incremental-load scroll cycles on the results feed
pub const DEFAULT_SCROLL_COUNT: u32 = 10;

/// Upper bound accepted for `scroll_count`
pub const MAX_SCROLL_COUNT: u32 = 100;

/// Pause after each scroll before the next one
pub const SCROLL_SETTLE_INTERVAL: Duration = Duration::from_secs(2);

/// How long to wait for the results feed to appear
pub const FEED_WAIT_TIMEOUT: Duration = Duration::from_secs(10);

/// Navigation budget for the listing view
pub const LISTING_NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Navigation budget for detail pages and business websites
pub const PAGE_VISIT_TIMEOUT: Duration = Duration::from_secs(15);

/// How long to wait for the detail page heading before falling back
pub const HEADING_WAIT_TIMEOUT: Duration = Duration::from_secs(5);

/// Maximum candidates processed per query
pub const MAX_CANDIDATES: usize = 50;

/// Concurrent requests to the summarization provider
pub const GENERATION_CONCURRENCY: usize = 10;

/// Per-request budget for the summarization provider
pub const GENERATION_TIMEOUT: Duration = Duration::from_secs(30);

pub const GENERATION_MAX_TOKENS: u32 = 60;

pub const GENERATION_TEMPERATURE: f32 = 0.7;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Stored when generation fails for a lead
pub const GENERATION_FALLBACK: &str = "Could not generate.";

/// Characters of homepage text kept on a lead
pub const EXCERPT_MAX_CHARS: usize = 1000;

/// Characters of the excerpt quoted in the generation prompt
pub const PROMPT_EXCERPT_CHARS: usize = 500;

pub const DEFAULT_OUTPUT_FILE: &str = "leads_enriched.csv";

/// Base of the map listing search view
pub const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/";

/// Interval between readiness and selector polls
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// CDP request timeout applied by chromiumoxide
pub const BROWSER_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Chrome user agent string sent by launched browsers
pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.160 Safari/537.36";
