//! Technology signals and text excerpt from a business website

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use super::parse::normalize_excerpt;
use super::FieldExtractor;
use crate::browser::PageHandle;
use crate::lead::{Field, Signals};

static PIXEL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)fbevents\.js|fbq\(").expect("Invalid pixel marker regex"));

static ANALYTICS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)gtag|analytics\.js|googletagmanager").expect("Invalid analytics marker regex")
});

/// Whether a script marker appears anywhere in the page markup
#[derive(Debug, Clone, Copy)]
pub struct MarkupSignal {
    pattern: &'static Regex,
}

impl MarkupSignal {
    /// Facebook pixel loader or `fbq(` calls
    #[must_use]
    pub fn pixel() -> Self {
        Self {
            pattern: &PIXEL_PATTERN,
        }
    }

    /// Google Analytics, gtag or Tag Manager
    #[must_use]
    pub fn analytics() -> Self {
        Self {
            pattern: &ANALYTICS_PATTERN,
        }
    }

    #[must_use]
    pub fn matches(&self, markup: &str) -> bool {
        self.pattern.is_match(markup)
    }
}

impl FieldExtractor for MarkupSignal {
    type Value = bool;

    async fn extract<P: PageHandle>(&self, page: &P) -> Option<bool> {
        match page.content().await {
            Ok(markup) => Some(self.matches(&markup)),
            Err(e) => {
                trace!("Could not read markup: {e}");
                None
            }
        }
    }
}

/// Presence of a viewport meta declaration
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewportSignal;

impl FieldExtractor for ViewportSignal {
    type Value = bool;

    async fn extract<P: PageHandle>(&self, page: &P) -> Option<bool> {
        page.count(r#"meta[name="viewport"]"#)
            .await
            .map(|n| n > 0)
            .ok()
    }
}

/// Visible body text, flattened and capped
#[derive(Debug, Clone, Copy, Default)]
pub struct ExcerptExtractor;

impl FieldExtractor for ExcerptExtractor {
    type Value = String;

    async fn extract<P: PageHandle>(&self, page: &P) -> Option<String> {
        match page.inner_text("body").await {
            Ok(text) => Some(normalize_excerpt(text.as_deref().unwrap_or_default())),
            Err(e) => {
                trace!("Could not read body text: {e}");
                Some(String::new())
            }
        }
    }
}

/// Every signal extractor, run together against one website
#[derive(Debug, Clone, Copy)]
pub struct SignalExtractor {
    pub pixel: MarkupSignal,
    pub analytics: MarkupSignal,
    pub viewport: ViewportSignal,
    pub excerpt: ExcerptExtractor,
}

impl Default for SignalExtractor {
    fn default() -> Self {
        Self {
            pixel: MarkupSignal::pixel(),
            analytics: MarkupSignal::analytics(),
            viewport: ViewportSignal,
            excerpt: ExcerptExtractor,
        }
    }
}

impl SignalExtractor {
    /// Extract all signals. Anything unreadable takes its degraded value.
    pub async fn extract_all<P: PageHandle>(&self, page: &P) -> Signals {
        let (pixel, analytics, viewport, excerpt) = futures::join!(
            self.pixel.extract(page),
            self.analytics.extract(page),
            self.viewport.extract(page),
            self.excerpt.extract(page),
        );

        Signals {
            missing_pixel: Field::Known(!pixel.unwrap_or(false)),
            missing_analytics: Field::Known(!analytics.unwrap_or(false)),
            mobile_friendly: Field::Known(viewport.unwrap_or(false)),
            excerpt: Field::Known(excerpt.unwrap_or_default()),
        }
    }
}
