//! Detail page extractors: name, website, phone, reputation

use std::time::Duration;
use tracing::trace;

use super::parse::parse_rating_label;
use super::probe::{Probe, first_match};
use super::FieldExtractor;
use crate::browser::PageHandle;
use crate::lead::{Contact, DetailFields, Reputation};
use crate::utils::HEADING_WAIT_TIMEOUT;

const NAME_PROBES: &[Probe] = &[
    Probe::text("h1"),
    Probe::attribute(r#"meta[property="og:title"]"#, "content"),
];

const WEBSITE_PROBES: &[Probe] = &[
    Probe::attribute(r#"a[data-item-id="authority"]"#, "href"),
    Probe::attribute(r#"a[aria-label^="Website"]"#, "href"),
];

const PHONE_PROBES: &[Probe] = &[
    Probe::attribute(r#"button[data-item-id^="phone:tel:"]"#, "aria-label").strip("Phone: "),
    Probe::attribute(r#"button[data-item-id^="phone:tel:"]"#, "data-item-id").strip("phone:tel:"),
];

const RATING_PROBES: &[Probe] = &[
    Probe::attribute(r#"span[aria-label*=" stars "][aria-label*=" Reviews"]"#, "aria-label"),
    Probe::attribute(r#"[role="img"][aria-label*=" stars "]"#, "aria-label"),
];

/// Business name from the primary heading
///
/// Waits up to `heading_wait` for the heading to render before probing.
#[derive(Debug, Clone, Copy)]
pub struct NameExtractor {
    heading_wait: Duration,
}

impl NameExtractor {
    #[must_use]
    pub fn new(heading_wait: Duration) -> Self {
        Self { heading_wait }
    }
}

impl Default for NameExtractor {
    fn default() -> Self {
        Self::new(HEADING_WAIT_TIMEOUT)
    }
}

impl FieldExtractor for NameExtractor {
    type Value = String;

    async fn extract<P: PageHandle>(&self, page: &P) -> Option<String> {
        if let Err(e) = page.wait_for_selector("h1", self.heading_wait).await {
            trace!("Heading never rendered: {e}");
        }
        first_match(page, NAME_PROBES).await
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WebsiteExtractor;

impl FieldExtractor for WebsiteExtractor {
    type Value = String;

    async fn extract<P: PageHandle>(&self, page: &P) -> Option<String> {
        first_match(page, WEBSITE_PROBES).await
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PhoneExtractor;

impl FieldExtractor for PhoneExtractor {
    type Value = String;

    async fn extract<P: PageHandle>(&self, page: &P) -> Option<String> {
        first_match(page, PHONE_PROBES).await
    }
}

/// Rating and review count from the star-rating accessible label
#[derive(Debug, Clone, Copy, Default)]
pub struct ReputationExtractor;

impl FieldExtractor for ReputationExtractor {
    type Value = Reputation;

    async fn extract<P: PageHandle>(&self, page: &P) -> Option<Reputation> {
        let label = first_match(page, RATING_PROBES).await;
        let (rating, review_count) = parse_rating_label(label.as_deref());
        Some(Reputation {
            rating,
            review_count,
        })
    }
}

/// Every detail-page extractor, run together against one page
#[derive(Debug, Clone, Copy, Default)]
pub struct DetailExtractor {
    pub name: NameExtractor,
    pub website: WebsiteExtractor,
    pub phone: PhoneExtractor,
    pub reputation: ReputationExtractor,
}

impl DetailExtractor {
    #[must_use]
    pub fn with_heading_wait(heading_wait: Duration) -> Self {
        Self {
            name: NameExtractor::new(heading_wait),
            ..Self::default()
        }
    }

    /// Extract the identity, contact and reputation groups
    pub async fn extract_all<P: PageHandle>(&self, page: &P) -> DetailFields {
        let (name, website, phone, reputation) = futures::join!(
            self.name.extract(page),
            self.website.extract(page),
            self.phone.extract(page),
            self.reputation.extract(page),
        );

        DetailFields {
            name: name.into(),
            contact: Contact {
                website: website.into(),
                phone: phone.into(),
            },
            reputation: reputation.unwrap_or_default(),
        }
    }
}
