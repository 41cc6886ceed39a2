//! Candidate link harvesting on the listing view

use tracing::trace;

use super::FieldExtractor;
use crate::browser::PageHandle;

/// Results container on the listing view
pub const FEED_SELECTOR: &str = r#"div[role="feed"]"#;

/// Detail-page anchors inside the results container
pub const PLACE_LINK_SELECTOR: &str = r#"div[role="feed"] a[href*="/maps/place/"]"#;

/// Raw `href` of every detail-page anchor, in document order
#[derive(Debug, Clone, Copy, Default)]
pub struct ListingLinks;

impl FieldExtractor for ListingLinks {
    type Value = Vec<String>;

    async fn extract<P: PageHandle>(&self, page: &P) -> Option<Vec<String>> {
        match page.attributes(PLACE_LINK_SELECTOR, "href").await {
            Ok(hrefs) => Some(hrefs),
            Err(e) => {
                trace!("Could not harvest listing links: {e}");
                None
            }
        }
    }
}
