//! Field extraction from loaded pages
//!
//! Each field has its own `FieldExtractor`. Extractors never fail: a missing
//! element, a malformed value or a CDP error all collapse to `None`, and the
//! calling stage substitutes the sentinel.

#![allow(async_fn_in_trait)]

pub mod detail;
pub mod listing;
pub mod parse;
pub mod probe;
pub mod signals;

pub use detail::{
    DetailExtractor, NameExtractor, PhoneExtractor, ReputationExtractor, WebsiteExtractor,
};
pub use listing::ListingLinks;
pub use parse::{normalize_excerpt, parse_rating_label};
pub use probe::{Probe, first_match};
pub use signals::{ExcerptExtractor, MarkupSignal, SignalExtractor, ViewportSignal};

use crate::browser::PageHandle;

/// Pulls one typed value out of a ready page
pub trait FieldExtractor {
    type Value;

    async fn extract<P: PageHandle>(&self, page: &P) -> Option<Self::Value>;
}
