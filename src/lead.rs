//! Lead records threaded through every pipeline stage
//!
//! Every field is always present: either a concrete value or `Field::Unknown`.
//! Each stage owns one group of fields. The detail stage creates the record,
//! later stages attach their own group through `with_*` methods and can only
//! read what earlier stages wrote.

use serde::{Deserialize, Serialize};

use crate::error::ScrapeError;

/// A value that is either known or explicitly unknown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum Field<T> {
    Known(T),
    #[default]
    Unknown,
}

impl<T> Field<T> {
    #[must_use]
    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }

    #[must_use]
    pub fn as_known(&self) -> Option<&T> {
        match self {
            Self::Known(v) => Some(v),
            Self::Unknown => None,
        }
    }

    #[must_use]
    pub fn known_or(self, fallback: T) -> T {
        match self {
            Self::Known(v) => v,
            Self::Unknown => fallback,
        }
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Unknown, Self::Known)
    }
}

impl Field<String> {
    /// Render for tabular output, substituting `sentinel` when unknown
    #[must_use]
    pub fn render(&self, sentinel: &str) -> String {
        match self {
            Self::Known(v) => v.clone(),
            Self::Unknown => sentinel.to_string(),
        }
    }
}

/// Outcome of one page visit
///
/// Produced by `PageSession::with_page`; never panics past its producer.
#[derive(Debug)]
pub enum FetchOutcome<T> {
    Success(T),
    Failed(ScrapeError),
}

impl<T> FetchOutcome<T> {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Discard the failure reason
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Success(v) => Some(v),
            Self::Failed(_) => None,
        }
    }
}

/// Who the business is and where it was found
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: Field<String>,
    pub detail_url: String,
    pub query: String,
}

/// How to reach the business
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Contact {
    pub website: Field<String>,
    pub phone: Field<String>,
}

/// Public rating summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Reputation {
    /// Raw rating text such as "4.8"
    pub rating: Field<String>,
    pub review_count: u64,
}

/// Marketing technology signals detected on the business website
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Signals {
    pub missing_pixel: Field<bool>,
    pub missing_analytics: Field<bool>,
    pub mobile_friendly: Field<bool>,
    pub excerpt: Field<String>,
}

impl Signals {
    /// Safe values used when the website is absent or could not be visited
    #[must_use]
    pub fn degraded() -> Self {
        Self {
            missing_pixel: Field::Known(true),
            missing_analytics: Field::Known(true),
            mobile_friendly: Field::Known(false),
            excerpt: Field::Known(String::new()),
        }
    }

    /// Whether the enrichment stage has run for this lead
    #[must_use]
    pub fn is_enriched(&self) -> bool {
        self.missing_pixel.is_known()
    }
}

/// Fields the detail stage extracts from one listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailFields {
    pub name: Field<String>,
    pub contact: Contact,
    pub reputation: Reputation,
}

/// Per-business aggregate accumulated across fetch, enrichment and generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadRecord {
    identity: Identity,
    contact: Contact,
    reputation: Reputation,
    signals: Signals,
    opener: Field<String>,
}

impl LeadRecord {
    /// Create a record from a successful detail fetch
    #[must_use]
    pub fn from_detail(detail_url: impl Into<String>, query: impl Into<String>, fields: DetailFields) -> Self {
        Self {
            identity: Identity {
                name: fields.name,
                detail_url: detail_url.into(),
                query: query.into(),
            },
            contact: fields.contact,
            reputation: fields.reputation,
            signals: Signals::default(),
            opener: Field::Unknown,
        }
    }

    /// Attach enrichment signals. Only the enrichment stage calls this.
    #[must_use]
    pub fn with_signals(mut self, signals: Signals) -> Self {
        self.signals = signals;
        self
    }

    /// Attach the generated opener. Only the generation stage calls this.
    #[must_use]
    pub fn with_opener(mut self, opener: impl Into<String>) -> Self {
        self.opener = Field::Known(opener.into());
        self
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn contact(&self) -> &Contact {
        &self.contact
    }

    pub fn reputation(&self) -> &Reputation {
        &self.reputation
    }

    pub fn signals(&self) -> &Signals {
        &self.signals
    }

    pub fn opener(&self) -> &Field<String> {
        &self.opener
    }
}
