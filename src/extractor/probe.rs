//! Selector probes and ordered fallback chains

use tracing::trace;

use crate::browser::PageHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Text,
    Attribute(&'static str),
}

/// One way of reading a string out of the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Probe {
    selector: &'static str,
    source: Source,
    strip_prefix: Option<&'static str>,
}

impl Probe {
    /// `textContent` of the first match
    #[must_use]
    pub const fn text(selector: &'static str) -> Self {
        Self {
            selector,
            source: Source::Text,
            strip_prefix: None,
        }
    }

    /// Named attribute of the first match
    #[must_use]
    pub const fn attribute(selector: &'static str, name: &'static str) -> Self {
        Self {
            selector,
            source: Source::Attribute(name),
            strip_prefix: None,
        }
    }

    /// Remove a leading label such as `"Phone: "` from the value
    #[must_use]
    pub const fn strip(mut self, prefix: &'static str) -> Self {
        self.strip_prefix = Some(prefix);
        self
    }

    #[must_use]
    pub fn selector(&self) -> &'static str {
        self.selector
    }

    /// Read the probe, returning `None` for no match, blank values or page errors
    pub async fn read<P: PageHandle>(&self, page: &P) -> Option<String> {
        let raw = match self.source {
            Source::Text => page.text_content(self.selector).await,
            Source::Attribute(name) => page.attribute(self.selector, name).await,
        };

        let raw = match raw {
            Ok(value) => value?,
            Err(e) => {
                trace!("Probe '{}' failed: {e}", self.selector);
                return None;
            }
        };

        let value = match self.strip_prefix {
            Some(prefix) => raw.trim().strip_prefix(prefix).unwrap_or(raw.trim()),
            None => raw.trim(),
        }
        .trim();

        (!value.is_empty()).then(|| value.to_string())
    }
}

/// First non-empty value produced by `probes`, tried in order
pub async fn first_match<P: PageHandle>(page: &P, probes: &[Probe]) -> Option<String> {
    for probe in probes {
        if let Some(value) = probe.read(page).await {
            return Some(value);
        }
    }
    None
}
