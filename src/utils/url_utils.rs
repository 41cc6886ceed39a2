//! Locator helpers: search URLs, canonical detail locators, website normalisation

use super::constants::MAPS_SEARCH_URL;

/// Build the listing view URL for a free-text query.
///
/// Spaces become `+`, everything else reserved is percent-encoded.
#[must_use]
pub fn search_url(query: &str) -> String {
    let encoded = query
        .split(' ')
        .map(|part| urlencoding::encode(part).into_owned())
        .collect::<Vec<_>>()
        .join("+");
    format!("{MAPS_SEARCH_URL}{encoded}")
}

/// Canonical form of a detail-page locator: everything from the first `?` is dropped
#[must_use]
pub fn strip_query(locator: &str) -> &str {
    locator.split_once('?').map_or(locator, |(base, _)| base)
}

/// Prefix `https://` onto website locators that carry no scheme
#[must_use]
pub fn normalize_website(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with("http") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

/// Check if a locator is a navigable http(s) URL
#[must_use]
pub fn is_valid_url(url: &str) -> bool {
    match url::Url::parse(url) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https") && parsed.host_str().is_some(),
        Err(_) => false,
    }
}
