//! Pure parsers for extracted strings

use crate::lead::Field;
use crate::utils::EXCERPT_MAX_CHARS;

const STARS_TOKEN: &str = " stars ";

/// Parse an accessible rating label of the form `"4.8 stars 120 Reviews"`.
///
/// Returns the raw rating text and the review count. An absent or unparseable
/// label gives `(Field::Unknown, 0)`. Thousands separators are stripped.
#[must_use]
pub fn parse_rating_label(label: Option<&str>) -> (Field<String>, u64) {
    let Some((rating, rest)) = label.and_then(|l| l.split_once(STARS_TOKEN)) else {
        return (Field::Unknown, 0);
    };

    let rating = rating.trim();
    let rating = if rating.is_empty() {
        Field::Unknown
    } else {
        Field::Known(rating.to_string())
    };

    let reviews = rest
        .replace("Reviews", "")
        .replace("reviews", "")
        .replace(',', "");
    let reviews = reviews.trim().parse::<u64>().unwrap_or(0);

    (rating, reviews)
}

/// Cut page text down to an excerpt: first 1000 characters, newlines as spaces, trimmed
#[must_use]
pub fn normalize_excerpt(raw: &str) -> String {
    raw.chars()
        .take(EXCERPT_MAX_CHARS)
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect::<String>()
        .trim()
        .to_string()
}
