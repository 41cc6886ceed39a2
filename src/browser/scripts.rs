//! JavaScript snippets evaluated in the page
//!
//! Selector and attribute names are embedded as JSON string literals so any
//! quoting inside them is escaped. Single-element queries return an object
//! with a `value` key because a bare `null` does not round-trip through CDP.

fn literal(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}

/// Readiness probe: document state plus current location
pub const READY_STATE_SCRIPT: &str =
    "(() => ({ state: document.readyState, href: location.href }))()";

pub fn count(selector: &str) -> String {
    format!("document.querySelectorAll({}).length", literal(selector))
}

pub fn first_attribute(selector: &str, name: &str) -> String {
    format!(
        "(() => {{ const el = document.querySelector({}); return {{ value: el ? el.getAttribute({}) : null }}; }})()",
        literal(selector),
        literal(name)
    )
}

pub fn all_attributes(selector: &str, name: &str) -> String {
    format!(
        "Array.from(document.querySelectorAll({})).map(el => el.getAttribute({})).filter(v => v !== null)",
        literal(selector),
        literal(name)
    )
}

pub fn text_content(selector: &str) -> String {
    format!(
        "(() => {{ const el = document.querySelector({}); return {{ value: el ? el.textContent : null }}; }})()",
        literal(selector)
    )
}

pub fn inner_text(selector: &str) -> String {
    format!(
        "(() => {{ const el = document.querySelector({}); return {{ value: el ? el.innerText : null }}; }})()",
        literal(selector)
    )
}

/// Scroll a container to its current bottom. Returns the new scroll height,
/// or -1 when the container is gone.
pub fn scroll_to_bottom(selector: &str) -> String {
    format!(
        "(() => {{ const el = document.querySelector({}); if (!el) return -1; el.scrollTop = el.scrollHeight; return el.scrollHeight; }})()",
        literal(selector)
    )
}
