//! Prompt construction from enrichment signals

use crate::lead::{Field, LeadRecord};
use crate::utils::PROMPT_EXCERPT_CHARS;

const NOTHING_MISSING: &str = "Advanced AI Scheduling";

/// Technologies the lead's website is known to lack, in fixed order
#[must_use]
pub fn missing_technologies(lead: &LeadRecord) -> Vec<&'static str> {
    let signals = lead.signals();
    let mut missing = Vec::new();
    if signals.missing_pixel == Field::Known(true) {
        missing.push("Facebook Pixel");
    }
    if signals.missing_analytics == Field::Known(true) {
        missing.push("Google Analytics");
    }
    missing
}

/// Build the single-line opener prompt for one lead
#[must_use]
pub fn build_prompt(lead: &LeadRecord) -> String {
    let name = lead.identity().name.as_known().map_or("Dr.", String::as_str);
    let excerpt: String = lead
        .signals()
        .excerpt
        .as_known()
        .map(|text| text.chars().take(PROMPT_EXCERPT_CHARS).collect())
        .unwrap_or_default();

    let missing = missing_technologies(lead);
    let (missing_str, objective) = if missing.is_empty() {
        (
            NOTHING_MISSING.to_string(),
            "compliment their site, but suggest they are missing 24/7 AI lead capture.".to_string(),
        )
    } else {
        let joined = missing.join(" and ");
        let objective = format!(
            "tell them they are losing potential patients because they are missing {joined}."
        );
        (joined, objective)
    };

    format!(
        "Role: Direct Response Marketing Auditor.\n\
         Client: {name}\n\
         Missing Tech: {missing_str}\n\
         Context: \"{excerpt}...\"\n\
         \n\
         Goal: Write ONE punchy, polite, cold-email first line (under 30 words).\n\
         Content: Only {objective}\n\
         Tone: Professional, helpful, slightly authoritative.\n\
         No fluff. No \"I hope you are well\"."
    )
}
