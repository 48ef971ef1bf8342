//! Named-section excerpting over raw SDS text.
//!
//! Locates a hazard subsection by keyword and returns a bounded excerpt:
//! everything from the keyword up to the next "Section N" heading or end of
//! text. Keywords are tried in order and the first match wins; an absent
//! section is a normal outcome, not an error.

use regex::Regex;

/// Hard cap on excerpt length, in characters. Truncation is silent.
pub const MAX_SECTION_CHARS: usize = 1000;

/// Keyword lists per hazard topic, tried in order at ingestion time.
pub const FIRST_AID_KEYWORDS: &[&str] = &["first aid", "section 4"];
pub const FIRE_FIGHTING_KEYWORDS: &[&str] = &["fire fighting", "firefighting", "section 5"];
pub const HANDLING_STORAGE_KEYWORDS: &[&str] = &["handling and storage", "section 7"];
pub const EXPOSURE_CONTROLS_KEYWORDS: &[&str] =
    &["exposure controls", "personal protection", "section 8"];

/// Extracts the first section matched by any keyword, in keyword order.
///
/// Matching is case-insensitive and spans newlines; the returned excerpt
/// keeps the original casing of the document text. Returns an empty string
/// when no keyword matches.
pub fn extract_section(text: &str, keywords: &[&str]) -> String {
    for keyword in keywords {
        // From the keyword to the next "Section N" heading or end of text.
        // The terminator is consumed but not captured, so only the excerpt
        // lands in group 1.
        let pattern = format!(
            r"(?is){}[:\s]*(.*?)(?:section\s+\d+|\z)",
            regex::escape(keyword)
        );
        let re = match Regex::new(&pattern) {
            Ok(re) => re,
            Err(_) => continue,
        };
        if let Some(caps) = re.captures(text) {
            if let Some(m) = caps.get(1) {
                let section = m.as_str().trim();
                return truncate_chars(section, MAX_SECTION_CHARS);
            }
        }
    }

    String::new()
}

fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        s.chars().take(max).collect()
    } else {
        s.to_string()
    }
}
