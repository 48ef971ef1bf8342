//! Pattern-based field extraction over raw SDS text.
//!
//! Every field is driven by an ordered list of label patterns; the first
//! pattern that matches anywhere in the text wins, case-insensitively.
//! There is no scoring across candidates and no validation of captured
//! values — a miss yields a default, never an error.

use regex::Regex;
use std::sync::OnceLock;

use crate::models::{ExtractedFields, HazardRatings};

/// Label patterns tried in order for the product name.
const PRODUCT_PATTERNS: &[&str] = &[
    r"(?i)Product\s+Name:?\s*([^\n\r]+)",
    r"(?i)Product\s+Identifier:?\s*([^\n\r]+)",
    r"(?i)Trade\s+Name:?\s*([^\n\r]+)",
    r"(?i)Chemical\s+Name:?\s*([^\n\r]+)",
];

/// Label patterns tried in order for the manufacturer.
const MANUFACTURER_PATTERNS: &[&str] = &[
    r"(?i)Manufacturer:?\s*([^\n\r]+)",
    r"(?i)Company:?\s*([^\n\r]+)",
    r"(?i)Supplier:?\s*([^\n\r]+)",
];

/// Canonical CAS registry number format following a "CAS" label.
const CAS_PATTERN: &str = r"(?i)CAS\s*#?:?\s*(\d{2,7}-\d{2}-\d)";

/// Rating label forms per field: bare form first, NFPA-prefixed second.
const HEALTH_PATTERNS: &[&str] = &[r"(?i)Health\s*=?\s*(\d)", r"(?i)NFPA\s+Health\s*:?\s*(\d)"];
const FIRE_PATTERNS: &[&str] = &[r"(?i)Fire\s*=?\s*(\d)", r"(?i)NFPA\s+Fire\s*:?\s*(\d)"];
const REACTIVITY_PATTERNS: &[&str] = &[
    r"(?i)Reactivity\s*=?\s*(\d)",
    r"(?i)NFPA\s+Reactivity\s*:?\s*(\d)",
];

fn compiled(cell: &'static OnceLock<Vec<Regex>>, patterns: &[&str]) -> &'static [Regex] {
    cell.get_or_init(|| {
        patterns
            .iter()
            .map(|p| Regex::new(p).expect("field pattern must compile"))
            .collect()
    })
}

fn product_regexes() -> &'static [Regex] {
    static CELL: OnceLock<Vec<Regex>> = OnceLock::new();
    compiled(&CELL, PRODUCT_PATTERNS)
}

fn manufacturer_regexes() -> &'static [Regex] {
    static CELL: OnceLock<Vec<Regex>> = OnceLock::new();
    compiled(&CELL, MANUFACTURER_PATTERNS)
}

fn cas_regex() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    CELL.get_or_init(|| Regex::new(CAS_PATTERN).expect("CAS pattern must compile"))
}

fn health_regexes() -> &'static [Regex] {
    static CELL: OnceLock<Vec<Regex>> = OnceLock::new();
    compiled(&CELL, HEALTH_PATTERNS)
}

fn fire_regexes() -> &'static [Regex] {
    static CELL: OnceLock<Vec<Regex>> = OnceLock::new();
    compiled(&CELL, FIRE_PATTERNS)
}

fn reactivity_regexes() -> &'static [Regex] {
    static CELL: OnceLock<Vec<Regex>> = OnceLock::new();
    compiled(&CELL, REACTIVITY_PATTERNS)
}

/// Runs each pattern in order and returns the first trimmed capture.
fn first_capture(regexes: &[Regex], text: &str) -> String {
    for re in regexes {
        if let Some(caps) = re.captures(text) {
            if let Some(m) = caps.get(1) {
                return m.as_str().trim().to_string();
            }
        }
    }
    String::new()
}

/// First captured rating digit, or 0 when no pattern matches.
/// Out-of-range digits are kept as-is; the 0-4 convention is not enforced.
fn first_rating(regexes: &[Regex], text: &str) -> i64 {
    for re in regexes {
        if let Some(caps) = re.captures(text) {
            if let Some(m) = caps.get(1) {
                if let Ok(n) = m.as_str().parse::<i64>() {
                    return n;
                }
            }
        }
    }
    0
}

/// Extracts structured fields from raw SDS text.
///
/// Pure function of the text: identical input always yields identical output.
pub fn extract_fields(text: &str) -> ExtractedFields {
    ExtractedFields {
        product_name: first_capture(product_regexes(), text),
        manufacturer: first_capture(manufacturer_regexes(), text),
        cas_number: first_capture(std::slice::from_ref(cas_regex()), text),
        ratings: HazardRatings {
            health: first_rating(health_regexes(), text),
            fire: first_rating(fire_regexes(), text),
            reactivity: first_rating(reactivity_regexes(), text),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_name_first_pattern_wins() {
        let text = "Trade Name: AcmeSolv\nProduct Name: Acetone\n";
        let fields = extract_fields(text);
        // "Product Name" is tried before "Trade Name" regardless of position
        assert_eq!(fields.product_name, "Acetone");
    }

    #[test]
    fn test_product_name_falls_through_patterns() {
        let fields = extract_fields("Chemical Name: Toluene\n");
        assert_eq!(fields.product_name, "Toluene");
    }

    #[test]
    fn test_product_name_case_insensitive() {
        let fields = extract_fields("PRODUCT NAME: Methanol\n");
        assert_eq!(fields.product_name, "Methanol");
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let fields = extract_fields("nothing to see here");
        assert_eq!(fields.product_name, "");
        assert_eq!(fields.manufacturer, "");
        assert_eq!(fields.cas_number, "");
        assert_eq!(fields.ratings, HazardRatings::default());
    }

    #[test]
    fn test_cas_number_canonical_format() {
        let fields = extract_fields("CAS 64-17-5 is ethanol");
        assert_eq!(fields.cas_number, "64-17-5");
    }

    #[test]
    fn test_cas_number_label_variants() {
        assert_eq!(extract_fields("CAS#: 67-64-1").cas_number, "67-64-1");
        assert_eq!(extract_fields("cas: 7732-18-5").cas_number, "7732-18-5");
    }

    #[test]
    fn test_cas_number_absent_never_errors() {
        assert_eq!(extract_fields("CAS: not-a-number").cas_number, "");
        assert_eq!(extract_fields("").cas_number, "");
    }

    #[test]
    fn test_ratings_bare_form() {
        let fields = extract_fields("Health = 2 Fire=3 Reactivity 1");
        assert_eq!(fields.ratings.health, 2);
        assert_eq!(fields.ratings.fire, 3);
        assert_eq!(fields.ratings.reactivity, 1);
    }

    #[test]
    fn test_ratings_nfpa_form() {
        let fields = extract_fields("NFPA Health: 3\nNFPA Fire: 0\nNFPA Reactivity: 2\n");
        assert_eq!(fields.ratings.health, 3);
        assert_eq!(fields.ratings.fire, 0);
        assert_eq!(fields.ratings.reactivity, 2);
    }

    #[test]
    fn test_ratings_absent_default_to_zero() {
        let fields = extract_fields("Product Name: Water");
        assert_eq!(fields.ratings.health, 0);
        assert_eq!(fields.ratings.fire, 0);
        assert_eq!(fields.ratings.reactivity, 0);
    }

    #[test]
    fn test_ratings_out_of_range_stored_verbatim() {
        // 0-4 convention is not enforced by the extractor
        let fields = extract_fields("Health = 9");
        assert_eq!(fields.ratings.health, 9);
    }

    #[test]
    fn test_captures_are_trimmed() {
        let fields = extract_fields("Manufacturer:   Dow Chemical   \n");
        assert_eq!(fields.manufacturer, "Dow Chemical");
    }

    #[test]
    fn test_idempotent() {
        let text = "Product Name: Acetone\nManufacturer: Acme\nCAS 67-64-1\nHealth = 1";
        assert_eq!(extract_fields(text), extract_fields(text));
    }
}
