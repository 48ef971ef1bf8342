//! Keyword-table question classification.
//!
//! Maps a free-text question to one hazard topic via substring membership
//! against fixed per-topic keyword lists. Topics are evaluated in declaration
//! order and the first hit wins — no weighting, no multi-topic output.

use serde::Serialize;

/// Hazard topic a question is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    FirstAid,
    FireFighting,
    Handling,
    Exposure,
    Hazards,
    Physical,
    General,
}

impl Topic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::FirstAid => "first_aid",
            Topic::FireFighting => "fire_fighting",
            Topic::Handling => "handling",
            Topic::Exposure => "exposure",
            Topic::Hazards => "hazards",
            Topic::Physical => "physical",
            Topic::General => "general",
        }
    }
}

/// Ordered (topic, keywords) table. Order is load-bearing: ties between
/// topics are resolved by position in this table.
const TOPIC_KEYWORDS: &[(Topic, &[&str])] = &[
    (
        Topic::FirstAid,
        &[
            "first aid",
            "emergency",
            "exposure",
            "eye contact",
            "skin contact",
            "inhalation",
            "ingestion",
        ],
    ),
    (
        Topic::FireFighting,
        &["fire", "firefighting", "extinguish", "combustible", "flammable"],
    ),
    (
        Topic::Handling,
        &["handling", "storage", "store", "precautions"],
    ),
    (
        Topic::Exposure,
        &["exposure", "protection", "ppe", "personal protective", "ventilation"],
    ),
    (
        Topic::Hazards,
        &["hazard", "danger", "toxic", "corrosive", "irritant"],
    ),
    (
        Topic::Physical,
        &["physical", "appearance", "odor", "melting point", "boiling point"],
    ),
];

/// Classifies a question into a [`Topic`]. Falls back to [`Topic::General`]
/// when no keyword from any topic appears in the lower-cased question.
pub fn classify(question: &str) -> Topic {
    let question_lower = question.to_lowercase();

    for (topic, keywords) in TOPIC_KEYWORDS {
        if keywords.iter().any(|kw| question_lower.contains(kw)) {
            return *topic;
        }
    }

    Topic::General
}
