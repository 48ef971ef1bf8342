//! Core data models used throughout SDS Assistant.
//!
//! These types represent the documents, hazard records, and answers that flow
//! through the ingestion and question-answering pipeline.

use serde::Serialize;

/// Structured fields pulled out of raw SDS text by the field extractor.
///
/// Unmatched text fields are empty strings; unmatched ratings are 0. Both are
/// value defaults, not failures — the extractor is deliberately permissive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedFields {
    pub product_name: String,
    pub manufacturer: String,
    pub cas_number: String,
    pub ratings: HazardRatings,
}

/// NFPA-convention severity ratings. Conventionally 0-4, but any captured
/// digit is stored verbatim; the extractor never validates the range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct HazardRatings {
    pub health: i64,
    pub fire: i64,
    pub reactivity: i64,
}

/// Normalized document stored in SQLite. Created once at ingestion and
/// immutable thereafter.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub id: String,
    pub filename: String,
    pub original_filename: String,
    pub content_hash: String,
    pub product_name: String,
    pub manufacturer: String,
    pub cas_number: String,
    pub full_text: String,
    pub location_id: Option<i64>,
    pub source_type: String,
    pub file_size: i64,
    pub created_at: i64,
}

/// One-to-one hazard record created alongside a [`Document`] at ingestion.
#[derive(Debug, Clone, Serialize)]
pub struct HazardRecord {
    pub document_id: String,
    pub product_name: String,
    pub cas_number: String,
    pub nfpa_health: i64,
    pub nfpa_fire: i64,
    pub nfpa_reactivity: i64,
    pub nfpa_special: Option<String>,
    pub first_aid: String,
    pub fire_fighting: String,
    pub handling_storage: String,
    pub exposure_controls: String,
}

/// A department/city/state/country tuple used to filter and group documents.
/// Owned by the storage layer; the engine only reads it.
#[derive(Debug, Clone, Serialize)]
pub struct Location {
    pub id: i64,
    pub department: String,
    pub city: String,
    pub state: String,
    pub country: String,
}

/// A document returned by retrieval as potentially relevant to a question,
/// prior to passage selection. Carries the stored excerpts plus full text
/// and location metadata so answer synthesis needs no further queries.
#[derive(Debug, Clone)]
pub struct DocumentCandidate {
    pub document_id: String,
    pub product_name: String,
    pub full_text: String,
    pub first_aid: String,
    pub fire_fighting: String,
    pub handling_storage: String,
    pub exposure_controls: String,
    pub department: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

/// A source record attached to a synthesized answer.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AnswerSource {
    pub product_name: String,
    pub location: String,
    pub document_id: String,
}

/// Output of answer synthesis over a candidate list.
#[derive(Debug, Clone, Serialize)]
pub struct Answer {
    pub text: String,
    pub confidence: f64,
    pub sources: Vec<AnswerSource>,
}

/// Discriminated result of a full question-answer call.
///
/// `success: false` means no candidate documents were found. `success: true`
/// with low confidence means candidates were found but nothing extractable —
/// a distinct terminal state, never an error.
#[derive(Debug, Clone, Serialize)]
pub struct QaResponse {
    pub success: bool,
    pub answer: String,
    pub confidence: f64,
    pub sources: Vec<AnswerSource>,
}

/// Discriminated result of a single-file ingestion.
#[derive(Debug, Clone, Serialize)]
pub struct IngestOutcome {
    pub success: bool,
    pub message: String,
    pub product_name: Option<String>,
    pub document_id: Option<String>,
}

/// Append-only audit log entry for an answered question. Never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct QaHistoryEntry {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub document_id: Option<String>,
    pub location_id: Option<i64>,
    pub session: Option<String>,
    pub confidence: f64,
    pub created_at: i64,
}
