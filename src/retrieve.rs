//! Candidate document retrieval for question answering.
//!
//! Selection is plain substring matching (SQLite `LIKE`) of the raw question
//! against document full text or product name — multi-word questions only
//! match when the exact phrase occurs in the document. Results are ordered
//! by ingestion recency and capped; an empty result set is a valid,
//! reportable outcome.

use anyhow::Result;
use sqlx::{Row, SqlitePool};

use crate::models::DocumentCandidate;

/// Maximum candidates examined per question.
pub const CANDIDATE_LIMIT: i64 = 10;

/// Fetches candidate documents for a question, most recent first.
pub async fn retrieve(
    pool: &SqlitePool,
    question: &str,
    location_id: Option<i64>,
) -> Result<Vec<DocumentCandidate>> {
    let pattern = format!("%{}%", question);

    let mut query = String::from(
        r#"
        SELECT d.id, d.product_name, d.full_text,
               COALESCE(h.first_aid, '') AS first_aid,
               COALESCE(h.fire_fighting, '') AS fire_fighting,
               COALESCE(h.handling_storage, '') AS handling_storage,
               COALESCE(h.exposure_controls, '') AS exposure_controls,
               l.department, l.city, l.state
        FROM documents d
        LEFT JOIN hazard_records h ON h.document_id = d.id
        LEFT JOIN locations l ON l.id = d.location_id
        WHERE (d.full_text LIKE ? OR d.product_name LIKE ?)
        "#,
    );

    if location_id.is_some() {
        query.push_str(" AND d.location_id = ?");
    }

    query.push_str(" ORDER BY d.created_at DESC, d.rowid DESC LIMIT ?");

    let mut q = sqlx::query(&query).bind(&pattern).bind(&pattern);
    if let Some(loc) = location_id {
        q = q.bind(loc);
    }
    let rows = q.bind(CANDIDATE_LIMIT).fetch_all(pool).await?;

    let candidates = rows
        .iter()
        .map(|row| DocumentCandidate {
            document_id: row.get("id"),
            product_name: row.get("product_name"),
            full_text: row.get("full_text"),
            first_aid: row.get("first_aid"),
            fire_fighting: row.get("fire_fighting"),
            handling_storage: row.get("handling_storage"),
            exposure_controls: row.get("exposure_controls"),
            department: row.get("department"),
            city: row.get("city"),
            state: row.get("state"),
        })
        .collect();

    Ok(candidates)
}
