//! Append-only QA history log.
//!
//! One entry per answered question, written fire-and-forget from the
//! engine's perspective and never mutated afterwards.

use anyhow::Result;
use sqlx::{Row, SqlitePool};

use crate::config::Config;
use crate::db;
use crate::models::QaHistoryEntry;

/// Appends one history entry for an answered question.
#[allow(clippy::too_many_arguments)]
pub async fn append(
    pool: &SqlitePool,
    question: &str,
    answer: &str,
    document_id: Option<&str>,
    location_id: Option<i64>,
    session: Option<&str>,
    confidence: f64,
) -> Result<()> {
    let now = chrono::Utc::now().timestamp();
    sqlx::query(
        r#"
        INSERT INTO qa_history (question, answer, document_id, location_id, session, confidence, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(question)
    .bind(answer)
    .bind(document_id)
    .bind(location_id)
    .bind(session)
    .bind(confidence)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(())
}

/// Fetches the most recent history entries, newest first.
pub async fn recent(pool: &SqlitePool, limit: i64) -> Result<Vec<QaHistoryEntry>> {
    let rows = sqlx::query(
        r#"
        SELECT id, question, answer, document_id, location_id, session, confidence, created_at
        FROM qa_history
        ORDER BY created_at DESC, id DESC
        LIMIT ?
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    let entries = rows
        .iter()
        .map(|row| QaHistoryEntry {
            id: row.get("id"),
            question: row.get("question"),
            answer: row.get("answer"),
            document_id: row.get("document_id"),
            location_id: row.get("location_id"),
            session: row.get("session"),
            confidence: row.get("confidence"),
            created_at: row.get("created_at"),
        })
        .collect();

    Ok(entries)
}

/// CLI entry point: print the most recent history entries.
pub async fn run_history(config: &Config, limit: i64) -> Result<()> {
    let pool = db::connect(&config.db.path).await?;
    let entries = recent(&pool, limit).await?;
    pool.close().await;

    if entries.is_empty() {
        println!("No history.");
        return Ok(());
    }

    for entry in &entries {
        let date = chrono::DateTime::from_timestamp(entry.created_at, 0)
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        println!("[{}] {:.1} {}", date, entry.confidence, entry.question);
        println!("    {}", entry.answer.replace('\n', " "));
        if let Some(ref doc) = entry.document_id {
            println!("    document: {}", doc);
        }
        println!();
    }

    Ok(())
}
