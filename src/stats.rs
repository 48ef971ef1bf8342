//! Database statistics and health overview.
//!
//! Provides a quick summary of what's stored: document counts, hazard
//! record coverage, history volume, and per-location breakdowns. Used by
//! `sds stats` to give confidence that ingestion is working as expected.

use anyhow::Result;
use sqlx::Row;

use crate::config::Config;
use crate::db;

/// Per-location breakdown of document counts.
struct LocationStats {
    label: String,
    doc_count: i64,
}

/// Run the stats command: query the database and print a summary.
pub async fn run_stats(config: &Config) -> Result<()> {
    let pool = db::connect(&config.db.path).await?;

    let total_docs: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM documents")
        .fetch_one(&pool)
        .await?;

    let total_hazards: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM hazard_records")
        .fetch_one(&pool)
        .await?;

    let total_history: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM qa_history")
        .fetch_one(&pool)
        .await?;

    let total_locations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM locations")
        .fetch_one(&pool)
        .await?;

    let db_size = std::fs::metadata(&config.db.path)
        .map(|m| m.len())
        .unwrap_or(0);

    println!("SDS Assistant — Database Stats");
    println!("==============================");
    println!();
    println!("  Database:        {}", config.db.path.display());
    println!("  Size:            {}", format_bytes(db_size));
    println!();
    println!("  Documents:       {}", total_docs);
    println!("  Hazard records:  {}", total_hazards);
    println!("  Questions asked: {}", total_history);
    println!("  Locations:       {}", total_locations);

    // Per-location breakdown (unassigned documents grouped under "(none)")
    let location_rows = sqlx::query(
        r#"
        SELECT
            COALESCE(l.department || ', ' || l.city || ', ' || l.state, '(none)') AS label,
            COUNT(d.id) AS doc_count
        FROM documents d
        LEFT JOIN locations l ON l.id = d.location_id
        GROUP BY label
        ORDER BY doc_count DESC
        "#,
    )
    .fetch_all(&pool)
    .await?;

    let location_stats: Vec<LocationStats> = location_rows
        .iter()
        .map(|row| LocationStats {
            label: row.get("label"),
            doc_count: row.get("doc_count"),
        })
        .collect();

    if !location_stats.is_empty() {
        println!();
        println!("  By location:");
        println!("  {:<48} {:>6}", "LOCATION", "DOCS");
        println!("  {}", "-".repeat(56));
        for s in &location_stats {
            println!("  {:<48} {:>6}", s.label, s.doc_count);
        }
    }

    println!();

    pool.close().await;
    Ok(())
}

/// Format a byte count as a human-readable string.
fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else if bytes < 1024 * 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.2} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}
