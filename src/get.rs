//! Document retrieval by ID.
//!
//! Fetches a full document and its hazard record from the database.
//! Used by both the `sds get` CLI command and the `GET /documents/{id}`
//! HTTP endpoint.

use anyhow::{bail, Result};
use serde::Serialize;
use sqlx::{Row, SqlitePool};

use crate::config::Config;
use crate::db;
use crate::models::{Document, HazardRecord};

/// Combined document + hazard record response shared by CLI and server.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentResponse {
    pub document: Document,
    pub hazard: Option<HazardRecord>,
}

/// One row of the `sds list` / `GET /documents` summary.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentSummary {
    pub id: String,
    pub product_name: String,
    pub manufacturer: String,
    pub cas_number: String,
    pub location_id: Option<i64>,
    pub file_size: i64,
    pub created_at: i64,
}

/// Core get function returning structured data (used by CLI and server).
pub async fn get_document(pool: &SqlitePool, id: &str) -> Result<DocumentResponse> {
    let doc_row = sqlx::query(
        r#"
        SELECT id, filename, original_filename, content_hash, product_name,
               manufacturer, cas_number, full_text, location_id, source_type,
               file_size, created_at
        FROM documents WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    let doc_row = match doc_row {
        Some(row) => row,
        None => bail!("document not found: {}", id),
    };

    let document = Document {
        id: doc_row.get("id"),
        filename: doc_row.get("filename"),
        original_filename: doc_row.get("original_filename"),
        content_hash: doc_row.get("content_hash"),
        product_name: doc_row.get("product_name"),
        manufacturer: doc_row.get("manufacturer"),
        cas_number: doc_row.get("cas_number"),
        full_text: doc_row.get("full_text"),
        location_id: doc_row.get("location_id"),
        source_type: doc_row.get("source_type"),
        file_size: doc_row.get("file_size"),
        created_at: doc_row.get("created_at"),
    };

    let hazard_row = sqlx::query(
        r#"
        SELECT document_id, product_name, cas_number, nfpa_health, nfpa_fire,
               nfpa_reactivity, nfpa_special, first_aid, fire_fighting,
               handling_storage, exposure_controls
        FROM hazard_records WHERE document_id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    let hazard = hazard_row.map(|row| HazardRecord {
        document_id: row.get("document_id"),
        product_name: row.get("product_name"),
        cas_number: row.get("cas_number"),
        nfpa_health: row.get("nfpa_health"),
        nfpa_fire: row.get("nfpa_fire"),
        nfpa_reactivity: row.get("nfpa_reactivity"),
        nfpa_special: row.get("nfpa_special"),
        first_aid: row.get("first_aid"),
        fire_fighting: row.get("fire_fighting"),
        handling_storage: row.get("handling_storage"),
        exposure_controls: row.get("exposure_controls"),
    });

    Ok(DocumentResponse { document, hazard })
}

/// Summaries of the most recently ingested documents.
pub async fn list_documents(
    pool: &SqlitePool,
    location_id: Option<i64>,
    limit: i64,
) -> Result<Vec<DocumentSummary>> {
    let mut query = String::from(
        r#"
        SELECT id, product_name, manufacturer, cas_number, location_id, file_size, created_at
        FROM documents
        "#,
    );
    if location_id.is_some() {
        query.push_str(" WHERE location_id = ?");
    }
    query.push_str(" ORDER BY created_at DESC, rowid DESC LIMIT ?");

    let mut q = sqlx::query(&query);
    if let Some(loc) = location_id {
        q = q.bind(loc);
    }
    let rows = q.bind(limit).fetch_all(pool).await?;

    let summaries = rows
        .iter()
        .map(|row| DocumentSummary {
            id: row.get("id"),
            product_name: row.get("product_name"),
            manufacturer: row.get("manufacturer"),
            cas_number: row.get("cas_number"),
            location_id: row.get("location_id"),
            file_size: row.get("file_size"),
            created_at: row.get("created_at"),
        })
        .collect();

    Ok(summaries)
}

/// CLI entry point — fetches a document and prints it to stdout.
pub async fn run_get(config: &Config, id: &str) -> Result<()> {
    let pool = db::connect(&config.db.path).await?;
    let response = get_document(&pool, id).await;
    pool.close().await;
    let response = response?;

    let doc = &response.document;
    println!("--- Document ---");
    println!("id:            {}", doc.id);
    println!("product:       {}", doc.product_name);
    println!("manufacturer:  {}", doc.manufacturer);
    if !doc.cas_number.is_empty() {
        println!("cas:           {}", doc.cas_number);
    }
    println!("file:          {}", doc.original_filename);
    println!("source:        {}", doc.source_type);
    println!("size:          {} bytes", doc.file_size);
    if let Some(loc) = doc.location_id {
        println!("location:      {}", loc);
    }
    println!("ingested:      {}", format_ts_iso(doc.created_at));
    println!("hash:          {}", doc.content_hash);
    println!();

    if let Some(ref hazard) = response.hazard {
        println!("--- Hazard Record ---");
        println!(
            "nfpa:          health {} / fire {} / reactivity {}",
            hazard.nfpa_health, hazard.nfpa_fire, hazard.nfpa_reactivity
        );
        print_section("first aid", &hazard.first_aid);
        print_section("fire fighting", &hazard.fire_fighting);
        print_section("handling/storage", &hazard.handling_storage);
        print_section("exposure controls", &hazard.exposure_controls);
        println!();
    }

    println!("--- Full Text ---");
    println!("{}", doc.full_text);

    Ok(())
}

/// CLI entry point — prints recent document summaries.
pub async fn run_list(config: &Config, location_id: Option<i64>, limit: i64) -> Result<()> {
    let pool = db::connect(&config.db.path).await?;
    let summaries = list_documents(&pool, location_id, limit).await?;
    pool.close().await;

    if summaries.is_empty() {
        println!("No documents.");
        return Ok(());
    }

    for (i, doc) in summaries.iter().enumerate() {
        println!("{}. {} ({})", i + 1, doc.product_name, doc.manufacturer);
        if !doc.cas_number.is_empty() {
            println!("    cas: {}", doc.cas_number);
        }
        println!("    ingested: {}", format_ts_iso(doc.created_at));
        println!("    id: {}", doc.id);
        println!();
    }

    Ok(())
}

fn print_section(label: &str, text: &str) {
    if text.is_empty() {
        return;
    }
    println!("{}:", label);
    println!("    {}", text.replace('\n', " "));
}

fn format_ts_iso(ts: i64) -> String {
    chrono::DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%SZ").to_string())
        .unwrap_or_else(|| ts.to_string())
}
