//! Ingestion pipeline orchestration.
//!
//! Coordinates the full upload flow: bytes → decode → field extraction →
//! section excerpting → storage. Document and hazard record are written
//! together in one transaction; re-ingesting identical bytes is rejected
//! by the content-hash uniqueness constraint, not re-stored.

use anyhow::{bail, Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use sha2::{Digest, Sha256};
use sqlx::SqlitePool;
use std::path::Path;
use uuid::Uuid;
use walkdir::WalkDir;

use crate::config::Config;
use crate::db;
use crate::decode::{decode_to_text, mime_hint_for};
use crate::fields::extract_fields;
use crate::models::IngestOutcome;
use crate::sections::{
    extract_section, EXPOSURE_CONTROLS_KEYWORDS, FIRE_FIGHTING_KEYWORDS, FIRST_AID_KEYWORDS,
    HANDLING_STORAGE_KEYWORDS,
};

/// Placeholder substituted when the extractor finds no product name.
pub const UNKNOWN_PRODUCT: &str = "Unknown Product";
/// Placeholder substituted when the extractor finds no manufacturer.
pub const UNKNOWN_MANUFACTURER: &str = "Unknown Manufacturer";

/// CLI entry point: ingest a single file or every matching file under a
/// directory. Per-file failures are reported and non-fatal.
pub async fn run_ingest(
    config: &Config,
    path: &Path,
    location_id: Option<i64>,
    dry_run: bool,
) -> Result<()> {
    let files = collect_files(config, path)?;

    if files.is_empty() {
        bail!("no ingestable files under {}", path.display());
    }

    if dry_run {
        println!("ingest (dry-run)");
        for file in &files {
            println!("  would ingest: {}", file.display());
        }
        println!("  files found: {}", files.len());
        return Ok(());
    }

    let pool = db::connect(&config.db.path).await?;

    let mut ingested = 0u64;
    let mut skipped = 0u64;

    for file in &files {
        let filename = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.display().to_string());

        // A file that vanished or turned unreadable after the scan is a
        // per-file skip, same as a decode failure.
        let bytes = match std::fs::read(file) {
            Ok(bytes) => bytes,
            Err(e) => {
                skipped += 1;
                println!("  {} — skipped: Failed to read file: {}", filename, e);
                continue;
            }
        };

        let outcome = ingest_bytes(&pool, config, &filename, &bytes, location_id, "upload").await?;
        if outcome.success {
            ingested += 1;
            println!(
                "  {} — ok ({})",
                filename,
                outcome.product_name.as_deref().unwrap_or(UNKNOWN_PRODUCT)
            );
        } else {
            skipped += 1;
            println!("  {} — skipped: {}", filename, outcome.message);
        }
    }

    println!("ingest");
    println!("  files found: {}", files.len());
    println!("  ingested: {}", ingested);
    println!("  skipped: {}", skipped);
    println!("ok");

    pool.close().await;
    Ok(())
}

/// Ingests one file's bytes. Data-quality problems (duplicate content,
/// undecodable or empty text, oversized file) come back as unsuccessful
/// outcomes; only storage failures propagate as errors.
pub async fn ingest_bytes(
    pool: &SqlitePool,
    config: &Config,
    filename: &str,
    bytes: &[u8],
    location_id: Option<i64>,
    source_type: &str,
) -> Result<IngestOutcome> {
    if bytes.len() as u64 > config.ingest.max_file_bytes {
        return Ok(failure(format!(
            "File exceeds maximum size of {} bytes",
            config.ingest.max_file_bytes
        )));
    }

    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let content_hash = format!("{:x}", hasher.finalize());

    // Duplicate check before any decoding work
    let existing: Option<String> =
        sqlx::query_scalar("SELECT product_name FROM documents WHERE content_hash = ?")
            .bind(&content_hash)
            .fetch_optional(pool)
            .await?;
    if let Some(product) = existing {
        return Ok(failure(format!("File already exists (Product: {})", product)));
    }

    let text = match decode_to_text(bytes, mime_hint_for(filename)) {
        Ok(text) => text,
        Err(e) => return Ok(failure(format!("Could not extract text from file: {}", e))),
    };
    if text.trim().is_empty() {
        return Ok(failure("Could not extract text from file".to_string()));
    }

    let fields = extract_fields(&text);
    let first_aid = extract_section(&text, FIRST_AID_KEYWORDS);
    let fire_fighting = extract_section(&text, FIRE_FIGHTING_KEYWORDS);
    let handling_storage = extract_section(&text, HANDLING_STORAGE_KEYWORDS);
    let exposure_controls = extract_section(&text, EXPOSURE_CONTROLS_KEYWORDS);

    let document_id = Uuid::new_v4().to_string();
    let now = chrono::Utc::now().timestamp();
    let stored_filename = format!(
        "{}_{}",
        chrono::Utc::now().format("%Y%m%d_%H%M%S"),
        filename
    );

    let product_name = if fields.product_name.is_empty() {
        UNKNOWN_PRODUCT.to_string()
    } else {
        fields.product_name.clone()
    };
    let manufacturer = if fields.manufacturer.is_empty() {
        UNKNOWN_MANUFACTURER.to_string()
    } else {
        fields.manufacturer.clone()
    };

    let mut tx = pool.begin().await?;

    let inserted = sqlx::query(
        r#"
        INSERT INTO documents (
            id, filename, original_filename, content_hash, product_name,
            manufacturer, cas_number, full_text, location_id, source_type,
            file_size, created_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&document_id)
    .bind(&stored_filename)
    .bind(filename)
    .bind(&content_hash)
    .bind(&product_name)
    .bind(&manufacturer)
    .bind(&fields.cas_number)
    .bind(&text)
    .bind(location_id)
    .bind(source_type)
    .bind(bytes.len() as i64)
    .bind(now)
    .execute(&mut *tx)
    .await;

    if let Err(e) = inserted {
        // Concurrent ingestion of identical bytes: last writer loses on the
        // content-hash uniqueness constraint and reports "already exists".
        if e.as_database_error()
            .map(|d| d.is_unique_violation())
            .unwrap_or(false)
        {
            tx.rollback().await?;
            return Ok(failure(format!(
                "File already exists (Product: {})",
                product_name
            )));
        }
        return Err(e.into());
    }

    sqlx::query(
        r#"
        INSERT INTO hazard_records (
            document_id, product_name, cas_number, nfpa_health, nfpa_fire,
            nfpa_reactivity, nfpa_special, first_aid, fire_fighting,
            handling_storage, exposure_controls, created_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&document_id)
    .bind(&fields.product_name)
    .bind(&fields.cas_number)
    .bind(fields.ratings.health)
    .bind(fields.ratings.fire)
    .bind(fields.ratings.reactivity)
    .bind(Option::<String>::None)
    .bind(&first_aid)
    .bind(&fire_fighting)
    .bind(&handling_storage)
    .bind(&exposure_controls)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(IngestOutcome {
        success: true,
        message: "File uploaded successfully".to_string(),
        product_name: Some(product_name),
        document_id: Some(document_id),
    })
}

fn failure(message: String) -> IngestOutcome {
    IngestOutcome {
        success: false,
        message,
        product_name: None,
        document_id: None,
    }
}

/// Resolves the ingest target to concrete files: a single file is taken
/// as-is; a directory is walked and filtered by the configured globs.
fn collect_files(config: &Config, path: &Path) -> Result<Vec<std::path::PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    if !path.is_dir() {
        bail!("path does not exist: {}", path.display());
    }

    let include = build_globset(&config.ingest.include_globs)?;
    let exclude = build_globset(&config.ingest.exclude_globs)?;

    let mut files = Vec::new();
    for entry in WalkDir::new(path).follow_links(false) {
        let entry = entry?;
        // Symlinks are kept as candidates; reading resolves them, and a
        // dangling link becomes a per-file skip at read time.
        if !entry.file_type().is_file() && !entry.path_is_symlink() {
            continue;
        }
        let rel = entry.path().strip_prefix(path).unwrap_or(entry.path());
        if include.is_match(rel) && !exclude.is_match(rel) {
            files.push(entry.path().to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

fn build_globset(globs: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for g in globs {
        builder.add(Glob::new(g).with_context(|| format!("invalid glob: {}", g))?);
    }
    Ok(builder.build()?)
}
