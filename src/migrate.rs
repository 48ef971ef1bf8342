use anyhow::Result;

use crate::config::Config;
use crate::db;

pub async fn run_migrations(config: &Config) -> Result<()> {
    let pool = db::connect(&config.db.path).await?;

    // Create locations table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS locations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            department TEXT NOT NULL,
            city TEXT NOT NULL,
            state TEXT NOT NULL,
            country TEXT NOT NULL DEFAULT 'United States',
            created_at INTEGER NOT NULL,
            UNIQUE(department, city, state, country)
        )
        "#,
    )
    .execute(&pool)
    .await?;

    // Create documents table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS documents (
            id TEXT PRIMARY KEY,
            filename TEXT NOT NULL,
            original_filename TEXT NOT NULL,
            content_hash TEXT NOT NULL UNIQUE,
            product_name TEXT NOT NULL,
            manufacturer TEXT NOT NULL,
            cas_number TEXT NOT NULL DEFAULT '',
            full_text TEXT NOT NULL,
            location_id INTEGER,
            source_type TEXT NOT NULL DEFAULT 'upload',
            file_size INTEGER NOT NULL,
            created_at INTEGER NOT NULL,
            FOREIGN KEY (location_id) REFERENCES locations(id)
        )
        "#,
    )
    .execute(&pool)
    .await?;

    // Create hazard_records table (one row per document)
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS hazard_records (
            document_id TEXT PRIMARY KEY,
            product_name TEXT NOT NULL DEFAULT '',
            cas_number TEXT NOT NULL DEFAULT '',
            nfpa_health INTEGER NOT NULL DEFAULT 0,
            nfpa_fire INTEGER NOT NULL DEFAULT 0,
            nfpa_reactivity INTEGER NOT NULL DEFAULT 0,
            nfpa_special TEXT,
            first_aid TEXT NOT NULL DEFAULT '',
            fire_fighting TEXT NOT NULL DEFAULT '',
            handling_storage TEXT NOT NULL DEFAULT '',
            exposure_controls TEXT NOT NULL DEFAULT '',
            created_at INTEGER NOT NULL,
            FOREIGN KEY (document_id) REFERENCES documents(id)
        )
        "#,
    )
    .execute(&pool)
    .await?;

    // Create qa_history table (append-only)
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS qa_history (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            question TEXT NOT NULL,
            answer TEXT NOT NULL,
            document_id TEXT,
            location_id INTEGER,
            session TEXT,
            confidence REAL NOT NULL DEFAULT 0,
            created_at INTEGER NOT NULL,
            FOREIGN KEY (document_id) REFERENCES documents(id),
            FOREIGN KEY (location_id) REFERENCES locations(id)
        )
        "#,
    )
    .execute(&pool)
    .await?;

    // Create indexes
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_documents_product_name ON documents(product_name)")
        .execute(&pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_documents_location ON documents(location_id)")
        .execute(&pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_documents_cas_number ON documents(cas_number)")
        .execute(&pool)
        .await?;
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_documents_created_at ON documents(created_at DESC)",
    )
    .execute(&pool)
    .await?;

    pool.close().await;
    Ok(())
}
