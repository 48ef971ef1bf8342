//! Location management.
//!
//! Locations are a department/city/state/country tuple used to filter and
//! group documents. The tuple is unique; adding an existing tuple returns
//! the existing row instead of failing. The answering engine consumes
//! locations read-only.

use anyhow::{bail, Result};
use sqlx::{Row, SqlitePool};

use crate::config::Config;
use crate::db;
use crate::models::Location;

/// Inserts a location if the tuple is new, returning its id either way.
pub async fn add_location(
    pool: &SqlitePool,
    department: &str,
    city: &str,
    state: &str,
    country: &str,
) -> Result<i64> {
    let now = chrono::Utc::now().timestamp();
    sqlx::query(
        r#"
        INSERT OR IGNORE INTO locations (department, city, state, country, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(department)
    .bind(city)
    .bind(state)
    .bind(country)
    .bind(now)
    .execute(pool)
    .await?;

    let id: i64 = sqlx::query_scalar(
        "SELECT id FROM locations WHERE department = ? AND city = ? AND state = ? AND country = ?",
    )
    .bind(department)
    .bind(city)
    .bind(state)
    .bind(country)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Lists all locations ordered by state, city, department.
pub async fn list_locations(pool: &SqlitePool) -> Result<Vec<Location>> {
    let rows = sqlx::query(
        r#"
        SELECT id, department, city, state, country
        FROM locations
        ORDER BY state ASC, city ASC, department ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    let locations = rows
        .iter()
        .map(|row| Location {
            id: row.get("id"),
            department: row.get("department"),
            city: row.get("city"),
            state: row.get("state"),
            country: row.get("country"),
        })
        .collect();

    Ok(locations)
}

/// CLI entry point: add a location and print its id.
pub async fn run_add(
    config: &Config,
    department: &str,
    city: &str,
    state: &str,
    country: &str,
) -> Result<()> {
    if department.trim().is_empty() || city.trim().is_empty() || state.trim().is_empty() {
        bail!("department, city, and state must not be empty");
    }

    let pool = db::connect(&config.db.path).await?;
    let id = add_location(&pool, department, city, state, country).await?;
    pool.close().await;

    println!("location {} — {}, {}, {}, {}", id, department, city, state, country);
    Ok(())
}

/// CLI entry point: print all locations.
pub async fn run_list(config: &Config) -> Result<()> {
    let pool = db::connect(&config.db.path).await?;
    let locations = list_locations(&pool).await?;
    pool.close().await;

    if locations.is_empty() {
        println!("No locations.");
        return Ok(());
    }

    println!("{:<6} {:<24} {:<18} {:<16} COUNTRY", "ID", "DEPARTMENT", "CITY", "STATE");
    for loc in &locations {
        println!(
            "{:<6} {:<24} {:<18} {:<16} {}",
            loc.id, loc.department, loc.city, loc.state, loc.country
        );
    }

    Ok(())
}
