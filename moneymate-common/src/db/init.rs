//! Database initialization
//!
//! Opens (creating if necessary) the SQLite database and applies the schema.
//! Schema creation is idempotent and safe to run on every startup.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Initialize database connection pool and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await?;

    // Concurrent enrichment may write back while other readers are active
    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(&pool)
        .await?;

    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&pool)
        .await?;

    create_payer_payees_table(&pool).await?;

    Ok(pool)
}

/// Create the `payer_payees` table and its lookup index
pub async fn create_payer_payees_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS payer_payees (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            payer_payee_type TEXT NOT NULL CHECK (payer_payee_type IN ('payer', 'payee')),
            external_id TEXT NOT NULL DEFAULT ''
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_payer_payees_type_name ON payer_payees(payer_payee_type, name)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
