//! Database access for the wardrobe service
//!
//! One SQLite database lives in the root folder; the only table this
//! subsystem needs is the `settings` key-value table, which holds both the
//! serialized item catalog and operator-configured values (stylist API key).

pub mod settings;

use anyhow::Result;
use sqlx::SqlitePool;
use std::path::Path;

/// Initialize database connection pool
///
/// Creates the parent directory and the database file if missing, then
/// ensures the required tables exist.
pub async fn init_pool(db_path: &Path) -> Result<SqlitePool> {
    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Proper SQLite URI with mode=rwc (read, write, create)
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    tracing::debug!("Connecting to database: {}", db_url);

    let pool = SqlitePool::connect(&db_url).await?;

    init_tables(&pool).await?;

    Ok(pool)
}

/// Create the tables this service needs if they don't exist
pub async fn init_tables(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Database tables initialized (settings)");

    Ok(())
}
