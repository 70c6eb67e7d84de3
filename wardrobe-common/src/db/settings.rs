//! Settings database operations
//!
//! Provides get/set accessors for the settings table following a key-value
//! pattern. The serialized item catalog and the stylist API key both live
//! here, each under a fixed key.

use crate::{Error, Result};
use sqlx::{Pool, Sqlite};

#[cfg(test)]
use sqlx::SqlitePool;

/// Fixed key holding the JSON-serialized item catalog
pub const CATALOG_KEY: &str = "wardrobe_catalog";

/// Fixed key holding the stylist service API key
pub const STYLIST_API_KEY: &str = "stylist_api_key";

/// Get the serialized item catalog
///
/// **Returns:** Some(json) if a catalog has been persisted, None on first run
pub async fn get_catalog_json(db: &Pool<Sqlite>) -> Result<Option<String>> {
    get_setting(db, CATALOG_KEY).await
}

/// Replace the serialized item catalog
pub async fn set_catalog_json(db: &Pool<Sqlite>, json: &str) -> Result<()> {
    set_setting(db, CATALOG_KEY, json).await
}

/// Get the stylist API key from the database
pub async fn get_stylist_api_key(db: &Pool<Sqlite>) -> Result<Option<String>> {
    get_setting(db, STYLIST_API_KEY).await
}

/// Set the stylist API key in the database
pub async fn set_stylist_api_key(db: &Pool<Sqlite>, key: &str) -> Result<()> {
    set_setting(db, STYLIST_API_KEY, key).await
}

/// Generic setting getter (internal)
async fn get_setting(db: &Pool<Sqlite>, key: &str) -> Result<Option<String>> {
    let row: Option<(String,)> = sqlx::query_as("SELECT value FROM settings WHERE key = ?")
        .bind(key)
        .fetch_optional(db)
        .await
        .map_err(Error::Database)?;

    Ok(row.map(|(value,)| value))
}

/// Generic setting setter (internal)
async fn set_setting(db: &Pool<Sqlite>, key: &str, value: &str) -> Result<()> {
    sqlx::query(
        "INSERT INTO settings (key, value) VALUES (?, ?)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
    )
    .bind(key)
    .bind(value)
    .execute(db)
    .await
    .map_err(Error::Database)?;

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
