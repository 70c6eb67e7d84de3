//! Configuration resolution for wardrobe-svc
//!
//! Tiered stylist API key resolution with database -> environment priority.
//! The database value is authoritative because the settings endpoint writes
//! there; the environment variable covers first runs and headless setups.

use sqlx::{Pool, Sqlite};
use tracing::{debug, warn};
use wardrobe_common::Result;

/// Environment variable consulted for the stylist API key
pub const STYLIST_API_KEY_ENV: &str = "WARDROBE_STYLIST_API_KEY";

/// Resolve the stylist API key, if one is configured anywhere
///
/// Absence is not an error: the stylist client degrades to fallback output
/// without a key.
pub async fn resolve_stylist_api_key(db: &Pool<Sqlite>) -> Result<Option<String>> {
    let db_key = wardrobe_common::db::settings::get_stylist_api_key(db)
        .await?
        .filter(|k| is_valid_key(k));
    let env_key = std::env::var(STYLIST_API_KEY_ENV)
        .ok()
        .filter(|k| is_valid_key(k));

    if db_key.is_some() && env_key.is_some() {
        warn!("Stylist API key found in both database and environment. Using database (highest priority).");
    }

    if let Some(key) = db_key {
        debug!("Stylist API key loaded from database");
        return Ok(Some(key));
    }
    if let Some(key) = env_key {
        debug!("Stylist API key loaded from environment variable");
        return Ok(Some(key));
    }

    Ok(None)
}

/// Validate API key (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}
