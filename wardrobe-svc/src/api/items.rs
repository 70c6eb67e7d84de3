//! Item catalog endpoints
//!
//! Request validation (readable source image, non-empty name) lives here,
//! upstream of the store: a validation failure never reaches ingestion.
//! An ingestion failure is the one hard error in this service and aborts
//! the request, so the caller's add flow stays where it is.

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use std::path::Path;
use tracing::error;
use wardrobe_common::{Item, NewItem};

use crate::{ApiError, ApiResult, AppState};

/// GET /api/items
///
/// Catalog snapshot, newest item first.
pub async fn list_items(State(state): State<AppState>) -> Json<Vec<Item>> {
    Json(state.store.items().await)
}

/// POST /api/items
///
/// **Request:** `{"source_path": "...", "name": "...", "category": "Shoe"}`
///
/// **Errors:**
/// - 400 Bad Request: blank name, or source image missing/unreadable
/// - 500 Internal Server Error: ingestion failure (copy or persistence)
pub async fn add_item(
    State(state): State<AppState>,
    Json(candidate): Json<NewItem>,
) -> ApiResult<(StatusCode, Json<Item>)> {
    if candidate.name.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Item name cannot be empty".to_string(),
        ));
    }
    if !Path::new(&candidate.source_path).is_file() {
        return Err(ApiError::BadRequest(format!(
            "Source image is not readable: {}",
            candidate.source_path
        )));
    }

    let item = state.store.add_item(candidate).await.map_err(|e| {
        error!(error = %e, "Item ingestion failed");
        ApiError::Internal(format!("Failed to add item: {}", e))
    })?;

    Ok((StatusCode::CREATED, Json(item)))
}

/// Build item routes
pub fn item_routes() -> Router<AppState> {
    Router::new().route("/api/items", get(list_items).post(add_item))
}
