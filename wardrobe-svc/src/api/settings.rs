//! Settings API endpoint
//!
//! Provides POST /api/settings/stylist_api_key so the key can be configured
//! without restarting; the database value is authoritative and picked up on
//! the next stylist call.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{ApiError, ApiResult, AppState};

/// Request payload for setting the stylist API key
#[derive(Debug, Deserialize)]
pub struct SetApiKeyRequest {
    pub api_key: String,
}

/// Response payload for API key configuration
#[derive(Debug, Serialize)]
pub struct SetApiKeyResponse {
    pub success: bool,
    pub message: String,
}

/// POST /api/settings/stylist_api_key
///
/// **Request:** `{"api_key": "your-key"}`
///
/// **Errors:**
/// - 400 Bad Request: empty or whitespace-only key
/// - 500 Internal Server Error: database write failure
pub async fn set_stylist_api_key(
    State(state): State<AppState>,
    Json(payload): Json<SetApiKeyRequest>,
) -> ApiResult<Json<SetApiKeyResponse>> {
    if !crate::config::is_valid_key(&payload.api_key) {
        return Err(ApiError::BadRequest(
            "API key cannot be empty or whitespace-only".to_string(),
        ));
    }

    wardrobe_common::db::settings::set_stylist_api_key(&state.db, &payload.api_key)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to save API key: {}", e)))?;

    info!("Stylist API key configured");

    Ok(Json(SetApiKeyResponse {
        success: true,
        message: "Stylist API key configured successfully".to_string(),
    }))
}

/// Build settings routes
pub fn settings_routes() -> Router<AppState> {
    Router::new().route("/api/settings/stylist_api_key", post(set_stylist_api_key))
}
