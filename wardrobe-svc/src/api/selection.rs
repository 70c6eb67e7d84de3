//! Outfit selection endpoints
//!
//! Drives the composer state machine over HTTP. Compose returns the ordered
//! outfit together with the stylist analysis and optional visualization
//! text; stylist failures never fail the request, so the preview always has
//! something to render.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use wardrobe_common::{Category, Item};

use crate::composer::ComposeError;
use crate::services::StylingAnalysis;
use crate::{ApiError, ApiResult, AppState};

/// Current selection session state
#[derive(Debug, Serialize)]
pub struct SelectionResponse {
    /// Whether selection mode is active
    pub selecting: bool,
    /// Whether compose would succeed right now
    pub can_compose: bool,
    pub upper: Option<Item>,
    pub bottom: Option<Item>,
    pub shoe: Option<Item>,
}

impl SelectionResponse {
    fn from_composer(composer: &crate::composer::OutfitComposer) -> Self {
        Self {
            selecting: composer.is_selecting(),
            can_compose: composer.can_compose(),
            upper: composer.selected(Category::UpperWear).cloned(),
            bottom: composer.selected(Category::BottomWear).cloned(),
            shoe: composer.selected(Category::Shoe).cloned(),
        }
    }
}

/// Request payload for toggling an item
#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub item_id: Uuid,
}

/// Composed outfit with stylist output
#[derive(Debug, Serialize)]
pub struct ComposeResponse {
    /// Populated selections in Upper -> Bottom -> Shoe order
    pub outfit: Vec<Item>,
    pub analysis: StylingAnalysis,
    /// Lookbook-style visualization text, if the stylist produced one
    pub visualization: Option<String>,
}

/// GET /api/selection
pub async fn get_selection(State(state): State<AppState>) -> Json<SelectionResponse> {
    let composer = state.composer.read().await;
    Json(SelectionResponse::from_composer(&composer))
}

/// POST /api/selection/enter
pub async fn enter_selection(State(state): State<AppState>) -> Json<SelectionResponse> {
    let mut composer = state.composer.write().await;
    composer.enter_selection();
    Json(SelectionResponse::from_composer(&composer))
}

/// POST /api/selection/cancel
pub async fn cancel_selection(State(state): State<AppState>) -> Json<SelectionResponse> {
    let mut composer = state.composer.write().await;
    composer.cancel();
    Json(SelectionResponse::from_composer(&composer))
}

/// POST /api/selection/toggle
///
/// **Request:** `{"item_id": "<uuid>"}`
///
/// Toggling an accessory item, or toggling outside selection mode, changes
/// nothing (the response reflects the unchanged state).
///
/// **Errors:**
/// - 404 Not Found: no catalogued item with that id
pub async fn toggle_selection(
    State(state): State<AppState>,
    Json(payload): Json<ToggleRequest>,
) -> ApiResult<Json<SelectionResponse>> {
    let item = state
        .store
        .item_by_id(payload.item_id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("No item with id {}", payload.item_id)))?;

    let mut composer = state.composer.write().await;
    composer.toggle_select(&item);
    Ok(Json(SelectionResponse::from_composer(&composer)))
}

/// POST /api/selection/compose
///
/// **Errors:**
/// - 409 Conflict: selection mode is not active
/// - 400 Bad Request: no wearable category populated
pub async fn compose_outfit(
    State(state): State<AppState>,
) -> ApiResult<Json<ComposeResponse>> {
    let outfit = {
        let mut composer = state.composer.write().await;
        composer.compose().map_err(|e| match e {
            ComposeError::NotSelecting => ApiError::Conflict(e.to_string()),
            ComposeError::EmptySelection => ApiError::BadRequest(e.to_string()),
        })?
    };

    info!(item_count = outfit.len(), "Outfit composed");

    // Stylist calls degrade to fallback / None; they cannot fail the preview
    let api_key = crate::config::resolve_stylist_api_key(&state.db)
        .await
        .ok()
        .flatten();
    let analysis = state.stylist.analyze_outfit(api_key.as_deref(), &outfit).await;
    let visualization = state.stylist.describe_outfit(api_key.as_deref(), &outfit).await;

    Ok(Json(ComposeResponse {
        outfit,
        analysis,
        visualization,
    }))
}

/// Build selection routes
pub fn selection_routes() -> Router<AppState> {
    Router::new()
        .route("/api/selection", get(get_selection))
        .route("/api/selection/enter", post(enter_selection))
        .route("/api/selection/toggle", post(toggle_selection))
        .route("/api/selection/cancel", post(cancel_selection))
        .route("/api/selection/compose", post(compose_outfit))
}
