//! wardrobe-svc library interface
//!
//! Exposes the item store, outfit composer, stylist client and router for
//! integration testing.

pub mod api;
pub mod composer;
pub mod config;
pub mod error;
pub mod services;
pub mod store;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::composer::OutfitComposer;
use crate::services::StylistClient;
use crate::store::ItemStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool (settings key-value store)
    pub db: SqlitePool,
    /// Durable item catalog; single source of truth for all items
    pub store: Arc<ItemStore>,
    /// Per-process selection session (the app is single-user and local)
    pub composer: Arc<RwLock<OutfitComposer>>,
    /// External stylist client; stateless, failures degrade to fallbacks
    pub stylist: Arc<StylistClient>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(db: SqlitePool, store: Arc<ItemStore>, stylist: Arc<StylistClient>) -> Self {
        Self {
            db,
            store,
            composer: Arc::new(RwLock::new(OutfitComposer::new())),
            stylist,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::health_routes())
        .merge(api::item_routes())
        .merge(api::selection_routes())
        .merge(api::settings_routes())
        .with_state(state)
}
