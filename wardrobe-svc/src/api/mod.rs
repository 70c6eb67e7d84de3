//! HTTP API routes

pub mod health;
pub mod items;
pub mod selection;
pub mod settings;

pub use health::health_routes;
pub use items::item_routes;
pub use selection::selection_routes;
pub use settings::settings_routes;
