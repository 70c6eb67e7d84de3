//! # Wardrobe Common Library
//!
//! Shared code for the wardrobe catalog service:
//! - Item data model and wire format
//! - Configuration loading and root folder resolution
//! - Database pool initialization and settings key-value access
//! - Common error types

pub mod config;
pub mod db;
pub mod error;
pub mod model;

pub use error::{Error, Result};
pub use model::{Category, Item, NewItem};
