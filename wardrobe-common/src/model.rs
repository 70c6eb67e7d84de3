//! Wardrobe item data model
//!
//! Wire format is the persisted catalog entry: `id` (string), `uri` (string),
//! `name` (string), `category` (display string), `timestamp` (epoch
//! milliseconds). The catalog is stored as a JSON array of these entries,
//! newest item first.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Item category
///
/// Only the three wearable categories participate in outfit selection;
/// `Accessory` items are catalogued but never selectable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Upper Wear")]
    UpperWear,
    #[serde(rename = "Bottom Wear")]
    BottomWear,
    Shoe,
    Accessory,
}

impl Category {
    /// Whether this category occupies an outfit slot
    pub fn is_wearable(&self) -> bool {
        !matches!(self, Category::Accessory)
    }

    /// The three wearable categories in outfit display order
    /// (upper, then bottom, then shoe)
    pub const WEARABLE: [Category; 3] = [Category::UpperWear, Category::BottomWear, Category::Shoe];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::UpperWear => "Upper Wear",
            Category::BottomWear => "Bottom Wear",
            Category::Shoe => "Shoe",
            Category::Accessory => "Accessory",
        };
        f.write_str(name)
    }
}

/// One catalogued wardrobe item
///
/// `id`, `uri` and `category` are immutable after creation; the store owns
/// the image behind `uri` exclusively (it is never the picker-supplied
/// source location).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: Uuid,
    pub uri: String,
    pub name: String,
    pub category: Category,
    /// Creation time, epoch milliseconds; non-decreasing with insertion order
    pub timestamp: i64,
}

/// Ingestion candidate for [`Item`] creation
///
/// `source_path` points at the picker-supplied image; validation of the name
/// and category happens upstream of the store.
#[derive(Debug, Clone, Deserialize)]
pub struct NewItem {
    pub source_path: String,
    pub name: String,
    pub category: Category,
}
