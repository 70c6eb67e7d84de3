//! Item store
//!
//! Durable, append-only catalog of wardrobe items. Images are copied into
//! the app-owned `wardrobe/` directory under the root folder; metadata is
//! kept as an in-memory newest-first list whose JSON serialization is
//! persisted under one fixed settings key after every successful mutation.
//!
//! The store is an explicitly owned object: constructed once at startup and
//! handed to the API layer by reference, never a process-wide singleton.
//! All mutations go through a single writer lock so that concurrent add
//! calls are strictly serialized and a later full-list write can never
//! clobber an earlier one.

use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};
use uuid::Uuid;
use wardrobe_common::db::settings;
use wardrobe_common::{Item, NewItem, Result};

/// Name of the image directory under the root folder
const WARDROBE_DIR: &str = "wardrobe";

/// Extension used when the source image has none
const DEFAULT_IMAGE_EXT: &str = "jpg";

/// Durable catalog of wardrobe items
pub struct ItemStore {
    db: sqlx::SqlitePool,
    wardrobe_dir: PathBuf,
    /// In-memory catalog, newest first; the single source of truth for reads
    items: RwLock<Vec<Item>>,
    /// Serializes mutations end to end (directory create, copy, persist)
    writer: Mutex<()>,
    loading: AtomicBool,
}

impl ItemStore {
    /// Create a store rooted at `root_folder`
    ///
    /// No I/O happens here; call [`ItemStore::initialize`] to load the
    /// persisted catalog.
    pub fn new(db: sqlx::SqlitePool, root_folder: &Path) -> Self {
        Self {
            db,
            wardrobe_dir: root_folder.join(WARDROBE_DIR),
            items: RwLock::new(Vec::new()),
            writer: Mutex::new(()),
            loading: AtomicBool::new(false),
        }
    }

    /// Load the persisted catalog into memory
    ///
    /// A missing key or unreadable payload means "first run": the store
    /// starts empty and the condition is logged, never surfaced. The loading
    /// flag is observable for the duration so callers can distinguish "not
    /// yet loaded" from "loaded empty".
    pub async fn initialize(&self) {
        self.loading.store(true, Ordering::SeqCst);

        let loaded = match settings::get_catalog_json(&self.db).await {
            Ok(Some(json)) => match serde_json::from_str::<Vec<Item>>(&json) {
                Ok(items) => items,
                Err(e) => {
                    warn!(error = %e, "Persisted catalog is unreadable, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read persisted catalog, starting empty");
                Vec::new()
            }
        };

        info!(item_count = loaded.len(), "Item catalog loaded");
        *self.items.write().await = loaded;

        self.loading.store(false, Ordering::SeqCst);
    }

    /// Whether [`ItemStore::initialize`] is currently running
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Ingest a new item
    ///
    /// All-or-nothing: the image directory is created (idempotent), the
    /// source bytes are copied to `wardrobe/<id>.<ext>`, the new item is
    /// prepended to the list and the full list is re-serialized to the
    /// settings key. On any failure the in-memory list is left unchanged and
    /// the error propagates; a partially copied file is accepted garbage
    /// with no catalog entry.
    pub async fn add_item(&self, candidate: NewItem) -> Result<Item> {
        let _writer = self.writer.lock().await;

        tokio::fs::create_dir_all(&self.wardrobe_dir).await?;

        let id = Uuid::new_v4();
        let ext = Path::new(&candidate.source_path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or(DEFAULT_IMAGE_EXT);
        let destination = self.wardrobe_dir.join(format!("{}.{}", id, ext));

        tokio::fs::copy(&candidate.source_path, &destination).await?;

        let updated = {
            let items = self.items.read().await;
            // Clamp against the newest stored item so insertion order always
            // matches timestamp order even if the wall clock steps back.
            let newest = items.first().map(|i| i.timestamp).unwrap_or(0);
            let item = Item {
                id,
                uri: destination.to_string_lossy().into_owned(),
                name: candidate.name,
                category: candidate.category,
                timestamp: Utc::now().timestamp_millis().max(newest),
            };
            let mut updated = Vec::with_capacity(items.len() + 1);
            updated.push(item);
            updated.extend(items.iter().cloned());
            updated
        };

        let json = serde_json::to_string(&updated)?;
        settings::set_catalog_json(&self.db, &json).await?;

        let item = updated[0].clone();
        *self.items.write().await = updated;

        info!(
            item_id = %item.id,
            name = %item.name,
            category = %item.category,
            "Item added to wardrobe"
        );

        Ok(item)
    }

    /// Snapshot of the catalog, newest first
    pub async fn items(&self) -> Vec<Item> {
        self.items.read().await.clone()
    }

    /// Look up a single item by id
    pub async fn item_by_id(&self, id: Uuid) -> Option<Item> {
        self.items.read().await.iter().find(|i| i.id == id).cloned()
    }
}
