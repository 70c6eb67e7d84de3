//! wardrobe-svc - Wardrobe Catalog Service
//!
//! Local HTTP service owning the durable wardrobe item catalog and the
//! outfit composition flow. Items are photographed clothing pieces; the
//! service copies each image into app-owned storage, persists the catalog
//! in SQLite, and asks an external stylist service to describe composed
//! outfits.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use wardrobe_svc::services::StylistClient;
use wardrobe_svc::store::ItemStore;
use wardrobe_svc::AppState;

#[derive(Debug, Parser)]
#[command(name = "wardrobe-svc", version, about = "Wardrobe catalog service")]
struct Args {
    /// Root folder for the image directory and database
    #[arg(long)]
    root_folder: Option<String>,

    /// Port to listen on
    #[arg(long, default_value_t = 5740)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    info!("Starting wardrobe-svc");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    // Step 1: Resolve root folder (CLI -> env -> TOML -> platform default)
    let root_folder = wardrobe_common::config::resolve_root_folder(args.root_folder.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to resolve root folder: {}", e))?;
    std::fs::create_dir_all(&root_folder)?;
    info!("Root folder: {}", root_folder.display());

    // Step 2: Open or create database
    let db_path = root_folder.join("wardrobe.db");
    info!("Database: {}", db_path.display());
    let db_pool = wardrobe_common::db::init_pool(&db_path).await?;

    // Step 3: Load the persisted catalog (missing or corrupt state means
    // "first run", never a startup failure)
    let store = Arc::new(ItemStore::new(db_pool.clone(), &root_folder));
    store.initialize().await;

    // Step 4: Stylist client (works unkeyed; falls back until configured)
    let stylist = Arc::new(StylistClient::new().map_err(|e| anyhow::anyhow!("{}", e))?);

    let state = AppState::new(db_pool, store, stylist);
    let app = wardrobe_svc::build_router(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", args.port)).await?;
    info!("Listening on http://127.0.0.1:{}", args.port);
    info!("Health check: http://127.0.0.1:{}/health", args.port);

    axum::serve(listener, app).await?;

    Ok(())
}
