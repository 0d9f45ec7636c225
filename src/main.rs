// Main entry point - Dependency injection and server setup
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::{path::PathBuf, sync::Arc};

use anyhow::Context;

use crate::application::dataset_store::DatasetStore;
use crate::application::panel_service::PanelService;
use crate::application::upload_service::UploadService;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::sample_data::SampleData;
use crate::presentation::app_state::AppState;
use crate::presentation::router::create_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = load_app_config()?;

    // The upload directory must exist before the first upload lands
    std::fs::create_dir_all(&config.upload_dir)
        .with_context(|| format!("Failed to create upload directory {}", config.upload_dir))?;

    // Load bundled sample datasets (infrastructure layer)
    let samples = Arc::new(SampleData::load()?);

    // Create services (application layer)
    let store = DatasetStore::new();
    let upload_service = UploadService::new(store, PathBuf::from(&config.upload_dir));
    let panel_service = PanelService::new(samples);

    // Create application state
    let state = Arc::new(AppState {
        upload_service,
        panel_service,
    });

    // Build router (presentation layer)
    let router = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;
    println!("Starting analytics-dashboard server on {}", config.listen_addr);

    axum::serve(listener, router).await?;

    Ok(())
}
