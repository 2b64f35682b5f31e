// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Business Registry API Server
//!
//! Registers small-business profiles, hosting their images on Cloudinary and
//! publishing one JSON document per business.

use business_registry::{
    config::Config,
    services::{CloudinaryStore, ObjectStore},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Business Registry API");

    // One Cloudinary client for the whole process
    let object_store: Arc<dyn ObjectStore> = Arc::new(CloudinaryStore::new(&config));
    tracing::info!(
        cloud = %config.cloudinary_cloud_name,
        max_asset_bytes = config.max_asset_bytes,
        cleanup_orphaned_assets = config.cleanup_orphaned_assets,
        "Cloudinary client initialized"
    );
    tracing::info!(
        records = %config.records_dir().display(),
        public = %config.public_dir.display(),
        "Serving business records"
    );

    // Build shared state
    let state = Arc::new(AppState::new(config.clone(), object_store));

    // Build router
    let app = business_registry::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("business_registry=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
