// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Business registry: small-business profiles with hosted images
//!
//! This crate provides the backend API that accepts business details plus
//! cover, profile and background images, uploads the images to Cloudinary
//! and stores one JSON document per business.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::RecordStore;
use services::{AssetUploader, ObjectStore, RegistrationService};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub records: RecordStore,
    pub registration: RegistrationService,
}

impl AppState {
    /// Wire the services around one shared object store client.
    pub fn new(config: Config, object_store: Arc<dyn ObjectStore>) -> Self {
        let records = RecordStore::new(config.records_dir());
        let registration = RegistrationService::new(
            records.clone(),
            AssetUploader::new(object_store),
            config.cleanup_orphaned_assets,
        );

        Self {
            config,
            records,
            registration,
        }
    }
}
