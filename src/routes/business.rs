// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Business registration routes.

use crate::error::{AppError, Result};
use crate::models::asset::UnknownSlot;
use crate::models::{AssetPayload, AssetSlot, AssetSlots, BusinessMetadata};
use crate::services::id_allocator;
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{
        multipart::{Field, MultipartRejection},
        DefaultBodyLimit, Multipart, State,
    },
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

/// Registration routes. The upload route's body limit comes from config.
pub fn routes(max_request_bytes: usize) -> Router<Arc<AppState>> {
    Router::new()
        .route("/latest-business-id", get(latest_business_id))
        .route(
            "/upload-images",
            post(upload_images).layer(DefaultBodyLimit::max(max_request_bytes)),
        )
}

// ─── Latest ID ───────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestBusinessIdResponse {
    pub last_number: u64,
}

/// Highest numeric suffix among registered businesses (0 if none).
async fn latest_business_id(
    State(state): State<Arc<AppState>>,
) -> Json<LatestBusinessIdResponse> {
    let last_number = id_allocator::latest_suffix(&state.records).await;
    Json(LatestBusinessIdResponse { last_number })
}

// ─── Registration ────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
}

/// Decoded registration form.
#[derive(Debug, Default)]
pub struct RegistrationForm {
    pub metadata: BusinessMetadata,
    pub assets: AssetSlots<AssetPayload>,
}

/// Register a business: upload its images, then store its record.
///
/// A body that isn't multipart at all fails like any other bad request.
async fn upload_images(
    State(state): State<Arc<AppState>>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>> {
    let mut multipart = multipart.map_err(malformed)?;
    let form = read_registration_form(&mut multipart, state.config.max_asset_bytes).await?;

    state
        .registration
        .register(form.metadata, form.assets)
        .await?;

    Ok(Json(UploadResponse {
        success: true,
        message: "Business uploaded successfully.".to_string(),
    }))
}

fn malformed(err: impl std::fmt::Display) -> AppError {
    AppError::Request(format!("Malformed multipart body: {}", err))
}

/// Split a multipart body into metadata fields and slot files.
///
/// Parts with a filename are files and must be named after a slot, at most
/// one per slot. Other parts are metadata; unknown names are ignored and a
/// repeated name keeps its last value.
pub async fn read_registration_form(
    multipart: &mut Multipart,
    max_asset_bytes: usize,
) -> Result<RegistrationForm> {
    let mut form = RegistrationForm::default();

    while let Some(mut field) = multipart.next_field().await.map_err(malformed)? {
        let name = field.name().unwrap_or_default().to_string();

        let Some(file_name) = field.file_name().map(str::to_string) else {
            let value = field.text().await.map_err(malformed)?;
            if !form.metadata.set_field(&name, value) {
                tracing::debug!(field = %name, "Ignoring unknown form field");
            }
            continue;
        };

        // File parts without a filename are dropped, whatever they carry.
        // Browsers send one for an untouched file input.
        if file_name.is_empty() {
            tracing::debug!(field = %name, "Skipping file part without a filename");
            continue;
        }

        let slot: AssetSlot = name
            .parse()
            .map_err(|e: UnknownSlot| AppError::Request(e.to_string()))?;
        let content_type = field.content_type().map(str::to_string);
        let bytes = read_bounded(&mut field, slot, max_asset_bytes).await?;

        let payload = AssetPayload {
            file_name: Some(file_name),
            content_type,
            bytes,
        };
        if form.assets.insert(slot, payload).is_some() {
            return Err(AppError::Request(format!("More than one {} file", slot)));
        }
    }

    Ok(form)
}

/// Buffer one file part, refusing anything over `limit` bytes.
async fn read_bounded(field: &mut Field<'_>, slot: AssetSlot, limit: usize) -> Result<Bytes> {
    let mut buf = Vec::new();
    while let Some(chunk) = field.chunk().await.map_err(malformed)? {
        if buf.len() + chunk.len() > limit {
            return Err(AppError::Request(format!(
                "{} file exceeds {} bytes",
                slot, limit
            )));
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(Bytes::from(buf))
}
