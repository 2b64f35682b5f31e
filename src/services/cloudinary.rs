// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cloudinary upload API client.
//!
//! Handles:
//! - Signed image uploads into a per-business folder
//! - Signed deletes (used only by orphan cleanup)
//!
//! One instance is built at startup and shared by every request.

use crate::config::Config;
use crate::models::AssetPayload;
use crate::services::object_store::{ObjectStore, ObjectStoreError, StoredObject};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha2::{Digest, Sha256};

/// Cloudinary client.
#[derive(Clone)]
pub struct CloudinaryStore {
    http: reqwest::Client,
    /// `<api base>/<cloud name>`
    base_url: String,
    api_key: String,
    api_secret: String,
}

impl CloudinaryStore {
    /// Create a new client from the startup configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: format!(
                "{}/{}",
                config.cloudinary_api_base, config.cloudinary_cloud_name
            ),
            api_key: config.cloudinary_api_key.clone(),
            api_secret: config.cloudinary_api_secret.clone(),
        }
    }

    /// Parameter string that gets signed: `k=v` pairs sorted by key and
    /// joined with `&`.
    pub fn string_to_sign(params: &[(&str, &str)]) -> String {
        let mut sorted: Vec<_> = params.to_vec();
        sorted.sort_by(|a, b| a.0.cmp(b.0));
        sorted
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// SHA-256 request signature, hex encoded.
    pub fn sign(&self, params: &[(&str, &str)]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(Self::string_to_sign(params).as_bytes());
        hasher.update(self.api_secret.as_bytes());
        hex::encode(hasher.finalize())
    }

    fn timestamp() -> String {
        chrono::Utc::now().timestamp().to_string()
    }

    /// Check response status and parse the JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        response: reqwest::Response,
    ) -> Result<T, ObjectStoreError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or(body);

            if status.as_u16() == 429 {
                tracing::warn!("Cloudinary rate limit hit (429)");
            }

            return Err(ObjectStoreError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ObjectStoreError::InvalidResponse(format!("JSON parse error: {}", e)))
    }
}

#[async_trait::async_trait]
impl ObjectStore for CloudinaryStore {
    async fn put(
        &self,
        folder: &str,
        payload: &AssetPayload,
    ) -> Result<StoredObject, ObjectStoreError> {
        let timestamp = Self::timestamp();
        let signature = self.sign(&[("folder", folder), ("timestamp", &timestamp)]);

        let mut file = Part::stream_with_length(
            reqwest::Body::from(payload.bytes.clone()),
            payload.len() as u64,
        )
        .file_name(payload.file_name.clone().unwrap_or_else(|| "upload".to_string()));
        if let Some(content_type) = &payload.content_type {
            file = file
                .mime_str(content_type)
                .map_err(|e| ObjectStoreError::Transport(format!("Bad content type: {}", e)))?;
        }

        let form = Form::new()
            .part("file", file)
            .text("api_key", self.api_key.clone())
            .text("timestamp", timestamp)
            .text("folder", folder.to_string())
            .text("signature", signature)
            .text("signature_algorithm", "sha256");

        let response = self
            .http
            .post(format!("{}/image/upload", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ObjectStoreError::Transport(e.to_string()))?;

        let uploaded: UploadResponse = Self::check_response_json(response).await?;
        tracing::debug!(
            public_id = %uploaded.public_id,
            bytes = payload.len(),
            "Cloudinary upload complete"
        );

        Ok(StoredObject {
            public_id: uploaded.public_id,
            secure_url: uploaded.secure_url,
        })
    }

    async fn delete(&self, public_id: &str) -> Result<(), ObjectStoreError> {
        let timestamp = Self::timestamp();
        let signature = self.sign(&[("public_id", public_id), ("timestamp", &timestamp)]);

        let response = self
            .http
            .post(format!("{}/image/destroy", self.base_url))
            .form(&[
                ("public_id", public_id),
                ("timestamp", timestamp.as_str()),
                ("api_key", self.api_key.as_str()),
                ("signature", signature.as_str()),
                ("signature_algorithm", "sha256"),
            ])
            .send()
            .await
            .map_err(|e| ObjectStoreError::Transport(e.to_string()))?;

        let destroyed: DestroyResponse = Self::check_response_json(response).await?;
        if destroyed.result != "ok" {
            tracing::warn!(
                public_id,
                result = %destroyed.result,
                "Cloudinary destroy did not report ok"
            );
        }
        Ok(())
    }
}

/// Subset of the upload response we use.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    public_id: String,
    secure_url: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

/// Cloudinary error envelope: `{"error": {"message": "..."}}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorMessage,
}

#[derive(Debug, Deserialize)]
struct ErrorMessage {
    message: String,
}
