// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request};
use business_registry::config::Config;
use business_registry::routes::create_router;
use business_registry::services::MemoryObjectStore;
use business_registry::AppState;
use std::path::PathBuf;
use std::sync::Arc;

/// Test application wired to an in-memory object store and a fresh
/// public directory.
#[allow(dead_code)]
pub struct TestApp {
    pub router: axum::Router,
    pub state: Arc<AppState>,
    pub store: Arc<MemoryObjectStore>,
}

/// Unique, not-yet-created public directory.
#[allow(dead_code)]
pub fn temp_public_dir() -> PathBuf {
    std::env::temp_dir().join(format!("business_registry_{}", uuid::Uuid::new_v4()))
}

/// Offline config rooted at a fresh public directory.
#[allow(dead_code)]
pub fn test_config() -> Config {
    Config {
        public_dir: temp_public_dir(),
        ..Config::test_default()
    }
}

#[allow(dead_code)]
pub fn create_test_app() -> TestApp {
    create_test_app_with(test_config(), MemoryObjectStore::new())
}

#[allow(dead_code)]
pub fn create_test_app_with(config: Config, store: MemoryObjectStore) -> TestApp {
    let store = Arc::new(store);
    let state = Arc::new(AppState::new(config, store.clone()));
    TestApp {
        router: create_router(state.clone()),
        state,
        store,
    }
}

/// Hand-built `multipart/form-data` body.
#[allow(dead_code)]
pub struct MultipartBody {
    boundary: String,
    buf: Vec<u8>,
}

#[allow(dead_code)]
impl MultipartBody {
    pub fn new() -> Self {
        Self {
            boundary: "business-registry-test-boundary".to_string(),
            buf: Vec::new(),
        }
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.buf.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                self.boundary, name, value
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, data: &[u8]) -> Self {
        self.buf.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: image/png\r\n\r\n",
                self.boundary, name, file_name
            )
            .as_bytes(),
        );
        self.buf.extend_from_slice(data);
        self.buf.extend_from_slice(b"\r\n");
        self
    }

    /// The standard seven metadata fields for `business_id`.
    pub fn business(self, business_id: &str, name: &str) -> Self {
        self.text("businessId", business_id)
            .text("password", "plaintext-pw")
            .text("name", name)
            .text("category", "Retail")
            .text("address", "12 High St")
            .text("email", "owner@example.test")
            .text("contact", "555-0199")
    }

    pub fn into_request(mut self) -> Request<Body> {
        self.buf
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        Request::builder()
            .method("POST")
            .uri("/upload-images")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", self.boundary),
            )
            .body(Body::from(self.buf))
            .unwrap()
    }
}

/// Collect a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
