// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Remote object store abstraction.
//!
//! Production uses [`CloudinaryStore`](crate::services::CloudinaryStore);
//! [`MemoryObjectStore`] keeps everything in process for offline runs and
//! tests, and can be told to fail a specific upload.

use crate::models::AssetPayload;
use axum::body::Bytes;
use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// An object accepted by the remote store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Store-side identifier, needed to delete the object later
    pub public_id: String,
    /// Absolute HTTPS URL of the object
    pub secure_url: String,
}

/// Errors from the remote object store.
#[derive(Debug, thiserror::Error)]
pub enum ObjectStoreError {
    #[error("Object store rejected request (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Object store request failed: {0}")]
    Transport(String),

    #[error("Unexpected object store response: {0}")]
    InvalidResponse(String),
}

/// Remote store for uploaded business images.
#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload one payload into `folder`. Resolves only once the store has
    /// accepted (or refused) the whole object.
    async fn put(&self, folder: &str, payload: &AssetPayload)
        -> Result<StoredObject, ObjectStoreError>;

    /// Remove a previously uploaded object.
    async fn delete(&self, public_id: &str) -> Result<(), ObjectStoreError>;
}

/// In-process object store.
pub struct MemoryObjectStore {
    base_url: String,
    objects: DashMap<String, Bytes>,
    puts: AtomicUsize,
    fail_on_put: Option<usize>,
    fail_deletes: bool,
    /// Public ids in the order they were accepted
    history: Mutex<Vec<String>>,
}

impl Default for MemoryObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self {
            base_url: "https://objects.memory.invalid".to_string(),
            objects: DashMap::new(),
            puts: AtomicUsize::new(0),
            fail_on_put: None,
            fail_deletes: false,
            history: Mutex::new(Vec::new()),
        }
    }

    /// Refuse the `n`-th put (1-based, counted across the store's lifetime).
    pub fn failing_on_put(mut self, n: usize) -> Self {
        self.fail_on_put = Some(n);
        self
    }

    /// Refuse every delete.
    pub fn failing_deletes(mut self) -> Self {
        self.fail_deletes = true;
        self
    }

    pub fn contains(&self, public_id: &str) -> bool {
        self.objects.contains_key(public_id)
    }

    pub fn get(&self, public_id: &str) -> Option<Bytes> {
        self.objects.get(public_id).map(|v| v.value().clone())
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Public ids currently stored under `folder`, sorted.
    pub fn objects_in(&self, folder: &str) -> Vec<String> {
        let prefix = format!("{}/", folder);
        let mut ids: Vec<String> = self
            .objects
            .iter()
            .filter(|e| e.key().starts_with(&prefix))
            .map(|e| e.key().clone())
            .collect();
        ids.sort();
        ids
    }

    /// Every accepted put, in acceptance order (deleted objects included).
    pub fn history(&self) -> Vec<String> {
        self.history
            .lock()
            .map(|h| h.clone())
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put(
        &self,
        folder: &str,
        payload: &AssetPayload,
    ) -> Result<StoredObject, ObjectStoreError> {
        let n = self.puts.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_on_put == Some(n) {
            return Err(ObjectStoreError::Rejected {
                status: 500,
                message: format!("injected failure on upload #{}", n),
            });
        }

        let public_id = format!("{}/asset{}", folder, n);
        self.objects.insert(public_id.clone(), payload.bytes.clone());
        if let Ok(mut history) = self.history.lock() {
            history.push(public_id.clone());
        }

        Ok(StoredObject {
            secure_url: format!("{}/{}", self.base_url, public_id),
            public_id,
        })
    }

    async fn delete(&self, public_id: &str) -> Result<(), ObjectStoreError> {
        if self.fail_deletes {
            return Err(ObjectStoreError::Transport(
                "injected delete failure".to_string(),
            ));
        }
        self.objects.remove(public_id);
        Ok(())
    }
}
