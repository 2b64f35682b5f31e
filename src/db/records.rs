// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Filesystem-backed business record store.
//!
//! One pretty-printed JSON document per business at
//! `<records_dir>/<businessId>.json`. The directory sits inside the public
//! tree, so the path doubles as the record's download URL.
//!
//! There is no locking: concurrent writes for the same id race and the last
//! rename wins.

use crate::error::AppError;
use crate::models::BusinessRecord;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

const RECORD_EXTENSION: &str = "json";

/// Business record store rooted at a single directory.
#[derive(Debug, Clone)]
pub struct RecordStore {
    dir: PathBuf,
}

impl RecordStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the document for `business_id`.
    ///
    /// The id is used verbatim as the file stem, so anything that would
    /// escape the directory or isn't a plain file name is refused.
    pub fn record_path(&self, business_id: &str) -> Result<PathBuf, AppError> {
        let usable = !business_id.is_empty()
            && business_id != "."
            && business_id != ".."
            && !business_id.contains(|c| matches!(c, '/' | '\\' | '\0'));
        if !usable {
            return Err(AppError::Request(format!(
                "Business id {:?} cannot be used as a record key",
                business_id
            )));
        }
        Ok(self
            .dir
            .join(format!("{}.{}", business_id, RECORD_EXTENSION)))
    }

    /// Keys (file stems) of every stored record.
    ///
    /// A missing directory means nothing has been registered yet.
    pub async fn list_keys(&self) -> Result<Vec<String>, AppError> {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut keys = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(RECORD_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                keys.push(stem.to_string());
            }
        }
        Ok(keys)
    }

    /// Read a record, if one exists.
    pub async fn read(&self, business_id: &str) -> Result<Option<BusinessRecord>, AppError> {
        let path = self.record_path(business_id)?;
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| AppError::Filesystem(format!("Corrupt record {}: {}", path.display(), e)))
    }

    /// Write a record, replacing any previous document for the same id.
    ///
    /// The document is serialized in full, written to a temporary sibling
    /// and renamed into place.
    pub async fn write(&self, record: &BusinessRecord) -> Result<PathBuf, AppError> {
        let business_id = record.business_id().unwrap_or_default();
        let path = self.record_path(business_id)?;

        fs::create_dir_all(&self.dir).await.map_err(|e| {
            AppError::Filesystem(format!("Failed to create {}: {}", self.dir.display(), e))
        })?;

        let document = record
            .to_document()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize record: {}", e)))?;

        // Not a .json name, so list_keys never sees it. Kept short of the id
        // so the temp name never outgrows the record name.
        let tmp_path = self.dir.join(format!(".{}.tmp", uuid::Uuid::new_v4()));

        if let Err(e) = fs::write(&tmp_path, &document).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(AppError::Filesystem(format!(
                "Failed to write {}: {}",
                tmp_path.display(),
                e
            )));
        }

        if let Err(e) = fs::rename(&tmp_path, &path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(AppError::Filesystem(format!(
                "Failed to move record into {}: {}",
                path.display(),
                e
            )));
        }

        tracing::debug!(
            business_id = business_id,
            path = %path.display(),
            bytes = document.len(),
            "Record written"
        );
        Ok(path)
    }
}
