// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Uploads a business's images to the object store, one slot at a time.

use crate::config::ASSET_FOLDER_ROOT;
use crate::error::AppError;
use crate::models::{AssetPayload, AssetSlot, AssetSlots};
use crate::services::object_store::{ObjectStore, ObjectStoreError, StoredObject};
use std::sync::Arc;

/// Objects uploaded for a registration, by slot.
pub type UploadedAssets = AssetSlots<StoredObject>;

/// An upload that stopped partway through.
///
/// `orphaned` lists what earlier slots already put in the store; nothing is
/// removed automatically.
#[derive(Debug, thiserror::Error)]
#[error("Upload of {slot} image failed: {source}")]
pub struct UploadFailure {
    pub slot: AssetSlot,
    #[source]
    pub source: ObjectStoreError,
    pub orphaned: Vec<StoredObject>,
}

impl From<UploadFailure> for AppError {
    fn from(failure: UploadFailure) -> Self {
        AppError::Upload(failure.to_string())
    }
}

/// Asset uploader over a shared object store client.
#[derive(Clone)]
pub struct AssetUploader {
    store: Arc<dyn ObjectStore>,
}

impl AssetUploader {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    /// Remote folder grouping every asset of one business.
    pub fn folder_for(namespace: &str) -> String {
        format!("{}/{}", ASSET_FOLDER_ROOT, namespace)
    }

    /// Upload each supplied slot in cover, profile, background order.
    ///
    /// Each upload completes before the next starts. The first failure
    /// aborts the call.
    pub async fn upload_assets(
        &self,
        assets: &AssetSlots<AssetPayload>,
        namespace: &str,
    ) -> Result<UploadedAssets, UploadFailure> {
        let folder = Self::folder_for(namespace);
        let mut uploaded = UploadedAssets::default();

        for (slot, payload) in assets.iter() {
            tracing::debug!(%slot, folder = %folder, bytes = payload.len(), "Uploading asset");

            match self.store.put(&folder, payload).await {
                Ok(object) => {
                    tracing::info!(%slot, public_id = %object.public_id, "Asset uploaded");
                    uploaded.insert(slot, object);
                }
                Err(source) => {
                    let orphaned: Vec<StoredObject> =
                        uploaded.into_present().into_iter().map(|(_, o)| o).collect();
                    tracing::warn!(
                        %slot,
                        error = %source,
                        orphaned = orphaned.len(),
                        "Asset upload failed"
                    );
                    return Err(UploadFailure {
                        slot,
                        source,
                        orphaned,
                    });
                }
            }
        }

        Ok(uploaded)
    }

    /// Best-effort removal of objects no record points at.
    ///
    /// Returns how many were deleted; failures are only logged.
    pub async fn discard(&self, objects: &[StoredObject]) -> usize {
        let mut deleted = 0;
        for object in objects {
            match self.store.delete(&object.public_id).await {
                Ok(()) => deleted += 1,
                Err(e) => tracing::warn!(
                    public_id = %object.public_id,
                    error = %e,
                    "Failed to delete orphaned asset"
                ),
            }
        }
        deleted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::object_store::MemoryObjectStore;

    fn payload(data: &'static [u8]) -> AssetPayload {
        AssetPayload::new(data)
    }

    fn all_three() -> AssetSlots<AssetPayload> {
        let mut assets = AssetSlots::default();
        assets.insert(AssetSlot::Background, payload(b"background"));
        assets.insert(AssetSlot::Profile, payload(b"profile"));
        assets.insert(AssetSlot::Cover, payload(b"cover"));
        assets
    }

    #[tokio::test]
    async fn test_only_supplied_slots_uploaded() {
        let store = Arc::new(MemoryObjectStore::new());
        let uploader = AssetUploader::new(store.clone());

        let mut assets = AssetSlots::default();
        assets.insert(AssetSlot::Cover, payload(b"cover"));

        let uploaded = uploader.upload_assets(&assets, "BIZ001").await.unwrap();

        assert!(uploaded.is_present(AssetSlot::Cover));
        assert!(!uploaded.is_present(AssetSlot::Profile));
        assert!(!uploaded.is_present(AssetSlot::Background));
        assert_eq!(store.objects_in("businesses/BIZ001").len(), 1);
    }

    #[tokio::test]
    async fn test_uploads_run_in_slot_order() {
        let store = Arc::new(MemoryObjectStore::new());
        let uploader = AssetUploader::new(store.clone());

        let uploaded = uploader.upload_assets(&all_three(), "BIZ002").await.unwrap();

        let history = store.history();
        assert_eq!(history.len(), 3);
        assert_eq!(uploaded.cover.as_ref().unwrap().public_id, history[0]);
        assert_eq!(uploaded.profile.as_ref().unwrap().public_id, history[1]);
        assert_eq!(uploaded.background.as_ref().unwrap().public_id, history[2]);
        assert_eq!(store.get(&history[0]).unwrap().as_ref(), b"cover");
    }

    #[tokio::test]
    async fn test_failure_aborts_and_leaves_earlier_uploads() {
        let store = Arc::new(MemoryObjectStore::new().failing_on_put(2));
        let uploader = AssetUploader::new(store.clone());

        let failure = uploader
            .upload_assets(&all_three(), "BIZ003")
            .await
            .unwrap_err();

        assert_eq!(failure.slot, AssetSlot::Profile);
        assert_eq!(failure.orphaned.len(), 1);
        // Background was never attempted; cover is still in the store
        assert_eq!(store.len(), 1);
        assert!(store.contains(&failure.orphaned[0].public_id));

        let err: AppError = failure.into();
        assert!(matches!(err, AppError::Upload(_)));
    }

    #[tokio::test]
    async fn test_empty_slots_upload_nothing() {
        let store = Arc::new(MemoryObjectStore::new());
        let uploader = AssetUploader::new(store.clone());

        let uploaded = uploader
            .upload_assets(&AssetSlots::default(), "BIZ004")
            .await
            .unwrap();

        assert!(uploaded.is_empty());
        assert!(store.history().is_empty());
    }

    #[tokio::test]
    async fn test_discard_counts_successful_deletes() {
        let store = Arc::new(MemoryObjectStore::new());
        let uploader = AssetUploader::new(store.clone());
        let uploaded = uploader.upload_assets(&all_three(), "BIZ005").await.unwrap();
        let objects: Vec<_> = uploaded.into_present().into_iter().map(|(_, o)| o).collect();

        assert_eq!(uploader.discard(&objects).await, 3);
        assert!(store.is_empty());
    }
}
