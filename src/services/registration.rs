// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Business registration: upload images, then persist the record.
//!
//! A registration moves through
//! `Received -> UploadingAssets -> Persisting -> Done`, dropping to `Failed`
//! on the first error. Uploads and the record write are not transactional:
//! by default a failure leaves already-uploaded images in the remote store.
//! With `cleanup_orphaned_assets` set, those images are deleted on a
//! best-effort basis before the error is returned.

use crate::db::RecordStore;
use crate::error::AppError;
use crate::models::{AssetPayload, AssetSlots, BusinessMetadata, BusinessRecord};
use crate::services::object_store::StoredObject;
use crate::services::uploader::AssetUploader;
use std::fmt;

/// Where a registration is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationStage {
    Received,
    UploadingAssets,
    Persisting,
    Done,
    Failed,
}

impl fmt::Display for RegistrationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RegistrationStage::Received => "received",
            RegistrationStage::UploadingAssets => "uploading_assets",
            RegistrationStage::Persisting => "persisting",
            RegistrationStage::Done => "done",
            RegistrationStage::Failed => "failed",
        })
    }
}

/// Registration service.
#[derive(Clone)]
pub struct RegistrationService {
    records: RecordStore,
    uploader: AssetUploader,
    cleanup_orphaned_assets: bool,
}

impl RegistrationService {
    pub fn new(
        records: RecordStore,
        uploader: AssetUploader,
        cleanup_orphaned_assets: bool,
    ) -> Self {
        Self {
            records,
            uploader,
            cleanup_orphaned_assets,
        }
    }

    /// Register (or re-register) a business.
    ///
    /// Returns the record as written. Any previous record with the same id is
    /// replaced wholesale.
    #[tracing::instrument(
        skip_all,
        fields(business_id = metadata.business_id.as_deref().unwrap_or_default())
    )]
    pub async fn register(
        &self,
        metadata: BusinessMetadata,
        assets: AssetSlots<AssetPayload>,
    ) -> Result<BusinessRecord, AppError> {
        let business_id = metadata.business_id.clone().unwrap_or_default();
        tracing::info!(
            stage = %RegistrationStage::Received,
            assets = assets.len(),
            "Registration received"
        );

        // Refuse unusable keys before anything reaches the remote store
        if let Err(e) = self.records.record_path(&business_id) {
            return Err(self.fail(RegistrationStage::Received, e));
        }

        tracing::debug!(stage = %RegistrationStage::UploadingAssets, "Uploading assets");
        let uploaded = match self.uploader.upload_assets(&assets, &business_id).await {
            Ok(uploaded) => uploaded,
            Err(failure) => {
                if self.cleanup_orphaned_assets {
                    self.cleanup(&failure.orphaned).await;
                }
                return Err(self.fail(RegistrationStage::UploadingAssets, failure.into()));
            }
        };

        tracing::debug!(stage = %RegistrationStage::Persisting, "Persisting record");
        let objects: Vec<StoredObject> = uploaded
            .iter()
            .map(|(_, object)| object.clone())
            .collect();
        let record = BusinessRecord::new(metadata, uploaded.map(|o| o.secure_url));

        if let Err(e) = self.records.write(&record).await {
            if self.cleanup_orphaned_assets {
                self.cleanup(&objects).await;
            }
            return Err(self.fail(RegistrationStage::Persisting, e));
        }

        tracing::info!(
            stage = %RegistrationStage::Done,
            assets = objects.len(),
            "Business registered"
        );
        Ok(record)
    }

    fn fail(&self, during: RegistrationStage, err: AppError) -> AppError {
        tracing::error!(
            stage = %RegistrationStage::Failed,
            during = %during,
            kind = err.kind(),
            error = %err,
            "Registration failed"
        );
        err
    }

    async fn cleanup(&self, objects: &[StoredObject]) {
        if objects.is_empty() {
            return;
        }
        let deleted = self.uploader.discard(objects).await;
        tracing::info!(
            deleted,
            orphaned = objects.len() - deleted,
            "Cleaned up assets from failed registration"
        );
    }
}
