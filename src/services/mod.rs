// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod cloudinary;
pub mod id_allocator;
pub mod object_store;
pub mod registration;
pub mod uploader;

pub use cloudinary::CloudinaryStore;
pub use id_allocator::latest_suffix;
pub use object_store::{MemoryObjectStore, ObjectStore, ObjectStoreError, StoredObject};
pub use registration::{RegistrationService, RegistrationStage};
pub use uploader::{AssetUploader, UploadFailure, UploadedAssets};
