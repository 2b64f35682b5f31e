// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod asset;
pub mod business;

pub use asset::{AssetPayload, AssetSlot, AssetSlots};
pub use business::{BusinessMetadata, BusinessRecord};
