// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Business record model, stored as one JSON document per business.

use crate::models::asset::{AssetSlot, AssetSlots};
use serde::{Deserialize, Serialize};

/// Form metadata submitted with a registration.
///
/// Every field is optional: a missing form field is left out of the
/// document rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessMetadata {
    /// Caller-chosen identifier, also the document key (e.g. `BIZ042`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_id: Option<String>,
    /// Stored as supplied, without hashing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
}

impl BusinessMetadata {
    /// Set a metadata field by its form name. Returns false for unknown names.
    pub fn set_field(&mut self, field: &str, value: String) -> bool {
        let target = match field {
            "businessId" => &mut self.business_id,
            "password" => &mut self.password,
            "name" => &mut self.name,
            "category" => &mut self.category,
            "address" => &mut self.address,
            "email" => &mut self.email,
            "contact" => &mut self.contact,
            _ => return false,
        };
        *target = Some(value);
        true
    }
}

/// Persisted business document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessRecord {
    #[serde(flatten)]
    pub metadata: BusinessMetadata,
    /// Cover image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    /// Profile image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    /// Background image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

impl BusinessRecord {
    /// Merge metadata with the URLs of whatever assets were uploaded.
    pub fn new(metadata: BusinessMetadata, asset_urls: AssetSlots<String>) -> Self {
        Self {
            metadata,
            cover: asset_urls.cover,
            profile: asset_urls.profile,
            background: asset_urls.background,
        }
    }

    pub fn business_id(&self) -> Option<&str> {
        self.metadata.business_id.as_deref()
    }

    pub fn asset_url(&self, slot: AssetSlot) -> Option<&str> {
        match slot {
            AssetSlot::Cover => self.cover.as_deref(),
            AssetSlot::Profile => self.profile.as_deref(),
            AssetSlot::Background => self.background.as_deref(),
        }
    }

    /// Pretty-printed JSON, two-space indent.
    pub fn to_document(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec_pretty(self)
    }
}
