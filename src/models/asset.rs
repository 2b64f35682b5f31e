// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Image slots and the per-slot container used throughout the upload path.

use axum::body::Bytes;
use std::fmt;
use std::str::FromStr;

/// One of the three fixed image categories a business may supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetSlot {
    Cover,
    Profile,
    Background,
}

impl AssetSlot {
    /// All slots, in upload order.
    pub const ALL: [AssetSlot; 3] = [AssetSlot::Cover, AssetSlot::Profile, AssetSlot::Background];

    /// Form field / document key for this slot.
    pub fn as_str(self) -> &'static str {
        match self {
            AssetSlot::Cover => "cover",
            AssetSlot::Profile => "profile",
            AssetSlot::Background => "background",
        }
    }
}

impl fmt::Display for AssetSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetSlot {
    type Err = UnknownSlot;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cover" => Ok(AssetSlot::Cover),
            "profile" => Ok(AssetSlot::Profile),
            "background" => Ok(AssetSlot::Background),
            other => Err(UnknownSlot(other.to_string())),
        }
    }
}

/// A form part named something other than a known slot.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown asset slot: {0}")]
pub struct UnknownSlot(pub String);

/// One optional value per slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetSlots<T> {
    pub cover: Option<T>,
    pub profile: Option<T>,
    pub background: Option<T>,
}

impl<T> Default for AssetSlots<T> {
    fn default() -> Self {
        Self {
            cover: None,
            profile: None,
            background: None,
        }
    }
}

impl<T> AssetSlots<T> {
    pub fn get(&self, slot: AssetSlot) -> Option<&T> {
        match slot {
            AssetSlot::Cover => self.cover.as_ref(),
            AssetSlot::Profile => self.profile.as_ref(),
            AssetSlot::Background => self.background.as_ref(),
        }
    }

    pub fn slot_mut(&mut self, slot: AssetSlot) -> &mut Option<T> {
        match slot {
            AssetSlot::Cover => &mut self.cover,
            AssetSlot::Profile => &mut self.profile,
            AssetSlot::Background => &mut self.background,
        }
    }

    /// Store a value, returning whatever was previously in the slot.
    pub fn insert(&mut self, slot: AssetSlot, value: T) -> Option<T> {
        self.slot_mut(slot).replace(value)
    }

    pub fn is_present(&self, slot: AssetSlot) -> bool {
        self.get(slot).is_some()
    }

    /// Number of populated slots.
    pub fn len(&self) -> usize {
        AssetSlot::ALL.iter().filter(|s| self.is_present(**s)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Populated slots in upload order.
    pub fn iter(&self) -> impl Iterator<Item = (AssetSlot, &T)> + '_ {
        AssetSlot::ALL
            .into_iter()
            .filter_map(move |slot| self.get(slot).map(|v| (slot, v)))
    }

    /// Consume into populated slots in upload order.
    pub fn into_present(self) -> Vec<(AssetSlot, T)> {
        let Self {
            cover,
            profile,
            background,
        } = self;
        [
            (AssetSlot::Cover, cover),
            (AssetSlot::Profile, profile),
            (AssetSlot::Background, background),
        ]
        .into_iter()
        .filter_map(|(slot, v)| v.map(|v| (slot, v)))
        .collect()
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> AssetSlots<U> {
        AssetSlots {
            cover: self.cover.map(&mut f),
            profile: self.profile.map(&mut f),
            background: self.background.map(&mut f),
        }
    }
}

/// An image buffered in memory, ready to be sent to the object store.
#[derive(Debug, Clone)]
pub struct AssetPayload {
    /// Original filename as supplied by the client
    pub file_name: Option<String>,
    /// MIME type as supplied by the client
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl AssetPayload {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: None,
            content_type: None,
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
