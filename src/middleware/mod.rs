// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Response middleware.

pub mod public_assets;

pub use public_assets::allow_any_origin;
