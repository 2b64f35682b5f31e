// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Cloudinary credentials are read once at startup and handed to a single
//! shared client; nothing here is re-derived per request.

use std::env;
use std::path::PathBuf;

/// Subdirectory of the public directory holding one JSON document per business.
pub const RECORDS_SUBDIR: &str = "businesses";

/// Remote folder prefix; each business gets `businesses/<businessId>`.
pub const ASSET_FOLDER_ROOT: &str = "businesses";

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MAX_ASSET_BYTES: usize = 10 * 1024 * 1024;
const DEFAULT_CLOUDINARY_API_BASE: &str = "https://api.cloudinary.com/v1_1";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Root of the statically served tree; records live under `businesses/`
    pub public_dir: PathBuf,
    /// Cloudinary cloud name
    pub cloudinary_cloud_name: String,
    /// Cloudinary API key (public half)
    pub cloudinary_api_key: String,
    /// Cloudinary API secret, used only for request signing
    pub cloudinary_api_secret: String,
    /// Cloudinary REST base, overridable for proxies and local fakes
    pub cloudinary_api_base: String,
    /// Upper bound on a single buffered image
    pub max_asset_bytes: usize,
    /// Delete already-uploaded assets when a registration fails
    pub cleanup_orphaned_assets: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            port: parse_var("PORT", DEFAULT_PORT)?,
            public_dir: env::var("PUBLIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("public")),
            cloudinary_cloud_name: required("CLOUDINARY_CLOUD_NAME")?,
            cloudinary_api_key: required("CLOUDINARY_API_KEY")?,
            cloudinary_api_secret: required("CLOUDINARY_API_SECRET")?,
            cloudinary_api_base: env::var("CLOUDINARY_API_BASE")
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_CLOUDINARY_API_BASE.to_string()),
            max_asset_bytes: parse_var("MAX_ASSET_BYTES", DEFAULT_MAX_ASSET_BYTES)?,
            cleanup_orphaned_assets: parse_var("CLEANUP_ORPHANED_ASSETS", false)?,
        })
    }

    /// Offline configuration for tests, rooted at the given public directory.
    pub fn test_default() -> Self {
        Self {
            port: DEFAULT_PORT,
            public_dir: env::temp_dir().join("business-registry-test"),
            cloudinary_cloud_name: "test-cloud".to_string(),
            cloudinary_api_key: "test_api_key".to_string(),
            cloudinary_api_secret: "test_api_secret".to_string(),
            cloudinary_api_base: "http://127.0.0.1:9/v1_1".to_string(),
            max_asset_bytes: DEFAULT_MAX_ASSET_BYTES,
            cleanup_orphaned_assets: false,
        }
    }

    /// Directory holding the persisted business documents.
    pub fn records_dir(&self) -> PathBuf {
        self.public_dir.join(RECORDS_SUBDIR)
    }

    /// Body limit for the upload route: three full assets plus form fields.
    pub fn max_request_bytes(&self) -> usize {
        self.max_asset_bytes
            .saturating_mul(3)
            .saturating_add(1024 * 1024)
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .map(|v| v.trim().to_string())
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(name))
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            value: raw.clone(),
        }),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}
