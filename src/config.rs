//! Configuration
//!
//! Storefront settings: the remote API location, shipping rates, and where
//! the cart snapshot lives. Loaded from a YAML file, with defaults matching
//! the production storefront.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;

use crate::{cart::persistence::CART_STORAGE_KEY, shipping::ShippingRates};

/// Errors loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the configuration file
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),
}

/// Remote API settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the order/catalog backend.
    pub base_url: String,

    /// Base URL image references are resolved against.
    pub asset_base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: "https://api.protein.tn/v1".to_string(),
            asset_base_url: "https://cdn.protein.tn".to_string(),
        }
    }
}

impl ApiConfig {
    /// Resolves an opaque image reference to a display URL.
    #[must_use]
    pub fn resolve_asset_url(&self, image_ref: &str) -> String {
        format!(
            "{}/{}",
            self.asset_base_url.trim_end_matches('/'),
            image_ref.trim_start_matches('/')
        )
    }
}

/// Cart persistence settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CartConfig {
    /// Directory the file-backed snapshot store writes into.
    pub storage_dir: PathBuf,

    /// Storage key the cart snapshot is persisted under.
    pub storage_key: String,
}

impl Default for CartConfig {
    fn default() -> Self {
        CartConfig {
            storage_dir: PathBuf::from(".comptoir"),
            storage_key: CART_STORAGE_KEY.to_string(),
        }
    }
}

/// Storefront configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// Remote API settings.
    pub api: ApiConfig,

    /// Shipping rates.
    pub shipping: ShippingRates,

    /// Cart persistence settings.
    pub cart: CartConfig,
}

impl StorefrontConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;

        Ok(serde_norway::from_str(&contents)?)
    }
}
