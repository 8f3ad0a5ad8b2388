//! Fixtures
//!
//! YAML catalog sets for the demo binary and integration tests.

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use serde::Deserialize;
use thiserror::Error;

use crate::catalog::CatalogItem;

/// Fixture parsing errors.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Item not found
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// Two fixture entries share a key
    #[error("Duplicate fixture key: {0}")]
    DuplicateKey(String),
}

#[derive(Debug, Deserialize)]
struct CatalogFixtureFile {
    items: Vec<FixtureEntry>,
}

#[derive(Debug, Deserialize)]
struct FixtureEntry {
    key: String,
    #[serde(flatten)]
    item: CatalogItem,
}

/// A named catalog set loaded from a YAML fixture file.
#[derive(Debug)]
pub struct Fixture {
    items: Vec<CatalogItem>,
    keys: FxHashMap<String, usize>,
}

impl Fixture {
    /// Loads the fixture set `./fixtures/<name>.yml`.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if the file cannot be read or parsed.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        Self::from_file(PathBuf::from("./fixtures").join(format!("{name}.yml")))
    }

    /// Loads a fixture set from an explicit path.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if the file cannot be read or parsed, or if
    /// two entries share a key.
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, FixtureError> {
        let contents = fs::read_to_string(path.into())?;
        let file: CatalogFixtureFile = serde_norway::from_str(&contents)?;

        let mut items = Vec::with_capacity(file.items.len());
        let mut keys = FxHashMap::default();

        for entry in file.items {
            if keys.contains_key(&entry.key) {
                return Err(FixtureError::DuplicateKey(entry.key));
            }

            keys.insert(entry.key, items.len());
            items.push(entry.item);
        }

        Ok(Fixture { items, keys })
    }

    /// Gets an item by its fixture key.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError::ItemNotFound`] if the key is unknown.
    pub fn item(&self, key: &str) -> Result<&CatalogItem, FixtureError> {
        self.keys
            .get(key)
            .and_then(|&idx| self.items.get(idx))
            .ok_or_else(|| FixtureError::ItemNotFound(key.to_string()))
    }

    /// All items, in file order.
    #[must_use]
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// The first `n` items (all of them when `n` is `None`), cloned for cart
    /// use.
    #[must_use]
    pub fn catalog(&self, n: Option<usize>) -> Vec<CatalogItem> {
        self.items
            .iter()
            .take(n.unwrap_or(self.items.len()))
            .cloned()
            .collect()
    }
}
