//! Cart persistence
//!
//! The cart is persisted as a JSON snapshot of its lines under a fixed key in
//! a durable key-value store. The store is single-owner: there is no
//! cross-writer coordination, the last writer wins.

use std::{fs, io, path::PathBuf};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::{Cart, CartLine};

/// Key under which the cart snapshot is persisted.
pub const CART_STORAGE_KEY: &str = "comptoir.cart";

/// Errors raised by a snapshot storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying IO failure while reading or writing a snapshot.
    #[error("storage IO error: {0}")]
    Io(#[from] io::Error),
}

/// Durable key-value storage for serialized snapshots.
///
/// Mirrors the browser-profile storage the cart lives in: string keys, string
/// values, `None` for an absent key.
pub trait SnapshotStorage {
    /// Reads the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Writes `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory storage backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: FxHashMap<String, String>,
}

impl MemoryStorage {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        MemoryStorage::default()
    }
}

impl SnapshotStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());

        Ok(())
    }
}

/// File-backed storage backend: one file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Creates a store rooted at `dir`. The directory is created on first
    /// write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SnapshotStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::Io(err)),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;

        Ok(())
    }
}

/// Serialized form of a cart: its lines, in add order.
#[derive(Debug, Serialize, Deserialize)]
struct CartSnapshot {
    lines: Vec<CartLine>,
}

/// Serializes a cart to its snapshot form.
///
/// # Errors
///
/// Returns a [`serde_json::Error`] if serialization fails.
pub fn encode_snapshot(cart: &Cart) -> Result<String, serde_json::Error> {
    serde_json::to_string(&CartSnapshot {
        lines: cart.lines().to_vec(),
    })
}

/// Restores a cart from its snapshot form.
///
/// Invariants are re-established on the way in: duplicate item ids merge and
/// zero quantities are dropped, so a tampered snapshot still yields a valid
/// cart.
///
/// # Errors
///
/// Returns a [`serde_json::Error`] if the snapshot is malformed.
pub fn decode_snapshot(raw: &str) -> Result<Cart, serde_json::Error> {
    let snapshot: CartSnapshot = serde_json::from_str(raw)?;

    Ok(Cart::from_lines(snapshot.lines))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::catalog::{CatalogItem, ItemId, StockStatus};

    use super::*;

    fn sample_cart() -> Cart {
        let mut cart = Cart::new();

        let _ = cart.add(
            CatalogItem {
                id: ItemId(1),
                name: "Whey Protein 2kg".to_string(),
                list_price: Decimal::from(189),
                promo_price: None,
                promo_expiration: None,
                image_ref: None,
                stock: StockStatus::InStock,
            },
            2,
        );

        let _ = cart.add(
            CatalogItem {
                id: ItemId(2),
                name: "Shaker 700ml".to_string(),
                list_price: Decimal::from(25),
                promo_price: None,
                promo_expiration: None,
                image_ref: None,
                stock: StockStatus::Unknown,
            },
            1,
        );

        cart
    }

    #[test]
    fn snapshot_round_trips() -> TestResult {
        let cart = sample_cart();

        let raw = encode_snapshot(&cart)?;
        let restored = decode_snapshot(&raw)?;

        assert_eq!(restored, cart);

        Ok(())
    }

    #[test]
    fn malformed_snapshot_is_an_error() {
        assert!(decode_snapshot("not json at all").is_err());
        assert!(decode_snapshot(r#"{"lines": 3}"#).is_err());
    }

    #[test]
    fn memory_storage_round_trips() -> TestResult {
        let mut storage = MemoryStorage::new();

        assert!(storage.read(CART_STORAGE_KEY)?.is_none());

        storage.write(CART_STORAGE_KEY, "payload")?;

        assert_eq!(storage.read(CART_STORAGE_KEY)?.as_deref(), Some("payload"));

        Ok(())
    }

    #[test]
    fn file_storage_round_trips() -> TestResult {
        let dir = tempfile::tempdir()?;
        let mut storage = FileStorage::new(dir.path().join("store"));

        assert!(storage.read(CART_STORAGE_KEY)?.is_none());

        storage.write(CART_STORAGE_KEY, "payload")?;

        assert_eq!(storage.read(CART_STORAGE_KEY)?.as_deref(), Some("payload"));

        Ok(())
    }
}
