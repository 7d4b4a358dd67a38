//! Per-origin key-value storage and the persisted cart codec.
//!
//! The cart lives under a single key as a JSON array of line items. Storage is
//! synchronous: every write completes before the operation that caused it
//! returns.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use apple_cart_core::Cart;
use thiserror::Error;

use crate::config::{ConfigError, validate_origin};

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Synchronous string key-value storage scoped to one origin.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write does not complete.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write does not complete.
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

// =============================================================================
// In-memory store
// =============================================================================

/// In-process store. Contents vanish with the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

// =============================================================================
// File-backed store
// =============================================================================

/// Store persisted as one JSON object file per origin (`<dir>/<origin>.json`).
///
/// The file is re-read on every access so separate page loads observe each
/// other's writes. Writes go to a temporary sibling and are renamed into place.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Open the store for `origin` under `dir`. The file is created on first write.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `origin` cannot name a file.
    pub fn open(dir: impl AsRef<Path>, origin: &str) -> Result<Self, ConfigError> {
        validate_origin(origin, "origin")?;
        Ok(Self {
            path: dir.as_ref().join(format!("{origin}.json")),
        })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(source) => Err(StorageError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Read entries for a write; a corrupt file is replaced rather than kept.
    fn read_entries_for_write(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match self.read_entries() {
            Err(StorageError::Json(e)) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Discarding corrupt storage file");
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let io_err = |source: io::Error| StorageError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(entries)?).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.read_entries_for_write()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.read_entries_for_write()?;
        if entries.remove(key).is_some() {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}

// =============================================================================
// Cart codec
// =============================================================================

/// Load the cart stored under `key`.
///
/// Never fails: a missing key, unreadable storage, malformed JSON, or content
/// that breaks cart invariants all yield an empty cart.
pub fn load_cart(store: &impl KeyValueStore, key: &str) -> Cart {
    let raw = match store.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!(key, "No saved cart, starting empty");
            return Cart::new();
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "Cart storage unreadable, starting empty");
            return Cart::new();
        }
    };

    // A stored `null` means no cart
    match serde_json::from_str::<Option<Cart>>(&raw) {
        Ok(cart) => cart.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(key, error = %e, "Saved cart is invalid, starting empty");
            Cart::new()
        }
    }
}

/// Persist `cart` under `key`.
///
/// # Errors
///
/// Returns `StorageError` if serialization or the storage write fails.
pub fn save_cart(store: &mut impl KeyValueStore, key: &str, cart: &Cart) -> Result<(), StorageError> {
    let raw = serde_json::to_string(cart)?;
    store.set_item(key, &raw)
}
