//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `CART_STORAGE_KEY` - Storage key holding the serialized cart (default: `appleCart`)
//! - `CART_ORIGIN` - Origin whose storage the cart lives in (default: `localhost`)
//! - `CART_STORAGE_DIR` - Directory for file-backed origin storage (default: `.apple-cart`)

use std::path::PathBuf;

use thiserror::Error;

/// Default storage key, shared with pages already in the wild.
pub const DEFAULT_STORAGE_KEY: &str = "appleCart";
const DEFAULT_ORIGIN: &str = "localhost";
const DEFAULT_STORAGE_DIR: &str = ".apple-cart";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart controller configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Key under which the cart is persisted
    pub storage_key: String,
    /// Origin name scoping the storage
    pub origin: String,
    /// Directory holding per-origin storage files
    pub storage_dir: PathBuf,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            origin: DEFAULT_ORIGIN.to_string(),
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
        }
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unusable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let storage_key =
            lookup("CART_STORAGE_KEY").unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string());
        validate_storage_key(&storage_key)?;

        let origin = lookup("CART_ORIGIN").unwrap_or_else(|| DEFAULT_ORIGIN.to_string());
        validate_origin(&origin, "CART_ORIGIN")?;

        let storage_dir = lookup("CART_STORAGE_DIR")
            .map_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR), PathBuf::from);

        Ok(Self {
            storage_key,
            origin,
            storage_dir,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn validate_storage_key(key: &str) -> Result<(), ConfigError> {
    if key.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar(
            "CART_STORAGE_KEY".to_string(),
            "must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Origins name a storage file, so they must be a single path component.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` tagged with `var_name` otherwise.
pub fn validate_origin(origin: &str, var_name: &str) -> Result<(), ConfigError> {
    if origin.is_empty() || origin == "." || origin == ".." {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("'{origin}' is not a usable origin name"),
        ));
    }
    if origin.contains(['/', '\\']) {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            "must not contain path separators".to_string(),
        ));
    }
    Ok(())
}
