//! Unified error handling for the cart controller.
//!
//! Provides a unified `CartError` type returned by controller operations.
//! Each variant carries its reporting policy: see [`CartError::is_user_facing`].

use apple_cart_core::ProductId;
use thiserror::Error;

use crate::storage::StorageError;

/// Controller-level error type.
#[derive(Debug, Error)]
pub enum CartError {
    /// The current page declares no usable product markup for this ID.
    ///
    /// This is an integration fault in the page, not something the shopper
    /// did, so it is logged and never shown.
    #[error("Product data for ID {id} not found on this page: {reason}")]
    MissingProductData { id: ProductId, reason: String },

    /// Checkout was attempted with no items in the cart.
    #[error("Checkout attempted with an empty cart")]
    EmptyCartCheckout,

    /// Writing the cart to storage failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Rendering the cart markup failed.
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),
}

impl CartError {
    /// Whether the shopper is told about this error through a notice.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(self, Self::EmptyCartCheckout)
    }

    /// Build a `MissingProductData` error.
    pub fn missing_product(id: &ProductId, reason: impl Into<String>) -> Self {
        Self::MissingProductData {
            id: id.clone(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_error_display() {
        let err = CartError::missing_product(&ProductId::new("ipad"), "no element");
        assert_eq!(
            err.to_string(),
            "Product data for ID ipad not found on this page: no element"
        );

        let err = CartError::EmptyCartCheckout;
        assert_eq!(err.to_string(), "Checkout attempted with an empty cart");
    }

    #[test]
    fn test_cart_error_policy() {
        assert!(CartError::EmptyCartCheckout.is_user_facing());
        assert!(!CartError::missing_product(&ProductId::new("x"), "gone").is_user_facing());
    }
}
