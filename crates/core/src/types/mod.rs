//! Core types for Apple Cart.
//!
//! This module provides type-safe wrappers for the cart's domain concepts.

pub mod cart;
pub mod id;
pub mod price;

pub use cart::{AddOutcome, Cart, InvalidCart, LineItem, RemoveOutcome};
pub use id::*;
pub use price::Price;
