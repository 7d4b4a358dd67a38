//! Apple Cart Core - Cart domain types.
//!
//! This crate provides the types shared by the cart controller and its tools:
//! - `storefront` - Cart controller driven by page events
//! - `cli` - Command-line driver for page sessions
//!
//! # Architecture
//!
//! The core crate contains only types and their invariants - no I/O, no
//! storage access, no markup handling. Everything here can be exercised
//! without a page.
//!
//! # Modules
//!
//! - [`types`] - Product IDs, prices, line items and the cart itself

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
