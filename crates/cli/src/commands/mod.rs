//! CLI command implementations.

pub mod products;
pub mod session;
