//! Apple Cart Storefront library.
//!
//! The cart controller for a static multi-page storefront. Product data comes
//! from the markup of whatever page is loaded, the cart is kept in per-origin
//! key-value storage, and checkout only clears local state.
//!
//! # Modules
//!
//! - [`controller`] - Cart state and its operations (load, render, add, remove, checkout)
//! - [`dispatch`] - Click classification and the per-page dispatch table
//! - [`session`] - One page load: controller plus dispatch table
//! - [`page`] - Product and region lookup from page markup
//! - [`storage`] - Key-value stores and the persisted cart codec
//! - [`render`] - Cart display data and markup
//! - [`notifier`] - Blocking shopper notices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod controller;
pub mod dispatch;
pub mod error;
pub mod notifier;
pub mod page;
pub mod render;
pub mod session;
pub mod storage;

pub use config::CartConfig;
pub use controller::{CartController, OrderSummary};
pub use dispatch::{ClickTarget, DispatchTable, Dispatched, TriggerKind};
pub use error::{CartError, Result};
pub use notifier::{LogNotifier, Notice, Notifier, RecordingNotifier};
pub use page::{Page, PageRegions, ProductData};
pub use render::{CartDisplay, ModalState};
pub use session::PageSession;
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
