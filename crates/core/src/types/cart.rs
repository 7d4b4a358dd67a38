//! The cart and its line items.
//!
//! A [`Cart`] is an ordered list of [`LineItem`]s, unique by product ID.
//! Quantities are [`NonZeroU32`], so a line item with zero units cannot be
//! represented; dropping to zero removes the line instead.

use std::collections::HashSet;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::id::ProductId;
use super::price::Price;

/// One product entry in the cart with an accumulated quantity.
///
/// Field names match the persisted layout (`id`, `name`, `price`, `quantity`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub quantity: NonZeroU32,
}

impl LineItem {
    /// Create a line item holding a single unit.
    #[must_use]
    pub fn single(id: ProductId, name: impl Into<String>, price: Price) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            quantity: NonZeroU32::MIN,
        }
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.price.times(self.quantity.get())
    }
}

/// A list of line items that breaks cart invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid cart: duplicate line item for product {0}")]
pub struct InvalidCart(pub ProductId);

/// Result of adding a product to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line item was appended with quantity 1.
    Added,
    /// An existing line item's quantity was incremented.
    Incremented { quantity: NonZeroU32 },
}

/// Result of removing one unit of a product from the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The line item's quantity was decremented and it remains in the cart.
    Decremented { quantity: NonZeroU32 },
    /// The line item held a single unit and was removed.
    Removed,
    /// No line item for that product.
    NotPresent,
}

/// Ordered collection of line items, unique by product ID.
///
/// Serializes as a plain JSON array of line items. Deserialization rejects
/// arrays with duplicate IDs; zero quantities are rejected by `NonZeroU32`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LineItem>", into = "Vec<LineItem>")]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from line items, checking ID uniqueness.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCart` naming the first product ID that appears twice.
    pub fn from_items(items: Vec<LineItem>) -> Result<Self, InvalidCart> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(&item.id) {
                return Err(InvalidCart(item.id.clone()));
            }
        }
        Ok(Self { items })
    }

    /// Add one unit of a product.
    ///
    /// If the product is already in the cart its quantity is incremented and
    /// the stored name and price are left untouched.
    pub fn add(&mut self, id: ProductId, name: impl Into<String>, price: Price) -> AddOutcome {
        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            item.quantity = item.quantity.saturating_add(1);
            return AddOutcome::Incremented {
                quantity: item.quantity,
            };
        }
        self.items.push(LineItem::single(id, name, price));
        AddOutcome::Added
    }

    /// Remove one unit of a product, dropping the line when it reaches zero.
    pub fn remove(&mut self, id: &ProductId) -> RemoveOutcome {
        let Some(index) = self.items.iter().position(|item| &item.id == id) else {
            return RemoveOutcome::NotPresent;
        };
        let Some(item) = self.items.get_mut(index) else {
            return RemoveOutcome::NotPresent;
        };
        match NonZeroU32::new(item.quantity.get() - 1) {
            Some(quantity) => {
                item.quantity = quantity;
                RemoveOutcome::Decremented { quantity }
            }
            None => {
                self.items.remove(index);
                RemoveOutcome::Removed
            }
        }
    }

    /// Remove every line item.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Look up the line item for a product.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Number of distinct line items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Grand total: sum of `price * quantity` over all line items.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(LineItem::subtotal).sum()
    }

    /// Total number of units across all line items.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity.get()))
            .sum()
    }
}

impl TryFrom<Vec<LineItem>> for Cart {
    type Error = InvalidCart;

    fn try_from(items: Vec<LineItem>) -> Result<Self, Self::Error> {
        Self::from_items(items)
    }
}

impl From<Cart> for Vec<LineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}
