//! The cart controller.
//!
//! One controller exists per page load. It owns the cart, the page it was
//! loaded on, the origin's storage and the shopper notifier, and every
//! operation runs to completion before returning. A mutation is not complete
//! until the cart has been written back to storage.

use apple_cart_core::{AddOutcome, Cart, Price, ProductId, RemoveOutcome};
use tracing::instrument;

use crate::config::CartConfig;
use crate::error::{CartError, Result};
use crate::notifier::{Notice, Notifier};
use crate::page::Page;
use crate::render::{CartDisplay, ModalState};
use crate::storage::{KeyValueStore, load_cart, save_cart};

/// Summary of a placed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderSummary {
    pub total: Price,
    pub item_count: u64,
}

/// Cart state and the collaborators it is rendered to and persisted in.
#[derive(Debug)]
pub struct CartController<S, N> {
    cart: Cart,
    page: Page,
    store: S,
    notifier: N,
    storage_key: String,
    display: Option<CartDisplay>,
    modal: ModalState,
}

impl<S: KeyValueStore, N: Notifier> CartController<S, N> {
    /// Load the saved cart for this page.
    ///
    /// Missing or unusable saved data gives an empty cart; nothing is
    /// reported to the shopper.
    pub fn load(page: Page, store: S, notifier: N, config: &CartConfig) -> Self {
        let cart = load_cart(&store, &config.storage_key);
        tracing::info!(
            items = cart.len(),
            units = cart.item_count(),
            "Cart loaded"
        );
        Self {
            cart,
            page,
            store,
            notifier,
            storage_key: config.storage_key.clone(),
            display: None,
            modal: ModalState::Hidden,
        }
    }

    /// Redraw the cart regions and write the cart back to storage.
    ///
    /// Pages without the full set of cart regions get no display, but the
    /// cart is still persisted. Calling this repeatedly with no mutation in
    /// between writes identical data. The display only changes once the
    /// write has succeeded.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Render` if the markup fails to render, or
    /// `CartError::Storage` if the write fails.
    pub fn render(&mut self) -> Result<()> {
        let display = if self.page.regions().can_display_cart() {
            Some(CartDisplay::render(&self.cart)?)
        } else {
            None
        };
        save_cart(&mut self.store, &self.storage_key, &self.cart)?;
        self.display = display;
        Ok(())
    }

    /// Render and persist a mutation, restoring `previous` if that fails so
    /// the cart never drifts from what storage holds.
    fn commit(&mut self, previous: Cart) -> Result<()> {
        if let Err(e) = self.render() {
            tracing::error!(error = %e, "Cart not saved; change rolled back");
            self.cart = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Add one unit of a product declared on the current page.
    ///
    /// Name and price are taken from the page the first time the product is
    /// added and kept as-is afterwards.
    ///
    /// # Errors
    ///
    /// Returns `CartError::MissingProductData` (cart unchanged, shopper not
    /// notified) if the page does not describe the product, or a render or
    /// storage error from [`Self::render`] (cart rolled back).
    #[instrument(skip_all, fields(product_id = %id))]
    pub fn add_item(&mut self, id: &ProductId) -> Result<AddOutcome> {
        let product = self.page.product(id).inspect_err(|e| {
            tracing::error!(error = %e, "Cannot add product");
        })?;

        if let Some(existing) = self.cart.get(id)
            && (existing.name != product.name || existing.price != product.price)
        {
            tracing::warn!(
                cart_name = %existing.name,
                cart_price = existing.price.amount(),
                page_name = %product.name,
                page_price = product.price.amount(),
                "Page metadata differs from cart line; keeping cart values"
            );
        }

        let previous = self.cart.clone();
        let outcome = self
            .cart
            .add(product.id.clone(), product.name.clone(), product.price);
        self.commit(previous)?;
        tracing::info!(?outcome, "Item added to cart");

        self.notifier.acknowledge(&Notice::ItemAdded { name: product.name });
        Ok(outcome)
    }

    /// Remove one unit of a product. Unknown IDs change nothing.
    ///
    /// # Errors
    ///
    /// Returns a render or storage error from [`Self::render`] (cart rolled
    /// back).
    #[instrument(skip_all, fields(product_id = %id))]
    pub fn remove_item(&mut self, id: &ProductId) -> Result<RemoveOutcome> {
        let previous = self.cart.clone();
        let outcome = self.cart.remove(id);
        self.commit(previous)?;
        tracing::info!(?outcome, "Item removed from cart");
        Ok(outcome)
    }

    /// Place the order: clear and save the cart, confirm the total to the
    /// shopper and close the cart modal. Nothing is sent anywhere.
    ///
    /// # Errors
    ///
    /// Returns `CartError::EmptyCartCheckout` after telling the shopper when
    /// the cart is empty, or a render or storage error from [`Self::render`].
    /// On a render or storage error the cart is kept and no confirmation is
    /// shown.
    #[instrument(skip_all)]
    pub fn checkout(&mut self) -> Result<OrderSummary> {
        if self.cart.is_empty() {
            self.notifier.acknowledge(&Notice::EmptyCart);
            tracing::info!("Checkout refused: cart is empty");
            return Err(CartError::EmptyCartCheckout);
        }

        let summary = OrderSummary {
            total: self.cart.total(),
            item_count: self.cart.item_count(),
        };

        // The order only counts as placed once the cleared cart is saved
        let previous = self.cart.clone();
        self.cart.clear();
        self.commit(previous)?;

        self.notifier.acknowledge(&Notice::OrderPlaced {
            total: summary.total,
        });
        self.close_cart();
        tracing::info!(
            total = summary.total.amount(),
            units = summary.item_count,
            "Order placed"
        );
        Ok(summary)
    }

    /// Render the cart and show the modal, if the page has one.
    ///
    /// # Errors
    ///
    /// Returns a render or storage error from [`Self::render`].
    pub fn open_cart(&mut self) -> Result<()> {
        self.render()?;
        if self.page.regions().cart_modal {
            self.modal = ModalState::Visible;
        }
        Ok(())
    }

    /// Hide the cart modal.
    pub fn close_cart(&mut self) {
        self.modal = ModalState::Hidden;
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub const fn page(&self) -> &Page {
        &self.page
    }

    /// What the cart regions currently show, if the page can show the cart
    /// and it has been rendered at least once.
    #[must_use]
    pub const fn display(&self) -> Option<&CartDisplay> {
        self.display.as_ref()
    }

    #[must_use]
    pub const fn modal(&self) -> ModalState {
        self.modal
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub const fn notifier(&self) -> &N {
        &self.notifier
    }

    pub const fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    /// End the page load, handing back storage and notifier.
    pub fn into_parts(self) -> (S, N) {
        (self.store, self.notifier)
    }
}
