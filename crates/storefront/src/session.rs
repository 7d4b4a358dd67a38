//! One page load: the controller plus the dispatch table the page wires up.

use crate::config::CartConfig;
use crate::controller::CartController;
use crate::dispatch::{ClickTarget, DispatchTable, Dispatched};
use crate::error::Result;
use crate::notifier::Notifier;
use crate::page::Page;
use crate::storage::KeyValueStore;

/// A loaded page with its cart.
#[derive(Debug)]
pub struct PageSession<S, N> {
    controller: CartController<S, N>,
    table: DispatchTable<S, N>,
}

impl<S: KeyValueStore, N: Notifier> PageSession<S, N> {
    /// Load the page: restore the saved cart and draw it once.
    ///
    /// # Errors
    ///
    /// Returns render and storage errors from the initial render.
    pub fn page_loaded(page: Page, store: S, notifier: N, config: &CartConfig) -> Result<Self> {
        let table = DispatchTable::for_page(page.regions());
        let mut controller = CartController::load(page, store, notifier, config);
        controller.render()?;
        tracing::debug!(?table, "Page session ready");
        Ok(Self { controller, table })
    }

    /// Deliver a click.
    ///
    /// # Errors
    ///
    /// Returns render and storage errors raised while handling the click.
    pub fn click(&mut self, target: &ClickTarget) -> Result<Dispatched> {
        self.table.dispatch(&mut self.controller, target)
    }

    #[must_use]
    pub const fn controller(&self) -> &CartController<S, N> {
        &self.controller
    }

    pub const fn controller_mut(&mut self) -> &mut CartController<S, N> {
        &mut self.controller
    }

    #[must_use]
    pub const fn table(&self) -> &DispatchTable<S, N> {
        &self.table
    }

    /// Leave the page, handing back storage and notifier.
    pub fn into_parts(self) -> (S, N) {
        self.controller.into_parts()
    }
}
