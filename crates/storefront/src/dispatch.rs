//! Click dispatch.
//!
//! Pages delegate clicks: a click is classified by what the clicked element
//! is (its class, its `id`) and routed to a handler registered for that kind
//! of trigger. Which handlers exist depends on which regions the page has,
//! mirroring which listeners a page would have wired up.

use std::collections::HashMap;
use std::fmt;

use apple_cart_core::{AddOutcome, ProductId, RemoveOutcome};

use crate::controller::{CartController, OrderSummary};
use crate::error::{CartError, Result};
use crate::notifier::Notifier;
use crate::page::{
    ADD_TO_CART_CLASS, CART_MODAL_ID, CHECKOUT_BUTTON_ID, CLOSE_BUTTON_CLASS, Element,
    PageRegions, REMOVE_FROM_CART_CLASS, VIEW_CART_BUTTON_ID,
};
use crate::storage::KeyValueStore;

/// The element a click landed on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickTarget {
    pub id: Option<String>,
    pub classes: Vec<String>,
    /// The `data-id` attribute, naming a product on cart triggers.
    pub data_id: Option<String>,
}

impl ClickTarget {
    /// Describe a page element as a click target.
    #[must_use]
    pub fn from_element(element: &Element) -> Self {
        Self {
            id: element.id().map(str::to_string),
            classes: element.classes().map(str::to_string).collect(),
            data_id: element.data("id").map(str::to_string),
        }
    }

    /// An add-to-cart trigger for `product`.
    #[must_use]
    pub fn add_to_cart(product: &ProductId) -> Self {
        Self::with_class(ADD_TO_CART_CLASS).data(product.as_str())
    }

    /// A remove trigger rendered in the cart list for `product`.
    #[must_use]
    pub fn remove_from_cart(product: &ProductId) -> Self {
        Self::with_class(REMOVE_FROM_CART_CLASS).data(product.as_str())
    }

    /// An element identified by `id`.
    #[must_use]
    pub fn by_id(id: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            ..Self::default()
        }
    }

    /// An element carrying `class`.
    #[must_use]
    pub fn with_class(class: &str) -> Self {
        Self {
            classes: vec![class.to_string()],
            ..Self::default()
        }
    }

    #[must_use]
    fn data(mut self, data_id: &str) -> Self {
        self.data_id = Some(data_id.to_string());
        self
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    fn product_id(&self) -> Option<ProductId> {
        self.data_id.as_deref().map(ProductId::from)
    }
}

/// Kinds of cart trigger a click can hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerKind {
    AddToCart,
    RemoveFromCart,
    Checkout,
    ViewCart,
    CloseModal,
    /// The modal's own container, i.e. the area outside its content.
    ModalBackdrop,
}

impl TriggerKind {
    /// Classify a click target, if it is a cart trigger at all.
    #[must_use]
    pub fn classify(target: &ClickTarget) -> Option<Self> {
        if target.has_class(ADD_TO_CART_CLASS) {
            return Some(Self::AddToCart);
        }
        if target.has_class(REMOVE_FROM_CART_CLASS) {
            return Some(Self::RemoveFromCart);
        }
        if target.has_class(CLOSE_BUTTON_CLASS) {
            return Some(Self::CloseModal);
        }
        match target.id.as_deref() {
            Some(CHECKOUT_BUTTON_ID) => Some(Self::Checkout),
            Some(VIEW_CART_BUTTON_ID) => Some(Self::ViewCart),
            Some(CART_MODAL_ID) => Some(Self::ModalBackdrop),
            _ => None,
        }
    }
}

/// What a dispatched click did.
#[derive(Debug)]
pub enum Dispatched {
    Added(AddOutcome),
    Removed(RemoveOutcome),
    OrderPlaced(OrderSummary),
    CartOpened,
    CartClosed,
    /// The handler refused the click; the error has already been logged or
    /// shown to the shopper according to its policy.
    Refused(CartError),
    /// No handler applies to the click.
    Ignored,
}

/// Handler invoked for one kind of trigger.
pub type Handler<S, N> = fn(&mut CartController<S, N>, &ClickTarget) -> Result<Dispatched>;

/// Mapping from trigger kinds to their handlers.
pub struct DispatchTable<S, N> {
    handlers: HashMap<TriggerKind, Handler<S, N>>,
}

impl<S, N> fmt::Debug for DispatchTable<S, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self.handlers.keys().collect();
        kinds.sort_by_key(|kind| format!("{kind:?}"));
        f.debug_struct("DispatchTable")
            .field("triggers", &kinds)
            .finish()
    }
}

impl<S: KeyValueStore, N: Notifier> DispatchTable<S, N> {
    /// An empty table; every click is ignored.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// The table a page with `regions` wires up.
    ///
    /// Add-to-cart and backdrop clicks are always handled. Remove, checkout,
    /// view and close are handled only when their region or trigger exists.
    #[must_use]
    pub fn for_page(regions: PageRegions) -> Self {
        let mut table = Self::new();
        table.register(TriggerKind::AddToCart, handle_add);
        table.register(TriggerKind::ModalBackdrop, handle_close);
        if regions.cart_items {
            table.register(TriggerKind::RemoveFromCart, handle_remove);
        }
        if regions.checkout_button {
            table.register(TriggerKind::Checkout, handle_checkout);
        }
        if regions.view_cart_button {
            table.register(TriggerKind::ViewCart, handle_view);
        }
        if regions.close_button {
            table.register(TriggerKind::CloseModal, handle_close);
        }
        table
    }

    /// Register `handler` for `kind`, replacing any previous handler.
    pub fn register(&mut self, kind: TriggerKind, handler: Handler<S, N>) {
        self.handlers.insert(kind, handler);
    }

    #[must_use]
    pub fn is_registered(&self, kind: TriggerKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    /// Route a click to its handler.
    ///
    /// Missing product data and empty-cart checkouts come back as
    /// [`Dispatched::Refused`].
    ///
    /// # Errors
    ///
    /// Returns render and storage errors from the handler.
    pub fn dispatch(
        &self,
        controller: &mut CartController<S, N>,
        target: &ClickTarget,
    ) -> Result<Dispatched> {
        let Some(kind) = TriggerKind::classify(target) else {
            return Ok(Dispatched::Ignored);
        };
        let Some(handler) = self.handlers.get(&kind) else {
            tracing::debug!(?kind, "No handler registered on this page");
            return Ok(Dispatched::Ignored);
        };

        match handler(controller, target) {
            Err(
                e @ (CartError::MissingProductData { .. } | CartError::EmptyCartCheckout),
            ) => Ok(Dispatched::Refused(e)),
            other => other,
        }
    }
}

impl<S: KeyValueStore, N: Notifier> Default for DispatchTable<S, N> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Handlers
// =============================================================================

fn handle_add<S: KeyValueStore, N: Notifier>(
    controller: &mut CartController<S, N>,
    target: &ClickTarget,
) -> Result<Dispatched> {
    let Some(id) = target.product_id() else {
        tracing::warn!("Add-to-cart trigger without data-id");
        return Ok(Dispatched::Ignored);
    };
    controller.add_item(&id).map(Dispatched::Added)
}

fn handle_remove<S: KeyValueStore, N: Notifier>(
    controller: &mut CartController<S, N>,
    target: &ClickTarget,
) -> Result<Dispatched> {
    let Some(id) = target.product_id() else {
        tracing::warn!("Remove trigger without data-id");
        return Ok(Dispatched::Ignored);
    };
    controller.remove_item(&id).map(Dispatched::Removed)
}

fn handle_checkout<S: KeyValueStore, N: Notifier>(
    controller: &mut CartController<S, N>,
    _target: &ClickTarget,
) -> Result<Dispatched> {
    // A disabled control swallows the click. Without a cart display the
    // control keeps whatever state the page markup gave it.
    let disabled = controller.display().map_or_else(
        || {
            controller
                .page()
                .element_by_id(CHECKOUT_BUTTON_ID)
                .is_some_and(|e| e.attr("disabled").is_some())
        },
        |d| d.checkout_disabled,
    );
    if disabled {
        tracing::debug!("Checkout control is disabled");
        return Ok(Dispatched::Ignored);
    }
    controller.checkout().map(Dispatched::OrderPlaced)
}

fn handle_view<S: KeyValueStore, N: Notifier>(
    controller: &mut CartController<S, N>,
    _target: &ClickTarget,
) -> Result<Dispatched> {
    controller.open_cart()?;
    Ok(Dispatched::CartOpened)
}

#[allow(clippy::unnecessary_wraps)]
fn handle_close<S: KeyValueStore, N: Notifier>(
    controller: &mut CartController<S, N>,
    _target: &ClickTarget,
) -> Result<Dispatched> {
    controller.close_cart();
    Ok(Dispatched::CartClosed)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::CartConfig;
    use crate::notifier::{Notice, RecordingNotifier};
    use crate::page::Page;
    use crate::render::ModalState;
    use crate::storage::MemoryStore;

    const FULL_PAGE: &str = r#"
        <a id="view-cart-button"><span id="cart-count-nav">0</span></a>
        <div class="product" data-product-id="A" data-name="iPhone 15" data-price="100">
            <button class="add-to-cart" data-id="A">+</button>
        </div>
        <div id="cart-modal">
            <span class="close-button">x</span>
            <div id="cart-items"></div>
            <span id="cart-total"></span>
            <button id="checkout-button">Оформити</button>
        </div>
    "#;

    type Controller = CartController<MemoryStore, RecordingNotifier>;

    fn setup(html: &str) -> (Controller, DispatchTable<MemoryStore, RecordingNotifier>) {
        let page = Page::parse(html);
        let table = DispatchTable::for_page(page.regions());
        let mut controller = CartController::load(
            page,
            MemoryStore::new(),
            RecordingNotifier::new(),
            &CartConfig::default(),
        );
        controller.render().unwrap();
        (controller, table)
    }

    fn a() -> ProductId {
        ProductId::new("A")
    }

    #[test]
    fn test_classify() {
        assert_eq!(
            TriggerKind::classify(&ClickTarget::add_to_cart(&a())),
            Some(TriggerKind::AddToCart)
        );
        assert_eq!(
            TriggerKind::classify(&ClickTarget::remove_from_cart(&a())),
            Some(TriggerKind::RemoveFromCart)
        );
        assert_eq!(
            TriggerKind::classify(&ClickTarget::by_id(CHECKOUT_BUTTON_ID)),
            Some(TriggerKind::Checkout)
        );
        assert_eq!(
            TriggerKind::classify(&ClickTarget::by_id(CART_MODAL_ID)),
            Some(TriggerKind::ModalBackdrop)
        );
        assert_eq!(
            TriggerKind::classify(&ClickTarget::with_class(CLOSE_BUTTON_CLASS)),
            Some(TriggerKind::CloseModal)
        );
        assert_eq!(TriggerKind::classify(&ClickTarget::by_id("cart-items")), None);
    }

    #[test]
    fn test_from_element() {
        let page = Page::parse(FULL_PAGE);
        let button = page.trigger_for(ADD_TO_CART_CLASS, "A").unwrap();
        assert_eq!(ClickTarget::from_element(button), ClickTarget::add_to_cart(&a()));
    }

    #[test]
    fn test_table_for_bare_page() {
        let table: DispatchTable<MemoryStore, RecordingNotifier> =
            DispatchTable::for_page(PageRegions::default());
        assert!(table.is_registered(TriggerKind::AddToCart));
        assert!(table.is_registered(TriggerKind::ModalBackdrop));
        assert!(!table.is_registered(TriggerKind::RemoveFromCart));
        assert!(!table.is_registered(TriggerKind::Checkout));
        assert!(!table.is_registered(TriggerKind::ViewCart));
        assert!(!table.is_registered(TriggerKind::CloseModal));
    }

    #[test]
    fn test_add_then_remove_through_table() {
        let (mut c, table) = setup(FULL_PAGE);
        let added = table.dispatch(&mut c, &ClickTarget::add_to_cart(&a())).unwrap();
        assert!(matches!(added, Dispatched::Added(AddOutcome::Added)));

        let removed = table
            .dispatch(&mut c, &ClickTarget::remove_from_cart(&a()))
            .unwrap();
        assert!(matches!(removed, Dispatched::Removed(RemoveOutcome::Removed)));
        assert!(c.cart().is_empty());
    }

    #[test]
    fn test_missing_product_is_refused() {
        let (mut c, table) = setup(FULL_PAGE);
        let result = table
            .dispatch(&mut c, &ClickTarget::add_to_cart(&ProductId::new("ghost")))
            .unwrap();
        assert!(matches!(
            result,
            Dispatched::Refused(CartError::MissingProductData { .. })
        ));
        assert!(c.notifier().notices().is_empty());
    }

    #[test]
    fn test_disabled_checkout_is_ignored() {
        let (mut c, table) = setup(FULL_PAGE);
        let result = table
            .dispatch(&mut c, &ClickTarget::by_id(CHECKOUT_BUTTON_ID))
            .unwrap();
        assert!(matches!(result, Dispatched::Ignored));
        assert!(c.notifier().notices().is_empty());
    }

    #[test]
    fn test_checkout_without_display_reaches_empty_cart_path() {
        // Checkout button but no count badge: nothing is drawn, nothing disabled
        let page = r#"<button id="checkout-button">Оформити</button>"#;
        let (mut c, table) = setup(page);
        let result = table
            .dispatch(&mut c, &ClickTarget::by_id(CHECKOUT_BUTTON_ID))
            .unwrap();
        assert!(matches!(
            result,
            Dispatched::Refused(CartError::EmptyCartCheckout)
        ));
        assert_eq!(c.notifier().notices(), &[Notice::EmptyCart]);
    }

    #[test]
    fn test_checkout_disabled_in_markup_without_display() {
        let page = r#"<button id="checkout-button" disabled>Оформити</button>"#;
        let (mut c, table) = setup(page);
        assert!(c.display().is_none());

        let result = table
            .dispatch(&mut c, &ClickTarget::by_id(CHECKOUT_BUTTON_ID))
            .unwrap();
        assert!(matches!(result, Dispatched::Ignored));
        assert!(c.notifier().notices().is_empty());
    }

    #[test]
    fn test_full_flow_view_checkout() {
        let (mut c, table) = setup(FULL_PAGE);
        table.dispatch(&mut c, &ClickTarget::add_to_cart(&a())).unwrap();

        let opened = table
            .dispatch(&mut c, &ClickTarget::by_id(VIEW_CART_BUTTON_ID))
            .unwrap();
        assert!(matches!(opened, Dispatched::CartOpened));
        assert_eq!(c.modal(), ModalState::Visible);

        let placed = table
            .dispatch(&mut c, &ClickTarget::by_id(CHECKOUT_BUTTON_ID))
            .unwrap();
        assert!(matches!(placed, Dispatched::OrderPlaced(_)));
        assert!(c.cart().is_empty());
        assert_eq!(c.modal(), ModalState::Hidden);
    }

    #[test]
    fn test_backdrop_and_close_button_hide_modal() {
        let (mut c, table) = setup(FULL_PAGE);
        for target in [
            ClickTarget::by_id(CART_MODAL_ID),
            ClickTarget::with_class(CLOSE_BUTTON_CLASS),
        ] {
            c.open_cart().unwrap();
            let result = table.dispatch(&mut c, &target).unwrap();
            assert!(matches!(result, Dispatched::CartClosed));
            assert_eq!(c.modal(), ModalState::Hidden);
        }
    }

    #[test]
    fn test_unrelated_click_is_ignored() {
        let (mut c, table) = setup(FULL_PAGE);
        let result = table
            .dispatch(&mut c, &ClickTarget::with_class("nav-link"))
            .unwrap();
        assert!(matches!(result, Dispatched::Ignored));
    }

    #[test]
    fn test_add_trigger_without_data_id_is_ignored() {
        let (mut c, table) = setup(FULL_PAGE);
        let result = table
            .dispatch(&mut c, &ClickTarget::with_class(ADD_TO_CART_CLASS))
            .unwrap();
        assert!(matches!(result, Dispatched::Ignored));
        assert!(c.cart().is_empty());
    }
}
