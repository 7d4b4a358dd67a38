//! One page load against file-backed origin storage, plus an optional click.

use apple_cart_core::ProductId;
use apple_cart_storefront::page::{
    ADD_TO_CART_CLASS, CHECKOUT_BUTTON_ID, CLOSE_BUTTON_CLASS, VIEW_CART_BUTTON_ID,
};
use apple_cart_storefront::{
    CartConfig, CartController, ClickTarget, Dispatched, FileStore, KeyValueStore, ModalState,
    Notice, Notifier, Page, PageSession,
};

/// The click to deliver after the page loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Click {
    Add(String),
    Remove(String),
    Checkout,
    View,
    Close,
}

impl Click {
    /// Resolve the click to an element on the page, falling back to a
    /// synthetic target when the page does not carry that trigger.
    fn target(&self, page: &Page) -> ClickTarget {
        match self {
            Self::Add(id) => page.trigger_for(ADD_TO_CART_CLASS, id).map_or_else(
                || ClickTarget::add_to_cart(&ProductId::new(id.as_str())),
                ClickTarget::from_element,
            ),
            // Remove triggers live in the rendered cart list, not the page source
            Self::Remove(id) => ClickTarget::remove_from_cart(&ProductId::new(id.as_str())),
            Self::Checkout => element_target(page, CHECKOUT_BUTTON_ID),
            Self::View => element_target(page, VIEW_CART_BUTTON_ID),
            Self::Close => page
                .elements()
                .iter()
                .find(|e| e.has_class(CLOSE_BUTTON_CLASS))
                .map_or_else(
                    || ClickTarget::with_class(CLOSE_BUTTON_CLASS),
                    ClickTarget::from_element,
                ),
        }
    }
}

fn element_target(page: &Page, id: &str) -> ClickTarget {
    page.element_by_id(id)
        .map_or_else(|| ClickTarget::by_id(id), ClickTarget::from_element)
}

/// Presents notices as dialog text on stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    #[allow(clippy::print_stdout)]
    fn acknowledge(&mut self, notice: &Notice) {
        println!("[dialog] {notice}");
    }
}

/// Load the page, deliver `click`, and print the cart regions.
///
/// # Errors
///
/// Returns an error if the origin storage cannot be opened or written, or the
/// cart markup fails to render.
pub fn run(
    html: &str,
    config: &CartConfig,
    click: Option<Click>,
) -> Result<(), Box<dyn std::error::Error>> {
    let page = Page::parse(html);
    let store = FileStore::open(&config.storage_dir, &config.origin)?;
    tracing::debug!(path = %store.path().display(), "Using origin storage");

    let mut session = PageSession::page_loaded(page, store, TerminalNotifier, config)?;

    if let Some(click) = click {
        let target = click.target(session.controller().page());
        match session.click(&target)? {
            Dispatched::Refused(e) => tracing::debug!(error = %e, "Click refused"),
            Dispatched::Ignored => tracing::info!(?click, "Click had no effect on this page"),
            outcome => tracing::debug!(?outcome, "Click handled"),
        }
    }

    print_regions(session.controller());
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_regions<S: KeyValueStore, N: Notifier>(controller: &CartController<S, N>) {
    let Some(display) = controller.display() else {
        println!(
            "(no cart display on this page; {} units saved)",
            controller.cart().item_count()
        );
        return;
    };

    println!("#cart-items\n{}", display.items_html.trim());
    println!("#cart-total {}", display.total_text);
    println!("#cart-count-nav {}", display.count_text);
    println!(
        "#checkout-button {}",
        if display.checkout_disabled { "disabled" } else { "enabled" }
    );
    if controller.page().regions().cart_modal {
        let modal = match controller.modal() {
            ModalState::Visible => "visible",
            ModalState::Hidden => "hidden",
        };
        println!("#cart-modal {modal}");
    }
}
