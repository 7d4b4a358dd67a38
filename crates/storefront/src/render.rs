//! Cart display data and markup.
//!
//! Rendering turns a [`Cart`] into what the page's cart regions show: the
//! line-item list markup, the grand total, the unit count badge and the
//! checkout control's enabled state.

use apple_cart_core::{Cart, LineItem};
use askama::Template;

/// Cart line display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    /// Subtotal for the line, formatted with currency.
    pub line_price: String,
}

/// Cart display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    /// Grand total, grouped digits without currency.
    pub total: String,
    pub item_count: u64,
}

impl From<&LineItem> for CartItemView {
    fn from(item: &LineItem) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            quantity: item.quantity.get(),
            line_price: item.subtotal().to_string(),
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            total: cart.total().format_grouped(),
            item_count: cart.item_count(),
        }
    }
}

/// Cart items fragment template.
#[derive(Template)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate<'a> {
    pub cart: &'a CartView,
}

/// What the page's cart regions show after a render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartDisplay {
    /// Contents of the cart list region.
    pub items_html: String,
    /// Text of the total region.
    pub total_text: String,
    /// Text of the count badge.
    pub count_text: String,
    /// Whether the checkout control is disabled.
    pub checkout_disabled: bool,
}

impl CartDisplay {
    /// Render the display for `cart`.
    ///
    /// # Errors
    ///
    /// Returns `askama::Error` if the items template fails to render.
    pub fn render(cart: &Cart) -> Result<Self, askama::Error> {
        let view = CartView::from(cart);
        let items_html = CartItemsTemplate { cart: &view }.render()?;
        Ok(Self {
            items_html,
            total_text: view.total,
            count_text: view.item_count.to_string(),
            checkout_disabled: cart.is_empty(),
        })
    }
}

/// Visibility of the cart modal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModalState {
    #[default]
    Hidden,
    Visible,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use apple_cart_core::{Price, ProductId};

    use super::*;

    #[test]
    fn test_empty_cart_display() {
        let display = CartDisplay::render(&Cart::new()).unwrap();
        assert_eq!(display.items_html.trim(), "<p>Кошик порожній.</p>");
        assert_eq!(display.total_text, "0");
        assert_eq!(display.count_text, "0");
        assert!(display.checkout_disabled);
    }

    #[test]
    fn test_filled_cart_display() {
        let mut cart = Cart::new();
        cart.add(ProductId::new("iphone-15"), "iPhone 15", Price::new(37_999));
        cart.add(ProductId::new("iphone-15"), "iPhone 15", Price::new(37_999));
        cart.add(ProductId::new("airpods"), "AirPods Pro", Price::new(9_999));

        let display = CartDisplay::render(&cart).unwrap();
        assert!(!display.checkout_disabled);
        assert_eq!(display.total_text, "85\u{a0}997");
        assert_eq!(display.count_text, "3");
        assert!(display.items_html.contains("iPhone 15 (2 шт.)"));
        assert!(display.items_html.contains("75\u{a0}998 грн"));
        assert!(display.items_html.contains(r#"data-id="airpods""#));
        assert_eq!(display.items_html.matches("class=\"cart-item\"").count(), 2);
    }

    #[test]
    fn test_names_are_escaped() {
        let mut cart = Cart::new();
        cart.add(ProductId::new("x"), "<script>alert(1)</script>", Price::new(1));
        let display = CartDisplay::render(&cart).unwrap();
        assert!(!display.items_html.contains("<script>"));
        assert!(display.items_html.contains("alert(1)"));
    }

    #[test]
    fn test_cart_view_of_empty_cart() {
        let view = CartView::from(&Cart::new());
        assert!(view.items.is_empty());
        assert_eq!(view.total, "0");
        assert_eq!(view.item_count, 0);
    }
}
