//! Integration tests for Apple Cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p apple-cart-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_navigation` - Sessions spanning several page loads on one origin
//! - `cart_properties` - Property tests over arbitrary click sequences
//!
//! This library holds the storefront fixture pages and session helpers the
//! test files share.

#![cfg_attr(not(test), forbid(unsafe_code))]

use apple_cart_storefront::{
    CartConfig, KeyValueStore, Page, PageSession, RecordingNotifier, Result,
};

/// Shared header: nav link with count badge, and the cart modal.
const CART_CHROME: &str = r#"
<nav>
    <a href="index.html">Головна</a>
    <a href="iphone.html">iPhone</a>
    <a href="mac.html">Mac</a>
    <button id="view-cart-button">Кошик (<span id="cart-count-nav">0</span>)</button>
</nav>
<div id="cart-modal" class="modal">
    <div class="modal-content">
        <span class="close-button">&times;</span>
        <h2>Ваш кошик</h2>
        <div id="cart-items"></div>
        <p>Разом: <span id="cart-total">0</span> грн</p>
        <button id="checkout-button">Оформити замовлення</button>
    </div>
</div>
"#;

/// Landing page: a featured add trigger whose product markup lives elsewhere.
#[must_use]
pub fn index_page() -> String {
    format!(
        r#"<!DOCTYPE html><html><body>{CART_CHROME}
<section class="hero">
    <h1>Нові iPhone</h1>
    <button class="add-to-cart" data-id="iphone-15">Купити</button>
</section>
</body></html>"#
    )
}

/// iPhone catalog page.
#[must_use]
pub fn iphone_page() -> String {
    format!(
        r#"<!DOCTYPE html><html><body>{CART_CHROME}
<div class="product" data-product-id="iphone-15" data-name="iPhone 15" data-price="37999">
    <h3>iPhone 15</h3><p>37 999 грн</p>
    <button class="add-to-cart" data-id="iphone-15">Додати в кошик</button>
</div>
<div class="product" data-product-id="iphone-15-pro" data-name="iPhone 15 Pro" data-price="49999">
    <h3>iPhone 15 Pro</h3><p>49 999 грн</p>
    <button class="add-to-cart" data-id="iphone-15-pro">Додати в кошик</button>
</div>
</body></html>"#
    )
}

/// Mac catalog page.
#[must_use]
pub fn mac_page() -> String {
    format!(
        r#"<!DOCTYPE html><html><body>{CART_CHROME}
<div class="product" data-product-id="macbook-air" data-name="MacBook Air M3" data-price="54999">
    <button class="add-to-cart" data-id="macbook-air">Додати в кошик</button>
</div>
</body></html>"#
    )
}

/// Plain content page with none of the cart regions.
#[must_use]
pub fn about_page() -> String {
    r#"<!DOCTYPE html><html><body><h1>Про нас</h1><p>Магазин техніки Apple.</p></body></html>"#
        .to_string()
}

/// Load `html` as a page session over `store`.
///
/// # Errors
///
/// Returns render and storage errors from the initial render.
pub fn open<S: KeyValueStore>(
    html: &str,
    store: S,
) -> Result<PageSession<S, RecordingNotifier>> {
    PageSession::page_loaded(
        Page::parse(html),
        store,
        RecordingNotifier::new(),
        &CartConfig::default(),
    )
}

/// Leave `session` and load `html` with the same storage.
///
/// Notices from the previous page are dropped.
///
/// # Errors
///
/// Returns render and storage errors from the initial render.
pub fn navigate<S: KeyValueStore>(
    session: PageSession<S, RecordingNotifier>,
    html: &str,
) -> Result<PageSession<S, RecordingNotifier>> {
    let (store, _) = session.into_parts();
    open(html, store)
}
