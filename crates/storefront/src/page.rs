//! Page markup as the cart sees it.
//!
//! The cart has no product catalog of its own. Everything it knows about a
//! product comes from the page currently loaded, which declares products as
//! elements like:
//!
//! ```html
//! <div class="product" data-product-id="iphone-15" data-name="iPhone 15" data-price="37999">
//!   <button class="add-to-cart" data-id="iphone-15">Додати в кошик</button>
//! </div>
//! ```
//!
//! Only start tags and their attributes matter, so the page is scanned with
//! regular expressions instead of being parsed into a tree.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use apple_cart_core::{Price, ProductId};
use regex::Regex;

use crate::error::{CartError, Result};

/// Class marking an element that declares a product.
pub const PRODUCT_CLASS: &str = "product";
/// Class marking an add-to-cart trigger.
pub const ADD_TO_CART_CLASS: &str = "add-to-cart";
/// Class marking a per-line remove trigger.
pub const REMOVE_FROM_CART_CLASS: &str = "remove-from-cart";
/// Class marking the modal close trigger.
pub const CLOSE_BUTTON_CLASS: &str = "close-button";

pub const CART_ITEMS_ID: &str = "cart-items";
pub const CART_TOTAL_ID: &str = "cart-total";
pub const CHECKOUT_BUTTON_ID: &str = "checkout-button";
pub const CART_COUNT_ID: &str = "cart-count-nav";
pub const CART_MODAL_ID: &str = "cart-modal";
pub const VIEW_CART_BUTTON_ID: &str = "view-cart-button";

/// Regex for matching start tags with their attribute text.
static START_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<([A-Za-z][A-Za-z0-9-]*)((?:\s+[^\s=>/]+(?:\s*=\s*(?:"[^"]*"|'[^']*'|[^\s'">]+))?)*)\s*/?>"#)
        .expect("Invalid regex")
});

/// Regex for extracting attributes (double-, single-, un-quoted or bare).
static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([^\s=>/]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s'">]+)))?"#)
        .expect("Invalid regex")
});

/// One start tag from the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attributes: BTreeMap<String, String>,
}

impl Element {
    /// Attribute value by (lowercase) name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// `data-*` attribute value, e.g. `data("product-id")`.
    #[must_use]
    pub fn data(&self, name: &str) -> Option<&str> {
        self.attr(&format!("data-{name}"))
    }

    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    /// Classes from the `class` attribute.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_whitespace()
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }
}

/// Product metadata read from the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductData {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
}

/// Which optional cart regions and triggers the page contains.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct PageRegions {
    pub cart_items: bool,
    pub cart_total: bool,
    pub checkout_button: bool,
    pub cart_count: bool,
    pub cart_modal: bool,
    pub close_button: bool,
    pub view_cart_button: bool,
}

impl PageRegions {
    /// Every region present, as on the full storefront layout.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            cart_items: true,
            cart_total: true,
            checkout_button: true,
            cart_count: true,
            cart_modal: true,
            close_button: true,
            view_cart_button: true,
        }
    }

    /// Whether the cart list can be drawn: list, total, checkout control
    /// and count badge must all exist.
    #[must_use]
    pub const fn can_display_cart(&self) -> bool {
        self.cart_items && self.cart_total && self.checkout_button && self.cart_count
    }
}

/// A loaded page.
#[derive(Debug, Clone, Default)]
pub struct Page {
    elements: Vec<Element>,
    regions: PageRegions,
}

impl Page {
    /// Scan page markup.
    #[must_use]
    pub fn parse(html: &str) -> Self {
        let elements: Vec<Element> = START_TAG_RE
            .captures_iter(html)
            .map(|caps| Element {
                tag: caps[1].to_ascii_lowercase(),
                attributes: parse_attributes(caps.get(2).map_or("", |m| m.as_str())),
            })
            .collect();

        let has_id = |id: &str| elements.iter().any(|e| e.id() == Some(id));
        let regions = PageRegions {
            cart_items: has_id(CART_ITEMS_ID),
            cart_total: has_id(CART_TOTAL_ID),
            checkout_button: has_id(CHECKOUT_BUTTON_ID),
            cart_count: has_id(CART_COUNT_ID),
            cart_modal: has_id(CART_MODAL_ID),
            close_button: elements.iter().any(|e| e.has_class(CLOSE_BUTTON_CLASS)),
            view_cart_button: has_id(VIEW_CART_BUTTON_ID),
        };

        tracing::debug!(elements = elements.len(), ?regions, "Page scanned");
        Self { elements, regions }
    }

    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    #[must_use]
    pub const fn regions(&self) -> PageRegions {
        self.regions
    }

    /// First element with the given `id`.
    #[must_use]
    pub fn element_by_id(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == Some(id))
    }

    /// First element carrying `class` whose `data-id` is `data_id`.
    #[must_use]
    pub fn trigger_for(&self, class: &str, data_id: &str) -> Option<&Element> {
        self.elements
            .iter()
            .find(|e| e.has_class(class) && e.data("id") == Some(data_id))
    }

    /// Look up a product's name and price from its markup.
    ///
    /// # Errors
    ///
    /// Returns `CartError::MissingProductData` if no product element has this
    /// ID, or its name or integer price attribute is missing or unusable.
    pub fn product(&self, id: &ProductId) -> Result<ProductData> {
        let element = self
            .elements
            .iter()
            .find(|e| e.has_class(PRODUCT_CLASS) && e.data("product-id") == Some(id.as_str()))
            .ok_or_else(|| CartError::missing_product(id, "no product element"))?;
        product_from_element(id.clone(), element)
    }

    /// Every product declared on the page, in document order.
    ///
    /// Product elements with unusable attributes are skipped.
    #[must_use]
    pub fn products(&self) -> Vec<ProductData> {
        self.elements
            .iter()
            .filter(|e| e.has_class(PRODUCT_CLASS))
            .filter_map(|e| {
                let id = ProductId::new(e.data("product-id")?);
                product_from_element(id, e).ok()
            })
            .collect()
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn product_from_element(id: ProductId, element: &Element) -> Result<ProductData> {
    let name = element
        .data("name")
        .ok_or_else(|| CartError::missing_product(&id, "missing data-name"))?
        .to_string();
    let raw_price = element
        .data("price")
        .ok_or_else(|| CartError::missing_product(&id, "missing data-price"))?;
    let price = parse_price(raw_price)
        .ok_or_else(|| CartError::missing_product(&id, format!("invalid data-price '{raw_price}'")))?;
    Ok(ProductData { id, name, price })
}

/// Parse an integer price, accepting trailing non-digit text (`"1200 грн"`)
/// the way lenient integer parsing on pages does.
fn parse_price(raw: &str) -> Option<Price> {
    let trimmed = raw.trim_start();
    let digits_end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed.get(..digits_end)?.parse::<u64>().ok().map(Price::new)
}

fn parse_attributes(raw: &str) -> BTreeMap<String, String> {
    ATTR_RE
        .captures_iter(raw)
        .map(|caps| {
            let name = caps[1].to_ascii_lowercase();
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map_or_else(String::new, |m| decode_entities(m.as_str()));
            (name, value)
        })
        .collect()
}

fn decode_entities(value: &str) -> String {
    if !value.contains('&') {
        return value.to_string();
    }
    value
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
