//! List the products a page declares.

use apple_cart_storefront::Page;

/// Print every usable product element on the page.
///
/// # Errors
///
/// Never fails today; the signature matches the other commands.
#[allow(clippy::print_stdout, clippy::unnecessary_wraps)]
pub fn list(html: &str) -> Result<(), Box<dyn std::error::Error>> {
    let page = Page::parse(html);
    let products = page.products();
    if products.is_empty() {
        println!("No products on this page.");
        return Ok(());
    }
    for product in products {
        println!("{}\t{}\t{}", product.id, product.name, product.price);
    }
    Ok(())
}
