//! Print the persisted collections.

use kitchenmart_storefront::config::StorefrontConfig;
use kitchenmart_storefront::views::{CartView, WishlistView};

use super::open_storefront;

/// Print each cart line with its total, then the subtotal.
///
/// # Errors
///
/// Returns an error if the data directory cannot be opened.
pub fn cart(config: &StorefrontConfig) -> Result<(), Box<dyn std::error::Error>> {
    let storefront = open_storefront(config)?;
    let view = CartView::project(storefront.cart(), storefront.currency());

    if view.items.is_empty() {
        println!("Your cart is empty");
        return Ok(());
    }

    for row in &view.items {
        println!(
            "{:<24} {:>4} x {:>12} = {:>12}  [{}]",
            row.title, row.quantity, row.unit_price, row.line_total, row.id
        );
    }
    println!();
    println!("Items:    {}", view.item_count);
    println!("Subtotal: {}", view.subtotal);
    println!("Total:    {}", view.total);
    Ok(())
}

/// Print each wishlisted product.
///
/// # Errors
///
/// Returns an error if the data directory cannot be opened.
pub fn wishlist(config: &StorefrontConfig) -> Result<(), Box<dyn std::error::Error>> {
    let storefront = open_storefront(config)?;
    let view = WishlistView::project(storefront.wishlist());

    if view.items.is_empty() {
        println!("Your wishlist is empty");
        return Ok(());
    }

    for row in &view.items {
        println!("{:<24} {:>12}  [{}]", row.title, row.price, row.id);
    }
    println!();
    println!("{} saved", view.count);
    Ok(())
}
