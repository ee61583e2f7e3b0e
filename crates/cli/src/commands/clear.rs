//! Clear persisted collections.

use kitchenmart_storefront::config::StorefrontConfig;
use kitchenmart_storefront::store::Storefront;
use tracing::info;

use super::dispatch::describe;
use super::open_storefront;

/// Empty the cart and/or the wishlist without asking.
///
/// # Errors
///
/// Returns an error if the data directory cannot be opened.
pub fn run(
    config: &StorefrontConfig,
    cart: bool,
    wishlist: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut storefront = open_storefront(config)?;

    for line in clear(&mut storefront, cart, wishlist) {
        println!("{line}");
    }
    Ok(())
}

/// Clear the chosen collections and report what happened.
fn clear(storefront: &mut Storefront, cart: bool, wishlist: bool) -> Vec<String> {
    let mut lines = Vec::new();

    if cart {
        lines.extend(describe(&storefront.empty_cart(true)));
    }
    if wishlist {
        let ids: Vec<_> = storefront
            .wishlist()
            .items()
            .iter()
            .map(|item| item.id.clone())
            .collect();
        for id in &ids {
            storefront.remove_from_wishlist(id);
        }
        info!(removed = ids.len(), "wishlist cleared");
        lines.push(if ids.is_empty() {
            "[info] Wishlist is already empty".to_string()
        } else {
            format!("[info] Wishlist cleared ({} removed)", ids.len())
        });
    }
    lines
}
