//! Print the order hand-off for the persisted cart.

use kitchenmart_storefront::checkout::order_message;
use kitchenmart_storefront::config::StorefrontConfig;

use super::open_storefront;

/// Print the order message followed by the link that opens it in a chat.
///
/// # Errors
///
/// Returns an error if the data directory cannot be opened or the cart is
/// empty.
pub fn url(config: &StorefrontConfig) -> Result<(), Box<dyn std::error::Error>> {
    let storefront = open_storefront(config)?;
    if storefront.cart().is_empty() {
        return Err("Your cart is empty".into());
    }

    let message = order_message(storefront.cart(), storefront.currency());
    println!("{message}");
    println!();
    println!("{}", config.checkout.handoff_url(&message));
    Ok(())
}
