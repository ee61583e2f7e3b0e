//! Cart and wishlist state.
//!
//! [`Storefront`] owns both collections and the key-value store they are
//! persisted to. Every mutation runs to completion, writes the affected
//! collection back in full, and returns the [`Effect`]s the caller should
//! apply (notices, view refreshes, like-indicator changes). Nothing in here
//! knows about HTTP or HTML.
//!
//! # Persistence
//!
//! | Key        | Value                      |
//! |------------|----------------------------|
//! | `cart`     | JSON array of `CartItem`   |
//! | `wishlist` | JSON array of `WishlistItem` |
//!
//! Missing or unparseable values load as empty collections. Saving is a
//! full-collection replace; a failed save is logged and the in-memory state
//! stays authoritative.

mod cart;
mod wishlist;

use kitchenmart_core::{CurrencyCode, ProductId};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::checkout::CheckoutHandoff;
use crate::notify::Notice;
use crate::storage::{CART_KEY, KeyValueStore, StorageError, WISHLIST_KEY};

pub use cart::Cart;
pub use wishlist::Wishlist;

/// Confirmation prompt shown before the cart is emptied.
pub const EMPTY_CART_PROMPT: &str = "Are you sure you want to empty your cart?";

/// Something the presentation layer should do after an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Show a transient notification.
    Notify(Notice),
    /// Re-render the cart item-count badge.
    RefreshCartCount,
    /// Re-render the wishlist count badge.
    RefreshWishlistCount,
    /// Re-render the cart view, if it is on screen.
    RefreshCartView,
    /// Re-render the wishlist view, if it is on screen.
    RefreshWishlistView,
    /// Mark like buttons for this product as active.
    MarkLiked(ProductId),
    /// Reset like buttons for this product.
    ResetLiked(ProductId),
    /// Ask the user to confirm before the cart is emptied.
    ConfirmEmptyCart { prompt: &'static str },
    /// Open the order hand-off link in a new viewing context.
    OpenExternal(CheckoutHandoff),
}

/// The cart and wishlist of a single shopper, bound to their storage.
pub struct Storefront {
    cart: Cart,
    wishlist: Wishlist,
    store: Box<dyn KeyValueStore>,
    currency: CurrencyCode,
}

impl std::fmt::Debug for Storefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront")
            .field("cart", &self.cart)
            .field("wishlist", &self.wishlist)
            .field("currency", &self.currency)
            .finish_non_exhaustive()
    }
}

impl Storefront {
    /// Load both collections from `store`.
    ///
    /// `currency` is used for totals of an empty cart.
    pub fn load(store: Box<dyn KeyValueStore>, currency: CurrencyCode) -> Self {
        let cart = Cart::normalized(load_collection(store.as_ref(), CART_KEY));
        let wishlist = Wishlist::normalized(load_collection(store.as_ref(), WISHLIST_KEY));

        tracing::info!(
            cart_lines = cart.len(),
            wishlist_entries = wishlist.len(),
            "storefront state loaded"
        );

        Self {
            cart,
            wishlist,
            store,
            currency,
        }
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub const fn wishlist(&self) -> &Wishlist {
        &self.wishlist
    }

    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    /// Write the whole cart to storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    pub fn save_cart(&mut self) -> Result<(), StorageError> {
        save_collection(self.store.as_mut(), CART_KEY, self.cart.items())
    }

    /// Write the whole wishlist to storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    pub fn save_wishlist(&mut self) -> Result<(), StorageError> {
        save_collection(self.store.as_mut(), WISHLIST_KEY, self.wishlist.items())
    }

    fn persist_cart(&mut self) {
        if let Err(e) = self.save_cart() {
            tracing::error!(error = %e, "failed to persist cart");
        }
    }

    fn persist_wishlist(&mut self) {
        if let Err(e) = self.save_wishlist() {
            tracing::error!(error = %e, "failed to persist wishlist");
        }
    }
}

fn load_collection<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Vec<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(key, error = %e, "could not read persisted collection, starting empty");
            return Vec::new();
        }
    };

    serde_json::from_str(&raw).unwrap_or_else(|e| {
        tracing::warn!(key, error = %e, "persisted collection is corrupt, starting empty");
        Vec::new()
    })
}

fn save_collection<T: Serialize>(
    store: &mut dyn KeyValueStore,
    key: &str,
    items: &[T],
) -> Result<(), StorageError> {
    // Serializing plain data structs cannot fail.
    let json = serde_json::to_string(items).unwrap_or_else(|_| "[]".to_owned());
    store.set(key, &json)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use kitchenmart_core::{Price, ProductSnapshot};

    use super::*;
    use crate::storage::MemoryStore;

    pub fn snapshot(id: &str, title: &str, price: &str) -> ProductSnapshot {
        ProductSnapshot {
            id: ProductId::parse(id).unwrap(),
            title: title.to_string(),
            price: Price::parse_display(price, CurrencyCode::KES).unwrap(),
            image: format!("/static/img/{id}.jpg"),
        }
    }

    pub fn id(s: &str) -> ProductId {
        ProductId::parse(s).unwrap()
    }

    pub fn empty_storefront() -> Storefront {
        Storefront::load(Box::new(MemoryStore::new()), CurrencyCode::KES)
    }

    #[test]
    fn test_load_from_empty_store() {
        let storefront = empty_storefront();
        assert!(storefront.cart().is_empty());
        assert!(storefront.wishlist().is_empty());
    }

    #[test]
    fn test_load_corrupt_values_fall_back_to_empty() {
        let mut store = MemoryStore::new();
        store.set(CART_KEY, "{not json").unwrap();
        store.set(WISHLIST_KEY, r#"{"id":"x"}"#).unwrap();

        let storefront = Storefront::load(Box::new(store), CurrencyCode::KES);
        assert!(storefront.cart().is_empty());
        assert!(storefront.wishlist().is_empty());
    }

    #[test]
    fn test_load_legacy_display_prices() {
        let mut store = MemoryStore::new();
        store
            .set(
                CART_KEY,
                r#"[{"id":"knife-set","title":"Knife Set","price":"KSh 1,200","image":"k.jpg","quantity":2}]"#,
            )
            .unwrap();

        let storefront = Storefront::load(Box::new(store), CurrencyCode::KES);
        let item = storefront.cart().get(&id("knife-set")).unwrap();
        assert_eq!(item.quantity, 2);
        assert_eq!(item.line_total().display(), "KSh 2,400");
    }

    #[test]
    fn test_load_rejects_out_of_range_prices() {
        let mut store = MemoryStore::new();
        store
            .set(
                CART_KEY,
                r#"[{"id":"gold","title":"Gold","price":{"amount":"79228162514264337593543950335","currency":"KES"},"image":"","quantity":2}]"#,
            )
            .unwrap();

        let storefront = Storefront::load(Box::new(store), CurrencyCode::KES);
        assert!(storefront.cart().is_empty());
        assert_eq!(storefront.cart().subtotal(CurrencyCode::KES).display(), "KSh 0");
    }

    #[test]
    fn test_load_restores_invariants() {
        let mut store = MemoryStore::new();
        store
            .set(
                CART_KEY,
                r#"[
                    {"id":"a","title":"A","price":"KSh 10","image":"a.jpg","quantity":0},
                    {"id":"b","title":"B","price":"KSh 20","image":"b.jpg","quantity":1},
                    {"id":"b","title":"B again","price":"KSh 20","image":"b.jpg","quantity":5}
                ]"#,
            )
            .unwrap();
        store
            .set(
                WISHLIST_KEY,
                r#"[
                    {"id":"c","title":"C","price":"KSh 1","image":"c.jpg"},
                    {"id":"c","title":"C","price":"KSh 1","image":"c.jpg"}
                ]"#,
            )
            .unwrap();

        let storefront = Storefront::load(Box::new(store), CurrencyCode::KES);
        assert_eq!(storefront.cart().len(), 1);
        assert_eq!(storefront.cart().get(&id("b")).unwrap().title, "B");
        assert_eq!(storefront.wishlist().len(), 1);
    }
}
