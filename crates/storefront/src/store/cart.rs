//! Cart collection and cart operations.

use kitchenmart_core::{CartItem, CurrencyCode, Price, ProductId, ProductSnapshot};

use super::{EMPTY_CART_PROMPT, Effect, Storefront};
use crate::notify::Notice;

/// Cart lines in insertion order, at most one per product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Build a cart from loaded lines: zero-quantity lines are dropped and
    /// only the first line per product id is kept.
    pub(crate) fn normalized(items: Vec<CartItem>) -> Self {
        let mut cart = Self::default();
        for item in items {
            if item.quantity == 0 || cart.contains(&item.id) {
                continue;
            }
            cart.items.push(item);
        }
        cart
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0_u32, |total, item| total.saturating_add(item.quantity))
    }

    /// Sum of unit price times quantity.
    ///
    /// The total takes the currency of the first line, or `fallback` when the
    /// cart is empty.
    #[must_use]
    pub fn subtotal(&self, fallback: CurrencyCode) -> Price {
        let currency = self
            .items
            .first()
            .map_or(fallback, |item| item.price.currency());
        self.items
            .iter()
            .fold(Price::zero(currency), |total, item| {
                total.plus(&item.line_total())
            })
    }

    fn get_mut(&mut self, id: &ProductId) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|item| &item.id == id)
    }

    /// Returns `true` if a new line was inserted, `false` if an existing
    /// line's quantity was incremented.
    fn add(&mut self, snapshot: ProductSnapshot) -> bool {
        if let Some(item) = self.get_mut(&snapshot.id) {
            item.quantity = item.quantity.saturating_add(1);
            false
        } else {
            self.items.push(CartItem::from_snapshot(snapshot));
            true
        }
    }

    fn remove(&mut self, id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| &item.id != id);
        self.items.len() != before
    }

    fn clear(&mut self) {
        self.items.clear();
    }
}

impl Storefront {
    /// Add one unit of a product, inserting a new line with quantity 1 if
    /// the product is not in the cart yet.
    pub fn add_to_cart(&mut self, snapshot: ProductSnapshot) -> Vec<Effect> {
        let id = snapshot.id.clone();
        let inserted = self.cart.add(snapshot);
        self.persist_cart();
        tracing::debug!(product_id = %id, inserted, "add to cart");

        let notice = if inserted {
            Notice::success("Added to cart")
        } else {
            Notice::info("Quantity increased")
        };
        vec![
            Effect::Notify(notice),
            Effect::RefreshCartCount,
            Effect::RefreshCartView,
        ]
    }

    /// Remove a product's line. Absent ids are a no-op.
    pub fn remove_from_cart(&mut self, id: &ProductId) -> Vec<Effect> {
        if !self.cart.remove(id) {
            tracing::debug!(product_id = %id, "remove from cart: not in cart");
            return Vec::new();
        }
        self.persist_cart();
        tracing::debug!(product_id = %id, "removed from cart");

        vec![
            Effect::RefreshCartCount,
            Effect::RefreshCartView,
            Effect::Notify(Notice::info("Removed from cart")),
        ]
    }

    /// Add one to a line's quantity. Absent ids are a no-op.
    pub fn increase_quantity(&mut self, id: &ProductId) -> Vec<Effect> {
        let Some(item) = self.cart.get_mut(id) else {
            return Vec::new();
        };
        item.quantity = item.quantity.saturating_add(1);
        self.persist_cart();

        vec![Effect::RefreshCartCount, Effect::RefreshCartView]
    }

    /// Take one from a line's quantity; a line at quantity 1 is removed.
    /// Absent ids are a no-op.
    pub fn decrease_quantity(&mut self, id: &ProductId) -> Vec<Effect> {
        let Some(item) = self.cart.get_mut(id) else {
            return Vec::new();
        };
        if item.quantity <= 1 {
            return self.remove_from_cart(id);
        }
        item.quantity -= 1;
        self.persist_cart();

        vec![Effect::RefreshCartCount, Effect::RefreshCartView]
    }

    /// Remove every line.
    ///
    /// An empty cart only produces a notice. Otherwise nothing happens until
    /// the caller passes `confirmed = true`; without it a confirmation
    /// request is returned instead.
    pub fn empty_cart(&mut self, confirmed: bool) -> Vec<Effect> {
        if self.cart.is_empty() {
            return vec![Effect::Notify(Notice::info("Cart is already empty"))];
        }
        if !confirmed {
            return vec![Effect::ConfirmEmptyCart {
                prompt: EMPTY_CART_PROMPT,
            }];
        }

        let lines = self.cart.len();
        self.cart.clear();
        self.persist_cart();
        tracing::info!(lines, "cart emptied");

        vec![
            Effect::RefreshCartCount,
            Effect::RefreshCartView,
            Effect::Notify(Notice::info("Cart emptied")),
        ]
    }
}
