//! Wishlist collection and wishlist operations.

use kitchenmart_core::{ProductId, ProductSnapshot, WishlistItem};

use super::{Effect, Storefront};
use crate::notify::Notice;

/// Wishlist entries in insertion order, at most one per product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wishlist {
    items: Vec<WishlistItem>,
}

impl Wishlist {
    pub(crate) fn normalized(items: Vec<WishlistItem>) -> Self {
        let mut wishlist = Self::default();
        for item in items {
            if !wishlist.contains(&item.id) {
                wishlist.items.push(item);
            }
        }
        wishlist
    }

    #[must_use]
    pub fn items(&self) -> &[WishlistItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&WishlistItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.get(id).is_some()
    }

    fn remove(&mut self, id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| &item.id != id);
        self.items.len() != before
    }
}

impl Storefront {
    /// Remove the product from the wishlist if present, otherwise add it.
    pub fn toggle_wishlist(&mut self, snapshot: ProductSnapshot) -> Vec<Effect> {
        let id = snapshot.id.clone();
        let (notice, like) = if self.wishlist.remove(&id) {
            (
                Notice::info("Removed from wishlist"),
                Effect::ResetLiked(id.clone()),
            )
        } else {
            self.wishlist.items.push(WishlistItem::from(snapshot));
            (
                Notice::success("Added to wishlist"),
                Effect::MarkLiked(id.clone()),
            )
        };
        self.persist_wishlist();
        tracing::debug!(product_id = %id, liked = self.wishlist.contains(&id), "wishlist toggled");

        vec![
            Effect::Notify(notice),
            like,
            Effect::RefreshWishlistCount,
            Effect::RefreshWishlistView,
        ]
    }

    /// Remove a product from the wishlist. Absent ids are a no-op.
    pub fn remove_from_wishlist(&mut self, id: &ProductId) -> Vec<Effect> {
        if !self.wishlist.remove(id) {
            tracing::debug!(product_id = %id, "remove from wishlist: not in wishlist");
            return Vec::new();
        }
        self.persist_wishlist();

        vec![
            Effect::RefreshWishlistCount,
            Effect::RefreshWishlistView,
            Effect::ResetLiked(id.clone()),
            Effect::Notify(Notice::info("Removed from wishlist")),
        ]
    }
}
