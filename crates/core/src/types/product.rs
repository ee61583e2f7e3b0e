//! Product snapshots and the entries kept in the cart and wishlist.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// Product details captured from a product card at the moment of an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    /// Image URL.
    pub image: String,
}

/// A cart line.
///
/// `quantity` is at least 1 while the item is in the cart; the cart removes
/// the entry instead of letting it reach zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub image: String,
    pub quantity: u32,
}

impl CartItem {
    /// A new cart line for `snapshot` with quantity 1.
    #[must_use]
    pub fn from_snapshot(snapshot: ProductSnapshot) -> Self {
        Self {
            id: snapshot.id,
            title: snapshot.title,
            price: snapshot.price,
            image: snapshot.image,
            quantity: 1,
        }
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }

    /// The product details of this line, without quantity.
    #[must_use]
    pub fn snapshot(&self) -> ProductSnapshot {
        ProductSnapshot {
            id: self.id.clone(),
            title: self.title.clone(),
            price: self.price,
            image: self.image.clone(),
        }
    }
}

/// A wishlist entry. Same shape as [`ProductSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistItem {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub image: String,
}

impl WishlistItem {
    #[must_use]
    pub fn snapshot(&self) -> ProductSnapshot {
        ProductSnapshot {
            id: self.id.clone(),
            title: self.title.clone(),
            price: self.price,
            image: self.image.clone(),
        }
    }
}

impl From<ProductSnapshot> for WishlistItem {
    fn from(snapshot: ProductSnapshot) -> Self {
        Self {
            id: snapshot.id,
            title: snapshot.title,
            price: snapshot.price,
            image: snapshot.image,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::CurrencyCode;

    fn knife_set() -> ProductSnapshot {
        ProductSnapshot {
            id: ProductId::parse("knife-set").unwrap(),
            title: "Knife Set".to_string(),
            price: Price::parse_display("KSh 1,200", CurrencyCode::KES).unwrap(),
            image: "/static/img/knife-set.jpg".to_string(),
        }
    }

    #[test]
    fn test_cart_item_starts_at_one() {
        let item = CartItem::from_snapshot(knife_set());
        assert_eq!(item.quantity, 1);
        assert_eq!(item.snapshot(), knife_set());
    }

    #[test]
    fn test_line_total() {
        let mut item = CartItem::from_snapshot(knife_set());
        item.quantity = 3;
        assert_eq!(item.line_total().display(), "KSh 3,600");
    }

    #[test]
    fn test_legacy_cart_item_json() {
        let json = r#"{
            "id": "knife-set",
            "title": "Knife Set",
            "price": "KSh 1,200",
            "image": "images/knife.jpg",
            "quantity": 2
        }"#;
        let item: CartItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.quantity, 2);
        assert_eq!(item.price.display(), "KSh 1,200");
    }

    #[test]
    fn test_wishlist_item_from_snapshot() {
        let item = WishlistItem::from(knife_set());
        assert_eq!(item.id.as_str(), "knife-set");
        assert_eq!(item.snapshot(), knife_set());
    }
}
