//! Display projections of storefront state.
//!
//! Each view is a pure function of the current state; templates render them
//! as a full replacement of their display region.

use chrono::{DateTime, Utc};
use kitchenmart_core::{CurrencyCode, ProductSnapshot};
use serde::Serialize;

use crate::notify::{EXIT_MS, Toast};
use crate::store::{Cart, Storefront, Wishlist};

/// One cart row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartRowView {
    pub id: String,
    pub title: String,
    pub image: String,
    pub unit_price: String,
    pub line_total: String,
    pub quantity: u32,
}

/// Cart display data for templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub items: Vec<CartRowView>,
    pub subtotal: String,
    pub total: String,
    pub item_count: u32,
}

impl CartView {
    #[must_use]
    pub fn project(cart: &Cart, currency: CurrencyCode) -> Self {
        let subtotal = cart.subtotal(currency).display();
        Self {
            items: cart
                .items()
                .iter()
                .map(|item| CartRowView {
                    id: item.id.to_string(),
                    title: item.title.clone(),
                    image: item.image.clone(),
                    unit_price: item.price.display(),
                    line_total: item.line_total().display(),
                    quantity: item.quantity,
                })
                .collect(),
            total: subtotal.clone(),
            subtotal,
            item_count: cart.item_count(),
        }
    }
}

/// One wishlist row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WishlistRowView {
    pub id: String,
    pub title: String,
    pub image: String,
    pub price: String,
}

/// Wishlist display data for templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WishlistView {
    pub items: Vec<WishlistRowView>,
    pub count: usize,
}

impl WishlistView {
    #[must_use]
    pub fn project(wishlist: &Wishlist) -> Self {
        Self {
            items: wishlist
                .items()
                .iter()
                .map(|item| WishlistRowView {
                    id: item.id.to_string(),
                    title: item.title.clone(),
                    image: item.image.clone(),
                    price: item.price.display(),
                })
                .collect(),
            count: wishlist.len(),
        }
    }
}

/// Header badge counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Counters {
    pub cart_count: u32,
    pub wishlist_count: usize,
}

impl Counters {
    #[must_use]
    pub fn project(storefront: &Storefront) -> Self {
        Self {
            cart_count: storefront.cart().item_count(),
            wishlist_count: storefront.wishlist().len(),
        }
    }
}

/// A product card on the catalog grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductCardView {
    pub id: String,
    pub title: String,
    pub image: String,
    pub price: String,
    pub liked: bool,
}

impl ProductCardView {
    /// Cards for `products`, with like buttons active for wishlisted ids.
    #[must_use]
    pub fn project_all(products: &[ProductSnapshot], wishlist: &Wishlist) -> Vec<Self> {
        products
            .iter()
            .map(|product| Self {
                id: product.id.to_string(),
                title: product.title.clone(),
                image: product.image.clone(),
                price: product.price.display(),
                liked: wishlist.contains(&product.id),
            })
            .collect()
    }
}

/// A toast as rendered: the client starts the exit transition after
/// `dismiss_after_ms` and removes the toast `exit_ms` later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToastView {
    pub id: u64,
    pub severity: &'static str,
    pub message: String,
    pub dismiss_after_ms: i64,
    pub exit_ms: i64,
}

impl ToastView {
    #[must_use]
    pub fn project(toast: &Toast, now: DateTime<Utc>) -> Self {
        Self {
            id: toast.id,
            severity: toast.notice.severity.as_str(),
            message: toast.notice.message.clone(),
            dismiss_after_ms: toast.remaining_ms(now),
            exit_ms: EXIT_MS,
        }
    }

    #[must_use]
    pub fn project_all(toasts: &[Toast], now: DateTime<Utc>) -> Vec<Self> {
        toasts.iter().map(|toast| Self::project(toast, now)).collect()
    }
}
