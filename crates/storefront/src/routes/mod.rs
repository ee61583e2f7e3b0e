//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Product grid
//! GET  /health                  - Health check
//!
//! # Pages
//! GET  /cart                    - Cart page (?confirm=empty-cart shows the confirm panel)
//! GET  /wishlist                - Wishlist page
//!
//! # Fragments (HTMX)
//! GET  /fragments/counters      - Header badges
//! GET  /fragments/cart          - Cart rows and totals
//! GET  /fragments/wishlist      - Wishlist rows
//! GET  /fragments/notifications - Live toasts
//!
//! # Actions
//! POST /actions/{action}        - Run a UI action (like-btn, add-to-cart, ...)
//! ```
//!
//! Action responses to HTMX requests are out-of-band swaps of every region
//! the action refreshed, plus an `HX-Trigger` header for client-side effects.
//! Plain form posts get a `303 See Other` back to the page they came from.

pub mod actions;
pub mod cart;
pub mod fragments;
pub mod products;
pub mod wishlist;

use axum::{
    Router,
    http::HeaderMap,
    routing::{get, post},
};
use chrono::Utc;

use crate::state::{AppState, Shop};
use crate::views::{Counters, ToastView};

/// Create the fragment routes router.
pub fn fragment_routes() -> Router<AppState> {
    Router::new()
        .route("/counters", get(fragments::counters))
        .route("/cart", get(cart::items))
        .route("/wishlist", get(wishlist::items))
        .route("/notifications", get(fragments::notifications))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/cart", get(cart::show))
        .route("/wishlist", get(wishlist::show))
        .route("/actions/{action}", post(actions::dispatch))
        .nest("/fragments", fragment_routes())
}

/// Header badges and live toasts, as every full page renders them.
fn page_chrome(shop: &mut Shop) -> (Counters, Vec<ToastView>) {
    let now = Utc::now();
    let toasts = ToastView::project_all(&shop.notifier.active(now), now);
    (Counters::project(&shop.storefront), toasts)
}

/// Whether the request was issued by htmx.
fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get("HX-Request")
        .is_some_and(|value| value.as_bytes() == b"true")
}
