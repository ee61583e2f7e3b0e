//! Wishlist route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use super::page_chrome;
use crate::state::AppState;
use crate::views::{Counters, ToastView, WishlistView};

/// Wishlist page template.
#[derive(Template, WebTemplate)]
#[template(path = "wishlist/show.html")]
pub struct WishlistShowTemplate {
    pub counters: Counters,
    pub toasts: Vec<ToastView>,
    pub wishlist: WishlistView,
}

/// Wishlist rows fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/wishlist_items.html")]
pub struct WishlistItemsTemplate {
    pub wishlist: WishlistView,
}

/// Display wishlist page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> impl IntoResponse {
    let mut shop = state.shop();
    let (counters, toasts) = page_chrome(&mut shop);
    let wishlist = WishlistView::project(shop.storefront.wishlist());
    drop(shop);

    WishlistShowTemplate {
        counters,
        toasts,
        wishlist,
    }
}

/// Wishlist rows (HTMX fragment).
#[instrument(skip(state))]
pub async fn items(State(state): State<AppState>) -> impl IntoResponse {
    let wishlist = WishlistView::project(state.shop().storefront.wishlist());
    WishlistItemsTemplate { wishlist }
}
