//! Cart route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use super::page_chrome;
use crate::state::AppState;
use crate::store::EMPTY_CART_PROMPT;
use crate::views::{CartView, Counters, ToastView};

/// Value of `?confirm=` that opens the empty-cart confirm panel.
pub const CONFIRM_EMPTY_CART: &str = "empty-cart";

/// Cart page query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct CartQuery {
    pub confirm: Option<String>,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub counters: Counters,
    pub toasts: Vec<ToastView>,
    pub cart: CartView,
    pub confirm_prompt: Option<&'static str>,
    pub empty_cart_prompt: &'static str,
}

/// Cart rows fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Display cart page.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Query(query): Query<CartQuery>,
) -> impl IntoResponse {
    let mut shop = state.shop();
    let (counters, toasts) = page_chrome(&mut shop);
    let cart = CartView::project(shop.storefront.cart(), shop.storefront.currency());
    drop(shop);

    // Only ask when there is something to empty.
    let asked = query.confirm.as_deref() == Some(CONFIRM_EMPTY_CART);
    let confirm_prompt = (asked && !cart.items.is_empty()).then_some(EMPTY_CART_PROMPT);

    CartShowTemplate {
        counters,
        toasts,
        cart,
        confirm_prompt,
        empty_cart_prompt: EMPTY_CART_PROMPT,
    }
}

/// Cart rows and totals (HTMX fragment).
#[instrument(skip(state))]
pub async fn items(State(state): State<AppState>) -> impl IntoResponse {
    let shop = state.shop();
    let cart = CartView::project(shop.storefront.cart(), shop.storefront.currency());
    drop(shop);

    CartItemsTemplate { cart }
}
