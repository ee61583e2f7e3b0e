//! Header and notification fragments, and the out-of-band variants that
//! action responses are assembled from.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use chrono::Utc;
use tracing::instrument;

use crate::state::AppState;
use crate::views::{CartView, Counters, ToastView, WishlistView};

/// Header badges fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/counters.html")]
pub struct CountersTemplate {
    pub counters: Counters,
}

/// Live toasts fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/toasts.html")]
pub struct ToastsTemplate {
    pub toasts: Vec<ToastView>,
}

/// Header badges swapped out-of-band.
#[derive(Template)]
#[template(path = "partials/counters_oob.html")]
pub struct CountersOobTemplate {
    pub counters: Counters,
}

/// Cart rows swapped out-of-band.
#[derive(Template)]
#[template(path = "partials/cart_items_oob.html")]
pub struct CartItemsOobTemplate {
    pub cart: CartView,
}

/// Wishlist rows swapped out-of-band.
#[derive(Template)]
#[template(path = "partials/wishlist_items_oob.html")]
pub struct WishlistItemsOobTemplate {
    pub wishlist: WishlistView,
}

/// New toasts appended to the notification area out-of-band.
#[derive(Template)]
#[template(path = "partials/toasts_oob.html")]
pub struct ToastsOobTemplate {
    pub toasts: Vec<ToastView>,
}

/// Header badges (HTMX fragment).
#[instrument(skip(state))]
pub async fn counters(State(state): State<AppState>) -> impl IntoResponse {
    let counters = Counters::project(&state.shop().storefront);
    CountersTemplate { counters }
}

/// Toasts still on screen (HTMX fragment).
#[instrument(skip(state))]
pub async fn notifications(State(state): State<AppState>) -> impl IntoResponse {
    let now = Utc::now();
    let active = state.shop().notifier.active(now);
    ToastsTemplate {
        toasts: ToastView::project_all(&active, now),
    }
}
