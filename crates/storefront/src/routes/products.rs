//! Product grid route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use super::page_chrome;
use crate::state::AppState;
use crate::views::{Counters, ProductCardView, ToastView};

/// Product grid page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub counters: Counters,
    pub toasts: Vec<ToastView>,
    pub products: Vec<ProductCardView>,
}

/// Display the catalog with like buttons reflecting the wishlist.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let mut shop = state.shop();
    let (counters, toasts) = page_chrome(&mut shop);
    let products =
        ProductCardView::project_all(state.catalog().products(), shop.storefront.wishlist());
    drop(shop);

    ProductsIndexTemplate {
        counters,
        toasts,
        products,
    }
}
