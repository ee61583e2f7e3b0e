//! Integration tests for KitchenMart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p kitchenmart-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `persistence` - Cart and wishlist survive a reload from disk
//! - `storefront_routes` - Full action flows through the router
//! - `checkout` - Order message and hand-off link
//!
//! Everything runs in-process against a temporary data directory; no
//! server or network is needed.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::Path;

use axum::Router;
use kitchenmart_core::{CurrencyCode, Price, ProductId, ProductSnapshot};
use kitchenmart_storefront::catalog::Catalog;
use kitchenmart_storefront::config::StorefrontConfig;
use kitchenmart_storefront::state::AppState;
use kitchenmart_storefront::storage::JsonFileStore;
use kitchenmart_storefront::store::Storefront;

/// Default configuration pointed at `data_dir`.
pub fn test_config(data_dir: &Path) -> StorefrontConfig {
    let data_dir = data_dir.display().to_string();
    StorefrontConfig::from_lookup(|key| (key == "STOREFRONT_DATA_DIR").then(|| data_dir.clone()))
        .expect("default configuration is valid")
}

/// A product as its card would show it.
pub fn product(id: &str, title: &str, price: &str) -> ProductSnapshot {
    ProductSnapshot {
        id: ProductId::parse(id).unwrap(),
        title: title.to_string(),
        price: Price::parse_display(price, CurrencyCode::KES).unwrap(),
        image: format!("/static/img/{id}.jpg"),
    }
}

/// A small kitchenware catalog.
pub fn sample_catalog() -> Catalog {
    Catalog::new(vec![
        product("knife-set", "Knife Set", "KSh 1,200"),
        product("board", "Chopping Board", "KSh 850"),
        product("kettle", "Electric Kettle", "KSh 3,499.50"),
    ])
}

/// Load the shopper state persisted in `data_dir`.
pub fn open_storefront(data_dir: &Path) -> Storefront {
    let store = JsonFileStore::open(data_dir).unwrap();
    Storefront::load(Box::new(store), CurrencyCode::KES)
}

/// The full application over `data_dir` with [`sample_catalog`].
pub fn test_app(data_dir: &Path) -> Router {
    let state = AppState::from_parts(
        test_config(data_dir),
        open_storefront(data_dir),
        sample_catalog(),
    );
    kitchenmart_storefront::app(state)
}
