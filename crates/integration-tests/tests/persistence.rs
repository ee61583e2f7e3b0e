//! Integration tests for cart and wishlist persistence.
//!
//! Each test writes through one `Storefront`, then loads a fresh one from
//! the same data directory.

use kitchenmart_core::ProductId;
use kitchenmart_integration_tests::{open_storefront, product};
use tempfile::TempDir;

fn id(s: &str) -> ProductId {
    ProductId::parse(s).unwrap()
}

#[test]
fn test_cart_survives_reload() {
    let dir = TempDir::new().unwrap();

    let mut storefront = open_storefront(dir.path());
    storefront.add_to_cart(product("knife-set", "Knife Set", "KSh 1,200"));
    storefront.add_to_cart(product("knife-set", "Knife Set", "KSh 1,200"));
    storefront.add_to_cart(product("board", "Chopping Board", "KSh 850"));
    storefront.decrease_quantity(&id("board"));

    let reloaded = open_storefront(dir.path());
    assert_eq!(reloaded.cart(), storefront.cart());
    drop(storefront);

    assert_eq!(reloaded.cart().len(), 1);
    let line = reloaded.cart().get(&id("knife-set")).unwrap();
    assert_eq!(line.quantity, 2);
    assert_eq!(line.line_total().display(), "KSh 2,400");
}

#[test]
fn test_wishlist_survives_reload() {
    let dir = TempDir::new().unwrap();

    let mut storefront = open_storefront(dir.path());
    storefront.toggle_wishlist(product("kettle", "Electric Kettle", "KSh 3,499.50"));
    storefront.toggle_wishlist(product("board", "Chopping Board", "KSh 850"));
    storefront.toggle_wishlist(product("board", "Chopping Board", "KSh 850"));

    let reloaded = open_storefront(dir.path());
    assert_eq!(reloaded.wishlist(), storefront.wishlist());
    drop(storefront);

    assert_eq!(reloaded.wishlist().len(), 1);
    assert!(reloaded.wishlist().contains(&id("kettle")));
    assert!(!reloaded.wishlist().contains(&id("board")));
}

#[test]
fn test_reload_reproduces_both_collections() {
    let dir = TempDir::new().unwrap();

    let mut storefront = open_storefront(dir.path());
    storefront.add_to_cart(product("kettle", "Electric Kettle", "KSh 3,499.50"));
    storefront.add_to_cart(product("knife-set", "Knife Set", "KSh 1,200"));
    storefront.increase_quantity(&id("kettle"));
    storefront.toggle_wishlist(product("board", "Chopping Board", "KSh 850"));
    storefront.toggle_wishlist(product("kettle", "Electric Kettle", "KSh 3,499.50"));

    let reloaded = open_storefront(dir.path());
    assert_eq!(reloaded.cart(), storefront.cart());
    assert_eq!(reloaded.wishlist(), storefront.wishlist());
}

#[test]
fn test_emptied_cart_stays_empty() {
    let dir = TempDir::new().unwrap();

    let mut storefront = open_storefront(dir.path());
    storefront.add_to_cart(product("board", "Chopping Board", "KSh 850"));
    storefront.empty_cart(false);
    assert_eq!(open_storefront(dir.path()).cart().len(), 1);

    storefront.empty_cart(true);
    assert!(open_storefront(dir.path()).cart().is_empty());
}

#[test]
fn test_documents_written_by_older_builds_load() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("cart.json"),
        r#"[
            {"id":"knife-set","title":"Knife Set","price":"KSh 1,200","image":"img/knife.jpg","quantity":3},
            {"id":"ghost","title":"Ghost","price":"KSh 10","image":"","quantity":0},
            {"id":"knife-set","title":"Duplicate","price":"KSh 1","image":"","quantity":9}
        ]"#,
    )
    .unwrap();
    std::fs::write(
        dir.path().join("wishlist.json"),
        r#"[{"id":"board","title":"Chopping Board","price":"KSh 850","image":""}]"#,
    )
    .unwrap();

    let storefront = open_storefront(dir.path());
    assert_eq!(storefront.cart().len(), 1);
    let line = storefront.cart().get(&id("knife-set")).unwrap();
    assert_eq!(line.title, "Knife Set");
    assert_eq!(line.quantity, 3);
    assert_eq!(storefront.cart().subtotal(storefront.currency()).display(), "KSh 3,600");
    assert!(storefront.wishlist().contains(&id("board")));
}

#[test]
fn test_corrupt_documents_start_empty() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("cart.json"), "{not json").unwrap();
    std::fs::write(dir.path().join("wishlist.json"), "42").unwrap();

    let mut storefront = open_storefront(dir.path());
    assert!(storefront.cart().is_empty());
    assert!(storefront.wishlist().is_empty());

    // The next write replaces the corrupt document.
    storefront.add_to_cart(product("board", "Chopping Board", "KSh 850"));
    assert_eq!(open_storefront(dir.path()).cart().len(), 1);
}
