//! KitchenMart Core - Shared types library.
//!
//! This crate provides the domain types used across the KitchenMart components:
//! - `storefront` - Cart/wishlist state engine and the local storefront host
//! - `cli` - Command-line tools for inspecting and editing the persisted store
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no HTTP.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product identifiers, prices, and cart/wishlist entries

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
