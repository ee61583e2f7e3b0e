//! Core types for KitchenMart.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod product;

pub use id::{ProductId, ProductIdError};
pub use price::{CurrencyCode, Price, PriceError, format_amount};
pub use product::{CartItem, ProductSnapshot, WishlistItem};
