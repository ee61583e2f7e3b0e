//! Subcommand implementations.

pub mod checkout;
pub mod clear;
pub mod dispatch;
pub mod show;

use kitchenmart_storefront::config::StorefrontConfig;
use kitchenmart_storefront::storage::{JsonFileStore, StorageError};
use kitchenmart_storefront::store::Storefront;

/// Load the shopper state from the configured data directory.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created.
pub fn open_storefront(config: &StorefrontConfig) -> Result<Storefront, StorageError> {
    let store = JsonFileStore::open(&config.data_dir)?;
    Ok(Storefront::load(Box::new(store), config.currency))
}
