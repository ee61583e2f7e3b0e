//! Application state shared across handlers.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::catalog::Catalog;
use crate::checkout::CheckoutChannel;
use crate::config::StorefrontConfig;
use crate::dispatch::Dispatcher;
use crate::notify::Notifier;
use crate::storage::{JsonFileStore, StorageError};
use crate::store::Storefront;

/// The mutable part of the application: shopper state and live toasts.
#[derive(Debug)]
pub struct Shop {
    pub storefront: Storefront,
    pub notifier: Notifier,
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. All mutation goes through
/// [`AppState::shop`], which serializes actions so each one runs to
/// completion before the next starts.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    shop: Mutex<Shop>,
    catalog: Catalog,
    dispatcher: Dispatcher,
}

impl AppState {
    /// Create the application state, loading persisted state from the data
    /// directory and the catalog from its configured path.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub fn new(config: StorefrontConfig) -> Result<Self, StorageError> {
        let store = JsonFileStore::open(&config.data_dir)?;
        let storefront = Storefront::load(Box::new(store), config.currency);
        let catalog = Catalog::load_or_empty(config.catalog_path.as_deref());
        Ok(Self::from_parts(config, storefront, catalog))
    }

    /// Assemble the state from already-loaded parts.
    #[must_use]
    pub fn from_parts(config: StorefrontConfig, storefront: Storefront, catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                shop: Mutex::new(Shop {
                    storefront,
                    notifier: Notifier::new(),
                }),
                catalog,
                dispatcher: Dispatcher::default(),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    #[must_use]
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.inner.dispatcher
    }

    #[must_use]
    pub fn channel(&self) -> &CheckoutChannel {
        &self.inner.config.checkout
    }

    /// Lock the shop for the duration of one action or render.
    ///
    /// Every operation leaves the state consistent, so a lock poisoned by a
    /// panicking handler is recovered rather than propagated.
    pub fn shop(&self) -> MutexGuard<'_, Shop> {
        self.inner
            .shop
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
