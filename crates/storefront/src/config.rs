//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_DATA_DIR` - Directory holding `cart.json` / `wishlist.json`
//!   (default: .kitchenmart)
//! - `STOREFRONT_CATALOG_PATH` - Product catalog JSON file (default: none, empty grid)
//! - `STOREFRONT_STATIC_DIR` - Static assets directory (default: crates/storefront/static)
//! - `STOREFRONT_CURRENCY` - ISO 4217 code used for empty totals (default: KES)
//! - `CHECKOUT_CHANNEL_URL` - Messaging link base (default: <https://wa.me>)
//! - `CHECKOUT_RECIPIENT` - Phone number orders are sent to (default: 254714227080)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use kitchenmart_core::CurrencyCode;
use thiserror::Error;

use crate::checkout::{ChannelError, CheckoutChannel};

pub const DEFAULT_CHANNEL_URL: &str = "https://wa.me";
pub const DEFAULT_RECIPIENT: &str = "254714227080";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory for the persisted cart and wishlist
    pub data_dir: PathBuf,
    /// Product catalog file
    pub catalog_path: Option<PathBuf>,
    /// Static assets directory
    pub static_dir: PathBuf,
    /// Currency used when a total has no items to take it from
    pub currency: CurrencyCode,
    /// Where orders are handed off to
    pub checkout: CheckoutChannel,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = parse_var("STOREFRONT_HOST", &get_or("STOREFRONT_HOST", "127.0.0.1"))?;
        let port = parse_var("STOREFRONT_PORT", &get_or("STOREFRONT_PORT", "3000"))?;
        let currency = parse_var("STOREFRONT_CURRENCY", &get_or("STOREFRONT_CURRENCY", "KES"))?;

        let checkout = CheckoutChannel::new(
            &get_or("CHECKOUT_CHANNEL_URL", DEFAULT_CHANNEL_URL),
            &get_or("CHECKOUT_RECIPIENT", DEFAULT_RECIPIENT),
        )
        .map_err(|e| {
            let key = match &e {
                ChannelError::InvalidRecipient(_) => "CHECKOUT_RECIPIENT",
                ChannelError::InvalidUrl(_) | ChannelError::InsecureScheme(_) => {
                    "CHECKOUT_CHANNEL_URL"
                }
            };
            ConfigError::InvalidEnvVar(key.to_string(), e.to_string())
        })?;

        Ok(Self {
            host,
            port,
            data_dir: PathBuf::from(get_or("STOREFRONT_DATA_DIR", ".kitchenmart")),
            catalog_path: lookup("STOREFRONT_CATALOG_PATH")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            static_dir: PathBuf::from(get_or("STOREFRONT_STATIC_DIR", "crates/storefront/static")),
            currency,
            checkout,
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Parse a variable's value, naming the variable in the error.
fn parse_var<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.data_dir, PathBuf::from(".kitchenmart"));
        assert_eq!(config.catalog_path, None);
        assert_eq!(config.currency, CurrencyCode::KES);
        assert_eq!(config.checkout.recipient(), "254714227080");
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("STOREFRONT_HOST", "0.0.0.0"),
            ("STOREFRONT_PORT", "8080"),
            ("STOREFRONT_DATA_DIR", "/var/lib/kitchenmart"),
            ("STOREFRONT_CATALOG_PATH", "catalog.json"),
            ("STOREFRONT_CURRENCY", "usd"),
            ("CHECKOUT_RECIPIENT", "+15550100"),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/kitchenmart"));
        assert_eq!(config.catalog_path, Some(PathBuf::from("catalog.json")));
        assert_eq!(config.currency, CurrencyCode::USD);
        assert_eq!(config.checkout.recipient(), "15550100");
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            config_from(&[("STOREFRONT_PORT", "not-a-port")]),
            Err(ConfigError::InvalidEnvVar(key, _)) if key == "STOREFRONT_PORT"
        ));
        assert!(matches!(
            config_from(&[("STOREFRONT_CURRENCY", "XYZ")]),
            Err(ConfigError::InvalidEnvVar(key, _)) if key == "STOREFRONT_CURRENCY"
        ));
        assert!(matches!(
            config_from(&[("CHECKOUT_CHANNEL_URL", "http://wa.me")]),
            Err(ConfigError::InvalidEnvVar(key, _)) if key == "CHECKOUT_CHANNEL_URL"
        ));
        assert!(matches!(
            config_from(&[("CHECKOUT_RECIPIENT", "call me")]),
            Err(ConfigError::InvalidEnvVar(key, _)) if key == "CHECKOUT_RECIPIENT"
        ));
    }
}
