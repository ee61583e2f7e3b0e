//! Product catalog shown on the product grid.
//!
//! The catalog is a JSON array of products, each with `id`, `title`,
//! `price` (either `"KSh 1,200"` or `{"amount": "1200", "currency": "KES"}`)
//! and `image`. It is read once at startup.

use std::path::{Path, PathBuf};

use kitchenmart_core::{ProductId, ProductSnapshot};
use thiserror::Error;

/// Errors loading a catalog file.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// The products offered on the grid, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<ProductSnapshot>,
}

impl Catalog {
    /// Build a catalog, keeping the first product for each id.
    #[must_use]
    pub fn new(products: Vec<ProductSnapshot>) -> Self {
        let mut catalog = Self::default();
        for product in products {
            if catalog.get(&product.id).is_some() {
                tracing::warn!(
                    product_id = %product.id,
                    "duplicate product id in catalog, skipping"
                );
                continue;
            }
            catalog.products.push(product);
        }
        catalog
    }

    /// Read a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid catalog.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_owned(),
            source,
        })?;
        let products = serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
            path: path.to_owned(),
            source,
        })?;
        Ok(Self::new(products))
    }

    /// Read the catalog at `path`, or start with an empty one if there is no
    /// path or the file cannot be loaded.
    #[must_use]
    pub fn load_or_empty(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match Self::load(path) {
            Ok(catalog) => {
                tracing::info!(products = catalog.len(), path = %path.display(), "catalog loaded");
                catalog
            }
            Err(e) => {
                tracing::warn!(error = %e, "catalog unavailable, product grid will be empty");
                Self::default()
            }
        }
    }

    #[must_use]
    pub fn products(&self) -> &[ProductSnapshot] {
        &self.products
    }

    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&ProductSnapshot> {
        self.products.iter().find(|product| &product.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const CATALOG_JSON: &str = r#"[
        {"id": "knife-set", "title": "Knife Set", "price": "KSh 1,200", "image": "img/knife.jpg"},
        {"id": "kettle", "title": "Kettle", "price": {"amount": "3500", "currency": "KES"}, "image": "img/kettle.jpg"},
        {"id": "knife-set", "title": "Duplicate", "price": "KSh 1", "image": "img/dup.jpg"}
    ]"#;

    #[test]
    fn test_load_catalog_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, CATALOG_JSON).unwrap();

        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.len(), 2);

        let knife = catalog.get(&ProductId::parse("knife-set").unwrap()).unwrap();
        assert_eq!(knife.title, "Knife Set");
        assert_eq!(knife.price.display(), "KSh 1,200");
    }

    #[test]
    fn test_missing_or_bad_catalog_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(Catalog::load_or_empty(Some(&missing)).is_empty());
        assert!(Catalog::load_or_empty(None).is_empty());

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "[{\"id\": 1}]").unwrap();
        assert!(matches!(
            Catalog::load(&bad),
            Err(CatalogError::Parse { .. })
        ));
        assert!(Catalog::load_or_empty(Some(&bad)).is_empty());
    }
}
