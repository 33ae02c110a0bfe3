//! In-memory product catalog for testing and development

use super::{Product, ProductCatalog};
use crate::core::error::CatalogError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Product catalog backed by a map
#[derive(Clone, Default)]
pub struct InMemoryProductCatalog {
    products: Arc<RwLock<HashMap<i32, Product>>>,
}

impl InMemoryProductCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with_product(self, id: i32, name: impl Into<String>, price: f64) -> Self {
        self.insert(Product {
            id,
            name: name.into(),
            price,
        });
        self
    }

    /// Insert or replace a product
    pub fn insert(&self, product: Product) {
        if let Ok(mut products) = self.products.write() {
            products.insert(product.id, product);
        }
    }
}

#[async_trait]
impl ProductCatalog for InMemoryProductCatalog {
    async fn find_product(&self, product_id: i32) -> Result<Option<Product>, CatalogError> {
        let products = self
            .products
            .read()
            .map_err(|e| CatalogError::Unavailable {
                message: format!("Failed to acquire read lock: {}", e),
            })?;

        Ok(products.get(&product_id).cloned())
    }
}
