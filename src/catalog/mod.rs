//! Product catalog lookups
//!
//! Order placement resolves the product through a [`ProductCatalog`]. The
//! production implementation talks HTTP to the catalog service; the
//! in-memory one is used by tests and local development.

pub mod http;
pub mod in_memory;

pub use http::HttpProductCatalog;
pub use in_memory::InMemoryProductCatalog;

use crate::core::error::CatalogError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Read-only snapshot of a catalog product, fetched on every placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub price: f64,
}

/// Resolves product ids against the catalog service
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Look up a product
    ///
    /// `Ok(None)` means the catalog answered and has no such product.
    async fn find_product(&self, product_id: i32) -> Result<Option<Product>, CatalogError>;
}
