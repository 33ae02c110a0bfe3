//! HTTP client for the product catalog service

use super::{Product, ProductCatalog};
use crate::core::error::CatalogError;
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;

/// Product catalog reached over HTTP at `{base_url}/products/{id}`
///
/// Every request is bounded by `timeout`; exceeding it yields
/// [`CatalogError::Timeout`]. There is no retry.
#[derive(Clone)]
pub struct HttpProductCatalog {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpProductCatalog {
    /// Create a client for the catalog at `base_url`
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::Unavailable {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn classify(&self, err: reqwest::Error) -> CatalogError {
        if err.is_timeout() {
            CatalogError::Timeout {
                timeout_ms: self.timeout.as_millis() as u64,
            }
        } else {
            CatalogError::Unavailable {
                message: err.to_string(),
            }
        }
    }
}

#[async_trait]
impl ProductCatalog for HttpProductCatalog {
    async fn find_product(&self, product_id: i32) -> Result<Option<Product>, CatalogError> {
        let url = format!("{}/products/{}", self.base_url, product_id);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body = response
            .error_for_status()
            .map_err(|e| self.classify(e))?
            .bytes()
            .await
            .map_err(|e| self.classify(e))?;

        // An empty body or a JSON null both mean "no such product"
        if body.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(None);
        }

        serde_json::from_slice::<Option<Product>>(&body).map_err(|e| CatalogError::Unavailable {
            message: format!("Invalid product payload: {}", e),
        })
    }
}
