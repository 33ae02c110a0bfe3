//! Request bodies for the order endpoints

use crate::core::order::OrderReplacement;
use serde::Deserialize;
use validator::Validate;

/// Body of `POST /orders`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[validate(required(message = "productId is required"))]
    pub product_id: Option<i32>,

    #[validate(required(message = "customerId is required"))]
    pub customer_id: Option<i32>,

    #[validate(
        required(message = "quantity is required"),
        range(min = 1, message = "quantity must be at least 1")
    )]
    pub quantity: Option<i32>,
}

/// Body of `PUT /orders/{id}`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceOrderRequest {
    #[validate(required(message = "productId is required"))]
    pub product_id: Option<i32>,

    #[validate(required(message = "customerId is required"))]
    pub customer_id: Option<i32>,

    #[validate(
        required(message = "quantity is required"),
        range(min = 1, message = "quantity must be at least 1")
    )]
    pub quantity: Option<i32>,

    #[validate(required(message = "status is required"))]
    pub status: Option<String>,
}

impl ReplaceOrderRequest {
    /// Convert a validated request; `None` only if validation was skipped
    pub fn into_replacement(self) -> Option<OrderReplacement> {
        Some(OrderReplacement {
            product_id: self.product_id?,
            customer_id: self.customer_id?,
            quantity: self.quantity?,
            status: self.status?,
        })
    }
}

/// Query string of `GET /orders/history`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    pub customer_id: i32,
}

/// Decode the raw body of `PUT /orders/{id}/status`
///
/// Plain text is taken as-is; a JSON string literal such as `"SHIPPED"` is
/// unquoted first.
pub fn parse_status_body(body: &str) -> String {
    serde_json::from_str::<String>(body).unwrap_or_else(|_| body.to_string())
}
