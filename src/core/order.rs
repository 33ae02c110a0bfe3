//! Order record and the values used to create it

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status given to every freshly placed order
pub const STATUS_NEW: &str = "NEW";

/// A persisted order
///
/// `id` is assigned by the store and never changes. `order_date` is set
/// once at creation; only `status` (and, through a full replace, the
/// product/customer/quantity fields) may change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i32,
    pub product_id: i32,
    pub customer_id: i32,
    pub quantity: i32,
    pub order_date: DateTime<Utc>,
    pub status: String,
}

/// An order that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub product_id: i32,
    pub customer_id: i32,
    pub quantity: i32,
    pub order_date: DateTime<Utc>,
    pub status: String,
}

impl NewOrder {
    /// A new order placed right now with status `NEW`
    pub fn placed(product_id: i32, customer_id: i32, quantity: i32) -> Self {
        Self {
            product_id,
            customer_id,
            quantity,
            order_date: Utc::now(),
            status: STATUS_NEW.to_string(),
        }
    }

    /// Override the order date (seeding, imports)
    pub fn dated(mut self, order_date: DateTime<Utc>) -> Self {
        self.order_date = order_date;
        self
    }

    /// Override the status (seeding, imports)
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Attach the store-assigned identifier
    pub fn into_order(self, id: i32) -> Order {
        Order {
            id,
            product_id: self.product_id,
            customer_id: self.customer_id,
            quantity: self.quantity,
            order_date: self.order_date,
            status: self.status,
        }
    }
}

/// Fields replaced by a full update; id and order date are kept
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderReplacement {
    pub product_id: i32,
    pub customer_id: i32,
    pub quantity: i32,
    pub status: String,
}

impl Order {
    /// Apply a full replacement, keeping identity and creation date
    pub fn replaced_with(self, replacement: OrderReplacement) -> Self {
        Self {
            id: self.id,
            order_date: self.order_date,
            product_id: replacement.product_id,
            customer_id: replacement.customer_id,
            quantity: replacement.quantity,
            status: replacement.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_placed_order_is_new() {
        let before = Utc::now();
        let order = NewOrder::placed(1, 2, 3);
        assert_eq!(order.status, STATUS_NEW);
        assert!(order.order_date >= before);
    }

    #[test]
    fn test_replace_keeps_id_and_date() {
        let date = Utc::now() - Duration::days(3);
        let order = NewOrder::placed(1, 2, 3).dated(date).into_order(9);
        let replaced = order.replaced_with(OrderReplacement {
            product_id: 5,
            customer_id: 6,
            quantity: 7,
            status: "SHIPPED".to_string(),
        });

        assert_eq!(replaced.id, 9);
        assert_eq!(replaced.order_date, date);
        assert_eq!(replaced.product_id, 5);
        assert_eq!(replaced.status, "SHIPPED");
    }

    #[test]
    fn test_serializes_camel_case() {
        let order = NewOrder::placed(10, 20, 1).into_order(1);
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["productId"], 10);
        assert_eq!(json["customerId"], 20);
        assert!(json["orderDate"].is_string());
    }
}
