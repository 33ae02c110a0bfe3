//! Persistence contract for orders

use crate::core::error::StorageError;
use crate::core::order::{NewOrder, Order};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Result of a single store operation
pub type StoreResult<T> = Result<T, StorageError>;

/// Store for order records
///
/// Implementations assign identifiers on [`create`](OrderStore::create) and
/// answer lookups by id, by customer and by date range. Every call is a
/// single read or a single write; callers compose multi-step flows
/// themselves without a surrounding transaction.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persist a new order and assign it a fresh identifier
    async fn create(&self, order: NewOrder) -> StoreResult<Order>;

    /// Get an order by ID
    async fn get(&self, id: i32) -> StoreResult<Option<Order>>;

    /// List all orders in the store's natural (id) order
    async fn list(&self) -> StoreResult<Vec<Order>>;

    /// All orders placed by a customer
    async fn find_by_customer(&self, customer_id: i32) -> StoreResult<Vec<Order>>;

    /// Orders whose order date lies in `[start, end]`, both ends inclusive
    async fn find_by_order_date_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<Order>>;

    /// Write an existing order back, last write wins
    async fn save(&self, order: Order) -> StoreResult<Order>;

    /// Delete an order; deleting an unknown id is not an error
    async fn delete(&self, id: i32) -> StoreResult<()>;
}
