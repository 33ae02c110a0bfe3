//! In-memory implementation of OrderStore for testing and development

use crate::core::error::StorageError;
use crate::core::order::{NewOrder, Order};
use crate::core::store::{OrderStore, StoreResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Inner {
    last_id: i32,
    orders: BTreeMap<i32, Order>,
}

/// In-memory order store
///
/// Identifiers are assigned sequentially starting at 1 and never reused.
/// Iteration follows id order. Uses RwLock for thread-safe access.
#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryOrderStore {
    /// Create a new in-memory order store
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Inner>> {
        self.inner.read().map_err(|e| StorageError::Unavailable {
            message: format!("Failed to acquire read lock: {}", e),
        })
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Inner>> {
        self.inner.write().map_err(|e| StorageError::Unavailable {
            message: format!("Failed to acquire write lock: {}", e),
        })
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn create(&self, order: NewOrder) -> StoreResult<Order> {
        let mut inner = self.write()?;

        inner.last_id += 1;
        let order = order.into_order(inner.last_id);
        inner.orders.insert(order.id, order.clone());

        Ok(order)
    }

    async fn get(&self, id: i32) -> StoreResult<Option<Order>> {
        Ok(self.read()?.orders.get(&id).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<Order>> {
        Ok(self.read()?.orders.values().cloned().collect())
    }

    async fn find_by_customer(&self, customer_id: i32) -> StoreResult<Vec<Order>> {
        Ok(self
            .read()?
            .orders
            .values()
            .filter(|order| order.customer_id == customer_id)
            .cloned()
            .collect())
    }

    async fn find_by_order_date_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<Order>> {
        Ok(self
            .read()?
            .orders
            .values()
            .filter(|order| order.order_date >= start && order.order_date <= end)
            .cloned()
            .collect())
    }

    async fn save(&self, order: Order) -> StoreResult<Order> {
        let mut inner = self.write()?;

        inner.last_id = inner.last_id.max(order.id);
        inner.orders.insert(order.id, order.clone());

        Ok(order)
    }

    async fn delete(&self, id: i32) -> StoreResult<()> {
        self.write()?.orders.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let store = InMemoryOrderStore::new();

        let first = store.create(NewOrder::placed(1, 7, 1)).await.unwrap();
        let second = store.create(NewOrder::placed(2, 7, 3)).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let store = InMemoryOrderStore::new();

        let first = store.create(NewOrder::placed(1, 7, 1)).await.unwrap();
        store.delete(first.id).await.unwrap();
        let second = store.create(NewOrder::placed(1, 7, 1)).await.unwrap();

        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_find_by_customer() {
        let store = InMemoryOrderStore::new();
        store.create(NewOrder::placed(1, 7, 1)).await.unwrap();
        store.create(NewOrder::placed(2, 9, 1)).await.unwrap();
        store.create(NewOrder::placed(3, 7, 1)).await.unwrap();

        let orders = store.find_by_customer(7).await.unwrap();
        assert_eq!(orders.len(), 2);
        assert!(orders.iter().all(|o| o.customer_id == 7));
    }

    #[tokio::test]
    async fn test_date_range_is_inclusive() {
        let store = InMemoryOrderStore::new();
        let end = Utc::now();
        let start = end - Duration::days(7);

        let at_start = store
            .create(NewOrder::placed(1, 1, 1).dated(start))
            .await
            .unwrap();
        let at_end = store
            .create(NewOrder::placed(1, 1, 1).dated(end))
            .await
            .unwrap();
        store
            .create(NewOrder::placed(1, 1, 1).dated(start - Duration::seconds(1)))
            .await
            .unwrap();

        let ids: Vec<i32> = store
            .find_by_order_date_between(start, end)
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(ids, vec![at_start.id, at_end.id]);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_ok() {
        let store = InMemoryOrderStore::new();
        assert!(store.delete(42).await.is_ok());
    }

    #[tokio::test]
    async fn test_save_overwrites() {
        let store = InMemoryOrderStore::new();
        let mut order = store.create(NewOrder::placed(1, 1, 1)).await.unwrap();
        order.status = "SHIPPED".to_string();

        store.save(order.clone()).await.unwrap();

        assert_eq!(store.get(order.id).await.unwrap(), Some(order));
    }
}
