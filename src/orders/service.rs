//! Order service: validation, persistence and status transitions

use crate::catalog::ProductCatalog;
use crate::core::error::{
    OrderError, OrderServiceResult, PlacementFailure, ValidationError,
};
use crate::core::order::{NewOrder, Order, OrderReplacement};
use crate::core::store::OrderStore;
use std::sync::Arc;

/// Orchestrates order operations over a store and the product catalog
#[derive(Clone)]
pub struct OrderService {
    store: Arc<dyn OrderStore>,
    catalog: Arc<dyn ProductCatalog>,
}

impl OrderService {
    pub fn new(store: Arc<dyn OrderStore>, catalog: Arc<dyn ProductCatalog>) -> Self {
        Self { store, catalog }
    }

    pub async fn list_all(&self) -> OrderServiceResult<Vec<Order>> {
        Ok(self.store.list().await?)
    }

    pub async fn get_by_id(&self, id: i32) -> OrderServiceResult<Order> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| OrderError::NotFound { id }.into())
    }

    /// Place a new order after checking the product exists
    ///
    /// Nothing is persisted when the lookup fails or finds no product.
    pub async fn place_order(
        &self,
        product_id: i32,
        customer_id: i32,
        quantity: i32,
    ) -> OrderServiceResult<Order> {
        if quantity < 1 {
            return Err(ValidationError::FieldError {
                field: "quantity".to_string(),
                message: "must be at least 1".to_string(),
            }
            .into());
        }

        match self.try_place(product_id, customer_id, quantity).await {
            Ok((order, product_name)) => {
                tracing::info!(
                    order_id = order.id,
                    product = %product_name,
                    "Order placed"
                );
                Ok(order)
            }
            Err(source) => {
                tracing::error!(
                    product_id,
                    error = %source,
                    "Failed to place order"
                );
                Err(OrderError::PlacementFailed { product_id, source }.into())
            }
        }
    }

    async fn try_place(
        &self,
        product_id: i32,
        customer_id: i32,
        quantity: i32,
    ) -> Result<(Order, String), PlacementFailure> {
        let product = self
            .catalog
            .find_product(product_id)
            .await?
            .ok_or(PlacementFailure::ProductNotFound { product_id })?;

        let order = self
            .store
            .create(NewOrder::placed(product_id, customer_id, quantity))
            .await?;

        Ok((order, product.name))
    }

    pub async fn list_by_customer(&self, customer_id: i32) -> OrderServiceResult<Vec<Order>> {
        Ok(self.store.find_by_customer(customer_id).await?)
    }

    /// Hard delete; unknown ids are ignored
    pub async fn delete(&self, id: i32) -> OrderServiceResult<()> {
        self.store.delete(id).await?;
        tracing::warn!(order_id = id, "Order deleted");
        Ok(())
    }

    /// Overwrite the status of an existing order
    ///
    /// Any status string is accepted. Read and write are separate store
    /// calls, so a concurrent delete in between is not detected.
    pub async fn update_status(
        &self,
        id: i32,
        status: impl Into<String>,
    ) -> OrderServiceResult<Order> {
        let mut order = self.get_by_id(id).await?;
        order.status = status.into();
        Ok(self.store.save(order).await?)
    }

    /// Replace every mutable field of an existing order
    pub async fn replace(
        &self,
        id: i32,
        replacement: OrderReplacement,
    ) -> OrderServiceResult<Order> {
        let order = self.get_by_id(id).await?;
        Ok(self.store.save(order.replaced_with(replacement)).await?)
    }
}
