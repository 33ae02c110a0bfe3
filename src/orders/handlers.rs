//! Order HTTP handlers

use super::dto::{CreateOrderRequest, HistoryQuery, ReplaceOrderRequest, parse_status_body};
use crate::core::error::{OrderServiceError, OrderServiceResult};
use crate::core::order::Order;
use crate::core::validation::ValidatedJson;
use crate::server::host::ServerHost;
use crate::server::response::ApiResponse;
use axum::{
    Json,
    extract::{Path, Query, State},
};
use std::sync::Arc;

type OrderResponse = OrderServiceResult<Json<ApiResponse<Order>>>;

pub async fn list_orders(
    State(host): State<Arc<ServerHost>>,
) -> OrderServiceResult<Json<ApiResponse<Vec<Order>>>> {
    let orders = host.orders.list_all().await?;
    Ok(Json(ApiResponse::success(orders)))
}

pub async fn get_order(State(host): State<Arc<ServerHost>>, Path(id): Path<i32>) -> OrderResponse {
    let order = host.orders.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(order)))
}

pub async fn place_order(
    State(host): State<Arc<ServerHost>>,
    ValidatedJson(request): ValidatedJson<CreateOrderRequest>,
) -> OrderResponse {
    let (Some(product_id), Some(customer_id), Some(quantity)) =
        (request.product_id, request.customer_id, request.quantity)
    else {
        return Err(OrderServiceError::Internal(
            "validated order request is missing fields".to_string(),
        ));
    };

    let order = host
        .orders
        .place_order(product_id, customer_id, quantity)
        .await?;
    Ok(Json(ApiResponse::success(order)))
}

pub async fn order_history(
    State(host): State<Arc<ServerHost>>,
    Query(query): Query<HistoryQuery>,
) -> OrderServiceResult<Json<ApiResponse<Vec<Order>>>> {
    let orders = host.orders.list_by_customer(query.customer_id).await?;
    Ok(Json(ApiResponse::success(orders)))
}

pub async fn delete_order(
    State(host): State<Arc<ServerHost>>,
    Path(id): Path<i32>,
) -> OrderServiceResult<Json<ApiResponse<&'static str>>> {
    host.orders.delete(id).await?;
    Ok(Json(ApiResponse::success("Order deleted")))
}

pub async fn update_status(
    State(host): State<Arc<ServerHost>>,
    Path(id): Path<i32>,
    body: String,
) -> OrderResponse {
    let order = host
        .orders
        .update_status(id, parse_status_body(&body))
        .await?;
    Ok(Json(ApiResponse::success(order)))
}

pub async fn replace_order(
    State(host): State<Arc<ServerHost>>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<ReplaceOrderRequest>,
) -> OrderResponse {
    let replacement = request.into_replacement().ok_or_else(|| {
        OrderServiceError::Internal("validated replace request is missing fields".to_string())
    })?;

    let order = host.orders.replace(id, replacement).await?;
    Ok(Json(ApiResponse::success(order)))
}
