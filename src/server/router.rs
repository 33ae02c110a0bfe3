//! Route table
//!
//! - `GET /health`, `GET /healthz`
//! - `GET|POST /orders`, `GET /orders/history?customerId=`
//! - `GET|PUT|DELETE /orders/{id}`, `PUT /orders/{id}/status`
//! - `POST /admin/reports/{download,save,email}`

use super::host::ServerHost;
use crate::orders::handlers::{
    delete_order, get_order, list_orders, order_history, place_order, replace_order,
    update_status,
};
use crate::reports::handlers::{download_report, email_report, save_report};
use axum::{
    Json, Router,
    routing::{get, post, put},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

pub const SERVICE_NAME: &str = "order-service";

/// Build the complete application router
pub fn build_router(host: Arc<ServerHost>) -> Router {
    health_routes()
        .merge(order_routes())
        .merge(report_routes())
        .with_state(host)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

fn health_routes() -> Router<Arc<ServerHost>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

fn order_routes() -> Router<Arc<ServerHost>> {
    Router::new()
        .route("/orders", get(list_orders).post(place_order))
        .route("/orders/history", get(order_history))
        .route(
            "/orders/{id}",
            get(get_order).put(replace_order).delete(delete_order),
        )
        .route("/orders/{id}/status", put(update_status))
}

fn report_routes() -> Router<Arc<ServerHost>> {
    Router::new()
        .route("/admin/reports/download", post(download_report))
        .route("/admin/reports/save", post(save_report))
        .route("/admin/reports/email", post(email_report))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": SERVICE_NAME
    }))
}
