//! Orders: service, request bodies and HTTP handlers

pub mod dto;
pub mod handlers;
pub mod service;

pub use dto::{CreateOrderRequest, HistoryQuery, ReplaceOrderRequest};
pub use service::OrderService;
