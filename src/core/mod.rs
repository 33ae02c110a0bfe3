//! Core module containing the domain model, store trait and error types

pub mod error;
pub mod order;
pub mod store;
pub mod validation;

pub use error::{OrderServiceError, OrderServiceResult};
pub use order::{NewOrder, Order, OrderReplacement};
pub use store::{OrderStore, StoreResult};
pub use validation::ValidatedJson;
