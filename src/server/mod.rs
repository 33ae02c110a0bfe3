//! HTTP server: shared state, routes and the fluent builder
//!
//! `ServerBuilder` wires the order store, product catalog, mailer and
//! reports directory into a [`ServerHost`] and exposes it through the
//! axum router built in [`router`].

pub mod builder;
pub mod host;
pub mod response;
pub mod router;

pub use builder::ServerBuilder;
pub use host::ServerHost;
pub use response::ApiResponse;
pub use router::build_router;
