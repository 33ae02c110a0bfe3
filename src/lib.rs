//! # Order Service
//!
//! An order-management REST backend with administrative reports.
//!
//! ## Features
//!
//! - **Orders**: place, list, look up, replace, update status and delete
//! - **Product Lookup**: every placement resolves the product against the catalog service
//! - **Reports**: orders of the last week, month or six months as Excel, PDF or Word
//! - **Delivery**: download, save to the reports directory, or send by email
//! - **Uniform Errors**: stable error codes in a single JSON envelope
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use order_service::prelude::*;
//! use std::time::Duration;
//!
//! let catalog = HttpProductCatalog::new("http://localhost:8081", Duration::from_secs(5))?;
//!
//! ServerBuilder::new()
//!     .with_order_store(InMemoryOrderStore::new())
//!     .with_product_catalog(catalog)
//!     .with_reports_dir("reports")
//!     .serve("127.0.0.1:8080")
//!     .await?;
//! ```

pub mod catalog;
pub mod config;
pub mod core;
pub mod delivery;
pub mod orders;
pub mod reports;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Domain ===
    pub use crate::core::{
        error::{OrderServiceError, OrderServiceResult},
        order::{NewOrder, Order, OrderReplacement, STATUS_NEW},
        store::OrderStore,
        validation::ValidatedJson,
    };

    // === Services ===
    pub use crate::catalog::{HttpProductCatalog, InMemoryProductCatalog, Product, ProductCatalog};
    pub use crate::orders::OrderService;
    pub use crate::reports::{
        EmailReportRequest, ReportBuilder, ReportDuration, ReportFormat, ReportRequest,
    };

    // === Delivery ===
    pub use crate::delivery::{
        LocalReportWriter, LoggingMailer, RecordingMailer, ReportEmail, ReportMailer,
        SmtpReportMailer,
    };

    // === Storage ===
    pub use crate::storage::InMemoryOrderStore;

    // === Server ===
    pub use crate::config::AppConfig;
    pub use crate::server::{ApiResponse, ServerBuilder, ServerHost, build_router};
}
