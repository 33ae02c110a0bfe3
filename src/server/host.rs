//! Shared application state
//!
//! `ServerHost` holds every service the HTTP handlers need. It is built
//! once by [`ServerBuilder`](super::ServerBuilder) and shared behind an
//! `Arc` as axum state.

use crate::catalog::ProductCatalog;
use crate::core::store::OrderStore;
use crate::delivery::{LocalReportWriter, ReportMailer};
use crate::orders::OrderService;
use crate::reports::ReportBuilder;
use std::path::PathBuf;
use std::sync::Arc;

/// Host context containing all application services
///
/// # Example
///
/// ```rust,ignore
/// let host = ServerHost::new(store, catalog, mailer, "reports");
/// let app = build_router(Arc::new(host));
/// ```
pub struct ServerHost {
    /// Order CRUD and placement
    pub orders: OrderService,

    /// Report generation over the same store
    pub reports: ReportBuilder,

    /// Target of `/admin/reports/save`
    pub report_writer: LocalReportWriter,

    /// Transport of `/admin/reports/email`
    pub mailer: Arc<dyn ReportMailer>,
}

impl ServerHost {
    pub fn new(
        store: Arc<dyn OrderStore>,
        catalog: Arc<dyn ProductCatalog>,
        mailer: Arc<dyn ReportMailer>,
        reports_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            orders: OrderService::new(store.clone(), catalog),
            reports: ReportBuilder::new(store),
            report_writer: LocalReportWriter::new(reports_dir),
            mailer,
        }
    }
}
