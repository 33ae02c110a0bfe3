//! Fluent wiring of the order service into an axum router

use super::host::ServerHost;
use super::router::build_router;
use crate::catalog::ProductCatalog;
use crate::core::store::OrderStore;
use crate::delivery::{LoggingMailer, ReportMailer};
use anyhow::Result;
use axum::Router;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

const DEFAULT_REPORTS_DIR: &str = "reports";

/// Builder wiring the store, catalog, mailer and reports directory
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_order_store(InMemoryOrderStore::new())
///     .with_product_catalog(HttpProductCatalog::new(url, timeout)?)
///     .with_reports_dir("reports")
///     .build()?;
/// ```
pub struct ServerBuilder {
    store: Option<Arc<dyn OrderStore>>,
    catalog: Option<Arc<dyn ProductCatalog>>,
    mailer: Option<Arc<dyn ReportMailer>>,
    reports_dir: PathBuf,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            store: None,
            catalog: None,
            mailer: None,
            reports_dir: PathBuf::from(DEFAULT_REPORTS_DIR),
        }
    }

    /// Set the order store (required)
    pub fn with_order_store(mut self, store: impl OrderStore + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Share an existing order store (required unless `with_order_store` is used)
    pub fn with_shared_order_store(mut self, store: Arc<dyn OrderStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the product catalog (required)
    pub fn with_product_catalog(mut self, catalog: impl ProductCatalog + 'static) -> Self {
        self.catalog = Some(Arc::new(catalog));
        self
    }

    /// Set the mailer; defaults to a [`LoggingMailer`]
    pub fn with_mailer(mut self, mailer: Arc<dyn ReportMailer>) -> Self {
        self.mailer = Some(mailer);
        self
    }

    /// Directory for saved reports; defaults to `reports`
    pub fn with_reports_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.reports_dir = dir.into();
        self
    }

    /// Build the shared application state
    pub fn build_host(self) -> Result<ServerHost> {
        let store = self
            .store
            .ok_or_else(|| anyhow::anyhow!("OrderStore is required. Call .with_order_store()"))?;
        let catalog = self.catalog.ok_or_else(|| {
            anyhow::anyhow!("ProductCatalog is required. Call .with_product_catalog()")
        })?;
        let mailer = self
            .mailer
            .unwrap_or_else(|| Arc::new(LoggingMailer::new()));

        Ok(ServerHost::new(store, catalog, mailer, self.reports_dir))
    }

    /// Build the final REST router
    pub fn build(self) -> Result<Router> {
        let host = Arc::new(self.build_host()?);
        Ok(build_router(host))
    }

    /// Bind `addr` and serve orders and reports until SIGTERM or Ctrl+C
    ///
    /// In-flight requests finish before this returns.
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!(addr = %addr, "Order service listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Order service stopped");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves on the first of Ctrl+C or SIGTERM
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!(signal = "SIGINT", "Draining connections");
        },
        _ = terminate => {
            tracing::info!(signal = "SIGTERM", "Draining connections");
        },
    }
}
