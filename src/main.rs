//! Order service binary
//!
//! Reads `AppConfig` (see `order_service::config`), wires the in-memory
//! order store, the HTTP product catalog and the configured mailer, then
//! serves until Ctrl+C or SIGTERM.

use anyhow::Result;
use order_service::prelude::*;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "order_service=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;

    let catalog = HttpProductCatalog::new(&config.catalog.base_url, config.catalog.timeout())?;

    let mailer: Arc<dyn ReportMailer> = match &config.mail {
        Some(mail) => {
            tracing::info!(host = %mail.host, port = mail.port, "Sending report emails over SMTP");
            Arc::new(SmtpReportMailer::new(mail)?)
        }
        None => {
            tracing::warn!("No mail section configured, report emails will only be logged");
            Arc::new(LoggingMailer::new())
        }
    };

    tracing::info!(
        catalog = %config.catalog.base_url,
        reports = %config.reports.directory.display(),
        "Starting order-service"
    );

    ServerBuilder::new()
        .with_order_store(InMemoryOrderStore::new())
        .with_product_catalog(catalog)
        .with_mailer(mailer)
        .with_reports_dir(config.reports.directory.clone())
        .serve(&config.server.bind)
        .await
}
