//! Report generation pipeline
//!
//! window selection → filtering → sorting → projection → rendering

use super::render::renderer_for;
use super::request::{ReportFormat, ReportRequest};
use super::table::{CellValue, OrderReport};
use crate::core::error::OrderServiceResult;
use crate::core::order::Order;
use crate::core::store::OrderStore;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::Arc;

/// A rendered report together with what was put in it
#[derive(Debug, Clone)]
pub struct GeneratedReport {
    pub format: ReportFormat,
    pub bytes: Vec<u8>,
    pub summary: ReportSummary,
}

/// Figures about a generated report, used by the email body
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSummary {
    pub total_orders: usize,
    pub unique_customers: usize,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Orders carry no price, so this is only set by callers that know it
    pub total_revenue: Option<f64>,
}

/// Builds admin reports from the order store
#[derive(Clone)]
pub struct ReportBuilder {
    store: Arc<dyn OrderStore>,
}

impl ReportBuilder {
    pub fn new(store: Arc<dyn OrderStore>) -> Self {
        Self { store }
    }

    /// Render a report and return only its bytes
    pub async fn generate(&self, request: &ReportRequest) -> OrderServiceResult<Vec<u8>> {
        Ok(self.generate_report(request).await?.bytes)
    }

    /// Render a report for the window ending now
    pub async fn generate_report(
        &self,
        request: &ReportRequest,
    ) -> OrderServiceResult<GeneratedReport> {
        self.generate_report_at(request, Utc::now()).await
    }

    /// Render a report for the window ending at `now`
    ///
    /// The format is checked before the store is touched.
    pub async fn generate_report_at(
        &self,
        request: &ReportRequest,
        now: DateTime<Utc>,
    ) -> OrderServiceResult<GeneratedReport> {
        let format = request.parsed_format()?;
        let report = self.collect(request, now).await?;

        let bytes = renderer_for(format).render(&report)?;

        let unique_customers = report
            .rows
            .iter()
            .filter_map(|row| match row.get(2) {
                Some(CellValue::Integer(customer_id)) => Some(*customer_id),
                _ => None,
            })
            .collect::<HashSet<_>>()
            .len();
        let summary = ReportSummary {
            total_orders: report.len(),
            unique_customers,
            start: report.start,
            end: report.end,
            total_revenue: None,
        };

        tracing::info!(
            format = %format,
            duration = %request.duration,
            rows = summary.total_orders,
            bytes = bytes.len(),
            "Report generated"
        );

        Ok(GeneratedReport {
            format,
            bytes,
            summary,
        })
    }

    /// Select, filter and sort the orders of a report without rendering
    pub async fn collect(
        &self,
        request: &ReportRequest,
        now: DateTime<Utc>,
    ) -> OrderServiceResult<OrderReport> {
        let start = request.lookback().start_from(now);
        let orders = self.store.find_by_order_date_between(start, now).await?;
        let orders = select(orders, request);
        Ok(OrderReport::from_orders(start, now, &orders))
    }
}

/// Apply the optional filters and sort newest first
///
/// The sort is stable, so orders with the same date keep store order.
pub fn select(orders: Vec<Order>, request: &ReportRequest) -> Vec<Order> {
    let mut selected: Vec<Order> = orders
        .into_iter()
        .filter(|order| {
            request
                .status
                .as_deref()
                .is_none_or(|status| order.status == status)
        })
        .filter(|order| {
            request
                .customer_id
                .is_none_or(|customer_id| order.customer_id == customer_id)
        })
        .collect();

    selected.sort_by(|a, b| b.order_date.cmp(&a.order_date));
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::{OrderServiceError, ReportError};
    use crate::core::order::NewOrder;
    use crate::storage::InMemoryOrderStore;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    async fn seeded() -> (Arc<InMemoryOrderStore>, ReportBuilder) {
        let store = Arc::new(InMemoryOrderStore::new());
        for (days_ago, customer, status) in [
            (1, 7, "NEW"),
            (2, 7, "SHIPPED"),
            (3, 9, "NEW"),
            (20, 9, "DELIVERED"),
            (100, 7, "NEW"),
        ] {
            store
                .create(
                    NewOrder::placed(10, customer, 1)
                        .dated(now() - Duration::days(days_ago))
                        .with_status(status),
                )
                .await
                .unwrap();
        }
        let builder = ReportBuilder::new(store.clone());
        (store, builder)
    }

    fn ids(report: &OrderReport) -> Vec<i64> {
        report
            .rows
            .iter()
            .map(|row| match row[0] {
                CellValue::Integer(id) => id,
                ref other => panic!("unexpected id cell {other:?}"),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_week_window_with_status_filter() {
        let (_, builder) = seeded().await;
        let request = ReportRequest::new("1_WEEK", "PDF").with_status("NEW");

        let report = builder.collect(&request, now()).await.unwrap();

        assert_eq!(ids(&report), vec![1, 3]);
    }

    #[tokio::test]
    async fn test_rows_are_newest_first() {
        let (_, builder) = seeded().await;
        let report = builder
            .collect(&ReportRequest::new("6_MONTHS", "EXCEL"), now())
            .await
            .unwrap();

        assert_eq!(ids(&report), vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn test_customer_filter() {
        let (_, builder) = seeded().await;
        let request = ReportRequest::new("1_MONTH", "WORD").with_customer_id(9);

        let report = builder.collect(&request, now()).await.unwrap();

        assert_eq!(ids(&report), vec![3, 4]);
    }

    #[tokio::test]
    async fn test_bogus_duration_matches_one_month() {
        let (_, builder) = seeded().await;
        let bogus = builder
            .collect(&ReportRequest::new("BOGUS", "PDF"), now())
            .await
            .unwrap();
        let month = builder
            .collect(&ReportRequest::new("1_MONTH", "PDF"), now())
            .await
            .unwrap();

        assert_eq!(bogus, month);
    }

    #[tokio::test]
    async fn test_unsupported_format_is_rejected() {
        let (_, builder) = seeded().await;
        let err = builder
            .generate(&ReportRequest::new("1_WEEK", "CSV"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            OrderServiceError::Report(ReportError::UnsupportedFormat { .. })
        ));
    }

    #[tokio::test]
    async fn test_summary_counts_customers() {
        let (_, builder) = seeded().await;
        let generated = builder
            .generate_report_at(&ReportRequest::new("1_MONTH", "EXCEL"), now())
            .await
            .unwrap();

        assert_eq!(generated.summary.total_orders, 4);
        assert_eq!(generated.summary.unique_customers, 2);
        assert_eq!(generated.summary.total_revenue, None);
        assert!(!generated.bytes.is_empty());
    }

    #[test]
    fn test_equal_dates_keep_store_order() {
        let date = now();
        let orders: Vec<Order> = (1..=3)
            .map(|id| NewOrder::placed(1, 1, 1).dated(date).into_order(id))
            .collect();

        let selected = select(orders, &ReportRequest::new("1_WEEK", "PDF"));

        let ids: Vec<i32> = selected.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
