//! Tabular report model shared by every renderer

use crate::core::order::Order;
use chrono::{DateTime, Utc};

pub const REPORT_TITLE: &str = "ADMIN ORDERS REPORT";

/// Column headers, in rendering order
pub const COLUMNS: [&str; 6] = [
    "Order ID",
    "Product ID",
    "Customer ID",
    "Quantity",
    "Order Date",
    "Status",
];

/// A single table cell
///
/// Timestamps stay typed so each renderer can pick its own precision.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Integer(i64),
    Text(String),
    Timestamp(DateTime<Utc>),
}

impl CellValue {
    /// Cell text for PDF and Word; timestamps become ISO dates
    pub fn as_document_text(&self) -> String {
        match self {
            CellValue::Integer(n) => n.to_string(),
            CellValue::Text(s) => s.clone(),
            CellValue::Timestamp(ts) => ts.format("%Y-%m-%d").to_string(),
        }
    }

    /// Cell text for spreadsheets; timestamps become ISO date-times
    ///
    /// Fractional seconds are kept when present.
    pub fn as_spreadsheet_text(&self) -> String {
        match self {
            CellValue::Timestamp(ts) => ts.format("%Y-%m-%dT%H:%M:%S%.f").to_string(),
            other => other.as_document_text(),
        }
    }
}

/// Title, period and rows of an orders report
#[derive(Debug, Clone, PartialEq)]
pub struct OrderReport {
    pub title: &'static str,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub columns: &'static [&'static str],
    pub rows: Vec<Vec<CellValue>>,
}

impl OrderReport {
    /// Project already filtered and sorted orders into rows
    pub fn from_orders(start: DateTime<Utc>, end: DateTime<Utc>, orders: &[Order]) -> Self {
        let rows = orders
            .iter()
            .map(|order| {
                vec![
                    CellValue::Integer(i64::from(order.id)),
                    CellValue::Integer(i64::from(order.product_id)),
                    CellValue::Integer(i64::from(order.customer_id)),
                    CellValue::Integer(i64::from(order.quantity)),
                    CellValue::Timestamp(order.order_date),
                    CellValue::Text(order.status.clone()),
                ]
            })
            .collect();

        Self {
            title: REPORT_TITLE,
            start,
            end,
            columns: &COLUMNS,
            rows,
        }
    }

    pub fn period_line(&self) -> String {
        format!(
            "Period: {} to {}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }

    pub fn total_line(&self) -> String {
        format!("Total Orders: {}", self.rows.len())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
