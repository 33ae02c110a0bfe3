//! Admin order reports
//!
//! A [`ReportRequest`] selects a lookback window, optional filters and an
//! output format. The [`ReportBuilder`] reads matching orders from the
//! store, projects them into an [`OrderReport`] and hands that to the
//! renderer of the requested format.

pub mod builder;
pub mod handlers;
pub mod render;
pub mod request;
pub mod table;

pub use builder::{GeneratedReport, ReportBuilder, ReportSummary};
pub use render::{ReportRenderer, renderer_for};
pub use request::{EmailReportRequest, ReportDuration, ReportFormat, ReportRequest};
pub use table::{CellValue, OrderReport};
