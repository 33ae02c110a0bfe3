//! Report renderers
//!
//! Every output format implements [`ReportRenderer`] over the same
//! [`OrderReport`]. [`renderer_for`] picks the implementation for a parsed
//! [`ReportFormat`].

pub mod excel;
mod font;
pub mod pdf;
pub mod word;

pub use excel::ExcelRenderer;
pub use pdf::PdfRenderer;
pub use word::WordRenderer;

use super::request::ReportFormat;
use super::table::OrderReport;
use crate::core::error::ReportError;

/// Turns a tabular report into the bytes of one file format
pub trait ReportRenderer: Send + Sync {
    fn format(&self) -> ReportFormat;

    fn render(&self, report: &OrderReport) -> Result<Vec<u8>, ReportError>;
}

/// Renderer for a format
pub fn renderer_for(format: ReportFormat) -> &'static dyn ReportRenderer {
    match format {
        ReportFormat::Excel => &ExcelRenderer,
        ReportFormat::Pdf => &PdfRenderer,
        ReportFormat::Word => &WordRenderer,
    }
}

pub(crate) fn rendering_error(format: ReportFormat, err: impl std::fmt::Display) -> ReportError {
    ReportError::Rendering {
        format: format.as_str(),
        message: err.to_string(),
    }
}
