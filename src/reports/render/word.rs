//! DOCX rendering with docx-rs

use super::{ReportRenderer, rendering_error};
use crate::core::error::ReportError;
use crate::reports::request::ReportFormat;
use crate::reports::table::OrderReport;
use docx_rs::{Docx, Paragraph, Run, Table, TableCell, TableRow};
use std::io::Cursor;

#[derive(Debug, Clone, Copy, Default)]
pub struct WordRenderer;

impl ReportRenderer for WordRenderer {
    fn format(&self) -> ReportFormat {
        ReportFormat::Word
    }

    fn render(&self, report: &OrderReport) -> Result<Vec<u8>, ReportError> {
        // half-points
        let title = Run::new().add_text(report.title).bold().size(32);

        let mut rows = Vec::with_capacity(report.rows.len() + 1);
        rows.push(TableRow::new(
            report
                .columns
                .iter()
                .map(|header| cell(Run::new().add_text(*header).bold()))
                .collect(),
        ));
        for row in &report.rows {
            rows.push(TableRow::new(
                row.iter()
                    .map(|value| cell(Run::new().add_text(value.as_document_text())))
                    .collect(),
            ));
        }

        let docx = Docx::new()
            .add_paragraph(Paragraph::new().add_run(title))
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text(report.period_line())))
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text(report.total_line())))
            .add_table(Table::new(rows));

        let mut buffer = Cursor::new(Vec::new());
        docx.build()
            .pack(&mut buffer)
            .map_err(|e| rendering_error(ReportFormat::Word, e))?;
        Ok(buffer.into_inner())
    }
}

fn cell(run: Run) -> TableCell {
    TableCell::new().add_paragraph(Paragraph::new().add_run(run))
}
