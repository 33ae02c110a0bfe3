//! XLSX rendering with rust_xlsxwriter
//!
//! Layout of the `Orders Report` sheet:
//!
//! | row | content                      |
//! |-----|------------------------------|
//! | 0   | title                        |
//! | 1   | period line                  |
//! | 2   | total line                   |
//! | 3   | empty                        |
//! | 4   | column headers               |
//! | 5.. | one row per order            |

use super::{ReportRenderer, rendering_error};
use crate::core::error::ReportError;
use crate::reports::request::ReportFormat;
use crate::reports::table::{CellValue, OrderReport};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

pub const SHEET_NAME: &str = "Orders Report";
pub const HEADER_ROW: u32 = 4;
pub const FIRST_DATA_ROW: u32 = 5;

#[derive(Debug, Clone, Copy, Default)]
pub struct ExcelRenderer;

impl ExcelRenderer {
    fn write_workbook(report: &OrderReport) -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let bold = Format::new().set_bold();
        let title = Format::new().set_bold().set_font_size(14);

        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME)?;

        sheet.write_string_with_format(0, 0, report.title, &title)?;
        sheet.write_string(1, 0, report.period_line())?;
        sheet.write_string(2, 0, report.total_line())?;

        for (col, header) in report.columns.iter().enumerate() {
            sheet.write_string_with_format(HEADER_ROW, col as u16, *header, &bold)?;
        }

        for (i, row) in report.rows.iter().enumerate() {
            let row_index = FIRST_DATA_ROW + i as u32;
            for (col, cell) in row.iter().enumerate() {
                write_cell(sheet, row_index, col as u16, cell)?;
            }
        }

        sheet.autofit();
        workbook.save_to_buffer()
    }
}

fn write_cell(sheet: &mut Worksheet, row: u32, col: u16, cell: &CellValue) -> Result<(), XlsxError> {
    match cell {
        CellValue::Integer(n) => sheet.write_number(row, col, *n as f64)?,
        CellValue::Text(_) | CellValue::Timestamp(_) => {
            sheet.write_string(row, col, cell.as_spreadsheet_text())?
        }
    };
    Ok(())
}

impl ReportRenderer for ExcelRenderer {
    fn format(&self) -> ReportFormat {
        ReportFormat::Excel
    }

    fn render(&self, report: &OrderReport) -> Result<Vec<u8>, ReportError> {
        Self::write_workbook(report).map_err(|e| rendering_error(ReportFormat::Excel, e))
    }
}
