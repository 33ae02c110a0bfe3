//! PDF rendering with lopdf
//!
//! Pages are A4 portrait. Rows whose text fits WinAnsi use the standard
//! Helvetica fonts; any other row switches to the embedded Unicode font,
//! which is only added to documents that need it. Each table row is drawn
//! as one text object, which keeps the rows easy to recover with a
//! content-stream parser. The title block only appears on the first page;
//! the column header repeats on every page.

use super::font::UnicodeFont;
use super::{ReportRenderer, rendering_error};
use crate::core::error::ReportError;
use crate::reports::request::ReportFormat;
use crate::reports::table::OrderReport;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, StringFormat, dictionary};
use std::error::Error;

const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;

const MARGIN_LEFT: i64 = 40;
const TITLE_Y: i64 = 800;
const PERIOD_Y: i64 = 775;
const TOTAL_Y: i64 = 757;
const FIRST_PAGE_HEADER_Y: i64 = 725;
const NEXT_PAGE_HEADER_Y: i64 = 800;
const ROW_HEIGHT: i64 = 16;

/// Table rows drawn on each page
pub const ROWS_PER_PAGE: usize = 40;

/// x offset of every column
const COLUMN_X: [i64; 6] = [40, 120, 210, 310, 390, 480];

const REGULAR: &str = "F1";
const BOLD: &str = "F2";
const UNICODE: &str = "F3";

#[derive(Debug, Clone, Copy, Default)]
pub struct PdfRenderer;

impl ReportRenderer for PdfRenderer {
    fn format(&self) -> ReportFormat {
        ReportFormat::Pdf
    }

    fn render(&self, report: &OrderReport) -> Result<Vec<u8>, ReportError> {
        write_document(report).map_err(|e| rendering_error(ReportFormat::Pdf, e))
    }
}

fn write_document(report: &OrderReport) -> Result<Vec<u8>, Box<dyn Error>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let mut unicode = UnicodeFont::load()?;

    let rows: Vec<Vec<String>> = report
        .rows
        .iter()
        .map(|row| row.iter().map(|cell| cell.as_document_text()).collect())
        .collect();
    let headers: Vec<Object> = report
        .columns
        .iter()
        .map(|c| Object::string_literal(encode_text(c)))
        .collect();

    // An empty report still gets a page with its title block
    let mut chunks: Vec<&[Vec<String>]> = rows.chunks(ROWS_PER_PAGE).collect();
    if chunks.is_empty() {
        chunks.push(&[]);
    }

    let mut kids: Vec<Object> = Vec::with_capacity(chunks.len());
    for (page_index, chunk) in chunks.iter().enumerate() {
        let mut operations = Vec::new();

        let header_y = if page_index == 0 {
            operations.extend(text_line(BOLD, 18, MARGIN_LEFT, TITLE_Y, report.title));
            operations.extend(text_line(REGULAR, 11, MARGIN_LEFT, PERIOD_Y, &report.period_line()));
            operations.extend(text_line(REGULAR, 11, MARGIN_LEFT, TOTAL_Y, &report.total_line()));
            FIRST_PAGE_HEADER_Y
        } else {
            NEXT_PAGE_HEADER_Y
        };

        operations.extend(table_row(BOLD, header_y, headers.clone()));
        for (i, row) in chunk.iter().enumerate() {
            let y = header_y - ROW_HEIGHT * (i as i64 + 1);
            let (font, cells) = encode_row(row, &mut unicode);
            operations.extend(table_row(font, y, cells));
        }

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let mut fonts = dictionary! {
        REGULAR => doc.add_object(font("Helvetica")),
        BOLD => doc.add_object(font("Helvetica-Bold")),
    };
    if unicode.is_used() {
        fonts.set(UNICODE, unicode.embed(&mut doc));
    }
    let resources_id = doc.add_object(dictionary! { "Font" => fonts });

    let page_count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count,
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(PAGE_WIDTH),
            Object::Integer(PAGE_HEIGHT),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id: ObjectId = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)?;
    Ok(buffer)
}

fn font(base: &str) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base,
        "Encoding" => "WinAnsiEncoding",
    }
}

fn text_line(font: &str, size: i64, x: i64, y: i64, text: &str) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec![font.into(), Object::Integer(size)]),
        Operation::new("Td", vec![Object::Integer(x), Object::Integer(y)]),
        Operation::new("Tj", vec![Object::string_literal(encode_text(text))]),
        Operation::new("ET", vec![]),
    ]
}

/// Cell strings for a row and the font they are encoded for
fn encode_row(cells: &[String], unicode: &mut UnicodeFont) -> (&'static str, Vec<Object>) {
    if cells.iter().all(|cell| fits_win_ansi(cell)) {
        let encoded = cells
            .iter()
            .map(|cell| Object::string_literal(encode_text(cell)))
            .collect();
        return (REGULAR, encoded);
    }

    let encoded = cells
        .iter()
        .map(|cell| Object::String(unicode.encode(cell), StringFormat::Hexadecimal))
        .collect();
    (UNICODE, encoded)
}

/// One text object per row; `Td` moves relative to the previous cell
fn table_row(font: &str, y: i64, cells: Vec<Object>) -> Vec<Operation> {
    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec![font.into(), Object::Integer(10)]),
    ];

    let mut previous_x = 0;
    for (col, cell) in cells.into_iter().enumerate() {
        let x = COLUMN_X.get(col).copied().unwrap_or(previous_x);
        let dy = if col == 0 { y } else { 0 };
        operations.push(Operation::new(
            "Td",
            vec![Object::Integer(x - previous_x), Object::Integer(dy)],
        ));
        operations.push(Operation::new("Tj", vec![cell]));
        previous_x = x;
    }

    operations.push(Operation::new("ET", vec![]));
    operations
}

/// Printable ASCII and the Latin-1 supplement share their WinAnsi codes
fn fits_win_ansi(text: &str) -> bool {
    text.chars()
        .all(|c| u32::from(c) < 0x80 || (0xA0..=0xFF).contains(&u32::from(c)))
}

/// WinAnsi bytes for text that [`fits_win_ansi`]; anything else becomes `?`
fn encode_text(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}
