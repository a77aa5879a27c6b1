//! Customer list export as a PDF table.
//!
//! Built from the customers already loaded in the page; nothing is fetched.
//! A4 portrait, title at the top left, then a table with a grey header row
//! (repeated on every page) and striped body rows.

use std::ops::Range;

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Rect, Rgb,
};
use thiserror::Error;

use crate::models::Customer;

/// Document title, also drawn as the page heading.
pub const EXPORT_TITLE: &str = "Customers List";

/// Download file name.
pub const EXPORT_FILE_NAME: &str = "customers-list.pdf";

/// Download media type.
pub const EXPORT_CONTENT_TYPE: &str = "application/pdf";

/// Column headings, in order.
pub const EXPORT_COLUMNS: [&str; 4] = ["Name", "Email", "Role", "Created At"];

// Layout in whole millimetres.
const PAGE_WIDTH: u16 = 210;
const PAGE_HEIGHT: u16 = 297;
const MARGIN: u16 = 14;
const TITLE_TOP: u16 = 15;
const TABLE_TOP: u16 = 20;
const ROW_HEIGHT: u16 = 8;
const CELL_PADDING: u16 = 2;
const COLUMN_WIDTHS: [u16; 4] = [50, 70, 27, 35];

const TITLE_SIZE: f32 = 16.0;
const FONT_SIZE: f32 = 10.0;
/// Baseline offset from the bottom of a row.
const BASELINE: f32 = 2.8;

const HEADER_FILL: (f32, f32, f32) = (0.502, 0.502, 0.502);
const STRIPE_FILL: (f32, f32, f32) = (0.961, 0.961, 0.961);
const WHITE: (f32, f32, f32) = (1.0, 1.0, 1.0);
const BLACK: (f32, f32, f32) = (0.0, 0.0, 0.0);

/// Export failure.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to build PDF: {0}")]
    Pdf(#[from] printpdf::Error),
}

/// One exported customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: String,
}

impl From<&Customer> for ExportRow {
    fn from(customer: &Customer) -> Self {
        Self {
            name: customer.full_name(),
            email: customer.email().to_owned(),
            role: customer.role().to_string(),
            created_at: customer.joined_on(),
        }
    }
}

impl ExportRow {
    /// Cells in [`EXPORT_COLUMNS`] order.
    #[must_use]
    pub fn cells(&self) -> [&str; 4] {
        [&self.name, &self.email, &self.role, &self.created_at]
    }
}

/// A snapshot of the customer table, ready to be written out.
#[derive(Debug, Clone)]
pub struct CustomerExport {
    rows: Vec<ExportRow>,
}

impl CustomerExport {
    #[must_use]
    pub fn new(customers: &[Customer]) -> Self {
        Self {
            rows: customers.iter().map(ExportRow::from).collect(),
        }
    }

    #[must_use]
    pub fn rows(&self) -> &[ExportRow] {
        &self.rows
    }

    /// Number of pages the document will have.
    #[must_use]
    pub fn page_count(&self) -> usize {
        paginate(self.rows.len()).len()
    }

    /// Build the PDF document.
    ///
    /// # Errors
    ///
    /// Returns error if the PDF cannot be assembled.
    pub fn to_pdf(&self) -> Result<Vec<u8>, ExportError> {
        let (doc, first_page, first_layer) =
            PdfDocument::new(EXPORT_TITLE, mm(PAGE_WIDTH), mm(PAGE_HEIGHT), "Table");
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

        for (index, range) in paginate(self.rows.len()).into_iter().enumerate() {
            let layer = if index == 0 {
                let layer = doc.get_page(first_page).get_layer(first_layer);
                fill(&layer, BLACK);
                layer.use_text(
                    EXPORT_TITLE,
                    TITLE_SIZE,
                    mm(MARGIN),
                    from_top(TITLE_TOP),
                    &regular,
                );
                layer
            } else {
                let (page, layer) = doc.add_page(mm(PAGE_WIDTH), mm(PAGE_HEIGHT), "Table");
                doc.get_page(page).get_layer(layer)
            };

            let mut top = if index == 0 { TABLE_TOP } else { MARGIN };
            draw_row(&layer, top, &EXPORT_COLUMNS, &bold, HEADER_FILL, WHITE);
            top += ROW_HEIGHT;

            if self.rows.is_empty() {
                fill(&layer, BLACK);
                draw_text(&layer, MARGIN + CELL_PADDING, top, "No customers", &regular);
            }

            let page_rows = self.rows.get(range.clone()).unwrap_or_default();
            for (offset, row) in page_rows.iter().enumerate() {
                let background = if (range.start + offset) % 2 == 1 {
                    STRIPE_FILL
                } else {
                    WHITE
                };
                draw_row(&layer, top, &row.cells(), &regular, background, BLACK);
                top += ROW_HEIGHT;
            }
        }

        Ok(doc.save_to_bytes()?)
    }
}

fn mm(value: u16) -> Mm {
    Mm(f32::from(value))
}

/// Vertical position `distance` below the top edge.
fn from_top(distance: u16) -> Mm {
    mm(PAGE_HEIGHT - distance)
}

fn fill(layer: &PdfLayerReference, (r, g, b): (f32, f32, f32)) {
    layer.set_fill_color(Color::Rgb(Rgb::new(r, g, b, None)));
}

fn draw_row(
    layer: &PdfLayerReference,
    top: u16,
    cells: &[&str; 4],
    font: &IndirectFontRef,
    background: (f32, f32, f32),
    text: (f32, f32, f32),
) {
    fill(layer, background);
    layer.add_rect(Rect::new(
        mm(MARGIN),
        from_top(top + ROW_HEIGHT),
        mm(PAGE_WIDTH - MARGIN),
        from_top(top),
    ));

    fill(layer, text);
    let mut left = MARGIN;
    for (cell, width) in cells.iter().zip(COLUMN_WIDTHS) {
        draw_text(layer, left + CELL_PADDING, top, &fit(cell, width), font);
        left += width;
    }
}

fn draw_text(layer: &PdfLayerReference, left: u16, top: u16, text: &str, font: &IndirectFontRef) {
    let baseline = Mm(f32::from(PAGE_HEIGHT - top - ROW_HEIGHT) + BASELINE);
    layer.use_text(text, FONT_SIZE, mm(left), baseline, font);
}

/// Body rows that fit under the header on a page.
fn rows_per_page(first: bool) -> usize {
    let top = if first { TABLE_TOP } else { MARGIN };
    usize::from((PAGE_HEIGHT - top - MARGIN) / ROW_HEIGHT - 1)
}

/// Split `rows` body rows into per-page ranges. Always at least one page.
fn paginate(rows: usize) -> Vec<Range<usize>> {
    let mut pages = Vec::new();
    let mut start = 0;
    let mut capacity = rows_per_page(true);
    loop {
        let end = (start + capacity).min(rows);
        pages.push(start..end);
        if end >= rows {
            return pages;
        }
        start = end;
        capacity = rows_per_page(false);
    }
}

/// Truncate `text` to what fits a column of `width` mm at the body font size.
fn fit(text: &str, width: u16) -> String {
    // Helvetica averages roughly 1.9mm per character at 10pt
    let max = usize::from((width - 2 * CELL_PADDING) * 10 / 19);
    if text.chars().count() <= max {
        return text.to_owned();
    }
    let mut fitted: String = text.chars().take(max.saturating_sub(3)).collect();
    fitted.push_str("...");
    fitted
}
