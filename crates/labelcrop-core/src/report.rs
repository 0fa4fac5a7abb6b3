use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use tracing::debug;

use crate::error::LabelError;
use crate::export::SKU_HEADER;
use crate::model::SummaryReport;

// A4 portrait, in points.
const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;

const ROWS_PER_PAGE: usize = 36;
const ROW_HEIGHT: f32 = 18.0;
const TABLE_TOP: f32 = 760.0;
const CELL_PADDING: f32 = 6.0;
/// Left edge of each column, then the table's right edge.
const COLUMN_EDGES: [f32; 4] = [51.0, 94.0, 490.0, 544.0];
const MAX_SKU_CHARS: usize = 64;
/// Helvetica digits are all 556/1000 em wide.
const DIGIT_WIDTH: f32 = 0.556;

/// Append the SKU summary table as one or more A4 pages at the end of a PDF.
///
/// The pages carry a "Total Labels: N" title band and the Sr. No / SKU / Qty
/// table, header repeated on every page. Existing pages are left untouched.
pub fn append_summary(pdf_bytes: &[u8], summary: &SummaryReport) -> Result<Vec<u8>, LabelError> {
    let mut doc = Document::load_mem(pdf_bytes).map_err(pdf_err)?;

    let pages_id = doc
        .catalog()
        .and_then(|c| c.get(b"Pages"))
        .and_then(Object::as_reference)
        .map_err(pdf_err)?;

    let regular = doc.add_object(font("Helvetica"));
    let bold = doc.add_object(font("Helvetica-Bold"));

    let contents = page_contents(summary);
    let added = contents.len();
    let mut page_ids: Vec<ObjectId> = Vec::with_capacity(added);
    for content in contents {
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
        page_ids.push(doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(PAGE_WIDTH),
                Object::Real(PAGE_HEIGHT),
            ],
            "Contents" => Object::Reference(content_id),
            "Resources" => dictionary! {
                "Font" => dictionary! {
                    "F1" => Object::Reference(regular),
                    "F2" => Object::Reference(bold),
                },
            },
        }));
    }

    let pages = doc
        .get_object_mut(pages_id)
        .and_then(Object::as_dict_mut)
        .map_err(pdf_err)?;
    let count = pages.get(b"Count").and_then(Object::as_i64).unwrap_or(0);
    pages
        .get_mut(b"Kids")
        .and_then(Object::as_array_mut)
        .map_err(pdf_err)?
        .extend(page_ids.into_iter().map(Object::Reference));
    pages.set("Count", Object::Integer(count + added as i64));
    debug!(pages = added, rows = summary.rows.len(), "appended summary");

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| LabelError::Extraction(format!("failed to write summary PDF: {e}")))?;
    Ok(bytes)
}

fn pdf_err(e: lopdf::Error) -> LabelError {
    LabelError::PdfLoad(e.to_string())
}

fn font(base: &str) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base,
        "Encoding" => "WinAnsiEncoding",
    }
}

/// One content stream per summary page. An empty summary still gets a page.
fn page_contents(summary: &SummaryReport) -> Vec<String> {
    let title = format!("Label Summary | Total Labels: {}", summary.total_pages);
    let rows: Vec<[String; 3]> = summary
        .rows
        .iter()
        .map(|r| [r.serial.to_string(), shorten(&r.sku), r.qty.to_string()])
        .collect();

    if rows.is_empty() {
        return vec![page_content(&title, &[])];
    }
    rows.chunks(ROWS_PER_PAGE)
        .map(|chunk| page_content(&title, chunk))
        .collect()
}

fn page_content(title: &str, rows: &[[String; 3]]) -> String {
    let mut ops = String::new();

    // Title band.
    ops.push_str(&format!(
        "0.09 0.48 0.76 rg 0 {} {} 60 re f\n",
        PAGE_HEIGHT - 60.0,
        PAGE_WIDTH
    ));
    ops.push_str(&text_op("F2", 18.0, 36.0, PAGE_HEIGHT - 38.0, title, "1 1 1"));

    let [left, .., right] = COLUMN_EDGES;
    let width = right - left;

    // Header row.
    let header_y = TABLE_TOP - ROW_HEIGHT;
    ops.push_str(&format!(
        "0.08 0.40 0.75 rg {left} {header_y} {width} {ROW_HEIGHT} re f\n"
    ));
    for (col, label) in SKU_HEADER.iter().enumerate() {
        ops.push_str(&text_op(
            "F2",
            11.0,
            COLUMN_EDGES[col] + CELL_PADDING,
            header_y + 5.0,
            label,
            "1 1 1",
        ));
    }

    // Body rows, shaded alternately.
    for (i, [serial, sku, qty]) in rows.iter().enumerate() {
        let y = header_y - ROW_HEIGHT * (i + 1) as f32;
        let shade = if i % 2 == 0 { "0.96 0.96 0.96" } else { "0.92 0.95 1" };
        ops.push_str(&format!("{shade} rg {left} {y} {width} {ROW_HEIGHT} re f\n"));

        let baseline = y + 5.0;
        let serial_x = centered(serial, COLUMN_EDGES[0], COLUMN_EDGES[1], 10.0);
        let qty_x = COLUMN_EDGES[3] - CELL_PADDING - digits_width(qty, 10.0);
        ops.push_str(&text_op("F1", 10.0, serial_x, baseline, serial, "0 0 0"));
        ops.push_str(&text_op(
            "F1",
            10.0,
            COLUMN_EDGES[1] + CELL_PADDING,
            baseline,
            sku,
            "0 0 0",
        ));
        ops.push_str(&text_op("F1", 10.0, qty_x, baseline, qty, "0 0 0"));
    }

    // Grid.
    let bottom = header_y - ROW_HEIGHT * rows.len() as f32;
    ops.push_str("0 0 0 RG 0.8 w\n");
    for i in 0..=rows.len() + 1 {
        let y = TABLE_TOP - ROW_HEIGHT * i as f32;
        ops.push_str(&format!("{left} {y} m {right} {y} l S\n"));
    }
    for x in COLUMN_EDGES {
        ops.push_str(&format!("{x} {TABLE_TOP} m {x} {bottom} l S\n"));
    }

    ops
}

fn text_op(font: &str, size: f32, x: f32, y: f32, text: &str, rgb: &str) -> String {
    format!(
        "{rgb} rg BT /{font} {size} Tf {x} {y} Td ({}) Tj ET\n",
        escape_pdf_string(text)
    )
}

fn digits_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * DIGIT_WIDTH * size
}

fn centered(text: &str, from: f32, to: f32, size: f32) -> f32 {
    from + ((to - from) - digits_width(text, size)) / 2.0
}

fn shorten(sku: &str) -> String {
    if sku.chars().count() <= MAX_SKU_CHARS {
        return sku.to_string();
    }
    let head: String = sku.chars().take(MAX_SKU_CHARS - 3).collect();
    format!("{head}...")
}

/// Escape a literal string operand: backslash and both parentheses.
fn escape_pdf_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '(' | ')') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
