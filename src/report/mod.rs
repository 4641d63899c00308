//! Report assembler
//!
//! Turns a `ComparisonResult` into a downloadable summary PDF. The report is
//! a plain text layout built with lopdf: totals and confidence up top, then
//! one line per changed page. Built eagerly at compare time and cached with
//! the result.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream};
use thiserror::Error;

use crate::compare::ComparisonResult;

/// US Letter in points
const PAGE_WIDTH: i64 = 612;
const PAGE_HEIGHT: i64 = 792;
const MARGIN: f32 = 56.0;
const LEADING: f32 = 16.0;
const BODY_SIZE: i64 = 11;
const TITLE_SIZE: i64 = 18;

/// Report generation errors
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to encode report content: {0}")]
    EncodeError(String),

    #[error("failed to serialize report: {0}")]
    SaveError(String),
}

/// Build the summary PDF for a finished comparison.
pub fn build_report(result: &ComparisonResult) -> Result<Vec<u8>, ReportError> {
    let lines = report_lines(result);

    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources = dictionary! {
        "Font" => dictionary! { "F1" => Object::Reference(font_id) },
    };

    // Lines that fit on one report page at the body leading, below the title
    let lines_per_page = ((PAGE_HEIGHT as f32 - 2.0 * MARGIN - 2.0 * LEADING) / LEADING) as usize;

    let mut page_ids = Vec::new();
    for (chunk_index, chunk) in lines.chunks(lines_per_page.max(1)).enumerate() {
        let mut operations = Vec::new();

        let mut y = PAGE_HEIGHT as f32 - MARGIN;
        if chunk_index == 0 {
            operations.extend(text_line(TITLE_SIZE, MARGIN, y, "PDF Comparison Report"));
            y -= 2.0 * LEADING;
        }

        for line in chunk {
            operations.extend(text_line(BODY_SIZE, MARGIN, y, line));
            y -= LEADING;
        }

        let content = Content { operations };
        let encoded = content
            .encode()
            .map_err(|e| ReportError::EncodeError(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(Dictionary::new(), encoded));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(PAGE_WIDTH),
                Object::Integer(PAGE_HEIGHT),
            ],
            "Resources" => resources.clone(),
            "Contents" => Object::Reference(content_id),
        });
        page_ids.push(page_id);
    }

    let pages = dictionary! {
        "Type" => "Pages",
        "Count" => Object::Integer(page_ids.len() as i64),
        "Kids" => page_ids
            .iter()
            .map(|id| Object::Reference(*id))
            .collect::<Vec<_>>(),
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| ReportError::SaveError(e.to_string()))?;

    Ok(buffer)
}

/// The report body as plain lines, one per row.
fn report_lines(result: &ComparisonResult) -> Vec<String> {
    let mut lines = vec![
        format!("Total pages compared: {}", result.total_pages),
        format!("Changed pages: {}", result.changed_pages.len()),
        format!("Confidence: {:.1}%", result.confidence),
        String::new(),
    ];

    if result.is_match() {
        lines.push("All pages match.".to_string());
        return lines;
    }

    for &page_number in &result.changed_pages {
        let line = match result.text_differences.get(&page_number) {
            Some(diffs) => format!(
                "Page {}: {} text change(s)",
                page_number,
                diffs.len()
            ),
            None => format!("Page {}: visual change only", page_number),
        };
        lines.push(line);
    }

    lines
}

/// Operations for one line of text at the given baseline.
fn text_line(size: i64, x: f32, y: f32, text: &str) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new(
            "Tf",
            vec![Object::Name(b"F1".to_vec()), Object::Integer(size)],
        ),
        Operation::new("Td", vec![Object::Real(x), Object::Real(y)]),
        Operation::new(
            "Tj",
            vec![Object::String(
                text.as_bytes().to_vec(),
                lopdf::StringFormat::Literal,
            )],
        ),
        Operation::new("ET", vec![]),
    ]
}
