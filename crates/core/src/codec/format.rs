//! Box file writer.

use std::fmt::Write;

use tracing::{debug, warn};

use crate::error::{BoxError, Result};
use crate::model::{BoxDocument, BoxFormat};
use crate::params::CodecOptions;

/// Formats a document back into box file text, in the document's own
/// format and with the platform line terminator.
///
/// # Errors
/// - `BoxError::PageCountMismatch` if fewer heights than pages are supplied.
/// - `BoxError::CoordinateOverflow` if a box cannot be flipped back into
///   file space without overflowing.
pub fn format(doc: &BoxDocument, page_heights: &[i32]) -> Result<String> {
    format_with(doc, page_heights, doc.format(), &CodecOptions::default())
}

/// Formats a document in an explicit format.
///
/// Every line is written as `text x1 y1 x2 y2 page`. In the legacy format
/// the page field is left off wherever it is `0`. Legacy files have no way
/// to place boxes on later pages, so those lines keep their page field; a
/// warning is logged when that happens.
pub fn format_with(
    doc: &BoxDocument,
    page_heights: &[i32],
    target: BoxFormat,
    options: &CodecOptions,
) -> Result<String> {
    if page_heights.len() < doc.page_count() {
        return Err(BoxError::PageCountMismatch {
            pages: doc.page_count(),
            heights: page_heights.len(),
        });
    }
    if target.is_legacy() && doc.has_boxes_past_first_page() {
        warn!("legacy box format cannot express boxes past page 0; keeping their page field");
    }

    let eol = options.line_ending.as_str();
    let mut out = String::with_capacity(doc.box_count() * 24);

    for (page, &page_height) in doc.pages().iter().zip(page_heights) {
        let index = page.index();
        for (position, tessbox) in page.iter().enumerate() {
            let Some((x1, y1, x2, y2)) = tessbox.rect().to_file_coords(page_height) else {
                return Err(BoxError::CoordinateOverflow {
                    page: index,
                    index: position,
                });
            };
            // Writing into a String cannot fail.
            let _ = write!(out, "{} {x1} {y1} {x2} {y2}", tessbox.text());
            if !(target.is_legacy() && index == 0) {
                let _ = write!(out, " {index}");
            }
            out.push_str(eol);
        }
    }

    debug!(
        pages = doc.page_count(),
        boxes = doc.box_count(),
        format = ?target,
        bytes = out.len(),
        "formatted box file"
    );
    Ok(out)
}
