//! Box file reader.

use tracing::{debug, trace};

use crate::error::{BoxError, Result};
use crate::geometry::Rect;
use crate::model::{BoxDocument, BoxFormat, BoxPage, TessBox};

use super::lines::{split_fields, split_lines};

/// One well-formed box line, still in file space.
#[derive(Debug, Clone, PartialEq)]
struct BoxRecord<'a> {
    text: &'a str,
    coords: (i32, i32, i32, i32),
    page: usize,
}

impl<'a> BoxRecord<'a> {
    /// Parses a line. Lines with fewer than five or more than six fields are
    /// not box lines and yield `None`. `line_no` is 1-based and only used for
    /// error reporting.
    fn parse(line: &'a str, line_no: usize) -> Result<Option<Self>> {
        let fields = split_fields(line);
        if !(5..=6).contains(&fields.len()) {
            return Ok(None);
        }

        let x1 = parse_int(fields[1], "x1", line_no)?;
        let y1 = parse_int(fields[2], "y1", line_no)?;
        let x2 = parse_int(fields[3], "x2", line_no)?;
        let y2 = parse_int(fields[4], "y2", line_no)?;
        // Negative page numbers fall back to the page being filled.
        let page = match fields.get(5) {
            Some(field) => usize::try_from(parse_int(field, "page", line_no)?).unwrap_or(0),
            None => 0,
        };

        Ok(Some(Self {
            text: fields[0],
            coords: (x1, y1, x2, y2),
            page,
        }))
    }

    /// Flips the record into display space. Coordinates that are valid
    /// integers but overflow once converted are reported as a numeric error.
    fn into_box(self, page: usize, page_height: i32, line_no: usize) -> Result<TessBox> {
        let Some(rect) = Rect::from_file_coords(self.coords, page_height) else {
            let (x1, y1, x2, y2) = self.coords;
            return Err(BoxError::Numeric {
                line: line_no,
                field: "coordinates",
                value: format!("{x1} {y1} {x2} {y2}"),
            });
        };
        Ok(TessBox::new(self.text, rect, page))
    }
}

fn parse_int(field: &str, name: &'static str, line_no: usize) -> Result<i32> {
    field.parse().map_err(|_| BoxError::Numeric {
        line: line_no,
        field: name,
        value: field.to_string(),
    })
}

/// Parses box file text into a document.
///
/// `page_heights` holds the pixel height of every page image, in page
/// order; it decides how many pages the document has and is needed to flip
/// coordinates into display space.
///
/// Lines that do not have five or six fields are skipped. Boxes are read in
/// file order; a line whose page number is past the page being filled ends
/// that page and is read again for the next one. Boxes whose page number is
/// lower than the page being filled stay on that page.
///
/// # Errors
/// - `BoxError::Numeric` if a box line has a non-integer coordinate or page,
///   or coordinates whose display-space form overflows an `i32`.
/// - `BoxError::MissingPageHeight` if a box belongs to a page with no height.
pub fn parse(text: &str, page_heights: &[i32]) -> Result<BoxDocument> {
    let lines = split_lines(text);
    // Only the first line decides, even when it is blank.
    let format = lines
        .first()
        .map_or(BoxFormat::Current, |line| BoxFormat::detect(line));

    let mut pages = Vec::with_capacity(page_heights.len());
    let mut cursor = 0;

    for (page_index, &page_height) in page_heights.iter().enumerate() {
        let mut boxes = Vec::new();
        while let Some(line) = lines.get(cursor) {
            let Some(record) = BoxRecord::parse(line, cursor + 1)? else {
                trace!(line = cursor + 1, "skipping non-box line");
                cursor += 1;
                continue;
            };
            if record.page > page_index {
                break;
            }
            boxes.push(record.into_box(page_index, page_height, cursor + 1)?);
            cursor += 1;
        }
        pages.push(BoxPage::from_boxes(page_index, boxes));
    }

    // Anything still unread belongs to a page without a height.
    for (offset, line) in lines[cursor..].iter().enumerate() {
        let line_no = cursor + offset + 1;
        if let Some(record) = BoxRecord::parse(line, line_no)? {
            return Err(BoxError::MissingPageHeight {
                page: record.page,
                line: line_no,
                available: page_heights.len(),
            });
        }
    }

    let doc = BoxDocument::from_pages(format, pages);
    debug!(
        pages = doc.page_count(),
        boxes = doc.box_count(),
        ?format,
        "parsed box file"
    );
    Ok(doc)
}
