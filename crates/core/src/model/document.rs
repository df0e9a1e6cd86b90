//! Multi-page box document.

use crate::params::CombineSymbols;

use super::page::BoxPage;
use super::tessbox::TessBox;

/// Box file line layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum BoxFormat {
    /// Tesseract 2.0x: `text x1 y1 x2 y2`, every box implicitly on page 0.
    Legacy,
    /// Tesseract 3.0x and later: `text x1 y1 x2 y2 page`.
    #[default]
    Current,
}

impl BoxFormat {
    /// Detects the format from a line's whitespace-delimited field count.
    /// Exactly five fields means legacy; anything else is treated as current.
    pub fn detect(first_line: &str) -> Self {
        if field_count(first_line) == 5 {
            BoxFormat::Legacy
        } else {
            BoxFormat::Current
        }
    }

    pub const fn is_legacy(self) -> bool {
        matches!(self, BoxFormat::Legacy)
    }
}

/// Counts fields separated by runs of whitespace. Leading whitespace opens
/// an empty first field.
fn field_count(line: &str) -> usize {
    let fields = line.split_ascii_whitespace().count();
    if fields > 0 && line.starts_with(|c: char| c.is_ascii_whitespace()) {
        fields + 1
    } else {
        fields
    }
}

/// Pages of boxes, index-aligned with the page images they annotate.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoxDocument {
    pages: Vec<BoxPage>,
    format: BoxFormat,
}

impl BoxDocument {
    pub fn new(format: BoxFormat) -> Self {
        Self {
            pages: Vec::new(),
            format,
        }
    }

    /// Creates a document with `page_count` empty pages.
    pub fn with_pages(format: BoxFormat, page_count: usize) -> Self {
        Self {
            pages: (0..page_count).map(BoxPage::new).collect(),
            format,
        }
    }

    pub(crate) fn from_pages(format: BoxFormat, pages: Vec<BoxPage>) -> Self {
        Self { pages, format }
    }

    pub const fn format(&self) -> BoxFormat {
        self.format
    }

    pub fn set_format(&mut self, format: BoxFormat) {
        self.format = format;
    }

    pub fn pages(&self) -> &[BoxPage] {
        &self.pages
    }

    pub fn page(&self, index: usize) -> Option<&BoxPage> {
        self.pages.get(index)
    }

    pub fn page_mut(&mut self, index: usize) -> Option<&mut BoxPage> {
        self.pages.get_mut(index)
    }

    pub fn pages_mut(&mut self) -> std::slice::IterMut<'_, BoxPage> {
        self.pages.iter_mut()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Appends an empty page and returns it.
    pub fn push_page(&mut self) -> &mut BoxPage {
        let index = self.pages.len();
        self.pages.push(BoxPage::new(index));
        &mut self.pages[index]
    }

    /// Total number of boxes across all pages.
    pub fn box_count(&self) -> usize {
        self.pages.iter().map(BoxPage::len).sum()
    }

    /// All boxes, page by page.
    pub fn boxes(&self) -> impl Iterator<Item = &TessBox> {
        self.pages.iter().flat_map(BoxPage::iter)
    }

    pub fn is_modified(&self) -> bool {
        self.pages.iter().any(BoxPage::is_modified)
    }

    pub fn mark_saved(&mut self) {
        for page in &mut self.pages {
            page.mark_saved();
        }
    }

    /// Compares persisted content only: format, text, rectangles and page
    /// assignment. Selection is ignored.
    pub fn same_content(&self, other: &BoxDocument) -> bool {
        self.format == other.format
            && self.pages.len() == other.pages.len()
            && self
                .pages
                .iter()
                .zip(&other.pages)
                .all(|(a, b)| a.same_content(b))
    }

    /// Runs `combine` on every page. Returns the number of boxes merged away.
    pub fn combine(&mut self, symbols: &CombineSymbols) -> usize {
        self.pages.iter_mut().map(|page| page.combine(symbols)).sum()
    }

    /// Runs `repair_degenerate` on every page.
    pub fn repair_degenerate(&mut self) -> usize {
        self.pages.iter_mut().map(BoxPage::repair_degenerate).sum()
    }

    /// True when some box lives on a page other than 0, which a legacy
    /// box file cannot express.
    pub fn has_boxes_past_first_page(&self) -> bool {
        self.pages.iter().skip(1).any(|page| !page.is_empty())
    }
}
