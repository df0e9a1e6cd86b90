//! A single character box.

use crate::geometry::{Point, Rect};

/// One character (or grapheme cluster) annotation on a page.
///
/// The rectangle is kept in display space. `selected` is transient UI state
/// and is never written to a box file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TessBox {
    text: String,
    rect: Rect,
    page: usize,
    selected: bool,
}

impl TessBox {
    pub fn new(text: impl Into<String>, rect: Rect, page: usize) -> Self {
        Self {
            text: text.into(),
            rect,
            page,
            selected: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    pub const fn rect(&self) -> Rect {
        self.rect
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    pub const fn page(&self) -> usize {
        self.page
    }

    pub(crate) fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    pub const fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub fn contains(&self, point: Point) -> bool {
        self.rect.contains_point(point)
    }

    /// Compares the persisted parts of two boxes: text, rectangle and page.
    pub fn same_annotation(&self, other: &TessBox) -> bool {
        self.text == other.text && self.rect == other.rect && self.page == other.page
    }
}
