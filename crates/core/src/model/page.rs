//! Boxes of a single page.
//!
//! `BoxPage` owns the ordered boxes of one page image. The order is both
//! reading order and file emission order. Lookups return positions into the
//! page so that callers can follow up with a mutation without holding a
//! borrow.
//!
//! Selection is a flag on each box rather than a separate set, so
//! `selected_boxes` always reports page order, never click order.

use std::ops::Index;

use crate::geometry::{FileCoords, Point, Rect};
use crate::params::CombineSymbols;

use super::tessbox::TessBox;

/// Horizontal gap left between a box and a copy placed after it.
const INSERT_GAP: i32 = 5;

/// Slack allowed when extending a selection to boxes between two anchors.
const SPAN_HEIGHT_SLACK: i32 = 4;

/// Ordered boxes belonging to one page.
#[derive(Debug, Clone)]
pub struct BoxPage {
    index: usize,
    boxes: Vec<TessBox>,
    modified: bool,
}

impl PartialEq for BoxPage {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.boxes == other.boxes
    }
}

impl Index<usize> for BoxPage {
    type Output = TessBox;

    fn index(&self, index: usize) -> &TessBox {
        &self.boxes[index]
    }
}

impl BoxPage {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            boxes: Vec::new(),
            modified: false,
        }
    }

    /// Creates a page from boxes, re-tagging each one with this page index.
    pub fn from_boxes(index: usize, boxes: impl IntoIterator<Item = TessBox>) -> Self {
        let boxes = boxes
            .into_iter()
            .map(|mut tessbox| {
                tessbox.set_page(index);
                tessbox
            })
            .collect();
        Self {
            index,
            boxes,
            modified: false,
        }
    }

    pub const fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn boxes(&self) -> &[TessBox] {
        &self.boxes
    }

    pub fn get(&self, index: usize) -> Option<&TessBox> {
        self.boxes.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TessBox> {
        self.boxes.iter()
    }

    /// True once any box was added, removed or edited since the last
    /// `mark_saved`. Selection changes do not count.
    pub const fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn mark_saved(&mut self) {
        self.modified = false;
    }

    /// Compares text, rectangles and page assignment, ignoring selection.
    pub fn same_content(&self, other: &BoxPage) -> bool {
        self.index == other.index
            && self.boxes.len() == other.boxes.len()
            && self
                .boxes
                .iter()
                .zip(&other.boxes)
                .all(|(a, b)| a.same_annotation(b))
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    pub fn push(&mut self, mut tessbox: TessBox) {
        tessbox.set_page(self.index);
        self.boxes.push(tessbox);
        self.modified = true;
    }

    /// Inserts a box at `index`, shifting later boxes back. Returns false,
    /// leaving the page untouched, if `index` is past the end.
    pub fn insert_at(&mut self, index: usize, mut tessbox: TessBox) -> bool {
        if index > self.boxes.len() {
            return false;
        }
        tessbox.set_page(self.index);
        self.boxes.insert(index, tessbox);
        self.modified = true;
        true
    }

    pub fn remove(&mut self, index: usize) -> Option<TessBox> {
        if index >= self.boxes.len() {
            return None;
        }
        self.modified = true;
        Some(self.boxes.remove(index))
    }

    pub fn set_text(&mut self, index: usize, text: impl Into<String>) -> bool {
        match self.boxes.get_mut(index) {
            Some(tessbox) => {
                tessbox.set_text(text);
                self.modified = true;
                true
            }
            None => false,
        }
    }

    pub fn set_rect(&mut self, index: usize, rect: Rect) -> bool {
        match self.boxes.get_mut(index) {
            Some(tessbox) => {
                if tessbox.rect() != rect {
                    tessbox.set_rect(rect);
                    self.modified = true;
                }
                true
            }
            None => false,
        }
    }

    /// Duplicates the box at `index` right after itself, moved one box width
    /// (plus a small gap) to the right. The copy becomes the only selected
    /// box. Returns its position.
    pub fn insert_after(&mut self, index: usize) -> Option<usize> {
        let source = self.boxes.get(index)?;
        let rect = source.rect();
        let copy = TessBox::new(
            source.text(),
            Rect::new(
                rect.max_x().saturating_add(INSERT_GAP),
                rect.y,
                rect.width,
                rect.height,
            ),
            self.index,
        );
        self.deselect_all();
        self.insert_at(index + 1, copy);
        self.boxes[index + 1].set_selected(true);
        Some(index + 1)
    }

    /// Removes every selected box and returns them in page order.
    pub fn delete_selected(&mut self) -> Vec<TessBox> {
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.boxes)
            .into_iter()
            .partition(TessBox::is_selected);
        self.boxes = kept;
        if !removed.is_empty() {
            self.modified = true;
        }
        removed
    }

    /// Moves every selected box by (dx, dy). Returns how many moved.
    pub fn shift_selected(&mut self, dx: i32, dy: i32) -> usize {
        let mut moved = 0;
        for tessbox in self.boxes.iter_mut().filter(|b| b.is_selected()) {
            tessbox.set_rect(tessbox.rect().translate(dx, dy));
            moved += 1;
        }
        if moved > 0 && (dx != 0 || dy != 0) {
            self.modified = true;
        }
        moved
    }

    /// Grows or shrinks the single selected box, clamping width and height
    /// at zero. Does nothing unless exactly one box is selected.
    pub fn resize_selected(&mut self, dw: i32, dh: i32) -> bool {
        let selected = self.selected_indices();
        let [index] = selected.as_slice() else {
            return false;
        };
        let rect = self.boxes[*index].rect();
        let resized = Rect::new(
            rect.x,
            rect.y,
            rect.width.saturating_add(dw).max(0),
            rect.height.saturating_add(dh).max(0),
        );
        self.set_rect(*index, resized)
    }

    /// Gives every zero-width or zero-height box (other than the first) the
    /// size of the box before it, placed just to its right. Runs in page
    /// order, so consecutive degenerate boxes line up one after another.
    pub fn repair_degenerate(&mut self) -> usize {
        let mut repaired = 0;
        for i in 1..self.boxes.len() {
            if !self.boxes[i].rect().is_degenerate() {
                continue;
            }
            let prev = self.boxes[i - 1].rect();
            self.boxes[i].set_rect(Rect::new(
                prev.max_x().saturating_add(INSERT_GAP),
                prev.y,
                prev.width,
                prev.height,
            ));
            repaired += 1;
        }
        if repaired > 0 {
            self.modified = true;
        }
        repaired
    }

    /// Overwrites box texts in page order with the characters of `text`,
    /// ignoring spaces and line breaks. Extra characters are dropped and
    /// boxes past the end of the text are left alone.
    pub fn apply_text(&mut self, text: &str) -> usize {
        let chars = text.chars().filter(|c| !matches!(c, ' ' | '\n' | '\r'));
        let mut updated = 0;
        for (tessbox, ch) in self.boxes.iter_mut().zip(chars) {
            tessbox.set_text(ch.to_string());
            updated += 1;
        }
        if updated > 0 {
            self.modified = true;
        }
        updated
    }

    /// Merges boxes into the preceding surviving box in a single forward
    /// pass.
    ///
    /// A box is merged when it sits exactly on, or inside, the previous box,
    /// or when it is an appending symbol, or when the previous box is a
    /// prepending symbol. Texts are concatenated; symbol merges also widen
    /// the surviving rectangle to cover both. Returns the number of boxes
    /// removed.
    pub fn combine(&mut self, symbols: &CombineSymbols) -> usize {
        let before = self.boxes.len();
        let mut survivors: Vec<TessBox> = Vec::with_capacity(before);

        for tessbox in std::mem::take(&mut self.boxes) {
            if let Some(prev) = survivors.last_mut() {
                let rect = tessbox.rect();
                if rect == prev.rect() || prev.rect().contains_rect(&rect) {
                    prev.push_text(tessbox.text());
                    continue;
                }
                if symbols.is_appending(tessbox.text()) || symbols.is_prepending(prev.text()) {
                    prev.push_text(tessbox.text());
                    let widened = prev.rect().union(&rect);
                    prev.set_rect(widened);
                    continue;
                }
            }
            survivors.push(tessbox);
        }

        self.boxes = survivors;
        let merged = before - self.boxes.len();
        if merged > 0 {
            self.modified = true;
        }
        merged
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    pub fn select(&mut self, index: usize, selected: bool) -> bool {
        match self.boxes.get_mut(index) {
            Some(tessbox) => {
                tessbox.set_selected(selected);
                true
            }
            None => false,
        }
    }

    pub fn deselect_all(&mut self) {
        for tessbox in &mut self.boxes {
            tessbox.set_selected(false);
        }
    }

    /// Selected boxes in page order.
    pub fn selected_boxes(&self) -> Vec<&TessBox> {
        self.boxes.iter().filter(|b| b.is_selected()).collect()
    }

    pub fn selected_indices(&self) -> Vec<usize> {
        self.boxes
            .iter()
            .enumerate()
            .filter(|(_, b)| b.is_selected())
            .map(|(i, _)| i)
            .collect()
    }

    /// Mouse-press selection. Without `additive` the current selection is
    /// cleared first; a hit box then has its selection toggled. Returns the
    /// position of the hit box.
    pub fn click(&mut self, point: Point, additive: bool) -> Option<usize> {
        let hit = self.hit_test(point);
        if !additive {
            self.deselect_all();
        }
        if let Some(index) = hit {
            let tessbox = &mut self.boxes[index];
            tessbox.set_selected(!tessbox.is_selected());
        }
        hit
    }

    /// With exactly two boxes selected, also selects the boxes between them
    /// that are about as tall as the first one. Returns how many boxes were
    /// added to the selection.
    pub fn select_between(&mut self) -> usize {
        let selected = self.selected_indices();
        let [first, last] = selected.as_slice() else {
            return 0;
        };
        let (first, last) = (*first, *last);
        let min_height = self.boxes[first]
            .rect()
            .height
            .saturating_sub(SPAN_HEIGHT_SLACK);
        let mut added = 0;
        for tessbox in &mut self.boxes[first + 1..last] {
            if tessbox.rect().height >= min_height {
                tessbox.set_selected(true);
                added += 1;
            }
        }
        added
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// First box, in page order, whose rectangle contains `point`.
    pub fn hit_test(&self, point: Point) -> Option<usize> {
        self.boxes.iter().position(|b| b.contains(point))
    }

    /// First box with exactly this rectangle.
    pub fn find_by_rect(&self, rect: &Rect) -> Option<usize> {
        self.boxes.iter().position(|b| b.rect() == *rect)
    }

    /// Coordinate lookup with the rectangle given in file space.
    pub fn find_by_file_rect(&self, coords: FileCoords, page_height: i32) -> Option<usize> {
        Rect::from_file_coords(coords, page_height).and_then(|rect| self.find_by_rect(&rect))
    }

    /// First box after `from_exclusive` (or from the start) whose text
    /// contains `text`.
    pub fn find_by_text(&self, from_exclusive: Option<usize>, text: &str) -> Option<usize> {
        let start = from_exclusive.map_or(0, |i| i + 1);
        self.boxes
            .get(start..)?
            .iter()
            .position(|b| b.text().contains(text))
            .map(|offset| start + offset)
    }

    /// "Find next": searches after the last selected box, or from the start
    /// when nothing is selected.
    pub fn find_next(&self, text: &str) -> Option<usize> {
        let last_selected = self.boxes.iter().rposition(TessBox::is_selected);
        self.find_by_text(last_selected, text)
    }
}

impl<'a> IntoIterator for &'a BoxPage {
    type Item = &'a TessBox;
    type IntoIter = std::slice::Iter<'a, TessBox>;

    fn into_iter(self) -> Self::IntoIter {
        self.boxes.iter()
    }
}
