//! Geometric types for box annotations.
//!
//! Box files store corners in file space (origin bottom-left, y grows
//! upward). Everything in memory uses display space (origin top-left,
//! y grows downward). Converting between the two needs the pixel height of
//! the page the box belongs to.

/// A 2D point (x, y) in display space.
pub type Point = (f64, f64);

/// Corner coordinates (x1, y1, x2, y2) in file space: (x1, y1) is the
/// bottom-left corner and (x2, y2) the top-right, both measured from the
/// bottom of the page image.
pub type FileCoords = (i32, i32, i32, i32);

/// Flips a vertical position between file and display space, or `None` if
/// the result does not fit in an `i32`.
///
/// The mapping is an involution: applying it twice with the same page
/// height and box height returns the original `y`.
#[inline]
pub const fn flip_y(page_height: i32, y: i32, height: i32) -> Option<i32> {
    match page_height.checked_sub(y) {
        Some(top) => top.checked_sub(height),
        None => None,
    }
}

/// An axis-aligned rectangle in display space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds a display-space rectangle from file-space corners. Returns
    /// `None` when the width, height or flipped `y` overflows an `i32`.
    pub fn from_file_coords(coords: FileCoords, page_height: i32) -> Option<Self> {
        let (x1, y1, x2, y2) = coords;
        let width = x2.checked_sub(x1)?;
        let height = y2.checked_sub(y1)?;
        let y = flip_y(page_height, y1, height)?;
        Some(Self::new(x1, y, width, height))
    }

    /// Converts back to file-space corners, or `None` if a corner overflows.
    pub fn to_file_coords(&self, page_height: i32) -> Option<FileCoords> {
        let y1 = flip_y(page_height, self.y, self.height)?;
        let x2 = self.x.checked_add(self.width)?;
        let y2 = page_height.checked_sub(self.y)?;
        Some((self.x, y1, x2, y2))
    }

    pub const fn min_x(&self) -> i32 {
        self.x
    }

    pub const fn min_y(&self) -> i32 {
        self.y
    }

    pub const fn max_x(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    pub const fn max_y(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// A rectangle with zero width or height. The editor repairs these by
    /// inheriting the previous box's geometry.
    pub const fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns true if the point lies inside the rectangle. Edges count as
    /// inside.
    pub fn contains_point(&self, point: Point) -> bool {
        let (px, py) = point;
        px >= f64::from(self.min_x())
            && px <= f64::from(self.max_x())
            && py >= f64::from(self.min_y())
            && py <= f64::from(self.max_y())
    }

    /// Returns true if `other` lies entirely within this rectangle.
    pub const fn contains_rect(&self, other: &Rect) -> bool {
        other.min_x() >= self.min_x()
            && other.min_y() >= self.min_y()
            && other.max_x() <= self.max_x()
            && other.max_y() <= self.max_y()
    }

    /// Smallest rectangle covering both.
    pub fn union(&self, other: &Rect) -> Rect {
        let min_x = self.min_x().min(other.min_x());
        let min_y = self.min_y().min(other.min_y());
        let max_x = self.max_x().max(other.max_x());
        let max_y = self.max_y().max(other.max_y());
        Rect::new(
            min_x,
            min_y,
            max_x.saturating_sub(min_x),
            max_y.saturating_sub(min_y),
        )
    }

    /// Returns the rectangle moved by (dx, dy).
    pub const fn translate(&self, dx: i32, dy: i32) -> Rect {
        Rect::new(
            self.x.saturating_add(dx),
            self.y.saturating_add(dy),
            self.width,
            self.height,
        )
    }
}
