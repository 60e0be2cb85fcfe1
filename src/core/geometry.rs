//! Geometry primitives
//!
//! Small value types shared by the text buffer and the image overlay:
//! cell pixel dimensions, half-open cell rectangles, and the half-open
//! column-interval algebra that the overlay copy/erase math is built on.

use serde::{Deserialize, Serialize};

/// Pixel dimensions of a single character cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSize {
    /// Width of one cell in pixels
    pub width: usize,
    /// Height of one cell in pixels
    pub height: usize,
}

impl CellSize {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}

/// A half-open rectangle of cells: columns `[left, right)`, rows `[top, bottom)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub left: usize,
    pub top: usize,
    pub right: usize,
    pub bottom: usize,
}

impl Rect {
    pub fn new(left: usize, top: usize, right: usize, bottom: usize) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Width of the rectangle in cells
    pub fn width(&self) -> usize {
        self.right.saturating_sub(self.left)
    }

    /// Height of the rectangle in rows
    pub fn height(&self) -> usize {
        self.bottom.saturating_sub(self.top)
    }

    /// Check if the rectangle covers no cells
    pub fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }
}

/// A half-open range of columns `[start, end)`
///
/// An empty range is any range with `start >= end`. Intersection results
/// are always normalized so `start <= end`, which keeps downstream length
/// arithmetic panic-free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRange {
    pub start: usize,
    pub end: usize,
}

impl ColumnRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// A zero-width range
    pub fn empty() -> Self {
        Self { start: 0, end: 0 }
    }

    /// Check if this range covers no columns
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Number of columns covered
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// The overlapping portion of two ranges
    ///
    /// The result is clamped so that `start <= end` holds even when the
    /// ranges are disjoint; in that case the result is empty and its
    /// position is unspecified.
    pub fn intersect(&self, other: &ColumnRange) -> ColumnRange {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end).max(start);
        ColumnRange { start, end }
    }

    /// The smallest range containing both ranges (convex hull)
    pub fn union(&self, other: &ColumnRange) -> ColumnRange {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        ColumnRange {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Check whether this range fully contains `other`
    pub fn contains(&self, other: &ColumnRange) -> bool {
        self.start <= other.start && self.end >= other.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_dimensions() {
        let rect = Rect::new(2, 1, 10, 5);
        assert_eq!(rect.width(), 8);
        assert_eq!(rect.height(), 4);
        assert!(!rect.is_empty());

        let degenerate = Rect::new(5, 3, 5, 8);
        assert_eq!(degenerate.width(), 0);
        assert!(degenerate.is_empty());
    }

    #[test]
    fn test_range_intersect_overlapping() {
        let a = ColumnRange::new(2, 8);
        let b = ColumnRange::new(5, 12);
        assert_eq!(a.intersect(&b), ColumnRange::new(5, 8));
        assert_eq!(b.intersect(&a), ColumnRange::new(5, 8));
    }

    #[test]
    fn test_range_intersect_disjoint_is_empty() {
        let a = ColumnRange::new(0, 3);
        let b = ColumnRange::new(7, 10);
        let result = a.intersect(&b);
        assert!(result.is_empty());
        assert_eq!(result.len(), 0);
        // The clamped result must still satisfy start <= end.
        assert!(result.start <= result.end);
    }

    #[test]
    fn test_range_intersect_contained() {
        let outer = ColumnRange::new(0, 20);
        let inner = ColumnRange::new(5, 9);
        assert_eq!(outer.intersect(&inner), inner);
        assert_eq!(inner.intersect(&outer), inner);
    }

    #[test]
    fn test_range_union_is_convex_hull() {
        let a = ColumnRange::new(2, 4);
        let b = ColumnRange::new(10, 12);
        // Union bridges the gap between disjoint ranges.
        assert_eq!(a.union(&b), ColumnRange::new(2, 12));
    }

    #[test]
    fn test_range_union_with_empty() {
        let a = ColumnRange::new(3, 7);
        let empty = ColumnRange::empty();
        assert_eq!(a.union(&empty), a);
        assert_eq!(empty.union(&a), a);
    }

    #[test]
    fn test_range_contains() {
        let outer = ColumnRange::new(1, 10);
        assert!(outer.contains(&ColumnRange::new(1, 10)));
        assert!(outer.contains(&ColumnRange::new(4, 6)));
        assert!(!outer.contains(&ColumnRange::new(0, 5)));
        assert!(!outer.contains(&ColumnRange::new(5, 11)));
    }
}
