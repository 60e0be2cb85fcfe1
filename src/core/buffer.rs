//! Terminal Text Buffer
//!
//! An ordered sequence of rows addressable by vertical offset, with the
//! block-level orchestration for image overlay copy and erase. Scroll and
//! resize operations keep each row's overlay consistent with the text that
//! moves with it.

use super::cell::Color;
use super::geometry::Rect;
use super::image::ImageSlice;
use super::row::Row;

/// The terminal text buffer - an ordered sequence of rows
#[derive(Debug, Clone, PartialEq)]
pub struct TextBuffer {
    /// The rows in the buffer
    rows: Vec<Row>,
    /// Number of columns
    cols: usize,
}

impl TextBuffer {
    /// Create a new buffer with the given dimensions
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            rows: (0..rows).map(|_| Row::new(cols)).collect(),
            cols,
        }
    }

    /// Get the number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get the number of rows
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// Get a reference to the row at the given vertical offset
    pub fn row(&self, y: usize) -> Option<&Row> {
        self.rows.get(y)
    }

    /// Get a mutable reference to the row at the given vertical offset
    pub fn row_mut(&mut self, y: usize) -> Option<&mut Row> {
        self.rows.get_mut(y)
    }

    /// Iterate over the rows in order
    pub fn iter_rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    /// Copy a rectangular block of image content within this buffer
    ///
    /// Used for scroll-region moves (reverse scrolling, region blits).
    /// When the source is above the destination, rows are copied bottom
    /// to top so an overlapping destination never reads rows it already
    /// overwrote; otherwise top to bottom. This ordering is the sole
    /// safeguard against self-overwriting and must be applied at the
    /// row-iteration level.
    pub fn copy_image_block(&mut self, src: Rect, dst: Rect) {
        tracing::trace!(
            "copy image block rows [{}, {}) -> [{}, {})",
            src.top,
            src.bottom,
            dst.top,
            dst.bottom
        );
        if src.top < dst.top {
            for y in (0..src.height()).rev() {
                self.copy_image_row_cells(src.top + y, src.left, dst.top + y, dst.left, dst.right);
            }
        } else {
            for y in 0..src.height() {
                self.copy_image_row_cells(src.top + y, src.left, dst.top + y, dst.left, dst.right);
            }
        }
    }

    /// Copy image content for one row of a block move
    fn copy_image_row_cells(
        &mut self,
        src_y: usize,
        src_column: usize,
        dst_y: usize,
        dst_begin: usize,
        dst_end: usize,
    ) {
        if src_y >= self.rows.len() || dst_y >= self.rows.len() {
            return;
        }
        if src_y == dst_y {
            ImageSlice::move_cells(&mut self.rows[src_y], src_column, dst_begin, dst_end);
        } else {
            // Split borrows: the source row is read-only, the destination
            // row is written, and they are distinct.
            let (src_row, dst_row) = if src_y < dst_y {
                let (left, right) = self.rows.split_at_mut(dst_y);
                (&left[src_y], &mut right[0])
            } else {
                let (left, right) = self.rows.split_at_mut(src_y);
                (&right[0], &mut left[dst_y])
            };
            ImageSlice::copy_cells(src_row, src_column, dst_row, dst_begin, dst_end);
        }
    }

    /// Erase image content in a rectangular block of cells
    pub fn erase_image_block(&mut self, rect: Rect) {
        for y in rect.top..rect.bottom {
            if let Some(row) = self.rows.get_mut(y) {
                ImageSlice::erase_cells(row, rect.left, rect.right);
            }
        }
    }

    /// Duplicate one row onto another, text and image overlay both
    ///
    /// Used when duplicating an entire line, e.g. during reflow.
    pub fn copy_row(&mut self, src_y: usize, dst_y: usize) {
        if src_y == dst_y || src_y >= self.rows.len() || dst_y >= self.rows.len() {
            return;
        }
        let (src_row, dst_row) = if src_y < dst_y {
            let (left, right) = self.rows.split_at_mut(dst_y);
            (&left[src_y], &mut right[0])
        } else {
            let (left, right) = self.rows.split_at_mut(src_y);
            (&right[0], &mut left[dst_y])
        };
        dst_row.cells_mut().clone_from_slice(src_row.cells());
        dst_row.set_wrapped(src_row.is_wrapped());
        dst_row.set_line_rendition(src_row.line_rendition());
        ImageSlice::copy_row(src_row, dst_row);
    }

    /// Scroll rows `[top, bottom]` up by n lines; scrolled-out rows are
    /// returned for scrollback
    ///
    /// Rows move wholesale, carrying their image overlays with them. Rows
    /// entering at the bottom of the region are freshly erased.
    pub fn scroll_up(&mut self, n: usize, top: usize, bottom: usize, bg: Color) -> Vec<Row> {
        let n = n.min(bottom - top + 1);
        let mut scrolled_out = Vec::new();
        let total = self.rows.len();

        for _ in 0..n {
            if top < self.rows.len() {
                let row = self.rows.remove(top);
                scrolled_out.push(row);
            }
            let mut new_row = Row::new(self.cols);
            new_row.erase(bg);
            if bottom < self.rows.len() {
                self.rows.insert(bottom, new_row);
            } else {
                self.rows.push(new_row);
            }
        }

        while self.rows.len() < total {
            self.rows.push(Row::new(self.cols));
        }
        self.rows.truncate(total);

        scrolled_out
    }

    /// Scroll rows `[top, bottom]` down by n lines
    ///
    /// Rows pushed out past the bottom of the region are dropped along
    /// with their image overlays.
    pub fn scroll_down(&mut self, n: usize, top: usize, bottom: usize, bg: Color) {
        let n = n.min(bottom - top + 1);
        let total = self.rows.len();

        for _ in 0..n {
            if bottom < self.rows.len() {
                self.rows.remove(bottom);
            }
            let mut new_row = Row::new(self.cols);
            new_row.erase(bg);
            if top <= self.rows.len() {
                self.rows.insert(top, new_row);
            }
        }

        while self.rows.len() < total {
            self.rows.push(Row::new(self.cols));
        }
        self.rows.truncate(total);
    }

    /// Resize the buffer
    ///
    /// Shrinking the column count erases image content beyond the new
    /// width; removed rows drop their overlays with them.
    pub fn resize(&mut self, cols: usize, rows: usize) {
        for row in &mut self.rows {
            row.resize(cols);
        }

        use std::cmp::Ordering;
        match rows.cmp(&self.rows.len()) {
            Ordering::Greater => {
                for _ in self.rows.len()..rows {
                    self.rows.push(Row::new(cols));
                }
            }
            Ordering::Less => {
                self.rows.truncate(rows);
            }
            Ordering::Equal => {}
        }

        self.cols = cols;
    }

    /// Clear the entire buffer, dropping all image overlays
    pub fn clear(&mut self) {
        for row in &mut self.rows {
            row.clear();
        }
    }
}
