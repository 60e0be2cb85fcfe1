//! Terminal row representation
//!
//! A row is one line of character cells in the buffer, with metadata about
//! wrapping behavior, its line rendition (single- or double-width cells),
//! and an optional pixel image overlay. The overlay is exclusively owned:
//! a row holds at most one [`ImageSlice`], and never an empty one.

use serde::{Deserialize, Serialize};

use super::cell::{Cell, Color};
use super::image::ImageSlice;

/// Width/height rendition of a row (DECDWL/DECDHL)
///
/// Non-single-width renditions double the pixel width of each text column,
/// so column coordinates are doubled when addressing into the row's image
/// slice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineRendition {
    /// Normal single-width cells
    #[default]
    SingleWidth,
    /// Double-width cells (DECDWL)
    DoubleWidth,
    /// Top half of double-height double-width cells (DECDHL)
    DoubleHeightTop,
    /// Bottom half of double-height double-width cells (DECDHL)
    DoubleHeightBottom,
}

/// A row of cells in the terminal buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// The cells in this row
    cells: Vec<Cell>,
    /// True if this row was soft-wrapped from the previous line
    wrapped: bool,
    /// Line rendition for this row
    rendition: LineRendition,
    /// Pixel image overlay, if any content has been painted over this row
    image: Option<Box<ImageSlice>>,
}

impl Row {
    /// Create a new row with the specified number of columns
    pub fn new(cols: usize) -> Self {
        Self {
            cells: vec![Cell::default(); cols],
            wrapped: false,
            rendition: LineRendition::SingleWidth,
            image: None,
        }
    }

    /// Get the number of columns in this row
    pub fn cols(&self) -> usize {
        self.cells.len()
    }

    /// Get a reference to a cell at the given column
    pub fn cell(&self, col: usize) -> Option<&Cell> {
        self.cells.get(col)
    }

    /// Get a mutable reference to a cell at the given column
    pub fn cell_mut(&mut self, col: usize) -> Option<&mut Cell> {
        self.cells.get_mut(col)
    }

    /// Get all cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Get mutable reference to all cells
    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Check if this row is wrapped from the previous line
    pub fn is_wrapped(&self) -> bool {
        self.wrapped
    }

    /// Set the wrapped flag
    pub fn set_wrapped(&mut self, wrapped: bool) {
        self.wrapped = wrapped;
    }

    /// Get the line rendition of this row
    pub fn line_rendition(&self) -> LineRendition {
        self.rendition
    }

    /// Set the line rendition of this row
    pub fn set_line_rendition(&mut self, rendition: LineRendition) {
        self.rendition = rendition;
    }

    /// Get the image overlay for this row, if any
    pub fn image_slice(&self) -> Option<&ImageSlice> {
        self.image.as_deref()
    }

    /// Get mutable access to the image overlay, if any
    pub fn image_slice_mut(&mut self) -> Option<&mut ImageSlice> {
        self.image.as_deref_mut()
    }

    /// Replace the image overlay
    ///
    /// Callers must not store an empty slice; "no content" is represented
    /// as `None`, never as a zero-extent slice.
    pub fn set_image_slice(&mut self, slice: Option<Box<ImageSlice>>) {
        debug_assert!(slice
            .as_ref()
            .map_or(true, |s| !s.column_range().is_empty()));
        self.image = slice;
    }

    /// Take the image overlay out of this row, leaving `None`
    pub fn take_image_slice(&mut self) -> Option<Box<ImageSlice>> {
        self.image.take()
    }

    /// Resize the row to a new number of columns
    ///
    /// If growing, new cells are initialized with default values. If
    /// shrinking, cells are truncated and image content beyond the new
    /// width is erased.
    pub fn resize(&mut self, cols: usize) {
        let old_cols = self.cells.len();
        if cols < old_cols {
            ImageSlice::erase_cells(self, cols, old_cols);
        }
        self.cells.resize_with(cols, Cell::default);
    }

    /// Clear all cells in the row and drop any image overlay
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
        self.wrapped = false;
        self.rendition = LineRendition::SingleWidth;
        self.image = None;
    }

    /// Erase all cells with a specific background color, dropping any
    /// image overlay
    pub fn erase(&mut self, bg: Color) {
        for cell in &mut self.cells {
            cell.erase(bg);
        }
        self.wrapped = false;
        self.image = None;
    }

    /// Erase cells in `[begin, end)`, text and image overlay both
    pub fn erase_cells(&mut self, begin: usize, end: usize, bg: Color) {
        let end = end.min(self.cells.len());
        for cell in self.cells.iter_mut().take(end).skip(begin) {
            cell.erase(bg);
        }
        ImageSlice::erase_cells(self, begin, end);
    }

    /// Insert blank cells at the given column, shifting existing cells
    /// right; cells that shift past the end are lost
    ///
    /// Image content shifts along with the text it was painted over.
    pub fn insert_cells(&mut self, col: usize, count: usize, bg: Color) {
        let len = self.cells.len();
        if col >= len {
            return;
        }
        let shift = count.min(len - col);

        // Shift cells right
        for i in (col + shift..len).rev() {
            self.cells[i] = self.cells[i - shift].clone();
        }
        // Clear the inserted cells
        for cell in self.cells.iter_mut().skip(col).take(shift) {
            cell.erase(bg);
        }

        // The overlay follows the text: copy [col, len - shift) onto
        // [col + shift, len), then erase the vacated gap.
        ImageSlice::move_cells(self, col, col + shift, len);
        ImageSlice::erase_cells(self, col, col + shift);
    }

    /// Delete cells at the given column, shifting remaining cells left;
    /// new cells at the end are blank
    ///
    /// Image content shifts along with the text it was painted over.
    pub fn delete_cells(&mut self, col: usize, count: usize, bg: Color) {
        let len = self.cells.len();
        if col >= len {
            return;
        }
        let shift = count.min(len - col);

        // Shift cells left
        for i in col..len - shift {
            self.cells[i] = self.cells[i + shift].clone();
        }
        // Clear the cells at the end
        for cell in self.cells.iter_mut().skip(len - shift) {
            cell.erase(bg);
        }

        ImageSlice::move_cells(self, col + shift, col, len - shift);
        ImageSlice::erase_cells(self, len - shift, len);
    }

    /// Get the text content of this row as a string
    ///
    /// Continuation cells of wide characters are skipped, either by the
    /// continuation flag or by the display width of the preceding cell.
    pub fn text(&self) -> String {
        let mut result = String::new();
        let mut skip = 0usize;
        for cell in &self.cells {
            if skip > 0 || cell.is_wide_continuation() {
                skip = skip.saturating_sub(1);
                continue;
            }
            if cell.content.is_empty() {
                result.push(' ');
            } else {
                result.push_str(&cell.content);
                skip = cell.width().saturating_sub(1);
            }
        }
        result.trim_end().to_string()
    }

    /// Check if the row is empty (all cells blank, no image overlay)
    pub fn is_empty(&self) -> bool {
        self.image.is_none() && self.cells.iter().all(|c| c.is_empty() || c.content == " ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::{CellSize, ColumnRange};
    use crate::core::image::Pixel;

    fn row_with_image(cols: usize, begin: usize, end: usize) -> Row {
        let mut row = Row::new(cols);
        let mut slice = ImageSlice::new(CellSize::new(4, 2));
        let stride_range = slice.mutable_pixels(begin, end);
        for pixel in stride_range.iter_mut() {
            *pixel = Pixel::rgb(200, 100, 50);
        }
        row.set_image_slice(Some(Box::new(slice)));
        row
    }

    #[test]
    fn test_row_new() {
        let row = Row::new(80);
        assert_eq!(row.cols(), 80);
        assert!(!row.is_wrapped());
        assert!(row.is_empty());
        assert!(row.image_slice().is_none());
        assert_eq!(row.line_rendition(), LineRendition::SingleWidth);
    }

    #[test]
    fn test_row_cell_access() {
        let mut row = Row::new(10);
        row.cell_mut(5).unwrap().content = "X".to_string();
        assert_eq!(row.cell(5).unwrap().content, "X");
        assert!(row.cell(10).is_none());
    }

    #[test]
    fn test_row_clear_drops_image() {
        let mut row = row_with_image(10, 2, 5);
        row.set_wrapped(true);
        row.clear();
        assert!(row.is_empty());
        assert!(!row.is_wrapped());
        assert!(row.image_slice().is_none());
    }

    #[test]
    fn test_row_erase_drops_image() {
        let mut row = row_with_image(10, 2, 5);
        row.erase(Color::Default);
        assert!(row.image_slice().is_none());
    }

    #[test]
    fn test_row_resize_shrink_erases_image_beyond_width() {
        let mut row = row_with_image(10, 2, 8);
        row.resize(5);
        assert_eq!(row.cols(), 5);
        // Content in [2, 5) survives; the tracked extent is unchanged by
        // the partial erase.
        let slice = row.image_slice().expect("partial content should remain");
        assert_eq!(slice.column_range(), ColumnRange::new(2, 8));
    }

    #[test]
    fn test_row_resize_shrink_drops_image_fully_outside() {
        let mut row = row_with_image(10, 6, 9);
        row.resize(5);
        assert!(row.image_slice().is_none());
    }

    #[test]
    fn test_row_erase_cells_range() {
        let mut row = row_with_image(10, 0, 10);
        for i in 0..10 {
            row.cell_mut(i).unwrap().content = "x".to_string();
        }
        row.erase_cells(3, 7, Color::Default);
        assert!(row.cell(3).unwrap().is_empty());
        assert!(row.cell(6).unwrap().is_empty());
        assert_eq!(row.cell(7).unwrap().content, "x");
        // Image extent is stable under partial erase.
        let slice = row.image_slice().expect("image should remain");
        assert_eq!(slice.column_range(), ColumnRange::new(0, 10));
    }

    #[test]
    fn test_row_insert_cells_shifts_text_and_image() {
        let mut row = row_with_image(10, 0, 3);
        for (i, c) in "ABCDEFGHIJ".chars().enumerate() {
            row.cell_mut(i).unwrap().content = c.to_string();
        }

        row.insert_cells(0, 2, Color::Default);

        assert!(row.cell(0).unwrap().is_empty());
        assert!(row.cell(1).unwrap().is_empty());
        assert_eq!(row.cell(2).unwrap().content, "A");
        // The overlay moved right with the text it covered.
        let slice = row.image_slice().expect("image should remain");
        assert!(slice.column_range().contains(&ColumnRange::new(2, 5)));
        let first_moved = slice.pixels_at(2)[0];
        assert_eq!(first_moved, Pixel::rgb(200, 100, 50));
    }

    #[test]
    fn test_row_delete_cells_shifts_text_and_image() {
        let mut row = row_with_image(10, 4, 6);
        for (i, c) in "ABCDEFGHIJ".chars().enumerate() {
            row.cell_mut(i).unwrap().content = c.to_string();
        }

        row.delete_cells(0, 4, Color::Default);

        assert_eq!(row.cell(0).unwrap().content, "E");
        assert_eq!(row.cell(1).unwrap().content, "F");
        assert!(row.cell(6).unwrap().is_empty());
        // Overlay content from [4, 6) now sits at [0, 2).
        let slice = row.image_slice().expect("image should remain");
        assert_eq!(slice.pixels_at(0)[0], Pixel::rgb(200, 100, 50));
    }

    #[test]
    fn test_row_delete_cells_erases_vacated_tail() {
        // Overlay at the far right moves left; the vacated tail is erased.
        let mut row = row_with_image(10, 8, 10);
        row.delete_cells(0, 4, Color::Default);
        let slice = row.image_slice().expect("moved content remains");
        assert_eq!(slice.pixels_at(4)[0], Pixel::rgb(200, 100, 50));
    }

    #[test]
    fn test_row_text() {
        let mut row = Row::new(10);
        row.cell_mut(0).unwrap().content = "H".to_string();
        row.cell_mut(1).unwrap().content = "i".to_string();
        assert_eq!(row.text(), "Hi");
    }

    #[test]
    fn test_row_text_wide_char_skips_continuation() {
        let mut row = Row::new(10);
        row.cell_mut(0).unwrap().content = "中".to_string();
        row.cell_mut(1).unwrap().style.wide_char_continuation = true;
        row.cell_mut(2).unwrap().content = "a".to_string();
        assert_eq!(row.text(), "中a");

        // A continuation cell is skipped by width even without the flag.
        let mut row = Row::new(10);
        row.cell_mut(0).unwrap().content = "中".to_string();
        row.cell_mut(2).unwrap().content = "a".to_string();
        assert_eq!(row.text(), "中a");
    }
}
