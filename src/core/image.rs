//! Per-row pixel image overlays
//!
//! Inline image protocols (sixel, iTerm2 images) paint pixel content over
//! the character grid. Each [`Row`](super::Row) owns at most one
//! [`ImageSlice`]: a flat pixel buffer covering a contiguous range of that
//! row's columns at a fixed per-cell pixel size. Slices are created lazily
//! on first write, grow to the convex hull of the columns they are asked
//! to touch, and are dropped the moment an erase determines their covered
//! range is empty. A row never retains a zero-extent slice.
//!
//! All of the copy/erase entry points take the owning row so they can
//! apply the line-rendition column scale (narrow text columns map 2:1
//! onto double-width slices) and collapse emptied slices to `None`.

use tracing::trace;

use super::geometry::{CellSize, ColumnRange};
use super::row::{LineRendition, Row};

/// A packed 32-bit pixel in BGRA byte order, as consumed by the renderer
///
/// The all-zero value is fully transparent; unwritten regions of a slice
/// always read as transparent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[repr(C)]
pub struct Pixel {
    pub b: u8,
    pub g: u8,
    pub r: u8,
    pub a: u8,
}

impl Pixel {
    /// Fully transparent pixel
    pub const TRANSPARENT: Pixel = Pixel {
        b: 0,
        g: 0,
        r: 0,
        a: 0,
    };

    /// Create an opaque pixel from RGB components
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { b, g, r, a: 255 }
    }

    /// Check if this pixel is fully transparent
    pub fn is_transparent(&self) -> bool {
        *self == Self::TRANSPARENT
    }
}

/// Round a pixel count up to a multiple of 4 (renderer alignment requirement)
fn align_stride(pixels: usize) -> usize {
    (pixels + 3) & !3
}

/// Pixel image overlay for one row, covering a contiguous column range
///
/// The backing buffer is row-major by scanline with a stride of
/// [`pixel_width`](ImageSlice::pixel_width) pixels. The covered range
/// `[column_begin, column_end)` only ever grows on write (to the union of
/// all ranges touched); only erase operations can shrink it, and then only
/// from "something" to "nothing".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSlice {
    /// Pixel dimensions of one cell; immutable after construction
    cell_size: CellSize,
    /// First column with tracked pixel storage
    column_begin: usize,
    /// One past the last column with tracked pixel storage
    column_end: usize,
    /// Scanline stride in pixels, 4-aligned
    pixel_width: usize,
    /// Flat pixel buffer of `pixel_width * cell_size.height` entries
    pixels: Vec<Pixel>,
}

impl ImageSlice {
    /// Create an empty slice for the given cell size
    pub fn new(cell_size: CellSize) -> Self {
        Self {
            cell_size,
            column_begin: 0,
            column_end: 0,
            pixel_width: 0,
            pixels: Vec::new(),
        }
    }

    /// Pixel dimensions of one cell
    pub fn cell_size(&self) -> CellSize {
        self.cell_size
    }

    /// First column covered by this slice
    pub fn column_offset(&self) -> usize {
        self.column_begin
    }

    /// The covered column range `[column_begin, column_end)`
    pub fn column_range(&self) -> ColumnRange {
        ColumnRange::new(self.column_begin, self.column_end)
    }

    /// Scanline stride of the backing buffer in pixels
    pub fn pixel_width(&self) -> usize {
        self.pixel_width
    }

    /// Read-only view of the full pixel buffer
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Read access starting at the first pixel of the given column
    ///
    /// The column must lie within the covered range; this is a fast-path
    /// accessor for callers that have already validated the range via the
    /// interval math in the copy/erase orchestration.
    pub fn pixels_at(&self, column: usize) -> &[Pixel] {
        let offset = (column - self.column_begin) * self.cell_size.width;
        &self.pixels[offset..]
    }

    /// Write access for the column range `[column_begin, column_end)`,
    /// growing the backing buffer if the range extends outside the
    /// currently covered range
    ///
    /// The returned slice starts at the first pixel of `column_begin`;
    /// writing `cell_size.height` scanlines of `column_end - column_begin`
    /// cells each, advancing by [`pixel_width`](ImageSlice::pixel_width)
    /// per scanline, is in bounds. The range must be non-empty.
    pub fn mutable_pixels(&mut self, column_begin: usize, column_end: usize) -> &mut [Pixel] {
        debug_assert!(column_begin < column_end);
        self.grow_to(column_begin, column_end);
        let offset = (column_begin - self.column_begin) * self.cell_size.width;
        &mut self.pixels[offset..]
    }

    /// Extend the covered range to the union of the current and requested
    /// ranges, relocating existing scanlines into the new buffer
    ///
    /// The new buffer is zero-initialized, so regions never written to
    /// remain transparent. Growth never shrinks the covered range.
    fn grow_to(&mut self, column_begin: usize, column_end: usize) {
        if !self.pixels.is_empty()
            && column_begin >= self.column_begin
            && column_end <= self.column_end
        {
            return;
        }
        let old_begin = self.column_begin;
        let old_stride = self.pixel_width;
        let existing_data = !self.pixels.is_empty();
        if existing_data {
            let requested = ColumnRange::new(column_begin, column_end);
            let merged = self.column_range().union(&requested);
            self.column_begin = merged.start;
            self.column_end = merged.end;
        } else {
            self.column_begin = column_begin;
            self.column_end = column_end;
        }
        self.pixel_width = align_stride((self.column_end - self.column_begin) * self.cell_size.width);
        let buffer_size = self.pixel_width * self.cell_size.height;
        if existing_data {
            // Copy the old scanlines across to the correct horizontal
            // offset in the new buffer. The old stride may include
            // alignment padding that no longer fits; the padding is
            // always zero, so it can be dropped.
            let mut new_pixels = vec![Pixel::TRANSPARENT; buffer_size];
            let offset = (old_begin - self.column_begin) * self.cell_size.width;
            let copy_len = old_stride.min(self.pixel_width - offset);
            for y in 0..self.cell_size.height {
                let src = y * old_stride;
                let dst = y * self.pixel_width + offset;
                new_pixels[dst..dst + copy_len].copy_from_slice(&self.pixels[src..src + copy_len]);
            }
            self.pixels = new_pixels;
        } else {
            self.pixels = vec![Pixel::TRANSPARENT; buffer_size];
        }
        trace!(
            "image slice grown to columns [{}, {}), stride {}",
            self.column_begin,
            self.column_end,
            self.pixel_width
        );
    }

    /// Duplicate the source row's image slice onto the destination row
    ///
    /// The destination receives a deep copy, or is cleared to "no slice"
    /// if the source has none. Used when duplicating whole lines, e.g.
    /// during reflow.
    pub fn copy_row(src_row: &Row, dst_row: &mut Row) {
        let copied = src_row.image_slice().map(|slice| Box::new(slice.clone()));
        dst_row.set_image_slice(copied);
    }

    /// Copy image content for a horizontal cell move between two rows
    ///
    /// If the source row has no image content, or the rows have different
    /// line renditions (no meaningful way to scale pixels across a
    /// rendition change), the destination range is simply erased.
    pub fn copy_cells(
        src_row: &Row,
        src_column: usize,
        dst_row: &mut Row,
        dst_column_begin: usize,
        dst_column_end: usize,
    ) {
        let src_slice = match src_row.image_slice() {
            Some(slice) if src_row.line_rendition() == dst_row.line_rendition() => slice,
            _ => {
                Self::erase_cells(dst_row, dst_column_begin, dst_column_end);
                return;
            }
        };
        let scale = rendition_scale(src_row.line_rendition());
        let mut dst_slice = dst_row
            .take_image_slice()
            .unwrap_or_else(|| Box::new(ImageSlice::new(src_slice.cell_size())));
        let erased = dst_slice.copy_cells_inner(
            src_slice,
            src_column << scale,
            dst_column_begin << scale,
            dst_column_end << scale,
        );
        // A fully erased destination means the slice no longer tracks any
        // content, so ownership is dropped rather than keeping an empty
        // object around.
        dst_row.set_image_slice(if erased { None } else { Some(dst_slice) });
    }

    /// Copy image content for a horizontal cell move within one row
    ///
    /// The within-row counterpart of [`copy_cells`](ImageSlice::copy_cells):
    /// source and destination are the same slice, so scanline blits must be
    /// overlap-safe. A row with no image content has nothing to move and
    /// nothing to erase.
    pub fn move_cells(
        row: &mut Row,
        src_column: usize,
        dst_column_begin: usize,
        dst_column_end: usize,
    ) {
        if let Some(mut slice) = row.take_image_slice() {
            let scale = rendition_scale(row.line_rendition());
            let erased = slice.move_cells_inner(
                src_column << scale,
                dst_column_begin << scale,
                dst_column_end << scale,
            );
            row.set_image_slice(if erased { None } else { Some(slice) });
        }
    }

    /// Erase image content from a range of cells in a row
    ///
    /// No-op if the row has no image content. If the erase covers the
    /// slice's entire covered range, the slice is dropped.
    pub fn erase_cells(row: &mut Row, column_begin: usize, column_end: usize) {
        if let Some(mut slice) = row.take_image_slice() {
            let scale = rendition_scale(row.line_rendition());
            let erased = slice.erase_cells_inner(column_begin << scale, column_end << scale);
            row.set_image_slice(if erased { None } else { Some(slice) });
        }
    }

    /// Slice-to-slice copy of `dst_column_end - dst_column_begin` cells
    /// starting at `src_column` in the source
    ///
    /// Only the portion of the source span that actually has stored pixels
    /// is blitted; the rest of the source is implicitly transparent, so any
    /// live destination pixels in the requested range that are not
    /// overwritten get erased instead. Returns true when the destination's
    /// covered range ends up empty, signaling the caller to drop the slice.
    fn copy_cells_inner(
        &mut self,
        src: &ImageSlice,
        src_column: usize,
        dst_column_begin: usize,
        dst_column_end: usize,
    ) -> bool {
        let src_column_end = src_column + (dst_column_end - dst_column_begin);

        // The portions of the requested ranges that are currently in use.
        let src_used =
            ColumnRange::new(src_column, src_column_end).intersect(&src.column_range());
        let dst_used =
            ColumnRange::new(dst_column_begin, dst_column_end).intersect(&self.column_range());

        // The used source projected into destination coordinates is the
        // sub-range that receives real copied pixels.
        let dst_write_begin = dst_column_begin + (src_used.start - src_column);
        let dst_write_end = dst_column_begin + (src_used.end - src_column);

        if dst_write_begin < dst_write_end {
            let cell_width = self.cell_size.width;
            self.grow_to(dst_write_begin, dst_write_end);
            let write_len = (dst_write_end - dst_write_begin) * cell_width;
            let src_offset = (src_used.start - src.column_begin) * cell_width;
            let dst_offset = (dst_write_begin - self.column_begin) * cell_width;
            for y in 0..self.cell_size.height {
                let src_line = y * src.pixel_width + src_offset;
                let dst_line = y * self.pixel_width + dst_offset;
                self.pixels[dst_line..dst_line + write_len]
                    .copy_from_slice(&src.pixels[src_line..src_line + write_len]);
            }
        }

        // Live destination pixels before and after the written area held
        // stale content that is not being overwritten; erase them. Both
        // erases are clamped to dst_used: the written sub-range can
        // project outside the requested destination range when the
        // source's covered range misses the requested span, and content
        // outside that range is not part of this operation.
        let lead_end = dst_write_begin.min(dst_used.end);
        if dst_used.start < lead_end {
            self.erase_cells_inner(dst_used.start, lead_end);
        }
        let tail_begin = dst_write_end.max(dst_used.start);
        if tail_begin < dst_used.end {
            self.erase_cells_inner(tail_begin, dst_used.end);
        }

        self.column_begin >= self.column_end
    }

    /// Within-slice variant of [`copy_cells_inner`](ImageSlice::copy_cells_inner)
    ///
    /// Same interval math; the scanline blit uses `copy_within` since the
    /// source and destination ranges may overlap inside the one buffer.
    fn move_cells_inner(
        &mut self,
        src_column: usize,
        dst_column_begin: usize,
        dst_column_end: usize,
    ) -> bool {
        let src_column_end = src_column + (dst_column_end - dst_column_begin);

        let src_used =
            ColumnRange::new(src_column, src_column_end).intersect(&self.column_range());
        let dst_used =
            ColumnRange::new(dst_column_begin, dst_column_end).intersect(&self.column_range());

        let dst_write_begin = dst_column_begin + (src_used.start - src_column);
        let dst_write_end = dst_column_begin + (src_used.end - src_column);

        if dst_write_begin < dst_write_end {
            let cell_width = self.cell_size.width;
            // Growth relocates existing content, so the source columns
            // remain addressable at their post-growth offsets.
            self.grow_to(dst_write_begin, dst_write_end);
            let write_len = (dst_write_end - dst_write_begin) * cell_width;
            let src_offset = (src_used.start - self.column_begin) * cell_width;
            let dst_offset = (dst_write_begin - self.column_begin) * cell_width;
            for y in 0..self.cell_size.height {
                let line = y * self.pixel_width;
                self.pixels.copy_within(
                    line + src_offset..line + src_offset + write_len,
                    line + dst_offset,
                );
            }
        }

        // Margin erases clamped to dst_used, as in the two-slice copy.
        let lead_end = dst_write_begin.min(dst_used.end);
        if dst_used.start < lead_end {
            self.erase_cells_inner(dst_used.start, lead_end);
        }
        let tail_begin = dst_write_end.max(dst_used.start);
        if tail_begin < dst_used.end {
            self.erase_cells_inner(tail_begin, dst_used.end);
        }

        self.column_begin >= self.column_end
    }

    /// Erase a column range, returning true when nothing is left in use
    ///
    /// A range fully containing the covered range collapses the slice to
    /// empty without touching the pixel buffer; the caller is expected to
    /// drop the slice, so zero-filling would be wasted work. A partial
    /// erase zero-fills the intersection but does NOT narrow the covered
    /// range: partial erasure leaves holes of transparency within the
    /// still-tracked extent. This keeps column-range semantics stable
    /// between partial erases.
    fn erase_cells_inner(&mut self, column_begin: usize, column_end: usize) -> bool {
        if column_begin <= self.column_begin && column_end >= self.column_end {
            self.column_end = self.column_begin;
            true
        } else {
            let erase =
                ColumnRange::new(column_begin, column_end).intersect(&self.column_range());
            if !erase.is_empty() {
                let offset = (erase.start - self.column_begin) * self.cell_size.width;
                let len = erase.len() * self.cell_size.width;
                for y in 0..self.cell_size.height {
                    let line = y * self.pixel_width + offset;
                    self.pixels[line..line + len].fill(Pixel::TRANSPARENT);
                }
            }
            false
        }
    }
}

/// Column shift for addressing into a slice on a row with the given
/// rendition: narrow text columns map 2:1 onto double-width slices
fn rendition_scale(rendition: LineRendition) -> u32 {
    if rendition != LineRendition::SingleWidth {
        1
    } else {
        0
    }
}
