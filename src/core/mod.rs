//! Terminal Buffer Core Module
//!
//! Platform-independent terminal buffer state. This module contains:
//! - Text buffer and row model
//! - Cell representation with attributes
//! - Per-row pixel image overlays and their copy/erase algebra
//! - Deterministic snapshot generation
//!
//! The image overlay machinery is the algorithmic heart of this module:
//! sparse pixel content is tracked per row, merged and erased as text
//! scrolls, resizes, and is overwritten, without retaining empty buffers.

mod buffer;
mod cell;
mod geometry;
mod image;
mod row;
mod snapshot;

pub use buffer::TextBuffer;
pub use cell::{Cell, Color, Style};
pub use geometry::{CellSize, ColumnRange, Rect};
pub use image::{ImageSlice, Pixel};
pub use row::{LineRendition, Row};
pub use snapshot::{ImageSnapshot, RowSnapshot, Snapshot, SnapshotError};
