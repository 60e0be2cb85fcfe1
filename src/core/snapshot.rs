//! Deterministic snapshot generation
//!
//! Snapshots capture buffer state in a serializable format for testing
//! and debugging. Given the same sequence of operations, the buffer must
//! produce identical snapshots.
//!
//! The pixel payload of image overlays is deliberately not serialized
//! (the overlay is a purely in-memory structure); a snapshot records the
//! overlay's extent and geometry only.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::buffer::TextBuffer;
use super::row::{LineRendition, Row};

/// Errors from snapshot encoding/decoding
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to encode snapshot: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to decode snapshot: {0}")]
    Decode(#[source] serde_json::Error),
}

/// A snapshot of the text buffer state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Buffer dimensions
    pub cols: usize,
    pub rows: usize,
    /// Per-row state, top to bottom
    pub grid: Vec<RowSnapshot>,
}

/// Snapshot of a single row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowSnapshot {
    /// Text content with trailing blanks trimmed
    pub text: String,
    /// Line rendition
    pub rendition: LineRendition,
    #[serde(default, skip_serializing_if = "is_false")]
    pub wrapped: bool,
    /// Image overlay extent, if the row carries one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageSnapshot>,
}

/// Snapshot of a row's image overlay extent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSnapshot {
    /// Covered column range (slice coordinates)
    pub column_begin: usize,
    pub column_end: usize,
    /// Scanline stride in pixels
    pub pixel_width: usize,
    /// Per-cell pixel dimensions
    pub cell_width: usize,
    pub cell_height: usize,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl From<&Row> for RowSnapshot {
    fn from(row: &Row) -> Self {
        let image = row.image_slice().map(|slice| ImageSnapshot {
            column_begin: slice.column_range().start,
            column_end: slice.column_range().end,
            pixel_width: slice.pixel_width(),
            cell_width: slice.cell_size().width,
            cell_height: slice.cell_size().height,
        });
        RowSnapshot {
            text: row.text(),
            rendition: row.line_rendition(),
            wrapped: row.is_wrapped(),
            image,
        }
    }
}

impl Snapshot {
    /// Create a snapshot from the current buffer state
    pub fn from_buffer(buffer: &TextBuffer) -> Self {
        Snapshot {
            cols: buffer.cols(),
            rows: buffer.rows(),
            grid: buffer.iter_rows().map(RowSnapshot::from).collect(),
        }
    }

    /// Convert snapshot to JSON string
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self).map_err(SnapshotError::Encode)
    }

    /// Parse snapshot from JSON string
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(json).map_err(SnapshotError::Decode)
    }

    /// Get a simple text representation of the buffer (for debugging)
    pub fn to_text(&self) -> String {
        let mut result = String::new();
        for row in &self.grid {
            result.push_str(&row.text);
            result.push('\n');
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::CellSize;
    use crate::core::image::ImageSlice;

    fn buffer_with_content() -> TextBuffer {
        let mut buffer = TextBuffer::new(10, 3);
        let row = buffer.row_mut(0).unwrap();
        row.cell_mut(0).unwrap().content = "H".to_string();
        row.cell_mut(1).unwrap().content = "i".to_string();

        let mut slice = ImageSlice::new(CellSize::new(8, 16));
        slice.mutable_pixels(2, 5);
        buffer
            .row_mut(1)
            .unwrap()
            .set_image_slice(Some(Box::new(slice)));
        buffer
    }

    #[test]
    fn test_snapshot_from_buffer() {
        let buffer = buffer_with_content();
        let snapshot = Snapshot::from_buffer(&buffer);

        assert_eq!(snapshot.cols, 10);
        assert_eq!(snapshot.rows, 3);
        assert_eq!(snapshot.grid[0].text, "Hi");
        assert!(snapshot.grid[0].image.is_none());

        let image = snapshot.grid[1].image.expect("row 1 carries an overlay");
        assert_eq!(image.column_begin, 2);
        assert_eq!(image.column_end, 5);
        assert_eq!(image.pixel_width, 24);
        assert_eq!(image.cell_width, 8);
    }

    #[test]
    fn test_snapshot_json_roundtrip() {
        let buffer = buffer_with_content();
        let snapshot = Snapshot::from_buffer(&buffer);

        let json = snapshot.to_json().unwrap();
        let restored = Snapshot::from_json(&json).unwrap();
        assert_eq!(snapshot, restored);
    }

    #[test]
    fn test_snapshot_to_text() {
        let buffer = buffer_with_content();
        let text = Snapshot::from_buffer(&buffer).to_text();
        assert!(text.starts_with("Hi\n"));
    }

    #[test]
    fn test_snapshot_decode_error() {
        let result = Snapshot::from_json("not json");
        assert!(matches!(result, Err(SnapshotError::Decode(_))));
    }
}
