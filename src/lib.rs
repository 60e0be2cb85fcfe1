//! Mosaic Terminal Buffer Library
//!
//! The character-grid screen model of a terminal emulator, with support for
//! per-row pixel image overlays as used by inline image protocols (sixel,
//! iTerm2 images). This crate provides:
//!
//! - `core`: text buffer, rows, cells, and the image overlay compositor
//!
//! The buffer is designed to be completely deterministic: given the same
//! sequence of copy/erase/scroll operations, it will always produce the
//! same state. All mutation is synchronous and single-threaded; callers
//! must serialize access to a given buffer.

pub mod core;
