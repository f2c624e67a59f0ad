//! Core shared types for Gravel.
//!
//! This crate is intentionally small: text sizes/ranges, line/column mapping, and
//! text edits over UTF-8 buffers.

mod edit;
mod text;

pub use edit::{apply_text_edits, normalize_text_edits, EditError, TextEdit};
pub use text::{LineCol, LineIndex, TextRange, TextSize};
