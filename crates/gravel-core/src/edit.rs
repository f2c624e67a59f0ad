//! Text edit primitives and utilities.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{TextRange, TextSize};

/// Replace `range` (half-open, UTF-8 byte offsets) with `replacement`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TextEdit {
    pub range: TextRange,
    pub replacement: String,
}

impl TextEdit {
    pub fn new(range: TextRange, replacement: impl Into<String>) -> Self {
        Self {
            range,
            replacement: replacement.into(),
        }
    }

    pub fn insert(offset: TextSize, text: impl Into<String>) -> Self {
        Self::new(TextRange::empty(offset), text)
    }

    pub fn delete(range: TextRange) -> Self {
        Self::new(range, String::new())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum EditError {
    #[error("edit range {range:?} is out of bounds for text length {text_len:?}")]
    RangeOutOfBounds { range: TextRange, text_len: TextSize },
    #[error("offset {offset:?} is not a UTF-8 character boundary")]
    InvalidUtf8Boundary { offset: TextSize },
    #[error("overlapping edits: {first:?} overlaps {second:?}")]
    OverlappingEdits { first: TextRange, second: TextRange },
}

/// Apply a list of edits to a text snapshot.
///
/// Edits are sorted by `(start, end)` and applied from the end of the text
/// backwards, so the result does not depend on the input order.
pub fn apply_text_edits(text: &str, edits: &[TextEdit]) -> Result<String, EditError> {
    let mut edits = edits.to_vec();
    normalize_text_edits(text, &mut edits)?;

    let mut out = text.to_string();
    for edit in edits.into_iter().rev() {
        let start = usize::from(edit.range.start());
        let end = usize::from(edit.range.end());
        out.replace_range(start..end, &edit.replacement);
    }
    Ok(out)
}

/// Sort edits, reject overlaps / out-of-bounds ranges, and coalesce adjacent edits.
pub fn normalize_text_edits(text: &str, edits: &mut Vec<TextEdit>) -> Result<(), EditError> {
    edits.sort_by_key(|e| (e.range.start(), e.range.end()));

    let text_len = TextSize::of(text);
    for edit in edits.iter() {
        if edit.range.end() > text_len {
            return Err(EditError::RangeOutOfBounds {
                range: edit.range,
                text_len,
            });
        }
        for offset in [edit.range.start(), edit.range.end()] {
            if !text.is_char_boundary(usize::from(offset)) {
                return Err(EditError::InvalidUtf8Boundary { offset });
            }
        }
    }

    for pair in edits.windows(2) {
        let (first, second) = (&pair[0], &pair[1]);
        let same_point_inserts = first.range.is_empty()
            && second.range.is_empty()
            && first.range.start() == second.range.start();
        if first.range.end() > second.range.start() || same_point_inserts {
            return Err(EditError::OverlappingEdits {
                first: first.range,
                second: second.range,
            });
        }
    }

    let mut merged: Vec<TextEdit> = Vec::with_capacity(edits.len());
    for edit in edits.drain(..) {
        if let Some(last) = merged.last_mut() {
            if last.range.end() == edit.range.start() {
                last.range = last.range.cover(edit.range);
                last.replacement.push_str(&edit.replacement);
                continue;
            }
        }
        merged.push(edit);
    }
    *edits = merged;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn range(start: u32, end: u32) -> TextRange {
        TextRange::new(TextSize::from(start), TextSize::from(end))
    }

    #[test]
    fn apply_multiple_edits_is_order_independent() {
        let text = "(x) -> x + 1";
        let mut edits = vec![
            TextEdit::new(range(0, 3), "x"),
            TextEdit::insert(TextSize::from(0), "{"),
            TextEdit::delete(range(11, 12)),
        ];

        let out1 = apply_text_edits(text, &edits).unwrap();
        edits.reverse();
        let out2 = apply_text_edits(text, &edits).unwrap();

        assert_eq!(out1, out2);
        assert_eq!(out1, "{x -> x + ");
    }

    #[test]
    fn detect_overlapping_edits() {
        let edits = vec![
            TextEdit::new(range(1, 4), "X"),
            TextEdit::new(range(3, 5), "Y"),
        ];
        assert!(matches!(
            apply_text_edits("abcdef", &edits),
            Err(EditError::OverlappingEdits { .. })
        ));
    }

    #[test]
    fn rejects_out_of_bounds_and_split_chars() {
        assert!(matches!(
            apply_text_edits("ab", &[TextEdit::delete(range(1, 3))]),
            Err(EditError::RangeOutOfBounds { .. })
        ));
        assert!(matches!(
            apply_text_edits("é", &[TextEdit::delete(range(0, 1))]),
            Err(EditError::InvalidUtf8Boundary { .. })
        ));
    }
}
