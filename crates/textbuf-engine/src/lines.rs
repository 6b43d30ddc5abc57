//! Line storage.
//!
//! Columns and offsets count `char`s. Each line keeps its char count next to
//! the text so lengths are O(1) and slicing never splits a UTF-8 sequence.

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Line {
    text: String,
    chars: usize,
}

impl Line {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            chars: text.chars().count(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.chars
    }

    /// Split at a char column, which must not exceed `len()`.
    pub fn split_at(&self, col: usize) -> (&str, &str) {
        self.text.split_at(self.byte_offset(col))
    }

    /// Text between two char columns, `from <= to <= len()`.
    pub fn slice(&self, from: usize, to: usize) -> &str {
        &self.text[self.byte_offset(from)..self.byte_offset(to)]
    }

    fn byte_offset(&self, col: usize) -> usize {
        if self.chars == self.text.len() {
            return col.min(self.text.len());
        }
        self.text
            .char_indices()
            .nth(col)
            .map_or(self.text.len(), |(byte, _)| byte)
    }
}

/// Split on `'\n'`. Always yields at least one (possibly empty) line.
pub(crate) fn split_lines(text: &str) -> Vec<Line> {
    text.split('\n').map(Line::new).collect()
}
