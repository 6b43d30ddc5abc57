use std::fmt;
use std::str::FromStr;

/// A 1-based (line, column) address into a [`TextBuffer`](crate::TextBuffer).
///
/// `Position::new(1, 1)` is the first character of the document. A column one
/// past the last character of a line is the end-of-line insertion point and is
/// valid; anything beyond that is out of range.
///
/// Positions order by line, then column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }

    /// Zero-based equivalent, or `None` when either component is 0.
    pub(crate) fn to_point(self) -> Option<Point> {
        Some(Point {
            line: self.line.checked_sub(1)?,
            col: self.col.checked_sub(1)?,
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// A pair of positions. `start` must not be ordered after `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParsePositionError {
    #[error("Expected LINE:COL, got {0:?}")]
    MissingSeparator(String),
    #[error("Invalid number {0:?}")]
    InvalidNumber(String),
    #[error("Expected LINE:COL-LINE:COL, got {0:?}")]
    MissingRangeSeparator(String),
}

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (line, col) = s
            .split_once(':')
            .ok_or_else(|| ParsePositionError::MissingSeparator(s.to_string()))?;
        let parse = |part: &str| {
            part.trim()
                .parse::<usize>()
                .map_err(|_| ParsePositionError::InvalidNumber(part.to_string()))
        };
        Ok(Self::new(parse(line)?, parse(col)?))
    }
}

impl FromStr for Range {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once('-')
            .ok_or_else(|| ParsePositionError::MissingRangeSeparator(s.to_string()))?;
        Ok(Self::new(start.parse()?, end.parse()?))
    }
}

/// Zero-based (line, column) used inside the buffer and its caches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Point {
    pub line: usize,
    pub col: usize,
}

impl Point {
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }

    pub fn to_position(self) -> Position {
        Position::new(self.line + 1, self.col + 1)
    }
}
