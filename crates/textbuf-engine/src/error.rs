use crate::position::Position;

/// Failures reported by [`TextBuffer`](crate::TextBuffer) operations.
///
/// All of them are detected before the buffer is touched, so a failed call
/// leaves content, caches and version unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    /// A line or column of 0 was given; positions are 1-based.
    #[error("Invalid position {line}:{col}: lines and columns start at 1")]
    InvalidPosition { line: usize, col: usize },

    #[error("Position {line}:{col} is outside the document")]
    PositionOutOfRange { line: usize, col: usize },

    #[error("Index {index} exceeds document size {size}")]
    IndexOutOfRange { index: usize, size: usize },

    #[error("Range start {start} is after its end {end}")]
    InvertedRange { start: Position, end: Position },
}

impl BufferError {
    pub(crate) fn invalid(pos: Position) -> Self {
        Self::InvalidPosition {
            line: pos.line,
            col: pos.col,
        }
    }

    pub(crate) fn out_of_range(pos: Position) -> Self {
        Self::PositionOutOfRange {
            line: pos.line,
            col: pos.col,
        }
    }
}
