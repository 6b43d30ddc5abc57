/*!
 * # textbuf engine
 *
 * A mutable line buffer that converts between 1-based `(line, column)`
 * positions and zero-based character indices without rescanning the document
 * on every call.
 *
 * - **`buffer`**: `TextBuffer`, the line array plus size counter; edits and conversions
 * - **`cache`**: the block cache (index -> position), the line cache (line -> start
 *   offset) and the anchor search used after a cache miss
 * - **`change`**: change notifications fired after each mutation
 * - **`position`**: `Position` and `Range`
 * - **`error`**: `BufferError`
 *
 * ```rust
 * use textbuf_engine::{Position, Range, TextBuffer};
 *
 * let mut buf = TextBuffer::new("hello\nworld");
 * buf.remove(Range::new(Position::new(1, 6), Position::new(2, 1))).unwrap();
 * assert_eq!(buf.text(), "helloworld");
 * assert_eq!(buf.position_to_index(Position::new(1, 7)).unwrap(), 6);
 * ```
 */

pub mod buffer;
pub mod cache;
pub mod change;
pub mod error;
mod lines;
pub mod position;

// Re-export key types for easier usage
pub use buffer::TextBuffer;
pub use cache::{CacheStats, DEFAULT_BLOCK_SIZE};
pub use change::{Change, ChangeListener, ListenerId};
pub use error::BufferError;
pub use position::{ParsePositionError, Position, Range};
