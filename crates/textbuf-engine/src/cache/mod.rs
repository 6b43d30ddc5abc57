//! Conversion caches.
//!
//! Both caches are pure accelerators: they are filled lazily while the buffer
//! converts between indices and positions, truncated from the edit point on
//! every mutation, and never rebuilt wholesale. Emptying them changes how long a
//! conversion takes, never what it returns.

pub mod block;
pub mod line;
pub mod search;

pub use block::BlockCache;
pub use line::LineCache;
pub use search::find_anchor;

use std::num::NonZeroUsize;

/// Default number of offsets grouped under one block cache entry.
pub const DEFAULT_BLOCK_SIZE: NonZeroUsize = NonZeroUsize::new(10).unwrap();

/// Populated entry counts, for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub blocks: usize,
    pub lines: usize,
}
