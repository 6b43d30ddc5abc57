use std::num::NonZeroUsize;

use crate::position::Point;

/// Sparse map from block-aligned character offsets to the point at that offset.
///
/// Keys passed to [`get`](Self::get) and [`set`](Self::set) must be multiples of the
/// block size; storage slot `n` holds the entry for offset `n * block_size`.
#[derive(Debug, Clone)]
pub struct BlockCache {
    block_size: usize,
    slots: Vec<Option<Point>>,
}

impl BlockCache {
    pub fn new(block_size: NonZeroUsize) -> Self {
        Self {
            block_size: block_size.get(),
            slots: Vec::new(),
        }
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Round `index` down to the start of its block.
    pub fn block_start(&self, index: usize) -> usize {
        index - index % self.block_size
    }

    /// First block boundary at or after `index`.
    pub fn next_boundary(&self, index: usize) -> usize {
        index.div_ceil(self.block_size) * self.block_size
    }

    pub(crate) fn get(&self, index: usize) -> Option<Point> {
        debug_assert_eq!(index % self.block_size, 0, "unaligned block key {index}");
        self.slots.get(index / self.block_size).copied().flatten()
    }

    pub(crate) fn set(&mut self, index: usize, point: Point) {
        debug_assert_eq!(index % self.block_size, 0, "unaligned block key {index}");
        let slot = index / self.block_size;
        if slot >= self.slots.len() {
            self.slots.resize(slot + 1, None);
        }
        self.slots[slot] = Some(point);
    }

    /// Drop every entry at or after the block containing `from_index`.
    pub fn flush(&mut self, from_index: usize) {
        self.slots.truncate(from_index / self.block_size);
    }

    /// Number of populated entries.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}
