/// Sparse map from zero-based line numbers to the offset where each line starts.
#[derive(Debug, Clone, Default)]
pub struct LineCache {
    slots: Vec<Option<usize>>,
}

impl LineCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, line: usize) -> Option<usize> {
        self.slots.get(line).copied().flatten()
    }

    pub fn set(&mut self, line: usize, offset: usize) {
        if line >= self.slots.len() {
            self.slots.resize(line + 1, None);
        }
        self.slots[line] = Some(offset);
    }

    /// Drop every entry for `from_line` and the lines after it.
    pub fn flush(&mut self, from_line: usize) {
        self.slots.truncate(from_line);
    }

    /// Number of populated entries.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}
