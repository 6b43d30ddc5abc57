/// Description of one applied mutation.
///
/// `at` and `index` name the lowest position the edit touched, which is where
/// anything memoized over the old content stops being valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Change {
    /// 1-based position where the edit starts.
    pub at: crate::Position,
    /// Zero-based offset of `at` in the content before the edit.
    pub index: usize,
    /// Characters removed, newlines included.
    pub removed: usize,
    /// Characters inserted, newlines included.
    pub inserted: usize,
    /// Buffer version after the edit.
    pub version: u64,
}

/// Receives a [`Change`] after every successful mutation of a buffer.
///
/// Implemented for any `FnMut(&Change)`, so a closure can be passed to
/// [`TextBuffer::subscribe`](crate::TextBuffer::subscribe) directly.
pub trait ChangeListener {
    fn on_change(&mut self, change: &Change);
}

impl<F> ChangeListener for F
where
    F: FnMut(&Change),
{
    fn on_change(&mut self, change: &Change) {
        self(change)
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);
