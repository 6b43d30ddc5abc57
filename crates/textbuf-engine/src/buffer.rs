use std::fmt;
use std::num::NonZeroUsize;

use log::{debug, trace};

use crate::cache::{BlockCache, CacheStats, DEFAULT_BLOCK_SIZE, LineCache, find_anchor};
use crate::change::{Change, ChangeListener, ListenerId};
use crate::error::BufferError;
use crate::lines::{Line, split_lines};
use crate::position::{Point, Position, Range};

/// Mutable text addressed both by 1-based [`Position`]s and by zero-based
/// character indices.
///
/// Content is stored as a flat sequence of lines joined by `'\n'`. Two caches
/// remember earlier conversions so that converting near a previously visited
/// spot does not rescan the document from the top:
///
/// - a block cache mapping every `block_size`-th offset to its point
/// - a line cache mapping line numbers to the offset the line starts at
///
/// Conversions fill both caches as they walk; mutations truncate them from the
/// edit point before touching the content. Because conversions write to the
/// caches they take `&mut self`, so access is serialized by the borrow checker
/// and the buffer carries no locking of its own.
///
/// ```
/// use textbuf_engine::{Position, TextBuffer};
///
/// let mut buf = TextBuffer::new("hello\nworld");
/// assert_eq!(buf.size(), 11);
/// assert_eq!(buf.index_to_position(6).unwrap(), Position::new(2, 1));
///
/// buf.insert("X", Position::new(1, 6)).unwrap();
/// assert_eq!(buf.text(), "helloX\nworld");
/// ```
pub struct TextBuffer {
    lines: Vec<Line>,
    /// Total chars including separators: sum of line lengths + lines - 1.
    size: usize,
    blocks: BlockCache,
    line_starts: LineCache,
    version: u64,
    listeners: Vec<(ListenerId, Box<dyn ChangeListener>)>,
    next_listener: u64,
}

impl TextBuffer {
    /// Create a buffer with the default block size.
    pub fn new(text: &str) -> Self {
        Self::with_block_size(text, DEFAULT_BLOCK_SIZE)
    }

    pub fn with_block_size(text: &str, block_size: NonZeroUsize) -> Self {
        Self {
            lines: split_lines(text),
            size: text.chars().count(),
            blocks: BlockCache::new(block_size),
            line_starts: LineCache::new(),
            version: 0,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Total number of characters, newlines included. O(1).
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Text of a 1-based line, without its newline.
    pub fn line(&self, line: usize) -> Option<&str> {
        self.lines.get(line.checked_sub(1)?).map(Line::as_str)
    }

    pub fn block_size(&self) -> usize {
        self.blocks.block_size()
    }

    /// Number of successful mutations applied so far.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn cache_stats(&self) -> CacheStats {
        CacheStats {
            blocks: self.blocks.len(),
            lines: self.line_starts.len(),
        }
    }

    /// The whole document.
    pub fn text(&self) -> String {
        self.to_string()
    }

    /// Text covered by `range`.
    ///
    /// Never fails: both ends are clamped into the document first, lines to the
    /// last line and columns to the line's length. An inverted range yields an
    /// empty string.
    pub fn contents(&self, range: Range) -> String {
        let start = self.clamp(range.start);
        let end = self.clamp(range.end);
        if start > end {
            return String::new();
        }
        if start.line == end.line {
            return self.lines[start.line].slice(start.col, end.col).to_string();
        }

        let mut out = String::from(self.lines[start.line].split_at(start.col).1);
        for line in &self.lines[start.line + 1..end.line] {
            out.push('\n');
            out.push_str(line.as_str());
        }
        out.push('\n');
        out.push_str(self.lines[end.line].split_at(end.col).0);
        out
    }

    /// Insert `text` at `at`. Inserting an empty string does nothing.
    pub fn insert(&mut self, text: &str, at: Position) -> Result<(), BufferError> {
        if text.is_empty() {
            return Ok(());
        }
        let point = self.resolve(at)?;
        let index = self.flush_cache(point);

        let inserted = text.chars().count();
        let (head, tail) = self.lines[point.line].split_at(point.col);
        let joined = format!("{head}{text}{tail}");
        self.lines.splice(point.line..=point.line, split_lines(&joined));
        self.size += inserted;

        self.commit(Change {
            at,
            index,
            removed: 0,
            inserted,
            version: 0,
        });
        Ok(())
    }

    /// Replace the text covered by `range` with `text`.
    pub fn replace(&mut self, range: Range, text: &str) -> Result<(), BufferError> {
        let start = self.resolve(range.start)?;
        let end = self.resolve(range.end)?;
        if start > end {
            return Err(BufferError::InvertedRange {
                start: range.start,
                end: range.end,
            });
        }
        let removed = self.span_len(start, end);
        let inserted = text.chars().count();
        if removed == 0 && inserted == 0 {
            return Ok(());
        }
        let index = self.flush_cache(start);

        let head = self.lines[start.line].split_at(start.col).0;
        let tail = self.lines[end.line].split_at(end.col).1;
        let joined = format!("{head}{text}{tail}");
        self.lines.splice(start.line..=end.line, split_lines(&joined));
        self.size = self.size - removed + inserted;

        self.commit(Change {
            at: range.start,
            index,
            removed,
            inserted,
            version: 0,
        });
        Ok(())
    }

    /// Delete the text covered by `range`.
    pub fn remove(&mut self, range: Range) -> Result<(), BufferError> {
        self.replace(range, "")
    }

    /// Position of the zero-based character `index`.
    ///
    /// `index == size()` is the end of the document. An index that sits on a
    /// newline maps to the end of the line the newline terminates.
    pub fn index_to_position(&mut self, index: usize) -> Result<Position, BufferError> {
        if index > self.size {
            return Err(BufferError::IndexOutOfRange {
                index,
                size: self.size,
            });
        }
        Ok(self.point_at(index).to_position())
    }

    /// Zero-based character index of `pos`.
    pub fn position_to_index(&mut self, pos: Position) -> Result<usize, BufferError> {
        let point = self.resolve(pos)?;
        Ok(self.offset_of(point))
    }

    /// Register a listener called after every successful mutation.
    pub fn subscribe(&mut self, listener: impl ChangeListener + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener, _)| *listener != id);
        self.listeners.len() != before
    }

    fn resolve(&self, pos: Position) -> Result<Point, BufferError> {
        let point = pos.to_point().ok_or_else(|| BufferError::invalid(pos))?;
        match self.lines.get(point.line) {
            Some(line) if point.col <= line.len() => Ok(point),
            _ => Err(BufferError::out_of_range(pos)),
        }
    }

    fn clamp(&self, pos: Position) -> Point {
        let line = pos.line.saturating_sub(1).min(self.lines.len() - 1);
        let col = pos.col.saturating_sub(1).min(self.lines[line].len());
        Point::new(line, col)
    }

    /// Chars between two validated points, `start <= end`.
    fn span_len(&self, start: Point, end: Point) -> usize {
        if start.line == end.line {
            return end.col - start.col;
        }
        let between: usize = self.lines[start.line + 1..end.line]
            .iter()
            .map(|line| line.len() + 1)
            .sum();
        self.lines[start.line].len() - start.col + 1 + between + end.col
    }

    /// Truncate both caches from `point` on. Must run before the content
    /// changes because it measures the old lines. Returns `point`'s index.
    fn flush_cache(&mut self, point: Point) -> usize {
        let index = self.offset_of(point);
        let block = self.blocks.block_start(index);
        debug!(
            "flushing caches from line {} and block {block} (index {index})",
            point.line
        );
        self.line_starts.flush(point.line);
        self.blocks.flush(block);
        index
    }

    fn commit(&mut self, mut change: Change) {
        self.version += 1;
        change.version = self.version;
        debug!(
            "applied edit at {}: -{} +{} (size {}, version {})",
            change.at, change.removed, change.inserted, self.size, self.version
        );
        for (_, listener) in &mut self.listeners {
            listener.on_change(&change);
        }
    }

    fn point_at(&mut self, index: usize) -> Point {
        let closest = self.blocks.block_start(index);
        let (anchor_index, anchor) = self.block_anchor(closest);

        let mut line = anchor.line;
        let mut line_start = anchor_index - anchor.col;
        loop {
            let line_end = line_start + self.lines[line].len();
            let mut boundary = self.blocks.next_boundary(line_start);
            while boundary <= line_end {
                if self.blocks.get(boundary).is_none() {
                    self.blocks.set(boundary, Point::new(line, boundary - line_start));
                }
                boundary += self.blocks.block_size();
            }

            if index <= line_end || line + 1 == self.lines.len() {
                return Point::new(line, index - line_start);
            }
            line += 1;
            line_start = line_end + 1;
            self.line_starts.set(line, line_start);
        }
    }

    fn block_anchor(&self, closest: usize) -> (usize, Point) {
        if let Some(point) = self.blocks.get(closest) {
            trace!("block cache hit at {closest}");
            return (closest, point);
        }
        let block_size = self.blocks.block_size();
        if let Some(previous) = closest.checked_sub(block_size)
            && let Some(point) = self.blocks.get(previous)
        {
            trace!("block cache hit at {previous} (previous block)");
            return (previous, point);
        }
        let anchor = find_anchor(
            block_size,
            closest,
            |index| self.blocks.get(index),
            |index| self.blocks.block_start(index),
        );
        trace!("block cache miss at {closest}, searched anchor {anchor:?}");
        anchor.unwrap_or_default()
    }

    fn offset_of(&mut self, point: Point) -> usize {
        self.line_start(point.line) + point.col
    }

    fn line_start(&mut self, target: usize) -> usize {
        let (mut line, mut offset) = self.line_anchor(target);
        while line < target {
            offset += self.lines[line].len() + 1;
            line += 1;
            self.line_starts.set(line, offset);
        }
        offset
    }

    fn line_anchor(&self, target: usize) -> (usize, usize) {
        if let Some(offset) = self.line_starts.get(target) {
            trace!("line cache hit at {target}");
            return (target, offset);
        }
        if let Some(previous) = target.checked_sub(1)
            && let Some(offset) = self.line_starts.get(previous)
        {
            trace!("line cache hit at {previous} (previous line)");
            return (previous, offset);
        }
        let anchor = find_anchor(0, target, |line| self.line_starts.get(line), |line| line);
        trace!("line cache miss at {target}, searched anchor {anchor:?}");
        anchor.unwrap_or_default()
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new("")
    }
}

impl From<&str> for TextBuffer {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for TextBuffer {
    fn from(text: String) -> Self {
        Self::new(&text)
    }
}

impl fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (n, line) in self.lines.iter().enumerate() {
            if n > 0 {
                f.write_str("\n")?;
            }
            f.write_str(line.as_str())?;
        }
        Ok(())
    }
}

impl fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextBuffer")
            .field("lines", &self.lines.len())
            .field("size", &self.size)
            .field("block_size", &self.blocks.block_size())
            .field("version", &self.version)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl Clone for TextBuffer {
    /// Clones content, caches and version. Listeners stay with the original.
    fn clone(&self) -> Self {
        Self {
            lines: self.lines.clone(),
            size: self.size,
            blocks: self.blocks.clone(),
            line_starts: self.line_starts.clone(),
            version: self.version,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }
}

impl PartialEq for TextBuffer {
    /// Buffers are equal when their content is; caches and listeners are
    /// not compared.
    fn eq(&self, other: &Self) -> bool {
        self.lines == other.lines
    }
}

impl Eq for TextBuffer {}
