//! Property-based tests for conversions and cache invalidation.
//!
//! Every property is checked against a reference model that rescans the
//! joined text, so any stale or wrong cache entry shows up as a mismatch.

use std::num::NonZeroUsize;

use proptest::prelude::*;
use textbuf_engine::{Position, Range, TextBuffer};

// =============================================================================
// Test helpers
// =============================================================================

#[derive(Clone, Debug)]
enum EditOp {
    Insert { at: (f64, f64), text: String },
    Replace { start: (f64, f64), end: (f64, f64), text: String },
    Convert { pct: f64 },
}

fn arbitrary_text(max: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(vec!['a', 'b', 'z', '\n', 'é']), 0..max)
        .prop_map(|chars| chars.into_iter().collect())
}

fn arbitrary_point() -> impl Strategy<Value = (f64, f64)> {
    (0.0..1.0f64, 0.0..=1.0f64)
}

fn arbitrary_edit_op() -> impl Strategy<Value = EditOp> {
    prop_oneof![
        (arbitrary_point(), arbitrary_text(15)).prop_map(|(at, text)| EditOp::Insert { at, text }),
        (arbitrary_point(), arbitrary_point(), arbitrary_text(8))
            .prop_map(|(start, end, text)| EditOp::Replace { start, end, text }),
        (0.0..=1.0f64).prop_map(|pct| EditOp::Convert { pct }),
    ]
}

fn block_size() -> impl Strategy<Value = NonZeroUsize> {
    (1usize..16).prop_map(|n| NonZeroUsize::new(n).unwrap())
}

/// Map a pair of fractions onto a valid position of `buf`.
fn position_at(buf: &TextBuffer, (line_pct, col_pct): (f64, f64)) -> Position {
    let line = ((line_pct * buf.line_count() as f64) as usize).min(buf.line_count() - 1) + 1;
    let len = buf.line(line).unwrap().chars().count();
    let col = ((col_pct * (len + 1) as f64) as usize).min(len) + 1;
    Position::new(line, col)
}

fn expected_position(text: &str, index: usize) -> Position {
    let mut line = 1;
    let mut col = 1;
    for c in text.chars().take(index) {
        if c == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    Position::new(line, col)
}

fn apply(buf: &mut TextBuffer, op: &EditOp) {
    match op {
        EditOp::Insert { at, text } => {
            let at = position_at(buf, *at);
            buf.insert(text, at).unwrap();
        }
        EditOp::Replace { start, end, text } => {
            let a = position_at(buf, *start);
            let b = position_at(buf, *end);
            buf.replace(Range::new(a.min(b), a.max(b)), text).unwrap();
        }
        EditOp::Convert { pct } => {
            let index = (*pct * buf.size() as f64) as usize;
            buf.index_to_position(index.min(buf.size())).unwrap();
        }
    }
}

fn all_positions(buf: &TextBuffer) -> Vec<Position> {
    (1..=buf.line_count())
        .flat_map(|line| {
            let len = buf.line(line).unwrap().chars().count();
            (1..=len + 1).map(move |col| Position::new(line, col))
        })
        .collect()
}

// =============================================================================
// Round trips
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// position_to_index(index_to_position(i)) == i for every index
    #[test]
    fn index_round_trips(text in arbitrary_text(80), size in block_size()) {
        let mut buf = TextBuffer::with_block_size(&text, size);
        for index in 0..=buf.size() {
            let pos = buf.index_to_position(index).unwrap();
            prop_assert_eq!(buf.position_to_index(pos).unwrap(), index);
        }
    }

    /// index_to_position(position_to_index(p)) == p for every valid position
    #[test]
    fn position_round_trips(text in arbitrary_text(80), size in block_size()) {
        let mut buf = TextBuffer::with_block_size(&text, size);
        for pos in all_positions(&buf).into_iter().rev() {
            let index = buf.position_to_index(pos).unwrap();
            prop_assert_eq!(buf.index_to_position(index).unwrap(), pos);
        }
    }
}

// =============================================================================
// Cache behaviour
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Warm and cold buffers over the same content give identical answers
    #[test]
    fn caches_are_transparent(
        text in arbitrary_text(120),
        size in block_size(),
        warmup in prop::collection::vec(0.0..=1.0f64, 0..20),
        probe in 0.0..=1.0f64,
    ) {
        let mut warm = TextBuffer::with_block_size(&text, size);
        for pct in warmup {
            let index = (pct * warm.size() as f64) as usize;
            warm.index_to_position(index.min(warm.size())).unwrap();
        }
        let mut cold = TextBuffer::with_block_size(&text, size);

        let index = ((probe * text.chars().count() as f64) as usize).min(cold.size());
        let pos = cold.index_to_position(index).unwrap();
        prop_assert_eq!(warm.index_to_position(index).unwrap(), pos);
        prop_assert_eq!(warm.position_to_index(pos).unwrap(), cold.position_to_index(pos).unwrap());
    }

    /// After any sequence of edits, conversions match a rescan of the content
    #[test]
    fn edits_never_leave_stale_entries(
        text in arbitrary_text(60),
        size in block_size(),
        ops in prop::collection::vec(arbitrary_edit_op(), 1..30),
    ) {
        let mut buf = TextBuffer::with_block_size(&text, size);
        for op in &ops {
            apply(&mut buf, op);

            let content = buf.text();
            prop_assert_eq!(buf.size(), content.chars().count());
            for index in 0..=buf.size() {
                let expected = expected_position(&content, index);
                prop_assert_eq!(buf.index_to_position(index).unwrap(), expected);
                prop_assert_eq!(buf.position_to_index(expected).unwrap(), index);
            }
        }
    }
}

// =============================================================================
// Contents
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// contents() clamps instead of failing, and in-bounds ranges slice the text
    #[test]
    fn contents_clamps_any_range(
        text in arbitrary_text(60),
        start in (0usize..12, 0usize..30),
        end in (0usize..12, 0usize..30),
    ) {
        let mut buf = TextBuffer::new(&text);
        let range = Range::new(Position::new(start.0, start.1), Position::new(end.0, end.1));
        let slice = buf.contents(range);
        prop_assert!(slice.chars().count() <= buf.size());

        let (a, b) = (position_at(&buf, (0.3, 0.5)), position_at(&buf, (0.9, 0.2)));
        let (a, b) = (a.min(b), a.max(b));
        let from = buf.position_to_index(a).unwrap();
        let to = buf.position_to_index(b).unwrap();
        let expected: String = text.chars().skip(from).take(to - from).collect();
        prop_assert_eq!(buf.contents(Range::new(a, b)), expected);
    }
}
