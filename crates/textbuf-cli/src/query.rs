use std::str::FromStr;

use textbuf_engine::{BufferError, ParsePositionError, Position, Range, TextBuffer};

/// One lookup requested on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    /// `42`: zero-based index to position
    Index(usize),
    /// `3:7`: position to zero-based index
    Position(Position),
    /// `1:1-2:4`: clamped contents of a range
    Range(Range),
}

impl FromStr for Query {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(index) = s.trim().parse::<usize>() {
            return Ok(Self::Index(index));
        }
        if s.contains('-') {
            return s.parse().map(Self::Range);
        }
        s.parse().map(Self::Position)
    }
}

impl Query {
    /// Run the query and render the answer as one line of output.
    pub fn run(&self, buf: &mut TextBuffer) -> Result<String, BufferError> {
        match self {
            Self::Index(index) => {
                let pos = buf.index_to_position(*index)?;
                Ok(format!("{index} -> {pos}"))
            }
            Self::Position(pos) => {
                let index = buf.position_to_index(*pos)?;
                Ok(format!("{pos} -> {index}"))
            }
            Self::Range(range) => Ok(format!("{range} -> {:?}", buf.contents(*range))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("6", Query::Index(6))]
    #[case("2:1", Query::Position(Position::new(2, 1)))]
    #[case(
        "1:2-2:3",
        Query::Range(Range::new(Position::new(1, 2), Position::new(2, 3)))
    )]
    fn test_parse_query(#[case] input: &str, #[case] expected: Query) {
        assert_eq!(input.parse::<Query>().unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("abc")]
    #[case("1:x")]
    #[case("1:1-")]
    fn test_parse_query_rejects_malformed(#[case] input: &str) {
        assert!(input.parse::<Query>().is_err());
    }

    #[rstest]
    #[case(Query::Index(6), "6 -> 2:1")]
    #[case(Query::Position(Position::new(2, 1)), "2:1 -> 6")]
    #[case(
        Query::Range(Range::new(Position::new(1, 4), Position::new(9, 9))),
        "1:4-9:9 -> \"lo\\nworld\""
    )]
    fn test_run_query(#[case] query: Query, #[case] expected: &str) {
        let mut buf = TextBuffer::new("hello\nworld");
        assert_eq!(query.run(&mut buf).unwrap(), expected);
    }

    #[test]
    fn test_run_query_reports_errors() {
        let mut buf = TextBuffer::new("hello");
        assert_eq!(
            Query::Index(99).run(&mut buf),
            Err(BufferError::IndexOutOfRange { index: 99, size: 5 })
        );
    }
}
