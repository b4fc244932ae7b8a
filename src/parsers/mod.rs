pub mod bracketed;

pub use bracketed::BracketedParser;

use crate::record::ParseOutcome;

/// Parse raw text lines into structured records.
///
/// Implementations are shared read-only across worker threads, so any
/// compiled state must be built in the constructor.
pub trait RecordParser: Send + Sync {
    /// `line` has no trailing terminator; `line_number` is 1-based and is
    /// carried into the failure when the line does not match.
    fn parse<'a>(&self, line: &'a str, line_number: usize) -> ParseOutcome<'a>;
}

/// Iterate the lines of a buffer as `(line_number, line)` pairs.
///
/// Lines are split on `\n` and a trailing `\r` is dropped. A final
/// terminator does not produce an extra empty line.
pub fn numbered_lines(text: &str, first_line_number: usize) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(move |(offset, line)| (first_line_number + offset, line))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_lines_strips_terminators() {
        let lines: Vec<_> = numbered_lines("a\r\nb\n\nc\n", 10).collect();
        assert_eq!(lines, vec![(10, "a"), (11, "b"), (12, ""), (13, "c")]);
    }

    #[test]
    fn test_numbered_lines_without_final_newline() {
        let lines: Vec<_> = numbered_lines("a\nb", 1).collect();
        assert_eq!(lines, vec![(1, "a"), (2, "b")]);
    }

    #[test]
    fn test_numbered_lines_empty_input() {
        assert_eq!(numbered_lines("", 1).count(), 0);
    }
}
