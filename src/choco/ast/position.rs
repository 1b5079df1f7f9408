//! Source positions for diagnostics
//!
//! Tokens carry byte ranges. [`SourceLocation`] turns those into 1-based
//! line/column positions when an error has to be reported.

use std::fmt;
use std::ops::Range;

/// A 1-based line and column (columns count bytes) in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Provides fast conversion from byte offsets to line/column positions
#[derive(Debug, Clone)]
pub struct SourceLocation {
    /// Byte offsets where each line starts
    line_starts: Vec<usize>,
    len: usize,
}

impl SourceLocation {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];

        for (byte_pos, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(byte_pos + 1);
            }
        }

        Self {
            line_starts,
            len: source.len(),
        }
    }

    /// Convert a byte offset to a position. Offsets past the end clamp to the end.
    pub fn byte_to_position(&self, byte_offset: usize) -> Position {
        let byte_offset = byte_offset.min(self.len);
        let line = self
            .line_starts
            .binary_search(&byte_offset)
            .unwrap_or_else(|i| i - 1);

        Position::new(line + 1, byte_offset - self.line_starts[line] + 1)
    }

    /// Position of the start of a byte range
    pub fn range_start(&self, range: &Range<usize>) -> Position {
        self.byte_to_position(range.start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_are_one_based() {
        let loc = SourceLocation::new("Foo \n  Bar \n");
        assert_eq!(loc.byte_to_position(0), Position::new(1, 1));
        assert_eq!(loc.byte_to_position(7), Position::new(2, 3));
    }

    #[test]
    fn test_offset_past_end_clamps() {
        let loc = SourceLocation::new("ab");
        assert_eq!(loc.byte_to_position(10), Position::new(1, 3));
    }

    #[test]
    fn test_display() {
        assert_eq!(Position::new(4, 2).to_string(), "4:2");
    }
}
