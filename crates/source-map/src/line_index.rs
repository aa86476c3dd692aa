//! Offset to line/column conversion.

use crate::ByteOffset;
use text_size::TextSize;

/// A line and column position (0-indexed, column in bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineCol {
    /// 0-indexed line number.
    pub line: u32,
    /// 0-indexed byte column within the line.
    pub col: u32,
}

impl LineCol {
    /// Creates a new line/column position.
    #[inline]
    pub fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }

    /// Returns the position as 1-indexed `(line, column)` for display.
    #[inline]
    pub fn one_based(self) -> (u32, u32) {
        (self.line + 1, self.col + 1)
    }
}

/// Line start table for a source text.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// `line_starts[i]` is the offset where line `i` begins.
    line_starts: Vec<ByteOffset>,
    len: TextSize,
}

impl LineIndex {
    /// Builds the index for `text`.
    pub fn new(text: &str) -> Self {
        let line_starts = std::iter::once(TextSize::from(0))
            .chain(
                text.match_indices('\n')
                    .map(|(offset, _)| TextSize::from((offset + 1) as u32)),
            )
            .collect();

        Self {
            line_starts,
            len: TextSize::from(text.len() as u32),
        }
    }

    /// Converts a byte offset to a line/column position.
    ///
    /// Returns `None` if the offset is past the end of the text.
    pub fn line_col(&self, offset: ByteOffset) -> Option<LineCol> {
        if offset > self.len {
            return None;
        }

        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let col = u32::from(offset) - u32::from(self.line_starts[line]);

        Some(LineCol::new(line as u32, col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_line() {
        let index = LineIndex::new("hello world");
        assert_eq!(index.line_col(TextSize::from(5)), Some(LineCol::new(0, 5)));
    }

    #[test]
    fn test_multiple_lines() {
        let index = LineIndex::new("<template>\n  <div id='AC_ad'></div>\n</template>");
        assert_eq!(index.line_col(TextSize::from(10)), Some(LineCol::new(0, 10)));
        assert_eq!(index.line_col(TextSize::from(11)), Some(LineCol::new(1, 0)));
        assert_eq!(index.line_col(TextSize::from(20)), Some(LineCol::new(1, 9)));
    }

    #[test]
    fn test_end_of_text_is_addressable() {
        let index = LineIndex::new("ab\n");
        assert_eq!(index.line_col(TextSize::from(3)), Some(LineCol::new(1, 0)));
        assert_eq!(index.line_col(TextSize::from(4)), None);
    }

    #[test]
    fn test_one_based() {
        assert_eq!(LineCol::new(0, 0).one_based(), (1, 1));
        assert_eq!(LineCol::new(4, 9).one_based(), (5, 10));
    }
}
