//! Byte spans.

use text_size::TextSize;

/// A byte offset into a source string.
pub type ByteOffset = TextSize;

/// A half-open byte range `[start, end)` into a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    /// The start byte offset (inclusive).
    pub start: ByteOffset,
    /// The end byte offset (exclusive).
    pub end: ByteOffset,
}

impl Span {
    /// Creates a new span from start and end byte offsets.
    #[inline]
    pub fn new(start: impl Into<ByteOffset>, end: impl Into<ByteOffset>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Creates a span from `usize` offsets, as produced by string searching.
    #[inline]
    pub fn from_usize(start: usize, end: usize) -> Self {
        Self::new(start as u32, end as u32)
    }

    /// Creates an empty span at the given offset.
    #[inline]
    pub fn empty(offset: impl Into<ByteOffset>) -> Self {
        let offset = offset.into();
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Moves the span forward by `by` bytes.
    ///
    /// Used to rebase spans computed relative to an embedded block onto the
    /// enclosing file.
    #[inline]
    pub fn shift(self, by: impl Into<ByteOffset>) -> Span {
        let by = by.into();
        Span {
            start: self.start + by,
            end: self.end + by,
        }
    }

    /// Returns the text this span covers, or `None` if it is out of bounds
    /// or not on a character boundary.
    pub fn slice(self, text: &str) -> Option<&str> {
        text.get(u32::from(self.start) as usize..u32::from(self.end) as usize)
    }
}
