//! Source positions for adblock-lint.
//!
//! Diagnostics carry byte [`Span`]s into the file that was linted. Blocks
//! embedded in a larger file (a `<script>` inside a `.vue` component) are
//! parsed on their own and shifted back onto the file with [`Span::shift`].
//! [`LineIndex`] turns offsets into line/column pairs for reporting.

mod line_index;
mod span;

pub use line_index::{LineCol, LineIndex};
pub use span::{ByteOffset, Span};
