//! Start-tag lexer using logos.
//!
//! Only the inside of a tag (`<div id="a" class='b c'>`) is tokenized; text,
//! comments and raw blocks are scanned directly by the parser. Quoted values
//! are single tokens so a `>` inside quotes never ends the tag.

use logos::Logos;
use source_map::Span;

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The span of the token in the whole source.
    pub span: Span,
}

/// Token kinds inside a start tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Logos, Default)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum TokenKind {
    /// `>`
    #[token(">")]
    RAngle,

    /// `/>`
    #[token("/>")]
    SlashRAngle,

    /// `/` not followed by `>`
    #[token("/")]
    Slash,

    /// `=`
    #[token("=")]
    Eq,

    /// `"..."`
    #[regex(r#""[^"]*""#)]
    DoubleQuoted,

    /// `'...'`
    #[regex(r"'[^']*'")]
    SingleQuoted,

    /// An attribute name or unquoted value.
    #[regex(r#"[^ \t\r\n\f"'<>=/]+"#)]
    Word,

    /// End of input
    Eof,

    /// Anything else, including an unterminated quote.
    #[default]
    Error,
}

impl TokenKind {
    /// Returns a human-readable name for this token kind.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::RAngle => "'>'",
            TokenKind::SlashRAngle => "'/>'",
            TokenKind::Slash => "'/'",
            TokenKind::Eq => "'='",
            TokenKind::DoubleQuoted => "double-quoted value",
            TokenKind::SingleQuoted => "single-quoted value",
            TokenKind::Word => "name",
            TokenKind::Eof => "end of file",
            TokenKind::Error => "invalid token",
        }
    }

    /// Returns true if this token ends a start tag.
    pub fn closes_tag(&self) -> bool {
        matches!(
            self,
            TokenKind::RAngle | TokenKind::SlashRAngle | TokenKind::Eof
        )
    }
}

/// Lexes the inside of a start tag beginning at `offset` in `source`.
///
/// Iteration stops after the token that closes the tag (`>`, `/>`, or EOF).
pub struct Lexer<'src> {
    inner: logos::Lexer<'src, TokenKind>,
    offset: usize,
    source_len: usize,
    finished: bool,
}

impl<'src> Lexer<'src> {
    /// Creates a lexer over `source[offset..]`.
    pub fn new(source: &'src str, offset: usize) -> Self {
        Self {
            inner: TokenKind::lexer(&source[offset..]),
            offset,
            source_len: source.len(),
            finished: false,
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let kind = match self.inner.next() {
            Some(Ok(kind)) => kind,
            Some(Err(())) => TokenKind::Error,
            None => {
                self.finished = true;
                return Some(Token {
                    kind: TokenKind::Eof,
                    span: Span::empty(self.source_len as u32),
                });
            }
        };

        if kind.closes_tag() {
            self.finished = true;
        }

        let range = self.inner.span();
        Some(Token {
            kind,
            span: Span::from_usize(self.offset + range.start, self.offset + range.end),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tokenize(source: &str) -> Vec<TokenKind> {
        Lexer::new(source, 0).map(|t| t.kind).collect()
    }

    #[test]
    fn test_attributes() {
        assert_eq!(
            tokenize(r#" id="main" class='a b'>"#),
            vec![
                TokenKind::Word,
                TokenKind::Eq,
                TokenKind::DoubleQuoted,
                TokenKind::Word,
                TokenKind::Eq,
                TokenKind::SingleQuoted,
                TokenKind::RAngle,
            ]
        );
    }

    #[test]
    fn test_stops_after_tag_end() {
        assert_eq!(
            tokenize(" disabled/>rest of the file"),
            vec![TokenKind::Word, TokenKind::SlashRAngle]
        );
    }

    #[test]
    fn test_angle_inside_quotes() {
        assert_eq!(
            tokenize(r#" title="a > b">"#),
            vec![
                TokenKind::Word,
                TokenKind::Eq,
                TokenKind::DoubleQuoted,
                TokenKind::RAngle
            ]
        );
    }

    #[test]
    fn test_unterminated_quote() {
        let kinds = tokenize(r#" id="oops"#);
        assert!(kinds.contains(&TokenKind::Error));
        assert_eq!(kinds.last(), Some(&TokenKind::Eof));
    }

    #[test]
    fn test_spans_are_offset() {
        let source = "<div id=x>";
        let tokens: Vec<Token> = Lexer::new(source, 4).collect();
        assert_eq!(tokens[0].span, Span::from_usize(5, 7));
        assert_eq!(tokens[2].span, Span::from_usize(8, 9));
    }
}
