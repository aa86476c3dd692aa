//! Recovering parser for Vue single-file components.

use crate::ast::*;
use crate::error::{ParseError, ParseErrorKind};
use crate::lexer::{Lexer, Token, TokenKind};
use crate::ParseResult;
use smol_str::SmolStr;
use source_map::Span;
use text_size::TextSize;

/// HTML void elements, which never have an end tag.
const HTML_VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose content is raw text rather than markup.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title"];

fn is_void_element(name: &str) -> bool {
    HTML_VOID_ELEMENTS
        .iter()
        .any(|void| void.eq_ignore_ascii_case(name))
}

fn is_raw_text_element(name: &str) -> bool {
    RAW_TEXT_ELEMENTS
        .iter()
        .any(|raw| raw.eq_ignore_ascii_case(name))
}

/// Finds `needle` in `haystack`, ignoring ASCII case.
fn find_ascii_ci(haystack: &str, needle: &str) -> Option<usize> {
    let (h, n) = (haystack.as_bytes(), needle.as_bytes());
    if n.len() > h.len() {
        return None;
    }
    (0..=h.len() - n.len()).find(|&i| h[i..i + n.len()].eq_ignore_ascii_case(n))
}

/// A parsed start tag.
struct StartTag {
    span: Span,
    name: SmolStr,
    attributes: Vec<Attribute>,
    self_closing: bool,
}

impl StartTag {
    fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attr| attr.name.as_str() == name)
    }
}

/// How a run of children ended.
enum ChildrenEnd {
    /// The parent's own closing tag.
    Closed(Span),
    /// A closing tag for an ancestor, left unconsumed.
    Implicit,
    /// End of input.
    Eof,
}

/// The SFC parser.
pub struct Parser<'src> {
    source: &'src str,
    pos: usize,
    /// Names of the elements currently open, innermost last.
    open: Vec<SmolStr>,
    errors: Vec<ParseError>,
}

impl<'src> Parser<'src> {
    /// Creates a new parser.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            pos: 0,
            open: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Parses the source into a document.
    pub fn parse(mut self) -> ParseResult {
        let document = self.parse_document();
        ParseResult {
            document,
            errors: self.errors,
        }
    }

    // === Cursor helpers ===

    fn rest(&self) -> &'src str {
        &self.source[self.pos..]
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn error(&mut self, kind: ParseErrorKind, span: Span) {
        self.errors.push(ParseError::new(kind, span));
    }

    /// Returns true if the cursor is at `<` followed by a tag name.
    fn at_start_tag(&self) -> bool {
        let mut chars = self.rest().chars();
        chars.next() == Some('<') && chars.next().is_some_and(|c| c.is_ascii_alphabetic())
    }

    /// Moves the cursor past the next `>` (or to EOF) and returns the new position.
    fn skip_past_gt(&mut self) -> usize {
        self.pos = match self.rest().find('>') {
            Some(i) => self.pos + i + 1,
            None => self.source.len(),
        };
        self.pos
    }

    // === Document ===

    fn parse_document(&mut self) -> SfcDocument {
        let mut document = SfcDocument {
            span: Span::from_usize(0, self.source.len()),
            ..Default::default()
        };

        while !self.at_eof() {
            let Some(next) = self.rest().find('<') else {
                break;
            };
            self.pos += next;

            if self.rest().starts_with("<!--") {
                self.parse_comment();
            } else if self.rest().starts_with("</") {
                let start = self.pos;
                let end = self.skip_past_gt();
                self.error(
                    ParseErrorKind::MismatchedClosingTag {
                        expected: "a top-level block".to_string(),
                        found: self.source[start + 2..end]
                            .trim_end_matches('>')
                            .trim()
                            .to_string(),
                    },
                    Span::from_usize(start, end),
                );
            } else if self.at_start_tag() {
                self.parse_block(&mut document);
            } else {
                self.pos += 1;
            }
        }

        document
    }

    /// Parses one top-level block.
    fn parse_block(&mut self, document: &mut SfcDocument) {
        let tag = self.parse_start_tag();
        let lowercase = tag.name.to_ascii_lowercase();

        if lowercase == "template" && document.template.is_none() {
            document.template = Some(self.parse_template_block(tag));
            return;
        }

        let (content_span, end) = if tag.self_closing {
            (Span::empty(tag.span.end), u32::from(tag.span.end) as usize)
        } else {
            self.read_raw_content(&tag.name)
        };
        let span = Span::from_usize(u32::from(tag.span.start) as usize, end);

        match lowercase.as_str() {
            "script" => {
                let lang = ScriptLang::from_lang(tag.attribute("lang").and_then(Attribute::value_str));
                let setup = tag.attribute("setup").is_some();
                let content = content_span.slice(self.source).unwrap_or_default().to_string();
                document.scripts.push(ScriptBlock {
                    span,
                    content_span,
                    content,
                    lang,
                    setup,
                    attributes: tag.attributes,
                });
            }
            "style" => document.styles.push(RawBlock {
                name: tag.name,
                span,
                content_span,
                attributes: tag.attributes,
            }),
            _ => document.custom_blocks.push(RawBlock {
                name: tag.name,
                span,
                content_span,
                attributes: tag.attributes,
            }),
        }
    }

    fn parse_template_block(&mut self, tag: StartTag) -> TemplateBlock {
        let lang = tag
            .attribute("lang")
            .and_then(Attribute::value_str)
            .map(SmolStr::new);
        let is_html = lang
            .as_deref()
            .map_or(true, |lang| lang.eq_ignore_ascii_case("html"));
        let start = tag.span.start;

        if tag.self_closing {
            return TemplateBlock {
                span: tag.span,
                content_span: Span::empty(tag.span.end),
                lang,
                attributes: tag.attributes,
                children: Vec::new(),
            };
        }

        if !is_html {
            let (content_span, end) = self.read_raw_content(&tag.name);
            return TemplateBlock {
                span: Span::new(start, end as u32),
                content_span,
                lang,
                attributes: tag.attributes,
                children: Vec::new(),
            };
        }

        self.open.push(tag.name.clone());
        let (children, ending) = self.parse_children(&tag.name);
        self.open.pop();

        let (content_end, end) = match ending {
            ChildrenEnd::Closed(closing) => (closing.start, closing.end),
            ChildrenEnd::Implicit | ChildrenEnd::Eof => {
                let here = TextSize::from(self.pos as u32);
                (here, here)
            }
        };

        TemplateBlock {
            span: Span::new(start, end),
            content_span: Span::new(tag.span.end, content_end),
            lang,
            attributes: tag.attributes,
            children,
        }
    }

    /// Reads raw content up to `</name`, returning the content span and the
    /// offset just past the closing tag.
    fn read_raw_content(&mut self, name: &str) -> (Span, usize) {
        let content_start = self.pos;
        let needle = format!("</{name}");

        match find_ascii_ci(self.rest(), &needle) {
            Some(i) => {
                let content_end = content_start + i;
                self.pos = content_end;
                let end = self.skip_past_gt();
                (Span::from_usize(content_start, content_end), end)
            }
            None => {
                self.error(
                    ParseErrorKind::UnclosedTag {
                        tag_name: name.to_string(),
                    },
                    Span::from_usize(content_start, self.source.len()),
                );
                self.pos = self.source.len();
                (Span::from_usize(content_start, self.pos), self.pos)
            }
        }
    }

    // === Template body ===

    fn parse_children(&mut self, parent: &str) -> (Vec<TemplateNode>, ChildrenEnd) {
        let mut children = Vec::new();

        loop {
            if self.at_eof() {
                self.error(
                    ParseErrorKind::UnclosedTag {
                        tag_name: parent.to_string(),
                    },
                    Span::empty(self.pos as u32),
                );
                return (children, ChildrenEnd::Eof);
            }

            let rest = self.rest();
            if rest.starts_with("<!--") {
                children.push(self.parse_comment());
            } else if rest.starts_with("</") {
                if let Some(end) = self.parse_end_tag(parent) {
                    return (children, end);
                }
            } else if self.at_start_tag() {
                children.push(TemplateNode::Element(self.parse_element()));
            } else {
                children.push(self.parse_text());
            }
        }
    }

    /// Handles an end tag inside `parent`. Returns `Some` when the run of
    /// children ends here.
    fn parse_end_tag(&mut self, parent: &str) -> Option<ChildrenEnd> {
        let start = self.pos;
        let name_len = self.rest()[2..]
            .find(|c: char| c.is_ascii_whitespace() || c == '>')
            .unwrap_or(self.rest().len() - 2);
        let name = &self.source[start + 2..start + 2 + name_len];

        if name.eq_ignore_ascii_case(parent) {
            let end = self.skip_past_gt();
            return Some(ChildrenEnd::Closed(Span::from_usize(start, end)));
        }

        if self
            .open
            .iter()
            .any(|open| open.eq_ignore_ascii_case(name))
        {
            self.error(
                ParseErrorKind::UnclosedTag {
                    tag_name: parent.to_string(),
                },
                Span::from_usize(start, start + 2 + name_len),
            );
            return Some(ChildrenEnd::Implicit);
        }

        let found = name.to_string();
        let end = self.skip_past_gt();
        self.error(
            ParseErrorKind::MismatchedClosingTag {
                expected: parent.to_string(),
                found,
            },
            Span::from_usize(start, end),
        );
        None
    }

    fn parse_element(&mut self) -> Element {
        let tag = self.parse_start_tag();
        let start = tag.span.start;

        if tag.self_closing || is_void_element(&tag.name) {
            return Element {
                span: tag.span,
                name: tag.name,
                attributes: tag.attributes,
                children: Vec::new(),
                self_closing: true,
            };
        }

        if is_raw_text_element(&tag.name) {
            let (content_span, end) = self.read_raw_content(&tag.name);
            let value = content_span.slice(self.source).unwrap_or_default().to_string();
            return Element {
                span: Span::new(start, end as u32),
                name: tag.name,
                attributes: tag.attributes,
                children: vec![TemplateNode::Text(Text {
                    span: content_span,
                    value,
                })],
                self_closing: false,
            };
        }

        self.open.push(tag.name.clone());
        let (children, ending) = self.parse_children(&tag.name);
        self.open.pop();

        let end = match ending {
            ChildrenEnd::Closed(closing) => closing.end,
            ChildrenEnd::Implicit | ChildrenEnd::Eof => TextSize::from(self.pos as u32),
        };

        Element {
            span: Span::new(start, end),
            name: tag.name,
            attributes: tag.attributes,
            children,
            self_closing: false,
        }
    }

    fn parse_comment(&mut self) -> TemplateNode {
        let start = self.pos;
        let body_start = start + "<!--".len();

        let (data_end, end) = match self.source[body_start..].find("-->") {
            Some(i) => (body_start + i, body_start + i + "-->".len()),
            None => {
                self.error(
                    ParseErrorKind::UnterminatedComment,
                    Span::from_usize(start, self.source.len()),
                );
                (self.source.len(), self.source.len())
            }
        };
        self.pos = end;

        TemplateNode::Comment(Comment {
            span: Span::from_usize(start, end),
            data: self.source[body_start..data_end].to_string(),
        })
    }

    fn parse_text(&mut self) -> TemplateNode {
        let start = self.pos;
        // A `<` that does not open a tag, comment or end tag is plain text.
        let first = self.rest().chars().next().map_or(1, char::len_utf8);
        let end = self.rest()[first..]
            .find('<')
            .map_or(self.source.len(), |i| start + first + i);
        self.pos = end;

        TemplateNode::Text(Text {
            span: Span::from_usize(start, end),
            value: self.source[start..end].to_string(),
        })
    }

    // === Tags ===

    /// Parses `<name attr=value ...>` with the cursor on `<`.
    fn parse_start_tag(&mut self) -> StartTag {
        let start = self.pos;
        let name_start = start + 1;
        let name_len = self.source[name_start..]
            .find(|c: char| c.is_ascii_whitespace() || c == '/' || c == '>')
            .unwrap_or(self.source.len() - name_start);
        let name = SmolStr::new(&self.source[name_start..name_start + name_len]);

        let tokens: Vec<Token> = Lexer::new(self.source, name_start + name_len).collect();
        let mut attributes = Vec::new();
        let mut self_closing = false;
        let mut end = self.source.len();
        let mut i = 0;

        while let Some(token) = tokens.get(i) {
            match token.kind {
                TokenKind::RAngle | TokenKind::SlashRAngle => {
                    self_closing = token.kind == TokenKind::SlashRAngle;
                    end = u32::from(token.span.end) as usize;
                    break;
                }
                TokenKind::Eof => {
                    self.error(
                        ParseErrorKind::UnclosedTag {
                            tag_name: name.to_string(),
                        },
                        Span::from_usize(start, self.source.len()),
                    );
                    break;
                }
                TokenKind::Word => {
                    let (attribute, consumed) = self.parse_attribute(&tokens[i..]);
                    attributes.push(attribute);
                    i += consumed;
                    continue;
                }
                TokenKind::Slash => {}
                TokenKind::Eq
                | TokenKind::DoubleQuoted
                | TokenKind::SingleQuoted
                | TokenKind::Error => {
                    self.error(
                        ParseErrorKind::InvalidAttribute {
                            message: format!("unexpected {}", token.kind.name()),
                        },
                        token.span,
                    );
                }
            }
            i += 1;
        }

        self.pos = end;
        StartTag {
            span: Span::from_usize(start, end),
            name,
            attributes,
            self_closing,
        }
    }

    /// Parses one attribute from `tokens`, which starts with its name.
    /// Returns the attribute and the number of tokens consumed.
    fn parse_attribute(&mut self, tokens: &[Token]) -> (Attribute, usize) {
        let name_token = &tokens[0];
        let raw_name = SmolStr::new(name_token.span.slice(self.source).unwrap_or_default());
        let name = SmolStr::new(raw_name.to_ascii_lowercase());

        let boolean = |raw_name: SmolStr, name: SmolStr| Attribute {
            span: name_token.span,
            name,
            raw_name,
            value: None,
        };

        if tokens.get(1).map(|t| t.kind) != Some(TokenKind::Eq) {
            return (boolean(raw_name, name), 1);
        }

        let Some(value_token) = tokens.get(2) else {
            return (boolean(raw_name, name), 2);
        };

        let text = value_token.span.slice(self.source).unwrap_or_default();
        let (value, quote) = match value_token.kind {
            TokenKind::DoubleQuoted => (&text[1..text.len() - 1], Some('"')),
            TokenKind::SingleQuoted => (&text[1..text.len() - 1], Some('\'')),
            TokenKind::Word => (text, None),
            _ => {
                self.error(
                    ParseErrorKind::InvalidAttribute {
                        message: format!("missing value for `{raw_name}`"),
                    },
                    value_token.span,
                );
                return (boolean(raw_name, name), 2);
            }
        };

        let attribute = Attribute {
            span: Span::new(name_token.span.start, value_token.span.end),
            name,
            raw_name,
            value: Some(AttributeValue {
                span: value_token.span,
                value: value.to_string(),
                quote,
            }),
        };
        (attribute, 3)
    }
}
