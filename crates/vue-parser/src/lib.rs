//! Vue single-file component parser.
//!
//! Splits a `.vue` file into its top-level blocks and parses the
//! `<template>` body into an element tree with attributes. Script and style
//! contents are kept verbatim with their spans so callers can hand them to a
//! dedicated parser and map positions back onto the file.
//!
//! Parsing never fails: malformed markup is recovered from and reported in
//! [`ParseResult::errors`].
//!
//! # Example
//!
//! ```
//! use vue_parser::parse;
//!
//! let source = r#"
//! <template>
//!   <div id="app" class="box wide">{{ msg }}</div>
//! </template>
//! <script setup lang="ts">
//! const msg = 'hello'
//! </script>
//! "#;
//!
//! let result = parse(source);
//! let template = result.document.template.as_ref().unwrap();
//! let div = template.elements().next().unwrap();
//! assert_eq!(div.attribute("class").unwrap().value_str(), Some("box wide"));
//! assert!(result.document.scripts[0].setup);
//! ```

mod ast;
mod entities;
mod error;
mod lexer;
mod parser;

pub use ast::*;
pub use entities::decode_entities;
pub use error::{ParseError, ParseErrorKind};
pub use lexer::{Lexer, Token, TokenKind};
pub use source_map::Span;

/// The result of parsing a `.vue` file.
#[derive(Debug)]
pub struct ParseResult {
    /// The parsed document.
    pub document: SfcDocument,
    /// Errors recovered from during parsing.
    pub errors: Vec<ParseError>,
}

/// Parses a Vue single-file component.
pub fn parse(source: &str) -> ParseResult {
    parser::Parser::new(source).parse()
}
