//! AST types for Vue single-file components.

use crate::decode_entities;
use smol_str::SmolStr;
use source_map::Span;
use std::borrow::Cow;

/// A parsed `.vue` file.
#[derive(Debug, Clone, Default)]
pub struct SfcDocument {
    /// The first top-level `<template>` block.
    pub template: Option<TemplateBlock>,
    /// Every top-level `<script>` block, in source order.
    pub scripts: Vec<ScriptBlock>,
    /// Every top-level `<style>` block.
    pub styles: Vec<RawBlock>,
    /// Any other top-level block (`<i18n>`, `<docs>`, ...).
    pub custom_blocks: Vec<RawBlock>,
    /// The span of the entire document.
    pub span: Span,
}

/// The `<template>` block.
#[derive(Debug, Clone)]
pub struct TemplateBlock {
    /// The span of the block including its tags.
    pub span: Span,
    /// The span between the opening and closing tags.
    pub content_span: Span,
    /// The `lang` attribute, if any.
    pub lang: Option<SmolStr>,
    /// Attributes on the `<template>` tag.
    pub attributes: Vec<Attribute>,
    /// The template body. Empty when the body is not HTML.
    pub children: Vec<TemplateNode>,
}

impl TemplateBlock {
    /// Returns true if the body is HTML (no `lang`, or `lang="html"`).
    pub fn is_html(&self) -> bool {
        self.lang
            .as_deref()
            .map_or(true, |lang| lang.eq_ignore_ascii_case("html"))
    }

    /// Iterates over every element of the body, depth-first in source order.
    pub fn elements(&self) -> Elements<'_> {
        Elements::new(&self.children)
    }
}

/// A `<script>` block.
#[derive(Debug, Clone)]
pub struct ScriptBlock {
    /// The span of the block including its tags.
    pub span: Span,
    /// The span of just the script content.
    pub content_span: Span,
    /// The raw content of the script.
    pub content: String,
    /// The script language, from the `lang` attribute.
    pub lang: ScriptLang,
    /// Whether this is `<script setup>`.
    pub setup: bool,
    /// Attributes on the script tag.
    pub attributes: Vec<Attribute>,
}

/// The language of a script block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScriptLang {
    /// JavaScript (default).
    #[default]
    JavaScript,
    /// JavaScript with JSX.
    Jsx,
    /// TypeScript.
    TypeScript,
    /// TypeScript with JSX.
    Tsx,
}

impl ScriptLang {
    /// Maps a `lang` attribute value to a script language.
    pub fn from_lang(lang: Option<&str>) -> Self {
        match lang.map(str::to_ascii_lowercase).as_deref() {
            Some("ts") | Some("typescript") => ScriptLang::TypeScript,
            Some("tsx") => ScriptLang::Tsx,
            Some("jsx") => ScriptLang::Jsx,
            _ => ScriptLang::JavaScript,
        }
    }

    /// Returns true for TypeScript flavours.
    pub fn is_typescript(self) -> bool {
        matches!(self, ScriptLang::TypeScript | ScriptLang::Tsx)
    }
}

/// A top-level block whose content is kept verbatim.
#[derive(Debug, Clone)]
pub struct RawBlock {
    /// The tag name.
    pub name: SmolStr,
    /// The span of the block including its tags.
    pub span: Span,
    /// The span of the content.
    pub content_span: Span,
    /// Attributes on the opening tag.
    pub attributes: Vec<Attribute>,
}

/// A node in the template body.
#[derive(Debug, Clone)]
pub enum TemplateNode {
    /// An element or component.
    Element(Element),
    /// Text content, including `{{ }}` interpolations.
    Text(Text),
    /// An HTML comment.
    Comment(Comment),
}

/// An element or component in the template.
#[derive(Debug, Clone)]
pub struct Element {
    /// The span from `<` of the start tag to `>` of the end tag.
    pub span: Span,
    /// The tag name as written.
    pub name: SmolStr,
    /// The attributes, in source order.
    pub attributes: Vec<Attribute>,
    /// The child nodes.
    pub children: Vec<TemplateNode>,
    /// Whether the element has no end tag (`/>` or a void element).
    pub self_closing: bool,
}

impl Element {
    /// Returns the first attribute with the given (lowercase) name.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attr| attr.name.as_str() == name)
    }
}

/// Text content.
#[derive(Debug, Clone)]
pub struct Text {
    /// The span of the text.
    pub span: Span,
    /// The raw text.
    pub value: String,
}

/// An HTML comment.
#[derive(Debug, Clone)]
pub struct Comment {
    /// The span including `<!--` and `-->`.
    pub span: Span,
    /// The comment body.
    pub data: String,
}

/// An attribute on an element or block tag.
#[derive(Debug, Clone)]
pub struct Attribute {
    /// The span of the whole attribute.
    pub span: Span,
    /// The ASCII-lowercased name, used for lookups.
    pub name: SmolStr,
    /// The name as written.
    pub raw_name: SmolStr,
    /// The value, absent for boolean attributes like `disabled`.
    pub value: Option<AttributeValue>,
}

impl Attribute {
    /// Returns true for Vue directives (`v-if`, `:class`, `@click`, `#default`).
    pub fn is_directive(&self) -> bool {
        self.name.starts_with("v-")
            || self.name.starts_with(':')
            || self.name.starts_with('@')
            || self.name.starts_with('#')
    }

    /// Returns the value text, if any.
    pub fn value_str(&self) -> Option<&str> {
        self.value.as_ref().map(|v| v.value.as_str())
    }
}

/// The value of an attribute.
#[derive(Debug, Clone)]
pub struct AttributeValue {
    /// The span of the value, including quotes.
    pub span: Span,
    /// The value without quotes.
    pub value: String,
    /// The quote character, or `None` for an unquoted value.
    pub quote: Option<char>,
}

impl AttributeValue {
    /// Returns the value with character references decoded.
    pub fn decoded(&self) -> Cow<'_, str> {
        decode_entities(&self.value)
    }
}

/// Depth-first iterator over the elements of a template body.
pub struct Elements<'a> {
    stack: Vec<std::slice::Iter<'a, TemplateNode>>,
}

impl<'a> Elements<'a> {
    fn new(nodes: &'a [TemplateNode]) -> Self {
        Self {
            stack: vec![nodes.iter()],
        }
    }
}

impl<'a> Iterator for Elements<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(iter) = self.stack.last_mut() {
            match iter.next() {
                Some(TemplateNode::Element(element)) => {
                    self.stack.push(element.children.iter());
                    return Some(element);
                }
                Some(_) => {}
                None => {
                    self.stack.pop();
                }
            }
        }
        None
    }
}
