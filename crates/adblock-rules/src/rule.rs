//! The contract between a rule and the host that drives it.
//!
//! A host parses one file, asks every rule which [`NodeCategory`]s it wants
//! through [`Rule::register`], then calls the matching callbacks for each
//! node of those categories. What the host can visit is described by
//! [`HostCapabilities`]; rules degrade when an optional capability is absent.

use crate::Diagnostic;
use camino::Utf8Path;
use source_map::Span;
use vue_parser::{Attribute, ScriptLang};

/// What kind of rule this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Code that is likely to misbehave.
    Problem,
    /// Something that could be done better.
    Suggestion,
}

impl RuleKind {
    /// Returns the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::Problem => "problem",
            RuleKind::Suggestion => "suggestion",
        }
    }
}

/// Static description of a rule.
#[derive(Debug, Clone, Copy)]
pub struct RuleMeta {
    /// The rule id, e.g. `ban-adblock-selectors`.
    pub name: &'static str,
    /// The rule kind.
    pub kind: RuleKind,
    /// One-line description.
    pub description: &'static str,
    /// Documentation category.
    pub category: &'static str,
    /// Whether the rule is on in the recommended set.
    pub recommended: bool,
    /// The diagnostic codes this rule can report.
    pub messages: &'static [crate::DiagnosticCode],
}

/// Node categories a rule can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeCategory {
    /// String literals in scripts (`'x'`, `"x"`).
    StringLiteral,
    /// Static segments of template literals (`` `x${y}` ``).
    TemplateQuasi,
    /// Attributes of elements in a `.vue` template body.
    TemplateAttribute,
}

/// Optional features the host offers for the current file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostCapabilities {
    /// The host can visit `.vue` template bodies.
    pub template_body: bool,
}

impl HostCapabilities {
    /// Every capability available.
    pub const fn full() -> Self {
        Self {
            template_body: true,
        }
    }

    /// Scripts only; template bodies are not visited.
    pub const fn script_only() -> Self {
        Self {
            template_body: false,
        }
    }
}

impl Default for HostCapabilities {
    fn default() -> Self {
        Self::full()
    }
}

/// The categories a rule asked to visit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registration {
    categories: Vec<NodeCategory>,
}

impl Registration {
    /// Registers interest in `categories`.
    pub fn new(categories: &[NodeCategory]) -> Self {
        Self {
            categories: categories.to_vec(),
        }
    }

    /// Returns true if `category` was registered.
    pub fn contains(&self, category: NodeCategory) -> bool {
        self.categories.contains(&category)
    }
}

/// The kind of file being linted, from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// A plain script file.
    Script(ScriptLang),
    /// A Vue single-file component.
    Vue,
}

impl FileKind {
    /// Extensions the host knows how to lint.
    pub const EXTENSIONS: &'static [&'static str] = &[
        "vue", "js", "jsx", "mjs", "cjs", "ts", "tsx", "mts", "cts",
    ];

    /// Determines the file kind, or `None` for files that are not linted.
    pub fn from_path(path: &str) -> Option<Self> {
        let extension = Utf8Path::new(path).extension()?;
        let kind = match extension {
            "vue" => FileKind::Vue,
            "js" | "mjs" | "cjs" => FileKind::Script(ScriptLang::JavaScript),
            "jsx" => FileKind::Script(ScriptLang::Jsx),
            "ts" | "mts" | "cts" => FileKind::Script(ScriptLang::TypeScript),
            "tsx" => FileKind::Script(ScriptLang::Tsx),
            _ => return None,
        };
        Some(kind)
    }
}

/// Per-file state handed to rule callbacks.
#[derive(Debug)]
pub struct RuleContext<'a> {
    filename: &'a str,
    file_kind: FileKind,
    capabilities: HostCapabilities,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> RuleContext<'a> {
    /// Creates a context for one file.
    pub fn new(filename: &'a str, file_kind: FileKind, capabilities: HostCapabilities) -> Self {
        Self {
            filename,
            file_kind,
            capabilities,
            diagnostics: Vec::new(),
        }
    }

    /// The path of the file being linted.
    pub fn filename(&self) -> &'a str {
        self.filename
    }

    /// The kind of file being linted.
    pub fn file_kind(&self) -> FileKind {
        self.file_kind
    }

    /// What the host can visit in this file.
    pub fn capabilities(&self) -> HostCapabilities {
        self.capabilities
    }

    /// Reports a diagnostic.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Consumes the context, returning everything reported.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

/// A lint rule.
///
/// Rules hold no per-file state; everything they report goes through the
/// [`RuleContext`].
pub trait Rule: Send + Sync {
    /// Static metadata.
    fn meta(&self) -> &RuleMeta;

    /// Declares which node categories to visit in the current file.
    ///
    /// May report diagnostics up front, e.g. when a capability it needs is
    /// missing.
    fn register(&self, ctx: &mut RuleContext<'_>) -> Registration;

    /// Called for every string literal, with its decoded value and the span
    /// of the literal including quotes.
    fn string_literal(&self, _value: &str, _span: Span, _ctx: &mut RuleContext<'_>) {}

    /// Called for every template-literal segment that has a cooked value.
    fn template_quasi(&self, _cooked: &str, _span: Span, _ctx: &mut RuleContext<'_>) {}

    /// Called for every static attribute of the root `<template>` tag and of
    /// every element in its body, with the tag name.
    fn template_attribute(
        &self,
        _element: &str,
        _attribute: &Attribute,
        _ctx: &mut RuleContext<'_>,
    ) {
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_kind_from_path() {
        assert_eq!(FileKind::from_path("src/App.vue"), Some(FileKind::Vue));
        assert_eq!(
            FileKind::from_path("src/main.ts"),
            Some(FileKind::Script(ScriptLang::TypeScript))
        );
        assert_eq!(
            FileKind::from_path("index.mjs"),
            Some(FileKind::Script(ScriptLang::JavaScript))
        );
        assert_eq!(FileKind::from_path("styles.css"), None);
        assert_eq!(FileKind::from_path("Makefile"), None);
    }

    #[test]
    fn test_every_extension_is_recognized() {
        for ext in FileKind::EXTENSIONS {
            assert!(FileKind::from_path(&format!("file.{ext}")).is_some(), "{ext}");
        }
    }

    #[test]
    fn test_registration() {
        let registration = Registration::new(&[NodeCategory::StringLiteral]);
        assert!(registration.contains(NodeCategory::StringLiteral));
        assert!(!registration.contains(NodeCategory::TemplateAttribute));
    }

    #[test]
    fn test_default_capabilities_are_full() {
        assert_eq!(HostCapabilities::default(), HostCapabilities::full());
    }
}
