//! Diagnostic types.

use smol_str::SmolStr;
use source_map::Span;

/// A diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The diagnostic code.
    pub code: DiagnosticCode,
    /// The severity level.
    pub severity: Severity,
    /// The rendered message.
    pub message: String,
    /// The source location.
    pub span: Span,
    /// The offending selector name, for forbidden-selector diagnostics.
    pub name: Option<SmolStr>,
}

impl Diagnostic {
    /// Creates a new diagnostic with the code's default severity.
    pub fn new(code: DiagnosticCode, message: impl Into<String>, span: Span) -> Self {
        Self {
            severity: code.default_severity(),
            code,
            message: message.into(),
            span,
            name: None,
        }
    }

    /// Creates a diagnostic whose message interpolates `name` into the
    /// code's template.
    pub fn with_name(code: DiagnosticCode, name: &str, span: Span) -> Self {
        let message = code.template().replace("{name}", name);
        Self {
            name: Some(SmolStr::new(name)),
            ..Self::new(code, message, span)
        }
    }

    /// Returns true for [`Severity::Error`].
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// The severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Something the operator should look at.
    Warning,
    /// A rule violation.
    Error,
}

impl Severity {
    /// Returns the severity as a display string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Warning => "Warning",
            Severity::Error => "Error",
        }
    }
}

/// Diagnostic codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    /// `forbiddenId`: a string equal to a forbidden element id.
    ForbiddenId,
    /// `forbiddenClass`: a string or class token equal to a forbidden class.
    ForbiddenClass,
    /// `templateParserUnavailable`: a `.vue` file linted without template support.
    TemplateParserUnavailable,
    /// `parseError`: a script block that could not be parsed.
    ParseError,
}

impl DiagnosticCode {
    /// Returns the default severity for this diagnostic code.
    pub fn default_severity(&self) -> Severity {
        match self {
            DiagnosticCode::ForbiddenId
            | DiagnosticCode::ForbiddenClass
            | DiagnosticCode::ParseError => Severity::Error,
            DiagnosticCode::TemplateParserUnavailable => Severity::Warning,
        }
    }

    /// Returns the message template; `{name}` is replaced by the offending name.
    ///
    /// The parse error template is a prefix for the parser's message.
    pub fn template(&self) -> &'static str {
        match self {
            DiagnosticCode::ForbiddenId => "ID '{name}' is forbidden.",
            DiagnosticCode::ForbiddenClass => "Class '{name}' is forbidden.",
            DiagnosticCode::TemplateParserUnavailable => {
                "Use the latest template parser to lint `<template>` blocks; \
                 the current host cannot visit template bodies."
            }
            DiagnosticCode::ParseError => "Parsing error",
        }
    }

    /// Returns the diagnostic code as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCode::ForbiddenId => "forbiddenId",
            DiagnosticCode::ForbiddenClass => "forbiddenClass",
            DiagnosticCode::TemplateParserUnavailable => "templateParserUnavailable",
            DiagnosticCode::ParseError => "parseError",
        }
    }
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
