//! Lint rules for CSS ids and classes that ad blockers hide.
//!
//! The [`Rule`] trait is the contract between a rule and a host. The host
//! driver in this crate, [`lint_source`], parses one file (plain scripts with
//! SWC, `.vue` components with [`vue_parser`]) and feeds every registered rule
//! the nodes it asked for.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use adblock_rules::{lint_source, BanAdblockSelectors, HostCapabilities, Rule};
//! use selector_list::{ForbiddenSelectorSet, SelectorArtifact};
//!
//! let selectors = ForbiddenSelectorSet::from_artifact(SelectorArtifact {
//!     id: vec!["AC_ad".into()],
//!     class: vec!["AD-POST".into()],
//! });
//! let rules: Vec<Box<dyn Rule>> = vec![Box::new(BanAdblockSelectors::new(Arc::new(selectors)))];
//!
//! let diagnostics = lint_source("main.js", "const id = 'AC_ad'", &rules, HostCapabilities::full());
//! assert_eq!(diagnostics.len(), 1);
//! assert_eq!(diagnostics[0].message, "ID 'AC_ad' is forbidden.");
//! ```

mod ban_adblock_selectors;
mod diagnostic;
mod rule;
mod script;

pub use ban_adblock_selectors::BanAdblockSelectors;
pub use diagnostic::{Diagnostic, DiagnosticCode, Severity};
pub use rule::{
    FileKind, HostCapabilities, NodeCategory, Registration, Rule, RuleContext, RuleKind, RuleMeta,
};
pub use script::{collect_candidates, ScriptCandidate, ScriptCandidates, ScriptParseError};

use selector_list::ForbiddenSelectorSet;
use std::sync::Arc;
use vue_parser::{ScriptLang, TemplateBlock};

/// Returns every rule this crate provides, configured with `selectors`.
pub fn all_rules(selectors: Arc<ForbiddenSelectorSet>) -> Vec<Box<dyn Rule>> {
    vec![Box::new(BanAdblockSelectors::new(selectors))]
}

/// Lints one file and returns its diagnostics, sorted by position.
///
/// Files whose extension is not in [`FileKind::EXTENSIONS`] produce nothing.
pub fn lint_source(
    filename: &str,
    source: &str,
    rules: &[Box<dyn Rule>],
    capabilities: HostCapabilities,
) -> Vec<Diagnostic> {
    let Some(file_kind) = FileKind::from_path(filename) else {
        tracing::debug!(filename, "skipping file with unknown extension");
        return Vec::new();
    };

    let mut ctx = RuleContext::new(filename, file_kind, capabilities);
    let registrations: Vec<Registration> =
        rules.iter().map(|rule| rule.register(&mut ctx)).collect();
    let mut driver = Driver {
        rules,
        registrations: &registrations,
        ctx,
    };

    match file_kind {
        FileKind::Script(lang) => driver.script(source, lang, 0),
        FileKind::Vue => {
            let result = vue_parser::parse(source);
            for error in &result.errors {
                tracing::debug!(filename, %error, "recovered from template error");
            }
            for block in &result.document.scripts {
                driver.script(&block.content, block.lang, u32::from(block.content_span.start));
            }
            if capabilities.template_body {
                if let Some(template) = &result.document.template {
                    driver.template(template);
                }
            }
        }
    }

    let mut diagnostics = driver.ctx.into_diagnostics();
    diagnostics.sort_by_key(|d| d.span.start);
    diagnostics
}

struct Driver<'r, 'a> {
    rules: &'r [Box<dyn Rule>],
    registrations: &'r [Registration],
    ctx: RuleContext<'a>,
}

impl<'r> Driver<'r, '_> {
    fn interested(&self, category: NodeCategory) -> Vec<&'r dyn Rule> {
        let rules: &'r [Box<dyn Rule>] = self.rules;
        let registrations: &'r [Registration] = self.registrations;
        rules
            .iter()
            .zip(registrations)
            .filter(|(_, registration)| registration.contains(category))
            .map(|(rule, _)| rule.as_ref())
            .collect()
    }

    fn script(&mut self, content: &str, lang: ScriptLang, base: u32) {
        let parsed = match collect_candidates(content, lang) {
            Ok(parsed) => parsed,
            Err(err) => {
                self.ctx.report(Diagnostic::new(
                    DiagnosticCode::ParseError,
                    format!("{}: {}", DiagnosticCode::ParseError.template(), err.message),
                    err.span.shift(base),
                ));
                return;
            }
        };

        for error in &parsed.recovered {
            tracing::debug!(
                filename = self.ctx.filename(),
                offset = u32::from(error.span.start) + base,
                message = %error.message,
                "recovered from script error"
            );
        }

        for candidate in parsed.candidates {
            let span = candidate.span.shift(base);
            let rules = self.interested(candidate.category);
            for rule in rules {
                match candidate.category {
                    NodeCategory::StringLiteral => {
                        rule.string_literal(&candidate.value, span, &mut self.ctx)
                    }
                    NodeCategory::TemplateQuasi => {
                        rule.template_quasi(&candidate.value, span, &mut self.ctx)
                    }
                    NodeCategory::TemplateAttribute => {}
                }
            }
        }
    }

    fn template(&mut self, template: &TemplateBlock) {
        let rules = self.interested(NodeCategory::TemplateAttribute);
        if rules.is_empty() || !template.is_html() {
            return;
        }
        let root = template.attributes.iter().map(|attribute| ("template", attribute));
        let body = template.elements().flat_map(|element| {
            element
                .attributes
                .iter()
                .map(move |attribute| (element.name.as_str(), attribute))
        });
        for (element, attribute) in root.chain(body).filter(|(_, a)| !a.is_directive()) {
            for rule in &rules {
                rule.template_attribute(element, attribute, &mut self.ctx);
            }
        }
    }
}
