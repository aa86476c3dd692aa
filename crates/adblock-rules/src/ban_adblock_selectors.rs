//! `ban-adblock-selectors`: flags ids and classes that ad blockers hide.
//!
//! Candidates are script string literals, cooked template-literal segments,
//! and the static `id` / `class` attributes of `.vue` template elements,
//! including the root `<template>` tag. Attribute values have their
//! character references decoded before lookup.
//! A candidate is reported as `forbiddenId` when it is in the id set and as
//! `forbiddenClass` when it is in the class set; a value in both sets is
//! reported twice.

use crate::{
    Diagnostic, DiagnosticCode, FileKind, NodeCategory, Registration, Rule, RuleContext, RuleKind,
    RuleMeta,
};
use selector_list::ForbiddenSelectorSet;
use source_map::Span;
use std::sync::Arc;
use vue_parser::{decode_entities, Attribute, AttributeValue};

static META: RuleMeta = RuleMeta {
    name: "ban-adblock-selectors",
    kind: RuleKind::Problem,
    description: "Disallow specific css selectors (only ids and classes right now) that might get blocked by adblockers",
    category: "Best Practices",
    recommended: true,
    messages: &[
        DiagnosticCode::ForbiddenId,
        DiagnosticCode::ForbiddenClass,
        DiagnosticCode::TemplateParserUnavailable,
    ],
};

/// The `ban-adblock-selectors` rule.
#[derive(Debug, Clone)]
pub struct BanAdblockSelectors {
    selectors: Arc<ForbiddenSelectorSet>,
}

impl BanAdblockSelectors {
    /// Creates the rule over a shared selector set.
    pub fn new(selectors: Arc<ForbiddenSelectorSet>) -> Self {
        Self { selectors }
    }

    fn check_candidate(&self, value: &str, span: Span, ctx: &mut RuleContext<'_>) {
        if self.selectors.is_forbidden_id(value) {
            ctx.report(Diagnostic::with_name(DiagnosticCode::ForbiddenId, value, span));
        }
        if self.selectors.is_forbidden_class(value) {
            ctx.report(Diagnostic::with_name(
                DiagnosticCode::ForbiddenClass,
                value,
                span,
            ));
        }
    }
}

impl Rule for BanAdblockSelectors {
    fn meta(&self) -> &RuleMeta {
        &META
    }

    fn register(&self, ctx: &mut RuleContext<'_>) -> Registration {
        if ctx.capabilities().template_body {
            return Registration::new(&[
                NodeCategory::StringLiteral,
                NodeCategory::TemplateQuasi,
                NodeCategory::TemplateAttribute,
            ]);
        }

        if ctx.file_kind() == FileKind::Vue {
            let code = DiagnosticCode::TemplateParserUnavailable;
            ctx.report(Diagnostic::new(code, code.template(), Span::empty(0u32)));
        }
        Registration::new(&[NodeCategory::StringLiteral, NodeCategory::TemplateQuasi])
    }

    fn string_literal(&self, value: &str, span: Span, ctx: &mut RuleContext<'_>) {
        self.check_candidate(value, span, ctx);
    }

    fn template_quasi(&self, cooked: &str, span: Span, ctx: &mut RuleContext<'_>) {
        self.check_candidate(cooked, span, ctx);
    }

    fn template_attribute(&self, _element: &str, attribute: &Attribute, ctx: &mut RuleContext<'_>) {
        let Some(value) = &attribute.value else {
            return;
        };

        match attribute.name.as_str() {
            "id" => {
                let id = value.decoded();
                if self.selectors.is_forbidden_id(&id) {
                    ctx.report(Diagnostic::with_name(
                        DiagnosticCode::ForbiddenId,
                        &id,
                        value.span,
                    ));
                }
            }
            "class" => {
                for (token, span) in class_tokens(value) {
                    let token = decode_entities(token);
                    if self.selectors.is_forbidden_class(&token) {
                        ctx.report(Diagnostic::with_name(
                            DiagnosticCode::ForbiddenClass,
                            &token,
                            span,
                        ));
                    }
                }
            }
            _ => {}
        }
    }
}

/// Splits a `class` value on single spaces, pairing each token with its span
/// in the file. Empty tokens from repeated spaces are kept. Tokens are raw;
/// character references are decoded per token by the caller.
fn class_tokens(value: &AttributeValue) -> impl Iterator<Item = (&str, Span)> {
    let quote_len = value.quote.map_or(0, char::len_utf8);
    let base = u32::from(value.span.start) as usize + quote_len;
    let mut offset = 0;
    value.value.split(' ').map(move |token| {
        let start = base + offset;
        offset += token.len() + 1;
        (token, Span::from_usize(start, start + token.len()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn attribute_value(source: &str) -> AttributeValue {
        let result = vue_parser::parse(source);
        let template = result.document.template.unwrap();
        let element = template.elements().next().unwrap();
        element.attribute("class").unwrap().value.clone().unwrap()
    }

    #[test]
    fn test_class_token_spans() {
        let source = r#"<template><div class="a  AD-POST"></div></template>"#;
        let value = attribute_value(source);
        let tokens: Vec<(&str, Option<&str>)> = class_tokens(&value)
            .map(|(token, span)| (token, span.slice(source)))
            .collect();
        assert_eq!(
            tokens,
            vec![
                ("a", Some("a")),
                ("", Some("")),
                ("AD-POST", Some("AD-POST")),
            ]
        );
    }

    #[test]
    fn test_unquoted_class_token_span() {
        let source = "<template><div class=AD-POST></div></template>";
        let value = attribute_value(source);
        let (token, span) = class_tokens(&value).next().unwrap();
        assert_eq!(token, "AD-POST");
        assert_eq!(span.slice(source), Some("AD-POST"));
    }

    #[test]
    fn test_meta() {
        let rule = BanAdblockSelectors::new(Arc::new(ForbiddenSelectorSet::default()));
        assert_eq!(rule.meta().name, "ban-adblock-selectors");
        assert_eq!(rule.meta().kind, RuleKind::Problem);
        assert!(rule.meta().recommended);
    }
}
