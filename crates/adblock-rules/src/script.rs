//! Script parsing and literal collection with SWC.

use crate::NodeCategory;
use source_map::Span;
use swc_common::{sync::Lrc, BytePos, FileName, SourceMap, Spanned};
use swc_ecma_ast::{EsVersion, Str, TplElement};
use swc_ecma_parser::{parse_file_as_module, EsSyntax, Syntax, TsSyntax};
use swc_ecma_visit::{Visit, VisitWith};
use vue_parser::ScriptLang;

/// A string found in a script, with its span relative to the script start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptCandidate {
    /// Which category of node it came from.
    pub category: NodeCategory,
    /// The decoded string value.
    pub value: String,
    /// The span of the node.
    pub span: Span,
}

/// A script that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptParseError {
    /// The parser's message.
    pub message: String,
    /// Where it failed, relative to the script start.
    pub span: Span,
}

fn syntax_for(lang: ScriptLang) -> Syntax {
    if lang.is_typescript() {
        Syntax::Typescript(TsSyntax {
            tsx: lang == ScriptLang::Tsx,
            decorators: true,
            ..Default::default()
        })
    } else {
        Syntax::Es(EsSyntax {
            jsx: true,
            decorators: true,
            ..Default::default()
        })
    }
}

/// The strings of a parsed script.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptCandidates {
    /// Candidates in source order.
    pub candidates: Vec<ScriptCandidate>,
    /// Errors the parser recovered from.
    pub recovered: Vec<ScriptParseError>,
}

/// Parses `content` and collects every string literal and cooked
/// template-literal segment, in source order.
pub fn collect_candidates(
    content: &str,
    lang: ScriptLang,
) -> Result<ScriptCandidates, ScriptParseError> {
    let cm: Lrc<SourceMap> = Default::default();
    let fm = cm.new_source_file(Lrc::new(FileName::Anon), content.to_string());
    let base = fm.start_pos;
    let to_parse_error = |err: swc_ecma_parser::error::Error| ScriptParseError {
        message: err.kind().msg().to_string(),
        span: relative_span(err.span(), base),
    };

    let mut recovered = Vec::new();
    let module = parse_file_as_module(
        &fm,
        syntax_for(lang),
        EsVersion::Es2022,
        None,
        &mut recovered,
    )
    .map_err(to_parse_error)?;

    let mut collector = LiteralCollector {
        base,
        candidates: Vec::new(),
    };
    module.visit_with(&mut collector);
    Ok(ScriptCandidates {
        candidates: collector.candidates,
        recovered: recovered.into_iter().map(to_parse_error).collect(),
    })
}

fn relative_span(span: swc_common::Span, base: BytePos) -> Span {
    Span::new(span.lo.0.saturating_sub(base.0), span.hi.0.saturating_sub(base.0))
}

struct LiteralCollector {
    base: BytePos,
    candidates: Vec<ScriptCandidate>,
}

impl Visit for LiteralCollector {
    fn visit_str(&mut self, node: &Str) {
        // Strings holding lone surrogates have no UTF-8 value.
        if let Some(value) = node.value.as_str() {
            self.candidates.push(ScriptCandidate {
                category: NodeCategory::StringLiteral,
                value: value.to_string(),
                span: relative_span(node.span, self.base),
            });
        }
    }

    fn visit_tpl_element(&mut self, node: &TplElement) {
        // No cooked value means an invalid escape in a tagged template.
        if let Some(cooked) = node.cooked.as_ref().and_then(|cooked| cooked.as_str()) {
            self.candidates.push(ScriptCandidate {
                category: NodeCategory::TemplateQuasi,
                value: cooked.to_string(),
                span: relative_span(node.span, self.base),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn values(content: &str, lang: ScriptLang) -> Vec<(NodeCategory, String)> {
        collect_candidates(content, lang)
            .unwrap()
            .candidates
            .into_iter()
            .map(|c| (c.category, c.value))
            .collect()
    }

    #[test]
    fn test_string_literal_span_includes_quotes() {
        let source = "const x = 'AC_ad'";
        let candidates = collect_candidates(source, ScriptLang::JavaScript)
            .unwrap()
            .candidates;
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].value, "AC_ad");
        assert_eq!(candidates[0].span.slice(source), Some("'AC_ad'"));
    }

    #[test]
    fn test_template_quasis() {
        assert_eq!(
            values("const x = `AC_ad${y}AD-POST`", ScriptLang::JavaScript),
            vec![
                (NodeCategory::TemplateQuasi, "AC_ad".to_string()),
                (NodeCategory::TemplateQuasi, "AD-POST".to_string()),
            ]
        );
    }

    #[test]
    fn test_escapes_are_decoded() {
        assert_eq!(
            values(r#"const x = "AC\u005Fad""#, ScriptLang::JavaScript),
            vec![(NodeCategory::StringLiteral, "AC_ad".to_string())]
        );
    }

    #[test]
    fn test_non_string_literals_are_ignored() {
        assert!(values("let AC_ad = 2; const n = 1n; const r = /AC_ad/", ScriptLang::JavaScript).is_empty());
    }

    #[test]
    fn test_typescript_and_jsx() {
        assert_eq!(
            values("const el = <div className=\"AD-POST\" />", ScriptLang::Jsx),
            vec![(NodeCategory::StringLiteral, "AD-POST".to_string())]
        );
        assert_eq!(
            values("type Id = 'AC_ad'; let x: Id;", ScriptLang::TypeScript),
            vec![(NodeCategory::StringLiteral, "AC_ad".to_string())]
        );
    }

    #[test]
    fn test_recovered_errors_keep_candidates() {
        let parsed =
            collect_candidates("const n = 010; const id = 'AC_ad'", ScriptLang::JavaScript)
                .unwrap();
        assert_eq!(parsed.candidates.len(), 1);
        assert_eq!(parsed.candidates[0].value, "AC_ad");
        assert!(!parsed.recovered.is_empty());
    }

    #[test]
    fn test_parse_error() {
        let err = collect_candidates("const = ;", ScriptLang::JavaScript).unwrap_err();
        assert!(!err.message.is_empty());
        assert!(u32::from(err.span.start) <= 9);
    }
}
