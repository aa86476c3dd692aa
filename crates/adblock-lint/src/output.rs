//! Output formatting.

use crate::cli::OutputFormat;
use adblock_rules::{Diagnostic, Rule, Severity};
use camino::Utf8Path;
use serde::Serialize;
use source_map::{LineCol, LineIndex};

/// A formatted diagnostic for output.
#[derive(Debug, Serialize)]
pub struct FormattedDiagnostic {
    /// The diagnostic type (Error, Warning, etc.).
    #[serde(rename = "type")]
    pub diagnostic_type: String,
    /// The file path.
    pub filename: String,
    /// The start position.
    pub start: Position,
    /// The end position.
    pub end: Position,
    /// The message.
    pub message: String,
    /// The diagnostic code.
    pub code: String,
    /// The rule that produced it.
    pub rule: String,
}

/// A position in the source.
#[derive(Debug, Serialize)]
pub struct Position {
    /// 1-indexed line number.
    pub line: u32,
    /// 1-indexed column number.
    pub column: u32,
    /// Byte offset.
    pub offset: u32,
}

/// Formats diagnostics for output.
pub struct Formatter {
    format: OutputFormat,
    rule: &'static str,
}

impl Formatter {
    /// Creates a new formatter for diagnostics of the named rule.
    pub fn new(format: OutputFormat, rule: &'static str) -> Self {
        Self { format, rule }
    }

    /// Formats a collection of diagnostics as text. JSON output is collected
    /// separately with [`Formatter::format_json_diagnostics`].
    pub fn format(&self, diagnostics: &[Diagnostic], file_path: &Utf8Path, source: &str) -> String {
        match self.format {
            OutputFormat::Human => self.format_human(diagnostics, file_path, source, false),
            OutputFormat::HumanVerbose => self.format_human(diagnostics, file_path, source, true),
            OutputFormat::Json => {
                let formatted = self.format_json_diagnostics(diagnostics, file_path, source);
                serde_json::to_string_pretty(&formatted).unwrap_or_default()
            }
            OutputFormat::Machine => self.format_machine(diagnostics, file_path, source),
        }
    }

    fn format_human(
        &self,
        diagnostics: &[Diagnostic],
        file_path: &Utf8Path,
        source: &str,
        snippets: bool,
    ) -> String {
        let line_index = LineIndex::new(source);
        let lines: Vec<&str> = source.lines().collect();
        let mut output = String::new();

        for diag in diagnostics {
            let start = start_of(&line_index, diag);
            let (line, column) = start.one_based();

            output.push_str(&format!(
                "{}:{}:{}\n{}: {} ({}/{})\n",
                file_path,
                line,
                column,
                diag.severity.as_str(),
                diag.message,
                self.rule,
                diag.code
            ));

            if snippets {
                if let Some(text) = lines.get(start.line as usize) {
                    let gutter = line.to_string();
                    output.push_str(&format!("  {} | {}\n", gutter, text));
                    output.push_str(&format!(
                        "  {} | {}^\n",
                        " ".repeat(gutter.len()),
                        " ".repeat(start.col as usize)
                    ));
                }
            }

            output.push('\n');
        }

        output
    }

    /// Formats diagnostics into JSON-ready structs.
    pub fn format_json_diagnostics(
        &self,
        diagnostics: &[Diagnostic],
        file_path: &Utf8Path,
        source: &str,
    ) -> Vec<FormattedDiagnostic> {
        let line_index = LineIndex::new(source);
        diagnostics
            .iter()
            .map(|diag| {
                let (start_line, start_column) = start_of(&line_index, diag).one_based();
                let (end_line, end_column) = end_of(&line_index, diag).one_based();

                FormattedDiagnostic {
                    diagnostic_type: diag.severity.as_str().to_string(),
                    filename: file_path.to_string(),
                    start: Position {
                        line: start_line,
                        column: start_column,
                        offset: u32::from(diag.span.start),
                    },
                    end: Position {
                        line: end_line,
                        column: end_column,
                        offset: u32::from(diag.span.end),
                    },
                    message: diag.message.clone(),
                    code: diag.code.to_string(),
                    rule: self.rule.to_string(),
                }
            })
            .collect()
    }

    fn format_machine(
        &self,
        diagnostics: &[Diagnostic],
        file_path: &Utf8Path,
        source: &str,
    ) -> String {
        let line_index = LineIndex::new(source);
        let mut output = String::new();

        for diag in diagnostics {
            let (start_line, start_column) = start_of(&line_index, diag).one_based();
            let (end_line, end_column) = end_of(&line_index, diag).one_based();

            let severity = match diag.severity {
                Severity::Error => "ERROR",
                Severity::Warning => "WARNING",
            };

            output.push_str(&format!(
                "{} {}:{}:{}:{}:{} {} ({})\n",
                severity,
                file_path,
                start_line,
                start_column,
                end_line,
                end_column,
                diag.message,
                diag.code
            ));
        }

        output
    }
}

fn start_of(line_index: &LineIndex, diag: &Diagnostic) -> LineCol {
    line_index
        .line_col(diag.span.start)
        .unwrap_or(LineCol::new(0, 0))
}

fn end_of(line_index: &LineIndex, diag: &Diagnostic) -> LineCol {
    line_index
        .line_col(diag.span.end)
        .unwrap_or(LineCol::new(0, 0))
}

/// Summary of a check run.
#[derive(Debug, Default)]
pub struct CheckSummary {
    /// Number of files checked.
    pub file_count: usize,
    /// Number of errors.
    pub error_count: usize,
    /// Number of warnings.
    pub warning_count: usize,
    /// Whether to fail on warnings.
    pub fail_on_warnings: bool,
}

impl CheckSummary {
    /// Returns true if the run should exit with a failure status.
    pub fn failed(&self) -> bool {
        self.error_count > 0 || (self.warning_count > 0 && self.fail_on_warnings)
    }

    /// Formats the summary line.
    pub fn format(&self) -> String {
        format!(
            "====================================\nadblock-lint found {} and {} in {}",
            plural(self.error_count, "error"),
            plural(self.warning_count, "warning"),
            plural(self.file_count, "file"),
        )
    }
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}

/// Formats the metadata of every rule, one block per rule.
pub fn format_rule_list(rules: &[Box<dyn Rule>]) -> String {
    let mut output = String::new();
    for rule in rules {
        let meta = rule.meta();
        let codes: Vec<&str> = meta.messages.iter().map(|code| code.as_str()).collect();
        output.push_str(&format!(
            "{} ({}{})\n  {}\n  Category: {}\n  Reports: {}\n",
            meta.name,
            meta.kind.as_str(),
            if meta.recommended { ", recommended" } else { "" },
            meta.description,
            meta.category,
            codes.join(", "),
        ));
    }
    output
}
