//! Main orchestration logic.

use crate::cli::{Args, OutputFormat, Threshold};
use crate::config::LintConfig;
use crate::output::{CheckSummary, FormattedDiagnostic, Formatter};
use adblock_rules::{all_rules, lint_source, HostCapabilities, Rule, Severity};
use camino::{Utf8Path, Utf8PathBuf};
use globset::{Glob, GlobSet, GlobSetBuilder};
use rayon::prelude::*;
use selector_list::{ForbiddenSelectorSet, SelectorListError};
use std::fs;
use std::sync::Arc;
use thiserror::Error;
use walkdir::WalkDir;

/// Glob patterns that are never linted.
const DEFAULT_IGNORES: &[&str] = &[
    "**/node_modules/**",
    "**/dist/**",
    "**/.git/**",
    "**/target/**",
];

/// Orchestration errors.
#[derive(Debug, Error, miette::Diagnostic)]
pub enum OrchestratorError {
    /// The workspace path could not be resolved.
    #[error("invalid workspace {path}: {message}")]
    #[diagnostic(code(adblock_lint::workspace))]
    InvalidWorkspace { path: Utf8PathBuf, message: String },

    /// Invalid glob pattern.
    #[error("invalid glob pattern: {0}")]
    #[diagnostic(code(adblock_lint::glob))]
    InvalidGlob(String),

    /// The selector list could not be loaded.
    #[error("failed to load selector list: {0}")]
    #[diagnostic(
        code(adblock_lint::selectors),
        help("regenerate the list with `easylist-gen` or pass a valid `--selectors` file")
    )]
    Selectors(#[from] SelectorListError),
}

/// Runs the check on all files.
pub fn run(args: &Args) -> Result<CheckSummary, OrchestratorError> {
    let workspace = resolve_workspace(&args.workspace)?;
    let config = LintConfig::load(&workspace);

    let ignore_set = build_ignore_set(args.ignore.iter().chain(&config.ignore))?;
    let selectors = load_selectors(args, &config, &workspace)?;
    let capabilities = if args.no_template_parser || config.template_parser == Some(false) {
        HostCapabilities::script_only()
    } else {
        HostCapabilities::full()
    };
    let rules = all_rules(Arc::new(selectors));

    let files = find_files(&workspace, &config.file_extensions(), &ignore_set);
    tracing::debug!(count = files.len(), %workspace, "collected files");

    let summary = check_files(args, &workspace, &files, &rules, capabilities);
    Ok(summary)
}

fn resolve_workspace(path: &Utf8Path) -> Result<Utf8PathBuf, OrchestratorError> {
    if !path.is_relative() {
        return Ok(path.to_path_buf());
    }
    let invalid = |message: String| OrchestratorError::InvalidWorkspace {
        path: path.to_path_buf(),
        message,
    };
    let current = std::env::current_dir().map_err(|e| invalid(e.to_string()))?;
    let current = Utf8PathBuf::try_from(current).map_err(|e| invalid(e.to_string()))?;
    Ok(current.join(path))
}

fn build_ignore_set<'a>(
    patterns: impl Iterator<Item = &'a String>,
) -> Result<GlobSet, OrchestratorError> {
    let mut ignore_builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| OrchestratorError::InvalidGlob(e.to_string()))?;
        ignore_builder.add(glob);
    }

    for pattern in DEFAULT_IGNORES {
        if let Ok(glob) = Glob::new(pattern) {
            ignore_builder.add(glob);
        }
    }

    ignore_builder
        .build()
        .map_err(|e| OrchestratorError::InvalidGlob(e.to_string()))
}

fn load_selectors(
    args: &Args,
    config: &LintConfig,
    workspace: &Utf8Path,
) -> Result<ForbiddenSelectorSet, OrchestratorError> {
    let path = match (&args.selectors, &config.selectors) {
        (Some(path), _) => Some(path.clone()),
        (None, Some(path)) => Some(workspace.join(path)),
        (None, None) => None,
    };

    let selectors = match path {
        Some(path) => {
            tracing::debug!(%path, "loading selector list");
            ForbiddenSelectorSet::load(&path)?
        }
        None => ForbiddenSelectorSet::bundled()?,
    };
    tracing::debug!(count = selectors.len(), "loaded selectors");
    Ok(selectors)
}

fn find_files(workspace: &Utf8Path, extensions: &[String], ignore_set: &GlobSet) -> Vec<Utf8PathBuf> {
    WalkDir::new(workspace)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| Utf8PathBuf::try_from(e.into_path()).ok())
        .filter(|p| {
            p.extension()
                .is_some_and(|ext| extensions.iter().any(|allowed| allowed == ext))
        })
        .filter(|p| {
            let relative = p.strip_prefix(workspace).unwrap_or(p);
            !ignore_set.is_match(relative.as_str())
        })
        .collect()
}

struct FileOutput {
    text: Option<String>,
    json: Vec<FormattedDiagnostic>,
    errors: usize,
    warnings: usize,
}

fn check_files(
    args: &Args,
    workspace: &Utf8Path,
    files: &[Utf8PathBuf],
    rules: &[Box<dyn Rule>],
    capabilities: HostCapabilities,
) -> CheckSummary {
    let rule_name = rules.first().map_or("", |rule| rule.meta().name);
    let formatter = Formatter::new(args.output, rule_name);
    let output_json = args.output == OutputFormat::Json;

    let outputs: Vec<FileOutput> = files
        .par_iter()
        .filter_map(|file_path| {
            let source = match fs::read_to_string(file_path) {
                Ok(s) => s,
                Err(e) => {
                    tracing::warn!("Failed to read {}: {}", file_path, e);
                    return None;
                }
            };

            let mut diagnostics = lint_source(file_path.as_str(), &source, rules, capabilities);
            diagnostics.retain(|diag| include_severity(diag.severity, args.threshold));
            if diagnostics.is_empty() {
                return None;
            }

            let errors = diagnostics.iter().filter(|d| d.is_error()).count();
            let warnings = diagnostics
                .iter()
                .filter(|d| d.severity == Severity::Warning)
                .count();
            let relative_path = file_path.strip_prefix(workspace).unwrap_or(file_path);
            Some(FileOutput {
                text: if output_json {
                    None
                } else {
                    Some(formatter.format(&diagnostics, relative_path, &source))
                },
                json: if output_json {
                    formatter.format_json_diagnostics(&diagnostics, relative_path, &source)
                } else {
                    Vec::new()
                },
                errors,
                warnings,
            })
        })
        .collect();

    let mut summary = CheckSummary {
        file_count: files.len(),
        fail_on_warnings: args.fail_on_warnings,
        ..Default::default()
    };
    let mut json_output = Vec::new();
    for output in outputs {
        summary.error_count += output.errors;
        summary.warning_count += output.warnings;
        if let Some(text) = output.text {
            print!("{}", text);
        }
        json_output.extend(output.json);
    }

    if output_json {
        let json = serde_json::to_string_pretty(&json_output).unwrap_or_else(|_| "[]".to_string());
        println!("{}", json);
    } else {
        println!("{}", summary.format());
    }

    summary
}

fn include_severity(severity: Severity, threshold: Threshold) -> bool {
    match threshold {
        Threshold::Error => matches!(severity, Severity::Error),
        Threshold::Warning => true,
    }
}
