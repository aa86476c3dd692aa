//! End-to-end tests for the `adblock-lint` binary.
//!
//! Each test builds a throwaway project in a temp directory, runs the binary
//! against it and checks the output and exit status.

use pretty_assertions::assert_eq;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

// ============================================================================
// TEST INFRASTRUCTURE
// ============================================================================

/// A diagnostic from the JSON output
#[derive(Debug, Clone, Deserialize)]
#[allow(dead_code)]
struct JsonDiagnostic {
    #[serde(rename = "type")]
    diagnostic_type: String,
    filename: String,
    start: JsonPosition,
    message: String,
    code: String,
    rule: String,
}

#[derive(Debug, Clone, Deserialize)]
#[allow(dead_code)]
struct JsonPosition {
    line: u32,
    column: u32,
    offset: u32,
}

fn write_files(root: &Path, files: &[(&str, &str)]) {
    for (name, content) in files {
        let path = root.join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
}

fn run(root: &Path, extra: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_adblock-lint"))
        .arg("--workspace")
        .arg(root)
        .args(extra)
        .output()
        .expect("failed to run adblock-lint")
}

fn run_json(root: &Path, extra: &[&str]) -> (Vec<JsonDiagnostic>, Output) {
    let mut args = vec!["--output", "json"];
    args.extend_from_slice(extra);
    let output = run(root, &args);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let diagnostics = serde_json::from_str(&stdout)
        .unwrap_or_else(|e| panic!("invalid JSON output ({e}):\n{stdout}"));
    (diagnostics, output)
}

fn summary(diagnostics: &[JsonDiagnostic]) -> Vec<(String, u32, u32, String)> {
    diagnostics
        .iter()
        .map(|d| (d.filename.clone(), d.start.line, d.start.column, d.code.clone()))
        .collect()
}

const APP_VUE: &str = r#"<template>
  <div id="AC_ad" class="wrapper AD-POST">
    <span :class="'AD-POST'">ok</span>
  </div>
</template>

<script setup lang="ts">
const banner: string = 'adsbygoogle'
</script>
"#;

// ============================================================================
// TESTS
// ============================================================================

#[test]
fn clean_project_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    write_files(
        dir.path(),
        &[
            ("src/main.js", "const foo = 'bar'\nlet AC_ad = 2\n"),
            ("src/App.vue", "<template>\n  <div id=\"foo\" class=\"bar\"></div>\n</template>\n"),
        ],
    );

    let output = run(dir.path(), &[]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "{stdout}");
    assert!(stdout.contains("adblock-lint found 0 errors and 0 warnings in 2 files"));
}

#[test]
fn reports_template_and_script_violations() {
    let dir = tempfile::tempdir().unwrap();
    write_files(dir.path(), &[("src/App.vue", APP_VUE)]);

    let (diagnostics, output) = run_json(dir.path(), &[]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        summary(&diagnostics),
        vec![
            ("src/App.vue".to_string(), 2, 11, "forbiddenId".to_string()),
            ("src/App.vue".to_string(), 2, 34, "forbiddenClass".to_string()),
            ("src/App.vue".to_string(), 8, 24, "forbiddenClass".to_string()),
        ]
    );
    assert_eq!(diagnostics[1].message, "Class 'AD-POST' is forbidden.");
    assert!(diagnostics.iter().all(|d| d.rule == "ban-adblock-selectors"));
}

#[test]
fn no_template_parser_warns_and_still_checks_scripts() {
    let dir = tempfile::tempdir().unwrap();
    write_files(dir.path(), &[("src/App.vue", APP_VUE)]);

    let (diagnostics, _) = run_json(dir.path(), &["--no-template-parser"]);
    assert_eq!(
        summary(&diagnostics),
        vec![
            ("src/App.vue".to_string(), 1, 1, "templateParserUnavailable".to_string()),
            ("src/App.vue".to_string(), 8, 24, "forbiddenClass".to_string()),
        ]
    );
    assert_eq!(diagnostics[0].diagnostic_type, "Warning");
}

#[test]
fn warnings_fail_only_with_flag() {
    let dir = tempfile::tempdir().unwrap();
    write_files(dir.path(), &[("src/App.vue", "<template><div></div></template>\n")]);

    let output = run(dir.path(), &["--no-template-parser"]);
    assert!(output.status.success());

    let output = run(dir.path(), &["--no-template-parser", "--fail-on-warnings"]);
    assert_eq!(output.status.code(), Some(1));

    let (diagnostics, _) = run_json(dir.path(), &["--no-template-parser", "--threshold", "error"]);
    assert!(diagnostics.is_empty());
}

#[test]
fn default_and_custom_ignores() {
    let dir = tempfile::tempdir().unwrap();
    write_files(
        dir.path(),
        &[
            ("node_modules/pkg/index.js", "const id = 'AC_ad'"),
            ("dist/bundle.js", "const id = 'AC_ad'"),
            ("legacy/old.ts", "const id = 'AC_ad'"),
            ("src/main.ts", "const id = 'AC_ad'"),
        ],
    );

    let (diagnostics, _) = run_json(dir.path(), &["--ignore", "legacy/**"]);
    assert_eq!(
        summary(&diagnostics),
        vec![("src/main.ts".to_string(), 1, 12, "forbiddenId".to_string())]
    );
}

#[test]
fn config_file_and_custom_selector_list() {
    let dir = tempfile::tempdir().unwrap();
    write_files(
        dir.path(),
        &[
            (
                "adblock-lint.json",
                r#"{ "selectors": "lists/custom.json", "extensions": ["js"] }"#,
            ),
            ("lists/custom.json", r#"{"id":["my-ad"],"class":[]}"#),
            ("src/main.js", "const a = 'my-ad', b = 'AC_ad'"),
            ("src/main.ts", "const a = 'my-ad'"),
        ],
    );

    let (diagnostics, _) = run_json(dir.path(), &[]);
    assert_eq!(
        summary(&diagnostics),
        vec![("src/main.js".to_string(), 1, 11, "forbiddenId".to_string())]
    );
    assert_eq!(diagnostics[0].message, "ID 'my-ad' is forbidden.");
}

#[test]
fn missing_selector_list_is_a_run_failure() {
    let dir = tempfile::tempdir().unwrap();
    write_files(dir.path(), &[("src/main.js", "const a = 1")]);

    let output = run(dir.path(), &["--selectors", "does-not-exist.json"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to load selector list"), "{stderr}");
}

#[test]
fn parse_errors_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    write_files(dir.path(), &[("src/broken.js", "const = 'AC_ad'")]);

    let (diagnostics, output) = run_json(dir.path(), &[]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, "parseError");
}

#[test]
fn machine_output() {
    let dir = tempfile::tempdir().unwrap();
    write_files(dir.path(), &[("main.js", "const id = 'AC_ad'")]);

    let output = run(dir.path(), &["--output", "machine"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("ERROR main.js:1:12:1:19 ID 'AC_ad' is forbidden. (forbiddenId)"),
        "{stdout}"
    );
}

#[test]
fn malformed_config_warns_and_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    write_files(
        dir.path(),
        &[
            ("adblock-lint.json", "{ ignore: "),
            ("src/main.js", "const id = 'AC_ad'"),
        ],
    );

    let output = Command::new(env!("CARGO_BIN_EXE_adblock-lint"))
        .arg("--workspace")
        .arg(dir.path())
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run adblock-lint");
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stderr.contains("WARN"), "{stderr}");
    assert!(stderr.contains("Failed to parse"), "{stderr}");
    assert!(stderr.contains("adblock-lint.json"), "{stderr}");
    assert!(stdout.contains("adblock-lint found 1 error and 0 warnings in 1 file"), "{stdout}");
}

#[test]
fn list_rules_prints_metadata() {
    let output = Command::new(env!("CARGO_BIN_EXE_adblock-lint"))
        .arg("--list-rules")
        .output()
        .expect("failed to run adblock-lint");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.starts_with("ban-adblock-selectors (problem, recommended)\n"), "{stdout}");
    assert!(stdout.contains("Category: Best Practices"), "{stdout}");
}
