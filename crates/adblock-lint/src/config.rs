//! Configuration loading.

use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use std::fs;

/// Name of the project configuration file.
pub const CONFIG_FILE: &str = "adblock-lint.json";

/// Project configuration from `adblock-lint.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LintConfig {
    /// File extensions to lint, without the dot.
    pub extensions: Option<Vec<String>>,

    /// Extra glob patterns to ignore.
    pub ignore: Vec<String>,

    /// Selector list path, relative to the project root.
    pub selectors: Option<Utf8PathBuf>,

    /// Whether `<template>` bodies are visited.
    pub template_parser: Option<bool>,
}

impl LintConfig {
    /// Loads the configuration from the project root.
    ///
    /// A missing file gives the defaults. A file that cannot be read or
    /// parsed is logged and also gives the defaults.
    pub fn load(project_root: &Utf8Path) -> Self {
        let config_path = project_root.join(CONFIG_FILE);
        if !config_path.exists() {
            return Self::default();
        }

        match Self::parse_config(&config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to parse {}: {}", config_path, e);
                Self::default()
            }
        }
    }

    fn parse_config(path: &Utf8Path) -> Result<Self, String> {
        let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
        serde_json::from_str(&content).map_err(|e| e.to_string())
    }

    /// Returns the extensions to lint.
    pub fn file_extensions(&self) -> Vec<String> {
        match &self.extensions {
            Some(extensions) => extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_string())
                .collect(),
            None => adblock_rules::FileKind::EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}
