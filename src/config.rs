//! Configuration file and the merge of file, flags, and defaults.
//!
//! Precedence for every setting: command-line flag, then config file, then
//! built-in default. Relative paths in the file are taken as given, i.e.
//! relative to the working directory.

use crate::cli::{Cli, OutputFormat, Theme};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use sysglance_core::analysis::DEFAULT_TOP_N;
use sysglance_core::host::DEFAULT_TOP_PROCESSES;
use sysglance_core::{AnalyzerOptions, CategoryTable};
use sysglance_dashboard::{ThemeMode, DEFAULT_REFRESH_SECS, DEFAULT_TITLE};

pub const DEFAULT_ROOT: &str = "sample_data";
pub const DEFAULT_OUTPUT: &str = "index.html";

/// One allow-list entry in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoryEntry {
    pub extension: String,
    pub label: String,
}

/// Contents of the JSON config file. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub root: Option<PathBuf>,
    pub top_n: Option<usize>,
    pub top_processes: Option<usize>,
    pub max_depth: Option<usize>,
    pub max_entries: Option<u64>,
    pub parallel: Option<bool>,
    pub threads: Option<usize>,
    pub refresh_secs: Option<u64>,
    pub output: Option<PathBuf>,
    pub template: Option<PathBuf>,
    pub title: Option<String>,
    pub theme: Option<Theme>,
    /// Replaces the built-in allow-list when present.
    pub categories: Option<Vec<CategoryEntry>>,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("invalid config {}", path.display()))
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub root: PathBuf,
    pub analyzer: AnalyzerOptions,
    pub top_processes: usize,
    pub output: PathBuf,
    pub template: Option<PathBuf>,
    pub refresh_secs: u64,
    pub title: String,
    pub theme: ThemeMode,
    pub format: OutputFormat,
    pub csv: Option<PathBuf>,
    pub host: bool,
    pub progress: bool,
}

impl Settings {
    pub fn resolve(cli: &Cli, config: AppConfig) -> Result<Self> {
        let categories = match &config.categories {
            Some(entries) => CategoryTable::from_entries(
                entries.iter().map(|e| (e.extension.as_str(), e.label.as_str())),
            )
            .context("invalid category list in config")?,
            None => CategoryTable::default(),
        };

        let defaults = AnalyzerOptions::default();
        let analyzer = AnalyzerOptions {
            categories,
            top_n: cli.top.or(config.top_n).unwrap_or(DEFAULT_TOP_N),
            max_depth: cli.max_depth.or(config.max_depth).unwrap_or(defaults.max_depth),
            max_entries: cli
                .max_entries
                .or(config.max_entries)
                .unwrap_or(defaults.max_entries),
            parallel: cli.parallel || config.parallel.unwrap_or(false),
            threads: cli.threads.or(config.threads),
        };

        Ok(Self {
            root: cli
                .root
                .clone()
                .or(config.root)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ROOT)),
            analyzer,
            top_processes: cli
                .processes
                .or(config.top_processes)
                .unwrap_or(DEFAULT_TOP_PROCESSES),
            output: cli
                .output
                .clone()
                .or(config.output)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            template: cli.template.clone().or(config.template),
            refresh_secs: cli
                .refresh
                .or(config.refresh_secs)
                .unwrap_or(DEFAULT_REFRESH_SECS),
            title: cli
                .title
                .clone()
                .or(config.title)
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            theme: cli.theme.or(config.theme).map(ThemeMode::from).unwrap_or_default(),
            format: cli.format,
            csv: cli.csv.clone(),
            host: !cli.no_host,
            progress: cli.progress,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("sysglance").chain(args.iter().copied()))
    }

    #[test]
    fn built_in_defaults() {
        let s = Settings::resolve(&cli(&[]), AppConfig::default()).unwrap();
        assert_eq!(s.root, PathBuf::from("sample_data"));
        assert_eq!(s.output, PathBuf::from("index.html"));
        assert_eq!(s.refresh_secs, 60);
        assert_eq!(s.analyzer.top_n, 10);
        assert_eq!(s.top_processes, 3);
        assert_eq!(s.theme, ThemeMode::Dark);
        assert_eq!(s.analyzer.categories.len(), 10);
        assert!(s.host);
        assert!(!s.analyzer.parallel);
    }

    #[test]
    fn config_overrides_defaults_and_flags_override_config() {
        let config: AppConfig = serde_json::from_str(
            r#"{
                "root": "/from/config",
                "top_n": 4,
                "refresh_secs": 15,
                "parallel": true,
                "theme": "light"
            }"#,
        )
        .unwrap();

        let s = Settings::resolve(&cli(&["/from/cli", "--refresh", "5"]), config).unwrap();
        assert_eq!(s.root, PathBuf::from("/from/cli"));
        assert_eq!(s.refresh_secs, 5);
        assert_eq!(s.analyzer.top_n, 4);
        assert!(s.analyzer.parallel);
        assert_eq!(s.theme, ThemeMode::Light);
    }

    #[test]
    fn config_categories_replace_allow_list() {
        let config: AppConfig = serde_json::from_str(
            r#"{ "categories": [
                { "extension": ".rs", "label": "Rust" },
                { "extension": "toml", "label": "Config" }
            ] }"#,
        )
        .unwrap();
        let s = Settings::resolve(&cli(&[]), config).unwrap();
        let labels: Vec<&str> = s
            .analyzer
            .categories
            .categories()
            .iter()
            .map(|c| c.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Rust", "Config"]);
    }

    #[test]
    fn conflicting_categories_are_rejected() {
        let config: AppConfig = serde_json::from_str(
            r#"{ "categories": [
                { "extension": ".rs", "label": "Rust" },
                { "extension": ".RS", "label": "Other Rust" }
            ] }"#,
        )
        .unwrap();
        let err = Settings::resolve(&cli(&[]), config).unwrap_err();
        assert!(format!("{err:#}").contains("mapped to both"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(serde_json::from_str::<AppConfig>(r#"{ "topn": 3 }"#).is_err());
    }

    #[test]
    fn load_reports_path_on_failure() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        let err = AppConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("bad.json"));

        let good = tmp.path().join("good.json");
        fs::write(&good, r#"{ "max_depth": 3 }"#).unwrap();
        assert_eq!(AppConfig::load(&good).unwrap().max_depth, Some(3));
    }
}
