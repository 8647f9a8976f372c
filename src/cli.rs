//! Command-line arguments.

use clap::{ArgAction, Parser, ValueEnum};
use serde::Deserialize;
use std::path::PathBuf;
use sysglance_dashboard::ThemeMode;

/// What to produce once the data is collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Self-refreshing HTML dashboard written to the output file (default)
    Html,
    /// Host snapshot and analysis report as JSON on stdout
    Json,
    /// Human-readable summary on stdout
    Text,
}

/// Dashboard colour scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
}

impl From<Theme> for ThemeMode {
    fn from(theme: Theme) -> Self {
        match theme {
            Theme::Dark => ThemeMode::Dark,
            Theme::Light => ThemeMode::Light,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "sysglance")]
#[command(version)]
#[command(
    about = "Snapshot host metrics and directory usage into a self-refreshing HTML dashboard",
    long_about = None
)]
pub struct Cli {
    /// Directory to analyse [default: sample_data]
    #[arg(value_name = "ROOT")]
    pub root: Option<PathBuf>,

    /// JSON configuration file; command-line flags override it
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Number of largest files to list [default: 10]
    #[arg(short = 'n', long = "top", value_name = "N")]
    pub top: Option<usize>,

    /// Number of processes to list [default: 3]
    #[arg(long = "processes", value_name = "N")]
    pub processes: Option<usize>,

    /// Deepest directory level to descend into, counted from ROOT
    #[arg(long = "max-depth", value_name = "DEPTH")]
    pub max_depth: Option<usize>,

    /// Stop after examining this many entries
    #[arg(long = "max-entries", value_name = "COUNT")]
    pub max_entries: Option<u64>,

    /// Walk top-level subdirectories concurrently
    #[arg(short = 'p', long = "parallel")]
    pub parallel: bool,

    /// Worker threads for --parallel [default: number of CPUs]
    #[arg(short = 'j', long = "threads", value_name = "N")]
    pub threads: Option<usize>,

    /// HTML template with {{ name }} placeholders [default: built-in]
    #[arg(short = 't', long = "template", value_name = "FILE")]
    pub template: Option<PathBuf>,

    /// Where to write the HTML dashboard [default: index.html]
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Browser refresh interval in seconds [default: 60]
    #[arg(long = "refresh", value_name = "SECS")]
    pub refresh: Option<u64>,

    /// Page title
    #[arg(long = "title", value_name = "TEXT")]
    pub title: Option<String>,

    /// Dashboard colour scheme [default: dark]
    #[arg(long = "theme", value_enum)]
    pub theme: Option<Theme>,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "html")]
    pub format: OutputFormat,

    /// Also export category totals and largest files as CSV
    #[arg(long = "csv", value_name = "FILE")]
    pub csv: Option<PathBuf>,

    /// Skip host metrics and report on the directory only
    #[arg(long = "no-host")]
    pub no_host: bool,

    /// Log progress while the directory is walked
    #[arg(long = "progress")]
    pub progress: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}
