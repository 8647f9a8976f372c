/// SysGlance Core: directory usage analysis, data model, and host metrics.
///
/// This crate contains all business logic with zero presentation code.
/// Frontends (the HTML dashboard, the CLI's text and JSON output) consume
/// the values it produces.
///
/// # Modules
///
/// - [`model`]: File records, per-category totals, and the analysis report.
/// - [`analysis`]: Category allow-list, bounded top-N, and the analyzer itself.
/// - [`scanner`]: Filesystem walking, metadata probing, and progress reporting.
/// - [`host`]: One-shot CPU, memory, system, and process sampling.
/// - [`error`]: Fatal error types.
pub mod analysis;
pub mod error;
pub mod host;
pub mod model;
pub mod scanner;

pub use analysis::{Analyzer, AnalyzerOptions, CategoryTable};
pub use error::{AnalyzeError, ConfigError};
pub use model::{AnalysisReport, CategoryStats, FileRecord, ScanWarning, WarningKind};
