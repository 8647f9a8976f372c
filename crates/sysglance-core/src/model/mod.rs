/// Data model for SysGlance directory analysis.
///
/// Re-exports the per-file record, the aggregate report, and supporting types.
pub mod record;
pub mod report;
pub mod size;

pub use record::{CategoryId, FileRecord};
pub use report::{AnalysisReport, CategoryStats, ScanWarning, WarningKind};
