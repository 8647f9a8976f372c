/// The immutable result of one analysis run.
///
/// Totals are exposed as raw integers only. Percentages are the
/// presentation layer's job, so every figure here divides cleanly.
use super::record::FileRecord;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Count and byte totals for a single category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStats {
    /// Display label, e.g. "Text Documents" or the reserved "other".
    pub label: CompactString,
    /// Normalised extensions (lowercase, leading dot) that map here.
    /// Empty for the "other" category.
    pub extensions: Vec<CompactString>,
    pub file_count: u64,
    pub total_size: u64,
}

/// What went wrong with a single entry during the walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WarningKind {
    /// File metadata could not be read (permission denied, vanished mid-walk).
    Metadata,
    /// A directory could not be listed.
    ReadDir,
    /// A directory sits at the depth guard and was not descended.
    DepthLimit,
    /// The entry guard was hit and the walk stopped early.
    EntryLimit,
}

/// A non-fatal problem recorded during the walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanWarning {
    pub path: PathBuf,
    pub kind: WarningKind,
    pub message: String,
}

impl ScanWarning {
    pub fn new(path: impl Into<PathBuf>, kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}

/// Aggregate result of walking one directory tree.
///
/// Invariants (checked in debug builds when the report is built):
/// - the sum of `categories[*].file_count` equals `total_files`;
/// - the sum of `categories[*].total_size` equals `total_size`;
/// - `largest_files` is sorted by size descending, ties by ascending path,
///   and holds `min(top_n, total_files)` records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Canonicalised root that was walked.
    pub root: PathBuf,
    pub total_files: u64,
    pub total_size: u64,
    /// One entry per allow-list category in allow-list order, then "other".
    pub categories: Vec<CategoryStats>,
    pub largest_files: Vec<FileRecord>,
    /// Per-entry problems, sorted by path for stable output.
    pub warnings: Vec<ScanWarning>,
    /// Symbolic links encountered and skipped without being followed.
    pub skipped_links: u64,
}

impl AnalysisReport {
    /// Look up a category by its display label.
    pub fn category(&self, label: &str) -> Option<&CategoryStats> {
        self.categories.iter().find(|c| c.label == label)
    }

    /// Look up the category an extension was counted under.
    ///
    /// `ext` may be given with or without the leading dot, in any case.
    /// Unknown extensions resolve to the "other" category.
    pub fn category_for_extension(&self, ext: &str) -> Option<&CategoryStats> {
        let trimmed = ext.trim_start_matches('.').to_ascii_lowercase();
        self.categories
            .iter()
            .find(|c| {
                c.extensions
                    .iter()
                    .any(|e| e.trim_start_matches('.') == trimmed.as_str())
            })
            .or_else(|| self.categories.last())
    }

    /// Category stats for a retained record.
    pub fn category_of(&self, record: &FileRecord) -> Option<&CategoryStats> {
        self.categories.get(record.category.idx())
    }

    /// Stats of the reserved "other" category (always the last entry).
    pub fn other(&self) -> Option<&CategoryStats> {
        self.categories.last()
    }

    /// Warnings rendered as `"<path>: <message>"` strings.
    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }

    /// `true` when per-category totals add up to the grand totals.
    pub fn totals_consistent(&self) -> bool {
        let (count, size) = self
            .categories
            .iter()
            .fold((0u64, 0u64), |(c, s), cat| (c + cat.file_count, s + cat.total_size));
        count == self.total_files && size == self.total_size
    }
}
