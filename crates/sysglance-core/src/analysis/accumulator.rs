/// Running totals for one analysis, owned by the walk that fills them.
///
/// A parallel analysis gives each worker its own accumulator and combines
/// them with [`Accumulator::merge`]. Every part of the merge is associative
/// and commutative (sums, top-N union, warning concatenation followed by a
/// sort in [`Accumulator::finish`]), so the final report does not depend on
/// how the work was split.
use super::categories::CategoryTable;
use super::top_files::TopFiles;
use crate::model::{AnalysisReport, CategoryId, ScanWarning};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Tally {
    file_count: u64,
    total_size: u64,
}

#[derive(Debug, Clone)]
pub struct Accumulator {
    /// Indexed by `CategoryId`; the last slot is "other".
    tallies: Vec<Tally>,
    total_files: u64,
    total_size: u64,
    top: TopFiles,
    warnings: Vec<ScanWarning>,
    skipped_links: u64,
}

impl Accumulator {
    /// Empty accumulator sized for `table` plus the "other" bucket.
    pub fn new(table: &CategoryTable, top_n: usize) -> Self {
        Self {
            tallies: vec![Tally::default(); table.len() + 1],
            total_files: 0,
            total_size: 0,
            top: TopFiles::new(top_n),
            warnings: Vec::new(),
            skipped_links: 0,
        }
    }

    /// Fold one file into the category and grand totals.
    pub fn fold_file(&mut self, path: &Path, size: u64, category: CategoryId) {
        // Out-of-range ids cannot come from the table this was built for,
        // but clamp to "other" rather than panic.
        let slot = category.idx().min(self.tallies.len() - 1);
        let tally = &mut self.tallies[slot];
        tally.file_count += 1;
        tally.total_size += size;
        self.total_files += 1;
        self.total_size += size;
        self.top.offer(path, size, CategoryId::new(slot));
    }

    pub fn warn(&mut self, warning: ScanWarning) {
        self.warnings.push(warning);
    }

    pub fn skip_link(&mut self) {
        self.skipped_links += 1;
    }

    pub fn total_files(&self) -> u64 {
        self.total_files
    }

    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Combine two partial results. Both must come from the same table.
    pub fn merge(mut self, other: Accumulator) -> Accumulator {
        debug_assert_eq!(self.tallies.len(), other.tallies.len());
        for (mine, theirs) in self.tallies.iter_mut().zip(other.tallies) {
            mine.file_count += theirs.file_count;
            mine.total_size += theirs.total_size;
        }
        self.total_files += other.total_files;
        self.total_size += other.total_size;
        self.top.merge(other.top);
        self.warnings.extend(other.warnings);
        self.skipped_links += other.skipped_links;
        self
    }

    /// Freeze into an [`AnalysisReport`].
    ///
    /// Warnings are sorted by path, then kind, then message, so the report
    /// is identical across runs whatever order the walk produced them in.
    pub fn finish(self, root: PathBuf, table: &CategoryTable) -> AnalysisReport {
        let mut categories = table.empty_stats();
        for (stats, tally) in categories.iter_mut().zip(&self.tallies) {
            stats.file_count = tally.file_count;
            stats.total_size = tally.total_size;
        }

        let mut warnings = self.warnings;
        warnings.sort_by(|a, b| {
            a.path
                .cmp(&b.path)
                .then_with(|| a.kind.cmp(&b.kind))
                .then_with(|| a.message.cmp(&b.message))
        });

        let report = AnalysisReport {
            root,
            total_files: self.total_files,
            total_size: self.total_size,
            categories,
            largest_files: self.top.into_sorted_vec(),
            warnings,
            skipped_links: self.skipped_links,
        };
        debug_assert!(report.totals_consistent(), "category totals drifted");
        report
    }
}
