/// Directory usage analyzer. Validates the root, walks it once, and
/// returns an [`AnalysisReport`].
///
/// The only fatal condition is a root that cannot be traversed at all.
/// Everything that goes wrong below the root degrades to a warning inside
/// the report.
///
/// # Parallel mode
///
/// With `parallel` set, files directly under the root are folded on the
/// calling thread and each top-level subdirectory is walked on a rayon pool
/// with its own [`Accumulator`]. The partial accumulators are reduced with
/// [`Accumulator::merge`], which yields the same totals and the same
/// largest-files order as a sequential walk.
use super::accumulator::Accumulator;
use super::categories::CategoryTable;
use super::top_files::DEFAULT_TOP_N;
use crate::error::AnalyzeError;
use crate::model::{AnalysisReport, ScanWarning, WarningKind};
use crate::scanner::progress::{ProgressReporter, ScanProgress};
use crate::scanner::walk::{
    walk_subtree, EntryBudget, FsProbe, MetadataProbe, WalkContext, WalkLimits,
    DEFAULT_MAX_DEPTH, DEFAULT_MAX_ENTRIES,
};
use crossbeam_channel::Sender;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Knobs for one analysis run.
#[derive(Debug, Clone)]
pub struct AnalyzerOptions {
    pub categories: CategoryTable,
    /// Length bound of the largest-files list.
    pub top_n: usize,
    /// Depth guard, counted from the root. Values below 1 are treated as 1.
    pub max_depth: usize,
    /// Entry guard across the whole walk.
    pub max_entries: u64,
    /// Walk top-level subdirectories concurrently.
    pub parallel: bool,
    /// Worker count for parallel mode; defaults to the number of CPUs.
    pub threads: Option<usize>,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            categories: CategoryTable::default(),
            top_n: DEFAULT_TOP_N,
            max_depth: DEFAULT_MAX_DEPTH,
            max_entries: DEFAULT_MAX_ENTRIES,
            parallel: false,
            threads: None,
        }
    }
}

impl AnalyzerOptions {
    fn limits(&self) -> WalkLimits {
        WalkLimits {
            max_depth: self.max_depth.max(1),
            max_entries: self.max_entries,
        }
    }
}

pub struct Analyzer {
    options: AnalyzerOptions,
    probe: Arc<dyn MetadataProbe>,
    progress_tx: Option<Sender<ScanProgress>>,
}

impl Analyzer {
    pub fn new(options: AnalyzerOptions) -> Self {
        Self {
            options,
            probe: Arc::new(FsProbe),
            progress_tx: None,
        }
    }

    /// Replace the filesystem metadata source.
    pub fn with_probe(mut self, probe: impl MetadataProbe + 'static) -> Self {
        self.probe = Arc::new(probe);
        self
    }

    /// Report progress on `tx` while analysing.
    pub fn with_progress(mut self, tx: Sender<ScanProgress>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    pub fn options(&self) -> &AnalyzerOptions {
        &self.options
    }

    /// Analyse the tree under `root`.
    pub fn analyze(&self, root: impl AsRef<Path>) -> Result<AnalysisReport, AnalyzeError> {
        let root = validate_root(root.as_ref())?;
        let start = Instant::now();
        info!(
            "Analysing {} ({} mode, top {})",
            root.display(),
            if self.options.parallel { "parallel" } else { "sequential" },
            self.options.top_n
        );

        let budget = EntryBudget::new(self.options.max_entries);
        let progress = ProgressReporter::new(self.progress_tx.clone());
        let ctx = WalkContext {
            table: &self.options.categories,
            probe: self.probe.as_ref(),
            limits: self.options.limits(),
            budget: &budget,
            progress: &progress,
        };

        let acc = if self.options.parallel {
            self.walk_parallel(&root, &ctx)?
        } else {
            let mut acc = self.new_accumulator();
            walk_subtree(&root, 0, &ctx, &mut acc);
            acc
        };

        let duration = start.elapsed();
        progress.complete(duration);
        debug!(
            "Walk complete: {} files, {} bytes, {} warnings in {:?}",
            acc.total_files(),
            acc.total_size(),
            acc.warning_count(),
            duration
        );

        Ok(acc.finish(root, &self.options.categories))
    }

    fn new_accumulator(&self) -> Accumulator {
        Accumulator::new(&self.options.categories, self.options.top_n)
    }

    fn walk_parallel(&self, root: &Path, ctx: &WalkContext<'_>) -> Result<Accumulator, AnalyzeError> {
        let threads = self.options.threads.unwrap_or_else(num_cpus::get).max(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("sysglance-walk-{i}"))
            .build()
            .map_err(|e| AnalyzeError::ThreadPool(e.to_string()))?;

        let mut root_acc = self.new_accumulator();
        let subdirs = fold_root_entries(root, ctx, &mut root_acc);
        debug!(
            "Parallel walk: {} top-level directories on {threads} threads",
            subdirs.len()
        );

        let merged = pool.install(|| {
            subdirs
                .par_iter()
                .map(|dir| {
                    let mut acc = self.new_accumulator();
                    walk_subtree(dir, 1, ctx, &mut acc);
                    acc
                })
                .reduce(|| self.new_accumulator(), Accumulator::merge)
        });

        Ok(root_acc.merge(merged))
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(AnalyzerOptions::default())
    }
}

/// Analyse `root` with a category table and top-N, using defaults otherwise.
pub fn analyze_directory(
    root: impl AsRef<Path>,
    categories: CategoryTable,
    top_n: usize,
) -> Result<AnalysisReport, AnalyzeError> {
    Analyzer::new(AnalyzerOptions {
        categories,
        top_n,
        ..AnalyzerOptions::default()
    })
    .analyze(root)
}

/// Fold the root's immediate files and return its immediate subdirectories,
/// sorted, for the parallel walkers. Mirrors what `walk_subtree` does for
/// depth-1 entries.
fn fold_root_entries(root: &Path, ctx: &WalkContext<'_>, acc: &mut Accumulator) -> Vec<PathBuf> {
    let read_dir = match std::fs::read_dir(root) {
        Ok(rd) => rd,
        Err(err) => {
            ctx.warn(acc, ScanWarning::new(root, WarningKind::ReadDir, err.to_string()));
            return Vec::new();
        }
    };

    let mut entries = Vec::new();
    for entry in read_dir {
        match entry {
            Ok(e) => entries.push(e),
            Err(err) => {
                ctx.warn(acc, ScanWarning::new(root, WarningKind::ReadDir, err.to_string()));
            }
        }
    }
    entries.sort_by_key(|e| e.file_name());

    let mut subdirs = Vec::new();
    for entry in entries {
        let path = entry.path();
        if !ctx.claim_entry(&path, acc) {
            break;
        }
        let file_type = match entry.file_type() {
            Ok(ft) => ft,
            Err(err) => {
                ctx.warn(acc, ScanWarning::new(&path, WarningKind::Metadata, err.to_string()));
                continue;
            }
        };
        if file_type.is_symlink() {
            acc.skip_link();
        } else if file_type.is_dir() {
            subdirs.push(path);
        } else if file_type.is_file() {
            ctx.visit_file(&path, acc);
        }
    }
    subdirs
}

/// Check that `root` is a readable directory and canonicalise it.
fn validate_root(root: &Path) -> Result<PathBuf, AnalyzeError> {
    let invalid = |reason: String| AnalyzeError::InvalidRoot {
        path: root.to_path_buf(),
        reason,
    };

    let meta = std::fs::metadata(root).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            invalid("does not exist".to_string())
        } else {
            invalid(e.to_string())
        }
    })?;
    if !meta.is_dir() {
        return Err(invalid("not a directory".to_string()));
    }

    let canonical = std::fs::canonicalize(root).map_err(|e| invalid(e.to_string()))?;
    std::fs::read_dir(&canonical).map_err(|e| invalid(format!("cannot be read: {e}")))?;
    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_root_is_invalid() {
        let tmp = TempDir::new().unwrap();
        let err = Analyzer::default()
            .analyze(tmp.path().join("nope"))
            .unwrap_err();
        match err {
            AnalyzeError::InvalidRoot { reason, .. } => assert_eq!(reason, "does not exist"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn file_root_is_invalid() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("plain.txt");
        fs::write(&file, b"hello").unwrap();
        let err = Analyzer::default().analyze(&file).unwrap_err();
        assert!(matches!(err, AnalyzeError::InvalidRoot { .. }));
        assert!(err.to_string().contains("not a directory"));
    }

    #[test]
    fn zero_depth_is_clamped_to_one() {
        let options = AnalyzerOptions {
            max_depth: 0,
            ..AnalyzerOptions::default()
        };
        assert_eq!(options.limits().max_depth, 1);
    }

    #[test]
    fn report_root_is_canonical() {
        let tmp = TempDir::new().unwrap();
        let report = Analyzer::default().analyze(tmp.path()).unwrap();
        assert_eq!(report.root, fs::canonicalize(tmp.path()).unwrap());
        assert_eq!(report.total_files, 0);
    }
}
