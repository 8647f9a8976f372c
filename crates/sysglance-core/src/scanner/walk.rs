/// Directory walker built on `jwalk`, one subtree per call.
///
/// Sequential analysis walks the whole root with a single call. Parallel
/// analysis calls [`walk_subtree`] once per top-level subdirectory, each
/// with its own accumulator, and merges the results afterwards.
///
/// # Guards
///
/// - **Depth**: directories at `max_depth` (counted from the analysis root)
///   are yielded but not descended; each one produces a `DepthLimit`
///   warning so truncation is never silent.
/// - **Entries**: an [`EntryBudget`] shared by all workers caps the number of
///   entries examined. The first walker to exhaust it records a single
///   `EntryLimit` warning and every walker stops.
use crate::analysis::{Accumulator, CategoryTable};
use crate::model::{ScanWarning, WarningKind};
use crate::scanner::progress::ProgressReporter;
use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tracing::{debug, trace};

/// Default depth guard, far beyond any sane real tree.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Default entry guard.
pub const DEFAULT_MAX_ENTRIES: u64 = 10_000_000;

/// Reads the size of one file.
///
/// The analyzer goes through this trait instead of calling the filesystem
/// directly so a failing stat can be simulated in tests.
pub trait MetadataProbe: Send + Sync {
    fn file_size(&self, path: &Path) -> io::Result<u64>;
}

/// `symlink_metadata` against the real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsProbe;

impl MetadataProbe for FsProbe {
    fn file_size(&self, path: &Path) -> io::Result<u64> {
        std::fs::symlink_metadata(path).map(|meta| meta.len())
    }
}

/// Traversal guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkLimits {
    /// Deepest level that is still descended into, counted from the root.
    /// Always at least 1.
    pub max_depth: usize,
    pub max_entries: u64,
}

impl Default for WalkLimits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

/// Entry counter shared across walkers.
#[derive(Debug)]
pub struct EntryBudget {
    limit: u64,
    seen: AtomicU64,
    exhausted: AtomicBool,
}

impl EntryBudget {
    pub fn new(limit: u64) -> Self {
        Self {
            limit,
            seen: AtomicU64::new(0),
            exhausted: AtomicBool::new(false),
        }
    }

    /// Claim one entry. Returns `false` once the limit has been reached.
    #[inline]
    pub fn take(&self) -> bool {
        if self.exhausted.load(Ordering::Relaxed) {
            return false;
        }
        self.seen.fetch_add(1, Ordering::Relaxed) < self.limit
    }

    /// Mark the budget exhausted. Returns `true` only for the first caller,
    /// which is the one that records the warning.
    pub fn exhaust(&self) -> bool {
        !self.exhausted.swap(true, Ordering::Relaxed)
    }
}

/// Everything a walker needs besides its own accumulator.
pub struct WalkContext<'a> {
    pub table: &'a CategoryTable,
    pub probe: &'a dyn MetadataProbe,
    pub limits: WalkLimits,
    pub budget: &'a EntryBudget,
    pub progress: &'a ProgressReporter,
}

impl WalkContext<'_> {
    /// Claim an entry from the budget, recording the limit warning once.
    /// Returns `false` when the walk must stop.
    pub fn claim_entry(&self, path: &Path, acc: &mut Accumulator) -> bool {
        if self.budget.take() {
            return true;
        }
        if self.budget.exhaust() {
            self.warn(
                acc,
                ScanWarning::new(
                    path,
                    WarningKind::EntryLimit,
                    format!(
                        "entry limit of {} reached, traversal stopped",
                        self.limits.max_entries
                    ),
                ),
            );
        }
        false
    }

    /// Stat one regular file and fold it, or record why it was skipped.
    pub fn visit_file(&self, path: &Path, acc: &mut Accumulator) {
        match self.probe.file_size(path) {
            Ok(size) => {
                let category = self.table.categorise_path(path);
                acc.fold_file(path, size, category);
                self.progress.file(path, size);
            }
            Err(err) => {
                debug!("Skipping {}: {err}", path.display());
                self.warn(
                    acc,
                    ScanWarning::new(path, WarningKind::Metadata, err.to_string()),
                );
            }
        }
    }

    /// Record a directory that the depth guard stops at.
    pub fn depth_limited(&self, path: &Path, acc: &mut Accumulator) {
        self.warn(
            acc,
            ScanWarning::new(
                path,
                WarningKind::DepthLimit,
                format!(
                    "depth limit of {} reached, contents not analysed",
                    self.limits.max_depth
                ),
            ),
        );
    }

    pub fn warn(&self, acc: &mut Accumulator, warning: ScanWarning) {
        self.progress.warning(&warning);
        acc.warn(warning);
    }
}

/// Walk `dir`, which sits `base_depth` levels below the analysis root, and
/// fold every regular file beneath it into `acc`.
///
/// `dir` itself is not counted. The caller has already claimed its entry.
pub fn walk_subtree(dir: &Path, base_depth: usize, ctx: &WalkContext<'_>, acc: &mut Accumulator) {
    let max_depth = ctx.limits.max_depth.max(1);
    if base_depth >= max_depth {
        ctx.depth_limited(dir, acc);
        return;
    }
    // Depth of the guard relative to `dir`; entries at this depth are
    // yielded by jwalk but never read.
    let local_limit = max_depth - base_depth;

    let walker = jwalk::WalkDir::new(dir)
        .skip_hidden(false)
        .follow_links(false)
        .sort(true)
        .max_depth(local_limit)
        .parallelism(jwalk::Parallelism::Serial);

    for entry_result in walker {
        let entry = match entry_result {
            Ok(e) => e,
            Err(err) => {
                let path = err.path().map(Path::to_path_buf).unwrap_or_else(|| dir.to_path_buf());
                ctx.warn(
                    acc,
                    ScanWarning::new(path, WarningKind::ReadDir, err.to_string()),
                );
                continue;
            }
        };

        // A directory whose children could not be listed is still yielded;
        // the failure rides along on the entry. This includes the subtree
        // root itself.
        if let Some(err) = &entry.read_children_error {
            let path = entry.path();
            debug!("Cannot read {}: {err}", path.display());
            ctx.warn(
                acc,
                ScanWarning::new(path, WarningKind::ReadDir, err.to_string()),
            );
        }

        if entry.depth == 0 {
            continue;
        }

        let path = entry.path();
        if !ctx.claim_entry(&path, acc) {
            return;
        }

        let file_type = entry.file_type();
        if file_type.is_symlink() {
            trace!("Not following link {}", path.display());
            acc.skip_link();
        } else if file_type.is_dir() {
            if entry.depth >= local_limit {
                ctx.depth_limited(&path, acc);
            }
        } else if file_type.is_file() {
            ctx.visit_file(&path, acc);
        } else {
            trace!("Ignoring special file {}", path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_runs_out_exactly_at_limit() {
        let budget = EntryBudget::new(2);
        assert!(budget.take());
        assert!(budget.take());
        assert!(!budget.take());
        assert!(budget.exhaust());
        assert!(!budget.exhaust(), "only the first caller wins");
        assert!(!budget.take());
    }

    #[test]
    fn zero_budget_rejects_everything() {
        let budget = EntryBudget::new(0);
        assert!(!budget.take());
    }

    #[test]
    fn fs_probe_reports_missing_files() {
        let err = FsProbe
            .file_size(Path::new("/definitely/not/here/sysglance.bin"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
