/// Scan progress reporting: lightweight messages sent from the walk to
/// whoever is watching (the CLI's progress logger) via a crossbeam channel.
///
/// Reporting is optional. Without a sender the reporter only keeps its
/// counters, which cost two relaxed atomic adds per file.
use crate::model::ScanWarning;
use crossbeam_channel::{Receiver, Sender};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Maximum number of progress messages that may queue up in the channel.
///
/// Every message is sent with `try_send`, so a slow or absent consumer
/// drops messages rather than stalling the analysis. `Complete` is lost too
/// when the channel is full; the returned report is authoritative.
pub const PROGRESS_CHANNEL_CAPACITY: usize = 4_096;

/// Send an `Update` every this many files.
pub const UPDATE_EVERY: u64 = 5_000;

/// Progress updates sent from the walk to the observer.
#[derive(Debug, Clone)]
pub enum ScanProgress {
    /// Periodic update with running totals.
    Update {
        files_found: u64,
        total_size: u64,
        current_path: String,
    },
    /// A non-fatal problem with one entry.
    Warning(ScanWarning),
    /// The walk finished; the report is being assembled.
    Complete {
        duration: Duration,
        files_found: u64,
        warning_count: u64,
    },
}

/// Create a bounded channel sized for progress reporting.
pub fn progress_channel() -> (Sender<ScanProgress>, Receiver<ScanProgress>) {
    crossbeam_channel::bounded(PROGRESS_CHANNEL_CAPACITY)
}

/// Shared counters plus an optional sender.
///
/// One reporter serves every worker of a parallel walk, so `files_found`
/// in updates is the global figure, not a per-worker one.
#[derive(Debug, Default)]
pub struct ProgressReporter {
    tx: Option<Sender<ScanProgress>>,
    files: AtomicU64,
    bytes: AtomicU64,
    warnings: AtomicU64,
}

impl ProgressReporter {
    pub fn new(tx: Option<Sender<ScanProgress>>) -> Self {
        Self {
            tx,
            ..Self::default()
        }
    }

    /// Record one folded file.
    pub fn file(&self, path: &Path, size: u64) {
        let files = self.files.fetch_add(1, Ordering::Relaxed) + 1;
        let bytes = self.bytes.fetch_add(size, Ordering::Relaxed) + size;
        if let Some(tx) = &self.tx {
            if files.is_multiple_of(UPDATE_EVERY) {
                let _ = tx.try_send(ScanProgress::Update {
                    files_found: files,
                    total_size: bytes,
                    current_path: path.to_string_lossy().into_owned(),
                });
            }
        }
    }

    /// Record one warning.
    pub fn warning(&self, warning: &ScanWarning) {
        self.warnings.fetch_add(1, Ordering::Relaxed);
        if let Some(tx) = &self.tx {
            let _ = tx.try_send(ScanProgress::Warning(warning.clone()));
        }
    }

    /// Signal completion. Never blocks.
    pub fn complete(&self, duration: Duration) {
        if let Some(tx) = &self.tx {
            let _ = tx.try_send(ScanProgress::Complete {
                duration,
                files_found: self.files_found(),
                warning_count: self.warnings.load(Ordering::Relaxed),
            });
        }
    }

    pub fn files_found(&self) -> u64 {
        self.files.load(Ordering::Relaxed)
    }

    pub fn total_size(&self) -> u64 {
        self.bytes.load(Ordering::Relaxed)
    }
}
