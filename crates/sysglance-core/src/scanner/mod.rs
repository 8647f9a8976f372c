/// Scanner module: filesystem walking for the analyzer.
///
/// - [`walk`] drives `jwalk` over one subtree and folds every regular file
///   into an [`crate::analysis::Accumulator`].
/// - [`progress`] carries optional progress messages over a crossbeam channel.
///
/// Symbolic links are never followed. Per-entry failures become warnings;
/// the walk itself cannot fail once the root has been validated.
pub mod progress;
pub mod walk;

pub use progress::{progress_channel, ProgressReporter, ScanProgress, PROGRESS_CHANNEL_CAPACITY};
pub use walk::{EntryBudget, FsProbe, MetadataProbe, WalkContext, WalkLimits};
