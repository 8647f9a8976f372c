/// A single visited file, as retained in the largest-files list.
///
/// Records are created once per file during the walk and are immutable.
/// Only the bounded top-N structure keeps them beyond the fold, so the
/// analyzer never holds every record of a tree in memory at once.
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Lightweight index into the category list of a [`crate::CategoryTable`]
/// and, identically, into [`crate::AnalysisReport::categories`].
///
/// Uses `u16`; an allow-list never comes close to 65 535 categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CategoryId(pub u16);

impl CategoryId {
    /// Create a new `CategoryId` from a `usize`.
    #[inline]
    pub fn new(index: usize) -> Self {
        debug_assert!(index <= u16::MAX as usize, "CategoryId overflow");
        Self(index as u16)
    }

    /// Return the index as a `usize` for Vec indexing.
    #[inline]
    pub fn idx(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Absolute path of the file.
    pub path: PathBuf,
    /// Logical size in bytes.
    pub size: u64,
    /// Category the file's extension resolved to.
    pub category: CategoryId,
}

impl FileRecord {
    pub fn new(path: PathBuf, size: u64, category: CategoryId) -> Self {
        Self {
            path,
            size,
            category,
        }
    }

    /// File name only, for compact display.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.to_string_lossy().into_owned())
    }
}
