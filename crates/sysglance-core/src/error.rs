/// Error types for the analyzer and its configuration.
///
/// Only conditions that prevent an analysis from starting are errors.
/// Anything that goes wrong with an individual file is reported as a
/// [`crate::model::ScanWarning`] inside the report instead.
use std::path::PathBuf;
use thiserror::Error;

/// Fatal analysis failure. No partial report is produced.
#[derive(Error, Debug)]
pub enum AnalyzeError {
    /// The root is missing, unreadable, or not a directory.
    #[error("invalid root {}: {reason}", path.display())]
    InvalidRoot { path: PathBuf, reason: String },

    /// The worker pool for a parallel walk could not be built.
    #[error("failed to build thread pool: {0}")]
    ThreadPool(String),
}

/// Rejected category allow-list entry.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("category extension must not be empty (label {label:?})")]
    EmptyExtension { label: String },

    #[error("category label must not be empty (extension {extension:?})")]
    EmptyLabel { extension: String },

    #[error("extension {extension:?} is mapped to both {first:?} and {second:?}")]
    ConflictingExtension {
        extension: String,
        first: String,
        second: String,
    },

    #[error("label {0:?} is reserved for unmatched files")]
    ReservedLabel(String),

    #[error("extension {extension:?} (label {label:?}) has an inner dot; only the part after the last dot is matched")]
    CompoundExtension { extension: String, label: String },

    #[error("more than {limit} categories configured")]
    TooManyCategories { limit: usize },
}
