/// Analysis modules: the directory usage analyzer and its building blocks.

pub mod accumulator;
pub mod analyzer;
pub mod categories;
pub mod top_files;

pub use accumulator::Accumulator;
pub use analyzer::{analyze_directory, Analyzer, AnalyzerOptions};
pub use categories::{Category, CategoryTable, DEFAULT_CATEGORIES, MAX_CATEGORIES, OTHER_LABEL};
pub use top_files::{TopFiles, DEFAULT_TOP_N};
