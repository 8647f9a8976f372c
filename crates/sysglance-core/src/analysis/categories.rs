/// File categorisation based on an extension allow-list.
///
/// The allow-list is data, not code: an ordered set of categories, each with
/// a display label and one or more extensions. Any extension that is not
/// listed falls into the reserved `"other"` category, which always sits
/// after the configured ones.
use crate::error::ConfigError;
use crate::model::{CategoryId, CategoryStats};
use compact_str::CompactString;
use std::collections::HashMap;
use std::path::Path;

/// Label of the catch-all category for unlisted or missing extensions.
pub const OTHER_LABEL: &str = "other";

/// The ten extensions tracked out of the box, in display order.
pub const DEFAULT_CATEGORIES: &[(&str, &str)] = &[
    (".txt", "Text Documents"),
    (".py", "Python Scripts"),
    (".pdf", "PDF Documents"),
    (".jpg", "JPEG Images"),
    (".png", "PNG Images"),
    (".md", "Markdown Files"),
    (".css", "Stylesheets"),
    (".exe", "Executables"),
    (".json", "JSON Files"),
    (".html", "HTML Pages"),
];

/// Most configured categories a table may hold. "other" takes the next id,
/// which must still fit a [`CategoryId`].
pub const MAX_CATEGORIES: usize = u16::MAX as usize;

/// Extensions up to this many bytes are lowercased on the stack.
const STACK_EXT_LEN: usize = 16;

/// One configured category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub label: CompactString,
    /// Normalised extensions: lowercase with a leading dot.
    pub extensions: Vec<CompactString>,
}

/// Ordered extension → category mapping injected into the analyzer.
#[derive(Debug, Clone)]
pub struct CategoryTable {
    categories: Vec<Category>,
    /// Keyed by lowercase extension *without* the leading dot, which is the
    /// form `Path::extension` hands back during the walk.
    lookup: HashMap<CompactString, CategoryId>,
}

impl Default for CategoryTable {
    fn default() -> Self {
        // The built-in table is known to be valid.
        match Self::from_entries(DEFAULT_CATEGORIES.iter().copied()) {
            Ok(table) => table,
            Err(_) => unreachable!("default category table is valid"),
        }
    }
}

impl CategoryTable {
    /// Build a table from `(extension, label)` pairs.
    ///
    /// Extensions are accepted with or without the leading dot and in any
    /// case. Pairs sharing a label are merged into one category, which keeps
    /// the position of its first occurrence. Repeating an identical pair is
    /// harmless; mapping one extension to two labels is an error.
    pub fn from_entries<I, E, L>(entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (E, L)>,
        E: AsRef<str>,
        L: AsRef<str>,
    {
        let mut table = Self {
            categories: Vec::new(),
            lookup: HashMap::new(),
        };
        let mut by_label: HashMap<CompactString, CategoryId> = HashMap::new();

        for (ext, label) in entries {
            let label = label.as_ref().trim();
            let bare = ext.as_ref().trim().trim_start_matches('.').to_ascii_lowercase();

            if label.is_empty() {
                return Err(ConfigError::EmptyLabel {
                    extension: ext.as_ref().to_string(),
                });
            }
            if bare.is_empty() {
                return Err(ConfigError::EmptyExtension {
                    label: label.to_string(),
                });
            }
            if bare.contains('.') {
                return Err(ConfigError::CompoundExtension {
                    extension: ext.as_ref().trim().to_string(),
                    label: label.to_string(),
                });
            }
            if label.eq_ignore_ascii_case(OTHER_LABEL) {
                return Err(ConfigError::ReservedLabel(label.to_string()));
            }

            let id = match by_label.get(label) {
                Some(&id) => id,
                None => {
                    if table.categories.len() >= MAX_CATEGORIES {
                        return Err(ConfigError::TooManyCategories {
                            limit: MAX_CATEGORIES,
                        });
                    }
                    table.categories.push(Category {
                        label: CompactString::new(label),
                        extensions: Vec::new(),
                    });
                    let id = CategoryId::new(table.categories.len() - 1);
                    by_label.insert(CompactString::new(label), id);
                    id
                }
            };

            let key = CompactString::new(&bare);
            match table.lookup.get(&key) {
                Some(&existing) if existing == id => continue,
                Some(&existing) => {
                    return Err(ConfigError::ConflictingExtension {
                        extension: format!(".{bare}"),
                        first: table.categories[existing.idx()].label.to_string(),
                        second: label.to_string(),
                    });
                }
                None => {
                    table.categories[id.idx()]
                        .extensions
                        .push(CompactString::new(format!(".{bare}")));
                    table.lookup.insert(key, id);
                }
            }
        }

        Ok(table)
    }

    /// Number of configured categories, not counting "other".
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// The configured categories in display order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Id of the reserved "other" category.
    #[inline]
    pub fn other(&self) -> CategoryId {
        CategoryId::new(self.categories.len())
    }

    /// Display label for an id; anything out of range is "other".
    pub fn label(&self, id: CategoryId) -> &str {
        self.categories
            .get(id.idx())
            .map_or(OTHER_LABEL, |c| c.label.as_str())
    }

    /// Categorise a bare or dotted extension, case-insensitively.
    ///
    /// Short extensions are lowercased into a fixed-size stack buffer so the
    /// per-file hot path does not allocate; longer ones fall back to a heap
    /// `String`.
    pub fn categorise_extension(&self, ext: &str) -> CategoryId {
        let ext = ext.trim_start_matches('.');
        if ext.is_empty() {
            return self.other();
        }

        let bytes = ext.as_bytes();
        let found = if bytes.len() <= STACK_EXT_LEN {
            let mut lower = [0u8; STACK_EXT_LEN];
            for (dest, &src) in lower.iter_mut().zip(bytes.iter()) {
                *dest = src.to_ascii_lowercase();
            }
            // ASCII lowercasing preserves UTF-8 validity.
            match std::str::from_utf8(&lower[..bytes.len()]) {
                Ok(s) => self.lookup.get(s).copied(),
                Err(_) => None,
            }
        } else {
            self.lookup.get(ext.to_ascii_lowercase().as_str()).copied()
        };

        found.unwrap_or_else(|| self.other())
    }

    /// Categorise a file by the extension of its name.
    ///
    /// Follows `Path::extension`: the text after the final `.`, with dot-files
    /// such as `.bashrc` having no extension. Missing or non-UTF-8
    /// extensions are "other".
    pub fn categorise_path(&self, path: &Path) -> CategoryId {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => self.categorise_extension(ext),
            None => self.other(),
        }
    }

    /// Zeroed stats, one per configured category followed by "other".
    pub fn empty_stats(&self) -> Vec<CategoryStats> {
        self.categories
            .iter()
            .map(|c| CategoryStats {
                label: c.label.clone(),
                extensions: c.extensions.clone(),
                file_count: 0,
                total_size: 0,
            })
            .chain(std::iter::once(CategoryStats {
                label: CompactString::new(OTHER_LABEL),
                extensions: Vec::new(),
                file_count: 0,
                total_size: 0,
            }))
            .collect()
    }
}
