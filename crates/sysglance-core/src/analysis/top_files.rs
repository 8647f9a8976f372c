/// Bounded top-N largest files.
///
/// Keeps only the N best records seen so far in a min-heap whose top is the
/// weakest retained entry, so memory stays at O(N) no matter how many files
/// the walk visits. "Best" is a total order: larger size first, and for
/// equal sizes the lexicographically smaller path first. Because the order
/// is total, the retained set does not depend on visit order, and two
/// partial structures can be merged into exactly the top-N of their union.
use crate::model::{CategoryId, FileRecord};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::path::Path;

/// Default number of largest files reported.
pub const DEFAULT_TOP_N: usize = 10;

/// Heap entry ordered so that `a > b` means `a` ranks ahead of `b`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Ranked(FileRecord);

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .size
            .cmp(&other.0.size)
            .then_with(|| other.0.path.cmp(&self.0.path))
    }
}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone)]
pub struct TopFiles {
    capacity: usize,
    heap: BinaryHeap<Reverse<Ranked>>,
}

impl TopFiles {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            // +1: `push_record` briefly holds one extra entry before evicting.
            heap: BinaryHeap::with_capacity(capacity.saturating_add(1).min(1_024)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Would a file of this size and path make the cut right now?
    fn admits(&self, path: &Path, size: u64) -> bool {
        if self.capacity == 0 {
            return false;
        }
        if self.heap.len() < self.capacity {
            return true;
        }
        match self.heap.peek() {
            Some(Reverse(weakest)) => {
                size > weakest.0.size || (size == weakest.0.size && path < weakest.0.path.as_path())
            }
            None => true,
        }
    }

    /// Offer a visited file. The path is only copied when the file qualifies.
    pub fn offer(&mut self, path: &Path, size: u64, category: CategoryId) {
        if self.admits(path, size) {
            self.push_record(FileRecord::new(path.to_path_buf(), size, category));
        }
    }

    fn push_record(&mut self, record: FileRecord) {
        if !self.admits(&record.path, record.size) {
            return;
        }
        self.heap.push(Reverse(Ranked(record)));
        if self.heap.len() > self.capacity {
            self.heap.pop();
        }
    }

    /// Fold another partial result into this one.
    ///
    /// Associative and commutative: the outcome is the top-N of the union of
    /// both inputs, whatever order partial results are merged in.
    pub fn merge(&mut self, other: TopFiles) {
        for Reverse(Ranked(record)) in other.heap {
            self.push_record(record);
        }
    }

    /// Drain into a list ordered by size descending, ties by ascending path.
    pub fn into_sorted_vec(self) -> Vec<FileRecord> {
        // Ascending order of `Reverse<Ranked>` is descending rank.
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|Reverse(Ranked(record))| record)
            .collect()
    }
}

impl Default for TopFiles {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_N)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAT: CategoryId = CategoryId(0);

    fn filled(capacity: usize, files: &[(&str, u64)]) -> TopFiles {
        let mut top = TopFiles::new(capacity);
        for (path, size) in files {
            top.offer(Path::new(path), *size, CAT);
        }
        top
    }

    fn summary(records: &[FileRecord]) -> Vec<(String, u64)> {
        records
            .iter()
            .map(|r| (r.path.to_string_lossy().into_owned(), r.size))
            .collect()
    }

    #[test]
    fn keeps_largest_in_descending_order() {
        let top = filled(
            3,
            &[("/a", 10), ("/b", 50), ("/c", 30), ("/d", 40), ("/e", 20)],
        );
        assert_eq!(
            summary(&top.into_sorted_vec()),
            vec![
                ("/b".to_string(), 50),
                ("/d".to_string(), 40),
                ("/c".to_string(), 30)
            ]
        );
    }

    #[test]
    fn fewer_files_than_capacity() {
        let top = filled(10, &[("/x", 1), ("/y", 2)]);
        assert_eq!(top.len(), 2);
        assert_eq!(top.into_sorted_vec()[0].size, 2);
    }

    #[test]
    fn zero_capacity_retains_nothing() {
        let top = filled(0, &[("/x", 1), ("/y", 2)]);
        assert!(top.into_sorted_vec().is_empty());
    }

    /// Equal sizes are broken by path, independent of arrival order.
    #[test]
    fn ties_break_by_path_regardless_of_order() {
        let forward = filled(2, &[("/a", 5), ("/b", 5), ("/c", 5)]);
        let backward = filled(2, &[("/c", 5), ("/b", 5), ("/a", 5)]);
        let expected = vec![("/a".to_string(), 5), ("/b".to_string(), 5)];
        assert_eq!(summary(&forward.into_sorted_vec()), expected);
        assert_eq!(summary(&backward.into_sorted_vec()), expected);
    }

    #[test]
    fn merge_equals_single_pass() {
        let files = [
            ("/a", 7),
            ("/b", 3),
            ("/c", 9),
            ("/d", 7),
            ("/e", 1),
            ("/f", 12),
        ];
        let single = filled(3, &files);

        let mut left = filled(3, &files[..2]);
        let middle = filled(3, &files[2..4]);
        let right = filled(3, &files[4..]);
        left.merge(right);
        left.merge(middle);

        assert_eq!(left.into_sorted_vec(), single.into_sorted_vec());
    }

    #[test]
    fn excluded_files_are_never_larger_than_the_smallest_kept() {
        let sizes: Vec<(String, u64)> = (0..100u64)
            .map(|i| (format!("/f{i:03}"), (i * 37) % 101))
            .collect();
        let mut top = TopFiles::new(10);
        for (p, s) in &sizes {
            top.offer(Path::new(p), *s, CAT);
        }
        let kept = top.into_sorted_vec();
        let min_kept = kept.last().map(|r| r.size).unwrap();
        for (p, s) in &sizes {
            if !kept.iter().any(|r| r.path == Path::new(p)) {
                assert!(*s <= min_kept, "{p} ({s}) excluded but larger than {min_kept}");
            }
        }
        assert!(kept.windows(2).all(|w| w[0].size >= w[1].size));
    }
}
