//! Mapping diff: set difference over two keyed collections
//!
//! Partitions the union of keys into three disjoint groups:
//!
//! | Key present in | Lands in |
//! |----------------|----------|
//! | `from` only | `deleted` |
//! | `to` only | `added` |
//! | both | `common`, as `(from_value, to_value)` |
//!
//! Common pairs are returned whether or not the values are equal; the caller
//! decides what a difference means. Iteration order of the result maps is
//! unspecified.

use std::hash::Hash;

use rustc_hash::FxHashMap;

/// Result of a mapping diff
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapDiff<K: Eq + Hash, V> {
    /// Keys only in the new mapping
    pub added: FxHashMap<K, V>,
    /// Keys only in the old mapping
    pub deleted: FxHashMap<K, V>,
    /// Keys in both, paired as `(from, to)`
    pub common: FxHashMap<K, (V, V)>,
}

impl<K: Eq + Hash, V> MapDiff<K, V> {
    /// Whether no key was added or deleted
    pub fn same_keys(&self) -> bool {
        self.added.is_empty() && self.deleted.is_empty()
    }

    /// Number of distinct keys across both inputs
    pub fn key_count(&self) -> usize {
        self.added.len() + self.deleted.len() + self.common.len()
    }
}

/// Diff two mappings by key
pub fn diff_maps<K: Eq + Hash, V>(from: FxHashMap<K, V>, mut to: FxHashMap<K, V>) -> MapDiff<K, V> {
    let mut deleted = FxHashMap::default();
    let mut common = FxHashMap::default();

    for (key, from_value) in from {
        match to.remove(&key) {
            Some(to_value) => {
                common.insert(key, (from_value, to_value));
            }
            None => {
                deleted.insert(key, from_value);
            }
        }
    }

    MapDiff {
        added: to,
        deleted,
        common,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn map(pairs: &[(&'static str, i32)]) -> FxHashMap<&'static str, i32> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_identical_maps_are_all_common() {
        let a = map(&[("abc", 1), ("def", 2), ("ghi", 3), ("jkl", 4)]);
        let result = diff_maps(a.clone(), a);
        assert!(result.added.is_empty());
        assert!(result.deleted.is_empty());
        assert!(result.same_keys());
        assert_eq!(result.common.len(), 4);
        assert_eq!(result.common["def"], (2, 2));
    }

    #[test]
    fn test_partitions_keys() {
        let a = map(&[("abc", 1), ("def", 2), ("ghi", 3), ("jkl", 4)]);
        let b = map(&[("abc", 2), ("ghi", 3), ("jkl", 4), ("xyz", 5), ("fgh", 6)]);
        let result = diff_maps(a, b);

        assert_eq!(result.added, map(&[("xyz", 5), ("fgh", 6)]));
        assert_eq!(result.deleted, map(&[("def", 2)]));
        assert_eq!(result.common.len(), 3);
        // Pairs are kept even when the values differ
        assert_eq!(result.common["abc"], (1, 2));
        assert_eq!(result.common["ghi"], (3, 3));
        assert_eq!(result.key_count(), 6);
    }

    #[test]
    fn test_empty_sides() {
        let a = map(&[("k", 1)]);
        let result = diff_maps(a.clone(), FxHashMap::default());
        assert_eq!(result.deleted, a);

        let result = diff_maps(FxHashMap::default(), a.clone());
        assert_eq!(result.added, a);
        assert!(result.common.is_empty());
    }

    proptest! {
        #[test]
        fn prop_every_key_lands_in_exactly_one_group(
            a in proptest::collection::hash_map(0u8..32, 0u8..4, 0..16),
            b in proptest::collection::hash_map(0u8..32, 0u8..4, 0..16),
        ) {
            let from: FxHashMap<u8, u8> = a.iter().map(|(k, v)| (*k, *v)).collect();
            let to: FxHashMap<u8, u8> = b.iter().map(|(k, v)| (*k, *v)).collect();
            let result = diff_maps(from, to);

            for key in a.keys().chain(b.keys()) {
                let hits = [
                    result.added.contains_key(key),
                    result.deleted.contains_key(key),
                    result.common.contains_key(key),
                ];
                prop_assert_eq!(hits.iter().filter(|h| **h).count(), 1);
            }
            let both = a.keys().filter(|k| b.contains_key(*k)).count();
            prop_assert_eq!(result.common.len(), both);
        }
    }
}
