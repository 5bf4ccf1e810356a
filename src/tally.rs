//! Frequency counting over per-entity values.
//!
//! Inputs are anything that iterates `(entity, value)` pairs by reference,
//! so `&IndexMap`, `&BTreeMap` and `&HashMap` all work directly.

use std::{cmp::Reverse, collections::BTreeMap};

use derive_more::Deref;
use itertools::Itertools;

/// Histogram mapping bucket keys to occurrence counts.
///
/// Keys iterate in sorted order, so a histogram built twice from the same
/// input is identical, including its iteration order.
#[derive(Clone, Debug, PartialEq, Eq, Deref)]
pub struct Histogram<K: Ord>(BTreeMap<K, usize>);

impl<K: Ord> Default for Histogram<K> {
    fn default() -> Self {
        Histogram(BTreeMap::new())
    }
}

impl<K: Ord> Histogram<K> {
    pub fn new() -> Self {
        Default::default()
    }

    /// Count one more occurrence of `key`.
    pub fn insert(&mut self, key: K) {
        *self.0.entry(key).or_default() += 1;
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    /// Buckets with the most common first, equal counts in key order.
    pub fn by_frequency(&self) -> Vec<(&K, usize)> {
        self.0
            .iter()
            .map(|(k, &n)| (k, n))
            .sorted_by_key(|&(_, n)| Reverse(n))
            .collect()
    }

    pub fn into_inner(self) -> BTreeMap<K, usize> {
        self.0
    }
}

impl<K: Ord> FromIterator<K> for Histogram<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut ret = Histogram::new();
        ret.extend(iter);
        ret
    }
}

impl<K: Ord> Extend<K> for Histogram<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, K: Ord> IntoIterator for &'a Histogram<K> {
    type Item = (&'a K, &'a usize);
    type IntoIter = std::collections::btree_map::Iter<'a, K, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Matched and unmatched entity counts.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchCount {
    /// Expected total minus the unmatched entities. Negative if the expected
    /// total was smaller than the number of unmatched entities.
    pub matched: i64,
    /// Entities with no value.
    pub unmatched: usize,
}

impl MatchCount {
    /// Count matches using the number of input entries as the expected total.
    pub fn from_input<'a, K: 'a, L: 'a>(
        input: impl IntoIterator<Item = (&'a K, &'a Option<L>)>,
    ) -> Self {
        let (mut total, mut unmatched) = (0usize, 0usize);
        for (_, value) in input {
            total += 1;
            if value.is_none() {
                unmatched += 1;
            }
        }

        MatchCount {
            matched: total as i64 - unmatched as i64,
            unmatched,
        }
    }

    /// Matched plus unmatched, the expected total the count was made with.
    pub fn total(&self) -> i64 {
        self.matched + self.unmatched as i64
    }
}

/// Count entities by the length of their label list, absent lists count as
/// length 0.
pub fn count_by_size<'a, K: 'a, L: 'a>(
    input: impl IntoIterator<Item = (&'a K, &'a Option<Vec<L>>)>,
) -> Histogram<usize> {
    input
        .into_iter()
        .map(|(_, labels)| labels.as_ref().map_or(0, Vec::len))
        .collect()
}

/// Count entities by their value, absent values get their own `None` bucket.
pub fn count_by_value<'a, K: 'a, L: Ord + Clone + 'a>(
    input: impl IntoIterator<Item = (&'a K, &'a Option<L>)>,
) -> Histogram<Option<L>> {
    input.into_iter().map(|(_, value)| value.clone()).collect()
}

/// Count how many entities lack a value against a caller-supplied total.
///
/// `total_expected` is taken as given. If it is smaller than the number of
/// absent values, `matched` goes negative.
pub fn count_matches<'a, K: 'a, L: 'a>(
    input: impl IntoIterator<Item = (&'a K, &'a Option<L>)>,
    total_expected: usize,
) -> MatchCount {
    let unmatched = input.into_iter().filter(|(_, v)| v.is_none()).count();

    MatchCount {
        matched: total_expected as i64 - unmatched as i64,
        unmatched,
    }
}

/// Count occurrences of each individual label over all entities.
pub fn count_labels<'a, K: 'a, L: Ord + Clone + 'a>(
    input: impl IntoIterator<Item = (&'a K, &'a Option<Vec<L>>)>,
) -> Histogram<L> {
    input
        .into_iter()
        .flat_map(|(_, labels)| labels.iter().flatten().cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use indexmap::IndexMap;

    use super::*;

    fn samples() -> IndexMap<String, Option<Vec<String>>> {
        [
            ("a", None),
            ("b", Some(vec!["x", "y"])),
            ("c", Some(vec!["x"])),
        ]
        .into_iter()
        .map(|(k, v)| {
            (
                k.to_string(),
                v.map(|v| v.into_iter().map(String::from).collect()),
            )
        })
        .collect()
    }

    fn tissues() -> IndexMap<String, Option<String>> {
        [("a", Some("X")), ("b", Some("Y")), ("c", Some("X"))]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.map(String::from)))
            .collect()
    }

    #[test]
    fn test_count_by_size() {
        let hist = count_by_size(&samples());
        assert_eq!(
            hist.into_inner(),
            BTreeMap::from([(0, 1), (1, 1), (2, 1)])
        );
    }

    #[test]
    fn test_count_by_size_counts_every_entity() {
        // Several entities in one bucket, none dropped.
        let input: BTreeMap<u32, Option<Vec<&str>>> = BTreeMap::from([
            (1, Some(vec!["a", "b"])),
            (2, Some(vec!["c", "d"])),
            (3, None),
            (4, Some(vec![])),
            (5, Some(vec!["e", "f"])),
        ]);
        let hist = count_by_size(&input);
        assert_eq!(hist.get(&2), Some(&3));
        assert_eq!(hist.get(&0), Some(&2));
        assert_eq!(hist.total(), input.len());
    }

    #[test]
    fn test_count_by_value() {
        let hist = count_by_value(&tissues());
        assert_eq!(
            hist.into_inner(),
            BTreeMap::from([(Some("X".to_string()), 2), (Some("Y".into()), 1)])
        );
    }

    #[test]
    fn test_count_by_value_absent_bucket() {
        let input: HashMap<&str, Option<&str>> =
            HashMap::from([("a", None), ("b", Some("X")), ("c", None)]);
        let hist = count_by_value(&input);
        assert_eq!(hist.get(&None), Some(&2));
        assert_eq!(hist.get(&Some("X")), Some(&1));
        assert_eq!(hist.total(), input.len());
    }

    #[test]
    fn test_count_matches() {
        let input: IndexMap<&str, Option<&str>> =
            [("a", Some("X")), ("b", None), ("c", None)]
                .into_iter()
                .collect();
        assert_eq!(
            count_matches(&input, 3),
            MatchCount {
                matched: 1,
                unmatched: 2
            }
        );
    }

    #[test]
    fn test_count_matches_total_too_small() {
        let input: IndexMap<&str, Option<&str>> =
            [("a", None), ("b", None), ("c", None)].into_iter().collect();
        let m = count_matches(&input, 1);
        assert_eq!(m.matched, -2);
        assert_eq!(m.unmatched, 3);
        assert_eq!(m.total(), 1);
    }

    #[test]
    fn test_match_count_from_input() {
        let input: IndexMap<&str, Option<&str>> =
            [("a", Some("X")), ("b", None), ("c", Some("Y"))]
                .into_iter()
                .collect();
        assert_eq!(MatchCount::from_input(&input), count_matches(&input, 3));
    }

    #[test]
    fn test_empty_input() {
        let sizes: IndexMap<String, Option<Vec<String>>> = IndexMap::new();
        let values: IndexMap<String, Option<String>> = IndexMap::new();

        assert!(count_by_size(&sizes).is_empty());
        assert!(count_by_value(&values).is_empty());
        assert!(count_labels(&sizes).is_empty());
        assert_eq!(
            count_matches(&values, 7),
            MatchCount {
                matched: 7,
                unmatched: 0
            }
        );
    }

    #[test]
    fn test_idempotent() {
        let input = samples();
        assert_eq!(count_by_size(&input), count_by_size(&input));
        assert_eq!(count_labels(&input), count_labels(&input));

        let input = tissues();
        assert_eq!(count_by_value(&input), count_by_value(&input));
        assert_eq!(count_matches(&input, 5), count_matches(&input, 5));
    }

    #[test]
    fn test_count_labels() {
        let hist = count_labels(&samples());
        assert_eq!(hist.get(&"x".to_string()), Some(&2));
        assert_eq!(hist.get(&"y".to_string()), Some(&1));
        // Absent lists contribute nothing.
        assert_eq!(hist.total(), 3);
    }

    #[test]
    fn test_by_frequency() {
        let hist: Histogram<&str> =
            ["b", "a", "c", "a", "b", "a", "d"].into_iter().collect();
        assert_eq!(
            hist.by_frequency(),
            vec![(&"a", 3), (&"b", 2), (&"c", 1), (&"d", 1)]
        );
    }
}
