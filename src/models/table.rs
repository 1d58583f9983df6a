//! Frequency table produced by the bucketer

use serde::Serialize;
use std::collections::BTreeMap;

use super::reading::BucketKey;

/// Count of readings per bucket
///
/// Built once per run and only read afterwards. Keys iterate in ascending
/// order with the "no data" bucket first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FrequencyTable {
    counts: BTreeMap<BucketKey, u64>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensures `key` is present without changing an existing count
    pub(crate) fn seed(&mut self, key: BucketKey) {
        self.counts.entry(key).or_insert(0);
    }

    pub(crate) fn increment(&mut self, key: BucketKey) {
        *self.counts.entry(key).or_insert(0) += 1;
    }

    pub fn get(&self, key: BucketKey) -> Option<u64> {
        self.counts.get(&key).copied()
    }

    /// Count of the "no data" bucket, 0 when absent
    pub fn no_data_count(&self) -> u64 {
        self.get(BucketKey::NoData).unwrap_or(0)
    }

    /// Sum of all bucket counts
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BucketKey, u64)> + '_ {
        self.counts.iter().map(|(key, count)| (*key, *count))
    }

    /// Focal length bucket with the highest count; ties resolve to the smaller key
    pub fn most_used(&self) -> Option<(BucketKey, u64)> {
        self.iter()
            .filter(|(key, count)| *key != BucketKey::NoData && *count > 0)
            .fold(None, |best, (key, count)| match best {
                Some((_, best_count)) if best_count >= count => best,
                _ => Some((key, count)),
            })
    }
}

impl FromIterator<(BucketKey, u64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (BucketKey, u64)>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}
