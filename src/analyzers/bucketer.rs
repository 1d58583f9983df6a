// FocalLengthBucketer: groups focal length readings into chart buckets
// Applies the exclusion set first, then maps each surviving reading to a bucket key
// under the configured policy and counts readings per key

use crate::models::{
    BucketKey, BucketingPolicy, ExclusionSet, FocalLengthReading, FrequencyTable,
    TYPICAL_FOCAL_LENGTHS,
};
use log::{debug, trace, warn};

/// Most empty buckets one table may gain from zero-bucket filling
pub const MAX_FILLED_BUCKETS: i64 = 10_000;

/// Turns a list of readings into a [`FrequencyTable`]
///
/// The bucketer holds no per-run state: the same readings, policy and
/// exclusions always produce the same table, regardless of reading order.
///
/// # Example
///
/// ```rust
/// use focal_stats::analyzers::FocalLengthBucketer;
/// use focal_stats::models::{BucketKey, BucketingPolicy, ExclusionSet, FocalLengthReading};
///
/// let bucketer = FocalLengthBucketer::new(BucketingPolicy::digit_truncated(1), ExclusionSet::new());
/// let table = bucketer.bucket(&[FocalLengthReading::Present(47.5)]);
/// assert_eq!(table.get(BucketKey::FocalLength(40)), Some(1));
/// ```
#[derive(Debug, Clone)]
pub struct FocalLengthBucketer {
    policy: BucketingPolicy,
    exclusions: ExclusionSet,
}

impl FocalLengthBucketer {
    pub fn new(policy: BucketingPolicy, exclusions: ExclusionSet) -> Self {
        Self { policy, exclusions }
    }

    /// Filters, maps and counts `readings`
    pub fn bucket(&self, readings: &[FocalLengthReading]) -> FrequencyTable {
        let surviving = self.exclusions.filter(readings);
        debug!(
            "Bucketing {} readings ({} excluded) by {}",
            surviving.len(),
            readings.len() - surviving.len(),
            self.policy
        );

        let mut table = FrequencyTable::new();

        if matches!(self.policy, BucketingPolicy::Typical) {
            for focal_length in TYPICAL_FOCAL_LENGTHS {
                table.seed(BucketKey::FocalLength(focal_length));
            }
        }

        for reading in &surviving {
            let key = bucket_key(reading, self.policy);
            trace!("{reading} -> {key}");
            table.increment(key);
        }

        if let BucketingPolicy::DigitTruncated {
            fill_zero_buckets: true,
            ..
        } = self.policy
        {
            fill_empty_buckets(&mut table, self.policy.bucket_width().unwrap_or(1));
        }

        table
    }
}

/// Convenience wrapper for a one-off bucketing pass
pub fn bucket(
    readings: &[FocalLengthReading],
    policy: BucketingPolicy,
    exclusions: &ExclusionSet,
) -> FrequencyTable {
    FocalLengthBucketer::new(policy, exclusions.clone()).bucket(readings)
}

/// Maps a single reading to its bucket key under `policy`
pub fn bucket_key(reading: &FocalLengthReading, policy: BucketingPolicy) -> BucketKey {
    let Some(value) = reading.value() else {
        return BucketKey::NoData;
    };

    match policy {
        BucketingPolicy::Typical => BucketKey::FocalLength(snap_to_typical(value.trunc() as i64)),
        BucketingPolicy::DigitTruncated { digit, .. } => {
            let width = 10f64.powi(digit as i32);
            BucketKey::FocalLength(((value / width).floor() * width) as i64)
        }
    }
}

/// Largest canonical focal length at or below `truncated`
///
/// Values with no canonical entry at or below them, and values that are zero
/// or negative, keep their own truncated value.
pub fn snap_to_typical(truncated: i64) -> i64 {
    if truncated <= 0 {
        return truncated;
    }
    TYPICAL_FOCAL_LENGTHS
        .iter()
        .rev()
        .find(|&&canonical| canonical <= truncated)
        .copied()
        .unwrap_or(truncated)
}

fn fill_empty_buckets(table: &mut FrequencyTable, width: i64) {
    let keys: Vec<i64> = table.iter().filter_map(|(key, _)| key.focal_length()).collect();
    let (Some(&min), Some(&max)) = (keys.first(), keys.last()) else {
        return;
    };

    let steps = (i128::from(max) - i128::from(min)) / i128::from(width.max(1));
    if steps > i128::from(MAX_FILLED_BUCKETS) {
        warn!(
            "Not filling {steps} empty buckets between {min} and {max}; showing used buckets only"
        );
        return;
    }

    let mut key = min;
    while key < max {
        table.seed(BucketKey::FocalLength(key));
        key = match key.checked_add(width) {
            Some(next) => next,
            None => break,
        };
    }
}
