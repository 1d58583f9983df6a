//! Focal lengths the operator wants left out of the statistics

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::reading::FocalLengthReading;

/// Set of integer focal lengths to drop before bucketing
///
/// Matching compares the raw reading, so `24.0` is excluded by `24` while
/// `24.5` is not. "No data" readings are never excluded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExclusionSet(BTreeSet<i64>);

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, focal_length: i64) -> bool {
        self.0.contains(&focal_length)
    }

    /// Whether `reading` should be removed before bucketing
    pub fn excludes(&self, reading: &FocalLengthReading) -> bool {
        match reading {
            FocalLengthReading::Present(value) => {
                value.fract() == 0.0
                    && *value >= i64::MIN as f64
                    && *value <= i64::MAX as f64
                    && self.0.contains(&(*value as i64))
            }
            FocalLengthReading::NoData => false,
        }
    }

    /// Keeps the readings that survive exclusion, preserving their order
    pub fn filter(&self, readings: &[FocalLengthReading]) -> Vec<FocalLengthReading> {
        if self.0.is_empty() {
            return readings.to_vec();
        }
        readings
            .iter()
            .filter(|reading| !self.excludes(reading))
            .copied()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<i64> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for ExclusionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("none");
        }
        let values: Vec<String> = self.0.iter().map(|v| format!("{v}mm")).collect();
        f.write_str(&values.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use FocalLengthReading::{NoData, Present};

    #[test]
    fn test_filter_drops_exact_matches_only() {
        let exclusions: ExclusionSet = [24].into_iter().collect();
        let readings = vec![Present(24.0), Present(24.5), Present(70.0), NoData];
        assert_eq!(
            exclusions.filter(&readings),
            vec![Present(24.5), Present(70.0), NoData]
        );
    }

    #[test]
    fn test_filter_is_order_independent() {
        let exclusions: ExclusionSet = [24].into_iter().collect();
        let forward = exclusions.filter(&[Present(24.0), Present(70.0), Present(85.0)]);
        let backward = exclusions.filter(&[Present(85.0), Present(70.0), Present(24.0)]);
        assert_eq!(forward, vec![Present(70.0), Present(85.0)]);
        assert_eq!(backward, vec![Present(85.0), Present(70.0)]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let exclusions: ExclusionSet = [24, 70].into_iter().collect();
        let readings = vec![Present(24.0), Present(70.0), Present(85.0), NoData];
        let once = exclusions.filter(&readings);
        assert_eq!(exclusions.filter(&once), once);
    }

    #[test]
    fn test_display() {
        assert_eq!(ExclusionSet::new().to_string(), "none");
        let exclusions: ExclusionSet = [70, 24].into_iter().collect();
        assert_eq!(exclusions.to_string(), "24mm, 70mm");
    }
}
