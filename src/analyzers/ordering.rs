//! Display ordering of a frequency table
//!
//! Charts show focal lengths ascending. The "no data" bar goes first, and is
//! left out entirely when no file lacked a focal length.

use serde::Serialize;

use crate::models::{BucketKey, FrequencyTable};

/// One bar of the chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartEntry {
    pub key: BucketKey,
    pub label: String,
    pub count: u64,
}

impl ChartEntry {
    pub fn new(key: BucketKey, count: u64) -> Self {
        Self {
            key,
            label: key.label(),
            count,
        }
    }
}

/// Orders `table` for display
pub fn order_table(table: &FrequencyTable) -> Vec<ChartEntry> {
    let no_data = table.no_data_count();

    let mut numeric: Vec<(i64, u64)> = table
        .iter()
        .filter_map(|(key, count)| key.focal_length().map(|focal| (focal, count)))
        .collect();
    numeric.sort_by_key(|(focal, _)| *focal);

    let mut entries = Vec::with_capacity(numeric.len() + 1);
    if no_data > 0 {
        entries.push(ChartEntry::new(BucketKey::NoData, no_data));
    }
    entries.extend(
        numeric
            .into_iter()
            .map(|(focal, count)| ChartEntry::new(BucketKey::FocalLength(focal), count)),
    );
    entries
}

/// Label/count pairs for renderers that only need strings
pub fn labelled_pairs(entries: &[ChartEntry]) -> Vec<(String, u64)> {
    entries
        .iter()
        .map(|entry| (entry.label.clone(), entry.count))
        .collect()
}
