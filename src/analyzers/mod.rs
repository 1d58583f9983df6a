pub mod bucketer;
pub mod ordering;
pub mod statistics;

pub use bucketer::{bucket, bucket_key, snap_to_typical, FocalLengthBucketer};
pub use ordering::{labelled_pairs, order_table, ChartEntry};
pub use statistics::{format_focal_length, mean_focal_length, ScanSummary, StatisticsReporter};
