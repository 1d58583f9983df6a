//! Summary statistics over a scan
//!
//! The mean is taken over present readings only, after exclusion. Files with
//! no focal length still count toward the number of files seen.

use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::errors::{FocalError, Result};
use crate::models::{BucketingPolicy, ExclusionSet, FocalLengthReading, FrequencyTable};

/// Arithmetic mean of the present readings
///
/// # Errors
///
/// Returns [`FocalError::EmptyPresentReadings`] when no reading carries a
/// value; callers are expected to skip reporting in that case.
pub fn mean_focal_length(readings: &[FocalLengthReading]) -> Result<f64> {
    let (sum, count) = readings
        .iter()
        .filter_map(FocalLengthReading::value)
        .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));

    if count == 0 {
        return Err(FocalError::EmptyPresentReadings);
    }
    Ok(sum / count as f64)
}

/// Formats a focal length the way reports show it, e.g. `39.33mm`
pub fn format_focal_length(value: f64) -> String {
    format!("{value:.2}mm")
}

/// Everything the text report and the exporters need to know about one run
#[derive(Debug, Clone, Serialize)]
pub struct ScanSummary {
    pub root: PathBuf,
    pub policy: BucketingPolicy,
    pub exclusions: ExclusionSet,
    pub files_seen: usize,
    pub readings_present: usize,
    pub readings_no_data: usize,
    pub readings_excluded: usize,
    pub unreadable_files: usize,
    pub mean_focal_length: Option<f64>,
    pub most_used_bucket: Option<String>,
    pub most_used_count: u64,
    pub elapsed_seconds: f64,
}

/// Builds and prints [`ScanSummary`] values
pub struct StatisticsReporter;

impl StatisticsReporter {
    /// Summarises a run
    ///
    /// `readings` are the raw per-file readings before exclusion; `table` is
    /// the bucketed result of the same readings.
    pub fn summarize(
        root: &Path,
        readings: &[FocalLengthReading],
        exclusions: &ExclusionSet,
        policy: BucketingPolicy,
        table: &FrequencyTable,
        unreadable_files: usize,
        elapsed: Duration,
    ) -> ScanSummary {
        let surviving = exclusions.filter(readings);
        let readings_present = surviving.iter().filter(|r| r.is_present()).count();
        let most_used = table.most_used();

        ScanSummary {
            root: root.to_path_buf(),
            policy,
            exclusions: exclusions.clone(),
            files_seen: readings.len(),
            readings_present,
            readings_no_data: surviving.len() - readings_present,
            readings_excluded: readings.len() - surviving.len(),
            unreadable_files,
            mean_focal_length: mean_focal_length(&surviving).ok(),
            most_used_bucket: most_used.map(|(key, _)| key.label()),
            most_used_count: most_used.map_or(0, |(_, count)| count),
            elapsed_seconds: elapsed.as_secs_f64(),
        }
    }

    /// Renders the plain-text report printed after a scan
    pub fn render_report(summary: &ScanSummary) -> String {
        let mut report = String::new();
        report.push_str("Focal Length Statistics\n");
        report.push_str("=======================\n");
        report.push_str(&format!("Root:            {}\n", summary.root.display()));
        report.push_str(&format!("Bucketing:       {}\n", summary.policy));
        report.push_str(&format!("Excluded values: {}\n", summary.exclusions));
        report.push_str(&format!("Files scanned:   {}\n", summary.files_seen));
        report.push_str(&format!("With focal data: {}\n", summary.readings_present));
        report.push_str(&format!("No data:         {}\n", summary.readings_no_data));
        if summary.unreadable_files > 0 {
            report.push_str(&format!("  (unreadable:   {})\n", summary.unreadable_files));
        }
        report.push_str(&format!("Excluded:        {}\n", summary.readings_excluded));

        match summary.mean_focal_length {
            Some(mean) => report.push_str(&format!(
                "Average focal length: {}\n",
                format_focal_length(mean)
            )),
            None => report.push_str("Average focal length: n/a\n"),
        }

        if let Some(bucket) = &summary.most_used_bucket {
            report.push_str(&format!(
                "Most used:       {} ({} photos)\n",
                bucket, summary.most_used_count
            ));
        }
        report.push_str(&format!(
            "Processing time: {:.3}s\n",
            summary.elapsed_seconds
        ));
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::bucketer::bucket;
    use crate::models::BucketKey;
    use FocalLengthReading::{NoData, Present};

    #[test]
    fn test_mean_two_decimals() {
        let mean = mean_focal_length(&[Present(24.0), Present(24.0), Present(70.0)]).unwrap();
        assert_eq!(format!("{mean:.2}"), "39.33");
        assert_eq!(format_focal_length(mean), "39.33mm");
    }

    #[test]
    fn test_mean_ignores_no_data() {
        let mean = mean_focal_length(&[Present(50.0), NoData, Present(100.0)]).unwrap();
        assert_eq!(mean, 75.0);
    }

    #[test]
    fn test_mean_without_present_readings_is_an_error() {
        assert!(matches!(
            mean_focal_length(&[NoData]),
            Err(FocalError::EmptyPresentReadings)
        ));
        assert!(matches!(
            mean_focal_length(&[]),
            Err(FocalError::EmptyPresentReadings)
        ));
    }

    #[test]
    fn test_summary_counts() {
        let readings = vec![Present(24.0), Present(70.0), Present(70.0), NoData];
        let exclusions: ExclusionSet = [24].into_iter().collect();
        let policy = BucketingPolicy::Typical;
        let table = bucket(&readings, policy, &exclusions);

        let summary = StatisticsReporter::summarize(
            Path::new("/photos"),
            &readings,
            &exclusions,
            policy,
            &table,
            1,
            Duration::from_millis(250),
        );

        assert_eq!(summary.files_seen, 4);
        assert_eq!(summary.readings_present, 2);
        assert_eq!(summary.readings_no_data, 1);
        assert_eq!(summary.readings_excluded, 1);
        assert_eq!(summary.mean_focal_length, Some(70.0));
        assert_eq!(summary.most_used_bucket.as_deref(), Some("70"));
        assert_eq!(summary.most_used_count, 2);
        assert_eq!(table.get(BucketKey::FocalLength(24)), Some(0));

        let report = StatisticsReporter::render_report(&summary);
        assert!(report.contains("Average focal length: 70.00mm"));
        assert!(report.contains("(unreadable:   1)"));
    }

    #[test]
    fn test_summary_without_present_readings() {
        let readings = vec![NoData];
        let policy = BucketingPolicy::digit_truncated(1);
        let table = bucket(&readings, policy, &ExclusionSet::new());
        let summary = StatisticsReporter::summarize(
            Path::new("/photos"),
            &readings,
            &ExclusionSet::new(),
            policy,
            &table,
            0,
            Duration::ZERO,
        );
        assert_eq!(summary.mean_focal_length, None);
        assert!(StatisticsReporter::render_report(&summary).contains("n/a"));
    }
}
