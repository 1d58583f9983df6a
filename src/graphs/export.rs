use crate::analyzers::{ChartEntry, ScanSummary};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    pub format: ExportFormat,
    pub output_path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    Json,
    Csv,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportData<'a> {
    pub timestamp: DateTime<Utc>,
    pub summary: &'a ScanSummary,
    pub buckets: &'a [ChartEntry],
}

pub struct ExportManager {
    config: ExportConfig,
}

impl ExportManager {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    pub fn export(&self, summary: &ScanSummary, entries: &[ChartEntry]) -> Result<()> {
        match self.config.format {
            ExportFormat::Json => self.export_json(&ExportData {
                timestamp: Utc::now(),
                summary,
                buckets: entries,
            }),
            ExportFormat::Csv => self.export_csv(entries),
        }
    }

    fn export_json<T: Serialize>(&self, data: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(data)?;
        fs::write(&self.config.output_path, json)?;
        Ok(())
    }

    fn export_csv(&self, entries: &[ChartEntry]) -> Result<()> {
        fs::write(&self.config.output_path, buckets_to_csv(entries))?;
        Ok(())
    }
}

/// `focal_length,label,count` rows; the "no data" row leaves the focal length empty
pub fn buckets_to_csv(entries: &[ChartEntry]) -> String {
    let mut csv_content = "focal_length,label,count\n".to_string();
    for entry in entries {
        let focal = entry
            .key
            .focal_length()
            .map(|focal| focal.to_string())
            .unwrap_or_default();
        csv_content.push_str(&format!("{},{},{}\n", focal, entry.label, entry.count));
    }
    csv_content
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::{bucket, order_table, StatisticsReporter};
    use crate::models::{BucketKey, BucketingPolicy, ExclusionSet, FocalLengthReading};
    use std::path::Path;
    use std::time::Duration;

    fn sample() -> (ScanSummary, Vec<ChartEntry>) {
        let readings = vec![
            FocalLengthReading::Present(24.0),
            FocalLengthReading::Present(26.0),
            FocalLengthReading::NoData,
        ];
        let policy = BucketingPolicy::digit_truncated(1);
        let table = bucket(&readings, policy, &ExclusionSet::new());
        let summary = StatisticsReporter::summarize(
            Path::new("/photos"),
            &readings,
            &ExclusionSet::new(),
            policy,
            &table,
            0,
            Duration::from_secs(1),
        );
        (summary, order_table(&table))
    }

    #[test]
    fn test_csv_rows() {
        let entries = vec![
            ChartEntry::new(BucketKey::NoData, 1),
            ChartEntry::new(BucketKey::FocalLength(20), 2),
        ];
        assert_eq!(
            buckets_to_csv(&entries),
            "focal_length,label,count\n,no data,1\n20,20,2\n"
        );
    }

    #[test]
    fn test_json_export_contains_summary_and_buckets() {
        let dir = tempfile::tempdir().unwrap();
        let output_path = dir.path().join("focal.json");
        let (summary, entries) = sample();

        ExportManager::new(ExportConfig {
            format: ExportFormat::Json,
            output_path: output_path.clone(),
        })
        .export(&summary, &entries)
        .unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output_path).unwrap()).unwrap();
        assert_eq!(value["summary"]["files_seen"], 3);
        assert_eq!(value["summary"]["mean_focal_length"], 25.0);
        assert_eq!(value["buckets"][0]["label"], "no data");
        assert_eq!(value["buckets"][1]["count"], 2);
    }

    #[test]
    fn test_csv_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let output_path = dir.path().join("focal.csv");
        let (summary, entries) = sample();

        ExportManager::new(ExportConfig {
            format: ExportFormat::Csv,
            output_path: output_path.clone(),
        })
        .export(&summary, &entries)
        .unwrap();

        let csv = fs::read_to_string(&output_path).unwrap();
        assert!(csv.ends_with("20,20,2\n"));
    }
}
