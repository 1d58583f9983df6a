use crate::analyzers::{order_table, ChartEntry, FocalLengthBucketer, ScanSummary, StatisticsReporter};
use crate::cli::commands::ScanArgs;
use crate::collectors::{
    ExifReader, FocalLengthScanner, FocalLengthSource, PathCollector, ProgressCallback, ScanOptions,
};
use crate::config::{AppConfig, Settings};
use crate::errors::FocalError;
use crate::graphs::export::{ExportConfig, ExportFormat, ExportManager};
use crate::graphs::focal_graphs::{AxisLayout, FocalLengthGraph, ImageFormat};
use crate::graphs::terminal::TerminalChart;
use crate::graphs::{ChartRenderer, OutputFormat};
use crate::models::{BucketingPolicy, TYPICAL_FOCAL_LENGTHS};
use anyhow::Result;
use chrono::Utc;
use log::{debug, info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// What one scan produced
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub summary: ScanSummary,
    pub entries: Vec<ChartEntry>,
    /// File written by the renderer or exporter, if any
    pub output_path: Option<PathBuf>,
}

impl ScanReport {
    /// True when exclusion left nothing to count, so no chart was drawn
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|entry| entry.count == 0)
    }
}

/// Runs `scan`, `typical` and `inspect`
pub struct ScanCommandHandler {
    source: Arc<dyn FocalLengthSource>,
    show_progress: bool,
}

impl Default for ScanCommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanCommandHandler {
    pub fn new() -> Self {
        Self::with_source(Arc::new(ExifReader::new()))
    }

    pub fn with_source(source: Arc<dyn FocalLengthSource>) -> Self {
        Self {
            source,
            show_progress: true,
        }
    }

    /// Disables the `00012/00340` progress counter on stderr
    pub fn quiet(mut self) -> Self {
        self.show_progress = false;
        self
    }

    pub async fn handle_scan_command(&self, args: ScanArgs) -> Result<()> {
        let mut config = AppConfig::load(args.config.as_deref())?;
        apply_overrides(&mut config, &args);
        let settings = config.validate()?;

        let render = !args.no_chart;
        match self.run(&args.root, &settings, args.output, render).await {
            Ok(report) => {
                print!("{}", StatisticsReporter::render_report(&report.summary));
                if report.is_empty() {
                    println!("Every reading was excluded; no chart was written.");
                }
                if let Some(path) = &report.output_path {
                    if settings.format.is_image() {
                        println!("Focal length chart saved to: {}", path.display());
                    } else {
                        println!("Focal length data exported to: {}", path.display());
                    }
                }
                Ok(())
            }
            Err(err) => match err.downcast_ref::<FocalError>() {
                Some(FocalError::NoReadableFiles { root }) => {
                    println!("No {} files found under {}.", settings.extension, root.display());
                    Ok(())
                }
                _ => Err(err),
            },
        }
    }

    /// Collects, reads, buckets and reports; renders when `render` is set
    ///
    /// # Errors
    ///
    /// [`FocalError::NoReadableFiles`] when nothing under `root` matches, in
    /// which case nothing is bucketed or rendered.
    pub async fn run(
        &self,
        root: &Path,
        settings: &Settings,
        output: Option<PathBuf>,
        render: bool,
    ) -> Result<ScanReport> {
        let started = Instant::now();

        let paths = PathCollector::with_extension(&settings.extension, settings.case_sensitive)
            .follow_links(settings.follow_links)
            .collect_paths(root)?;
        if paths.is_empty() {
            return Err(FocalError::NoReadableFiles {
                root: root.to_path_buf(),
            }
            .into());
        }
        debug!("Collected {} candidate files under {}", paths.len(), root.display());

        let mut scanner = FocalLengthScanner::new(
            Arc::clone(&self.source),
            ScanOptions {
                workers: settings.workers,
                deadline: settings.deadline,
            },
        );
        if self.show_progress {
            scanner = scanner.with_progress(progress_printer());
        }
        let outcome = scanner.read_all(&paths).await?;
        let readings = outcome.readings();

        let bucketer = FocalLengthBucketer::new(settings.policy, settings.exclusions.clone());
        let table = bucketer.bucket(&readings);
        let entries = order_table(&table);
        debug!("Bucketed {} readings into {} bars", readings.len(), entries.len());

        let mut summary = StatisticsReporter::summarize(
            root,
            &readings,
            &settings.exclusions,
            settings.policy,
            &table,
            outcome.unreadable_count(),
            started.elapsed(),
        );

        let output_path = if !render {
            None
        } else if table.total() == 0 {
            warn!("All {} readings were excluded, skipping the chart", readings.len());
            None
        } else {
            self.render(settings, &summary, &entries, output)?
        };
        summary.elapsed_seconds = started.elapsed().as_secs_f64();
        info!(
            "Scanned {} files in {:.3}s",
            summary.files_seen, summary.elapsed_seconds
        );

        Ok(ScanReport {
            summary,
            entries,
            output_path,
        })
    }

    fn render(
        &self,
        settings: &Settings,
        summary: &ScanSummary,
        entries: &[ChartEntry],
        output: Option<PathBuf>,
    ) -> Result<Option<PathBuf>> {
        let output_path = output.unwrap_or_else(|| default_output_path(settings.format));

        match settings.format {
            OutputFormat::Png | OutputFormat::Svg => {
                let image_format = if settings.format == OutputFormat::Png {
                    ImageFormat::Png
                } else {
                    ImageFormat::Svg
                };
                let graph = FocalLengthGraph::new(settings.chart.clone(), &output_path, image_format)
                    .with_layout(axis_layout(settings.policy));
                graph.render_bar_chart(entries)?;
                Ok(Some(output_path))
            }
            OutputFormat::Terminal => {
                TerminalChart::default().render_bar_chart(entries)?;
                Ok(None)
            }
            OutputFormat::Json | OutputFormat::Csv => {
                let format = if settings.format == OutputFormat::Json {
                    ExportFormat::Json
                } else {
                    ExportFormat::Csv
                };
                ExportManager::new(ExportConfig {
                    format,
                    output_path: output_path.clone(),
                })
                .export(summary, entries)?;
                Ok(Some(output_path))
            }
        }
    }

    pub fn handle_typical_command(&self) -> Result<()> {
        let values: Vec<String> = TYPICAL_FOCAL_LENGTHS
            .iter()
            .map(|focal| format!("{focal}mm"))
            .collect();
        println!("Typical focal lengths ({}):", values.len());
        println!("{}", values.join(", "));
        Ok(())
    }

    pub fn handle_inspect_command(&self, file: &Path) -> Result<()> {
        if !file.is_file() {
            return Err(anyhow::anyhow!("Not a file: {}", file.display()));
        }
        let reading = self.source.read_focal_length(file)?;
        println!("{}: {}", file.display(), reading);
        Ok(())
    }
}

/// Command-line flags win over every other configuration source
pub fn apply_overrides(config: &mut AppConfig, args: &ScanArgs) {
    if let Some(mode) = &args.mode {
        config.mode = mode.clone();
    }
    if let Some(exclusions) = &args.exclusions {
        config.exclusions = exclusions.iter().collect();
    }
    if let Some(digit) = args.digit {
        config.digit = i64::from(digit);
    }
    if args.show_zero {
        config.show_zero_buckets = true;
    }
    if let Some(format) = &args.format {
        config.format = format.clone();
    }
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    if let Some(deadline) = &args.deadline {
        config.deadline = Some(deadline.clone());
    }
    if let Some(extension) = &args.extension {
        config.extension = extension.clone();
    }
    if args.case_insensitive {
        config.case_sensitive = false;
    }
    if args.follow_links {
        config.follow_links = true;
    }
}

/// Numeric x axis only when every bucket step is drawn
pub fn axis_layout(policy: BucketingPolicy) -> AxisLayout {
    match policy.bucket_width() {
        Some(bucket_width) if policy.shows_zero_buckets() => AxisLayout::Numeric { bucket_width },
        _ => AxisLayout::Categorical,
    }
}

fn default_output_path(format: OutputFormat) -> PathBuf {
    let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
    PathBuf::from(format!("focal_lengths_{timestamp}.{}", format.extension()))
}

fn progress_printer() -> ProgressCallback {
    Arc::new(|completed, total| {
        let mut stderr = std::io::stderr().lock();
        let _ = write!(stderr, "\r{completed:05}/{total:05}");
        if completed == total {
            let _ = writeln!(stderr);
        }
        let _ = stderr.flush();
    })
}
