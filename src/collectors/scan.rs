//! Concurrent focal length reading over a set of files
//!
//! Files are read on tokio's blocking pool, at most `workers` at a time.
//! Results are put back in path order before they are returned, so the
//! outcome never depends on which read finished first.

use log::{debug, warn};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use super::exif_reader::FocalLengthSource;
use crate::errors::{FocalError, Result};
use crate::models::FocalLengthReading;

/// Called with `(completed, total)` after every file
pub type ProgressCallback = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// Tuning for a scan
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Maximum number of files read at the same time
    pub workers: usize,
    /// Abort the whole scan if it runs longer than this
    ///
    /// Reads already running on the blocking pool cannot be cancelled. They
    /// finish in the background, and a runtime shut down normally waits for
    /// them, so the binary exits the process directly on error.
    pub deadline: Option<Duration>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            deadline: None,
        }
    }
}

/// Number of available CPUs, falling back to 1
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Reading for one file
#[derive(Debug, Clone, Serialize)]
pub struct FileReading {
    pub path: PathBuf,
    pub reading: FocalLengthReading,
    /// Why the file counted as "no data", when it could not be read at all
    pub error: Option<String>,
}

/// All readings of a scan, in path order
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanOutcome {
    pub files: Vec<FileReading>,
}

impl ScanOutcome {
    pub fn readings(&self) -> Vec<FocalLengthReading> {
        self.files.iter().map(|f| f.reading).collect()
    }

    /// Files whose reading failed outright, as opposed to files without a tag
    pub fn unreadable_count(&self) -> usize {
        self.files.iter().filter(|f| f.error.is_some()).count()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Reads focal lengths for many files through a [`FocalLengthSource`]
pub struct FocalLengthScanner {
    source: Arc<dyn FocalLengthSource>,
    options: ScanOptions,
    progress: Option<ProgressCallback>,
}

impl FocalLengthScanner {
    pub fn new(source: Arc<dyn FocalLengthSource>, options: ScanOptions) -> Self {
        Self {
            source,
            options,
            progress: None,
        }
    }

    pub fn with_progress(mut self, progress: ProgressCallback) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Reads every path; one failing file never aborts the others
    ///
    /// # Errors
    ///
    /// Only [`FocalError::DeadlineExceeded`], when a deadline is configured
    /// and elapses first. The error is returned as soon as the deadline hits,
    /// without waiting for reads that are still in flight.
    pub async fn read_all(&self, paths: &BTreeSet<PathBuf>) -> Result<ScanOutcome> {
        let total = paths.len();
        let workers = self.options.workers.max(1);
        debug!("Reading {total} files with {workers} workers");

        let semaphore = Arc::new(Semaphore::new(workers));
        let mut tasks = JoinSet::new();

        for (index, path) in paths.iter().cloned().enumerate() {
            let semaphore = Arc::clone(&semaphore);
            let source = Arc::clone(&self.source);
            tasks.spawn(async move {
                let permit = semaphore.acquire_owned().await.ok();
                let read_path = path.clone();
                let joined = tokio::task::spawn_blocking(move || {
                    let _permit = permit;
                    source.read_focal_length(&read_path)
                })
                .await;

                let file = match joined {
                    Ok(Ok(reading)) => FileReading {
                        path,
                        reading,
                        error: None,
                    },
                    Ok(Err(err)) => {
                        warn!("Treating {} as no data: {}", path.display(), err);
                        FileReading {
                            path,
                            reading: FocalLengthReading::NoData,
                            error: Some(err.to_string()),
                        }
                    }
                    Err(join_err) => {
                        warn!("Reader task for {} failed: {}", path.display(), join_err);
                        FileReading {
                            path,
                            reading: FocalLengthReading::NoData,
                            error: Some(join_err.to_string()),
                        }
                    }
                };
                (index, file)
            });
        }

        let mut collected: Vec<(usize, FileReading)> = Vec::with_capacity(total);
        let collect = async {
            while let Some(joined) = tasks.join_next().await {
                match joined {
                    Ok(entry) => collected.push(entry),
                    Err(err) => warn!("Scan task aborted: {err}"),
                }
                if let Some(progress) = &self.progress {
                    progress(collected.len(), total);
                }
            }
        };

        match self.options.deadline {
            Some(deadline) => {
                if tokio::time::timeout(deadline, collect).await.is_err() {
                    tasks.abort_all();
                    return Err(FocalError::DeadlineExceeded {
                        seconds: deadline.as_secs(),
                        completed: collected.len(),
                        total,
                    });
                }
            }
            None => collect.await,
        }

        collected.sort_by_key(|(index, _)| *index);
        Ok(ScanOutcome {
            files: collected.into_iter().map(|(_, file)| file).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::Path;

    /// Returns canned readings and fails for unknown paths
    struct CannedSource {
        readings: HashMap<PathBuf, f64>,
        delay: Duration,
    }

    impl FocalLengthSource for CannedSource {
        fn read_focal_length(&self, path: &Path) -> Result<FocalLengthReading> {
            std::thread::sleep(self.delay);
            match self.readings.get(path) {
                Some(value) => Ok(FocalLengthReading::Present(*value)),
                None => Err(FocalError::io(
                    path,
                    std::io::Error::new(std::io::ErrorKind::InvalidData, "corrupt"),
                )),
            }
        }
    }

    fn canned(entries: &[(&str, f64)], delay: Duration) -> Arc<dyn FocalLengthSource> {
        Arc::new(CannedSource {
            readings: entries
                .iter()
                .map(|(p, v)| (PathBuf::from(p), *v))
                .collect(),
            delay,
        })
    }

    fn paths(names: &[&str]) -> BTreeSet<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    #[tokio::test]
    async fn test_results_follow_path_order() {
        let source = canned(&[("c.JPG", 70.0), ("a.JPG", 24.0), ("b.JPG", 50.0)], Duration::ZERO);
        let scanner = FocalLengthScanner::new(
            source,
            ScanOptions {
                workers: 3,
                deadline: None,
            },
        );
        let outcome = scanner
            .read_all(&paths(&["c.JPG", "a.JPG", "b.JPG"]))
            .await
            .unwrap();
        assert_eq!(
            outcome.readings(),
            vec![
                FocalLengthReading::Present(24.0),
                FocalLengthReading::Present(50.0),
                FocalLengthReading::Present(70.0)
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_file_becomes_no_data() {
        let source = canned(&[("a.JPG", 24.0)], Duration::ZERO);
        let scanner = FocalLengthScanner::new(source, ScanOptions::default());
        let outcome = scanner
            .read_all(&paths(&["a.JPG", "broken.JPG"]))
            .await
            .unwrap();
        assert_eq!(outcome.len(), 2);
        assert_eq!(outcome.unreadable_count(), 1);
        assert_eq!(outcome.files[1].reading, FocalLengthReading::NoData);
        assert!(outcome.files[1].error.as_deref().unwrap().contains("corrupt"));
    }

    #[tokio::test]
    async fn test_progress_reaches_total() {
        let source = canned(&[("a.JPG", 24.0), ("b.JPG", 35.0)], Duration::ZERO);
        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let scanner = FocalLengthScanner::new(source, ScanOptions::default())
            .with_progress(Arc::new(move |done, total| {
                sink.lock().unwrap().push((done, total));
            }));
        scanner.read_all(&paths(&["a.JPG", "b.JPG"])).await.unwrap();
        assert_eq!(seen.lock().unwrap().last(), Some(&(2, 2)));
    }

    #[tokio::test]
    async fn test_deadline_exceeded() {
        let source = canned(&[("a.JPG", 24.0), ("b.JPG", 35.0)], Duration::from_millis(300));
        let scanner = FocalLengthScanner::new(
            source,
            ScanOptions {
                workers: 1,
                deadline: Some(Duration::from_millis(50)),
            },
        );
        let result = scanner.read_all(&paths(&["a.JPG", "b.JPG"])).await;
        assert!(matches!(
            result,
            Err(FocalError::DeadlineExceeded { total: 2, .. })
        ));
    }

    #[tokio::test]
    async fn test_deadline_does_not_wait_for_hung_read() {
        let source = canned(&[("a.JPG", 24.0)], Duration::from_secs(2));
        let scanner = FocalLengthScanner::new(
            source,
            ScanOptions {
                workers: 1,
                deadline: Some(Duration::from_millis(50)),
            },
        );
        let started = std::time::Instant::now();
        let result = scanner.read_all(&paths(&["a.JPG"])).await;
        assert!(matches!(
            result,
            Err(FocalError::DeadlineExceeded { completed: 0, total: 1, .. })
        ));
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_empty_path_set() {
        let scanner = FocalLengthScanner::new(canned(&[], Duration::ZERO), ScanOptions::default());
        let outcome = scanner.read_all(&BTreeSet::new()).await.unwrap();
        assert!(outcome.is_empty());
    }
}
