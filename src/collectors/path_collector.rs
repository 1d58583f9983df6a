//! Recursive discovery of candidate image files

use log::{debug, trace, warn};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::errors::{FocalError, Result};

/// Extension matched when nothing else is configured
pub const DEFAULT_EXTENSION: &str = "JPG";

/// Walks a directory tree and gathers files with a given extension
///
/// Hidden files and directories (names starting with `.`) are skipped, the
/// same way shell-style `**/*.JPG` globbing skips them.
#[derive(Debug, Clone)]
pub struct PathCollector {
    extension: String,
    case_sensitive: bool,
    follow_links: bool,
}

impl Default for PathCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl PathCollector {
    /// Collector for `*.JPG`, matched case-sensitively
    pub fn new() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            case_sensitive: true,
            follow_links: false,
        }
    }

    pub fn with_extension(extension: impl Into<String>, case_sensitive: bool) -> Self {
        Self {
            extension: extension.into().trim_start_matches('.').to_string(),
            case_sensitive,
            follow_links: false,
        }
    }

    pub fn follow_links(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }

    /// Whether `path` has the configured extension
    pub fn matches(&self, path: &Path) -> bool {
        let Some(extension) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        if self.case_sensitive {
            extension == self.extension
        } else {
            extension.eq_ignore_ascii_case(&self.extension)
        }
    }

    /// Returns every matching file under `root`, deduplicated and sorted
    ///
    /// Unreadable directory entries are logged and skipped. An empty result is
    /// not an error here; callers decide how to treat it.
    pub fn collect_paths(&self, root: &Path) -> Result<BTreeSet<PathBuf>> {
        if !root.is_dir() {
            return Err(FocalError::NotADirectory {
                path: root.to_path_buf(),
            });
        }

        let mut paths = BTreeSet::new();
        let walker = WalkDir::new(root)
            .follow_links(self.follow_links)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("Skipping unreadable entry under {}: {}", root.display(), err);
                    continue;
                }
            };

            if entry.file_type().is_file() && self.matches(entry.path()) {
                trace!("Found candidate image {}", entry.path().display());
                paths.insert(entry.into_path());
            }
        }

        debug!(
            "Collected {} *.{} files under {}",
            paths.len(),
            self.extension,
            root.display()
        );
        Ok(paths)
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}
