//! Error types for focal length collection and analysis
//!
//! Library code returns [`FocalError`]; the binary and command handlers wrap it
//! in `anyhow::Result` the same way the rest of the application does.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while configuring, collecting, or analysing focal lengths
#[derive(Debug, Error)]
pub enum FocalError {
    /// A user supplied value could not be turned into a typed setting
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// Path collection found no candidate images under the root
    #[error("No readable files found under {root}")]
    NoReadableFiles { root: PathBuf },

    /// The scan root is missing or is not a directory
    #[error("Root path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// The image file could not be opened or read
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The image container or its EXIF block could not be decoded
    #[error("Unreadable EXIF data in {path}: {source}")]
    Exif {
        path: PathBuf,
        #[source]
        source: exif::Error,
    },

    /// A mean was requested over zero present readings
    #[error("Cannot compute a mean focal length without any present readings")]
    EmptyPresentReadings,

    /// The overall scan deadline elapsed before every file was read
    #[error("Scan deadline of {seconds}s exceeded after {completed}/{total} files")]
    DeadlineExceeded {
        seconds: u64,
        completed: usize,
        total: usize,
    },

    /// Layered configuration could not be loaded or deserialised
    #[error("Failed to load configuration: {0}")]
    Config(#[from] ::config::ConfigError),
}

impl FocalError {
    /// Shorthand for an [`FocalError::InvalidConfiguration`] with a message
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }

    /// Create an I/O error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error describes a single image that should count as "no data"
    pub fn is_unreadable_image(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::Exif { .. })
    }
}

pub type Result<T> = std::result::Result<T, FocalError>;
