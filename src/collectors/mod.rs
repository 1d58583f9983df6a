pub mod exif_reader;
pub mod path_collector;
pub mod scan;

pub use exif_reader::{ExifReader, FocalLengthSource};
pub use path_collector::{PathCollector, DEFAULT_EXTENSION};
pub use scan::{FileReading, FocalLengthScanner, ProgressCallback, ScanOptions, ScanOutcome};
