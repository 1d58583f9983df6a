//! Shared fixtures for the integration tests
#![allow(dead_code)]

mod exif_jpeg;

pub use exif_jpeg::jpeg_with_focal_length;

use std::fs;
use std::path::Path;

/// Writes a JPEG with the given whole-millimetre focal length
pub fn write_photo(dir: &Path, name: &str, focal_length_mm: u32) {
    write_photo_rational(dir, name, focal_length_mm * 10, 10);
}

pub fn write_photo_rational(dir: &Path, name: &str, numerator: u32, denominator: u32) {
    write_file(dir, name, &jpeg_with_focal_length(numerator, denominator));
}

/// Writes a file with the right extension but no EXIF block at all
pub fn write_bare_file(dir: &Path, name: &str) {
    write_file(dir, name, b"not really a jpeg");
}

fn write_file(dir: &Path, name: &str, contents: &[u8]) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}
