//! Focal length statistics for photo libraries
//!
//! Collects image paths, reads their EXIF focal length, buckets the values
//! and renders the result as a bar chart or an export.

pub mod analyzers;
pub mod cli;
pub mod collectors;
pub mod config;
pub mod errors;
pub mod graphs;
pub mod models;

pub use errors::{FocalError, Result};
