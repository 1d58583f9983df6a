//! Per-file focal length readings and bucket keys

use serde::{Deserialize, Serialize};
use std::fmt;

/// Label used for the bucket that holds files without a focal length
pub const NO_DATA_LABEL: &str = "no data";

/// Focal length read from one image, in millimetres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FocalLengthReading {
    /// The EXIF focal length tag was present and decodable
    Present(f64),
    /// No EXIF block, no focal length tag, or the file could not be decoded
    NoData,
}

impl FocalLengthReading {
    /// Builds a reading from an EXIF rational, treating a zero denominator as no data
    pub fn from_rational(numerator: u32, denominator: u32) -> Self {
        if denominator == 0 {
            Self::NoData
        } else {
            Self::Present(numerator as f64 / denominator as f64)
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Present(value) => Some(*value),
            Self::NoData => None,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }
}

impl From<Option<f64>> for FocalLengthReading {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::NoData, Self::Present)
    }
}

impl fmt::Display for FocalLengthReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Present(value) => write!(f, "{value}mm"),
            Self::NoData => f.write_str(NO_DATA_LABEL),
        }
    }
}

/// Key of a single bar in the frequency table
///
/// `NoData` sorts before every focal length, so ordered maps keyed by
/// `BucketKey` already hold the "no data" bucket first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BucketKey {
    NoData,
    FocalLength(i64),
}

impl BucketKey {
    pub fn focal_length(&self) -> Option<i64> {
        match self {
            Self::FocalLength(value) => Some(*value),
            Self::NoData => None,
        }
    }

    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FocalLength(value) => write!(f, "{value}"),
            Self::NoData => f.write_str(NO_DATA_LABEL),
        }
    }
}
