//! Bucketing policies and the canonical focal length list

use serde::{Deserialize, Serialize};
use std::fmt;

/// Common lens markings used as bucket anchors by [`BucketingPolicy::Typical`], ascending
pub const TYPICAL_FOCAL_LENGTHS: [i64; 30] = [
    11, 14, 16, 17, 18, 20, 24, 28, 35, 40, 50, 70, 85, 90, 100, 105, 135, 180, 200, 300, 400,
    500, 600, 800, 1000, 1200, 1600, 2000, 2400, 3000,
];

/// Default number of truncated digits (buckets of width 10)
pub const DEFAULT_TRUNCATION_DIGIT: u32 = 1;

/// Largest digit whose bucket width still fits in an `i64`
pub const MAX_TRUNCATION_DIGIT: u32 = 18;

/// How readings are grouped into buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BucketingPolicy {
    /// Snap down to the nearest canonical lens focal length
    Typical,
    /// Zero the lowest `digit` decimal digits, i.e. buckets of width `10^digit`
    DigitTruncated {
        digit: u32,
        /// Emit zero-count buckets for every width step between the smallest and largest key
        fill_zero_buckets: bool,
    },
}

impl BucketingPolicy {
    pub fn digit_truncated(digit: u32) -> Self {
        Self::DigitTruncated {
            digit,
            fill_zero_buckets: false,
        }
    }

    /// Width of one bucket, `None` for the typical policy
    pub fn bucket_width(&self) -> Option<i64> {
        match self {
            Self::Typical => None,
            Self::DigitTruncated { digit, .. } => Some(10i64.pow(*digit)),
        }
    }

    /// Whether every bucket between the extremes is shown, including empty ones
    pub fn shows_zero_buckets(&self) -> bool {
        match self {
            Self::Typical => true,
            Self::DigitTruncated {
                fill_zero_buckets, ..
            } => *fill_zero_buckets,
        }
    }
}

impl Default for BucketingPolicy {
    fn default() -> Self {
        Self::Typical
    }
}

impl fmt::Display for BucketingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Typical => f.write_str("typical focal lengths"),
            Self::DigitTruncated { digit, .. } => {
                write!(f, "truncated to {} digit(s) (width {})", digit, 10i64.pow(*digit))
            }
        }
    }
}
