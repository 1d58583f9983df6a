//! Parse-or-fail validation of operator supplied settings
//!
//! Every function here turns raw text into a typed value or returns
//! [`FocalError::InvalidConfiguration`]. Nothing re-prompts; retry loops
//! belong to whatever front end collects the text.

use chrono::Duration;
use log::trace;

use crate::errors::{FocalError, Result};
use crate::models::{
    BucketingPolicy, ExclusionSet, DEFAULT_TRUNCATION_DIGIT, MAX_TRUNCATION_DIGIT,
};

/// Which bucketing policy family the operator asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketingMode {
    Typical,
    DigitTruncated,
}

impl BucketingMode {
    /// Combines the mode with the digit and zero-bucket settings
    pub fn into_policy(self, digit: u32, fill_zero_buckets: bool) -> BucketingPolicy {
        match self {
            Self::Typical => BucketingPolicy::Typical,
            Self::DigitTruncated => BucketingPolicy::DigitTruncated {
                digit,
                fill_zero_buckets,
            },
        }
    }
}

/// Folds common full-width input down to ASCII and strips whitespace
///
/// Lowercases, maps full-width digits, letters, commas and minus signs to
/// their ASCII forms, treats the ideographic comma `、` as `,`, and removes
/// ASCII and ideographic spaces.
pub fn normalize_input(input: &str) -> String {
    let normalized: String = input
        .chars()
        .filter(|c| !matches!(c, ' ' | '\t' | '\u{3000}'))
        .map(|c| match c {
            '、' => ',',
            // U+FF01..=U+FF5E mirror ASCII 0x21..=0x7E
            '\u{FF01}'..='\u{FF5E}' => char::from_u32(c as u32 - 0xFEE0).unwrap_or(c),
            '\u{2212}' => '-',
            _ => c,
        })
        .flat_map(char::to_lowercase)
        .collect();
    trace!("Normalized input {input:?} -> {normalized:?}");
    normalized
}

/// Comma separated integer focal lengths, e.g. `24,70`; empty input excludes nothing
pub fn parse_exclusions(input: &str) -> Result<ExclusionSet> {
    let normalized = normalize_input(input);
    if normalized.is_empty() {
        return Ok(ExclusionSet::new());
    }

    normalized
        .split(',')
        .map(|token| {
            let token = token.trim_end_matches("mm");
            token.parse::<i64>().map_err(|_| {
                FocalError::invalid(format!(
                    "Exclusion list must contain whole numbers only, got {token:?}"
                ))
            })
        })
        .collect()
}

/// Number of truncated digits; empty input means the default of 1
pub fn parse_digit(input: &str) -> Result<u32> {
    let normalized = normalize_input(input);
    if normalized.is_empty() {
        return Ok(DEFAULT_TRUNCATION_DIGIT);
    }

    let digit: i64 = normalized.parse().map_err(|_| {
        FocalError::invalid(format!("Truncation digit must be a number, got {normalized:?}"))
    })?;
    validate_digit(digit)
}

/// Range check shared by the text parser and numeric configuration sources
pub fn validate_digit(digit: i64) -> Result<u32> {
    if digit < 0 {
        return Err(FocalError::invalid(format!(
            "Truncation digit must not be negative, got {digit}"
        )));
    }
    if digit > MAX_TRUNCATION_DIGIT as i64 {
        return Err(FocalError::invalid(format!(
            "Truncation digit must be at most {MAX_TRUNCATION_DIGIT}, got {digit}"
        )));
    }
    Ok(digit as u32)
}

/// `0`, `typical` or empty for typical buckets; `1`, `by_image` or `digit` for truncation
pub fn parse_mode(input: &str) -> Result<BucketingMode> {
    match normalize_input(input).as_str() {
        "" | "0" | "typical" => Ok(BucketingMode::Typical),
        "1" | "by_image" | "by-image" | "digit" | "truncate" => Ok(BucketingMode::DigitTruncated),
        other => Err(FocalError::invalid(format!(
            "Unknown bucketing mode {other:?}, expected typical or digit"
        ))),
    }
}

/// Yes/no switch; empty input means no
pub fn parse_flag(input: &str) -> Result<bool> {
    match normalize_input(input).as_str() {
        "1" | "y" | "yes" | "true" => Ok(true),
        "" | "0" | "n" | "no" | "false" => Ok(false),
        other => Err(FocalError::invalid(format!(
            "Expected yes or no, got {other:?}"
        ))),
    }
}

/// Durations such as `30s`, `5m`, `1h` or `2d`; a bare number means seconds
pub fn parse_deadline(input: &str) -> Result<std::time::Duration> {
    let period = normalize_input(input);
    let invalid = || FocalError::invalid(format!("Invalid deadline {input:?}"));

    let (amount, unit) = match period.char_indices().last() {
        Some((idx, unit @ ('s' | 'm' | 'h' | 'd'))) => (&period[..idx], unit),
        Some(_) => (period.as_str(), 's'),
        None => return Err(invalid()),
    };
    let amount: i64 = amount.parse().map_err(|_| invalid())?;
    if amount <= 0 {
        return Err(invalid());
    }

    let duration = match unit {
        's' => Duration::try_seconds(amount),
        'm' => Duration::try_minutes(amount),
        'h' => Duration::try_hours(amount),
        _ => Duration::try_days(amount),
    }
    .ok_or_else(invalid)?;

    duration.to_std().map_err(|_| invalid())
}
