//! Layered application configuration
//!
//! Sources, lowest priority first: built-in defaults, an optional
//! `focal-stats.{toml,json,yaml}` file (or an explicit `--config` path),
//! `FOCAL_STATS_*` environment variables, then command-line flags applied by
//! the command handlers.

pub mod validation;

use ::config::{Config, Environment, File};
use log::debug;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::collectors::scan::default_workers;
use crate::collectors::DEFAULT_EXTENSION;
use crate::errors::Result;
use crate::graphs::{GraphConfig, OutputFormat};
use crate::models::{BucketingPolicy, ExclusionSet, DEFAULT_TRUNCATION_DIGIT};

pub use validation::{
    normalize_input, parse_deadline, parse_digit, parse_exclusions, parse_flag, parse_mode,
    validate_digit, BucketingMode,
};

/// Base name of the optional configuration file in the working directory
pub const CONFIG_FILE_STEM: &str = "focal-stats";

/// Prefix of configuration environment variables
pub const ENV_PREFIX: &str = "FOCAL_STATS";

/// Raw configuration as read from files and the environment
///
/// Fields stay close to what a user types; [`AppConfig::validate`] turns them
/// into typed [`Settings`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// `typical` or `digit`
    pub mode: String,
    pub exclusions: Vec<i64>,
    /// Signed so that a negative value reaches validation instead of failing deserialisation
    pub digit: i64,
    pub show_zero_buckets: bool,
    pub extension: String,
    pub case_sensitive: bool,
    pub follow_links: bool,
    /// 0 picks the number of available CPUs
    pub workers: usize,
    /// e.g. `30s` or `5m`
    pub deadline: Option<String>,
    pub format: String,
    pub chart: GraphConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mode: "typical".to_string(),
            exclusions: Vec::new(),
            digit: DEFAULT_TRUNCATION_DIGIT as i64,
            show_zero_buckets: false,
            extension: DEFAULT_EXTENSION.to_string(),
            case_sensitive: true,
            follow_links: false,
            workers: 0,
            deadline: None,
            format: "png".to_string(),
            chart: GraphConfig::default(),
        }
    }
}

/// Validated, typed settings for one scan
#[derive(Debug, Clone)]
pub struct Settings {
    pub policy: BucketingPolicy,
    pub exclusions: ExclusionSet,
    pub extension: String,
    pub case_sensitive: bool,
    pub follow_links: bool,
    pub workers: usize,
    pub deadline: Option<Duration>,
    pub format: OutputFormat,
    pub chart: GraphConfig,
}

impl AppConfig {
    /// Loads configuration from the optional file and the environment
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Like [`AppConfig::load`], reading `FOCAL_STATS_*` variables from `env`
    /// instead of the process environment when it is given
    pub fn load_with_env(path: Option<&Path>, env: Option<HashMap<String, String>>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(CONFIG_FILE_STEM).required(false),
        };

        // Values stay strings here and are converted on deserialisation, so a
        // single exclusion such as `24` still splits into a one-element list.
        let config: AppConfig = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .list_separator(",")
                    .with_list_parse_key("exclusions")
                    .source(env),
            )
            .build()?
            .try_deserialize()?;

        debug!("Loaded configuration: {config:?}");
        Ok(config)
    }

    /// Checks every field once and produces typed [`Settings`]
    pub fn validate(&self) -> Result<Settings> {
        let mode = parse_mode(&self.mode)?;
        let digit = validate_digit(self.digit)?;
        let deadline = self.deadline.as_deref().map(parse_deadline).transpose()?;
        let format: OutputFormat = self.format.parse()?;

        Ok(Settings {
            policy: mode.into_policy(digit, self.show_zero_buckets),
            exclusions: self.exclusions.iter().copied().collect(),
            extension: self.extension.clone(),
            case_sensitive: self.case_sensitive,
            follow_links: self.follow_links,
            workers: if self.workers == 0 {
                default_workers()
            } else {
                self.workers
            },
            deadline,
            format,
            chart: self.chart.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FocalError;

    #[test]
    fn test_defaults_validate() {
        let settings = AppConfig::default().validate().unwrap();
        assert_eq!(settings.policy, BucketingPolicy::Typical);
        assert!(settings.exclusions.is_empty());
        assert_eq!(settings.extension, "JPG");
        assert!(settings.case_sensitive);
        assert!(settings.workers >= 1);
        assert_eq!(settings.format, OutputFormat::Png);
        assert!(settings.deadline.is_none());
    }

    #[test]
    fn test_negative_digit_is_rejected() {
        let config = AppConfig {
            mode: "digit".to_string(),
            digit: -1,
            ..AppConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(FocalError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("focal-stats.toml");
        std::fs::write(
            &path,
            "mode = \"digit\"\ndigit = 2\nshow_zero_buckets = true\nexclusions = [24, 70]\nformat = \"svg\"\ndeadline = \"1m\"\n\n[chart]\nwidth = 800\nheight = 600\ntitle = \"Lenses\"\nx_label = \"mm\"\ny_label = \"n\"\n",
        )
        .unwrap();

        let settings = AppConfig::load(Some(&path)).unwrap().validate().unwrap();
        assert_eq!(
            settings.policy,
            BucketingPolicy::DigitTruncated {
                digit: 2,
                fill_zero_buckets: true
            }
        );
        assert!(settings.exclusions.contains(24));
        assert!(settings.exclusions.contains(70));
        assert_eq!(settings.format, OutputFormat::Svg);
        assert_eq!(settings.deadline, Some(Duration::from_secs(60)));
        assert_eq!(settings.chart.width, 800);
        assert_eq!(settings.chart.title, "Lenses");
    }

    fn env(vars: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            vars.iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_single_exclusion_from_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("focal-stats.toml");
        std::fs::write(&path, "mode = \"typical\"\n").unwrap();

        let config =
            AppConfig::load_with_env(Some(&path), env(&[("FOCAL_STATS_EXCLUSIONS", "24")])).unwrap();
        assert_eq!(config.exclusions, vec![24]);
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("focal-stats.toml");
        std::fs::write(&path, "mode = \"typical\"\ndigit = 3\n").unwrap();

        let config = AppConfig::load_with_env(
            Some(&path),
            env(&[
                ("FOCAL_STATS_MODE", "digit"),
                ("FOCAL_STATS_DIGIT", "2"),
                ("FOCAL_STATS_SHOW_ZERO_BUCKETS", "true"),
                ("FOCAL_STATS_WORKERS", "3"),
                ("FOCAL_STATS_EXCLUSIONS", "24,70"),
            ]),
        )
        .unwrap();
        assert_eq!(config.exclusions, vec![24, 70]);
        assert_eq!(config.workers, 3);

        let settings = config.validate().unwrap();
        assert_eq!(
            settings.policy,
            BucketingPolicy::DigitTruncated {
                digit: 2,
                fill_zero_buckets: true
            }
        );
    }

    #[test]
    fn test_non_numeric_env_exclusion_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("focal-stats.toml");
        std::fs::write(&path, "").unwrap();

        assert!(matches!(
            AppConfig::load_with_env(Some(&path), env(&[("FOCAL_STATS_EXCLUSIONS", "24,wide")])),
            Err(FocalError::Config(_))
        ));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            AppConfig::load(Some(&missing)),
            Err(FocalError::Config(_))
        ));
    }
}
