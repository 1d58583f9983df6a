pub mod export;
pub mod focal_graphs;
pub mod terminal;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::analyzers::ChartEntry;
use crate::errors::FocalError;

/// Sink for an ordered list of chart bars
pub trait ChartRenderer {
    fn render_bar_chart(&self, entries: &[ChartEntry]) -> Result<()>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "Focal Length Usage".to_string(),
            x_label: "Focal length (mm)".to_string(),
            y_label: "Photos".to_string(),
        }
    }
}

/// Where the result of a scan goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Png,
    Svg,
    Terminal,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
            Self::Terminal => "txt",
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, Self::Png | Self::Svg)
    }
}

impl FromStr for OutputFormat {
    type Err = FocalError;

    fn from_str(format: &str) -> std::result::Result<Self, Self::Err> {
        match format.trim().to_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "svg" => Ok(Self::Svg),
            "terminal" | "term" | "text" => Ok(Self::Terminal),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(FocalError::invalid(format!(
                "Unsupported output format: {format}"
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Terminal => f.write_str("terminal"),
            other => f.write_str(other.extension()),
        }
    }
}
