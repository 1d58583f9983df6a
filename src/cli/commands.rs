use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{parse_digit, parse_exclusions};
use crate::models::ExclusionSet;

/// Main CLI structure for the focal-stats application
#[derive(Parser)]
#[command(version)]
#[command(about = "Focal length statistics for a photo library")]
#[command(long_about = "Scans a directory tree for JPG files, reads the EXIF focal length of each one, \
buckets the values and renders a bar chart of how often each focal length was used.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a directory and chart focal length usage
    #[command(about = "Scan a photo directory and chart focal length usage")]
    #[command(long_about = "Recursively collects image files under ROOT, reads their focal length, \
buckets the values and writes a chart or an export.\n\n\
Examples:\n  \
focal scan ~/Pictures                          # Typical focal lengths, PNG chart\n  \
focal scan ~/Pictures --mode digit --digit 1   # Group by tens of millimetres\n  \
focal scan ~/Pictures --exclude 24,70          # Ignore the kit zoom ends\n  \
focal scan ~/Pictures --format terminal        # Draw the chart in the terminal\n  \
focal scan ~/Pictures --format json -o out.json")]
    Scan(ScanArgs),

    /// Print the canonical focal lengths used by typical bucketing
    #[command(about = "List the typical focal lengths")]
    Typical,

    /// Print the focal length recorded in a single file
    #[command(about = "Show the focal length of one image")]
    Inspect {
        /// Image file to read
        file: PathBuf,
    },
}

/// Options for `scan`; anything left unset falls back to the configuration file and environment
#[derive(Args, Debug, Clone, Default)]
pub struct ScanArgs {
    /// Directory to scan recursively
    pub root: PathBuf,

    #[arg(
        short,
        long,
        help = "Bucketing mode: typical (0) or digit (1)"
    )]
    pub mode: Option<String>,

    #[arg(
        short = 'x',
        long = "exclude",
        value_parser = parse_exclusions,
        help = "Comma separated focal lengths to leave out, e.g. 24,70"
    )]
    pub exclusions: Option<ExclusionSet>,

    #[arg(
        short,
        long,
        value_parser = parse_digit,
        allow_negative_numbers = true,
        help = "Digits truncated in digit mode (1 groups by tens)"
    )]
    pub digit: Option<u32>,

    #[arg(long, help = "Show empty buckets between used ones in digit mode")]
    pub show_zero: bool,

    #[arg(short, long, help = "Configuration file (default: ./focal-stats.toml if present)")]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Output file path")]
    pub output: Option<PathBuf>,

    #[arg(short, long, help = "Output format: png, svg, terminal, json, csv")]
    pub format: Option<String>,

    #[arg(short, long, help = "Number of files read in parallel")]
    pub workers: Option<usize>,

    #[arg(long, help = "Abort the scan after this long (e.g. 30s, 5m)")]
    pub deadline: Option<String>,

    #[arg(short, long, help = "Image file extension to collect (default: JPG)")]
    pub extension: Option<String>,

    #[arg(long, help = "Match the extension case-insensitively")]
    pub case_insensitive: bool,

    #[arg(long, help = "Follow symbolic links while walking")]
    pub follow_links: bool,

    #[arg(long, help = "Print the statistics report only")]
    pub no_chart: bool,
}
