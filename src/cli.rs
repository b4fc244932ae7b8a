// CLI-specific types and structures
// This module contains the command-line interface definitions and the
// translation into an engine configuration.

use chrono::NaiveDateTime;
use clap::Parser;
use std::path::PathBuf;

use loglyzer::config::{DEFAULT_PARALLEL_THRESHOLD, DEFAULT_TOP_N};
use loglyzer::parsers::bracketed::parse_timestamp;
use loglyzer::{AnalysisConfig, FilterSpec, Level, ParallelConfig, Parallelism};

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

// CLI structure - contains all command-line arguments and options
#[derive(Parser, Debug)]
#[command(name = "loglyzer")]
#[command(about = "Analyze and filter plain-text log files")]
#[command(
    long_about = "Analyze and filter plain-text log files\n\nInput lines must look like:\n  2024-01-15 10:30:45 [ERROR] Something failed\n\nMODES:\n  (default)     Sequential below --threshold bytes, parallel above\n  --parallel    Always split the input across worker threads\n  --sequential  Never split the input\n\nBoth modes produce identical statistics."
)]
#[command(version)]
pub struct Cli {
    /// Log file to analyze (gzip and zstd are decompressed automatically)
    #[arg(value_name = "LOG_FILE")]
    pub input: PathBuf,

    /// Keep only ERROR entries
    #[arg(long, help_heading = "Filtering Options", conflicts_with = "level")]
    pub errors_only: bool,

    /// Keep only entries at this level
    #[arg(long, value_name = "LEVEL", help_heading = "Filtering Options")]
    pub level: Option<Level>,

    /// Keep only entries whose message contains TEXT (case-sensitive)
    #[arg(long, value_name = "TEXT", help_heading = "Filtering Options")]
    pub search: Option<String>,

    /// Keep entries at or after this time (YYYY-MM-DD HH:MM:SS)
    #[arg(long, value_name = "DATETIME", value_parser = parse_datetime, help_heading = "Filtering Options")]
    pub since: Option<NaiveDateTime>,

    /// Keep entries at or before this time (YYYY-MM-DD HH:MM:SS)
    #[arg(long, value_name = "DATETIME", value_parser = parse_datetime, help_heading = "Filtering Options")]
    pub until: Option<NaiveDateTime>,

    /// Number of most frequent error messages to show
    #[arg(long, value_name = "N", default_value_t = DEFAULT_TOP_N, allow_negative_numbers = true, help_heading = "Output Options")]
    pub top: i64,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, help_heading = "Output Options")]
    pub format: OutputFormat,

    /// Write the result to FILE instead of stdout
    #[arg(long, value_name = "FILE", help_heading = "Output Options")]
    pub output: Option<PathBuf>,

    /// List lines that could not be parsed (on stderr)
    #[arg(long, help_heading = "Output Options")]
    pub show_failures: bool,

    /// Colorize level names in text output
    #[arg(long, value_enum, default_value_t = ColorMode::Auto, help_heading = "Output Options")]
    pub color: ColorMode,

    /// Always process in parallel
    #[arg(long, help_heading = "Performance Options", conflicts_with = "sequential")]
    pub parallel: bool,

    /// Never process in parallel
    #[arg(long, help_heading = "Performance Options")]
    pub sequential: bool,

    /// Number of worker threads (default: number of CPUs)
    #[arg(long, value_name = "N", help_heading = "Performance Options")]
    pub threads: Option<usize>,

    /// Number of chunks to split the input into (default: one per thread)
    #[arg(long, value_name = "N", help_heading = "Performance Options")]
    pub chunks: Option<usize>,

    /// Input size in bytes above which parallel mode is used automatically
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_PARALLEL_THRESHOLD, help_heading = "Performance Options")]
    pub threshold: usize,

    /// Print diagnostics to stderr (-v info and timing, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

fn parse_datetime(input: &str) -> Result<NaiveDateTime, String> {
    parse_timestamp(input).map_err(|e| format!("expected YYYY-MM-DD HH:MM:SS ({})", e))
}

impl Cli {
    pub fn directive(&self) -> Parallelism {
        if self.parallel {
            Parallelism::Always
        } else if self.sequential {
            Parallelism::Never
        } else {
            Parallelism::Auto
        }
    }

    pub fn filter_spec(&self) -> FilterSpec {
        let base = if self.errors_only {
            FilterSpec::errors_only()
        } else {
            FilterSpec {
                level: self.level,
                ..Default::default()
            }
        };
        FilterSpec {
            since: self.since,
            until: self.until,
            search: self.search.clone(),
            ..base
        }
    }

    /// Translate arguments into an engine configuration.
    ///
    /// Values are passed through unchecked; the engine validates them.
    pub fn analysis_config(&self) -> AnalysisConfig {
        let defaults = ParallelConfig::default();
        AnalysisConfig {
            filter: self.filter_spec(),
            top_n: self.top,
            parallel: ParallelConfig {
                directive: self.directive(),
                num_workers: self.threads.unwrap_or(defaults.num_workers),
                num_chunks: self.chunks,
                threshold_bytes: self.threshold,
            },
        }
    }
}
