//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// GameSales - video-game sales analyzer
///
/// Loads a JSON document of video-game sales and reports regional totals,
/// top sellers, genre breakdowns and platform averages, either through an
/// interactive menu or as a one-shot report.
///
/// Examples:
///   gamesales
///   gamesales --data ventas_videojuegos.json --top 10
///   gamesales --report --format json
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// JSON file with the sales records
    ///
    /// Defaults to ventas_videojuegos.json, or the file set in .gamesales.toml.
    #[arg(short, long, value_name = "FILE", env = "GAMESALES_DATA")]
    pub data: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .gamesales.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Number of entries in each ranking
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    /// Print the full report once and exit instead of showing the menu
    #[arg(long)]
    pub report: bool,

    /// Output format for --report (text, json)
    #[arg(long, default_value = "text", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,
}

/// Output format for the full report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text (default)
    #[default]
    Text,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.top == Some(0) {
            return Err("Ranking size (--top) must be at least 1".to_string());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if self.format == OutputFormat::Json && !self.report {
            return Err("--format json requires --report".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self, config_verbose: bool) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose || config_verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
