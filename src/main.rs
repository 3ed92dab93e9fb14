//! GameSales - video-game sales analyzer
//!
//! A CLI tool that loads a JSON document of video-game sales and reports
//! regional totals, rankings, genre breakdowns and platform averages
//! through an interactive menu.
//!
//! Exit codes:
//!   0 - Success (including an empty or unloadable data file)
//!   1 - Runtime error (invalid arguments, bad config file, broken output)

mod analysis;
mod cli;
mod config;
mod error;
mod loader;
mod menu;
mod models;
mod report;

use anyhow::Result;
use cli::{Args, OutputFormat};
use config::Config;
use menu::Menu;
use report::ReportOptions;
use std::io;
use tracing::{debug, error, info};
use tracing_subscriber::FmtSubscriber;

fn main() {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(args) {
        error!("gamesales failed: {}", e);
        eprintln!("\nError: {:#}", e);
        std::process::exit(1);
    }
}

/// Initialize logging based on verbosity settings.
fn init_logging(level: tracing::Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: failed to set tracing subscriber: {}", e);
    }
}

/// Load the data and either print the report or run the menu.
fn run(args: Args) -> Result<()> {
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);
    config.validate()?;

    init_logging(args.log_level(config.general.verbose));

    info!("GameSales v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    debug!("Configuration: {:?}", config);

    let stdout = io::stdout();
    let records = loader::load_sales_data(
        &config.data.file,
        &config.data.array_key,
        &mut stdout.lock(),
    );

    if records.is_empty() {
        info!("No records loaded, nothing to analyze");
        return Ok(());
    }

    let options = ReportOptions::from(&config.report);

    if args.report {
        let output = match args.format {
            OutputFormat::Json => report::generate_json_report(&records, &options)?,
            OutputFormat::Text => report::generate_text_report(&records, &options),
        };
        println!("{}", output);
        return Ok(());
    }

    Menu::new(&records, options, io::stdin().lock(), stdout.lock()).run()
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => Ok(config),
        Ok(None) => Ok(Config::default()),
        Err(e) => {
            eprintln!("Warning: {:#}; using defaults", e);
            Ok(Config::default())
        }
    }
}
