//! Heightmap merge tool.
//!
//! Merges a source heightmap into a target heightmap wherever a mask image
//! is painted in the sentinel colour, and reports how the two grids differ:
//! - `compare` logs difference statistics and optionally writes them as JSON
//! - `merge` runs the comparison, applies the mask and writes the merged grid
//!
//! All files are given explicitly on the command line.

mod commands;
mod config;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

use heightmap::ResampleFilter;

#[derive(Parser, Debug)]
#[command(name = "heightmap-merge")]
#[command(about = "Merge two heightmaps through a painted mask")]
struct Args {
    /// YAML configuration file
    #[arg(short, long, global = true, env = "HEIGHTMAP_CONFIG")]
    config: Option<PathBuf>,

    /// Log level
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Report difference statistics between two grids
    Compare {
        /// Grid to be modified
        #[arg(short, long)]
        target: PathBuf,

        /// Grid to take data from
        #[arg(short, long)]
        source: PathBuf,

        /// Write the statistics as JSON to this file
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Merge source cells into the target wherever the mask is painted
    Merge {
        /// Grid to be modified
        #[arg(short, long)]
        target: PathBuf,

        /// Grid to take data from
        #[arg(short, long)]
        source: PathBuf,

        /// Mask image painted in the sentinel colour
        #[arg(short, long)]
        mask: PathBuf,

        /// Output grid (default: merged_YYYYMMDD.asc)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Summary JSON (default: comparison_YYYYMMDD.json)
        #[arg(long)]
        report: Option<PathBuf>,

        /// Skip writing the summary JSON
        #[arg(long, conflicts_with = "report")]
        no_report: bool,

        /// Sentinel colour as r,g,b
        #[arg(long)]
        sentinel: Option<String>,

        /// Filter used when the mask must be resized
        /// (nearest, triangle, catmull_rom, gaussian, lanczos3)
        #[arg(long, value_parser = parse_resample)]
        resample: Option<ResampleFilter>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

fn parse_resample(s: &str) -> std::result::Result<ResampleFilter, String> {
    ResampleFilter::parse(s).map_err(|e| e.to_string())
}

fn init_tracing(log_level: &str, format: LogFormat) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    match format {
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish())?,
        LogFormat::Text => tracing::subscriber::set_global_default(builder.finish())?,
    }
    Ok(())
}

fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args.log_level, args.log_format)?;

    let result = run(args);
    if let Err(e) = &result {
        error!(error = %format!("{:#}", e), "Command failed");
    }
    result
}

fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Compare {
            target,
            source,
            report,
        } => {
            let config = config::load(args.config.as_deref(), &config::Overrides::default())?;
            commands::compare(&config, &target, &source, report.as_deref())?;
        }
        Command::Merge {
            target,
            source,
            mask,
            output,
            report,
            no_report,
            sentinel,
            resample,
        } => {
            let overrides = config::Overrides {
                sentinel: sentinel.map(|s| heightmap::config::parse_rgb(&s)).transpose()?,
                resample_filter: resample,
            };
            let config = config::load(args.config.as_deref(), &overrides)?;
            let options = commands::MergeOptions {
                target,
                source,
                mask,
                output,
                report,
                write_report: !no_report,
            };
            commands::merge(&config, options)?;
        }
    }
    Ok(())
}
