//! filesync - one-way, single-level directory synchronization.
//!
//! Usage:
//!   filesync <SOURCE> <DESTINATION>           Sync regular files into DESTINATION
//!   filesync --dry-run <SOURCE> <DESTINATION> Show what would be copied
//!   filesync --format json ...                Print the run report as JSON
//!   filesync --help                           Show help

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, ValueEnum};
use color_eyre::eyre::{Context, Result};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use filesync_core::{SyncConfig, SyncError};
use filesync_engine::{SyncEngine, SyncEvent, SyncReport, describe};

#[derive(Parser)]
#[command(
    name = "filesync",
    version,
    about = "One-way, single-level directory synchronization",
    long_about = "filesync copies every regular file directly inside SOURCE into \
                  DESTINATION when it is missing there or when the source copy is \
                  newer and its content differs.\n\n\
                  Identical files and files that are newer in DESTINATION are left \
                  alone. Subdirectories are not descended into and nothing is ever \
                  deleted."
)]
struct Cli {
    /// Directory to copy files from
    source: PathBuf,

    /// Directory to copy files into (created if missing)
    destination: PathBuf,

    /// Decide and report, but do not copy anything
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Leave copied files with the time of the copy instead of the source's mtime
    #[arg(long)]
    no_preserve_times: bool,

    /// Fail instead of creating a missing destination directory
    #[arg(long)]
    no_create: bool,

    /// Skip files whose names start with a dot
    #[arg(long)]
    exclude_hidden: bool,

    /// Glob pattern for file names to leave out (repeatable)
    #[arg(short, long = "ignore", value_name = "GLOB")]
    ignore: Vec<String>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let config = SyncConfig::builder()
        .source(cli.source)
        .destination(cli.destination)
        .dry_run(cli.dry_run)
        .preserve_times(!cli.no_preserve_times)
        .create_destination(!cli.no_create)
        .include_hidden(!cli.exclude_hidden)
        .ignore_patterns(cli.ignore)
        .build()
        .context("Invalid arguments")?;

    debug!(?config, "parsed arguments");

    match run_sync(config, cli.format) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(report) => match report.downcast_ref::<SyncError>() {
            Some(err) if err.is_setup_error() => {
                eprintln!("Error: {err}.");
                Ok(ExitCode::FAILURE)
            }
            Some(_) => Err(report.wrap_err("Synchronization aborted")),
            None => Err(report),
        },
    }
}

/// Run the sync, printing a trace line per file in text mode.
fn run_sync(config: SyncConfig, format: OutputFormat) -> Result<()> {
    let engine = SyncEngine::new(config);
    let text = matches!(format, OutputFormat::Text);

    let report = engine.run_with(&mut |event: &SyncEvent<'_>| {
        if !text {
            return;
        }
        match event {
            SyncEvent::DestinationCreated(path) => {
                println!("Created destination directory '{}'.", path.display());
            }
            SyncEvent::Started {
                source,
                destination,
            } => {
                println!(
                    "Synchronizing from '{}' to '{}'.",
                    source.display(),
                    destination.display()
                );
            }
            SyncEvent::Executed(decision, outcome) => {
                println!("{}", describe(decision, outcome));
            }
            SyncEvent::Decided(_) => {}
        }
    })?;

    match format {
        OutputFormat::Text => print_summary(&report),
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
            println!("{json}");
        }
    }

    Ok(())
}

/// Print the closing summary line.
fn print_summary(report: &SyncReport) {
    if !report.warnings.is_empty() {
        eprintln!("warning: {} entries could not be read and were skipped", report.warnings.len());
    }

    let stats = &report.stats;
    let prefix = if report.dry_run { "Dry run complete" } else { "Synchronization complete" };
    println!(
        "{prefix}: {} created, {} updated, {} skipped ({} copied in {:.2}s)",
        stats.created,
        stats.updated,
        stats.skipped(),
        format_size(stats.bytes_copied),
        report.elapsed.as_secs_f64()
    );
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins over the verbosity flag when set.
fn init_logging(verbose: u8) -> Result<()> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Format size in human-readable form.
fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}
