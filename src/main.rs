//! Grid Splitter - Split an image into a 3×3 grid of PNG tiles.
//!
//! This binary plays the host role: it reads a file, hands the bytes to a
//! session, and saves the downloads into a directory.

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use grid_splitter::{
    config::{Cli, Command, InfoConfig, SplitConfig},
    report::SplitReport,
    session::Session,
    sink::DirectorySink,
    tile::TILE_COUNT,
    Upload,
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.into_command() {
        Command::Split(config) => run_split(config).await,
        Command::Info(config) => run_info(config).await,
    }
}

// =============================================================================
// Split Command
// =============================================================================

async fn run_split(config: SplitConfig) -> ExitCode {
    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let upload = match read_upload(&config.input).await {
        Ok(upload) => upload,
        Err(code) => return code,
    };

    let session = Session::with_config(config.session_config());
    let outcome = match session.upload(upload).await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let sink = DirectorySink::new(&config.output);
    let mut report = SplitReport::new(&outcome);

    if !config.no_tiles {
        match session.save_all_tiles(&sink).await {
            Ok(saved) => info!("Saved {} tiles to {}", saved.len(), config.output.display()),
            Err(e) => {
                error!("Failed to save tiles: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    if !config.no_archive {
        match session.save_archive(&sink).await {
            Ok(download) => {
                info!(
                    "Saved {} ({} bytes)",
                    sink.root().join(&download.file_name).display(),
                    download.len()
                );
                report = report.with_archive(&download);
            }
            Err(e) => {
                error!("Failed to save archive: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    print_report(&report, config.json)
}

// =============================================================================
// Info Command
// =============================================================================

async fn run_info(config: InfoConfig) -> ExitCode {
    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let upload = match read_upload(&config.input).await {
        Ok(upload) => upload,
        Err(code) => return code,
    };

    let session = Session::with_config(config.session_config());
    match session.upload(upload).await {
        Ok(outcome) => print_report(&SplitReport::new(&outcome), config.json),
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Read a file and wrap it as an upload with a content-sniffed MIME type.
async fn read_upload(path: &Path) -> Result<Upload, ExitCode> {
    let data = tokio::fs::read(path).await.map_err(|e| {
        error!("Failed to read {}: {}", path.display(), e);
        ExitCode::FAILURE
    })?;

    let mut upload = Upload::sniffed(data);
    if let Some(name) = path.file_name() {
        upload = upload.with_file_name(name.to_string_lossy());
    }
    Ok(upload)
}

fn print_report(report: &SplitReport, json: bool) -> ExitCode {
    if json {
        return match report.to_json() {
            Ok(text) => {
                println!("{}", text);
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("Failed to render report: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    println!("Image: {}", report.label);
    if report.dropped_columns > 0 || report.dropped_rows > 0 {
        println!(
            "Note: {} column(s) and {} row(s) on the right/bottom edge are not part of any tile",
            report.dropped_columns, report.dropped_rows
        );
    }
    println!();
    println!("{} tiles:", TILE_COUNT);
    for tile in &report.tiles {
        println!(
            "  {:<12} x={:<6} y={:<6} {}×{}  ({} bytes)",
            tile.file_name, tile.rect.x, tile.rect.y, tile.rect.width, tile.rect.height, tile.bytes
        );
    }
    if let Some(ref archive) = report.archive {
        println!();
        println!("Bundle: {} ({} bytes)", archive.file_name, archive.bytes);
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "grid_splitter=debug"
    } else {
        "grid_splitter=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
