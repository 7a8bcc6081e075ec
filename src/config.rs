//! Configuration management for Grid Splitter.
//!
//! This module provides the command-line interface, built on clap:
//! - `split` renders the nine tiles and the ZIP bundle into a directory
//! - `info` validates and decodes an image and prints its grid
//!
//! # Environment Variables
//!
//! Options can also be set through environment variables with the `GRID_` prefix:
//!
//! - `GRID_OUTPUT` - Output directory (default: current directory)
//! - `GRID_MAX_FILE_SIZE` - Upload limit in bytes (default: 5242880)
//! - `GRID_ARCHIVE_NAME` - Bundle file name (default: split_images.zip)
//! - `GRID_PNG_COMPRESSION` - fast, default or best (default: default)
//! - `GRID_ARCHIVE_COMPRESSION` - stored or deflated (default: deflated)

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::archive::{ArchiveCompression, ArchiveOptions, DEFAULT_ARCHIVE_NAME};
use crate::input::DEFAULT_MAX_FILE_SIZE;
use crate::session::SessionConfig;
use crate::sink::check_file_name;
use crate::tile::{PngCompression, PngTileEncoder};

// =============================================================================
// CLI Arguments
// =============================================================================

/// Grid Splitter - Split an image into a 3×3 grid of PNG tiles.
#[derive(Parser, Debug, Clone)]
#[command(name = "grid-splitter")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn into_command(self) -> Command {
        self.command
    }
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Split an image and save the tiles and the ZIP bundle.
    Split(SplitConfig),

    /// Validate and decode an image, then print its size and tile grid.
    Info(InfoConfig),
}

// =============================================================================
// Split Command
// =============================================================================

/// Options for `grid-splitter split`.
#[derive(Args, Debug, Clone)]
pub struct SplitConfig {
    /// Image file to split.
    pub input: PathBuf,

    /// Directory to save the tiles and the bundle into.
    #[arg(short, long, default_value = ".", env = "GRID_OUTPUT")]
    pub output: PathBuf,

    /// Largest accepted input in bytes.
    #[arg(long, default_value_t = DEFAULT_MAX_FILE_SIZE, env = "GRID_MAX_FILE_SIZE")]
    pub max_file_size: u64,

    /// Do not save the individual part_N.png files.
    #[arg(long, default_value_t = false)]
    pub no_tiles: bool,

    /// Do not save the ZIP bundle.
    #[arg(long, default_value_t = false)]
    pub no_archive: bool,

    /// File name of the ZIP bundle.
    #[arg(long, default_value = DEFAULT_ARCHIVE_NAME, env = "GRID_ARCHIVE_NAME")]
    pub archive_name: String,

    /// PNG compression effort for tiles.
    #[arg(long, value_enum, default_value_t = PngCompression::Default, env = "GRID_PNG_COMPRESSION")]
    pub png_compression: PngCompression,

    /// How tiles are stored inside the bundle.
    #[arg(long, value_enum, default_value_t = ArchiveCompression::Deflated, env = "GRID_ARCHIVE_COMPRESSION")]
    pub archive_compression: ArchiveCompression,

    /// Print a JSON report instead of a text summary.
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl SplitConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_file_size == 0 {
            return Err("max_file_size must be greater than 0".to_string());
        }

        if self.no_tiles && self.no_archive {
            return Err(
                "Nothing to do: --no-tiles and --no-archive were both given".to_string(),
            );
        }

        if check_file_name(&self.archive_name).is_err() {
            return Err(format!(
                "archive_name must be a plain file name, got '{}'",
                self.archive_name
            ));
        }

        if !self.archive_name.to_ascii_lowercase().ends_with(".zip") {
            return Err(format!(
                "archive_name must end with .zip, got '{}'",
                self.archive_name
            ));
        }

        Ok(())
    }

    /// Session settings for this run.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            max_file_size: self.max_file_size,
            encoder: PngTileEncoder::with_compression(self.png_compression),
            archive: ArchiveOptions::new(self.archive_compression),
            archive_name: self.archive_name.clone(),
        }
    }
}

// =============================================================================
// Info Command
// =============================================================================

/// Options for `grid-splitter info`.
#[derive(Args, Debug, Clone)]
pub struct InfoConfig {
    /// Image file to inspect.
    pub input: PathBuf,

    /// Largest accepted input in bytes.
    #[arg(long, default_value_t = DEFAULT_MAX_FILE_SIZE, env = "GRID_MAX_FILE_SIZE")]
    pub max_file_size: u64,

    /// Print a JSON report instead of a text summary.
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl InfoConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_file_size == 0 {
            return Err("max_file_size must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Session settings for this run.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            max_file_size: self.max_file_size,
            ..SessionConfig::default()
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
