//! # Grid Splitter
//!
//! Split an image into a 3×3 grid of PNG tiles and bundle them into a ZIP archive.
//!
//! The library takes raw image bytes from a host (a browser bridge, a desktop
//! shell, or the bundled command-line tool), validates and decodes them,
//! cuts the bitmap into nine equally sized tiles, and hands back each tile as
//! a standalone PNG plus a reproducible ZIP bundle of all nine.
//!
//! ## Features
//!
//! - **Fixed 3×3 grid**: Tiles are `width / 3` × `height / 3`, row-major,
//!   named `part_1.png` … `part_9.png`
//! - **Lossless tiles**: PNG output reproduces the source region exactly
//! - **Reproducible bundles**: Fixed ZIP metadata, so identical tiles give identical archives
//! - **Explicit session**: One current image, last upload wins
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`input`] - Upload validation and decoding
//! - [`tile`] - Grid geometry, PNG rendering, and the tile service
//! - [`archive`] - ZIP bundle assembly
//! - [`session`] - Upload pipeline and downloads
//! - [`sink`] - Delivery of downloads to the host
//! - [`config`] - CLI and configuration types
//!
//! ## Example
//!
//! ```rust,no_run
//! use grid_splitter::{DirectorySink, Session, Upload};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let bytes = std::fs::read("photo.png")?;
//!
//!     let session = Session::new();
//!     let outcome = session.upload(Upload::sniffed(bytes)).await?;
//!     println!("{}", outcome.info.label());
//!
//!     let sink = DirectorySink::new("tiles");
//!     session.save_all_tiles(&sink).await?;
//!     session.save_archive(&sink).await?;
//!     Ok(())
//! }
//! ```

pub mod archive;
pub mod config;
pub mod error;
pub mod input;
pub mod report;
pub mod session;
pub mod sink;
pub mod tile;

// Re-export commonly used types
pub use archive::{
    build_archive, ArchiveCompression, ArchiveEntry, ArchiveOptions, DEFAULT_ARCHIVE_NAME,
};
pub use config::{Cli, Command, InfoConfig, SplitConfig};
pub use error::{ArchiveError, InputError, SinkError, SplitError, TileError};
pub use input::{
    decode_source, is_image_mime, sniff_mime, validate_upload, ImageInfo, SourceImage, Upload,
    DEFAULT_MAX_FILE_SIZE,
};
pub use report::SplitReport;
pub use session::{Session, SessionConfig, SplitOutcome};
pub use sink::{DirectorySink, Download, DownloadSink};
pub use tile::{
    compute_tiles, tile_file_name, PngCompression, PngTileEncoder, Tile, TileRect, TileService,
    TileSet, GRID_SIZE, TILE_COUNT,
};
