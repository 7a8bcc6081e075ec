//! ZIP archive writer.

use std::collections::HashSet;
use std::io::{Cursor, Write};

use bytes::Bytes;
use clap::ValueEnum;
use zip::write::{SimpleFileOptions, ZipWriter};
use zip::{CompressionMethod, DateTime};

use crate::error::ArchiveError;

/// Default file name for the bundle download.
pub const DEFAULT_ARCHIVE_NAME: &str = "split_images.zip";

/// Permission bits recorded for every entry.
const ENTRY_PERMISSIONS: u32 = 0o644;

// =============================================================================
// Options
// =============================================================================

/// How entry data is stored in the archive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ArchiveCompression {
    /// Store entries uncompressed
    Stored,

    /// Deflate each entry
    #[default]
    Deflated,
}

impl ArchiveCompression {
    fn method(self) -> CompressionMethod {
        match self {
            ArchiveCompression::Stored => CompressionMethod::Stored,
            ArchiveCompression::Deflated => CompressionMethod::Deflated,
        }
    }
}

/// Archive assembly settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArchiveOptions {
    pub compression: ArchiveCompression,
}

impl ArchiveOptions {
    pub fn new(compression: ArchiveCompression) -> Self {
        Self { compression }
    }

    fn file_options(&self) -> SimpleFileOptions {
        SimpleFileOptions::default()
            .compression_method(self.compression.method())
            .last_modified_time(DateTime::default())
            .unix_permissions(ENTRY_PERMISSIONS)
    }
}

// =============================================================================
// Entries
// =============================================================================

/// A named file to place in the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub file_name: String,
    pub data: Bytes,
}

impl ArchiveEntry {
    pub fn new(file_name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            data: data.into(),
        }
    }
}

// =============================================================================
// Assembly
// =============================================================================

/// Bundle `entries` into a ZIP archive, in the given order.
///
/// Every entry carries the ZIP epoch (1980-01-01 00:00:00) as its timestamp
/// and fixed permissions, so the same entries always produce the same bytes.
///
/// # Errors
///
/// Fails as a whole on an empty or duplicate file name, or if the ZIP writer
/// reports an error. No partial archive is returned.
pub fn build_archive(
    entries: &[ArchiveEntry],
    options: ArchiveOptions,
) -> Result<Bytes, ArchiveError> {
    check_names(entries)?;

    let file_options = options.file_options();
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

    for entry in entries {
        writer.start_file(entry.file_name.as_str(), file_options)?;
        writer.write_all(&entry.data)?;
    }

    let cursor = writer.finish()?;
    Ok(Bytes::from(cursor.into_inner()))
}

fn check_names(entries: &[ArchiveEntry]) -> Result<(), ArchiveError> {
    let mut seen = HashSet::with_capacity(entries.len());
    for entry in entries {
        if entry.file_name.is_empty() {
            return Err(ArchiveError::EmptyName);
        }
        if !seen.insert(entry.file_name.as_str()) {
            return Err(ArchiveError::DuplicateEntry {
                name: entry.file_name.clone(),
            });
        }
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
