//! Download delivery.
//!
//! A [`Download`] is a named file ready to be handed to the host. The host's
//! file-save mechanism is abstracted behind [`DownloadSink`] so the session
//! never touches a filesystem or browser API directly.

mod directory;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::SinkError;

pub use directory::DirectorySink;

/// MIME type of single-tile downloads.
pub const PNG_MIME: &str = "image/png";

/// MIME type of bundle downloads.
pub const ZIP_MIME: &str = "application/zip";

// =============================================================================
// Download
// =============================================================================

/// A file offered to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    /// Suggested file name
    pub file_name: String,

    /// MIME type of `data`
    pub content_type: &'static str,

    /// File contents
    pub data: Bytes,
}

impl Download {
    /// A single PNG tile.
    pub fn png(file_name: impl Into<String>, data: Bytes) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: PNG_MIME,
            data,
        }
    }

    /// A ZIP bundle.
    pub fn zip(file_name: impl Into<String>, data: Bytes) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: ZIP_MIME,
            data,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

// =============================================================================
// DownloadSink Trait
// =============================================================================

/// Destination for finished downloads.
///
/// Implementations must never leave a partially written file visible under
/// the download's name.
#[async_trait]
pub trait DownloadSink: Send + Sync {
    /// Deliver one download.
    async fn save(&self, download: &Download) -> Result<(), SinkError>;
}

/// Reject names that are empty, hidden, or contain path components.
pub fn check_file_name(name: &str) -> Result<(), SinkError> {
    let invalid = name.is_empty()
        || name.starts_with('.')
        || name.contains(['/', '\\'])
        || name.chars().any(char::is_control);

    if invalid {
        return Err(SinkError::InvalidFileName {
            name: name.to_string(),
        });
    }
    Ok(())
}
