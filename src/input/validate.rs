//! Upload acceptance checks.
//!
//! An upload must declare an image MIME type and stay within the size limit.
//! The type check runs first, so an oversized non-image reports the type.

use bytes::Bytes;

use crate::error::InputError;

/// Default upload limit: 5 MiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// MIME reported for content that matches no known image signature.
pub const UNKNOWN_MIME: &str = "application/octet-stream";

/// Raw file handed over by the host.
#[derive(Debug, Clone)]
pub struct Upload {
    /// Original file name, when the host knows it
    pub file_name: Option<String>,

    /// Declared MIME type
    pub mime: String,

    /// File contents
    pub data: Bytes,
}

impl Upload {
    /// Create an upload with a host-declared MIME type.
    pub fn new(mime: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            file_name: None,
            mime: mime.into(),
            data: data.into(),
        }
    }

    /// Create an upload whose MIME type is sniffed from its content.
    pub fn sniffed(data: impl Into<Bytes>) -> Self {
        let data = data.into();
        let mime = sniff_mime(&data).to_string();
        Self {
            file_name: None,
            mime,
            data,
        }
    }

    /// Attach the original file name.
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// Whether a MIME type names an image (`image/...`).
pub fn is_image_mime(mime: &str) -> bool {
    mime.get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("image/"))
}

/// Detect a MIME type from the leading bytes of a file.
///
/// Returns [`UNKNOWN_MIME`] when no image signature matches, regardless of
/// what the file name claims.
pub fn sniff_mime(data: &[u8]) -> &'static str {
    image::guess_format(data)
        .map(|format| format.to_mime_type())
        .unwrap_or(UNKNOWN_MIME)
}

/// Check an upload against the type and size rules.
///
/// # Errors
///
/// - [`InputError::InvalidInputType`] if the MIME type is not `image/*`
/// - [`InputError::OversizedInput`] if the data exceeds `max_size` bytes
pub fn validate_upload(upload: &Upload, max_size: u64) -> Result<(), InputError> {
    if !is_image_mime(&upload.mime) {
        return Err(InputError::InvalidInputType {
            mime: upload.mime.clone(),
        });
    }

    if upload.size() > max_size {
        return Err(InputError::OversizedInput {
            size: upload.size(),
            max_size,
        });
    }

    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
