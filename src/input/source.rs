//! Decoded source image.

use std::io::Cursor;

use bytes::Bytes;
use image::{DynamicImage, ImageFormat, ImageReader};
use serde::Serialize;
use tracing::debug;

use crate::error::{InputError, SplitError};

// =============================================================================
// ImageInfo
// =============================================================================

/// Pixel dimensions of a decoded source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
}

impl ImageInfo {
    /// Human-readable size, e.g. `300 × 300px`.
    pub fn label(&self) -> String {
        format!("{} × {}px", self.width, self.height)
    }
}

// =============================================================================
// SourceImage
// =============================================================================

/// A decoded bitmap. Immutable once created.
#[derive(Debug, Clone)]
pub struct SourceImage {
    image: DynamicImage,
    format: ImageFormat,
}

impl SourceImage {
    /// Decode raw file bytes, detecting the format from the content.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::DecodeFailure`] if the format is unknown, the
    /// data is corrupt, or the decoded bitmap has a zero dimension.
    pub fn decode(data: &[u8]) -> Result<Self, InputError> {
        let reader = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| InputError::DecodeFailure {
                message: e.to_string(),
            })?;

        let format = reader.format().ok_or_else(|| InputError::DecodeFailure {
            message: "unrecognized image format".to_string(),
        })?;

        let image = reader.decode().map_err(|e| InputError::DecodeFailure {
            message: e.to_string(),
        })?;

        Self::from_image(image, format)
    }

    /// Wrap an already decoded bitmap.
    pub fn from_image(image: DynamicImage, format: ImageFormat) -> Result<Self, InputError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(InputError::DecodeFailure {
                message: format!("image has no pixels ({}x{})", image.width(), image.height()),
            });
        }
        Ok(Self { image, format })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn info(&self) -> ImageInfo {
        ImageInfo {
            width: self.width(),
            height: self.height(),
        }
    }

    /// Format the source was decoded from.
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Borrow the decoded pixels.
    pub fn image(&self) -> &DynamicImage {
        &self.image
    }
}

/// Decode on a blocking worker so the caller's task is not stalled.
pub async fn decode_source(data: Bytes) -> Result<SourceImage, SplitError> {
    let source = tokio::task::spawn_blocking(move || SourceImage::decode(&data)).await??;
    debug!(
        "Decoded {:?} source: {}x{}",
        source.format(),
        source.width(),
        source.height()
    );
    Ok(source)
}

// =============================================================================
// Tests
// =============================================================================
