//! PNG tile encoder.
//!
//! This module copies one rectangle of the source bitmap into a new image and
//! encodes it as PNG.
//!
//! # Design Decisions
//!
//! - **Lossless output**: Tiles are always PNG, so decoding a tile yields
//!   exactly the pixels of its source region.
//!
//! - **Color type preserved**: The tile keeps the source's channel layout and
//!   bit depth. Floating-point sources are stored as 16-bit RGBA, since PNG
//!   has no float samples.
//!
//! - **Out-of-bounds rectangles**: When the rectangle fits within the source
//!   dimensions, the part inside the source is copied and the rest is
//!   zero-filled (transparent), so the tile keeps the requested size. A
//!   rectangle wider or taller than the source is clipped to the source
//!   instead, which keeps the output no larger than the input.

use bytes::Bytes;
use clap::ValueEnum;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::imageops;
use image::{ColorType, DynamicImage, RgbaImage};

use crate::error::TileError;
use crate::input::SourceImage;

use super::geometry::TileRect;

// =============================================================================
// Compression level
// =============================================================================

/// PNG compression effort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum PngCompression {
    /// Fastest encoding, larger files
    Fast,

    /// Balanced speed and size
    #[default]
    Default,

    /// Smallest files, slowest encoding
    Best,
}

impl PngCompression {
    fn compression_type(self) -> CompressionType {
        match self {
            PngCompression::Fast => CompressionType::Fast,
            PngCompression::Default => CompressionType::Default,
            PngCompression::Best => CompressionType::Best,
        }
    }
}

// =============================================================================
// PNG Encoder
// =============================================================================

/// Renders source regions into standalone PNG files.
///
/// # Example
///
/// ```ignore
/// use grid_splitter::tile::{PngTileEncoder, TileRect};
///
/// let encoder = PngTileEncoder::new();
/// let png = encoder.render_tile(&source, TileRect::new(0, 0, 100, 100))?;
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PngTileEncoder {
    compression: PngCompression,
}

impl PngTileEncoder {
    /// Create an encoder with default compression.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an encoder with the given compression effort.
    pub fn with_compression(compression: PngCompression) -> Self {
        Self { compression }
    }

    pub fn compression(&self) -> PngCompression {
        self.compression
    }

    /// Copy `rect` out of `source` and encode it as PNG.
    ///
    /// # Errors
    ///
    /// Returns an error if the rectangle has no pixels, if it is larger than
    /// the source and lies entirely outside it, or if PNG encoding fails.
    pub fn render_tile(&self, source: &SourceImage, rect: TileRect) -> Result<Bytes, TileError> {
        let tile = extract_region(source.image(), rect)?;
        self.encode(&tile)
    }

    /// Encode a bitmap as PNG.
    pub fn encode(&self, image: &DynamicImage) -> Result<Bytes, TileError> {
        let image = match image.color() {
            ColorType::Rgb32F | ColorType::Rgba32F => {
                std::borrow::Cow::Owned(DynamicImage::ImageRgba16(image.to_rgba16()))
            }
            _ => std::borrow::Cow::Borrowed(image),
        };

        let mut output = Vec::new();
        let encoder = PngEncoder::new_with_quality(
            &mut output,
            self.compression.compression_type(),
            FilterType::Adaptive,
        );

        image
            .write_with_encoder(encoder)
            .map_err(|e| TileError::EncodeError {
                message: e.to_string(),
            })?;

        Ok(Bytes::from(output))
    }
}

/// Copy the pixels of `rect` into a new image.
///
/// The canvas is never larger than the source.
fn extract_region(image: &DynamicImage, rect: TileRect) -> Result<DynamicImage, TileError> {
    if rect.is_empty() {
        return Err(TileError::EmptyRect {
            width: rect.width,
            height: rect.height,
        });
    }

    let clipped = rect.clip_to(image.width(), image.height());
    if clipped == rect {
        return Ok(image.crop_imm(rect.x, rect.y, rect.width, rect.height));
    }

    if rect.width > image.width() || rect.height > image.height() {
        if clipped.is_empty() {
            return Err(TileError::OutOfBounds {
                x: rect.x,
                y: rect.y,
                width: rect.width,
                height: rect.height,
            });
        }
        return Ok(image.crop_imm(clipped.x, clipped.y, clipped.width, clipped.height));
    }

    let mut canvas = RgbaImage::new(rect.width, rect.height);
    if !clipped.is_empty() {
        let inside = image
            .crop_imm(clipped.x, clipped.y, clipped.width, clipped.height)
            .to_rgba8();
        imageops::replace(&mut canvas, &inside, 0, 0);
    }
    Ok(DynamicImage::ImageRgba8(canvas))
}

// =============================================================================
// Tests
// =============================================================================
