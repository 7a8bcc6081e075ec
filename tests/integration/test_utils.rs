//! Test utilities for integration tests.
//!
//! This module provides an in-memory download sink and helpers for creating
//! encoded test images and inspecting ZIP bundles.

use std::io::{Cursor, Read};

use async_trait::async_trait;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, Rgb, RgbImage, Rgba, RgbaImage};
use tokio::sync::RwLock;
use zip::ZipArchive;

use grid_splitter::error::SinkError;
use grid_splitter::sink::{Download, DownloadSink};

// =============================================================================
// Mock Download Sink
// =============================================================================

/// A sink that keeps every saved download in memory.
pub struct MemorySink {
    saved: RwLock<Vec<Download>>,
    fail_on: Option<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self {
            saved: RwLock::new(Vec::new()),
            fail_on: None,
        }
    }

    /// A sink that refuses to save the named file.
    pub fn failing_on(file_name: impl Into<String>) -> Self {
        Self {
            saved: RwLock::new(Vec::new()),
            fail_on: Some(file_name.into()),
        }
    }

    pub async fn saved(&self) -> Vec<Download> {
        self.saved.read().await.clone()
    }

    pub async fn names(&self) -> Vec<String> {
        self.saved
            .read()
            .await
            .iter()
            .map(|d| d.file_name.clone())
            .collect()
    }
}

#[async_trait]
impl DownloadSink for MemorySink {
    async fn save(&self, download: &Download) -> Result<(), SinkError> {
        if self.fail_on.as_deref() == Some(download.file_name.as_str()) {
            return Err(SinkError::Io {
                path: download.file_name.clone(),
                message: "disk full".to_string(),
            });
        }
        self.saved.write().await.push(download.clone());
        Ok(())
    }
}

// =============================================================================
// Image Builders
// =============================================================================

/// Encode an RGB image as PNG.
pub fn encode_png(img: &RgbImage) -> Vec<u8> {
    let mut buf = Vec::new();
    PngEncoder::new(&mut buf)
        .write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgb8)
        .unwrap();
    buf
}

/// Encode an RGBA image as PNG.
pub fn encode_rgba_png(img: &RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    PngEncoder::new(&mut buf)
        .write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgba8)
        .unwrap();
    buf
}

/// A solid-color PNG.
pub fn solid_png(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
    encode_png(&RgbImage::from_pixel(width, height, Rgb(color)))
}

/// A PNG where every pixel is distinct, so misplaced copies are detectable.
pub fn gradient_rgba(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([
            (x % 256) as u8,
            (y % 256) as u8,
            ((x / 256) * 16 + (y / 256)) as u8,
            (255 - (x + y) % 128) as u8,
        ])
    })
}

/// A JPEG-encoded gradient.
pub fn gradient_jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 64])
    });
    let mut buf = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buf, 90);
    encoder.encode_image(&img).unwrap();
    buf
}

/// Pad a valid image file with trailing zeros up to `size` bytes.
pub fn pad_to(mut data: Vec<u8>, size: usize) -> Vec<u8> {
    data.resize(size, 0);
    data
}

// =============================================================================
// Inspection
// =============================================================================

/// Check PNG signature bytes.
pub fn is_valid_png(data: &[u8]) -> bool {
    data.len() >= 8 && data[..8] == [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]
}

/// Decode PNG bytes.
pub fn decode_png(data: &[u8]) -> DynamicImage {
    image::load_from_memory_with_format(data, image::ImageFormat::Png).unwrap()
}

/// Read all entries of a ZIP archive in stored order.
pub fn read_zip(data: &[u8]) -> Vec<(String, Vec<u8>)> {
    let mut archive = ZipArchive::new(Cursor::new(data)).unwrap();
    let mut entries = Vec::new();
    for i in 0..archive.len() {
        let mut file = archive.by_index(i).unwrap();
        let mut contents = Vec::new();
        file.read_to_end(&mut contents).unwrap();
        entries.push((file.name().to_string(), contents));
    }
    entries
}

/// The nine tile names in order.
pub fn expected_names() -> Vec<String> {
    (1..=9).map(|i| format!("part_{}.png", i)).collect()
}
