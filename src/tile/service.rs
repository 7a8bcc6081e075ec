//! Tile Service for splitting a whole image.
//!
//! The TileService runs the grid geometry over a decoded source and renders
//! every cell into a PNG, producing the ordered [`TileSet`].
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 TileService                  │
//! │  split()                                     │
//! │  1. compute_tiles(w, h)  →  9 × TileRect     │
//! │  2. render_tile(rect)    →  9 × PNG bytes    │
//! │  3. name part_1..part_9  →  TileSet          │
//! └──────────────┬──────────────────┬────────────┘
//!                ▼                  ▼
//!        ┌──────────────┐   ┌────────────────┐
//!        │  geometry    │   │ PngTileEncoder │
//!        └──────────────┘   └────────────────┘
//! ```

use bytes::Bytes;
use serde::Serialize;
use tracing::debug;

use crate::archive::ArchiveEntry;
use crate::error::TileError;
use crate::input::SourceImage;

use super::encoder::PngTileEncoder;
use super::geometry::{compute_tiles, TileRect, GRID_SIZE, TILE_COUNT};

/// File name for the tile at zero-based row-major `index`.
pub fn tile_file_name(index: usize) -> String {
    format!("part_{}.png", index + 1)
}

// =============================================================================
// Tile
// =============================================================================

/// One rendered tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tile {
    /// Zero-based row-major position
    pub index: usize,

    /// Source region
    pub rect: TileRect,

    /// Download name (`part_1.png` ... `part_9.png`)
    pub file_name: String,

    /// Encoded PNG data
    #[serde(skip)]
    pub data: Bytes,
}

impl Tile {
    /// One-based tile number as shown to users.
    pub fn number(&self) -> usize {
        self.index + 1
    }

    /// Grid row (0-2).
    pub fn row(&self) -> usize {
        self.index / GRID_SIZE as usize
    }

    /// Grid column (0-2).
    pub fn col(&self) -> usize {
        self.index % GRID_SIZE as usize
    }
}

// =============================================================================
// TileSet
// =============================================================================

/// The nine tiles of one split, in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSet {
    tiles: Vec<Tile>,
}

impl TileSet {
    /// Get a tile by its one-based number.
    ///
    /// # Errors
    ///
    /// Returns [`TileError::InvalidIndex`] unless `number` is in `1..=9`.
    pub fn get(&self, number: usize) -> Result<&Tile, TileError> {
        number
            .checked_sub(1)
            .and_then(|index| self.tiles.get(index))
            .ok_or(TileError::InvalidIndex {
                index: number,
                max: self.tiles.len(),
            })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tile> {
        self.tiles.iter()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Total encoded size of all tiles.
    pub fn total_bytes(&self) -> usize {
        self.tiles.iter().map(|t| t.data.len()).sum()
    }

    /// Archive entries in tile order.
    pub fn archive_entries(&self) -> Vec<ArchiveEntry> {
        self.tiles
            .iter()
            .map(|t| ArchiveEntry::new(t.file_name.clone(), t.data.clone()))
            .collect()
    }
}

impl<'a> IntoIterator for &'a TileSet {
    type Item = &'a Tile;
    type IntoIter = std::slice::Iter<'a, Tile>;

    fn into_iter(self) -> Self::IntoIter {
        self.tiles.iter()
    }
}

// =============================================================================
// Tile Service
// =============================================================================

/// Splits decoded images into nine PNG tiles.
#[derive(Debug, Clone, Default)]
pub struct TileService {
    encoder: PngTileEncoder,
}

impl TileService {
    /// Create a tile service with a default encoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tile service with a specific encoder.
    pub fn with_encoder(encoder: PngTileEncoder) -> Self {
        Self { encoder }
    }

    pub fn encoder(&self) -> &PngTileEncoder {
        &self.encoder
    }

    /// Render all nine tiles of `source`.
    ///
    /// This is CPU-bound; async callers should run it on a blocking worker.
    ///
    /// # Errors
    ///
    /// Fails as a whole if any tile cannot be rendered; no partial set is returned.
    pub fn split(&self, source: &SourceImage) -> Result<TileSet, TileError> {
        let rects = compute_tiles(source.width(), source.height());

        let mut tiles = Vec::with_capacity(TILE_COUNT);
        for (index, rect) in rects.into_iter().enumerate() {
            let data = self.encoder.render_tile(source, rect)?;
            tiles.push(Tile {
                index,
                rect,
                file_name: tile_file_name(index),
                data,
            });
        }

        let set = TileSet { tiles };
        debug!(
            "Rendered {} tiles ({}x{} each, {} bytes total)",
            set.len(),
            rects[0].width,
            rects[0].height,
            set.total_bytes()
        );
        Ok(set)
    }
}

// =============================================================================
// Tests
// =============================================================================
