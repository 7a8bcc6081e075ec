//! Tile geometry and rendering.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │                Session                  │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │              Tile Service               │
//! │  ┌──────────────┐  ┌─────────────────┐  │
//! │  │  geometry    │  │  PNG Encoder    │  │
//! │  │  (3×3 rects) │  │  (crop →        │  │
//! │  │              │  │   encode)       │  │
//! │  └──────────────┘  └─────────────────┘  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Components
//!
//! - [`compute_tiles`]: The nine row-major rectangles for given dimensions
//! - [`PngTileEncoder`]: Copies a rectangle out of the source and encodes it losslessly
//! - [`TileService`]: Splits a whole image into a [`TileSet`]
//!
//! # Example
//!
//! ```
//! use grid_splitter::tile::{compute_tiles, TileRect};
//!
//! let tiles = compute_tiles(10, 10);
//! assert_eq!(tiles.len(), 9);
//! // The last pixel row and column belong to no tile.
//! assert_eq!(tiles[8], TileRect::new(6, 6, 3, 3));
//! ```

mod encoder;
mod geometry;
mod service;

pub use encoder::{PngCompression, PngTileEncoder};
pub use geometry::{compute_tiles, remainder, TileRect, GRID_SIZE, TILE_COUNT};
pub use service::{tile_file_name, Tile, TileService, TileSet};
