//! Tile geometry for the 3×3 grid.
//!
//! The grid divides the source into equally sized cells using truncating
//! integer division. When a dimension is not a multiple of three, the
//! remainder strip on the right or bottom edge belongs to no tile.

use serde::Serialize;

/// Number of cells along each axis.
pub const GRID_SIZE: u32 = 3;

/// Number of tiles produced per image.
pub const TILE_COUNT: usize = (GRID_SIZE * GRID_SIZE) as usize;

// =============================================================================
// TileRect
// =============================================================================

/// Pixel rectangle of one tile in source coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TileRect {
    /// Left edge (inclusive)
    pub x: u32,

    /// Top edge (inclusive)
    pub y: u32,

    /// Width in pixels
    pub width: u32,

    /// Height in pixels
    pub height: u32,
}

impl TileRect {
    /// Create a new rectangle.
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle for the tile at row-major `index` in a grid of `part_width` × `part_height` cells.
    pub const fn for_index(index: usize, part_width: u32, part_height: u32) -> Self {
        let row = (index as u32) / GRID_SIZE;
        let col = (index as u32) % GRID_SIZE;
        Self::new(col * part_width, row * part_height, part_width, part_height)
    }

    /// Exclusive right edge, saturating at `u32::MAX`.
    pub const fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge, saturating at `u32::MAX`.
    pub const fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// Whether the rectangle covers no pixels.
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether two rectangles share at least one pixel.
    pub fn intersects(&self, other: &TileRect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Clip this rectangle to a `width` × `height` image.
    ///
    /// The result may be empty when the rectangle lies entirely outside.
    pub fn clip_to(&self, width: u32, height: u32) -> TileRect {
        let x = self.x.min(width);
        let y = self.y.min(height);
        let right = self.right().min(width);
        let bottom = self.bottom().min(height);
        TileRect::new(x, y, right - x, bottom - y)
    }
}

// =============================================================================
// Grid computation
// =============================================================================

/// Compute the nine tile rectangles for a `width` × `height` image.
///
/// Rectangles are returned in row-major order: index `i` sits at row `i / 3`,
/// column `i % 3`. Each tile is `width / 3` × `height / 3` pixels.
///
/// Dimensions smaller than three produce zero-sized tiles; callers that
/// decode real images never pass zero.
pub fn compute_tiles(width: u32, height: u32) -> [TileRect; TILE_COUNT] {
    let part_width = width / GRID_SIZE;
    let part_height = height / GRID_SIZE;

    std::array::from_fn(|i| TileRect::for_index(i, part_width, part_height))
}

/// Width and height of the pixels dropped from the right and bottom edges.
pub fn remainder(width: u32, height: u32) -> (u32, u32) {
    (width % GRID_SIZE, height % GRID_SIZE)
}

// =============================================================================
// Tests
// =============================================================================
