//! Tile coordinate math.
//!
//! Global cell coordinates are split into a tile coordinate and a local
//! offset inside that tile. Both halves round toward negative infinity so
//! that negative coordinates tile contiguously: with a tile size of 16,
//! `x = -1` lives in tile `-1` at local offset `15`, not in tile `0`.

use serde::{Deserialize, Serialize};

/// Identifies a tile in the sparse store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: i32,
    pub y: i32,
}

impl TileCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// World position of the tile's top-left cell.
    pub fn origin(self, tile_size: i32) -> (i32, i32) {
        (self.x * tile_size, self.y * tile_size)
    }

    /// Tile containing the cell at `(x, y)`.
    pub fn containing(x: i32, y: i32, tile_size: i32) -> Self {
        Self::new(div_floor(x, tile_size), div_floor(y, tile_size))
    }
}

/// Result of splitting a global coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decomposed {
    pub tile: TileCoord,
    pub local_x: i32,
    pub local_y: i32,
}

impl Decomposed {
    /// Row-major index of the cell inside its tile.
    #[inline]
    pub fn index(&self, tile_size: i32) -> usize {
        (self.local_y * tile_size + self.local_x) as usize
    }
}

/// Integer division rounding toward negative infinity.
#[inline]
pub fn div_floor(a: i32, b: i32) -> i32 {
    a.div_euclid(b)
}

/// Modulo whose result is always in `0..b` for positive `b`.
#[inline]
pub fn mod_floor(a: i32, b: i32) -> i32 {
    a.rem_euclid(b)
}

/// Split `(x, y)` into tile and local coordinates.
///
/// `tile_size` must be positive; grids validate it on construction.
#[inline]
pub fn decompose(x: i32, y: i32, tile_size: i32) -> Decomposed {
    debug_assert!(tile_size > 0, "tile size must be positive");
    Decomposed {
        tile: TileCoord::new(div_floor(x, tile_size), div_floor(y, tile_size)),
        local_x: mod_floor(x, tile_size),
        local_y: mod_floor(y, tile_size),
    }
}
