//! Sparse grid of scalar cells stored in lazily allocated square tiles.

use std::collections::HashMap;

use super::CellGrid;
use crate::coords::{decompose, TileCoord};
use crate::error::GridError;
use crate::logging::{log, LogCategory, LogLevel};

/// A `tile_size * tile_size` block of cells, row-major.
#[derive(Debug, Clone)]
pub struct Tile<T> {
    cells: Vec<T>,
}

impl<T: Copy + Default> Tile<T> {
    fn new(tile_size: i32) -> Self {
        Self {
            cells: vec![T::default(); (tile_size * tile_size) as usize],
        }
    }

    pub fn cells(&self) -> &[T] {
        &self.cells
    }
}

/// Unbounded sparse grid.
///
/// Reads from tiles that were never written return `T::default()` without
/// allocating; the first write inside a tile allocates it zero-filled.
#[derive(Debug, Clone)]
pub struct TiledGrid<T> {
    tile_size: i32,
    tiles: HashMap<TileCoord, Tile<T>>,
}

impl<T: Copy + Default> TiledGrid<T> {
    pub fn new(tile_size: i32) -> Result<Self, GridError> {
        if tile_size <= 0 || tile_size.checked_mul(tile_size).is_none() {
            return Err(GridError::InvalidTileSize(tile_size));
        }
        Ok(Self {
            tile_size,
            tiles: HashMap::new(),
        })
    }

    pub fn tile_size(&self) -> i32 {
        self.tile_size
    }

    pub fn get(&self, x: i32, y: i32) -> T {
        let d = decompose(x, y, self.tile_size);
        match self.tiles.get(&d.tile) {
            Some(tile) => tile.cells[d.index(self.tile_size)],
            None => T::default(),
        }
    }

    pub fn set(&mut self, x: i32, y: i32, value: T) {
        let d = decompose(x, y, self.tile_size);
        let tile_size = self.tile_size;
        let tile = self.tiles.entry(d.tile).or_insert_with(|| {
            log(LogCategory::Grid, LogLevel::Trace, || {
                format!("allocated tile ({}, {})", d.tile.x, d.tile.y)
            });
            Tile::new(tile_size)
        });
        tile.cells[d.index(tile_size)] = value;
    }

    pub fn tile(&self, coord: TileCoord) -> Option<&Tile<T>> {
        self.tiles.get(&coord)
    }

    pub fn contains_tile(&self, coord: TileCoord) -> bool {
        self.tiles.contains_key(&coord)
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Coordinates of every allocated tile, in no particular order.
    pub fn tiles(&self) -> impl Iterator<Item = TileCoord> + '_ {
        self.tiles.keys().copied()
    }

    pub fn clear(&mut self) {
        self.tiles.clear();
    }
}

impl<T: Copy + Default> CellGrid<T> for TiledGrid<T> {
    fn get(&self, x: i32, y: i32) -> T {
        TiledGrid::get(self, x, y)
    }

    fn set(&mut self, x: i32, y: i32, value: T) {
        TiledGrid::set(self, x, y, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_positive_tile_size() {
        assert_eq!(
            TiledGrid::<i32>::new(0).unwrap_err(),
            GridError::InvalidTileSize(0)
        );
        assert!(TiledGrid::<i32>::new(-16).is_err());
    }

    #[test]
    fn test_rejects_tile_size_with_overflowing_area() {
        assert_eq!(
            TiledGrid::<u8>::new(50_000).unwrap_err(),
            GridError::InvalidTileSize(50_000)
        );
        // 46340^2 still fits in an i32
        assert!(TiledGrid::<u8>::new(46_340).is_ok());
        assert!(TiledGrid::<u8>::new(46_341).is_err());
    }

    #[test]
    fn test_read_miss_does_not_allocate() {
        let grid = TiledGrid::<i32>::new(16).unwrap();
        assert_eq!(grid.get(1000, -1000), 0);
        assert_eq!(grid.tile_count(), 0);
    }

    #[test]
    fn test_scenario_three_cells_two_tiles() {
        let mut grid = TiledGrid::new(16).unwrap();
        grid.set(0, 0, 1);
        grid.set(15, 15, 2);
        grid.set(16, 0, 3);

        assert_eq!(grid.tile_count(), 2);
        assert_eq!(grid.get(0, 0), 1);
        assert_eq!(grid.get(15, 15), 2);
        assert_eq!(grid.get(16, 0), 3);
        assert_eq!(grid.get(-1, -1), 0);
        assert_eq!(grid.tile_count(), 2);
        assert!(!grid.contains_tile(TileCoord::new(-1, -1)));
    }

    #[test]
    fn test_negative_cells_tile_contiguously() {
        let mut grid = TiledGrid::new(16).unwrap();
        grid.set(-1, -1, 5);
        grid.set(-16, -16, 6);
        grid.set(-17, 0, 7);

        assert_eq!(grid.tile_count(), 3);
        assert!(grid.contains_tile(TileCoord::new(-1, -1)));
        assert!(grid.contains_tile(TileCoord::new(-2, 0)));
        assert_eq!(grid.get(-1, -1), 5);
        assert_eq!(grid.get(-16, -16), 6);
        assert_eq!(grid.get(-17, 0), 7);
        // Same tile, untouched cell
        assert_eq!(grid.get(-2, -2), 0);
    }

    #[test]
    fn test_new_tile_is_zero_filled() {
        let mut grid = TiledGrid::new(4).unwrap();
        grid.set(1, 1, 2.5f32);
        let tile = grid.tile(TileCoord::new(0, 0)).unwrap();
        assert_eq!(tile.cells().len(), 16);
        assert_eq!(tile.cells().iter().filter(|&&v| v != 0.0).count(), 1);
    }

    #[test]
    fn test_overwrite_and_clear() {
        let mut grid = TiledGrid::new(8).unwrap();
        grid.set(3, 3, 1);
        grid.set(3, 3, 9);
        assert_eq!(grid.get(3, 3), 9);
        assert_eq!(grid.tile_count(), 1);

        grid.clear();
        assert_eq!(grid.tile_count(), 0);
        assert_eq!(grid.get(3, 3), 0);
    }
}
