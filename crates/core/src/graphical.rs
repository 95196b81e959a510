//! Sparse grid with a parallel cache of renderable image tiles.
//!
//! Every scalar tile has exactly one image tile at the same coordinate,
//! holding one color per cell. Writes recolor the pixel and mark the image
//! dirty; [`GraphicalTiledGrid::load_tile_at`] is the only place pixel data
//! is handed to the display.

use std::collections::HashMap;

use crate::colorizer::Colorizer;
use crate::coords::{decompose, TileCoord};
use crate::display::DisplayProvider;
use crate::error::{DisplayError, GridError};
use crate::grid::{CellGrid, TiledGrid};
use crate::image::{ImageTile, SyncOutcome};
use crate::logging::{log, LogCategory, LogLevel};

pub struct GraphicalTiledGrid<T, C, H> {
    cells: TiledGrid<T>,
    images: HashMap<TileCoord, ImageTile<H>>,
    colorizer: C,
}

impl<T, C, H> GraphicalTiledGrid<T, C, H>
where
    T: Copy + Default,
    C: Colorizer<T>,
{
    pub fn new(tile_size: i32, colorizer: C) -> Result<Self, GridError> {
        Ok(Self {
            cells: TiledGrid::new(tile_size)?,
            images: HashMap::new(),
            colorizer,
        })
    }

    pub fn tile_size(&self) -> i32 {
        self.cells.tile_size()
    }

    pub fn colorizer(&self) -> &C {
        &self.colorizer
    }

    /// The scalar store.
    pub fn cells(&self) -> &TiledGrid<T> {
        &self.cells
    }

    pub fn get(&self, x: i32, y: i32) -> T {
        self.cells.get(x, y)
    }

    pub fn set(&mut self, x: i32, y: i32, value: T) {
        self.cells.set(x, y, value);

        let ts = self.tile_size();
        let d = decompose(x, y, ts);
        let colorizer = &self.colorizer;
        let image = self.images.entry(d.tile).or_insert_with(|| {
            let blank = colorizer.colorize(T::default());
            ImageTile::filled(ts as u32, ts as u32, blank)
        });
        image.set_pixel(d.local_x as u32, d.local_y as u32, colorizer.colorize(value));
    }

    pub fn image_tile(&self, tile: TileCoord) -> Option<&ImageTile<H>> {
        self.images.get(&tile)
    }

    pub fn tile_count(&self) -> usize {
        self.images.len()
    }

    pub fn loaded_count(&self) -> usize {
        self.images.values().filter(|image| image.is_loaded()).count()
    }

    /// Coordinates of tiles that currently hold a display resource.
    pub fn loaded_tiles(&self) -> impl Iterator<Item = TileCoord> + '_ {
        self.images
            .iter()
            .filter(|(_, image)| image.is_loaded())
            .map(|(&coord, _)| coord)
    }

    /// Create or refresh the display resource for `tile`.
    ///
    /// Tiles that were never written have no image and are skipped.
    pub fn load_tile_at<D>(&mut self, display: &mut D, tile: TileCoord) -> Result<SyncOutcome, DisplayError>
    where
        D: DisplayProvider<Handle = H>,
    {
        let Some(image) = self.images.get_mut(&tile) else {
            return Ok(SyncOutcome::Missing);
        };
        let outcome = image.sync(display)?;
        if outcome != SyncOutcome::Unchanged {
            log(LogCategory::Cache, LogLevel::Trace, || {
                format!("{outcome:?} resource for tile ({}, {})", tile.x, tile.y)
            });
        }
        Ok(outcome)
    }

    /// Draw `tile` at its world position. Missing or unloaded tiles are
    /// skipped; returns whether a draw was issued.
    pub fn draw_tile_at<D>(&self, display: &mut D, tile: TileCoord) -> bool
    where
        D: DisplayProvider<Handle = H>,
    {
        let Some(image) = self.images.get(&tile) else {
            return false;
        };
        let (x, y) = tile.origin(self.tile_size());
        image.draw(display, x, y)
    }

    /// Release the display resource for `tile`; returns whether one was held.
    pub fn unload_tile_at<D>(&mut self, display: &mut D, tile: TileCoord) -> bool
    where
        D: DisplayProvider<Handle = H>,
    {
        let released = self
            .images
            .get_mut(&tile)
            .is_some_and(|image| image.release(display));
        if released {
            log(LogCategory::Cache, LogLevel::Trace, || {
                format!("released resource for tile ({}, {})", tile.x, tile.y)
            });
        }
        released
    }

    /// Release every display resource. Returns how many were released.
    pub fn unload_all<D>(&mut self, display: &mut D) -> usize
    where
        D: DisplayProvider<Handle = H>,
    {
        self.images
            .values_mut()
            .filter(|image| image.is_loaded())
            .map(|image| image.release(display))
            .filter(|&released| released)
            .count()
    }
}

impl<T, C, H> CellGrid<T> for GraphicalTiledGrid<T, C, H>
where
    T: Copy + Default,
    C: Colorizer<T>,
{
    fn get(&self, x: i32, y: i32) -> T {
        GraphicalTiledGrid::get(self, x, y)
    }

    fn set(&mut self, x: i32, y: i32, value: T) {
        GraphicalTiledGrid::set(self, x, y, value)
    }
}
