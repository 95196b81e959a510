//! Fixed-size grid backed by one full-size image.
//!
//! Useful when the whole simulation fits on screen: the entire image is
//! uploaded as one resource instead of per-tile.

use super::CellGrid;
use crate::colorizer::Colorizer;
use crate::display::DisplayProvider;
use crate::error::{DisplayError, GridError};
use crate::image::{ImageTile, SyncOutcome};
use crate::logging::{log, LogCategory, LogLevel};

pub struct DenseGrid<T, C, H> {
    width: u32,
    height: u32,
    cells: Vec<T>,
    image: ImageTile<H>,
    colorizer: C,
}

impl<T, C, H> DenseGrid<T, C, H>
where
    T: Copy + Default,
    C: Colorizer<T>,
{
    pub fn new(width: u32, height: u32, colorizer: C) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::InvalidDimensions { width, height });
        }
        let blank = colorizer.colorize(T::default());
        Ok(Self {
            width,
            height,
            cells: vec![T::default(); width as usize * height as usize],
            image: ImageTile::filled(width, height, blank),
            colorizer,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn image(&self) -> &ImageTile<H> {
        &self.image
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let in_bounds = (0..self.width as i64).contains(&(x as i64))
            && (0..self.height as i64).contains(&(y as i64));
        in_bounds.then(|| y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: i32, y: i32) -> T {
        self.index(x, y).map_or_else(T::default, |i| self.cells[i])
    }

    /// Writes outside the grid are dropped.
    pub fn set(&mut self, x: i32, y: i32, value: T) {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = value;
                self.image
                    .set_pixel(x as u32, y as u32, self.colorizer.colorize(value));
            }
            None => log(LogCategory::Grid, LogLevel::Warn, || {
                format!(
                    "write at ({x}, {y}) outside {}x{} dense grid",
                    self.width, self.height
                )
            }),
        }
    }

    /// Create or refresh the display resource.
    pub fn sync<D>(&mut self, display: &mut D) -> Result<SyncOutcome, DisplayError>
    where
        D: DisplayProvider<Handle = H>,
    {
        self.image.sync(display)
    }

    pub fn draw<D>(&self, display: &mut D, x: i32, y: i32) -> bool
    where
        D: DisplayProvider<Handle = H>,
    {
        self.image.draw(display, x, y)
    }

    pub fn release<D>(&mut self, display: &mut D) -> bool
    where
        D: DisplayProvider<Handle = H>,
    {
        self.image.release(display)
    }
}

impl<T, C, H> CellGrid<T> for DenseGrid<T, C, H>
where
    T: Copy + Default,
    C: Colorizer<T>,
{
    fn get(&self, x: i32, y: i32) -> T {
        DenseGrid::get(self, x, y)
    }

    fn set(&mut self, x: i32, y: i32, value: T) {
        DenseGrid::set(self, x, y, value)
    }
}
