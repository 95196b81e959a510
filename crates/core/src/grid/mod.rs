//! Scalar cell storage.
//!
//! - [`TiledGrid`]: unbounded sparse plane split into square tiles
//! - [`DenseGrid`]: fixed-size grid with a single full-size image buffer
//!
//! Both implement [`CellGrid`], the read/write surface that simulations use.

pub mod dense;
pub mod tiled;

pub use dense::DenseGrid;
pub use tiled::{Tile, TiledGrid};

/// Read/write access to scalar cells by global coordinate.
pub trait CellGrid<T> {
    /// Value at `(x, y)`, or `T::default()` where nothing has been written.
    fn get(&self, x: i32, y: i32) -> T;

    /// Store `value` at `(x, y)`.
    fn set(&mut self, x: i32, y: i32, value: T);
}
