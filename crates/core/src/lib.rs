//! Sparse tiled grids rendered through a pan/zoom camera.
//!
//! Cells live in fixed-size square tiles allocated on first write. Each
//! tile of a [`GraphicalTiledGrid`] keeps a colored image whose display
//! resource is created, refreshed and released by the
//! [`FrameController`] as tiles scroll in and out of view.

pub mod camera;
pub mod color;
pub mod colorizer;
pub mod coords;
pub mod demo;
pub mod display;
pub mod error;
pub mod frame;
pub mod graphical;
pub mod grid;
pub mod image;
pub mod logging;
pub mod simulation;

pub mod types {
    use serde::{Deserialize, Serialize};

    /// ARGB8888 framebuffer, row-major.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct Frame {
        pub width: u32,
        pub height: u32,
        pub pixels: Vec<u32>,
    }

    impl Frame {
        pub fn new(width: u32, height: u32) -> Self {
            Self {
                width,
                height,
                pixels: vec![0; width as usize * height as usize],
            }
        }

        /// Pixel at `(x, y)`, or `None` outside the frame.
        pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
            if x >= self.width || y >= self.height {
                return None;
            }
            self.pixels.get((y * self.width + x) as usize).copied()
        }

        /// Tightly packed RGBA8 bytes, as image encoders expect.
        pub fn to_rgba(&self) -> Vec<u8> {
            self.pixels
                .iter()
                .flat_map(|&argb| {
                    let [a, r, g, b] = argb.to_be_bytes();
                    [r, g, b, a]
                })
                .collect()
        }
    }
}

pub use camera::{Camera2D, TileRange, Vec2};
pub use color::Color;
pub use colorizer::{Colorizer, GradientColorizer, PaletteColorizer, UniformRedColorizer};
pub use coords::{decompose, div_floor, mod_floor, TileCoord};
pub use demo::{Demo, DemoKind, DemoSettings};
pub use display::{DisplayProvider, SoftwareCanvas, TextureHandle};
pub use error::{DisplayError, GridError};
pub use frame::{EvictionPolicy, FpsCounter, FrameConfig, FrameController, FrameStats};
pub use graphical::GraphicalTiledGrid;
pub use grid::{CellGrid, DenseGrid, TiledGrid};
pub use image::{ImageTile, SyncOutcome, TileResource};
pub use simulation::{Fade, Simulation, Stripes};
