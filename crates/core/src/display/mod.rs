//! Display provider abstraction.
//!
//! The grid core never owns a graphics context. It talks to whatever
//! presents pixels through [`DisplayProvider`]: create a resource from a
//! pixel buffer, upload new pixels into it, draw it at a world position,
//! and release it.
//!
//! ```text
//! GraphicalTiledGrid -> DisplayProvider -> {SoftwareCanvas, GPU backends, test doubles}
//! ```
//!
//! Handles are owned values. The cache stores them inside
//! `TileResource::Loaded` and gives them back through
//! [`DisplayProvider::release`], so a released handle cannot be drawn again.

pub mod software;

pub use software::{CanvasStats, SoftwareCanvas, TextureHandle};

use crate::camera::Camera2D;
use crate::color::Color;
use crate::error::DisplayError;

pub trait DisplayProvider {
    /// Resource handle for one uploaded image.
    type Handle;

    /// Create a resource from `pixels` (`width * height`, row-major).
    fn create(&mut self, pixels: &[Color], width: u32, height: u32)
        -> Result<Self::Handle, DisplayError>;

    /// Replace the full contents of an existing resource.
    fn update(&mut self, handle: &mut Self::Handle, pixels: &[Color]) -> Result<(), DisplayError>;

    /// Draw the resource with its top-left corner at world `(x, y)`.
    ///
    /// The position goes through the camera set by [`begin_camera`], or is
    /// used as screen pixels when no camera is active.
    ///
    /// [`begin_camera`]: DisplayProvider::begin_camera
    fn draw(&mut self, handle: &Self::Handle, x: i32, y: i32);

    /// Free the resource.
    fn release(&mut self, handle: Self::Handle);

    /// Size of the drawable surface in screen pixels.
    fn viewport(&self) -> (u32, u32);

    /// Start a frame, clearing the surface.
    fn begin_frame(&mut self, _clear: Color) {}

    /// Route subsequent draws through `camera`.
    fn begin_camera(&mut self, _camera: &Camera2D) {}

    /// Return to screen-space draws.
    fn end_camera(&mut self) {}

    fn end_frame(&mut self) {}

    /// Backend name for overlays and logs.
    fn name(&self) -> &str;
}
