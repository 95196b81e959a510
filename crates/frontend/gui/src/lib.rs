//! Windowed viewer for tiled grid demos.
//!
//! The binary owns the `minifb` window; this library holds the pieces that
//! can be exercised without one: settings, mouse-to-camera mapping, the
//! stats overlay and screenshots.

pub mod input;
pub mod overlay;
pub mod screenshot;
pub mod settings;
