//! Error types shared by the grid and display layers.

use thiserror::Error;

/// Invalid grid configuration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GridError {
    #[error("tile size must be positive and its square must fit in an i32, got {0}")]
    InvalidTileSize(i32),

    #[error("zoom increment must be positive, got {0}")]
    InvalidZoomIncrement(f32),

    #[error("grid dimensions must be non-zero, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Failure reported by a display provider.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DisplayError {
    #[error("texture handle {0} is not resident")]
    UnknownHandle(usize),

    #[error("pixel buffer holds {actual} pixels, texture expects {expected}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("cannot create a {width}x{height} texture")]
    InvalidDimensions { width: u32, height: u32 },
}
