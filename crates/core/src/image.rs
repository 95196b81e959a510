//! Renderable pixel buffers and their display resource state.

use crate::color::Color;
use crate::display::DisplayProvider;
use crate::error::DisplayError;

/// Whether a display resource currently backs an image.
#[derive(Debug)]
pub enum TileResource<H> {
    Unloaded,
    Loaded(H),
}

impl<H> TileResource<H> {
    pub fn is_loaded(&self) -> bool {
        matches!(self, TileResource::Loaded(_))
    }

    pub fn handle(&self) -> Option<&H> {
        match self {
            TileResource::Loaded(handle) => Some(handle),
            TileResource::Unloaded => None,
        }
    }
}

/// What a load pass did to one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// No image exists at that coordinate.
    Missing,
    /// A resource was created from the current pixels.
    Created,
    /// Dirty pixels were uploaded into the existing resource.
    Updated,
    /// Already loaded and clean.
    Unchanged,
}

/// A pixel buffer plus its dirty flag and display resource.
#[derive(Debug)]
pub struct ImageTile<H> {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
    dirty: bool,
    resource: TileResource<H>,
}

impl<H> ImageTile<H> {
    /// A `width * height` image filled with `color`, dirty and unloaded.
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
            dirty: true,
            resource: TileResource::Unloaded,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_loaded(&self) -> bool {
        self.resource.is_loaded()
    }

    pub fn resource(&self) -> &TileResource<H> {
        &self.resource
    }

    /// Bring the display resource in line with the pixel buffer.
    ///
    /// An unloaded image gets a fresh resource built from its current
    /// pixels; a loaded, dirty image has its pixels re-uploaded. Either way
    /// the image is clean afterwards.
    pub fn sync<D>(&mut self, display: &mut D) -> Result<SyncOutcome, DisplayError>
    where
        D: DisplayProvider<Handle = H>,
    {
        let outcome = match &mut self.resource {
            TileResource::Unloaded => {
                let handle = display.create(&self.pixels, self.width, self.height)?;
                self.resource = TileResource::Loaded(handle);
                SyncOutcome::Created
            }
            TileResource::Loaded(handle) if self.dirty => {
                display.update(handle, &self.pixels)?;
                SyncOutcome::Updated
            }
            TileResource::Loaded(_) => SyncOutcome::Unchanged,
        };
        self.dirty = false;
        Ok(outcome)
    }

    /// Draw at world `(x, y)` if loaded. Returns whether a draw was issued.
    pub fn draw<D>(&self, display: &mut D, x: i32, y: i32) -> bool
    where
        D: DisplayProvider<Handle = H>,
    {
        match &self.resource {
            TileResource::Loaded(handle) => {
                display.draw(handle, x, y);
                true
            }
            TileResource::Unloaded => false,
        }
    }

    /// Release the resource if loaded. Returns whether one was released.
    pub fn release<D>(&mut self, display: &mut D) -> bool
    where
        D: DisplayProvider<Handle = H>,
    {
        match std::mem::replace(&mut self.resource, TileResource::Unloaded) {
            TileResource::Loaded(handle) => {
                display.release(handle);
                true
            }
            TileResource::Unloaded => false,
        }
    }
}
