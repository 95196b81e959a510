//! CPU display provider.
//!
//! Textures live in a slab of ARGB8888 buffers; draws composite them into
//! a [`Frame`] through the active camera. Every screen pixel is mapped back
//! to world space and samples the texel under its center, so neighbouring
//! tiles meet without gaps or double-covered seams at any zoom level.

use serde::{Deserialize, Serialize};

use super::DisplayProvider;
use crate::camera::{Camera2D, Vec2};
use crate::color::Color;
use crate::error::DisplayError;
use crate::logging::{log, LogCategory, LogLevel};
use crate::types::Frame;

/// Slot in the canvas texture slab. Not `Clone`: one handle per texture.
#[derive(Debug, PartialEq, Eq)]
pub struct TextureHandle(usize);

impl TextureHandle {
    pub fn id(&self) -> usize {
        self.0
    }
}

/// Running counters for canvas operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasStats {
    pub created: u64,
    pub updated: u64,
    pub released: u64,
    pub drawn: u64,
}

#[derive(Debug)]
struct Texture {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

pub struct SoftwareCanvas {
    frame: Frame,
    textures: Vec<Option<Texture>>,
    free: Vec<usize>,
    camera: Option<Camera2D>,
    stats: CanvasStats,
}

fn to_argb(pixels: &[Color]) -> impl Iterator<Item = u32> + '_ {
    pixels.iter().map(|c| c.to_argb())
}

impl SoftwareCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            frame: Frame::new(width, height),
            textures: Vec::new(),
            free: Vec::new(),
            camera: None,
            stats: CanvasStats::default(),
        }
    }

    /// Resize the framebuffer. Textures are kept.
    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) != (self.frame.width, self.frame.height) {
            self.frame = Frame::new(width, height);
        }
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    pub fn stats(&self) -> CanvasStats {
        self.stats
    }

    /// Number of live textures.
    pub fn resident(&self) -> usize {
        self.textures.len() - self.free.len()
    }

    fn texture_mut(&mut self, handle: &TextureHandle) -> Result<&mut Texture, DisplayError> {
        self.textures
            .get_mut(handle.0)
            .and_then(Option::as_mut)
            .ok_or(DisplayError::UnknownHandle(handle.0))
    }

    fn blit(frame: &mut Frame, texture: &Texture, camera: &Camera2D, x: i32, y: i32) {
        let (fw, fh) = (frame.width as i64, frame.height as i64);
        let (tw, th) = (texture.width as i64, texture.height as i64);

        let top_left = camera.world_to_screen(Vec2::new(x as f32, y as f32));
        let bottom_right = camera.world_to_screen(Vec2::new(
            (x as i64 + tw) as f32,
            (y as i64 + th) as f32,
        ));
        let sx0 = (top_left.x.floor() as i64).clamp(0, fw);
        let sy0 = (top_left.y.floor() as i64).clamp(0, fh);
        let sx1 = (bottom_right.x.ceil() as i64).clamp(0, fw);
        let sy1 = (bottom_right.y.ceil() as i64).clamp(0, fh);

        for sy in sy0..sy1 {
            let wy = camera.screen_to_world(Vec2::new(0.0, sy as f32 + 0.5)).y;
            let ty = wy.floor() as i64 - y as i64;
            if !(0..th).contains(&ty) {
                continue;
            }
            let src_row = (ty * tw) as usize;
            let dst_row = (sy * fw) as usize;
            for sx in sx0..sx1 {
                let wx = camera.screen_to_world(Vec2::new(sx as f32 + 0.5, 0.0)).x;
                let tx = wx.floor() as i64 - x as i64;
                if !(0..tw).contains(&tx) {
                    continue;
                }
                let texel = texture.pixels[src_row + tx as usize];
                if texel >> 24 != 0 {
                    frame.pixels[dst_row + sx as usize] = texel;
                }
            }
        }
    }
}

impl DisplayProvider for SoftwareCanvas {
    type Handle = TextureHandle;

    fn create(
        &mut self,
        pixels: &[Color],
        width: u32,
        height: u32,
    ) -> Result<TextureHandle, DisplayError> {
        if width == 0 || height == 0 {
            return Err(DisplayError::InvalidDimensions { width, height });
        }
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(DisplayError::SizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }

        let texture = Texture {
            width,
            height,
            pixels: to_argb(pixels).collect(),
        };
        let slot = match self.free.pop() {
            Some(slot) => {
                self.textures[slot] = Some(texture);
                slot
            }
            None => {
                self.textures.push(Some(texture));
                self.textures.len() - 1
            }
        };
        self.stats.created += 1;
        Ok(TextureHandle(slot))
    }

    fn update(&mut self, handle: &mut TextureHandle, pixels: &[Color]) -> Result<(), DisplayError> {
        let texture = self.texture_mut(handle)?;
        if pixels.len() != texture.pixels.len() {
            return Err(DisplayError::SizeMismatch {
                expected: texture.pixels.len(),
                actual: pixels.len(),
            });
        }
        for (dst, src) in texture.pixels.iter_mut().zip(to_argb(pixels)) {
            *dst = src;
        }
        self.stats.updated += 1;
        Ok(())
    }

    fn draw(&mut self, handle: &TextureHandle, x: i32, y: i32) {
        let Some(texture) = self.textures.get(handle.0).and_then(Option::as_ref) else {
            log(LogCategory::Display, LogLevel::Warn, || {
                format!("draw of unknown texture {}", handle.0)
            });
            return;
        };
        let camera = self.camera.clone().unwrap_or_default();
        Self::blit(&mut self.frame, texture, &camera, x, y);
        self.stats.drawn += 1;
    }

    fn release(&mut self, handle: TextureHandle) {
        match self.textures.get_mut(handle.0) {
            Some(slot) if slot.is_some() => {
                *slot = None;
                self.free.push(handle.0);
                self.stats.released += 1;
            }
            _ => log(LogCategory::Display, LogLevel::Warn, || {
                format!("release of unknown texture {}", handle.0)
            }),
        }
    }

    fn viewport(&self) -> (u32, u32) {
        (self.frame.width, self.frame.height)
    }

    fn begin_frame(&mut self, clear: Color) {
        self.frame.pixels.fill(clear.to_argb());
    }

    fn begin_camera(&mut self, camera: &Camera2D) {
        self.camera = Some(camera.clone());
    }

    fn end_camera(&mut self) {
        self.camera = None;
    }

    fn name(&self) -> &str {
        "Software"
    }
}
