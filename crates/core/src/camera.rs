//! Pan/zoom camera and tile visibility.
//!
//! The transform matches a classic 2D camera: a world point `p` lands on
//! screen at `(p - target) * zoom + offset`. Panning moves `target`;
//! zooming re-anchors `offset`/`target` on the cursor so the world point
//! under it stays put.

use serde::{Deserialize, Serialize};

use crate::coords::TileCoord;
use crate::error::GridError;
use crate::logging::{log, LogCategory, LogLevel};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn scale(self, s: f32) -> Self {
        Self::new(self.x * s, self.y * s)
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera2D {
    /// Screen-space anchor.
    pub offset: Vec2,
    /// World-space point drawn at `offset`.
    pub target: Vec2,
    pub zoom: f32,
    /// Zoom step per wheel notch; also the minimum zoom.
    pub zoom_increment: f32,
}

impl Default for Camera2D {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Camera2D {
    /// Like [`Camera2D::new`], but reports a non-positive or NaN increment
    /// as an error.
    pub fn with_increment(zoom_increment: f32) -> Result<Self, GridError> {
        if !(zoom_increment > 0.0) {
            return Err(GridError::InvalidZoomIncrement(zoom_increment));
        }
        Ok(Self::new(zoom_increment))
    }

    /// Panics unless `zoom_increment` is positive.
    pub fn new(zoom_increment: f32) -> Self {
        assert!(zoom_increment > 0.0, "zoom increment must be positive");
        Self {
            offset: Vec2::ZERO,
            target: Vec2::ZERO,
            zoom: 1.0f32.max(zoom_increment),
            zoom_increment,
        }
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        (world - self.target).scale(self.zoom) + self.offset
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        (screen - self.offset).scale(1.0 / self.zoom) + self.target
    }

    /// Drag by `delta` screen pixels; the world follows the cursor.
    pub fn pan(&mut self, delta: Vec2) {
        self.target = self.target + delta.scale(-1.0 / self.zoom);
    }

    /// Apply `wheel` notches of zoom around the screen point `cursor`.
    pub fn zoom_at(&mut self, wheel: f32, cursor: Vec2) {
        if wheel == 0.0 {
            return;
        }
        let world = self.screen_to_world(cursor);
        self.offset = cursor;
        self.target = world;
        self.zoom = (self.zoom + wheel * self.zoom_increment).max(self.zoom_increment);
        log(LogCategory::Camera, LogLevel::Debug, || {
            format!(
                "zoom {:.2} anchored at world ({:.1}, {:.1})",
                self.zoom, world.x, world.y
            )
        });
    }

    /// Tiles overlapping a `width * height` screen, widened by `margin`
    /// tiles on every side.
    pub fn visible_tiles(&self, width: u32, height: u32, tile_size: i32, margin: i32) -> TileRange {
        let top_left = self.screen_to_world(Vec2::ZERO);
        let bottom_right = self.screen_to_world(Vec2::new(width as f32, height as f32));
        let ts = tile_size as f32;
        TileRange {
            // `as` saturates at the i32 bounds
            min_x: ((top_left.x / ts).floor() as i32).saturating_sub(margin),
            min_y: ((top_left.y / ts).floor() as i32).saturating_sub(margin),
            max_x: ((bottom_right.x / ts).floor() as i32).saturating_add(margin),
            max_y: ((bottom_right.y / ts).floor() as i32).saturating_add(margin),
        }
    }
}

/// Inclusive rectangle of tile coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileRange {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl TileRange {
    pub fn contains(&self, coord: TileCoord) -> bool {
        (self.min_x..=self.max_x).contains(&coord.x) && (self.min_y..=self.max_y).contains(&coord.y)
    }

    pub fn len(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        let w = (self.max_x as i64 - self.min_x as i64 + 1) as usize;
        let h = (self.max_y as i64 - self.min_y as i64 + 1) as usize;
        w * h
    }

    pub fn is_empty(&self) -> bool {
        self.max_x < self.min_x || self.max_y < self.min_y
    }

    /// Row-major iteration.
    pub fn iter(&self) -> impl Iterator<Item = TileCoord> {
        let (min_x, max_x) = (self.min_x, self.max_x);
        (self.min_y..=self.max_y)
            .flat_map(move |y| (min_x..=max_x).map(move |x| TileCoord::new(x, y)))
    }
}
