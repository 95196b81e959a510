//! Frame driver for a graphical tiled grid.
//!
//! One call to [`FrameController::run_frame`] is one frame:
//!
//! 1. Query the camera for the visible tile range (plus margin).
//! 2. Apply the eviction policy to loaded tiles outside that range.
//! 3. Load every tile in range (create or re-upload resources).
//! 4. Clear, then draw every tile in range through the camera.
//! 5. Run the tick callback, which mutates cells for the next frame.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::camera::{Camera2D, TileRange};
use crate::color::Color;
use crate::colorizer::Colorizer;
use crate::coords::TileCoord;
use crate::display::DisplayProvider;
use crate::error::{DisplayError, GridError};
use crate::graphical::GraphicalTiledGrid;
use crate::image::SyncOutcome;
use crate::logging::{log, LogCategory, LogLevel};
use crate::simulation::Simulation;

/// What happens to display resources of tiles that leave the visible range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvictionPolicy {
    /// Release them; they are recreated from current pixels on return.
    #[default]
    UnloadOffscreen,
    /// Keep every resource alive.
    Retain,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    pub tile_size: i32,
    /// Extra tiles loaded around the screen on every side.
    pub margin: i32,
    pub eviction: EvictionPolicy,
    pub zoom_increment: f32,
    pub clear_color: Color,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            tile_size: 16,
            margin: 1,
            eviction: EvictionPolicy::UnloadOffscreen,
            zoom_increment: 1.0,
            clear_color: Color::WHITE,
        }
    }
}

/// Counters for a single frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameStats {
    pub frame_id: u64,
    pub visible: usize,
    pub created: usize,
    pub updated: usize,
    pub drawn: usize,
    pub evicted: usize,
    /// Tiles holding a display resource after the frame.
    pub resident: usize,
    /// Tiles allocated in the grid.
    pub tiles: usize,
}

pub struct FrameController<T, C, D: DisplayProvider> {
    grid: GraphicalTiledGrid<T, C, D::Handle>,
    display: D,
    camera: Camera2D,
    config: FrameConfig,
    frame_id: u64,
    last_range: Option<TileRange>,
}

impl<T, C, D> FrameController<T, C, D>
where
    T: Copy + Default,
    C: Colorizer<T>,
    D: DisplayProvider,
{
    pub fn new(config: FrameConfig, colorizer: C, display: D) -> Result<Self, GridError> {
        Ok(Self {
            grid: GraphicalTiledGrid::new(config.tile_size, colorizer)?,
            display,
            camera: Camera2D::with_increment(config.zoom_increment)?,
            config,
            frame_id: 0,
            last_range: None,
        })
    }

    pub fn grid(&self) -> &GraphicalTiledGrid<T, C, D::Handle> {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut GraphicalTiledGrid<T, C, D::Handle> {
        &mut self.grid
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn camera(&self) -> &Camera2D {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera2D {
        &mut self.camera
    }

    pub fn config(&self) -> &FrameConfig {
        &self.config
    }

    /// Frames completed so far.
    pub fn frame_id(&self) -> u64 {
        self.frame_id
    }

    pub fn visible_range(&self) -> TileRange {
        let (w, h) = self.display.viewport();
        self.camera
            .visible_tiles(w, h, self.config.tile_size, self.config.margin)
    }

    /// Run one frame, then hand the grid to `tick`.
    pub fn run_frame<F>(&mut self, tick: F) -> Result<FrameStats, DisplayError>
    where
        F: FnOnce(&mut GraphicalTiledGrid<T, C, D::Handle>),
    {
        let range = self.visible_range();
        if self.last_range != Some(range) {
            log(LogCategory::Frame, LogLevel::Debug, || {
                format!(
                    "visible tiles x {}..={} y {}..={}",
                    range.min_x, range.max_x, range.min_y, range.max_y
                )
            });
            self.last_range = Some(range);
        }

        let mut stats = FrameStats {
            frame_id: self.frame_id,
            visible: range.len(),
            ..FrameStats::default()
        };

        if self.config.eviction == EvictionPolicy::UnloadOffscreen {
            stats.evicted = self.evict_outside(&range);
        }

        for tile in range.iter() {
            match self.grid.load_tile_at(&mut self.display, tile)? {
                SyncOutcome::Created => stats.created += 1,
                SyncOutcome::Updated => stats.updated += 1,
                SyncOutcome::Missing | SyncOutcome::Unchanged => {}
            }
        }

        self.display.begin_frame(self.config.clear_color);
        self.display.begin_camera(&self.camera);
        for tile in range.iter() {
            if self.grid.draw_tile_at(&mut self.display, tile) {
                stats.drawn += 1;
            }
        }
        self.display.end_camera();
        self.display.end_frame();

        tick(&mut self.grid);

        stats.resident = self.grid.loaded_count();
        stats.tiles = self.grid.tile_count();
        self.frame_id += 1;
        Ok(stats)
    }

    /// Run one frame driven by a [`Simulation`].
    pub fn step<S>(&mut self, simulation: &mut S) -> Result<FrameStats, DisplayError>
    where
        S: Simulation<T>,
    {
        self.run_frame(|grid| simulation.tick(grid))
    }

    fn evict_outside(&mut self, range: &TileRange) -> usize {
        let offscreen: Vec<TileCoord> = self
            .grid
            .loaded_tiles()
            .filter(|tile| !range.contains(*tile))
            .collect();
        let evicted = offscreen
            .into_iter()
            .filter(|&tile| self.grid.unload_tile_at(&mut self.display, tile))
            .count();
        if evicted > 0 {
            log(LogCategory::Frame, LogLevel::Debug, || {
                format!("evicted {evicted} offscreen tile resource(s)")
            });
        }
        evicted
    }

    /// Release every display resource and give back the display.
    pub fn shutdown(mut self) -> D {
        let released = self.grid.unload_all(&mut self.display);
        log(LogCategory::Frame, LogLevel::Info, || {
            format!("released {released} tile resource(s) after {} frame(s)", self.frame_id)
        });
        self.display
    }

    /// JSON snapshot of camera, configuration and cache state for debugging.
    pub fn debug_state(&self) -> Value {
        let mut loaded: Vec<TileCoord> = self.grid.loaded_tiles().collect();
        loaded.sort();
        json!({
            "frame_id": self.frame_id,
            "display": self.display.name(),
            "viewport": self.display.viewport(),
            "camera": self.camera,
            "config": self.config,
            "visible": self.visible_range(),
            "tiles": self.grid.tile_count(),
            "loaded": loaded,
        })
    }
}

/// Average frame rate over a sliding window of frame times.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    samples: VecDeque<Duration>,
    capacity: usize,
    last: Option<Instant>,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new(60)
    }
}

impl FpsCounter {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
            last: None,
        }
    }

    /// Mark the end of a frame at `now`.
    pub fn tick(&mut self, now: Instant) {
        if let Some(last) = self.last {
            self.record(now.duration_since(last));
        }
        self.last = Some(now);
    }

    /// Record one frame time directly.
    pub fn record(&mut self, frame_time: Duration) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(frame_time);
    }

    /// Frames per second, or 0 before any frame time is known.
    pub fn fps(&self) -> f64 {
        let total: Duration = self.samples.iter().sum();
        if total.is_zero() {
            return 0.0;
        }
        self.samples.len() as f64 / total.as_secs_f64()
    }
}
