//! Per-frame tick procedures that mutate grid cells.

use crate::coords::mod_floor;
use crate::grid::CellGrid;

/// Mutates cells once per frame, after the frame has been drawn.
pub trait Simulation<T> {
    fn name(&self) -> &str;

    fn tick<G: CellGrid<T>>(&mut self, grid: &mut G);
}

/// Diagonal bands of the values `0..10` over a square centered on the
/// origin, optionally scrolling by one band per tick.
#[derive(Debug, Clone)]
pub struct Stripes {
    pub extent: i32,
    pub scrolling: bool,
    phase: i32,
}

impl Stripes {
    pub const PERIOD: i32 = 10;

    /// Covers `[-extent, extent)` on both axes.
    pub fn new(extent: i32) -> Self {
        Self {
            extent,
            scrolling: false,
            phase: 0,
        }
    }

    pub fn scrolling(mut self) -> Self {
        self.scrolling = true;
        self
    }
}

impl Simulation<i32> for Stripes {
    fn name(&self) -> &str {
        "stripes"
    }

    fn tick<G: CellGrid<i32>>(&mut self, grid: &mut G) {
        for x in -self.extent..self.extent {
            for y in -self.extent..self.extent {
                grid.set(x, y, mod_floor(x + y + self.phase, Self::PERIOD));
            }
        }
        if self.scrolling {
            self.phase = (self.phase + 1) % Self::PERIOD;
        }
    }
}

/// Fills a rectangle with one value that ramps from 0 to 1 and wraps.
#[derive(Debug, Clone)]
pub struct Fade {
    pub width: i32,
    pub height: i32,
    pub increment: f32,
    t: f32,
}

impl Fade {
    pub fn new(width: i32, height: i32, increment: f32) -> Self {
        Self {
            width,
            height,
            increment,
            t: 0.0,
        }
    }

    /// Value written by the most recent tick.
    pub fn value(&self) -> f32 {
        self.t
    }
}

impl Simulation<f32> for Fade {
    fn name(&self) -> &str {
        "fade"
    }

    fn tick<G: CellGrid<f32>>(&mut self, grid: &mut G) {
        self.t = (self.t + self.increment).rem_euclid(1.0);
        for x in 0..self.width {
            for y in 0..self.height {
                grid.set(x, y, self.t);
            }
        }
    }
}
