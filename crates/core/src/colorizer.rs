//! Cell value to color mappings.
//!
//! A colorizer is bound statically to each grid instance through a type
//! parameter. Colorizers must be pure and deterministic. Values outside a
//! colorizer's domain are programming errors and panic.

use crate::color::Color;

/// Maps a cell value to a display color.
pub trait Colorizer<T> {
    fn colorize(&self, value: T) -> Color;
}

/// Shades of red for values in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformRedColorizer;

impl Colorizer<f32> for UniformRedColorizer {
    fn colorize(&self, value: f32) -> Color {
        assert!(
            (0.0..=1.0).contains(&value),
            "UniformRedColorizer expects a value in [0, 1], got {value}"
        );
        Color::rgb((value * 255.9999) as u8, 0, 0)
    }
}

/// Seven saturated hues for non-negative integers.
///
/// Values cycle through the palette, and each full cycle darkens the
/// result so that neighbouring values stay distinguishable.
#[derive(Debug, Clone)]
pub struct PaletteColorizer {
    palette: [Color; 7],
}

impl PaletteColorizer {
    pub const DEFAULT_PALETTE: [Color; 7] = [
        Color::rgb(255, 0, 0),
        Color::rgb(0, 255, 0),
        Color::rgb(0, 0, 255),
        Color::rgb(255, 255, 0),
        Color::rgb(255, 0, 255),
        Color::rgb(0, 255, 255),
        Color::rgb(255, 255, 255),
    ];

    pub fn new(palette: [Color; 7]) -> Self {
        Self { palette }
    }
}

impl Default for PaletteColorizer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PALETTE)
    }
}

impl Colorizer<i32> for PaletteColorizer {
    fn colorize(&self, value: i32) -> Color {
        assert!(value >= 0, "PaletteColorizer expects a non-negative value, got {value}");
        let len = self.palette.len() as i32;
        let selection = self.palette[(value % len) as usize];
        let times = value / len + 1;
        selection.dimmed(times as f32)
    }
}

/// Linear blend between two colors for values in `[0, 1]`.
#[derive(Debug, Clone, Copy)]
pub struct GradientColorizer {
    pub low: Color,
    pub high: Color,
}

impl GradientColorizer {
    pub fn new(low: Color, high: Color) -> Self {
        Self { low, high }
    }
}

impl Default for GradientColorizer {
    fn default() -> Self {
        Self::new(Color::BLACK, Color::WHITE)
    }
}

impl Colorizer<f32> for GradientColorizer {
    fn colorize(&self, value: f32) -> Color {
        assert!(
            (0.0..=1.0).contains(&value),
            "GradientColorizer expects a value in [0, 1], got {value}"
        );
        self.low.lerp(self.high, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_red_range() {
        let c = UniformRedColorizer;
        assert_eq!(c.colorize(0.0), Color::rgb(0, 0, 0));
        assert_eq!(c.colorize(1.0), Color::rgb(255, 0, 0));
        assert_eq!(c.colorize(0.5).r, 127);
    }

    #[test]
    #[should_panic(expected = "[0, 1]")]
    fn test_uniform_red_rejects_out_of_domain() {
        UniformRedColorizer.colorize(1.5);
    }

    #[test]
    #[should_panic(expected = "[0, 1]")]
    fn test_uniform_red_rejects_nan() {
        UniformRedColorizer.colorize(f32::NAN);
    }

    #[test]
    fn test_palette_cycles_and_dims() {
        let c = PaletteColorizer::default();
        assert_eq!(c.colorize(0), Color::rgb(255, 0, 0));
        assert_eq!(c.colorize(6), Color::rgb(255, 255, 255));
        // Second cycle is halved
        assert_eq!(c.colorize(7), Color::rgb(127, 0, 0));
        assert_eq!(c.colorize(8), Color::rgb(0, 127, 0));
        // Third cycle is a third
        assert_eq!(c.colorize(16), Color::rgb(0, 0, 85));
    }

    #[test]
    #[should_panic(expected = "non-negative")]
    fn test_palette_rejects_negative() {
        PaletteColorizer::default().colorize(-1);
    }

    #[test]
    fn test_gradient_endpoints() {
        let g = GradientColorizer::new(Color::rgb(0, 0, 0), Color::rgb(0, 200, 0));
        assert_eq!(g.colorize(0.0), Color::rgb(0, 0, 0));
        assert_eq!(g.colorize(1.0), Color::rgb(0, 200, 0));
        assert_eq!(g.colorize(0.5), Color::rgb(0, 100, 0));
    }
}
