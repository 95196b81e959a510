//! FPS and cache statistics overlay drawn straight into the window buffer.

use tile_core::frame::FrameStats;

const GLYPH: usize = 8;
const PADDING: usize = 6;
const LINE_SPACING: usize = GLYPH + 4;

const BACKGROUND: u32 = 0xFF1E1E2E;
const TEXT: u32 = 0xFFF0F0F0;
const ACCENT: u32 = 0xFF8EC07C;

/// 8x8 glyphs, one byte per row. Lowercase renders as uppercase.
fn glyph(c: char) -> [u8; 8] {
    match c.to_ascii_uppercase() {
        '(' => [0x0C, 0x18, 0x30, 0x30, 0x30, 0x18, 0x0C, 0x00],
        ')' => [0x30, 0x18, 0x0C, 0x0C, 0x0C, 0x18, 0x30, 0x00],
        ',' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x18, 0x18, 0x30],
        '-' => [0x00, 0x00, 0x00, 0x7E, 0x00, 0x00, 0x00, 0x00],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x18, 0x18, 0x00],
        '/' => [0x00, 0x03, 0x06, 0x0C, 0x18, 0x30, 0x60, 0x00],
        ':' => [0x00, 0x18, 0x18, 0x00, 0x00, 0x18, 0x18, 0x00],
        '0' => [0x3C, 0x66, 0x6E, 0x7E, 0x76, 0x66, 0x3C, 0x00],
        '1' => [0x18, 0x38, 0x18, 0x18, 0x18, 0x18, 0x7E, 0x00],
        '2' => [0x3C, 0x66, 0x06, 0x0C, 0x18, 0x30, 0x7E, 0x00],
        '3' => [0x3C, 0x66, 0x06, 0x1C, 0x06, 0x66, 0x3C, 0x00],
        '4' => [0x0C, 0x1C, 0x3C, 0x6C, 0x7E, 0x0C, 0x0C, 0x00],
        '5' => [0x7E, 0x60, 0x7C, 0x06, 0x06, 0x66, 0x3C, 0x00],
        '6' => [0x1C, 0x30, 0x60, 0x7C, 0x66, 0x66, 0x3C, 0x00],
        '7' => [0x7E, 0x06, 0x0C, 0x18, 0x30, 0x30, 0x30, 0x00],
        '8' => [0x3C, 0x66, 0x66, 0x3C, 0x66, 0x66, 0x3C, 0x00],
        '9' => [0x3C, 0x66, 0x66, 0x3E, 0x06, 0x0C, 0x38, 0x00],
        'A' => [0x3C, 0x66, 0x66, 0x7E, 0x66, 0x66, 0x66, 0x00],
        'B' => [0x7C, 0x66, 0x66, 0x7C, 0x66, 0x66, 0x7C, 0x00],
        'C' => [0x3C, 0x66, 0x60, 0x60, 0x60, 0x66, 0x3C, 0x00],
        'D' => [0x78, 0x6C, 0x66, 0x66, 0x66, 0x6C, 0x78, 0x00],
        'E' => [0x7E, 0x60, 0x60, 0x7C, 0x60, 0x60, 0x7E, 0x00],
        'F' => [0x7E, 0x60, 0x60, 0x7C, 0x60, 0x60, 0x60, 0x00],
        'G' => [0x3C, 0x66, 0x60, 0x6E, 0x66, 0x66, 0x3C, 0x00],
        'H' => [0x66, 0x66, 0x66, 0x7E, 0x66, 0x66, 0x66, 0x00],
        'I' => [0x7E, 0x18, 0x18, 0x18, 0x18, 0x18, 0x7E, 0x00],
        'J' => [0x1E, 0x0C, 0x0C, 0x0C, 0x0C, 0x6C, 0x38, 0x00],
        'K' => [0x66, 0x6C, 0x78, 0x70, 0x78, 0x6C, 0x66, 0x00],
        'L' => [0x60, 0x60, 0x60, 0x60, 0x60, 0x60, 0x7E, 0x00],
        'M' => [0x63, 0x77, 0x7F, 0x6B, 0x63, 0x63, 0x63, 0x00],
        'N' => [0x66, 0x76, 0x7E, 0x6E, 0x66, 0x66, 0x66, 0x00],
        'O' => [0x3C, 0x66, 0x66, 0x66, 0x66, 0x66, 0x3C, 0x00],
        'P' => [0x7C, 0x66, 0x66, 0x7C, 0x60, 0x60, 0x60, 0x00],
        'Q' => [0x3C, 0x66, 0x66, 0x66, 0x66, 0x3C, 0x0E, 0x00],
        'R' => [0x7C, 0x66, 0x66, 0x7C, 0x6C, 0x66, 0x66, 0x00],
        'S' => [0x3C, 0x66, 0x60, 0x3C, 0x06, 0x66, 0x3C, 0x00],
        'T' => [0x7E, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x00],
        'U' => [0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x3C, 0x00],
        'V' => [0x66, 0x66, 0x66, 0x66, 0x66, 0x3C, 0x18, 0x00],
        'W' => [0x63, 0x63, 0x63, 0x6B, 0x7F, 0x77, 0x63, 0x00],
        'X' => [0x66, 0x66, 0x3C, 0x18, 0x3C, 0x66, 0x66, 0x00],
        'Y' => [0x66, 0x66, 0x66, 0x3C, 0x18, 0x18, 0x18, 0x00],
        'Z' => [0x7E, 0x06, 0x0C, 0x18, 0x30, 0x60, 0x7E, 0x00],
        _ => [0; 8],
    }
}

/// Draw `text` with its top-left corner at `(x, y)`, clipped to the buffer.
pub fn draw_text(buffer: &mut [u32], width: usize, height: usize, text: &str, x: usize, y: usize, color: u32) {
    for (i, c) in text.chars().enumerate() {
        let left = x + i * GLYPH;
        if left >= width {
            break;
        }
        for (row, bits) in glyph(c).iter().enumerate() {
            let py = y + row;
            if py >= height {
                break;
            }
            for col in (0..GLYPH).filter(|col| bits & (0x80 >> col) != 0) {
                let px = left + col;
                if px < width {
                    buffer[py * width + px] = color;
                }
            }
        }
    }
}

fn fill_rect(buffer: &mut [u32], width: usize, height: usize, w: usize, h: usize, color: u32) {
    if width == 0 {
        return;
    }
    for row in buffer.chunks_mut(width).take(h.min(height)) {
        row[..w.min(width)].fill(color);
    }
}

/// Top-left panel with frame rate, zoom and tile cache counters.
#[derive(Debug, Default)]
pub struct StatsOverlay {
    pub fps: f64,
    pub demo: String,
    pub zoom: f32,
    pub stats: FrameStats,
}

impl StatsOverlay {
    pub fn new(demo: &str) -> Self {
        Self {
            demo: demo.to_string(),
            zoom: 1.0,
            ..Self::default()
        }
    }

    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("FPS: {:.0}", self.fps),
            format!("{}  zoom {:.1}", self.demo, self.zoom),
            format!(
                "tiles {}  loaded {}  visible {}",
                self.stats.tiles, self.stats.resident, self.stats.visible
            ),
            format!(
                "new {}  upload {}  evict {}",
                self.stats.created, self.stats.updated, self.stats.evicted
            ),
        ]
    }

    /// Draw the panel. Returns its height in pixels.
    pub fn render(&self, buffer: &mut [u32], width: usize, height: usize) -> usize {
        let lines = self.lines();
        let longest = lines.iter().map(String::len).max().unwrap_or(0);
        let panel_w = longest * GLYPH + 2 * PADDING;
        let panel_h = lines.len() * LINE_SPACING + 2 * PADDING - (LINE_SPACING - GLYPH);

        fill_rect(buffer, width, height, panel_w, panel_h, BACKGROUND);
        for (i, line) in lines.iter().enumerate() {
            let color = if i == 0 { ACCENT } else { TEXT };
            draw_text(buffer, width, height, line, PADDING, PADDING + i * LINE_SPACING, color);
        }
        panel_h.min(height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_text_sets_glyph_pixels() {
        let mut buffer = vec![0u32; 16 * 8];
        draw_text(&mut buffer, 16, 8, "-", 0, 0, 0xFFFFFFFF);
        // '-' is a single bar on row 3, columns 1..7
        for x in 0..8 {
            let expected = if (1..7).contains(&x) { 0xFFFFFFFF } else { 0 };
            assert_eq!(buffer[3 * 16 + x], expected);
        }
        assert!(buffer[..3 * 16].iter().all(|&p| p == 0));
    }

    #[test]
    fn test_draw_text_clips() {
        let mut buffer = vec![0u32; 10 * 4];
        draw_text(&mut buffer, 10, 4, "MMMM", 6, 2, 1);
        assert!(buffer.iter().any(|&p| p == 1));
    }

    #[test]
    fn test_lowercase_uses_uppercase_glyphs() {
        assert_eq!(glyph('f'), glyph('F'));
        assert_eq!(glyph('?'), [0; 8]);
    }

    #[test]
    fn test_every_letter_and_digit_has_a_glyph() {
        for c in ('A'..='Z').chain('0'..='9') {
            assert_ne!(glyph(c), [0; 8], "no glyph for {c}");
        }
    }

    #[test]
    fn test_overlay_lines() {
        let mut overlay = StatsOverlay::new("stripes");
        overlay.fps = 59.6;
        overlay.zoom = 2.0;
        overlay.stats.tiles = 256;
        overlay.stats.resident = 12;
        let lines = overlay.lines();
        assert_eq!(lines[0], "FPS: 60");
        assert_eq!(lines[1], "stripes  zoom 2.0");
        assert!(lines[2].starts_with("tiles 256  loaded 12"));
    }

    #[test]
    fn test_overlay_render_paints_background() {
        let overlay = StatsOverlay::new("fade");
        let mut buffer = vec![0u32; 400 * 100];
        let h = overlay.render(&mut buffer, 400, 100);
        assert!(h > 0);
        assert_eq!(buffer[0], BACKGROUND);
        assert_eq!(buffer[399], 0);
    }

    #[test]
    fn test_overlay_on_tiny_buffer() {
        let overlay = StatsOverlay::new("fade");
        let mut buffer = vec![0u32; 4 * 4];
        assert_eq!(overlay.render(&mut buffer, 4, 4), 4);
    }
}
