//! PNG screenshots of the presented frame.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use tile_core::types::Frame;

/// Encode `frame` as an RGBA8 PNG at `path`.
pub fn write_png(frame: &Frame, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::create(path)?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), frame.width, frame.height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&frame.to_rgba())?;
    Ok(())
}

/// Timestamped file name, e.g. `stripes_20240101_120000.png`.
pub fn screenshot_name(demo: &str, now: chrono::DateTime<chrono::Local>) -> String {
    format!("{}_{}.png", demo, now.format("%Y%m%d_%H%M%S"))
}

/// Save `frame` under `dir/screenshots/`, creating the directory if needed.
pub fn save_screenshot(frame: &Frame, dir: &Path, demo: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let dir = dir.join("screenshots");
    fs::create_dir_all(&dir)?;
    let path = dir.join(screenshot_name(demo, chrono::Local::now()));
    write_png(frame, &path)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_screenshot_name() {
        let when = chrono::Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(screenshot_name("fade", when), "fade_20240309_070501.png");
    }

    #[test]
    fn test_save_screenshot_writes_png() {
        let dir = std::env::temp_dir().join("gridview_test_screenshot");
        let mut frame = Frame::new(3, 2);
        frame.pixels.fill(0xFFFF0000);

        let path = save_screenshot(&frame, &dir, "stripes").unwrap();
        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");

        let decoder = png::Decoder::new(File::open(&path).unwrap());
        let reader = decoder.read_info().unwrap();
        assert_eq!((reader.info().width, reader.info().height), (3, 2));

        fs::remove_dir_all(&dir).unwrap();
    }
}
