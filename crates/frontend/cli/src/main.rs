use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tile_core::camera::Vec2;
use tile_core::demo::{Demo, DemoKind, DemoSettings};
use tile_core::frame::{EvictionPolicy, FrameConfig, FrameStats};
use tile_core::logging::{LogConfig, LogLevel};
use tile_core::types::Frame;

/// Run a grid demo headlessly against the software display.
#[derive(Parser, Debug)]
#[command(name = "gridrun")]
struct Args {
    /// Demo to run: stripes, fade or fade-dense
    #[arg(long, default_value = "stripes")]
    demo: DemoKind,

    /// Number of frames to run
    #[arg(long, default_value_t = 10)]
    frames: u32,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 640)]
    width: u32,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 480)]
    height: u32,

    /// Tile edge length in cells
    #[arg(long, default_value_t = 16)]
    tile_size: i32,

    /// Extra tiles loaded around the viewport
    #[arg(long, default_value_t = 1)]
    margin: i32,

    /// Keep resources of tiles that scroll offscreen
    #[arg(long, default_value_t = false)]
    retain: bool,

    /// Wheel notches of zoom applied at the viewport center before the first frame
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    zoom: f32,

    /// Horizontal pan in screen pixels before the first frame
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pan_x: f32,

    /// Vertical pan in screen pixels before the first frame
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pan_y: f32,

    /// Write per-frame statistics to this file as JSON
    #[arg(long)]
    stats: Option<PathBuf>,

    /// Write the last frame to this file as PNG
    #[arg(long)]
    screenshot: Option<PathBuf>,

    /// Core log level: off, error, warn, info, debug or trace
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Send core log output to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Suppress the per-frame summary
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    demo: DemoKind,
    width: u32,
    height: u32,
    config: &'a FrameConfig,
    frames: &'a [FrameStats],
    state: serde_json::Value,
}

fn frame_config(args: &Args) -> FrameConfig {
    FrameConfig {
        tile_size: args.tile_size,
        margin: args.margin,
        eviction: if args.retain {
            EvictionPolicy::Retain
        } else {
            EvictionPolicy::UnloadOffscreen
        },
        ..FrameConfig::default()
    }
}

fn demo_settings(args: &Args) -> DemoSettings {
    DemoSettings {
        fade_width: args.width,
        fade_height: args.height,
        ..DemoSettings::default()
    }
}

fn write_png(frame: &Frame, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), frame.width, frame.height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&frame.to_rgba())?;
    Ok(())
}

fn run(args: &Args) -> Result<Vec<FrameStats>> {
    let config = frame_config(args);
    let mut demo = Demo::new(args.demo, &config, &demo_settings(args), args.width, args.height)?;

    let camera = demo.camera_mut();
    camera.pan(Vec2::new(args.pan_x, args.pan_y));
    camera.zoom_at(
        args.zoom,
        Vec2::new(args.width as f32 / 2.0, args.height as f32 / 2.0),
    );

    let mut history = Vec::with_capacity(args.frames as usize);
    for _ in 0..args.frames {
        let stats = demo.frame()?;
        if !args.quiet {
            println!(
                "Frame {}: visible {} created {} updated {} drawn {} evicted {} resident {}",
                stats.frame_id,
                stats.visible,
                stats.created,
                stats.updated,
                stats.drawn,
                stats.evicted,
                stats.resident
            );
        }
        history.push(stats);
    }

    if let Some(path) = &args.screenshot {
        write_png(demo.canvas().frame(), path)?;
        log::info!("Wrote screenshot to {}", path.display());
    }

    if let Some(path) = &args.stats {
        let report = Report {
            demo: args.demo,
            width: args.width,
            height: args.height,
            config: &config,
            frames: &history,
            state: demo.debug_state(),
        };
        let mut f = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        write!(f, "{}", serde_json::to_string_pretty(&report)?)?;
    }

    demo.shutdown();
    Ok(history)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let level = LogLevel::from_str(&args.log_level)
        .with_context(|| format!("unknown log level '{}'", args.log_level))?;
    let logging = LogConfig::global();
    logging.set_global_level(level);
    if let Some(path) = &args.log_file {
        logging
            .set_log_file(path.clone())
            .with_context(|| format!("opening log file {}", path.display()))?;
    }

    let history = run(&args)?;
    log::info!("Ran {} frame(s) of '{}'", history.len(), args.demo);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["gridrun", "--quiet"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn test_defaults() {
        let a = args(&[]);
        assert_eq!(a.demo, DemoKind::Stripes);
        assert_eq!(a.frames, 10);
        let config = frame_config(&a);
        assert_eq!(config.eviction, EvictionPolicy::UnloadOffscreen);
        assert_eq!(config.tile_size, 16);
    }

    #[test]
    fn test_retain_and_negative_pan() {
        let a = args(&["--demo", "fade-dense", "--retain", "--pan-x", "-40", "--zoom", "-1"]);
        assert_eq!(a.demo, DemoKind::FadeDense);
        assert_eq!(a.pan_x, -40.0);
        assert_eq!(a.zoom, -1.0);
        assert_eq!(frame_config(&a).eviction, EvictionPolicy::Retain);
    }

    #[test]
    fn test_run_stripes() {
        let a = args(&["--frames", "3", "--width", "64", "--height", "64"]);
        let history = run(&a).unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].drawn, 0);
        assert!(history[1].created > 0);
        assert_eq!(history[2].created, 0);
    }

    #[test]
    fn test_run_writes_outputs() {
        let dir = std::env::temp_dir().join("gridrun_test_outputs");
        std::fs::create_dir_all(&dir).unwrap();
        let stats = dir.join("stats.json");
        let shot = dir.join("frame.png");

        let a = Args::parse_from([
            "gridrun",
            "--quiet",
            "--demo",
            "fade",
            "--frames",
            "2",
            "--width",
            "32",
            "--height",
            "32",
            "--stats",
            stats.to_str().unwrap(),
            "--screenshot",
            shot.to_str().unwrap(),
        ]);
        run(&a).unwrap();

        let report: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&stats).unwrap()).unwrap();
        assert_eq!(report["demo"], "fade");
        assert_eq!(report["frames"].as_array().unwrap().len(), 2);
        assert_eq!(report["frames"][1]["created"], 4);
        assert_eq!(&std::fs::read(&shot).unwrap()[1..4], b"PNG");

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
