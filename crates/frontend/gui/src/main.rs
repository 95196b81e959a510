use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};
use std::env;
use std::error::Error;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tile_core::demo::{Demo, DemoKind};
use tile_core::frame::FpsCounter;
use tile_core::logging::{LogConfig, LogLevel};
use tile_gui::input::{CameraInput, MouseState};
use tile_gui::overlay::StatsOverlay;
use tile_gui::screenshot;
use tile_gui::settings::Settings;

const USAGE: &str = "usage: gridview [stripes|fade|fade-dense] [--log-level LEVEL] [--log-file PATH]";

#[derive(Debug)]
struct Args {
    demo: DemoKind,
    log_level: Option<LogLevel>,
    log_file: Option<PathBuf>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut parsed = Args {
        demo: DemoKind::default(),
        log_level: None,
        log_file: None,
    };
    let mut demo_seen = false;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--log-level" => {
                let value = args.next().ok_or("--log-level needs a value")?;
                let level = LogLevel::from_str(&value).ok_or_else(|| format!("unknown log level '{value}'"))?;
                parsed.log_level = Some(level);
            }
            "--log-file" => {
                let value = args.next().ok_or("--log-file needs a path")?;
                parsed.log_file = Some(PathBuf::from(value));
            }
            "-h" | "--help" => return Err(USAGE.to_string()),
            other if !demo_seen && !other.starts_with('-') => {
                parsed.demo = other.parse()?;
                demo_seen = true;
            }
            other => return Err(format!("unexpected argument '{other}'\n{USAGE}")),
        }
    }
    Ok(parsed)
}

fn configure_core_logging(args: &Args) -> std::io::Result<()> {
    let config = LogConfig::global();
    if let Some(level) = args.log_level {
        config.set_global_level(level);
    }
    if let Some(path) = &args.log_file {
        config.set_log_file(path.clone())?;
    }
    Ok(())
}

fn mouse_state(window: &Window) -> MouseState {
    MouseState {
        position: window.get_mouse_pos(MouseMode::Discard),
        drag: window.get_mouse_down(MouseButton::Right),
        // Wheel magnitudes differ per platform; count notches only
        wheel: window
            .get_scroll_wheel()
            .map(|(_, y)| if y == 0.0 { 0.0 } else { y.signum() })
            .unwrap_or(0.0),
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    configure_core_logging(&args)?;

    let mut settings = Settings::load();
    let (mut width, mut height) = (settings.window.width.max(1), settings.window.height.max(1));

    let mut window = Window::new(
        &settings.window.title,
        width,
        height,
        WindowOptions {
            resize: true,
            ..WindowOptions::default()
        },
    )?;

    let mut demo = Demo::new(args.demo, &settings.frame, &settings.demo, width as u32, height as u32)?;
    log::info!("Running '{}' demo at {}x{}", demo.kind(), width, height);

    let mut input = CameraInput::new();
    let mut overlay = StatsOverlay::new(demo.kind().name());
    let mut fps = FpsCounter::default();
    let mut buffer: Vec<u32> = Vec::with_capacity(width * height);
    let frame_budget = match settings.window.target_fps {
        0 => None,
        target => Some(Duration::from_secs_f64(1.0 / f64::from(target))),
    };
    let screenshot_dir = Settings::config_path()
        .parent()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    while window.is_open() && !window.is_key_down(Key::Escape) {
        let frame_start = Instant::now();

        if window.is_key_pressed(Key::F1, KeyRepeat::No) {
            settings.show_fps = !settings.show_fps;
        }

        if window.is_key_pressed(Key::F12, KeyRepeat::No) {
            match screenshot::save_screenshot(demo.canvas().frame(), &screenshot_dir, demo.kind().name()) {
                Ok(path) => log::info!("Saved screenshot to {}", path.display()),
                Err(e) => log::warn!("Failed to save screenshot: {}", e),
            }
        }

        input.apply(demo.camera_mut(), mouse_state(&window));

        // Follow window resizes and remember the size for next launch
        let (new_width, new_height) = window.get_size();
        if (new_width, new_height) != (width, height) && new_width > 0 && new_height > 0 {
            width = new_width;
            height = new_height;
            demo.resize(width as u32, height as u32);
            if settings.update_window_size(width, height) {
                if let Err(e) = settings.save() {
                    log::warn!("Failed to save window size: {}", e);
                }
            }
        }

        let stats = demo.frame()?;

        buffer.clear();
        buffer.extend_from_slice(&demo.canvas().frame().pixels);
        if settings.show_fps {
            overlay.fps = fps.fps();
            overlay.zoom = demo.camera().zoom;
            overlay.stats = stats;
            overlay.render(&mut buffer, width, height);
        }

        window.update_with_buffer(&buffer, width, height)?;

        if let Some(budget) = frame_budget {
            let elapsed = frame_start.elapsed();
            if elapsed < budget {
                std::thread::sleep(budget - elapsed);
            }
        }
        fps.tick(Instant::now());
    }

    let canvas = demo.shutdown();
    log::info!(
        "Exiting: {} texture(s) created, {} upload(s)",
        canvas.stats().created,
        canvas.stats().updated
    );
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
    };

    if let Err(e) = run(args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, String> {
        parse_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_defaults() {
        let args = parse(&[]).unwrap();
        assert_eq!(args.demo, DemoKind::Stripes);
        assert!(args.log_level.is_none());
        assert!(args.log_file.is_none());
    }

    #[test]
    fn test_parse_demo_and_logging() {
        let args = parse(&["fade-dense", "--log-level", "debug", "--log-file", "grid.log"]).unwrap();
        assert_eq!(args.demo, DemoKind::FadeDense);
        assert_eq!(args.log_level, Some(LogLevel::Debug));
        assert_eq!(args.log_file, Some(PathBuf::from("grid.log")));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse(&["--log-level"]).is_err());
        assert!(parse(&["--log-level", "chatty"]).is_err());
        assert!(parse(&["life"]).is_err());
        assert!(parse(&["fade", "stripes"]).is_err());
    }
}
