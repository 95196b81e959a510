//! Core logging driven the way `gridview --log-level/--log-file` sets it up.

use std::fs;
use std::time::{Duration, Instant};

use tile_core::demo::{Demo, DemoKind, DemoSettings};
use tile_core::frame::FrameConfig;
use tile_core::logging::{LogCategory, LogConfig, LogLevel};

fn wait_for(path: &std::path::Path, needle: &str) -> String {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        let contents = fs::read_to_string(path).unwrap_or_default();
        if contents.contains(needle) || Instant::now() > deadline {
            return contents;
        }
        std::thread::sleep(Duration::from_millis(20));
    }
}

#[test]
fn test_demo_logs_to_file() {
    let dir = std::env::temp_dir().join("gridview_test_logging");
    fs::create_dir_all(&dir).unwrap();
    let log_path = dir.join("grid.log");
    let _ = fs::remove_file(&log_path);

    let config = LogConfig::global();
    config.reset();
    config.set_global_level(LogLevel::Info);
    config.set_level(LogCategory::Cache, LogLevel::Trace);
    config.set_log_file(log_path.clone()).unwrap();

    let settings = DemoSettings {
        stripes_extent: 16,
        ..DemoSettings::default()
    };
    let mut demo = Demo::new(DemoKind::Stripes, &FrameConfig::default(), &settings, 32, 32).unwrap();
    demo.frame().unwrap();
    demo.frame().unwrap();
    demo.shutdown();

    let contents = wait_for(&log_path, "[Frame]");
    config.clear_log_file();
    config.reset();

    // Trace-level resource creation is enabled for the cache only
    assert!(contents.contains("[Cache] Created resource for tile"), "{contents}");
    // Frame messages pass at the global Info level; Debug ones do not
    assert!(contents.contains("[Frame] released 4 tile resource(s)"), "{contents}");
    assert!(!contents.contains("visible tiles"), "{contents}");

    fs::remove_dir_all(&dir).unwrap();
}
