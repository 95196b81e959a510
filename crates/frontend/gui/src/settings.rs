use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tile_core::demo::DemoSettings;
use tile_core::frame::FrameConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub width: usize,
    pub height: usize,
    /// Frame cap; 0 runs uncapped.
    pub target_fps: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Grid View".to_string(),
            width: 1500,
            height: 800,
            target_fps: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub window: WindowSettings,
    #[serde(default)]
    pub frame: FrameConfig,
    #[serde(default)]
    pub demo: DemoSettings,
    #[serde(default = "default_show_fps")]
    pub show_fps: bool,
}

fn default_show_fps() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window: WindowSettings::default(),
            frame: FrameConfig::default(),
            demo: DemoSettings::default(),
            show_fps: true,
        }
    }
}

impl Settings {
    /// `config.json` next to the executable.
    pub fn config_path() -> PathBuf {
        let mut path = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."));
        path.push("config.json");
        path
    }

    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Read settings from `path`, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    log::warn!("Failed to parse {}: {}. Using defaults.", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::debug!("No settings at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Record a new window size. Returns true when it differs from the
    /// stored one.
    pub fn update_window_size(&mut self, width: usize, height: usize) -> bool {
        if (width, height) == (self.window.width, self.window.height) {
            return false;
        }
        self.window.width = width;
        self.window.height = height;
        true
    }
}
