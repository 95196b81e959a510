//! Ready-made demo scenes rendered onto a [`SoftwareCanvas`].
//!
//! Both frontends run the same scenes: the window presents the canvas
//! frame, the headless runner reports statistics and screenshots.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::camera::Camera2D;
use crate::color::Color;
use crate::colorizer::{PaletteColorizer, UniformRedColorizer};
use crate::display::{DisplayProvider, SoftwareCanvas, TextureHandle};
use crate::error::{DisplayError, GridError};
use crate::frame::{FrameConfig, FrameController, FrameStats};
use crate::grid::DenseGrid;
use crate::image::SyncOutcome;
use crate::simulation::{Fade, Simulation, Stripes};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DemoKind {
    /// Palette-colored diagonal bands on a sparse grid.
    #[default]
    Stripes,
    /// Red fade on a sparse grid; every visible tile re-uploads each frame.
    Fade,
    /// Red fade on one full-size image.
    FadeDense,
}

impl DemoKind {
    pub const ALL: [DemoKind; 3] = [DemoKind::Stripes, DemoKind::Fade, DemoKind::FadeDense];

    pub fn name(self) -> &'static str {
        match self {
            DemoKind::Stripes => "stripes",
            DemoKind::Fade => "fade",
            DemoKind::FadeDense => "fade-dense",
        }
    }
}

impl fmt::Display for DemoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DemoKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DemoKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown demo '{s}' (expected stripes, fade or fade-dense)"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    /// Stripes cover `[-extent, extent)` on both axes.
    pub stripes_extent: i32,
    pub stripes_scrolling: bool,
    pub fade_width: u32,
    pub fade_height: u32,
    pub fade_increment: f32,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            stripes_extent: 128,
            stripes_scrolling: false,
            fade_width: 1500,
            fade_height: 800,
            fade_increment: 0.001,
        }
    }
}

struct DenseScene {
    grid: DenseGrid<f32, UniformRedColorizer, TextureHandle>,
    canvas: SoftwareCanvas,
    camera: Camera2D,
    clear: Color,
    frame_id: u64,
}

impl DenseScene {
    fn run_frame(&mut self, fade: &mut Fade) -> Result<FrameStats, DisplayError> {
        let mut stats = FrameStats {
            frame_id: self.frame_id,
            visible: 1,
            tiles: 1,
            ..FrameStats::default()
        };
        match self.grid.sync(&mut self.canvas)? {
            SyncOutcome::Created => stats.created = 1,
            SyncOutcome::Updated => stats.updated = 1,
            SyncOutcome::Missing | SyncOutcome::Unchanged => {}
        }

        self.canvas.begin_frame(self.clear);
        self.canvas.begin_camera(&self.camera);
        if self.grid.draw(&mut self.canvas, 0, 0) {
            stats.drawn = 1;
        }
        self.canvas.end_camera();
        self.canvas.end_frame();

        fade.tick(&mut self.grid);
        stats.resident = usize::from(self.grid.image().is_loaded());
        self.frame_id += 1;
        Ok(stats)
    }
}

enum Scene {
    Stripes(FrameController<i32, PaletteColorizer, SoftwareCanvas>, Stripes),
    Fade(FrameController<f32, UniformRedColorizer, SoftwareCanvas>, Fade),
    FadeDense(Box<DenseScene>, Fade),
}

/// A demo scene plus the canvas it renders into.
pub struct Demo {
    kind: DemoKind,
    scene: Scene,
}

impl Demo {
    pub fn new(
        kind: DemoKind,
        config: &FrameConfig,
        settings: &DemoSettings,
        width: u32,
        height: u32,
    ) -> Result<Self, GridError> {
        let canvas = SoftwareCanvas::new(width, height);
        let fade = Fade::new(
            settings.fade_width as i32,
            settings.fade_height as i32,
            settings.fade_increment,
        );
        let scene = match kind {
            DemoKind::Stripes => {
                let mut stripes = Stripes::new(settings.stripes_extent);
                stripes.scrolling = settings.stripes_scrolling;
                Scene::Stripes(
                    FrameController::new(config.clone(), PaletteColorizer::default(), canvas)?,
                    stripes,
                )
            }
            DemoKind::Fade => Scene::Fade(
                FrameController::new(config.clone(), UniformRedColorizer, canvas)?,
                fade,
            ),
            DemoKind::FadeDense => {
                let grid = DenseGrid::new(settings.fade_width, settings.fade_height, UniformRedColorizer)?;
                let dense = DenseScene {
                    grid,
                    canvas,
                    camera: Camera2D::with_increment(config.zoom_increment)?,
                    clear: config.clear_color,
                    frame_id: 0,
                };
                Scene::FadeDense(Box::new(dense), fade)
            }
        };
        Ok(Self { kind, scene })
    }

    pub fn kind(&self) -> DemoKind {
        self.kind
    }

    /// Render one frame, then advance the simulation.
    pub fn frame(&mut self) -> Result<FrameStats, DisplayError> {
        match &mut self.scene {
            Scene::Stripes(controller, stripes) => controller.step(stripes),
            Scene::Fade(controller, fade) => controller.step(fade),
            Scene::FadeDense(dense, fade) => dense.run_frame(fade),
        }
    }

    pub fn canvas(&self) -> &SoftwareCanvas {
        match &self.scene {
            Scene::Stripes(controller, _) => controller.display(),
            Scene::Fade(controller, _) => controller.display(),
            Scene::FadeDense(dense, _) => &dense.canvas,
        }
    }

    fn canvas_mut(&mut self) -> &mut SoftwareCanvas {
        match &mut self.scene {
            Scene::Stripes(controller, _) => controller.display_mut(),
            Scene::Fade(controller, _) => controller.display_mut(),
            Scene::FadeDense(dense, _) => &mut dense.canvas,
        }
    }

    pub fn camera(&self) -> &Camera2D {
        match &self.scene {
            Scene::Stripes(controller, _) => controller.camera(),
            Scene::Fade(controller, _) => controller.camera(),
            Scene::FadeDense(dense, _) => &dense.camera,
        }
    }

    pub fn camera_mut(&mut self) -> &mut Camera2D {
        match &mut self.scene {
            Scene::Stripes(controller, _) => controller.camera_mut(),
            Scene::Fade(controller, _) => controller.camera_mut(),
            Scene::FadeDense(dense, _) => &mut dense.camera,
        }
    }

    /// Resize the canvas to a new window size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.canvas_mut().resize(width, height);
    }

    /// Release every display resource held by the scene.
    pub fn shutdown(self) -> SoftwareCanvas {
        match self.scene {
            Scene::Stripes(controller, _) => controller.shutdown(),
            Scene::Fade(controller, _) => controller.shutdown(),
            Scene::FadeDense(mut dense, _) => {
                dense.grid.release(&mut dense.canvas);
                dense.canvas
            }
        }
    }

    pub fn debug_state(&self) -> Value {
        match &self.scene {
            Scene::Stripes(controller, _) => controller.debug_state(),
            Scene::Fade(controller, _) => controller.debug_state(),
            Scene::FadeDense(dense, fade) => json!({
                "frame_id": dense.frame_id,
                "display": dense.canvas.name(),
                "viewport": dense.canvas.viewport(),
                "camera": dense.camera,
                "size": [dense.grid.width(), dense.grid.height()],
                "value": fade.value(),
                "loaded": dense.grid.image().is_loaded(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_settings() -> DemoSettings {
        DemoSettings {
            stripes_extent: 16,
            fade_width: 8,
            fade_height: 8,
            fade_increment: 0.5,
            ..DemoSettings::default()
        }
    }

    #[test]
    fn test_demo_kind_parsing() {
        assert_eq!("stripes".parse::<DemoKind>(), Ok(DemoKind::Stripes));
        assert_eq!("FADE-DENSE".parse::<DemoKind>(), Ok(DemoKind::FadeDense));
        assert!("life".parse::<DemoKind>().is_err());
        assert_eq!(DemoKind::FadeDense.to_string(), "fade-dense");
    }

    #[test]
    fn test_stripes_demo_draws_on_second_frame() {
        let mut demo = Demo::new(DemoKind::Stripes, &FrameConfig::default(), &small_settings(), 32, 32).unwrap();
        assert_eq!(demo.frame().unwrap().drawn, 0);
        let stats = demo.frame().unwrap();
        assert_eq!(stats.drawn, 4);
        // (0, 0) holds 0, which the palette renders red
        assert_eq!(demo.canvas().frame().pixels[0], Color::rgb(255, 0, 0).to_argb());
        // Outside the stripes the clear color shows
        assert_eq!(demo.canvas().frame().pixels[31 * 32 + 31], Color::WHITE.to_argb());
    }

    #[test]
    fn test_dense_fade_uploads_each_frame() {
        let mut demo = Demo::new(DemoKind::FadeDense, &FrameConfig::default(), &small_settings(), 16, 16).unwrap();
        let first = demo.frame().unwrap();
        assert_eq!((first.created, first.drawn), (1, 1));
        // Default cells are black; the area past the grid keeps the clear color
        assert_eq!(demo.canvas().frame().pixels[0], Color::BLACK.to_argb());
        assert_eq!(demo.canvas().frame().pixels[15], Color::WHITE.to_argb());

        let second = demo.frame().unwrap();
        assert_eq!(second.updated, 1);
        assert_eq!(demo.canvas().frame().pixels[0], Color::rgb(127, 0, 0).to_argb());

        let canvas = demo.shutdown();
        assert_eq!(canvas.resident(), 0);
    }

    #[test]
    fn test_bad_zoom_increment_is_an_error_for_every_demo() {
        let config = FrameConfig {
            zoom_increment: 0.0,
            ..FrameConfig::default()
        };
        for kind in DemoKind::ALL {
            assert!(
                matches!(
                    Demo::new(kind, &config, &small_settings(), 16, 16),
                    Err(GridError::InvalidZoomIncrement(_))
                ),
                "{kind} accepted a zero zoom increment"
            );
        }
    }

    #[test]
    fn test_resize_changes_viewport() {
        let mut demo = Demo::new(DemoKind::Fade, &FrameConfig::default(), &small_settings(), 16, 16).unwrap();
        demo.resize(40, 20);
        assert_eq!(demo.canvas().viewport(), (40, 20));
        assert_eq!(demo.debug_state()["viewport"][0], 40);
    }
}
