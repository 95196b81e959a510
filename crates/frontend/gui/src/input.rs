//! Mouse input mapped onto the camera.
//!
//! The window backend samples the mouse once per frame into a
//! [`MouseState`]; [`CameraInput`] turns successive samples into pans and
//! zooms. Keeping the mapping free of window types lets it be tested
//! headlessly.

use tile_core::camera::{Camera2D, Vec2};

/// One frame's worth of mouse state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MouseState {
    /// Cursor position in window pixels, if the cursor is over the window.
    pub position: Option<(f32, f32)>,
    /// Panning button (right button) held.
    pub drag: bool,
    /// Wheel notches scrolled since the last frame.
    pub wheel: f32,
}

#[derive(Debug, Default)]
pub struct CameraInput {
    last_drag: Option<Vec2>,
}

impl CameraInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.last_drag.is_some()
    }

    /// Apply one frame of input. Returns true if the camera moved.
    pub fn apply(&mut self, camera: &mut Camera2D, mouse: MouseState) -> bool {
        let cursor = mouse.position.map(|(x, y)| Vec2::new(x, y));
        let mut moved = false;

        match (mouse.drag, cursor, self.last_drag) {
            (true, Some(now), Some(before)) => {
                let delta = now - before;
                if delta != Vec2::ZERO {
                    camera.pan(delta);
                    moved = true;
                }
                self.last_drag = Some(now);
            }
            (true, Some(now), None) => self.last_drag = Some(now),
            // Cursor left the window mid-drag; resume from wherever it returns
            (true, None, _) => self.last_drag = None,
            (false, _, _) => self.last_drag = None,
        }

        if let Some(at) = cursor {
            if mouse.wheel != 0.0 {
                camera.zoom_at(mouse.wheel, at);
                moved = true;
            }
        }
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f32, y: f32, drag: bool) -> MouseState {
        MouseState {
            position: Some((x, y)),
            drag,
            wheel: 0.0,
        }
    }

    #[test]
    fn test_drag_pans_camera() {
        let mut camera = Camera2D::default();
        let mut input = CameraInput::new();

        assert!(!input.apply(&mut camera, at(100.0, 100.0, true)));
        assert!(input.is_dragging());
        assert!(input.apply(&mut camera, at(110.0, 95.0, true)));
        // Content follows the cursor
        assert_eq!(camera.target, Vec2::new(-10.0, 5.0));

        input.apply(&mut camera, at(200.0, 200.0, false));
        assert!(!input.is_dragging());
        assert_eq!(camera.target, Vec2::new(-10.0, 5.0));
    }

    #[test]
    fn test_drag_restarts_after_leaving_window() {
        let mut camera = Camera2D::default();
        let mut input = CameraInput::new();
        input.apply(&mut camera, at(0.0, 0.0, true));
        input.apply(
            &mut camera,
            MouseState {
                position: None,
                drag: true,
                wheel: 0.0,
            },
        );
        assert!(!input.apply(&mut camera, at(50.0, 50.0, true)));
        assert_eq!(camera.target, Vec2::ZERO);
    }

    #[test]
    fn test_wheel_zooms_at_cursor() {
        let mut camera = Camera2D::default();
        let mut input = CameraInput::new();
        let before = camera.screen_to_world(Vec2::new(40.0, 30.0));

        let moved = input.apply(
            &mut camera,
            MouseState {
                position: Some((40.0, 30.0)),
                drag: false,
                wheel: 1.0,
            },
        );
        assert!(moved);
        assert_eq!(camera.zoom, 2.0);
        assert_eq!(camera.screen_to_world(Vec2::new(40.0, 30.0)), before);
    }

    #[test]
    fn test_wheel_without_cursor_is_ignored() {
        let mut camera = Camera2D::default();
        let mut input = CameraInput::new();
        let moved = input.apply(
            &mut camera,
            MouseState {
                position: None,
                drag: false,
                wheel: 3.0,
            },
        );
        assert!(!moved);
        assert_eq!(camera.zoom, 1.0);
    }
}
