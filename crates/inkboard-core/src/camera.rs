//! Camera module for pan/zoom view state.

use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Zoom level (in percent) that corresponds to "100%" in the UI.
pub const DEFAULT_ZOOM: i32 = 100;
/// Smallest allowed zoom level in percent.
pub const MIN_ZOOM: i32 = 25;
/// Largest allowed zoom level in percent.
pub const MAX_ZOOM: i32 = 300;
/// Increment used by zoom buttons and shortcuts.
pub const ZOOM_STEP: i32 = 25;

/// Camera holds the view transform for the canvas.
///
/// Zoom is an integer percentage. Pan is an offset in screen pixels applied
/// after scaling, so `screen = canvas * zoom / 100 + pan`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Current zoom level in percent.
    pub zoom: i32,
    /// Current translation offset (pan) in screen pixels.
    pub pan: Vec2,
    /// Minimum allowed zoom level.
    pub min_zoom: i32,
    /// Maximum allowed zoom level.
    pub max_zoom: i32,
    /// Step used by `zoom_in` / `zoom_out`.
    pub zoom_step: i32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            pan: Vec2::ZERO,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            zoom_step: ZOOM_STEP,
        }
    }
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a camera with custom zoom limits.
    ///
    /// Reversed limits are swapped so clamping always has a valid range.
    pub fn with_limits(min_zoom: i32, max_zoom: i32, zoom_step: i32) -> Self {
        let (min_zoom, max_zoom) = if min_zoom <= max_zoom {
            (min_zoom, max_zoom)
        } else {
            (max_zoom, min_zoom)
        };
        Self {
            zoom: DEFAULT_ZOOM.clamp(min_zoom, max_zoom),
            min_zoom,
            max_zoom,
            zoom_step,
            ..Self::default()
        }
    }

    /// Zoom as a scale factor (1.0 = 100%).
    pub fn scale(&self) -> f64 {
        f64::from(self.zoom) / 100.0
    }

    /// Get the affine transform for rendering (canvas -> screen).
    pub fn transform(&self) -> Affine {
        Affine::translate(self.pan) * Affine::scale(self.scale())
    }

    /// Convert a screen point to canvas coordinates.
    pub fn screen_to_canvas(&self, screen_point: Point) -> Point {
        self.transform().inverse() * screen_point
    }

    /// Convert a canvas point to screen coordinates.
    pub fn canvas_to_screen(&self, canvas_point: Point) -> Point {
        self.transform() * canvas_point
    }

    /// Set the zoom level, clamped to the allowed range.
    ///
    /// Only the range is enforced; a value between steps is kept as given.
    pub fn set_zoom(&mut self, zoom: i32) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    /// Zoom in by one step.
    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom.saturating_add(self.zoom_step));
    }

    /// Zoom out by one step.
    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom.saturating_sub(self.zoom_step));
    }

    /// Pan the camera by a delta in screen coordinates.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    /// Reset camera to default position and zoom.
    pub fn reset(&mut self) {
        self.pan = Vec2::ZERO;
        self.set_zoom(DEFAULT_ZOOM);
    }
}
