//! Pointer routing from the rendering surface into the canvas.

use crate::canvas::Canvas;
use crate::tools::ToolKind;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on Linux/Windows, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Pointer event in client (window) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up { position: Point },
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match self {
            PointerEvent::Down { position }
            | PointerEvent::Move { position }
            | PointerEvent::Up { position } => *position,
        }
    }
}

/// Bounding rectangle of the drawing surface in client coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SurfaceRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl SurfaceRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Client point relative to the surface's top-left corner.
    pub fn to_local(&self, client: Point) -> Point {
        client - Vec2::new(self.left, self.top)
    }

    pub fn contains(&self, client: Point) -> bool {
        Rect::new(
            self.left,
            self.top,
            self.left + self.width,
            self.top + self.height,
        )
        .contains(client)
    }
}

impl From<Rect> for SurfaceRect {
    fn from(rect: Rect) -> Self {
        let rect = rect.abs();
        Self::new(rect.x0, rect.y0, rect.width(), rect.height())
    }
}

impl Canvas {
    /// Route a raw pointer event to the operation the active tool implies.
    ///
    /// Drawing points go through the camera into canvas space; panning works
    /// on surface pixels. Move and up events are honored wherever the pointer
    /// is, so a drag that leaves the surface still finishes.
    pub fn handle_pointer(&mut self, event: PointerEvent, surface: &SurfaceRect) {
        let local = surface.to_local(event.position());
        let point = self.camera.screen_to_canvas(local);

        match event {
            PointerEvent::Down { .. } => match self.active_tool() {
                ToolKind::Text => {
                    self.text_tool_down(point);
                }
                // Selection and image placement are driven by the host UI.
                ToolKind::Select | ToolKind::Image => {}
                ToolKind::Hand => self.start_panning(local),
                ToolKind::Pen | ToolKind::Marker | ToolKind::Eraser | ToolKind::Shapes => {
                    self.start_drawing(point)
                }
            },
            PointerEvent::Move { .. } => {
                if self.tool_manager.is_panning() {
                    self.continue_panning(local);
                } else if self.tool_manager.is_drawing() {
                    self.continue_drawing(point);
                }
            }
            PointerEvent::Up { .. } => {
                if self.tool_manager.is_panning() {
                    self.stop_panning();
                } else if self.tool_manager.is_drawing() {
                    self.stop_drawing();
                }
            }
        }
    }
}
