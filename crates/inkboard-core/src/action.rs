//! Serializable canvas actions.
//!
//! Every canvas operation has an [`Action`] variant, so a session can be
//! recorded, replayed from a script, or sent from a UI layer as plain JSON.

use crate::canvas::{Canvas, GridType};
use crate::input::{PointerEvent, SurfaceRect};
use crate::shapes::{ElementId, SerializableColor, ShapeKind};
use crate::tools::ToolKind;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// One operation on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    SetActiveTool {
        tool: ToolKind,
    },
    /// Hex color such as `#FF6B00`.
    SetSelectedColor {
        color: String,
    },
    SetStrokeWidth {
        width: f64,
    },
    SetZoomLevel {
        zoom: i32,
    },
    ZoomIn,
    ZoomOut,
    ResetZoom,
    ToggleShapesMenu,
    SelectShape {
        shape: ShapeKind,
    },
    StartDrawing {
        point: Point,
    },
    ContinueDrawing {
        point: Point,
    },
    StopDrawing,
    StartPanning {
        point: Point,
    },
    ContinuePanning {
        point: Point,
    },
    StopPanning,
    TextToolDown {
        point: Point,
    },
    AddText {
        point: Point,
        text: String,
    },
    StartEditingText {
        id: ElementId,
    },
    /// Without an `id` this targets the text element being edited.
    UpdateTextElement {
        #[serde(default)]
        id: Option<ElementId>,
        text: String,
        #[serde(default)]
        width: Option<f64>,
        #[serde(default)]
        height: Option<f64>,
    },
    StopEditingText,
    AddImage {
        point: Point,
        src: String,
        width: f64,
        height: f64,
    },
    Undo,
    Redo,
    SelectElement {
        #[serde(default)]
        id: Option<ElementId>,
    },
    SetGridType {
        grid: GridType,
    },
    /// Raw pointer event, routed by the active tool.
    Pointer {
        event: PointerEvent,
        #[serde(default)]
        surface: SurfaceRect,
    },
}

impl Canvas {
    /// Apply an action.
    pub fn dispatch(&mut self, action: Action) {
        log::trace!("dispatch {:?}", action);
        match action {
            Action::SetActiveTool { tool } => self.set_active_tool(tool),
            Action::SetSelectedColor { color } => match color.parse::<SerializableColor>() {
                Ok(color) => self.set_selected_color(color),
                Err(e) => log::warn!("Ignoring color: {}", e),
            },
            Action::SetStrokeWidth { width } => self.set_stroke_width(width),
            Action::SetZoomLevel { zoom } => self.set_zoom_level(zoom),
            Action::ZoomIn => self.zoom_in(),
            Action::ZoomOut => self.zoom_out(),
            Action::ResetZoom => self.reset_zoom(),
            Action::ToggleShapesMenu => self.toggle_shapes_menu(),
            Action::SelectShape { shape } => self.select_shape(shape),
            Action::StartDrawing { point } => self.start_drawing(point),
            Action::ContinueDrawing { point } => self.continue_drawing(point),
            Action::StopDrawing => self.stop_drawing(),
            Action::StartPanning { point } => self.start_panning(point),
            Action::ContinuePanning { point } => self.continue_panning(point),
            Action::StopPanning => self.stop_panning(),
            Action::TextToolDown { point } => {
                self.text_tool_down(point);
            }
            Action::AddText { point, text } => {
                self.add_text(point, text);
            }
            Action::StartEditingText { id } => self.start_editing_text(id),
            Action::UpdateTextElement {
                id,
                text,
                width,
                height,
            } => match id.or_else(|| self.editing_text()) {
                Some(id) => self.update_text_element(id, text, width, height),
                None => {
                    log::warn!("update_text_element: no id and no text being edited");
                    self.stop_editing_text();
                }
            },
            Action::StopEditingText => self.stop_editing_text(),
            Action::AddImage {
                point,
                src,
                width,
                height,
            } => {
                self.add_image(point, src, width, height);
            }
            Action::Undo => {
                self.undo();
            }
            Action::Redo => {
                self.redo();
            }
            Action::SelectElement { id } => self.select_element(id),
            Action::SetGridType { grid } => self.set_grid_type(grid),
            Action::Pointer { event, surface } => self.handle_pointer(event, &surface),
        }
    }
}
