//! Tool system for the whiteboard.

use crate::shapes::{ElementId, SerializableColor, ShapeKind, StrokeTool};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    Select,
    #[default]
    Hand,
    Pen,
    Marker,
    Eraser,
    Shapes,
    Text,
    Image,
}

impl ToolKind {
    /// Get all tools in toolbar order.
    pub fn all() -> &'static [ToolKind] {
        &[
            ToolKind::Select,
            ToolKind::Hand,
            ToolKind::Pen,
            ToolKind::Marker,
            ToolKind::Eraser,
            ToolKind::Shapes,
            ToolKind::Text,
            ToolKind::Image,
        ]
    }

    /// Single-letter keyboard shortcut.
    pub fn shortcut_key(&self) -> char {
        match self {
            ToolKind::Select => 'v',
            ToolKind::Hand => 'h',
            ToolKind::Pen => 'p',
            ToolKind::Marker => 'm',
            ToolKind::Eraser => 'e',
            ToolKind::Shapes => 's',
            ToolKind::Text => 't',
            ToolKind::Image => 'i',
        }
    }

    /// Tool for a shortcut letter (case-insensitive).
    pub fn from_shortcut(key: char) -> Option<Self> {
        let key = key.to_ascii_lowercase();
        Self::all().iter().copied().find(|tool| tool.shortcut_key() == key)
    }

    /// The stroke tool behind freehand tools.
    pub fn stroke_tool(&self) -> Option<StrokeTool> {
        match self {
            ToolKind::Pen => Some(StrokeTool::Pen),
            ToolKind::Marker => Some(StrokeTool::Marker),
            _ => None,
        }
    }
}

/// The pointer gesture currently in progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    /// No pointer interaction.
    #[default]
    Idle,
    /// Building a stroke or shape; `element` is the one under construction.
    Drawing { element: Option<ElementId> },
    /// Dragging the eraser; `erased` records whether anything was removed yet.
    Erasing { erased: bool },
    /// Dragging the view with the hand tool.
    Panning,
}

/// Current tool, drawing defaults and gesture state.
#[derive(Debug, Clone)]
pub struct ToolManager {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    /// Shape drawn by the shapes tool.
    pub selected_shape: Option<ShapeKind>,
    /// Whether the shapes submenu is open.
    pub shapes_menu_open: bool,
    /// Color applied to new elements.
    pub color: SerializableColor,
    /// Stroke width applied to new elements.
    pub stroke_width: f64,
    /// Current gesture.
    pub gesture: Gesture,
    /// Last pointer position seen by the current gesture.
    pub last_point: Option<Point>,
    /// Text element open in the editor.
    pub editing_text: Option<ElementId>,
}

impl Default for ToolManager {
    fn default() -> Self {
        Self {
            current_tool: ToolKind::default(),
            selected_shape: None,
            shapes_menu_open: false,
            color: SerializableColor::accent(),
            stroke_width: 2.0,
            gesture: Gesture::Idle,
            last_point: None,
            editing_text: None,
        }
    }
}

impl ToolManager {
    /// Smallest stroke width accepted from callers.
    pub const MIN_STROKE_WIDTH: f64 = 0.5;

    /// Create a new tool manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current tool.
    ///
    /// Leaving the eraser drops text editing; any tool but shapes closes the
    /// shapes menu. The gesture must already be finished by the caller.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if self.current_tool == ToolKind::Eraser && tool != ToolKind::Eraser {
            self.editing_text = None;
        }
        if tool != ToolKind::Shapes {
            self.shapes_menu_open = false;
        }
        self.current_tool = tool;
    }

    /// Pick the shape for the shapes tool and switch to it.
    pub fn select_shape(&mut self, kind: ShapeKind) {
        self.selected_shape = Some(kind);
        self.current_tool = ToolKind::Shapes;
        self.shapes_menu_open = false;
    }

    /// Set the stroke width for new elements.
    pub fn set_stroke_width(&mut self, width: f64) {
        self.stroke_width = if width.is_finite() {
            width.max(Self::MIN_STROKE_WIDTH)
        } else {
            Self::MIN_STROKE_WIDTH
        };
    }

    /// Flip the shapes submenu.
    pub fn toggle_shapes_menu(&mut self) {
        self.shapes_menu_open = !self.shapes_menu_open;
    }

    /// True while drawing or erasing.
    pub fn is_drawing(&self) -> bool {
        matches!(self.gesture, Gesture::Drawing { .. } | Gesture::Erasing { .. })
    }

    /// True while an eraser gesture is active.
    pub fn is_erasing(&self) -> bool {
        matches!(self.gesture, Gesture::Erasing { .. })
    }

    /// True while panning.
    pub fn is_panning(&self) -> bool {
        matches!(self.gesture, Gesture::Panning)
    }

    /// Id of the element under construction, if any.
    pub fn drawing_element(&self) -> Option<ElementId> {
        match self.gesture {
            Gesture::Drawing { element } => element,
            _ => None,
        }
    }

    /// Return to idle.
    pub fn end_gesture(&mut self) {
        self.gesture = Gesture::Idle;
        self.last_point = None;
    }
}
