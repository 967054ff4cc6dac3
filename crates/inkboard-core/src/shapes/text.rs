//! Text box element.

use super::{ElementId, ElementTrait, SerializableColor, anchored_rect, rect_contains_inclusive};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A plain-text box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBox {
    pub(crate) id: ElementId,
    /// Top-left corner position.
    pub position: Point,
    /// Text content (no rich formatting).
    pub text: String,
    pub color: SerializableColor,
    pub font_size: f64,
    pub width: f64,
    pub height: f64,
    /// Rotation angle in degrees.
    #[serde(default)]
    pub rotation: f64,
}

impl TextBox {
    /// Default box width for newly placed text.
    pub const DEFAULT_WIDTH: f64 = 200.0;
    /// Default box height for newly placed text.
    pub const DEFAULT_HEIGHT: f64 = 30.0;
    /// Font size before the stroke-width bump is added.
    pub const BASE_FONT_SIZE: f64 = 14.0;

    /// Create a new text box with default size.
    pub fn new(position: Point, text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            text,
            color: SerializableColor::black(),
            font_size: Self::BASE_FONT_SIZE,
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            rotation: 0.0,
        }
    }

    /// Builder method to set the font size.
    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = size;
        self
    }

    /// Builder method to set the color.
    pub fn with_color(mut self, color: SerializableColor) -> Self {
        self.color = color;
        self
    }

    /// Builder method to set the box size.
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Whether `point` lies within the box grown by `tolerance`, edges included.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        rect_contains_inclusive(self.bounds().inflate(tolerance, tolerance), point)
    }
}

impl ElementTrait for TextBox {
    fn id(&self) -> ElementId {
        self.id
    }

    fn bounds(&self) -> Rect {
        anchored_rect(self.position, self.width, self.height)
    }
}
