//! Canvas element definitions for the whiteboard.

mod freehand;
mod geometric;
mod image;
mod text;

pub use freehand::{Stroke, StrokeTool};
pub use geometric::{GeometricShape, ShapeKind};
pub use image::ImageBox;
pub use text::TextBox;

use kurbo::{Point, Rect};
use peniko::Color;
use peniko::color::{Srgb, parse_color};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Error returned when a color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("Color must start with '#': {0}")]
    MissingHash(String),
    #[error("Unsupported color length {len} in {input}")]
    BadLength { input: String, len: usize },
    #[error("Invalid hex digit in color: {0}")]
    BadDigit(String),
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    /// The toolbar's default accent orange (`#FF6B00`).
    pub fn accent() -> Self {
        Self::new(0xFF, 0x6B, 0x00, 255)
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(input: &str) -> Result<Self, ColorParseError> {
        let input = input.trim();
        let hex = input
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(input.to_string()))?;

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::BadDigit(input.to_string()));
        }
        if !matches!(hex.len(), 3 | 6 | 8) {
            return Err(ColorParseError::BadLength {
                input: input.to_string(),
                len: hex.len(),
            });
        }

        let color: Color = parse_color(input)
            .map_err(|_| ColorParseError::BadDigit(input.to_string()))?
            .to_alpha_color::<Srgb>();
        Ok(color.into())
    }

    /// Format as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

impl std::fmt::Display for SerializableColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::str::FromStr for SerializableColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

/// Unique identifier for canvas elements.
pub type ElementId = Uuid;

fn default_opacity() -> f64 {
    1.0
}

/// Normalized box for an anchor plus possibly-negative extents.
pub(crate) fn anchored_rect(position: Point, width: f64, height: f64) -> Rect {
    Rect::new(
        position.x,
        position.y,
        position.x + width,
        position.y + height,
    )
    .abs()
}

/// Inclusive containment (kurbo's `Rect::contains` excludes the far edges).
pub(crate) fn rect_contains_inclusive(rect: Rect, point: Point) -> bool {
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

/// Common trait for all canvas elements.
pub trait ElementTrait {
    /// Get the unique identifier.
    fn id(&self) -> ElementId;

    /// Get the bounding box in canvas coordinates.
    fn bounds(&self) -> Rect;
}

/// Every kind of element that can live on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Element {
    Stroke(Stroke),
    Shape(GeometricShape),
    Text(TextBox),
    Image(ImageBox),
}

impl Element {
    pub fn id(&self) -> ElementId {
        match self {
            Element::Stroke(s) => s.id(),
            Element::Shape(s) => s.id(),
            Element::Text(s) => s.id(),
            Element::Image(s) => s.id(),
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Element::Stroke(s) => s.bounds(),
            Element::Shape(s) => s.bounds(),
            Element::Text(s) => s.bounds(),
            Element::Image(s) => s.bounds(),
        }
    }

    /// Get the text box if this element is one.
    pub fn as_text(&self) -> Option<&TextBox> {
        match self {
            Element::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Get the mutable text box if this element is one.
    pub fn as_text_mut(&mut self) -> Option<&mut TextBox> {
        match self {
            Element::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Get the stroke if this element is one.
    pub fn as_stroke(&self) -> Option<&Stroke> {
        match self {
            Element::Stroke(s) => Some(s),
            _ => None,
        }
    }

    /// Get the geometric shape if this element is one.
    pub fn as_shape(&self) -> Option<&GeometricShape> {
        match self {
            Element::Shape(s) => Some(s),
            _ => None,
        }
    }
}
