//! Image element for placed raster images.

use super::{ElementId, ElementTrait, anchored_rect};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An image placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageBox {
    pub(crate) id: ElementId,
    /// Top-left corner position.
    pub position: Point,
    /// Display width.
    pub width: f64,
    /// Display height.
    pub height: f64,
    /// Displayable source reference (URL, data URL or path), opaque to the engine.
    pub source: String,
    /// Rotation angle in degrees.
    #[serde(default)]
    pub rotation: f64,
}

impl ImageBox {
    /// Create a new image box with explicit display size.
    pub fn new(position: Point, source: String, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            width,
            height,
            source,
            rotation: 0.0,
        }
    }

    /// Scale intrinsic dimensions down so the longer side is at most `max_dimension`.
    ///
    /// Aspect ratio is preserved; images that already fit are left as-is.
    pub fn fit_size(width: f64, height: f64, max_dimension: f64) -> (f64, f64) {
        if width > height && width > max_dimension {
            (max_dimension, height / width * max_dimension)
        } else if height > max_dimension {
            (width / height * max_dimension, max_dimension)
        } else {
            (width, height)
        }
    }
}

impl ElementTrait for ImageBox {
    fn id(&self) -> ElementId {
        self.id
    }

    fn bounds(&self) -> Rect {
        anchored_rect(self.position, self.width, self.height)
    }
}
