//! Geometric shapes placed with the shapes tool.

use super::{
    ElementId, ElementTrait, SerializableColor, anchored_rect, default_opacity,
    rect_contains_inclusive,
};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which figure a geometric shape draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Rectangle,
    Circle,
    Arrow,
    Triangle,
}

/// A shape spanned by an anchor and a (possibly negative) extent.
///
/// While dragging, `width`/`height` follow `pointer - anchor`, so a drag up or
/// to the left produces negative extents. The figure occupies the box between
/// the anchor and `anchor + (width, height)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometricShape {
    pub(crate) id: ElementId,
    pub kind: ShapeKind,
    /// Anchor corner (where the drag started).
    pub position: Point,
    pub width: f64,
    pub height: f64,
    pub color: SerializableColor,
    pub stroke_width: f64,
    /// Rotation angle in degrees.
    #[serde(default)]
    pub rotation: f64,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
}

impl GeometricShape {
    /// Create a zero-size shape anchored at `position`.
    pub fn new(kind: ShapeKind, position: Point, color: SerializableColor, stroke_width: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            position,
            width: 0.0,
            height: 0.0,
            color,
            stroke_width,
            rotation: 0.0,
            opacity: 1.0,
        }
    }

    /// Stretch the shape so its far corner sits at `corner`.
    pub fn resize_to(&mut self, corner: Point) {
        self.width = corner.x - self.position.x;
        self.height = corner.y - self.position.y;
    }

    /// Geometric center of the spanned box.
    pub fn center(&self) -> Point {
        Point::new(
            self.position.x + self.width / 2.0,
            self.position.y + self.height / 2.0,
        )
    }

    /// Radius used for circles: half of the larger extent.
    pub fn radius(&self) -> f64 {
        self.width.abs().max(self.height.abs()) / 2.0
    }

    /// Check whether an eraser disc at `center` with `radius` touches this shape.
    pub fn eraser_hit(&self, center: Point, radius: f64) -> bool {
        let bounds = self.bounds();
        let reach = bounds.inflate(radius, radius);

        match self.kind {
            ShapeKind::Rectangle => {
                if !rect_contains_inclusive(reach, center) {
                    return false;
                }
                let near_edge = (center.x - bounds.x0).abs() < radius
                    || (center.x - bounds.x1).abs() < radius
                    || (center.y - bounds.y0).abs() < radius
                    || (center.y - bounds.y1).abs() < radius;
                let deep_inside = center.x > bounds.x0 + radius
                    && center.x < bounds.x1 - radius
                    && center.y > bounds.y0 + radius
                    && center.y < bounds.y1 - radius;
                near_edge || deep_inside
            }
            ShapeKind::Circle => self.center().distance(center) <= self.radius() + radius,
            ShapeKind::Arrow | ShapeKind::Triangle => rect_contains_inclusive(reach, center),
        }
    }
}

impl ElementTrait for GeometricShape {
    fn id(&self) -> ElementId {
        self.id
    }

    fn bounds(&self) -> Rect {
        anchored_rect(self.position, self.width, self.height)
    }
}
