//! Eraser hit-testing and stroke splitting.

use crate::shapes::{Element, ElementTrait, rect_contains_inclusive};
use kurbo::Point;

/// The disc swept by the eraser at one pointer position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EraserBrush {
    /// Brush center in canvas coordinates.
    pub center: Point,
    /// Hit radius.
    pub radius: f64,
    /// Subdivisions used to probe stroke segments between vertices.
    pub segment_samples: usize,
}

impl EraserBrush {
    /// Brush sized from the current stroke width.
    pub fn new(center: Point, stroke_width: f64, multiplier: f64, segment_samples: usize) -> Self {
        Self {
            center,
            radius: stroke_width * multiplier,
            segment_samples,
        }
    }
}

/// Remove or cut everything under the brush.
///
/// Strokes are split around the brush; shapes, text and images are removed
/// whole. Returns `true` if the element list changed.
pub fn erase_at(elements: &mut Vec<Element>, brush: &EraserBrush) -> bool {
    let mut kept: Vec<Element> = Vec::with_capacity(elements.len());
    let mut modified = false;

    for element in elements.drain(..) {
        match &element {
            Element::Stroke(stroke) => {
                match stroke.erase_disc(brush.center, brush.radius, brush.segment_samples) {
                    Some(pieces) => {
                        modified = true;
                        kept.extend(pieces.into_iter().map(Element::Stroke));
                    }
                    None => kept.push(element),
                }
            }
            Element::Shape(shape) => {
                if shape.eraser_hit(brush.center, brush.radius) {
                    modified = true;
                } else {
                    kept.push(element);
                }
            }
            Element::Text(_) | Element::Image(_) => {
                // Boxes are only erased by touching them directly.
                if rect_contains_inclusive(element.bounds(), brush.center) {
                    modified = true;
                } else {
                    kept.push(element);
                }
            }
        }
    }

    *elements = kept;
    modified
}
