//! Freehand stroke element.

use super::{ElementId, ElementTrait, SerializableColor, default_opacity};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which drawing tool produced a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrokeTool {
    #[default]
    Pen,
    /// Wide, half-transparent highlighter.
    Marker,
}

impl StrokeTool {
    /// Opacity applied to new strokes drawn with this tool.
    pub fn opacity(self) -> f64 {
        match self {
            StrokeTool::Pen => 1.0,
            StrokeTool::Marker => 0.5,
        }
    }
}

/// A freehand drawing (series of points).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub(crate) id: ElementId,
    /// Tool the stroke was drawn with.
    pub tool: StrokeTool,
    pub color: SerializableColor,
    pub stroke_width: f64,
    /// Points in the freehand path.
    pub points: Vec<Point>,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
}

impl Stroke {
    /// Start a new stroke at a single point.
    pub fn new(tool: StrokeTool, start: Point, color: SerializableColor, stroke_width: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            tool,
            color,
            stroke_width,
            points: vec![start],
            opacity: tool.opacity(),
        }
    }

    /// A new stroke (fresh id) that shares this stroke's style but follows `points`.
    pub fn with_points(&self, points: Vec<Point>) -> Self {
        Self {
            id: Uuid::new_v4(),
            tool: self.tool,
            color: self.color,
            stroke_width: self.stroke_width,
            points,
            opacity: self.opacity,
        }
    }

    /// Add a point to the path.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Cut the parts of this stroke covered by an eraser disc.
    ///
    /// Returns `None` when the disc touches neither a vertex nor a connecting
    /// segment. Otherwise returns the surviving runs of at least two points,
    /// each as a new stroke; the result may be empty.
    pub fn erase_disc(&self, center: Point, radius: f64, samples: usize) -> Option<Vec<Stroke>> {
        let under_brush = |p: Point| p.distance(center) < radius;

        let mut runs: Vec<Vec<Point>> = Vec::new();
        let mut current: Vec<Point> = Vec::new();
        let mut touched = false;

        for &point in &self.points {
            if under_brush(point) {
                touched = true;
                if !current.is_empty() {
                    runs.push(std::mem::take(&mut current));
                }
                continue;
            }

            // A non-empty run always ends with the previous vertex.
            if let Some(&prev) = current.last() {
                if segment_under_brush(prev, point, &under_brush, samples) {
                    touched = true;
                    runs.push(std::mem::take(&mut current));
                }
            }
            current.push(point);
        }

        if !current.is_empty() {
            runs.push(current);
        }

        if !touched {
            return None;
        }

        Some(
            runs.into_iter()
                .filter(|run| run.len() >= 2)
                .map(|run| self.with_points(run))
                .collect(),
        )
    }
}

/// Probe interior points of `a -> b` at `t = j / samples`.
fn segment_under_brush(
    a: Point,
    b: Point,
    under_brush: &impl Fn(Point) -> bool,
    samples: usize,
) -> bool {
    (1..samples).any(|j| {
        let t = j as f64 / samples as f64;
        under_brush(a.lerp(b, t))
    })
}

impl ElementTrait for Stroke {
    fn id(&self) -> ElementId {
        self.id
    }

    fn bounds(&self) -> Rect {
        if self.points.is_empty() {
            return Rect::ZERO;
        }

        let mut min_x = f64::MAX;
        let mut min_y = f64::MAX;
        let mut max_x = f64::MIN;
        let mut max_y = f64::MIN;

        for point in &self.points {
            min_x = min_x.min(point.x);
            min_y = min_y.min(point.y);
            max_x = max_x.max(point.x);
            max_y = max_y.max(point.y);
        }

        Rect::new(min_x, min_y, max_x, max_y)
    }
}
