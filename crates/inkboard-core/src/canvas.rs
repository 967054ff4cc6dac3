//! Canvas document and state management.

use crate::camera::Camera;
use crate::config::{ConfigError, EngineConfig};
use crate::eraser::{EraserBrush, erase_at};
use crate::history::History;
use crate::shapes::{
    Element, ElementId, ElementTrait, GeometricShape, ImageBox, SerializableColor, ShapeKind,
    Stroke, TextBox,
};
use crate::tools::{Gesture, ToolKind, ToolManager};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Background grid drawn behind the canvas. Purely cosmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridType {
    Standard,
    Quad,
    Dots,
    #[default]
    Lined,
    None,
}

/// The ordered element list. Later elements draw on top.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanvasDocument {
    /// All elements in z-order (back to front).
    pub elements: Vec<Element>,
}

impl CanvasDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element on top of everything else.
    pub fn add_element(&mut self, element: Element) -> ElementId {
        let id = element.id();
        self.elements.push(element);
        id
    }

    /// Get an element by ID.
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == id)
    }

    /// Get a mutable reference to an element by ID.
    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id() == id)
    }

    /// Topmost text box whose bounds contain `point`.
    pub fn text_at(&self, point: Point) -> Option<ElementId> {
        self.elements
            .iter()
            .rev()
            .filter_map(Element::as_text)
            .find(|text| text.hit_test(point, 0.0))
            .map(|text| text.id())
    }

    /// Check if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Get the number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Read-only view of everything the renderer needs for one frame.
#[derive(Debug, Clone, Serialize)]
pub struct RenderState<'a> {
    pub elements: &'a [Element],
    pub selection: Option<ElementId>,
    pub zoom: i32,
    pub pan: Vec2,
    pub active_tool: ToolKind,
    pub selected_shape: Option<ShapeKind>,
    pub shapes_menu_open: bool,
    pub editing_text: Option<ElementId>,
    pub grid_type: GridType,
    pub can_undo: bool,
    pub can_redo: bool,
}

/// The canvas state engine: document, view, tools, selection and history.
///
/// Every input path (pointer, keyboard, toolbar) goes through the methods
/// here. All operations are total: requests that make no sense in the
/// current state are ignored.
#[derive(Debug, Clone)]
pub struct Canvas {
    /// The document being edited.
    pub document: CanvasDocument,
    /// Camera for view transform.
    pub camera: Camera,
    /// Tool manager.
    pub tool_manager: ToolManager,
    /// Currently selected element (may be stale after erasing).
    selection: Option<ElementId>,
    history: History,
    grid_type: GridType,
    config: EngineConfig,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Create a new canvas with an empty document and default config.
    pub fn new() -> Self {
        Self::build(EngineConfig::default())
    }

    /// Create a new canvas with the given config.
    ///
    /// Fails with [`ConfigError::Invalid`] if the config does not validate.
    pub fn with_config(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: EngineConfig) -> Self {
        Self {
            document: CanvasDocument::new(),
            camera: Camera::with_limits(config.min_zoom, config.max_zoom, config.zoom_step),
            tool_manager: ToolManager::new(),
            selection: None,
            history: History::new(config.max_history),
            grid_type: GridType::default(),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ---- tool & view controls ----

    /// Switch the active tool, finishing any gesture in progress first.
    pub fn set_active_tool(&mut self, tool: ToolKind) {
        self.finish_gesture();
        self.tool_manager.set_tool(tool);
        log::debug!("Active tool: {:?}", tool);
    }

    /// Set the color for new elements.
    pub fn set_selected_color(&mut self, color: SerializableColor) {
        self.tool_manager.color = color;
    }

    /// Set the stroke width for new elements.
    pub fn set_stroke_width(&mut self, width: f64) {
        self.tool_manager.set_stroke_width(width);
    }

    /// Set the zoom level in percent, clamped to the configured range.
    pub fn set_zoom_level(&mut self, zoom: i32) {
        self.camera.set_zoom(zoom);
    }

    /// Zoom in by one step.
    pub fn zoom_in(&mut self) {
        self.camera.zoom_in();
    }

    /// Zoom out by one step.
    pub fn zoom_out(&mut self) {
        self.camera.zoom_out();
    }

    /// Back to 100% with no pan.
    pub fn reset_zoom(&mut self) {
        self.camera.reset();
    }

    /// Open or close the shapes submenu.
    pub fn toggle_shapes_menu(&mut self) {
        self.tool_manager.toggle_shapes_menu();
    }

    /// Choose the shape to draw and switch to the shapes tool.
    pub fn select_shape(&mut self, kind: ShapeKind) {
        if self.tool_manager.is_drawing() {
            self.stop_drawing();
        }
        self.tool_manager.select_shape(kind);
    }

    /// Set the background grid style.
    pub fn set_grid_type(&mut self, grid_type: GridType) {
        self.grid_type = grid_type;
    }

    // ---- drawing pipeline ----

    /// Pointer down with a drawing tool.
    pub fn start_drawing(&mut self, point: Point) {
        if self.tool_manager.is_drawing() {
            log::debug!("start_drawing while a gesture is active; finishing it first");
            self.stop_drawing();
        }

        let tool = self.tool_manager.current_tool;
        let color = self.tool_manager.color;
        let stroke_width = self.tool_manager.stroke_width;

        let gesture = match tool {
            ToolKind::Eraser => Gesture::Erasing { erased: false },
            ToolKind::Pen | ToolKind::Marker => {
                let stroke_tool = tool.stroke_tool().unwrap_or_default();
                let width = if tool == ToolKind::Marker {
                    stroke_width.max(self.config.marker_stroke_width)
                } else {
                    stroke_width
                };
                let stroke = Stroke::new(stroke_tool, point, color, width);
                let id = self.document.add_element(Element::Stroke(stroke));
                Gesture::Drawing { element: Some(id) }
            }
            ToolKind::Shapes => match self.tool_manager.selected_shape {
                Some(kind) => {
                    let shape = GeometricShape::new(kind, point, color, stroke_width);
                    let id = self.document.add_element(Element::Shape(shape));
                    Gesture::Drawing { element: Some(id) }
                }
                None => Gesture::Drawing { element: None },
            },
            ToolKind::Select | ToolKind::Hand | ToolKind::Text | ToolKind::Image => {
                Gesture::Drawing { element: None }
            }
        };
        self.tool_manager.gesture = gesture;
        if self.tool_manager.is_erasing() {
            self.erase_step(point);
        }
        self.tool_manager.last_point = Some(point);
        log::debug!(
            "Gesture started: {:?} at ({}, {})",
            self.tool_manager.gesture,
            point.x,
            point.y
        );
    }

    /// Pointer move during a drawing gesture.
    pub fn continue_drawing(&mut self, point: Point) {
        if !self.tool_manager.is_drawing() {
            return;
        }

        match self.tool_manager.gesture {
            Gesture::Erasing { .. } => self.erase_step(point),
            Gesture::Drawing { element: Some(id) } => match self.document.get_mut(id) {
                Some(Element::Stroke(stroke)) => stroke.add_point(point),
                Some(Element::Shape(shape)) => shape.resize_to(point),
                _ => {}
            },
            _ => {}
        }

        self.tool_manager.last_point = Some(point);
        log::trace!("Gesture moved to ({}, {})", point.x, point.y);
    }

    /// Pointer up: commit what the gesture produced.
    pub fn stop_drawing(&mut self) {
        if !self.tool_manager.is_drawing() {
            return;
        }

        let built = self
            .tool_manager
            .drawing_element()
            .is_some_and(|id| self.document.get(id).is_some());
        // One undo step per erase gesture, and none if nothing was hit.
        let erased = matches!(self.tool_manager.gesture, Gesture::Erasing { erased: true });
        if built || erased {
            self.commit();
        }

        self.tool_manager.end_gesture();
    }

    /// End whatever pointer gesture is in progress.
    fn finish_gesture(&mut self) {
        if self.tool_manager.is_drawing() {
            self.stop_drawing();
        } else if self.tool_manager.is_panning() {
            self.stop_panning();
        }
    }

    /// Run the eraser once at `point` against the current document.
    fn erase_step(&mut self, point: Point) {
        let brush = EraserBrush::new(
            point,
            self.tool_manager.stroke_width,
            self.config.eraser_radius_multiplier,
            self.config.eraser_segment_samples,
        );
        if erase_at(&mut self.document.elements, &brush) {
            if let Gesture::Erasing { erased } = &mut self.tool_manager.gesture {
                *erased = true;
            }
            log::debug!(
                "Erased at ({}, {}) radius {}; {} elements left",
                point.x,
                point.y,
                brush.radius,
                self.document.len()
            );
        }
    }

    /// Pointer down with the hand tool.
    pub fn start_panning(&mut self, point: Point) {
        if self.tool_manager.is_drawing() {
            self.stop_drawing();
        }
        self.tool_manager.gesture = Gesture::Panning;
        self.tool_manager.last_point = Some(point);
    }

    /// Pointer move with the hand tool: pan by the delta since the last point.
    pub fn continue_panning(&mut self, point: Point) {
        if !self.tool_manager.is_panning() {
            return;
        }
        let Some(last) = self.tool_manager.last_point else {
            return;
        };
        self.camera.pan_by(point - last);
        self.tool_manager.last_point = Some(point);
    }

    /// Pointer up with the hand tool.
    pub fn stop_panning(&mut self) {
        if self.tool_manager.is_panning() {
            self.tool_manager.end_gesture();
        }
    }

    // ---- text ----

    /// Text tool click: edit the text under the pointer, or place a new one.
    pub fn text_tool_down(&mut self, point: Point) -> ElementId {
        match self.document.text_at(point) {
            Some(id) => {
                self.start_editing_text(id);
                id
            }
            None => {
                let placeholder = self.config.text_placeholder.clone();
                self.add_text(point, placeholder)
            }
        }
    }

    /// Place a new text box, select it and open it for editing.
    pub fn add_text(&mut self, point: Point, text: impl Into<String>) -> ElementId {
        let text = TextBox::new(point, text.into())
            .with_color(self.tool_manager.color)
            .with_font_size(self.config.text_base_font_size + self.tool_manager.stroke_width)
            .with_size(self.config.text_default_width, self.config.text_default_height);
        let id = self.document.add_element(Element::Text(text));

        self.selection = Some(id);
        self.tool_manager.editing_text = Some(id);
        self.commit();
        id
    }

    /// Open an existing text box in the editor.
    pub fn start_editing_text(&mut self, id: ElementId) {
        self.tool_manager.editing_text = Some(id);
        self.selection = Some(id);
    }

    /// Write back the editor contents and close the editor.
    ///
    /// Unknown ids only close the editor. Sizes that are not finite and
    /// positive are ignored.
    pub fn update_text_element(
        &mut self,
        id: ElementId,
        text: impl Into<String>,
        width: Option<f64>,
        height: Option<f64>,
    ) {
        match self.document.get_mut(id).and_then(Element::as_text_mut) {
            Some(text_box) => {
                text_box.text = text.into();
                if let Some(width) = width.filter(|w| w.is_finite() && *w > 0.0) {
                    text_box.width = width;
                }
                if let Some(height) = height.filter(|h| h.is_finite() && *h > 0.0) {
                    text_box.height = height;
                }
                self.commit();
            }
            None => log::warn!("update_text_element: no text element {}", id),
        }
        self.tool_manager.editing_text = None;
    }

    /// Close the editor without changing anything.
    pub fn stop_editing_text(&mut self) {
        self.tool_manager.editing_text = None;
    }

    // ---- images ----

    /// Place an image, scaled down to fit the configured maximum dimension.
    pub fn add_image(
        &mut self,
        point: Point,
        source: impl Into<String>,
        width: f64,
        height: f64,
    ) -> ElementId {
        let (width, height) = ImageBox::fit_size(width, height, self.config.image_max_dimension);
        let image = ImageBox::new(point, source.into(), width, height);
        let id = self.document.add_element(Element::Image(image));
        self.commit();
        id
    }

    // ---- selection ----

    /// Select an element, or clear the selection with `None`.
    pub fn select_element(&mut self, id: Option<ElementId>) {
        self.selection = id;
    }

    pub fn selection(&self) -> Option<ElementId> {
        self.selection
    }

    // ---- history ----

    fn commit(&mut self) {
        self.history.commit(&self.document.elements, self.selection);
    }

    /// Undo the last committed change, finishing any active gesture first.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.finish_gesture();
        match self.history.undo().cloned() {
            Some(snapshot) => {
                self.document.elements = snapshot.elements;
                self.selection = snapshot.selection;
                log::info!("Undo to history entry {}", self.history.index());
                true
            }
            None => false,
        }
    }

    /// Redo the last undone change, finishing any active gesture first.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        self.finish_gesture();
        match self.history.redo().cloned() {
            Some(snapshot) => {
                self.document.elements = snapshot.elements;
                self.selection = snapshot.selection;
                log::info!("Redo to history entry {}", self.history.index());
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn history_index(&self) -> usize {
        self.history.index()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    // ---- state for rendering ----

    pub fn elements(&self) -> &[Element] {
        &self.document.elements
    }

    pub fn active_tool(&self) -> ToolKind {
        self.tool_manager.current_tool
    }

    pub fn editing_text(&self) -> Option<ElementId> {
        self.tool_manager.editing_text
    }

    pub fn zoom_level(&self) -> i32 {
        self.camera.zoom
    }

    pub fn pan(&self) -> Vec2 {
        self.camera.pan
    }

    pub fn grid_type(&self) -> GridType {
        self.grid_type
    }

    /// Snapshot of everything the renderer reads each frame.
    pub fn render_state(&self) -> RenderState<'_> {
        RenderState {
            elements: &self.document.elements,
            selection: self.selection,
            zoom: self.camera.zoom,
            pan: self.camera.pan,
            active_tool: self.tool_manager.current_tool,
            selected_shape: self.tool_manager.selected_shape,
            shapes_menu_open: self.tool_manager.shapes_menu_open,
            editing_text: self.tool_manager.editing_text,
            grid_type: self.grid_type,
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::StrokeTool;

    fn draw_stroke(canvas: &mut Canvas, points: &[(f64, f64)]) {
        canvas.start_drawing(Point::new(points[0].0, points[0].1));
        for &(x, y) in &points[1..] {
            canvas.continue_drawing(Point::new(x, y));
        }
        canvas.stop_drawing();
    }

    fn pen_canvas() -> Canvas {
        let mut canvas = Canvas::new();
        canvas.set_active_tool(ToolKind::Pen);
        canvas
    }

    #[test]
    fn test_initial_state() {
        let canvas = Canvas::new();
        assert!(canvas.document.is_empty());
        assert_eq!(canvas.history_len(), 1);
        assert_eq!(canvas.history_index(), 0);
        assert_eq!(canvas.active_tool(), ToolKind::Hand);
        assert_eq!(canvas.zoom_level(), 100);
        assert_eq!(canvas.grid_type(), GridType::Lined);
    }

    #[test]
    fn test_pen_stroke_commit() {
        let mut canvas = pen_canvas();
        draw_stroke(&mut canvas, &[(0.0, 0.0), (5.0, 5.0), (10.0, 0.0)]);

        assert_eq!(canvas.document.len(), 1);
        let stroke = canvas.elements()[0].as_stroke().unwrap();
        assert_eq!(stroke.points.len(), 3);
        assert_eq!(stroke.tool, StrokeTool::Pen);
        assert!((stroke.opacity - 1.0).abs() < f64::EPSILON);
        assert_eq!(canvas.history_len(), 2);
        assert_eq!(canvas.history().current().elements, canvas.elements());
    }

    #[test]
    fn test_marker_is_wide_and_translucent() {
        let mut canvas = Canvas::new();
        canvas.set_active_tool(ToolKind::Marker);
        draw_stroke(&mut canvas, &[(0.0, 0.0), (10.0, 0.0)]);

        let stroke = canvas.elements()[0].as_stroke().unwrap();
        assert_eq!(stroke.tool, StrokeTool::Marker);
        assert!((stroke.opacity - 0.5).abs() < f64::EPSILON);
        assert!((stroke.stroke_width - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_continue_without_start_is_noop() {
        let mut canvas = pen_canvas();
        canvas.continue_drawing(Point::new(1.0, 1.0));
        canvas.stop_drawing();
        assert!(canvas.document.is_empty());
        assert_eq!(canvas.history_len(), 1);
    }

    #[test]
    fn test_shape_drag_tracks_pointer() {
        let mut canvas = Canvas::new();
        canvas.select_shape(ShapeKind::Rectangle);
        assert_eq!(canvas.active_tool(), ToolKind::Shapes);

        canvas.start_drawing(Point::new(100.0, 100.0));
        canvas.continue_drawing(Point::new(150.0, 120.0));
        canvas.continue_drawing(Point::new(60.0, 80.0));
        canvas.stop_drawing();

        let shape = canvas.elements()[0].as_shape().unwrap();
        assert!((shape.width + 40.0).abs() < f64::EPSILON);
        assert!((shape.height + 20.0).abs() < f64::EPSILON);
        assert_eq!(canvas.history_len(), 2);
    }

    #[test]
    fn test_zero_size_shape_is_kept() {
        let mut canvas = Canvas::new();
        canvas.select_shape(ShapeKind::Circle);
        canvas.start_drawing(Point::new(10.0, 10.0));
        canvas.stop_drawing();

        let shape = canvas.elements()[0].as_shape().unwrap();
        assert!(shape.width.abs() < f64::EPSILON);
        assert!(shape.height.abs() < f64::EPSILON);
    }

    #[test]
    fn test_shapes_tool_without_kind_draws_nothing() {
        let mut canvas = Canvas::new();
        canvas.set_active_tool(ToolKind::Shapes);
        canvas.start_drawing(Point::new(10.0, 10.0));
        canvas.continue_drawing(Point::new(20.0, 20.0));
        canvas.stop_drawing();
        assert!(canvas.document.is_empty());
        assert_eq!(canvas.history_len(), 1);
    }

    #[test]
    fn test_drawing_targets_element_under_construction() {
        let mut canvas = pen_canvas();
        canvas.start_drawing(Point::new(0.0, 0.0));
        // Something else lands on top mid-gesture.
        let image = canvas.document.add_element(Element::Image(ImageBox::new(
            Point::new(500.0, 500.0),
            "x.png".to_string(),
            10.0,
            10.0,
        )));
        canvas.continue_drawing(Point::new(5.0, 0.0));
        canvas.stop_drawing();

        assert_eq!(canvas.elements()[0].as_stroke().unwrap().points.len(), 2);
        assert_eq!(canvas.elements()[1].id(), image);
    }

    #[test]
    fn test_history_round_trip() {
        let mut canvas = pen_canvas();
        draw_stroke(&mut canvas, &[(0.0, 0.0), (10.0, 10.0)]);
        canvas.select_shape(ShapeKind::Rectangle);
        draw_stroke(&mut canvas, &[(20.0, 20.0), (60.0, 70.0)]);
        canvas.add_text(Point::new(5.0, 5.0), "Text");
        canvas.add_image(Point::new(0.0, 0.0), "a.png", 1000.0, 400.0);

        let final_elements = canvas.elements().to_vec();
        let final_selection = canvas.selection();

        for _ in 0..4 {
            assert!(canvas.undo());
        }
        assert!(canvas.document.is_empty());
        assert!(canvas.selection().is_none());
        assert!(!canvas.undo());

        for _ in 0..4 {
            assert!(canvas.redo());
        }
        assert_eq!(canvas.elements(), final_elements.as_slice());
        assert_eq!(canvas.selection(), final_selection);
        assert!(!canvas.redo());
    }

    #[test]
    fn test_undo_redo_boundaries_leave_state() {
        let mut canvas = pen_canvas();
        assert!(!canvas.undo());
        assert!(canvas.document.is_empty());

        draw_stroke(&mut canvas, &[(0.0, 0.0), (10.0, 10.0)]);
        let before = canvas.elements().to_vec();
        assert!(!canvas.redo());
        assert_eq!(canvas.elements(), before.as_slice());
        assert_eq!(canvas.history_index(), 1);
    }

    #[test]
    fn test_redo_branch_discarded() {
        let mut canvas = pen_canvas();
        draw_stroke(&mut canvas, &[(0.0, 0.0), (10.0, 10.0)]); // A
        draw_stroke(&mut canvas, &[(20.0, 0.0), (30.0, 10.0)]); // B
        assert!(canvas.undo());
        let index_of_a = canvas.history_index();
        draw_stroke(&mut canvas, &[(40.0, 0.0), (50.0, 10.0)]); // C

        assert!(!canvas.redo());
        assert_eq!(canvas.history_len(), index_of_a + 2);
        assert_eq!(canvas.document.len(), 2);
    }

    #[test]
    fn test_snapshots_do_not_alias_live_document() {
        let mut canvas = pen_canvas();
        draw_stroke(&mut canvas, &[(0.0, 0.0), (10.0, 10.0)]);
        canvas.undo();
        canvas.redo();

        // Mutating the restored document must not leak into history.
        if let Some(Element::Stroke(stroke)) = canvas.document.elements.first_mut() {
            stroke.add_point(Point::new(99.0, 99.0));
        }
        assert_eq!(canvas.history().current().elements[0].as_stroke().unwrap().points.len(), 2);
    }

    #[test]
    fn test_eraser_gesture_is_one_undo_step() {
        let mut canvas = pen_canvas();
        draw_stroke(&mut canvas, &[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0), (30.0, 0.0), (40.0, 0.0)]);
        draw_stroke(&mut canvas, &[(0.0, 100.0), (10.0, 100.0), (20.0, 100.0)]);
        let before = canvas.elements().to_vec();
        let len_before = canvas.history_len();

        canvas.set_active_tool(ToolKind::Eraser);
        canvas.set_stroke_width(1.25); // radius 5
        canvas.start_drawing(Point::new(20.0, 0.0));
        assert!(canvas.tool_manager.is_erasing());
        canvas.continue_drawing(Point::new(20.0, 50.0));
        canvas.continue_drawing(Point::new(10.0, 100.0));
        canvas.stop_drawing();
        assert!(!canvas.tool_manager.is_erasing());

        let after = canvas.elements().to_vec();
        assert_ne!(after, before);
        assert_eq!(canvas.history_len(), len_before + 1);
        assert_eq!(canvas.history().current().elements, after);

        assert!(canvas.undo());
        assert_eq!(canvas.elements(), before.as_slice());
        assert!(canvas.redo());
        assert_eq!(canvas.elements(), after.as_slice());
    }

    #[test]
    fn test_eraser_miss_records_nothing() {
        let mut canvas = pen_canvas();
        draw_stroke(&mut canvas, &[(0.0, 0.0), (10.0, 0.0)]);
        let len_before = canvas.history_len();

        canvas.set_active_tool(ToolKind::Eraser);
        canvas.start_drawing(Point::new(500.0, 500.0));
        canvas.continue_drawing(Point::new(600.0, 600.0));
        canvas.stop_drawing();

        assert_eq!(canvas.document.len(), 1);
        assert_eq!(canvas.history_len(), len_before);
    }

    #[test]
    fn test_eraser_removes_rectangle_at_corner() {
        let mut canvas = Canvas::new();
        canvas.select_shape(ShapeKind::Rectangle);
        draw_stroke(&mut canvas, &[(10.0, 10.0), (60.0, 60.0)]);

        canvas.set_active_tool(ToolKind::Eraser);
        canvas.start_drawing(Point::new(200.0, 200.0));
        canvas.stop_drawing();
        assert_eq!(canvas.document.len(), 1);

        canvas.start_drawing(Point::new(10.0, 10.0));
        canvas.stop_drawing();
        assert!(canvas.document.is_empty());
    }

    #[test]
    fn test_switching_tool_mid_erase_commits_once() {
        let mut canvas = pen_canvas();
        draw_stroke(&mut canvas, &[(0.0, 0.0), (10.0, 0.0)]);
        let len_before = canvas.history_len();

        canvas.set_active_tool(ToolKind::Eraser);
        canvas.start_drawing(Point::new(0.0, 0.0));
        canvas.set_active_tool(ToolKind::Pen);
        assert!(!canvas.tool_manager.is_drawing());
        assert_eq!(canvas.history_len(), len_before + 1);
    }

    #[test]
    fn test_leaving_eraser_clears_text_editing() {
        let mut canvas = Canvas::new();
        let id = canvas.add_text(Point::new(0.0, 0.0), "Text");
        canvas.set_active_tool(ToolKind::Eraser);
        canvas.start_editing_text(id);
        canvas.set_active_tool(ToolKind::Select);
        assert!(canvas.editing_text().is_none());
    }

    #[test]
    fn test_panning_moves_view_only() {
        let mut canvas = Canvas::new();
        canvas.start_panning(Point::new(100.0, 100.0));
        canvas.continue_panning(Point::new(110.0, 90.0));
        canvas.continue_panning(Point::new(130.0, 95.0));
        canvas.stop_panning();
        canvas.continue_panning(Point::new(500.0, 500.0));

        assert!((canvas.pan().x - 30.0).abs() < f64::EPSILON);
        assert!((canvas.pan().y + 5.0).abs() < f64::EPSILON);
        assert_eq!(canvas.history_len(), 1);
    }

    #[test]
    fn test_zoom_controls() {
        let mut canvas = Canvas::new();
        canvas.set_zoom_level(1000);
        assert_eq!(canvas.zoom_level(), 300);
        canvas.set_zoom_level(-50);
        assert_eq!(canvas.zoom_level(), 25);
        canvas.set_zoom_level(137);
        assert_eq!(canvas.zoom_level(), 137);

        canvas.start_panning(Point::ZERO);
        canvas.continue_panning(Point::new(40.0, 40.0));
        canvas.stop_panning();
        canvas.reset_zoom();
        assert_eq!(canvas.zoom_level(), 100);
        assert_eq!(canvas.pan(), Vec2::ZERO);
    }

    #[test]
    fn test_text_edit_commit_and_undo() {
        let mut canvas = Canvas::new();
        let id = canvas.add_text(Point::new(5.0, 5.0), "Text");

        assert_eq!(canvas.document.len(), 1);
        assert_eq!(canvas.selection(), Some(id));
        assert_eq!(canvas.editing_text(), Some(id));
        let text = canvas.elements()[0].as_text().unwrap();
        assert!((text.font_size - 16.0).abs() < f64::EPSILON);

        canvas.update_text_element(id, "Hello", None, None);
        assert_eq!(canvas.elements()[0].as_text().unwrap().text, "Hello");
        assert!(canvas.editing_text().is_none());

        assert!(canvas.undo());
        assert_eq!(canvas.elements()[0].as_text().unwrap().text, "Text");
        assert!(canvas.undo());
        assert!(canvas.document.is_empty());
    }

    #[test]
    fn test_update_unknown_text_is_noop() {
        let mut canvas = Canvas::new();
        let id = canvas.add_text(Point::new(5.0, 5.0), "Text");
        let len_before = canvas.history_len();

        canvas.update_text_element(uuid::Uuid::new_v4(), "Nope", Some(10.0), None);
        assert!(canvas.editing_text().is_none());
        assert_eq!(canvas.history_len(), len_before);
        assert_eq!(canvas.document.get(id).unwrap().as_text().unwrap().text, "Text");
    }

    #[test]
    fn test_update_text_resizes_when_given() {
        let mut canvas = Canvas::new();
        let id = canvas.add_text(Point::new(0.0, 0.0), "Text");
        canvas.update_text_element(id, "Longer text", Some(320.0), Some(0.0));

        let text = canvas.elements()[0].as_text().unwrap();
        assert!((text.width - 320.0).abs() < f64::EPSILON);
        assert!((text.height - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_text_tool_edits_existing_box() {
        let mut canvas = Canvas::new();
        canvas.set_active_tool(ToolKind::Text);
        let first = canvas.text_tool_down(Point::new(10.0, 10.0));
        canvas.stop_editing_text();
        canvas.select_element(None);

        let again = canvas.text_tool_down(Point::new(50.0, 20.0));
        assert_eq!(again, first);
        assert_eq!(canvas.document.len(), 1);
        assert_eq!(canvas.editing_text(), Some(first));
        assert_eq!(canvas.selection(), Some(first));

        let second = canvas.text_tool_down(Point::new(10.0, 300.0));
        assert_ne!(second, first);
        assert_eq!(canvas.document.len(), 2);
        assert_eq!(canvas.elements()[1].as_text().unwrap().text, "Text");
    }

    #[test]
    fn test_image_scaling() {
        let mut canvas = Canvas::new();
        let wide = canvas.add_image(Point::new(0.0, 0.0), "wide.png", 1000.0, 400.0);
        let tall = canvas.add_image(Point::new(0.0, 0.0), "tall.png", 300.0, 800.0);

        let bounds = canvas.document.get(wide).unwrap().bounds();
        assert!((bounds.width() - 500.0).abs() < 1e-9);
        assert!((bounds.height() - 200.0).abs() < 1e-9);

        let bounds = canvas.document.get(tall).unwrap().bounds();
        assert!((bounds.width() - 187.5).abs() < 1e-9);
        assert!((bounds.height() - 500.0).abs() < 1e-9);
        assert_eq!(canvas.history_len(), 3);
    }

    #[test]
    fn test_stale_selection_tolerated() {
        let mut canvas = Canvas::new();
        let ghost = uuid::Uuid::new_v4();
        canvas.select_element(Some(ghost));
        assert_eq!(canvas.selection(), Some(ghost));
        canvas.select_element(None);
        assert!(canvas.selection().is_none());
    }

    #[test]
    fn test_config_changes_eraser_radius() {
        let config = EngineConfig {
            eraser_radius_multiplier: 10.0,
            ..EngineConfig::default()
        };
        let mut canvas = Canvas::with_config(config).unwrap();
        canvas.set_active_tool(ToolKind::Pen);
        draw_stroke(&mut canvas, &[(0.0, 0.0), (1.0, 0.0)]);

        canvas.set_active_tool(ToolKind::Eraser);
        // Width 2 x 10 = radius 20.
        canvas.start_drawing(Point::new(15.0, 0.0));
        canvas.stop_drawing();
        assert!(canvas.document.is_empty());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EngineConfig {
            min_zoom: 400,
            ..EngineConfig::default()
        };
        assert!(matches!(
            Canvas::with_config(config),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_undo_mid_erase_finishes_gesture_first() {
        let mut canvas = pen_canvas();
        draw_stroke(&mut canvas, &[(0.0, 0.0), (10.0, 0.0)]);

        canvas.set_active_tool(ToolKind::Eraser);
        canvas.start_drawing(Point::new(0.0, 0.0));
        assert!(canvas.document.is_empty());

        // Undo while the pointer is still down.
        assert!(canvas.undo());
        assert!(!canvas.tool_manager.is_drawing());
        assert_eq!(canvas.document.len(), 1);
        assert!(canvas.can_redo());

        // The late pointer-up must not clobber the redo branch.
        canvas.stop_drawing();
        assert!(canvas.can_redo());
        assert!(canvas.redo());
        assert!(canvas.document.is_empty());
        assert!(canvas.undo());
        assert_eq!(canvas.document.len(), 1);
    }

    #[test]
    fn test_undo_mid_stroke_commits_then_undoes() {
        let mut canvas = pen_canvas();
        canvas.start_drawing(Point::new(0.0, 0.0));
        canvas.continue_drawing(Point::new(5.0, 0.0));

        assert!(canvas.undo());
        assert!(canvas.document.is_empty());
        canvas.continue_drawing(Point::new(9.0, 0.0));
        assert!(canvas.document.is_empty());

        assert!(canvas.redo());
        assert_eq!(canvas.elements()[0].as_stroke().unwrap().points.len(), 2);
    }

    #[test]
    fn test_redo_mid_pan_ends_pan() {
        let mut canvas = Canvas::new();
        canvas.add_image(Point::ZERO, "a.png", 10.0, 10.0);
        canvas.undo();
        canvas.start_panning(Point::ZERO);
        assert!(canvas.redo());
        assert!(!canvas.tool_manager.is_panning());
        assert_eq!(canvas.document.len(), 1);
    }

    #[test]
    fn test_update_text_ignores_unusable_sizes() {
        let mut canvas = Canvas::new();
        let id = canvas.add_text(Point::new(0.0, 0.0), "Text");
        canvas.update_text_element(id, "Hi", Some(f64::NAN), Some(-5.0));

        let text = canvas.elements()[0].as_text().unwrap();
        assert_eq!(text.text, "Hi");
        assert!((text.width - 200.0).abs() < f64::EPSILON);
        assert!((text.height - 30.0).abs() < f64::EPSILON);

        canvas.update_text_element(id, "Hi", Some(f64::INFINITY), Some(45.0));
        let text = canvas.elements()[0].as_text().unwrap();
        assert!((text.width - 200.0).abs() < f64::EPSILON);
        assert!((text.height - 45.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_render_state_serializes() {
        let mut canvas = Canvas::new();
        canvas.add_text(Point::new(1.0, 2.0), "Text");
        let json = serde_json::to_value(canvas.render_state()).unwrap();
        assert_eq!(json["zoom"], 100);
        assert_eq!(json["active_tool"], "hand");
        assert_eq!(json["grid_type"], "lined");
        assert_eq!(json["elements"][0]["kind"], "text");
        assert_eq!(json["can_undo"], true);
    }

    #[test]
    fn test_document_json_round_trip() {
        let mut canvas = pen_canvas();
        draw_stroke(&mut canvas, &[(0.0, 0.0), (10.0, 10.0)]);
        let json = canvas.document.to_json().unwrap();
        let restored = CanvasDocument::from_json(&json).unwrap();
        assert_eq!(restored, canvas.document);
    }
}
