//! Inkboard Core Library
//!
//! Canvas state engine for the Inkboard whiteboard: elements, tools, the
//! eraser, view state and undo/redo history. Rendering is left to the host.

pub mod action;
pub mod camera;
pub mod canvas;
pub mod config;
pub mod eraser;
pub mod history;
pub mod input;
pub mod shapes;
pub mod shortcuts;
pub mod tools;

pub use action::Action;
pub use camera::Camera;
pub use canvas::{Canvas, CanvasDocument, GridType, RenderState};
pub use config::{ConfigError, EngineConfig};
pub use eraser::{EraserBrush, erase_at};
pub use history::{History, HistorySnapshot};
pub use input::{Modifiers, PointerEvent, SurfaceRect};
pub use shapes::{ColorParseError, Element, ElementId, SerializableColor};
pub use shortcuts::{KeyInput, Shortcut, ShortcutRegistry, action_for_key};
pub use tools::{Gesture, ToolKind, ToolManager};
