//! Keyboard shortcut registry and key-to-action mapping.

use crate::action::Action;
use crate::canvas::Canvas;
use crate::input::Modifiers;
use crate::tools::ToolKind;
use serde::{Deserialize, Serialize};

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    /// Requires Ctrl (or Cmd on macOS).
    pub command: bool,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(key: &'static str, command: bool, description: &'static str) -> Self {
        Self {
            key,
            command,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+Z").
    pub fn format(&self) -> String {
        if self.command {
            format!("Ctrl+{}", self.key)
        } else {
            self.key.to_string()
        }
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("V", false, "Select tool"),
            Shortcut::new("H", false, "Hand tool"),
            Shortcut::new("P", false, "Pen"),
            Shortcut::new("M", false, "Marker"),
            Shortcut::new("E", false, "Eraser"),
            Shortcut::new("S", false, "Shapes"),
            Shortcut::new("T", false, "Text"),
            Shortcut::new("I", false, "Image"),
            Shortcut::new("=", true, "Zoom in"),
            Shortcut::new("-", true, "Zoom out"),
            Shortcut::new("0", true, "Reset zoom"),
            Shortcut::new("Z", true, "Undo"),
            Shortcut::new("Y", true, "Redo"),
        ]
    }
}

/// A key press as reported by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyInput {
    /// Logical key, e.g. `"z"` or `"="`.
    pub key: String,
    #[serde(default)]
    pub modifiers: Modifiers,
    /// Focus is in a text field owned by the host.
    #[serde(default)]
    pub in_text_input: bool,
}

impl KeyInput {
    pub fn new(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
            in_text_input: false,
        }
    }
}

/// Map a key press to the action it triggers, if any.
pub fn action_for_key(key: &str, modifiers: Modifiers) -> Option<Action> {
    let key = key.to_lowercase();

    if modifiers.command() {
        return match key.as_str() {
            "=" | "+" => Some(Action::ZoomIn),
            "-" => Some(Action::ZoomOut),
            "0" => Some(Action::ResetZoom),
            "z" => Some(Action::Undo),
            "y" => Some(Action::Redo),
            _ => None,
        };
    }

    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => ToolKind::from_shortcut(c).map(|tool| Action::SetActiveTool { tool }),
        _ => None,
    }
}

impl Canvas {
    /// Handle a key press. Returns `true` if it triggered an action.
    ///
    /// Nothing fires while text is being typed, either in the canvas text
    /// editor or in a host input field.
    pub fn handle_key(&mut self, input: &KeyInput) -> bool {
        if input.in_text_input || self.editing_text().is_some() {
            return false;
        }
        match action_for_key(&input.key, input.modifiers) {
            Some(action) => {
                log::debug!("Shortcut {:?} -> {:?}", input.key, action);
                self.dispatch(action);
                true
            }
            None => false,
        }
    }
}
