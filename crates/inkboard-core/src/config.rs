//! Engine configuration.

use crate::camera::{MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};
use crate::shapes::TextBox;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Tunable constants of the canvas engine.
///
/// Every field has a default, so a config file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Eraser brush radius as a multiple of the current stroke width.
    pub eraser_radius_multiplier: f64,
    /// Subdivisions used when probing a stroke segment against the eraser.
    pub eraser_segment_samples: usize,
    /// Longer side of placed images is scaled down to this.
    pub image_max_dimension: f64,
    /// Stroke width the marker tool draws with.
    pub marker_stroke_width: f64,
    pub text_default_width: f64,
    pub text_default_height: f64,
    /// New text uses `text_base_font_size + stroke_width`.
    pub text_base_font_size: f64,
    /// Content of a freshly placed text box.
    pub text_placeholder: String,
    pub min_zoom: i32,
    pub max_zoom: i32,
    pub zoom_step: i32,
    /// Maximum number of undo snapshots to keep (`None` = unlimited).
    pub max_history: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            eraser_radius_multiplier: 4.0,
            eraser_segment_samples: 5,
            image_max_dimension: 500.0,
            marker_stroke_width: 8.0,
            text_default_width: TextBox::DEFAULT_WIDTH,
            text_default_height: TextBox::DEFAULT_HEIGHT,
            text_base_font_size: TextBox::BASE_FONT_SIZE,
            text_placeholder: "Text".to_string(),
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            zoom_step: ZOOM_STEP,
            max_history: None,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&json)?;
        log::debug!("Loaded engine config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Check that the values are usable together.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_zoom <= 0 || self.min_zoom > self.max_zoom {
            return Err(ConfigError::Invalid(format!(
                "zoom range {}..={} is empty or non-positive",
                self.min_zoom, self.max_zoom
            )));
        }
        if self.zoom_step <= 0 {
            return Err(ConfigError::Invalid("zoom_step must be positive".to_string()));
        }
        if self.eraser_segment_samples == 0 {
            return Err(ConfigError::Invalid(
                "eraser_segment_samples must be at least 1".to_string(),
            ));
        }
        if !(self.eraser_radius_multiplier.is_finite() && self.eraser_radius_multiplier > 0.0)
            || !(self.image_max_dimension.is_finite() && self.image_max_dimension > 0.0)
        {
            return Err(ConfigError::Invalid(
                "eraser_radius_multiplier and image_max_dimension must be positive".to_string(),
            ));
        }
        let sizes = [
            ("marker_stroke_width", self.marker_stroke_width),
            ("text_default_width", self.text_default_width),
            ("text_default_height", self.text_default_height),
            ("text_base_font_size", self.text_base_font_size),
        ];
        if let Some((name, value)) = sizes.iter().find(|(_, v)| !(v.is_finite() && *v > 0.0)) {
            return Err(ConfigError::Invalid(format!(
                "{name} must be a positive number, got {value}"
            )));
        }
        if self.max_history == Some(0) {
            return Err(ConfigError::Invalid("max_history must keep at least one snapshot".to_string()));
        }
        Ok(())
    }
}
