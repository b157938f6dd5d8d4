//! # Skin Configuration
//!
//! Loaded once at startup from TOML. Every key is optional.
//!
//! ```toml
//! display_width = 1920
//! display_height = 1080
//! pixel_align = true
//! max_nesting_depth = 32
//!
//! [[fonts]]
//! name = "sans-12"
//! native_size = 12
//! line_spacing = 15
//!
//! [[images]]
//! name = "button-left"
//! width = 8
//! height = 24
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use veneer_core::Size;

use crate::error::{DimensionError, DimensionResult};

/// Default limit on how deeply dimension elements may nest.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 32;

/// Top-level skin configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkinConfig {
    /// Width of the root container.
    pub display_width: f32,
    /// Height of the root container.
    pub display_height: f32,
    /// Round widget geometry to whole pixels.
    pub pixel_align: bool,
    /// Maximum nesting of dimension elements accepted when reading skins.
    pub max_nesting_depth: usize,
    /// Fonts to register.
    pub fonts: Vec<FontConfig>,
    /// Images to register.
    pub images: Vec<ImageConfig>,
}

impl Default for SkinConfig {
    fn default() -> Self {
        Self {
            display_width: 1280.0,
            display_height: 720.0,
            pixel_align: true,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            fonts: Vec::new(),
            images: Vec::new(),
        }
    }
}

impl SkinConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`DimensionError::InvalidConfig`] if the text is not valid
    /// TOML, does not match the schema, or fails validation.
    pub fn from_toml_str(text: &str) -> DimensionResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| DimensionError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`DimensionError::InvalidConfig`] if the file cannot be read
    /// or its contents are invalid.
    pub fn load(path: impl AsRef<Path>) -> DimensionResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            DimensionError::InvalidConfig(format!("{}: {e}", path.display()))
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(
            "loaded skin config from {} ({} fonts, {} images)",
            path.display(),
            config.fonts.len(),
            config.images.len()
        );
        Ok(config)
    }

    /// Returns the root container size.
    #[must_use]
    pub fn display_size(&self) -> Size {
        Size::new(self.display_width, self.display_height)
    }

    fn validate(&self) -> DimensionResult<()> {
        if self.display_width < 0.0 || self.display_height < 0.0 {
            return Err(DimensionError::InvalidConfig(format!(
                "display size {}x{} is negative",
                self.display_width, self.display_height
            )));
        }
        if self.max_nesting_depth == 0 {
            return Err(DimensionError::InvalidConfig(
                "max_nesting_depth must be at least 1".to_owned(),
            ));
        }
        if let Some(font) = self.fonts.iter().find(|font| font.native_size <= 0.0) {
            return Err(DimensionError::InvalidConfig(format!(
                "font `{}` has non-positive native_size",
                font.name
            )));
        }
        Ok(())
    }
}

/// A font entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontConfig {
    /// Registry name.
    pub name: String,
    /// Size the metrics below are authored at.
    pub native_size: f32,
    /// Initial rendering size; defaults to `native_size`.
    #[serde(default)]
    pub point_size: Option<f32>,
    /// Line spacing at native size.
    #[serde(default)]
    pub line_spacing: Option<f32>,
    /// Baseline at native size.
    #[serde(default)]
    pub baseline: Option<f32>,
    /// Average glyph advance at native size.
    #[serde(default)]
    pub advance: Option<f32>,
}

/// An image entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Registry name.
    pub name: String,
    /// Rendered width.
    pub width: f32,
    /// Rendered height.
    pub height: f32,
    /// Rendered horizontal offset.
    #[serde(default)]
    pub offset_x: f32,
    /// Rendered vertical offset.
    #[serde(default)]
    pub offset_y: f32,
}
