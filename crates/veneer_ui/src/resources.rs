//! # Metric Providers
//!
//! Dimensions read fonts and images through these traits and never write
//! through them. [`ResourceCache`] is the in-memory registry used by
//! [`WidgetTree`](crate::widget::WidgetTree); tests and hosts with their own
//! font stack can implement [`ResourceProvider`] directly.

use std::collections::HashMap;

use veneer_core::{Size, Vec2};

use crate::config::{FontConfig, ImageConfig, SkinConfig};

/// Font metrics consumed by font dimensions.
pub trait Font {
    /// Registry name. Two fonts with the same name are the same font.
    fn name(&self) -> &str;

    /// Distance between consecutive baselines, in pixels.
    fn line_spacing(&self) -> f32;

    /// Distance from the top of a line to its baseline, in pixels.
    fn baseline(&self) -> f32;

    /// Horizontal extent of `text` rendered on a single line, in pixels.
    fn text_extent(&self, text: &str) -> f32;
}

/// Image metrics consumed by image dimensions.
pub trait Image {
    /// Size the image is drawn at.
    fn rendered_size(&self) -> Size;

    /// Offset applied when the image is drawn.
    fn rendered_offset(&self) -> Vec2;
}

/// Name-keyed access to fonts and images, plus the display size.
pub trait ResourceProvider {
    /// Looks up a font by name.
    fn font(&self, name: &str) -> Option<&dyn Font>;

    /// Looks up an image by name.
    fn image(&self, name: &str) -> Option<&dyn Image>;

    /// Size of the root container that parentless widgets are laid out in.
    fn display_size(&self) -> Size;
}

// =============================================================================
// BitmapFont
// =============================================================================

/// A font with fixed per-glyph advances, scaled by its point size.
///
/// Metrics are authored at `native_size`; changing the point size scales all
/// of them. That scaling is the "font size changed" event that layout caches
/// react to.
#[derive(Debug, Clone, PartialEq)]
pub struct BitmapFont {
    name: String,
    native_size: f32,
    point_size: f32,
    line_spacing: f32,
    baseline: f32,
    advance: f32,
    glyph_advances: HashMap<char, f32>,
}

impl BitmapFont {
    /// Creates a font with metrics derived from its native size.
    #[must_use]
    pub fn new(name: impl Into<String>, native_size: f32) -> Self {
        Self {
            name: name.into(),
            native_size,
            point_size: native_size,
            line_spacing: native_size * 1.25,
            baseline: native_size * 0.8,
            advance: native_size * 0.5,
            glyph_advances: HashMap::new(),
        }
    }

    /// Sets the metrics at native size.
    #[must_use]
    pub fn with_metrics(mut self, line_spacing: f32, baseline: f32, advance: f32) -> Self {
        self.line_spacing = line_spacing;
        self.baseline = baseline;
        self.advance = advance;
        self
    }

    /// Overrides the advance of one glyph at native size.
    #[must_use]
    pub fn with_glyph_advance(mut self, glyph: char, advance: f32) -> Self {
        self.glyph_advances.insert(glyph, advance);
        self
    }

    /// Returns the current point size.
    #[must_use]
    pub fn point_size(&self) -> f32 {
        self.point_size
    }

    /// Changes the rendering size.
    pub fn set_point_size(&mut self, point_size: f32) {
        self.point_size = point_size;
    }

    fn scale(&self) -> f32 {
        if veneer_core::unified::is_near_zero(self.native_size) {
            0.0
        } else {
            self.point_size / self.native_size
        }
    }

    fn from_config(config: &FontConfig) -> Self {
        let mut font = Self::new(config.name.clone(), config.native_size);
        if let Some(line_spacing) = config.line_spacing {
            font.line_spacing = line_spacing;
        }
        if let Some(baseline) = config.baseline {
            font.baseline = baseline;
        }
        if let Some(advance) = config.advance {
            font.advance = advance;
        }
        if let Some(point_size) = config.point_size {
            font.point_size = point_size;
        }
        font
    }
}

impl Font for BitmapFont {
    fn name(&self) -> &str {
        &self.name
    }

    fn line_spacing(&self) -> f32 {
        self.line_spacing * self.scale()
    }

    fn baseline(&self) -> f32 {
        self.baseline * self.scale()
    }

    fn text_extent(&self, text: &str) -> f32 {
        let native: f32 = text
            .chars()
            .map(|c| self.glyph_advances.get(&c).copied().unwrap_or(self.advance))
            .sum();
        native * self.scale()
    }
}

// =============================================================================
// ImageInfo
// =============================================================================

/// Rendered geometry of a named image.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ImageInfo {
    /// Size the image is drawn at.
    pub size: Size,
    /// Offset applied when drawing.
    pub offset: Vec2,
}

impl ImageInfo {
    /// Creates image geometry.
    #[must_use]
    pub const fn new(size: Size, offset: Vec2) -> Self {
        Self { size, offset }
    }
}

impl Image for ImageInfo {
    fn rendered_size(&self) -> Size {
        self.size
    }

    fn rendered_offset(&self) -> Vec2 {
        self.offset
    }
}

impl From<&ImageConfig> for ImageInfo {
    fn from(config: &ImageConfig) -> Self {
        Self::new(
            Size::new(config.width, config.height),
            Vec2::new(config.offset_x, config.offset_y),
        )
    }
}

// =============================================================================
// ResourceCache
// =============================================================================

/// In-memory font and image registry.
#[derive(Debug, Clone, Default)]
pub struct ResourceCache {
    fonts: HashMap<String, BitmapFont>,
    images: HashMap<String, ImageInfo>,
    display_size: Size,
}

impl ResourceCache {
    /// Creates an empty registry for a display of the given size.
    #[must_use]
    pub fn new(display_size: Size) -> Self {
        Self {
            fonts: HashMap::new(),
            images: HashMap::new(),
            display_size,
        }
    }

    /// Creates a registry holding every font and image in `config`.
    #[must_use]
    pub fn from_config(config: &SkinConfig) -> Self {
        let mut cache = Self::new(config.display_size());
        for font in &config.fonts {
            cache.add_font(BitmapFont::from_config(font));
        }
        for image in &config.images {
            cache.add_image(image.name.clone(), ImageInfo::from(image));
        }
        cache
    }

    /// Registers a font under its own name, replacing any previous one.
    pub fn add_font(&mut self, font: BitmapFont) {
        self.fonts.insert(font.name.clone(), font);
    }

    /// Registers an image, replacing any previous one with the same name.
    pub fn add_image(&mut self, name: impl Into<String>, image: ImageInfo) {
        self.images.insert(name.into(), image);
    }

    /// Returns mutable access to a registered font.
    pub fn font_mut(&mut self, name: &str) -> Option<&mut BitmapFont> {
        self.fonts.get_mut(name)
    }

    /// Changes the display size.
    pub fn set_display_size(&mut self, size: Size) {
        self.display_size = size;
    }
}

impl ResourceProvider for ResourceCache {
    fn font(&self, name: &str) -> Option<&dyn Font> {
        self.fonts.get(name).map(|font| font as &dyn Font)
    }

    fn image(&self, name: &str) -> Option<&dyn Image> {
        self.images.get(name).map(|image| image as &dyn Image)
    }

    fn display_size(&self) -> Size {
        self.display_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitmap_font_scales_with_point_size() {
        let mut font = BitmapFont::new("mono", 10.0)
            .with_metrics(12.0, 8.0, 6.0)
            .with_glyph_advance('i', 2.0);

        assert_eq!(font.line_spacing(), 12.0);
        assert_eq!(font.baseline(), 8.0);
        assert_eq!(font.text_extent("hi"), 8.0);
        assert_eq!(font.text_extent(""), 0.0);

        font.set_point_size(20.0);
        assert_eq!(font.line_spacing(), 24.0);
        assert_eq!(font.text_extent("hi"), 16.0);
    }

    #[test]
    fn test_cache_lookup() {
        let mut cache = ResourceCache::new(Size::new(800.0, 600.0));
        cache.add_font(BitmapFont::new("sans", 12.0));
        cache.add_image("knob", ImageInfo::new(Size::new(16.0, 24.0), Vec2::new(1.0, 2.0)));

        assert_eq!(cache.font("sans").map(|font| font.name()), Some("sans"));
        assert!(cache.font("serif").is_none());
        assert_eq!(cache.image("knob").unwrap().rendered_size(), Size::new(16.0, 24.0));
        assert!(cache.image("missing").is_none());
        assert_eq!(cache.display_size(), Size::new(800.0, 600.0));
    }
}
