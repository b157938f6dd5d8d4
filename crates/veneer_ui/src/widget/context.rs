//! Core widget types and the context trait dimensions query.

use std::collections::HashMap;

use veneer_core::coord;
use veneer_core::{Alignment, Rect, Size, URect, UVector2, Vec2};

use crate::resources::{Font, ResourceProvider};

/// Unique identifier for a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(pub u64);

impl WidgetId {
    /// Creates a new widget ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// A property value stored as text, tagged with its data type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyValue {
    /// Data type name, e.g. `bool`, `float`, `UDim`, `URect`.
    pub type_name: String,
    /// The value in its text form.
    pub value: String,
}

impl PropertyValue {
    /// Creates a property value.
    #[must_use]
    pub fn new(type_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            value: value.into(),
        }
    }
}

/// Common widget state.
#[derive(Debug, Clone)]
pub struct WidgetState {
    /// Widget identifier.
    pub id: WidgetId,
    /// Name, unique among siblings. Child lookups match on it.
    pub name: String,
    /// Unified area relative to the parent.
    pub area: URect,
    /// Horizontal placement within the parent's slack.
    pub horizontal_alignment: Alignment,
    /// Vertical placement within the parent's slack.
    pub vertical_alignment: Alignment,
    /// Name of the assigned font, if any.
    pub font: Option<String>,
    /// Text content.
    pub text: String,
    /// Named properties.
    pub properties: HashMap<String, PropertyValue>,
    /// Parent widget ID (None for root).
    pub parent: Option<WidgetId>,
}

impl WidgetState {
    /// Creates a new widget state covering its whole parent.
    #[must_use]
    pub fn new(id: WidgetId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            area: URect::new(
                veneer_core::ScalarUnit::ZERO,
                veneer_core::ScalarUnit::ZERO,
                veneer_core::ScalarUnit::FULL,
                veneer_core::ScalarUnit::FULL,
            ),
            horizontal_alignment: Alignment::Start,
            vertical_alignment: Alignment::Start,
            font: None,
            text: String::new(),
            properties: HashMap::new(),
            parent: None,
        }
    }

    /// Sets the unified area.
    #[must_use]
    pub fn with_area(mut self, area: URect) -> Self {
        self.area = area;
        self
    }

    /// Sets both alignments.
    #[must_use]
    pub fn with_alignment(mut self, horizontal: Alignment, vertical: Alignment) -> Self {
        self.horizontal_alignment = horizontal;
        self.vertical_alignment = vertical;
        self
    }

    /// Assigns a font by name.
    #[must_use]
    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = Some(font.into());
        self
    }

    /// Sets the text content.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Sets a property.
    #[must_use]
    pub fn with_property(
        mut self,
        name: impl Into<String>,
        type_name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.properties
            .insert(name.into(), PropertyValue::new(type_name, value));
        self
    }
}

/// What a dimension may ask of the widget it is evaluated for.
///
/// Lookups that can miss return `Option`; dimensions turn a miss into their
/// documented fallback value.
pub trait Widget {
    /// Returns the widget's name.
    fn name(&self) -> &str;

    /// Looks up a descendant by `/`-separated name path.
    fn child(&self, path: &str) -> Option<Box<dyn Widget + '_>>;

    /// Returns the parent widget, if any.
    fn parent(&self) -> Option<Box<dyn Widget + '_>>;

    /// Returns the resolved size in pixels.
    fn pixel_size(&self) -> Size;

    /// Returns the parent's pixel size, or the display size for a root.
    fn parent_pixel_size(&self) -> Size;

    /// Returns the unified area relative to the parent.
    fn area(&self) -> URect;

    /// Returns the unified top-left position relative to the parent.
    fn position(&self) -> UVector2 {
        self.area().position()
    }

    /// Horizontal placement within the parent's slack.
    fn horizontal_alignment(&self) -> Alignment {
        Alignment::Start
    }

    /// Vertical placement within the parent's slack.
    fn vertical_alignment(&self) -> Alignment {
        Alignment::Start
    }

    /// Name of the assigned font, if any.
    fn font_name(&self) -> Option<&str>;

    /// Text content.
    fn text(&self) -> &str;

    /// Text value of a property.
    fn property(&self, name: &str) -> Option<&str>;

    /// Data type name of a property.
    fn property_type_name(&self, name: &str) -> Option<&str>;
}

/// Resolves the font assigned to `widget` through `resources`.
#[must_use]
pub fn widget_font<'r>(
    widget: &dyn Widget,
    resources: &'r dyn ResourceProvider,
) -> Option<&'r dyn Font> {
    widget.font_name().and_then(|name| resources.font(name))
}

/// Runs `f` on the widget at `path` below `widget`, or on `widget` itself
/// when `path` is absent or empty. Returns `None` if the path does not
/// resolve.
pub fn with_target<R>(
    widget: &dyn Widget,
    path: Option<&str>,
    f: impl FnOnce(&dyn Widget) -> R,
) -> Option<R> {
    match path {
        None | Some("") => Some(f(widget)),
        Some(path) => widget.child(path).map(|child| f(child.as_ref())),
    }
}

/// Returns the absolute screen rectangle of `widget`.
#[must_use]
pub fn widget_screen_rect(widget: &dyn Widget, resources: &dyn ResourceProvider) -> Rect {
    Rect::from_pos_size(resolve_widget_origin(widget, resources), widget.pixel_size())
}

/// Computes the absolute screen-space origin of `widget`.
///
/// The widget is placed inside its parent's screen rectangle, or inside a
/// display-sized root rectangle at the origin when it has no parent. The
/// result is pixel-aligned.
#[must_use]
pub fn resolve_widget_origin(widget: &dyn Widget, resources: &dyn ResourceProvider) -> Vec2 {
    let parent_area = match widget.parent() {
        Some(parent) => widget_screen_rect(parent.as_ref(), resources),
        None => Rect::from_pos_size(Vec2::ZERO, resources.display_size()),
    };

    coord::resolve_origin(
        parent_area,
        widget.position(),
        widget.pixel_size(),
        widget.horizontal_alignment(),
        widget.vertical_alignment(),
    )
}
