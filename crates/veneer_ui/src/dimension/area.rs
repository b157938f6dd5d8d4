//! # Component Areas
//!
//! Four semantic dimensions that together place a rectangle inside a widget:
//!
//! ```text
//!   left ──┐        ┌── right_or_width (RightEdge: an edge, else a width)
//!          ▼        ▼
//!   top ─► ┌────────┐
//!          │        │
//!          └────────┘ ◄─ bottom_or_height (BottomEdge: an edge, else a height)
//! ```
//!
//! An area may instead name a `URect` property on the widget, which wins when
//! it is present and parses.

use serde::{Deserialize, Serialize};
use veneer_core::{coord, Rect, ScalarUnit, URect};

use super::{DimensionNode, DimensionRole, EvalContext, SemanticDimension, UnifiedDim};
use crate::config::DEFAULT_MAX_NESTING_DEPTH;
use crate::error::DimensionResult;
use crate::resources::{Font, ResourceProvider};
use crate::widget::Widget;
use crate::xml::{Element, XmlSink};

/// A rectangle defined by dimensions, relative to a widget or container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentArea {
    /// Left edge.
    pub left: SemanticDimension,
    /// Top edge.
    pub top: SemanticDimension,
    /// Right edge when its role is `RightEdge`, otherwise the width.
    pub right_or_width: SemanticDimension,
    /// Bottom edge when its role is `BottomEdge`, otherwise the height.
    pub bottom_or_height: SemanticDimension,
    /// Name of a `URect` property used instead of the dimensions.
    pub area_property: Option<String>,
}

impl Default for ComponentArea {
    /// Covers the whole widget.
    fn default() -> Self {
        Self {
            left: SemanticDimension::new(DimensionNode::Literal(0.0), DimensionRole::LeftEdge),
            top: SemanticDimension::new(DimensionNode::Literal(0.0), DimensionRole::TopEdge),
            right_or_width: SemanticDimension::new(
                UnifiedDim::new(ScalarUnit::FULL, DimensionRole::Width),
                DimensionRole::Width,
            ),
            bottom_or_height: SemanticDimension::new(
                UnifiedDim::new(ScalarUnit::FULL, DimensionRole::Height),
                DimensionRole::Height,
            ),
            area_property: None,
        }
    }
}

impl ComponentArea {
    /// Element name in skin markup.
    pub const ELEMENT: &'static str = "Area";
    /// Element naming a property to read the area from.
    pub const PROPERTY_ELEMENT: &'static str = "AreaProperty";

    /// Creates an area from four dimensions.
    #[must_use]
    pub fn new(
        left: SemanticDimension,
        top: SemanticDimension,
        right_or_width: SemanticDimension,
        bottom_or_height: SemanticDimension,
    ) -> Self {
        Self {
            left,
            top,
            right_or_width,
            bottom_or_height,
            area_property: None,
        }
    }

    /// Reads the area from a `URect` property when the widget has one.
    #[must_use]
    pub fn with_area_property(mut self, name: impl Into<String>) -> Self {
        self.area_property = Some(name.into());
        self
    }

    /// Resolves to a pixel rectangle relative to the widget's top-left.
    ///
    /// # Errors
    ///
    /// Propagates the first failing dimension.
    pub fn pixel_rect(&self, ctx: &EvalContext<'_>) -> DimensionResult<Rect> {
        if let Some(rect) = self.property_rect(ctx.widget) {
            return Ok(coord::rect_to_absolute(rect, ctx.widget.pixel_size(), true));
        }
        self.combine(|dim| dim.evaluate(ctx))
    }

    /// Resolves inside `container`; the result is offset by its position.
    ///
    /// # Errors
    ///
    /// Propagates the first failing dimension.
    pub fn pixel_rect_in(&self, ctx: &EvalContext<'_>, container: Rect) -> DimensionResult<Rect> {
        let local = match self.property_rect(ctx.widget) {
            Some(rect) => coord::rect_to_absolute(rect, container.size(), true),
            None => self.combine(|dim| dim.evaluate_in(ctx, container))?,
        };
        Ok(local.offset(container.position()))
    }

    /// True if any of the four dimensions depends on `font`.
    #[must_use]
    pub fn handles_font_size_change(
        &self,
        widget: &dyn Widget,
        resources: &dyn ResourceProvider,
        font: &dyn Font,
    ) -> bool {
        self.dims()
            .into_iter()
            .any(|dim| dim.handles_font_size_change(widget, resources, font))
    }

    /// Writes an `Area` element.
    pub fn write_xml(&self, sink: &mut dyn XmlSink) {
        sink.open_tag(Self::ELEMENT);
        if let Some(name) = &self.area_property {
            sink.open_tag(Self::PROPERTY_ELEMENT);
            sink.attribute("name", name);
            sink.close_tag();
        }
        for dim in self.dims() {
            dim.write_xml(sink);
        }
        sink.close_tag();
    }

    /// Reads an `Area` element. Sides it does not mention keep their defaults.
    ///
    /// # Errors
    ///
    /// Fails on a malformed child or a `Dim` whose role fits no side.
    pub fn from_element(element: &Element) -> DimensionResult<Self> {
        Self::from_element_limited(element, DEFAULT_MAX_NESTING_DEPTH)
    }

    /// Reads an `Area` element, counting it as the first of `max_depth`
    /// allowed nesting levels.
    ///
    /// # Errors
    ///
    /// As [`ComponentArea::from_element`], plus
    /// [`DimensionError::NestingTooDeep`](crate::error::DimensionError::NestingTooDeep).
    pub fn from_element_limited(element: &Element, max_depth: usize) -> DimensionResult<Self> {
        element.expect_name(Self::ELEMENT)?;
        let mut area = Self::default();

        for child in &element.children {
            if child.name == Self::PROPERTY_ELEMENT {
                area.area_property = Some(child.required("name")?.to_owned());
                continue;
            }
            let dim = SemanticDimension::read(child, 1, max_depth)?;
            match dim.role {
                DimensionRole::LeftEdge => area.left = dim,
                DimensionRole::TopEdge => area.top = dim,
                DimensionRole::RightEdge | DimensionRole::Width => area.right_or_width = dim,
                DimensionRole::BottomEdge | DimensionRole::Height => area.bottom_or_height = dim,
                other => return Err(child.invalid("type", other.as_str())),
            }
        }
        Ok(area)
    }

    fn dims(&self) -> [&SemanticDimension; 4] {
        [
            &self.left,
            &self.top,
            &self.right_or_width,
            &self.bottom_or_height,
        ]
    }

    fn combine(
        &self,
        eval: impl Fn(&SemanticDimension) -> DimensionResult<f32>,
    ) -> DimensionResult<Rect> {
        let left = eval(&self.left)?;
        let top = eval(&self.top)?;

        let width = match self.right_or_width.role {
            DimensionRole::RightEdge => eval(&self.right_or_width)? - left,
            _ => eval(&self.right_or_width)?,
        };
        let height = match self.bottom_or_height.role {
            DimensionRole::BottomEdge => eval(&self.bottom_or_height)? - top,
            _ => eval(&self.bottom_or_height)?,
        };
        Ok(Rect::new(left, top, width, height))
    }

    fn property_rect(&self, widget: &dyn Widget) -> Option<URect> {
        let name = self.area_property.as_deref()?;
        let Some(raw) = widget.property(name) else {
            tracing::debug!(
                "widget `{}` has no area property `{}`, using dimensions",
                widget.name(),
                name
            );
            return None;
        };
        match raw.parse::<URect>() {
            Ok(rect) => Some(rect),
            Err(e) => {
                tracing::warn!(
                    "area property `{}` = `{}` is not a rect ({}), using dimensions",
                    name,
                    raw,
                    e
                );
                None
            }
        }
    }
}
