//! A dimension node tagged with the role it plays in an area.

use serde::{Deserialize, Serialize};
use veneer_core::Rect;

use super::{DimensionNode, DimensionRole, EvalContext};
use crate::error::{DimensionError, DimensionResult};
use crate::resources::{Font, ResourceProvider};
use crate::widget::Widget;
use crate::xml::{Element, XmlSink};

/// One side of a [`ComponentArea`](super::ComponentArea).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticDimension {
    /// The value.
    pub node: DimensionNode,
    /// What the value means.
    pub role: DimensionRole,
}

impl SemanticDimension {
    /// Element name in skin markup.
    pub const ELEMENT: &'static str = "Dim";

    /// Tags `node` with `role`.
    #[must_use]
    pub fn new(node: impl Into<DimensionNode>, role: DimensionRole) -> Self {
        Self {
            node: node.into(),
            role,
        }
    }

    /// Evaluates the node against the widget.
    ///
    /// # Errors
    ///
    /// Propagates errors from the node.
    pub fn evaluate(&self, ctx: &EvalContext<'_>) -> DimensionResult<f32> {
        self.node.evaluate(ctx)
    }

    /// Evaluates the node against `rect`.
    ///
    /// # Errors
    ///
    /// Propagates errors from the node.
    pub fn evaluate_in(&self, ctx: &EvalContext<'_>, rect: Rect) -> DimensionResult<f32> {
        self.node.evaluate_in(ctx, rect)
    }

    /// True if the node depends on `font`.
    #[must_use]
    pub fn handles_font_size_change(
        &self,
        widget: &dyn Widget,
        resources: &dyn ResourceProvider,
        font: &dyn Font,
    ) -> bool {
        self.node.handles_font_size_change(widget, resources, font)
    }

    /// Writes a `Dim` element wrapping the node.
    pub fn write_xml(&self, sink: &mut dyn XmlSink) {
        sink.open_tag(Self::ELEMENT);
        sink.attribute("type", self.role.as_str());
        self.node.write_xml(sink);
        sink.close_tag();
    }

    /// Reads a `Dim` element.
    ///
    /// # Errors
    ///
    /// Fails on a malformed element, a missing node, or nesting deeper than
    /// the default limit.
    pub fn from_element(element: &Element) -> DimensionResult<Self> {
        Self::from_element_limited(element, crate::config::DEFAULT_MAX_NESTING_DEPTH)
    }

    /// Reads a `Dim` element with an explicit nesting limit.
    ///
    /// # Errors
    ///
    /// As [`SemanticDimension::from_element`].
    pub fn from_element_limited(element: &Element, max_depth: usize) -> DimensionResult<Self> {
        Self::read(element, 0, max_depth)
    }

    pub(crate) fn read(element: &Element, depth: usize, max_depth: usize) -> DimensionResult<Self> {
        element.expect_name(Self::ELEMENT)?;
        if depth >= max_depth {
            return Err(DimensionError::NestingTooDeep(max_depth));
        }
        let role = element.parse_required("type")?;
        let child = element
            .children
            .first()
            .ok_or_else(|| DimensionError::MissingChild(element.name.clone()))?;
        Ok(Self {
            node: DimensionNode::read(child, depth + 1, max_depth)?,
            role,
        })
    }
}
