//! # Dimension Engine
//!
//! A dimension is an expression tree that resolves to one pixel value for a
//! given widget. Leaves read constants, unified values, font and image
//! metrics, widget geometry, or widget properties; operators combine two
//! children.
//!
//! ```text
//!                 OperatorDim(Add)
//!                 ┌──────┴───────┐
//!        WidgetDim(Width)   OperatorDim(Multiply)
//!                           ┌──────┴──────┐
//!                    FontDim(LineSpacing) LiteralDim(2)
//! ```
//!
//! ## Evaluation
//!
//! - [`DimensionNode::evaluate`] resolves against the widget's own size.
//! - [`DimensionNode::evaluate_in`] resolves unified values against an
//!   explicit rectangle instead; other leaves still read the widget.
//!
//! Missing fonts, images, child widgets and properties resolve to a fallback
//! (usually 0) and are logged. Only requests that can never be answered, such
//! as an invalid role or operator, return errors.
//!
//! ## Markup
//!
//! Every node writes itself through an [`XmlSink`] and reads back from an
//! [`Element`]. Writing the same tree twice gives identical output.

mod area;
mod font;
mod image;
mod operator;
mod property;
mod role;
mod semantic;
mod unified;
mod widget_metric;

pub use area::ComponentArea;
pub use font::{FontMetric, FontMetricKind};
pub use image::{ImageMetric, ImageMetricKind, ImageSource};
pub use operator::{DimensionOperator, OperatorBuilder, OperatorNode};
pub use property::PropertyMetric;
pub use role::{DimensionRole, RoleAxis};
pub use semantic::SemanticDimension;
pub use unified::UnifiedDim;
pub use widget_metric::WidgetMetric;

use serde::{Deserialize, Serialize};
use veneer_core::Rect;

use crate::config::DEFAULT_MAX_NESTING_DEPTH;
use crate::error::{DimensionError, DimensionResult};
use crate::resources::{Font, ResourceProvider};
use crate::widget::Widget;
use crate::xml::{Element, XmlSink};

/// Everything a dimension reads while evaluating.
#[derive(Clone, Copy)]
pub struct EvalContext<'a> {
    /// Widget the dimension belongs to.
    pub widget: &'a dyn Widget,
    /// Fonts, images and the display size.
    pub resources: &'a dyn ResourceProvider,
}

impl<'a> EvalContext<'a> {
    /// Creates a context.
    #[must_use]
    pub fn new(widget: &'a dyn Widget, resources: &'a dyn ResourceProvider) -> Self {
        Self { widget, resources }
    }
}

/// A node in a dimension expression tree.
///
/// Nodes own their children; cloning a node deep-copies the whole subtree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DimensionNode {
    /// A constant pixel value.
    Literal(f32),
    /// Scale + offset against the widget's size.
    Unified(UnifiedDim),
    /// A font metric plus padding.
    FontMetric(FontMetric),
    /// An image metric.
    ImageMetric(ImageMetric),
    /// A widget's edge or extent.
    WidgetMetric(WidgetMetric),
    /// A number read from a property.
    PropertyMetric(PropertyMetric),
    /// Arithmetic over two children.
    Operator(OperatorNode),
}

impl DimensionNode {
    /// Element name of a literal.
    pub const LITERAL_ELEMENT: &'static str = "LiteralDim";

    /// Resolves against the widget's own size.
    ///
    /// # Errors
    ///
    /// Returns [`DimensionError::InvalidRequest`] when the tree asks for
    /// something that has no answer.
    pub fn evaluate(&self, ctx: &EvalContext<'_>) -> DimensionResult<f32> {
        match self {
            Self::Literal(value) => Ok(*value),
            Self::Unified(dim) => dim.evaluate(ctx),
            Self::FontMetric(dim) => dim.evaluate(ctx),
            Self::ImageMetric(dim) => dim.evaluate(ctx),
            Self::WidgetMetric(dim) => dim.evaluate(ctx),
            Self::PropertyMetric(dim) => dim.evaluate(ctx),
            Self::Operator(node) => node.evaluate(ctx),
        }
    }

    /// Resolves with unified values measured against `rect`.
    ///
    /// # Errors
    ///
    /// Same as [`DimensionNode::evaluate`].
    pub fn evaluate_in(&self, ctx: &EvalContext<'_>, rect: Rect) -> DimensionResult<f32> {
        match self {
            Self::Unified(dim) => dim.evaluate_in(rect),
            Self::Operator(node) => node.evaluate_in(ctx, rect),
            _ => self.evaluate(ctx),
        }
    }

    /// True if the value depends on `font`, so a cached result must be
    /// recomputed after its size changes.
    #[must_use]
    pub fn handles_font_size_change(
        &self,
        widget: &dyn Widget,
        resources: &dyn ResourceProvider,
        font: &dyn Font,
    ) -> bool {
        match self {
            Self::FontMetric(dim) => dim.handles_font_size_change(widget, resources, font),
            Self::Operator(node) => node.handles_font_size_change(widget, resources, font),
            _ => false,
        }
    }

    /// Writes the node and its subtree.
    pub fn write_xml(&self, sink: &mut dyn XmlSink) {
        match self {
            Self::Literal(value) => {
                sink.open_tag(Self::LITERAL_ELEMENT);
                sink.attribute("value", &value.to_string());
                sink.close_tag();
            }
            Self::Unified(dim) => dim.write_xml(sink),
            Self::FontMetric(dim) => dim.write_xml(sink),
            Self::ImageMetric(dim) => dim.write_xml(sink),
            Self::WidgetMetric(dim) => dim.write_xml(sink),
            Self::PropertyMetric(dim) => dim.write_xml(sink),
            Self::Operator(node) => node.write_xml(sink),
        }
    }

    /// Reads a node from markup, allowing the default nesting depth.
    ///
    /// # Errors
    ///
    /// Fails on an unknown element, a missing or malformed attribute, more
    /// than two operator children, or excessive nesting.
    pub fn from_element(element: &Element) -> DimensionResult<Self> {
        Self::from_element_limited(element, DEFAULT_MAX_NESTING_DEPTH)
    }

    /// Reads a node from markup with an explicit nesting limit.
    ///
    /// # Errors
    ///
    /// As [`DimensionNode::from_element`]; nesting beyond `max_depth`
    /// elements gives [`DimensionError::NestingTooDeep`].
    pub fn from_element_limited(element: &Element, max_depth: usize) -> DimensionResult<Self> {
        Self::read(element, 0, max_depth)
    }

    pub(crate) fn read(element: &Element, depth: usize, max_depth: usize) -> DimensionResult<Self> {
        if depth >= max_depth {
            return Err(DimensionError::NestingTooDeep(max_depth));
        }
        match element.name.as_str() {
            Self::LITERAL_ELEMENT => Ok(Self::Literal(element.parse_required("value")?)),
            UnifiedDim::ELEMENT => UnifiedDim::read(element).map(Self::Unified),
            FontMetric::ELEMENT => FontMetric::read(element).map(Self::FontMetric),
            ImageMetric::ELEMENT | ImageMetric::PROPERTY_ELEMENT => {
                ImageMetric::read(element).map(Self::ImageMetric)
            }
            WidgetMetric::ELEMENT => WidgetMetric::read(element).map(Self::WidgetMetric),
            PropertyMetric::ELEMENT => PropertyMetric::read(element).map(Self::PropertyMetric),
            OperatorNode::ELEMENT => {
                OperatorNode::read(element, depth, max_depth).map(Self::Operator)
            }
            _ => Err(DimensionError::UnexpectedElement {
                expected: "dimension",
                found: element.name.clone(),
            }),
        }
    }
}

impl From<f32> for DimensionNode {
    fn from(value: f32) -> Self {
        Self::Literal(value)
    }
}

impl From<UnifiedDim> for DimensionNode {
    fn from(dim: UnifiedDim) -> Self {
        Self::Unified(dim)
    }
}

impl From<FontMetric> for DimensionNode {
    fn from(dim: FontMetric) -> Self {
        Self::FontMetric(dim)
    }
}

impl From<ImageMetric> for DimensionNode {
    fn from(dim: ImageMetric) -> Self {
        Self::ImageMetric(dim)
    }
}

impl From<WidgetMetric> for DimensionNode {
    fn from(dim: WidgetMetric) -> Self {
        Self::WidgetMetric(dim)
    }
}

impl From<PropertyMetric> for DimensionNode {
    fn from(dim: PropertyMetric) -> Self {
        Self::PropertyMetric(dim)
    }
}

impl From<OperatorNode> for DimensionNode {
    fn from(node: OperatorNode) -> Self {
        Self::Operator(node)
    }
}
