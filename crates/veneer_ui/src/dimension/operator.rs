//! Binary arithmetic over two child dimensions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use veneer_core::Rect;

use super::{DimensionNode, EvalContext};
use crate::error::{DimensionError, DimensionResult};
use crate::resources::{Font, ResourceProvider};
use crate::widget::Widget;
use crate::xml::{Element, XmlSink};

/// Arithmetic applied by an [`OperatorNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DimensionOperator {
    /// Always 0.
    #[default]
    Noop,
    /// `left + right`.
    Add,
    /// `left - right`.
    Subtract,
    /// `left * right`.
    Multiply,
    /// `left / right`, or 0 when `right` is exactly 0.
    Divide,
    /// Unrecognised operator; evaluation fails.
    Invalid,
}

impl DimensionOperator {
    /// Returns the markup name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Noop => "Noop",
            Self::Add => "Add",
            Self::Subtract => "Subtract",
            Self::Multiply => "Multiply",
            Self::Divide => "Divide",
            Self::Invalid => "Invalid",
        }
    }

    /// Combines two operand values.
    ///
    /// # Errors
    ///
    /// Returns [`DimensionError::InvalidRequest`] for [`DimensionOperator::Invalid`].
    pub fn apply(self, left: f32, right: f32) -> DimensionResult<f32> {
        match self {
            Self::Noop => Ok(0.0),
            Self::Add => Ok(left + right),
            Self::Subtract => Ok(left - right),
            Self::Multiply => Ok(left * right),
            Self::Divide if right == 0.0 => Ok(0.0),
            Self::Divide => Ok(left / right),
            Self::Invalid => Err(DimensionError::InvalidRequest(
                "invalid operator".to_owned(),
            )),
        }
    }
}

impl fmt::Display for DimensionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DimensionOperator {
    type Err = std::convert::Infallible;

    /// Unknown names parse as [`DimensionOperator::Invalid`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "Noop" => Self::Noop,
            "Add" => Self::Add,
            "Subtract" => Self::Subtract,
            "Multiply" => Self::Multiply,
            "Divide" => Self::Divide,
            other => {
                tracing::warn!("unknown dimension operator `{}`", other);
                Self::Invalid
            }
        })
    }
}

/// An operator with up to two operands. A missing operand contributes 0.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OperatorNode {
    op: DimensionOperator,
    left: Option<Box<DimensionNode>>,
    right: Option<Box<DimensionNode>>,
}

impl OperatorNode {
    /// Element name in skin markup.
    pub const ELEMENT: &'static str = "OperatorDim";

    /// Creates an operator with no operands.
    #[must_use]
    pub const fn new(op: DimensionOperator) -> Self {
        Self {
            op,
            left: None,
            right: None,
        }
    }

    /// Starts a validated builder.
    #[must_use]
    pub const fn builder(op: DimensionOperator) -> OperatorBuilder {
        OperatorBuilder {
            op,
            left: None,
            right: None,
        }
    }

    /// Returns the operator.
    #[must_use]
    pub const fn op(&self) -> DimensionOperator {
        self.op
    }

    /// Replaces the operator.
    pub fn set_op(&mut self, op: DimensionOperator) {
        self.op = op;
    }

    /// Returns the left operand.
    #[must_use]
    pub fn left(&self) -> Option<&DimensionNode> {
        self.left.as_deref()
    }

    /// Returns the right operand.
    #[must_use]
    pub fn right(&self) -> Option<&DimensionNode> {
        self.right.as_deref()
    }

    /// Replaces the left operand, dropping the old one.
    pub fn set_left(&mut self, node: Option<DimensionNode>) {
        self.left = node.map(Box::new);
    }

    /// Replaces the right operand, dropping the old one.
    pub fn set_right(&mut self, node: Option<DimensionNode>) {
        self.right = node.map(Box::new);
    }

    /// Fills the left slot, or the right one if left is taken.
    ///
    /// # Errors
    ///
    /// Returns [`DimensionError::OperandSlotsFull`] if both are taken; the
    /// node is not kept.
    pub fn set_next_operand(&mut self, node: DimensionNode) -> DimensionResult<()> {
        if self.left.is_none() {
            self.left = Some(Box::new(node));
        } else if self.right.is_none() {
            self.right = Some(Box::new(node));
        } else {
            return Err(DimensionError::OperandSlotsFull);
        }
        Ok(())
    }

    /// Evaluates both operands against the widget, then applies the operator.
    ///
    /// # Errors
    ///
    /// Propagates operand errors and rejects an invalid operator.
    pub fn evaluate(&self, ctx: &EvalContext<'_>) -> DimensionResult<f32> {
        let left = Self::operand(self.left.as_deref(), |node| node.evaluate(ctx))?;
        let right = Self::operand(self.right.as_deref(), |node| node.evaluate(ctx))?;
        self.op.apply(left, right)
    }

    /// Evaluates both operands against `rect`, then applies the operator.
    ///
    /// # Errors
    ///
    /// Propagates operand errors and rejects an invalid operator.
    pub fn evaluate_in(&self, ctx: &EvalContext<'_>, rect: Rect) -> DimensionResult<f32> {
        let left = Self::operand(self.left.as_deref(), |node| node.evaluate_in(ctx, rect))?;
        let right = Self::operand(self.right.as_deref(), |node| node.evaluate_in(ctx, rect))?;
        self.op.apply(left, right)
    }

    /// True if either operand depends on `font`.
    #[must_use]
    pub fn handles_font_size_change(
        &self,
        widget: &dyn Widget,
        resources: &dyn ResourceProvider,
        font: &dyn Font,
    ) -> bool {
        [self.left.as_deref(), self.right.as_deref()]
            .into_iter()
            .flatten()
            .any(|node| node.handles_font_size_change(widget, resources, font))
    }

    /// Writes this node as an `OperatorDim` element with its operands nested.
    ///
    /// A lone right operand is preceded by a zero literal so it reads back
    /// into the right slot.
    pub fn write_xml(&self, sink: &mut dyn XmlSink) {
        sink.open_tag(Self::ELEMENT);
        sink.attribute("op", self.op.as_str());
        match (&self.left, &self.right) {
            (Some(left), right) => {
                left.write_xml(sink);
                if let Some(right) = right {
                    right.write_xml(sink);
                }
            }
            (None, Some(right)) => {
                DimensionNode::Literal(0.0).write_xml(sink);
                right.write_xml(sink);
            }
            (None, None) => {}
        }
        sink.close_tag();
    }

    pub(crate) fn read(element: &Element, depth: usize, max_depth: usize) -> DimensionResult<Self> {
        let mut node = Self::new(element.parse_or("op", DimensionOperator::Noop)?);
        for child in &element.children {
            node.set_next_operand(DimensionNode::read(child, depth + 1, max_depth)?)?;
        }
        Ok(node)
    }

    fn operand(
        node: Option<&DimensionNode>,
        eval: impl FnOnce(&DimensionNode) -> DimensionResult<f32>,
    ) -> DimensionResult<f32> {
        node.map_or(Ok(0.0), eval)
    }
}

/// Builds an [`OperatorNode`], rejecting an invalid operator up front.
#[derive(Debug, Clone)]
#[must_use]
pub struct OperatorBuilder {
    op: DimensionOperator,
    left: Option<DimensionNode>,
    right: Option<DimensionNode>,
}

impl OperatorBuilder {
    /// Sets the left operand.
    pub fn with_left(mut self, node: impl Into<DimensionNode>) -> Self {
        self.left = Some(node.into());
        self
    }

    /// Sets the right operand.
    pub fn with_right(mut self, node: impl Into<DimensionNode>) -> Self {
        self.right = Some(node.into());
        self
    }

    /// Finishes the node.
    ///
    /// # Errors
    ///
    /// Returns [`DimensionError::InvalidRequest`] for [`DimensionOperator::Invalid`].
    pub fn build(self) -> DimensionResult<OperatorNode> {
        if self.op == DimensionOperator::Invalid {
            return Err(DimensionError::InvalidRequest(
                "cannot build an invalid operator".to_owned(),
            ));
        }
        let mut node = OperatorNode::new(self.op);
        node.set_left(self.left);
        node.set_right(self.right);
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply() {
        assert_eq!(DimensionOperator::Add.apply(3.0, 4.0), Ok(7.0));
        assert_eq!(DimensionOperator::Subtract.apply(3.0, 4.0), Ok(-1.0));
        assert_eq!(DimensionOperator::Multiply.apply(3.0, 4.0), Ok(12.0));
        assert_eq!(DimensionOperator::Divide.apply(3.0, 4.0), Ok(0.75));
        assert_eq!(DimensionOperator::Divide.apply(3.0, 0.0), Ok(0.0));
        assert_eq!(DimensionOperator::Divide.apply(3.0, -0.0), Ok(0.0));
        assert_eq!(DimensionOperator::Noop.apply(3.0, 4.0), Ok(0.0));
        assert!(DimensionOperator::Invalid.apply(3.0, 4.0).is_err());
    }

    #[test]
    fn test_unknown_operator_name() {
        assert_eq!("Modulo".parse(), Ok(DimensionOperator::Invalid));
        assert_eq!(" Divide ".parse(), Ok(DimensionOperator::Divide));
    }

    #[test]
    fn test_operand_slots() {
        let mut node = OperatorNode::new(DimensionOperator::Add);
        node.set_next_operand(DimensionNode::Literal(1.0)).unwrap();
        node.set_next_operand(DimensionNode::Literal(2.0)).unwrap();

        assert_eq!(
            node.set_next_operand(DimensionNode::Literal(3.0)),
            Err(DimensionError::OperandSlotsFull)
        );
        assert_eq!(node.left(), Some(&DimensionNode::Literal(1.0)));
        assert_eq!(node.right(), Some(&DimensionNode::Literal(2.0)));

        node.set_left(None);
        assert!(node.left().is_none());
        node.set_next_operand(DimensionNode::Literal(4.0)).unwrap();
        assert_eq!(node.left(), Some(&DimensionNode::Literal(4.0)));
    }

    #[test]
    fn test_builder_rejects_invalid() {
        assert!(OperatorNode::builder(DimensionOperator::Invalid).build().is_err());

        let node = OperatorNode::builder(DimensionOperator::Multiply)
            .with_right(DimensionNode::Literal(2.0))
            .build()
            .unwrap();
        assert!(node.left().is_none());
        assert_eq!(node.right(), Some(&DimensionNode::Literal(2.0)));
    }
}
