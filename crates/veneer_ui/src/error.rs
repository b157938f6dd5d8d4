//! # Dimension Error Types
//!
//! Only requests that make no sense surface as errors. Missing fonts,
//! images, widgets and properties fall back to a defined value instead,
//! because layout must never fail mid-frame over a missing resource.

use thiserror::Error;

/// Errors that can occur while building or evaluating dimensions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DimensionError {
    /// The node asked for something undefined, such as an unknown operator.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Both operand slots of an operator node are already occupied.
    #[error("operator already has two operands")]
    OperandSlotsFull,

    /// An element did not describe the kind of node that was expected.
    #[error("unexpected element <{found}>, expected {expected}")]
    UnexpectedElement {
        /// What the reader was looking for.
        expected: &'static str,
        /// The element name that was found.
        found: String,
    },

    /// A required attribute was absent.
    #[error("<{element}> is missing attribute `{attribute}`")]
    MissingAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: &'static str,
    },

    /// An attribute value could not be interpreted.
    #[error("<{element}> has invalid {attribute}=\"{value}\"")]
    InvalidAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: &'static str,
        /// The offending value.
        value: String,
    },

    /// An element needed a child element it did not have.
    #[error("<{0}> is missing a child element")]
    MissingChild(String),

    /// Element nesting went deeper than the configured limit.
    #[error("dimension nesting exceeds {0} levels")]
    NestingTooDeep(usize),

    /// Invalid configuration file.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for dimension operations.
pub type DimensionResult<T> = Result<T, DimensionError>;
