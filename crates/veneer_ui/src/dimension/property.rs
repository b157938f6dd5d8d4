//! Dimensions read from widget properties.

use serde::{Deserialize, Serialize};
use veneer_core::{coord, ScalarUnit};

use super::{DimensionRole, EvalContext, RoleAxis};
use crate::error::DimensionResult;
use crate::widget::{with_target, Widget};
use crate::xml::{Element, XmlSink};

/// Reads a number from a property of the evaluated widget or a descendant.
///
/// Without an axis the property text is parsed as a float, and `bool`
/// properties read as 1 or 0. With an axis it is parsed as a unified value
/// and resolved against the target's pixel width or height.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyMetric {
    /// Path of the widget holding the property.
    pub widget: Option<String>,
    /// Property name.
    pub property: String,
    /// Present for unified-valued properties.
    pub axis: Option<RoleAxis>,
}

impl PropertyMetric {
    /// Element name in skin markup.
    pub const ELEMENT: &'static str = "PropertyDim";

    /// Reads a plain number.
    #[must_use]
    pub fn new(property: impl Into<String>) -> Self {
        Self {
            widget: None,
            property: property.into(),
            axis: None,
        }
    }

    /// Reads a unified value resolved along `axis`.
    #[must_use]
    pub fn unified(property: impl Into<String>, axis: RoleAxis) -> Self {
        Self {
            axis: Some(axis),
            ..Self::new(property)
        }
    }

    /// Reads from a descendant.
    #[must_use]
    pub fn with_widget(mut self, path: impl Into<String>) -> Self {
        self.widget = Some(path.into());
        self
    }

    /// Reads the property. Anything missing or unparsable reads as 0.
    ///
    /// # Errors
    ///
    /// Never fails today; the signature matches the other dimensions.
    pub fn evaluate(&self, ctx: &EvalContext<'_>) -> DimensionResult<f32> {
        let value = with_target(ctx.widget, self.widget.as_deref(), |target| {
            self.read_value(target)
        });
        Ok(value.unwrap_or_else(|| {
            tracing::debug!(
                "widget `{}` has no child `{}`, property resolves to 0",
                ctx.widget.name(),
                self.widget.as_deref().unwrap_or_default()
            );
            0.0
        }))
    }

    /// Writes this dimension as a `PropertyDim` element.
    pub fn write_xml(&self, sink: &mut dyn XmlSink) {
        sink.open_tag(Self::ELEMENT);
        if let Some(widget) = &self.widget {
            sink.attribute("widget", widget);
        }
        sink.attribute("name", &self.property);
        if let Some(axis) = self.axis {
            sink.attribute("type", axis.role().as_str());
        }
        sink.close_tag();
    }

    pub(crate) fn read(element: &Element) -> DimensionResult<Self> {
        let axis = match element.attribute("type") {
            None => None,
            Some(raw) => match raw.parse::<DimensionRole>() {
                Ok(DimensionRole::Width) => Some(RoleAxis::Horizontal),
                Ok(DimensionRole::Height) => Some(RoleAxis::Vertical),
                _ => return Err(element.invalid("type", raw)),
            },
        };
        Ok(Self {
            widget: element.optional_string("widget"),
            property: element.required("name")?.to_owned(),
            axis,
        })
    }

    fn read_value(&self, target: &dyn Widget) -> f32 {
        let Some(raw) = target.property(&self.property) else {
            tracing::debug!(
                "widget `{}` has no property `{}`, resolving to 0",
                target.name(),
                self.property
            );
            return 0.0;
        };

        match self.axis {
            None if target.property_type_name(&self.property) == Some("bool") => {
                if raw.trim().eq_ignore_ascii_case("true") {
                    1.0
                } else {
                    0.0
                }
            }
            None => raw.trim().parse::<f32>().unwrap_or_else(|_| {
                tracing::warn!(
                    "property `{}` = `{}` is not a number, resolving to 0",
                    self.property,
                    raw
                );
                0.0
            }),
            Some(axis) => match raw.parse::<ScalarUnit>() {
                Ok(unit) => coord::to_absolute(unit, axis.extent(target.pixel_size()), true),
                Err(e) => {
                    tracing::warn!(
                        "property `{}` = `{}` is not a unified value ({}), resolving to 0",
                        self.property,
                        raw,
                        e
                    );
                    0.0
                }
            },
        }
    }
}
