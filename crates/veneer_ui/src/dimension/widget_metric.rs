//! Dimensions measured from a widget's own geometry.

use serde::{Deserialize, Serialize};
use veneer_core::coord;

use super::{DimensionRole, EvalContext};
use crate::error::{DimensionError, DimensionResult};
use crate::widget::{with_target, Widget};
use crate::xml::{Element, XmlSink};

/// Reads an edge or extent of the evaluated widget, or of a descendant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetMetric {
    /// Path of the widget to measure; absent means the evaluated widget.
    pub widget: Option<String>,
    /// What to read.
    pub role: DimensionRole,
}

impl WidgetMetric {
    /// Element name in skin markup.
    pub const ELEMENT: &'static str = "WidgetDim";

    /// Measures the evaluated widget.
    #[must_use]
    pub const fn new(role: DimensionRole) -> Self {
        Self { widget: None, role }
    }

    /// Measures a descendant.
    #[must_use]
    pub fn with_widget(mut self, path: impl Into<String>) -> Self {
        self.widget = Some(path.into());
        self
    }

    /// Reads the measurement.
    ///
    /// A descendant that does not exist measures 0. Offsets are meaningless
    /// for a widget and also measure 0.
    ///
    /// # Errors
    ///
    /// Returns [`DimensionError::InvalidRequest`] for [`DimensionRole::Invalid`].
    pub fn evaluate(&self, ctx: &EvalContext<'_>) -> DimensionResult<f32> {
        let measured = with_target(ctx.widget, self.widget.as_deref(), |target| {
            self.measure(target)
        });
        measured.unwrap_or_else(|| {
            tracing::debug!(
                "widget `{}` has no child `{}`, resolving to 0",
                ctx.widget.name(),
                self.widget.as_deref().unwrap_or_default()
            );
            Ok(0.0)
        })
    }

    /// Writes this dimension as a `WidgetDim` element.
    pub fn write_xml(&self, sink: &mut dyn XmlSink) {
        sink.open_tag(Self::ELEMENT);
        if let Some(widget) = &self.widget {
            sink.attribute("widget", widget);
        }
        sink.attribute("dimension", self.role.as_str());
        sink.close_tag();
    }

    pub(crate) fn read(element: &Element) -> DimensionResult<Self> {
        Ok(Self {
            widget: element.optional_string("widget"),
            role: element.parse_required("dimension")?,
        })
    }

    fn measure(&self, target: &dyn Widget) -> DimensionResult<f32> {
        match self.role {
            DimensionRole::Width => Ok(target.pixel_size().width),
            DimensionRole::Height => Ok(target.pixel_size().height),
            DimensionRole::LeftEdge => Ok(coord::to_absolute(
                target.position().x,
                target.parent_pixel_size().width,
                true,
            )),
            DimensionRole::TopEdge => Ok(coord::to_absolute(
                target.position().y,
                target.parent_pixel_size().height,
                true,
            )),
            DimensionRole::RightEdge => Ok(coord::to_absolute(
                target.area().max.x,
                target.parent_pixel_size().width,
                true,
            )),
            DimensionRole::BottomEdge => Ok(coord::to_absolute(
                target.area().max.y,
                target.parent_pixel_size().height,
                true,
            )),
            DimensionRole::XOffset | DimensionRole::YOffset => {
                tracing::warn!(
                    "{} is not a widget measurement, resolving to 0",
                    self.role
                );
                Ok(0.0)
            }
            DimensionRole::Invalid => Err(DimensionError::InvalidRequest(format!(
                "cannot measure role {} on widget `{}`",
                self.role,
                target.name()
            ))),
        }
    }
}
