//! Scale + offset dimensions resolved against the widget's own size.

use serde::{Deserialize, Serialize};
use veneer_core::{coord, Rect, ScalarUnit};

use super::{DimensionRole, EvalContext, RoleAxis};
use crate::error::{DimensionError, DimensionResult};
use crate::xml::{Element, XmlSink};

/// A [`ScalarUnit`] whose base is the widget's pixel width or height,
/// picked by the axis of `role`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnifiedDim {
    /// The unified value.
    pub value: ScalarUnit,
    /// Role; only its axis matters here.
    pub role: DimensionRole,
}

impl UnifiedDim {
    /// Element name in skin markup.
    pub const ELEMENT: &'static str = "UnifiedDim";

    /// Creates a unified dimension.
    #[must_use]
    pub const fn new(value: ScalarUnit, role: DimensionRole) -> Self {
        Self { value, role }
    }

    /// Resolves against the widget's pixel size.
    ///
    /// # Errors
    ///
    /// Returns [`DimensionError::InvalidRequest`] if the role has no axis.
    pub fn evaluate(&self, ctx: &EvalContext<'_>) -> DimensionResult<f32> {
        let axis = self.axis()?;
        Ok(coord::to_absolute(
            self.value,
            axis.extent(ctx.widget.pixel_size()),
            true,
        ))
    }

    /// Resolves against the size of `rect` instead of the widget.
    ///
    /// # Errors
    ///
    /// Returns [`DimensionError::InvalidRequest`] if the role has no axis.
    pub fn evaluate_in(&self, rect: Rect) -> DimensionResult<f32> {
        let axis = self.axis()?;
        Ok(coord::to_absolute(self.value, axis.rect_extent(rect), true))
    }

    /// Writes this dimension as a `UnifiedDim` element.
    pub fn write_xml(&self, sink: &mut dyn XmlSink) {
        sink.open_tag(Self::ELEMENT);
        sink.attribute("scale", &self.value.scale.to_string());
        sink.attribute("offset", &self.value.offset.to_string());
        sink.attribute("type", self.role.as_str());
        sink.close_tag();
    }

    pub(crate) fn read(element: &Element) -> DimensionResult<Self> {
        let scale = element.parse_or("scale", 0.0)?;
        let offset = element.parse_or("offset", 0.0)?;
        let role = element.parse_required::<DimensionRole>("type")?;
        Ok(Self::new(ScalarUnit::new(scale, offset), role))
    }

    fn axis(&self) -> DimensionResult<RoleAxis> {
        self.role.axis().ok_or_else(|| {
            DimensionError::InvalidRequest(format!(
                "unified dimension cannot resolve role {}",
                self.role
            ))
        })
    }
}
