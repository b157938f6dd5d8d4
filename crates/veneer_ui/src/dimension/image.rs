//! Image metric dimensions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::EvalContext;
use crate::error::{DimensionError, DimensionResult};
use crate::resources::ResourceProvider;
use crate::widget::with_target;
use crate::xml::{Element, XmlSink};

/// Which image metric to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageMetricKind {
    /// Rendered width.
    Width,
    /// Rendered height.
    Height,
    /// Rendered horizontal offset.
    XOffset,
    /// Rendered vertical offset.
    YOffset,
}

impl ImageMetricKind {
    /// Returns the markup name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Width => "Width",
            Self::Height => "Height",
            Self::XOffset => "XOffset",
            Self::YOffset => "YOffset",
        }
    }
}

impl fmt::Display for ImageMetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageMetricKind {
    type Err = DimensionError;

    fn from_str(s: &str) -> Result<Self, DimensionError> {
        match s.trim() {
            "Width" => Ok(Self::Width),
            "Height" => Ok(Self::Height),
            "XOffset" | "XPosition" => Ok(Self::XOffset),
            "YOffset" | "YPosition" => Ok(Self::YOffset),
            other => Err(DimensionError::InvalidRequest(format!(
                "unknown image metric `{other}`"
            ))),
        }
    }
}

/// Where the image name comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageSource {
    /// A fixed image name.
    Named(String),
    /// The value of a widget property.
    Property {
        /// Path of the widget holding the property.
        widget: Option<String>,
        /// Property name.
        property: String,
    },
}

/// A metric of a named image. Resolves to 0 when the image is unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMetric {
    /// Image name source.
    pub source: ImageSource,
    /// Metric to read.
    pub metric: ImageMetricKind,
}

impl ImageMetric {
    /// Element name for a fixed image.
    pub const ELEMENT: &'static str = "ImageDim";
    /// Element name for an image named by a property.
    pub const PROPERTY_ELEMENT: &'static str = "ImagePropertyDim";

    /// Reads a metric of the image called `name`.
    #[must_use]
    pub fn named(name: impl Into<String>, metric: ImageMetricKind) -> Self {
        Self {
            source: ImageSource::Named(name.into()),
            metric,
        }
    }

    /// Reads a metric of the image named by `property` on the evaluated widget.
    #[must_use]
    pub fn from_property(property: impl Into<String>, metric: ImageMetricKind) -> Self {
        Self {
            source: ImageSource::Property {
                widget: None,
                property: property.into(),
            },
            metric,
        }
    }

    /// Reads the property from a descendant instead. No effect on named images.
    #[must_use]
    pub fn with_widget(mut self, path: impl Into<String>) -> Self {
        if let ImageSource::Property { widget, .. } = &mut self.source {
            *widget = Some(path.into());
        }
        self
    }

    /// Reads the metric.
    ///
    /// # Errors
    ///
    /// Never fails today; the signature matches the other dimensions.
    pub fn evaluate(&self, ctx: &EvalContext<'_>) -> DimensionResult<f32> {
        let value = match &self.source {
            ImageSource::Named(name) => self.measure(ctx.resources, name),
            ImageSource::Property { widget, property } => {
                with_target(ctx.widget, widget.as_deref(), |target| {
                    target
                        .property(property)
                        .and_then(|name| self.measure(ctx.resources, name))
                })
                .flatten()
            }
        };

        Ok(value.unwrap_or_else(|| {
            tracing::debug!("image for {:?} not found, resolving to 0", self.source);
            0.0
        }))
    }

    /// Writes this dimension as an `ImageDim` or `ImagePropertyDim` element.
    pub fn write_xml(&self, sink: &mut dyn XmlSink) {
        match &self.source {
            ImageSource::Named(name) => {
                sink.open_tag(Self::ELEMENT);
                sink.attribute("name", name);
            }
            ImageSource::Property { widget, property } => {
                sink.open_tag(Self::PROPERTY_ELEMENT);
                if let Some(widget) = widget {
                    sink.attribute("widget", widget);
                }
                sink.attribute("name", property);
            }
        }
        sink.attribute("dimension", self.metric.as_str());
        sink.close_tag();
    }

    pub(crate) fn read(element: &Element) -> DimensionResult<Self> {
        let raw = element.required("dimension")?;
        let metric = raw
            .parse::<ImageMetricKind>()
            .map_err(|_| element.invalid("dimension", raw))?;
        let name = element.required("name")?.to_owned();

        let source = if element.name == Self::PROPERTY_ELEMENT {
            ImageSource::Property {
                widget: element.optional_string("widget"),
                property: name,
            }
        } else {
            ImageSource::Named(name)
        };
        Ok(Self { source, metric })
    }

    fn measure(&self, resources: &dyn ResourceProvider, name: &str) -> Option<f32> {
        resources.image(name).map(|image| match self.metric {
            ImageMetricKind::Width => image.rendered_size().width,
            ImageMetricKind::Height => image.rendered_size().height,
            ImageMetricKind::XOffset => image.rendered_offset().x,
            ImageMetricKind::YOffset => image.rendered_offset().y,
        })
    }
}
