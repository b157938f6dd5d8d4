//! Font metric dimensions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::EvalContext;
use crate::error::{DimensionError, DimensionResult};
use crate::resources::{Font, ResourceProvider};
use crate::widget::{widget_font, with_target, Widget};
use crate::xml::{Element, XmlSink};

/// Which font metric to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontMetricKind {
    /// Distance between baselines.
    LineSpacing,
    /// Distance from line top to baseline.
    Baseline,
    /// Rendered width of a string.
    HorizontalExtent,
}

impl FontMetricKind {
    /// Returns the markup name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LineSpacing => "LineSpacing",
            Self::Baseline => "Baseline",
            Self::HorizontalExtent => "HorzExtent",
        }
    }
}

impl fmt::Display for FontMetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FontMetricKind {
    type Err = DimensionError;

    fn from_str(s: &str) -> Result<Self, DimensionError> {
        match s.trim() {
            "LineSpacing" => Ok(Self::LineSpacing),
            "Baseline" => Ok(Self::Baseline),
            "HorzExtent" => Ok(Self::HorizontalExtent),
            other => Err(DimensionError::InvalidRequest(format!(
                "unknown font metric `{other}`"
            ))),
        }
    }
}

/// A font metric plus constant padding.
///
/// The font is the one named by `font`, or else the font assigned to the
/// target widget (`widget` names a descendant; absent means the widget being
/// evaluated). If no font resolves the value is just `padding`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontMetric {
    /// Path of the widget whose font and text are used.
    pub widget: Option<String>,
    /// Explicit font name.
    pub font: Option<String>,
    /// Text to measure for `HorizontalExtent`; defaults to the widget text.
    pub text: Option<String>,
    /// Metric to read.
    pub metric: FontMetricKind,
    /// Added to the metric.
    pub padding: f32,
}

impl FontMetric {
    /// Element name in skin markup.
    pub const ELEMENT: &'static str = "FontDim";

    /// Creates a font dimension on the evaluated widget's own font.
    #[must_use]
    pub const fn new(metric: FontMetricKind) -> Self {
        Self {
            widget: None,
            font: None,
            text: None,
            metric,
            padding: 0.0,
        }
    }

    /// Targets a descendant widget.
    #[must_use]
    pub fn with_widget(mut self, path: impl Into<String>) -> Self {
        self.widget = Some(path.into());
        self
    }

    /// Uses a named font instead of the widget's.
    #[must_use]
    pub fn with_font(mut self, name: impl Into<String>) -> Self {
        self.font = Some(name.into());
        self
    }

    /// Measures this text instead of the widget's.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Sets the padding.
    #[must_use]
    pub const fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    /// Reads the metric.
    ///
    /// # Errors
    ///
    /// Never fails today; the signature matches the other dimensions.
    pub fn evaluate(&self, ctx: &EvalContext<'_>) -> DimensionResult<f32> {
        let Some(font) = self.resolve_font(ctx.widget, ctx.resources) else {
            tracing::debug!(
                "no font for {} on `{}`, using padding only",
                self.metric,
                ctx.widget.name()
            );
            return Ok(self.padding);
        };

        let value = match self.metric {
            FontMetricKind::LineSpacing => font.line_spacing(),
            FontMetricKind::Baseline => font.baseline(),
            FontMetricKind::HorizontalExtent => match self.text.as_deref() {
                Some(text) if !text.is_empty() => font.text_extent(text),
                _ => with_target(ctx.widget, self.widget.as_deref(), |target| {
                    font.text_extent(target.text())
                })
                .unwrap_or(0.0),
            },
        };
        Ok(value + self.padding)
    }

    /// True if the font this dimension reads is `font`.
    #[must_use]
    pub fn handles_font_size_change(
        &self,
        widget: &dyn Widget,
        resources: &dyn ResourceProvider,
        font: &dyn Font,
    ) -> bool {
        self.resolve_font(widget, resources)
            .is_some_and(|resolved| resolved.name() == font.name())
    }

    /// Writes this dimension as a `FontDim` element.
    pub fn write_xml(&self, sink: &mut dyn XmlSink) {
        sink.open_tag(Self::ELEMENT);
        if let Some(widget) = &self.widget {
            sink.attribute("widget", widget);
        }
        if let Some(font) = &self.font {
            sink.attribute("font", font);
        }
        if let Some(text) = &self.text {
            sink.attribute("string", text);
        }
        if self.padding != 0.0 {
            sink.attribute("padding", &self.padding.to_string());
        }
        sink.attribute("type", self.metric.as_str());
        sink.close_tag();
    }

    pub(crate) fn read(element: &Element) -> DimensionResult<Self> {
        let raw = element.required("type")?;
        let metric = raw
            .parse::<FontMetricKind>()
            .map_err(|_| element.invalid("type", raw))?;
        Ok(Self {
            widget: element.optional_string("widget"),
            font: element.optional_string("font"),
            text: element.optional_string("string"),
            metric,
            padding: element.parse_or("padding", 0.0)?,
        })
    }

    fn resolve_font<'r>(
        &self,
        widget: &dyn Widget,
        resources: &'r dyn ResourceProvider,
    ) -> Option<&'r dyn Font> {
        match self.font.as_deref() {
            Some(name) if !name.is_empty() => resources.font(name),
            _ => with_target(widget, self.widget.as_deref(), |target| {
                widget_font(target, resources)
            })
            .flatten(),
        }
    }
}
