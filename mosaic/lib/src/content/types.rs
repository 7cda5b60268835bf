//! Core types for the content module.

use std::fmt;
use std::path::Path;

use serde_json::Value;
use strum::{AsRefStr, Display, EnumIter, EnumString};

use super::figure::{Figure, PlotlyChart, PlotlyFigure, SvgFigure};

/// The renderer branch that applies to a content item.
///
/// Exactly one category is assigned per item by
/// [`classify`](super::classify::classify).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Category {
    /// An in-memory plotting figure exported to SVG or PNG.
    PlotFigure,
    /// An existing local image file.
    ImageFile,
    /// A remote image addressed by URL.
    ImageUrl,
    /// A Vega-Lite chart specification.
    VegaLiteSpec,
    /// A Plotly figure specification.
    PlotlySpec,
    /// Markdown text, possibly carrying `$...$` LaTeX.
    MarkdownText,
    /// Text that is already HTML or carries escaped LaTeX delimiters.
    RawHtmlText,
    /// Anything else.
    PlainText,
}

impl Category {
    /// Returns `true` for categories whose container always receives the
    /// `img-fluid` class.
    pub fn is_image_bearing(&self) -> bool {
        matches!(
            self,
            Category::PlotFigure
                | Category::ImageFile
                | Category::ImageUrl
                | Category::VegaLiteSpec
                | Category::PlotlySpec
        )
    }

    /// Returns `true` for categories that emit a client-side script.
    pub fn is_interactive(&self) -> bool {
        matches!(self, Category::VegaLiteSpec | Category::PlotlySpec)
    }
}

/// A raw, untyped content value.
///
/// Paths and URLs are plain [`ContentItem::Text`]; their nature is inferred
/// during classification rather than declared.
pub enum ContentItem {
    /// Opaque text, a local path, a URL, or serialized JSON.
    Text(String),
    /// An already-parsed JSON value.
    Json(Value),
    /// An in-memory plotting figure.
    Figure(Box<dyn Figure>),
    /// An object exposing Plotly figure capabilities.
    Plotly(Box<dyn PlotlyFigure>),
}

impl ContentItem {
    /// Returns a short name for the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            ContentItem::Text(_) => "text",
            ContentItem::Json(_) => "json",
            ContentItem::Figure(_) => "figure",
            ContentItem::Plotly(_) => "plotly figure",
        }
    }

    /// Returns the text if this is a [`ContentItem::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentItem::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Debug for ContentItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentItem::Text(text) => f.debug_tuple("Text").field(text).finish(),
            ContentItem::Json(value) => f.debug_tuple("Json").field(value).finish(),
            ContentItem::Figure(figure) => f.debug_tuple("Figure").field(figure).finish(),
            ContentItem::Plotly(figure) => f.debug_tuple("Plotly").field(figure).finish(),
        }
    }
}

impl From<&str> for ContentItem {
    fn from(text: &str) -> Self {
        ContentItem::Text(text.to_string())
    }
}

impl From<String> for ContentItem {
    fn from(text: String) -> Self {
        ContentItem::Text(text)
    }
}

impl From<&Path> for ContentItem {
    fn from(path: &Path) -> Self {
        ContentItem::Text(path.to_string_lossy().into_owned())
    }
}

impl From<Value> for ContentItem {
    fn from(value: Value) -> Self {
        ContentItem::Json(value)
    }
}

impl From<SvgFigure> for ContentItem {
    fn from(figure: SvgFigure) -> Self {
        ContentItem::Figure(Box::new(figure))
    }
}

impl From<PlotlyChart> for ContentItem {
    fn from(chart: PlotlyChart) -> Self {
        ContentItem::Plotly(Box::new(chart))
    }
}
