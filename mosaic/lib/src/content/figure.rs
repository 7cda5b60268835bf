//! Plotting-figure capabilities.
//!
//! Two capability sets are recognized:
//!
//! - [`Figure`]: something with a size that can be saved to SVG or PNG bytes.
//!   Rendered as inline SVG markup or as a base64 `img` data URI.
//! - [`PlotlyFigure`]: something that exports Plotly JSON and exposes its
//!   `data` and `layout` parts. Rendered as an interactive Plotly chart.
//!
//! [`SvgFigure`] and [`PlotlyChart`] are concrete implementations of each.

use std::fmt;

use resvg::{tiny_skia, usvg};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};
use thiserror::Error;

/// Output format for [`Figure::save`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum FigureFormat {
    /// Vector output, inlined as markup.
    #[default]
    Svg,
    /// Raster output, embedded as a data URI.
    Png,
}

/// Errors that can occur while exporting a figure.
#[derive(Error, Debug)]
pub enum FigureError {
    /// The figure's SVG source could not be parsed.
    #[error("Failed to parse SVG: {0}")]
    SvgParse(String),

    /// Rasterization failed.
    #[error("Failed to render image: {0}")]
    Render(String),
}

/// An in-memory plotting figure.
pub trait Figure: fmt::Debug {
    /// Width and height in user units, when known.
    fn size(&self) -> Option<(f32, f32)>;

    /// Serializes the figure in the given format.
    fn save(&self, format: FigureFormat) -> Result<Vec<u8>, FigureError>;
}

/// An object exposing Plotly figure capabilities.
pub trait PlotlyFigure: fmt::Debug {
    /// Exports the complete figure as Plotly JSON text.
    fn to_json(&self) -> Result<String, serde_json::Error>;

    /// The figure's traces.
    fn data(&self) -> &[Value];

    /// The figure's layout.
    fn layout(&self) -> &Value;
}

/// A figure backed by SVG source text.
///
/// PNG export rasterizes the SVG with `resvg`.
///
/// ## Examples
///
/// ```
/// use mosaic_lib::content::{Figure, FigureFormat, SvgFigure};
///
/// let figure = SvgFigure::new(
///     r#"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="2"></svg>"#,
/// );
/// assert_eq!(figure.size(), Some((4.0, 2.0)));
///
/// let png = figure.save(FigureFormat::Png).unwrap();
/// assert!(png.starts_with(b"\x89PNG"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgFigure {
    source: String,
}

impl SvgFigure {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// The SVG source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    fn tree(&self) -> Result<usvg::Tree, FigureError> {
        let options = usvg::Options::default();
        usvg::Tree::from_str(&self.source, &options)
            .map_err(|e| FigureError::SvgParse(e.to_string()))
    }

    fn rasterize(&self) -> Result<Vec<u8>, FigureError> {
        let tree = self.tree()?;
        let size = tree.size().to_int_size();

        let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
            .ok_or_else(|| FigureError::Render("Failed to create pixmap".to_string()))?;
        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

        tracing::debug!(
            width = size.width(),
            height = size.height(),
            "Rasterized SVG figure"
        );

        pixmap
            .encode_png()
            .map_err(|e| FigureError::Render(format!("Failed to encode PNG: {}", e)))
    }
}

impl Figure for SvgFigure {
    fn size(&self) -> Option<(f32, f32)> {
        self.tree().ok().map(|tree| {
            let size = tree.size();
            (size.width(), size.height())
        })
    }

    fn save(&self, format: FigureFormat) -> Result<Vec<u8>, FigureError> {
        match format {
            FigureFormat::Svg => Ok(self.source.as_bytes().to_vec()),
            FigureFormat::Png => self.rasterize(),
        }
    }
}

/// A Plotly figure made of traces and a layout.
///
/// ## Examples
///
/// ```
/// use mosaic_lib::content::{PlotlyChart, PlotlyFigure};
/// use serde_json::json;
///
/// let chart = PlotlyChart::new(
///     vec![json!({"type": "bar", "x": ["a", "b"], "y": [1, 2]})],
///     json!({"title": "Counts"}),
/// );
/// assert!(chart.to_json().unwrap().starts_with(r#"{"data":[{"#));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlotlyChart {
    pub data: Vec<Value>,
    #[serde(default)]
    pub layout: Value,
}

impl PlotlyChart {
    pub fn new(data: Vec<Value>, layout: Value) -> Self {
        Self { data, layout }
    }
}

impl PlotlyFigure for PlotlyChart {
    fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    fn data(&self) -> &[Value] {
        &self.data
    }

    fn layout(&self) -> &Value {
        &self.layout
    }
}
