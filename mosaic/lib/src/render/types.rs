//! Type definitions for the render module.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::content::{Category, FigureError, FigureFormat};
use crate::shared_data::SharedDataError;
use crate::style::StyleError;

/// Default height of a Plotly chart container.
pub const DEFAULT_CHART_HEIGHT: &str = "400px";

/// Errors that can occur while rendering a fragment.
#[derive(Error, Debug)]
pub enum RenderError {
    /// A style or class value could not be encoded.
    #[error(transparent)]
    Style(#[from] StyleError),

    /// Shared data could not be registered.
    #[error(transparent)]
    SharedData(#[from] SharedDataError),

    /// Parallel lists (content, columns, styles) have unequal lengths.
    #[error("Length mismatch: {what} has {actual} entries for {expected} content items")]
    LengthMismatch {
        /// Which list has the wrong length.
        what: &'static str,
        /// The number of content items.
        expected: usize,
        /// The length of the offending list.
        actual: usize,
    },

    /// A remote image could not be fetched.
    #[error("Failed to fetch image from URL {url}: {source}")]
    FetchError {
        url: String,
        source: reqwest::Error,
    },

    /// A remote image fetch returned a non-success status.
    #[error("Failed to fetch image from URL {url}: server returned status {status}")]
    FetchStatus { url: String, status: u16 },

    /// A local file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A figure could not be exported.
    #[error("Failed to export figure: {0}")]
    FigureExport(#[from] FigureError),

    /// A chart could not be serialized to JSON.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// A markdown code block could not be syntax highlighted.
    #[error("Syntax highlighting failed: {0}")]
    Highlight(String),

    /// An HTML tag outside the allowed set was requested.
    #[error("Invalid tag `{tag}`, the tag must be one of {allowed}")]
    UnsupportedTag { tag: String, allowed: &'static str },

    /// The content item cannot be rendered as the requested category.
    #[error("Cannot render {found} content as {category}")]
    ContentMismatch {
        category: Category,
        found: &'static str,
    },
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Options for rendering with sensible defaults.
///
/// ## Examples
///
/// ```
/// use mosaic_lib::content::FigureFormat;
/// use mosaic_lib::render::RenderOptions;
///
/// let mut options = RenderOptions::default();
/// options.figure_format = FigureFormat::Png;
/// options.chart_height = "600px".to_string();
/// options.alt = "Quarterly revenue".to_string();
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct RenderOptions {
    /// Export format for in-memory figures.
    pub figure_format: FigureFormat,
    /// CSS height of Plotly chart containers, unless the style sets one.
    pub chart_height: String,
    /// Renderer mode passed to Vega-Lite embedding.
    pub vega_renderer: String,
    /// `alt` text for `img` elements.
    pub alt: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            figure_format: FigureFormat::Svg,
            chart_height: DEFAULT_CHART_HEIGHT.to_string(),
            vega_renderer: "svg".to_string(),
            alt: String::new(),
        }
    }
}

/// An HTML fragment, optionally paired with the script that draws it.
///
/// Fragments are immutable once produced; they are concatenated, never
/// merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFragment {
    html: String,
    script: Option<String>,
}

impl RenderedFragment {
    pub fn new(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            script: None,
        }
    }

    pub fn with_script(html: impl Into<String>, script: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            script: Some(script.into()),
        }
    }

    /// The container markup.
    pub fn html(&self) -> &str {
        &self.html
    }

    /// The embedded `<script>` block, for interactive categories.
    pub fn script(&self) -> Option<&str> {
        self.script.as_deref()
    }

    /// The markup followed by the script block, if any.
    pub fn into_html(self) -> String {
        match self.script {
            Some(script) => format!("{}\n{}", self.html, script),
            None => self.html,
        }
    }
}

impl fmt::Display for RenderedFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.html)?;
        if let Some(script) = &self.script {
            write!(f, "\n{}", script)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = RenderOptions::default();
        assert_eq!(options.figure_format, FigureFormat::Svg);
        assert_eq!(options.chart_height, "400px");
        assert_eq!(options.vega_renderer, "svg");
        assert!(options.alt.is_empty());
    }

    #[test]
    fn test_fragment_without_script() {
        let fragment = RenderedFragment::new("<p>hi</p>");
        assert_eq!(fragment.script(), None);
        assert_eq!(fragment.to_string(), "<p>hi</p>");
        assert_eq!(fragment.into_html(), "<p>hi</p>");
    }

    #[test]
    fn test_fragment_with_script() {
        let fragment = RenderedFragment::with_script("<div></div>", "<script></script>");
        assert_eq!(fragment.html(), "<div></div>");
        assert_eq!(fragment.script(), Some("<script></script>"));
        assert_eq!(fragment.clone().into_html(), fragment.to_string());
        assert_eq!(fragment.into_html(), "<div></div>\n<script></script>");
    }

    #[test]
    fn test_error_messages() {
        let err = RenderError::UnsupportedTag {
            tag: "h9".to_string(),
            allowed: "h1, h2, h3, h4, h5",
        };
        assert_eq!(
            err.to_string(),
            "Invalid tag `h9`, the tag must be one of h1, h2, h3, h4, h5"
        );

        let err = RenderError::LengthMismatch {
            what: "styles",
            expected: 2,
            actual: 1,
        };
        assert_eq!(
            err.to_string(),
            "Length mismatch: styles has 1 entries for 2 content items"
        );

        let err = RenderError::ContentMismatch {
            category: Category::ImageFile,
            found: "json",
        };
        assert_eq!(err.to_string(), "Cannot render json content as image-file");
    }
}
