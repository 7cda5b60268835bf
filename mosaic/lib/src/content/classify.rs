//! Heuristic content classification.
//!
//! [`classify`] runs an ordered chain of predicates and returns the first
//! category that matches:
//!
//! 1. in-memory plotting figure → [`Category::PlotFigure`]
//! 2. existing local file with an image extension → [`Category::ImageFile`]
//! 3. URL-shaped text carrying an image extension → [`Category::ImageUrl`]
//! 4. text or JSON mentioning the Vega-Lite schema → [`Category::VegaLiteSpec`]
//! 5. Plotly-shaped JSON, text, or object → [`Category::PlotlySpec`]
//! 6. markdown, raw HTML, or plain text
//!
//! The order is part of the contract: an image path whose contents happen to
//! look like a chart is still an image. Classification never fails; anything
//! unrecognized ends up as [`Category::PlainText`].
//!
//! ## Examples
//!
//! ```
//! use mosaic_lib::content::{Category, classify_text};
//!
//! assert_eq!(classify_text("$x^2$ is nice"), Category::MarkdownText);
//! assert_eq!(classify_text(r"\(x^2\) is nice"), Category::RawHtmlText);
//! assert_eq!(classify_text("hello"), Category::PlainText);
//! assert_eq!(
//!     classify_text(r#"{"data":[{"type":"scatter","x":[1],"y":[2]}],"layout":{}}"#),
//!     Category::PlotlySpec
//! );
//! ```

use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use url::Url;

use super::{Category, ContentItem};

/// Extensions (lowercase, without the dot) treated as images.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "tif", "apng", "bmp", "svg"];

/// Substring identifying a Vega-Lite specification.
pub const VEGA_LITE_SCHEMA: &str = "https://vega.github.io/schema/vega-lite";

/// Trace types that identify a Plotly figure.
pub const PLOTLY_TRACE_TYPES: &[&str] = &[
    "scatter",
    "bar",
    "line",
    "histogram",
    "box",
    "violin",
    "heatmap",
    "contour",
    "surface",
    "mesh3d",
    "scatter3d",
    "choropleth",
    "scattergeo",
    "pie",
    "sunburst",
    "treemap",
    "sankey",
    "waterfall",
    "funnel",
    "indicator",
    "scattergl",
    "histogram2d",
    "histogram2dcontour",
    "parcoords",
    "parcats",
];

/// Trace keys that mark an untyped trace as Plotly data.
const AXIS_KEYS: &[&str] = &["x", "y", "z", "locations", "values"];

/// Characters that send text through the markdown renderer.
const MARKDOWN_TRIGGERS: &[char] = &['$', '#', '*', '_', '['];

/// Already-escaped LaTeX delimiters that bypass markdown.
const ESCAPED_LATEX: &[&str] = &[r"\(", r"\["];

lazy_static! {
    /// Generic URL shape, anchored at the start of the text.
    static ref URL_PATTERN: Regex = Regex::new(
        r"^(https?://.)?(www\.)?[-a-zA-Z0-9@:%._+~#=]{2,256}\.[a-z]{2,6}\b([-a-zA-Z0-9@:%_+.~#?&/=]*)"
    ).unwrap();

    /// An image extension anywhere in the text.
    static ref IMAGE_EXTENSION_PATTERN: Regex =
        Regex::new(r"(?i)\.(jpg|jpeg|png|gif|tif|apng|bmp|svg)").unwrap();
}

/// Assigns a [`Category`] to a content item.
///
/// Pure apart from the filesystem probe of step 2, and total: every input
/// yields exactly one category.
pub fn classify(item: &ContentItem) -> Category {
    let category = match item {
        ContentItem::Figure(_) => Category::PlotFigure,
        ContentItem::Plotly(_) => Category::PlotlySpec,
        ContentItem::Text(text) => classify_text(text),
        ContentItem::Json(value) => classify_json(value),
    };

    tracing::debug!(kind = item.kind(), %category, "Classified content item");
    category
}

/// Classifies text, which may be a path, a URL, serialized JSON, or prose.
pub fn classify_text(text: &str) -> Category {
    if is_image_file(text) {
        Category::ImageFile
    } else if is_image_url(text) {
        Category::ImageUrl
    } else if text.contains(VEGA_LITE_SCHEMA) {
        Category::VegaLiteSpec
    } else if is_plotly_text(text) {
        Category::PlotlySpec
    } else {
        classify_prose(text)
    }
}

/// Classifies an already-parsed JSON value.
///
/// Values that are neither Vega-Lite nor Plotly are classified by their
/// serialized text, which always lands in one of the text categories.
pub fn classify_json(value: &Value) -> Category {
    let serialized = value.to_string();

    if serialized.contains(VEGA_LITE_SCHEMA) {
        Category::VegaLiteSpec
    } else if is_plotly_structure(value) {
        Category::PlotlySpec
    } else {
        classify_prose(&serialized)
    }
}

/// Step 6: distinguishes markdown, raw HTML/LaTeX, and plain text.
pub fn classify_prose(text: &str) -> Category {
    let has_escaped_latex = ESCAPED_LATEX.iter().any(|d| text.contains(d));

    if text.contains(MARKDOWN_TRIGGERS) && !has_escaped_latex {
        Category::MarkdownText
    } else if has_escaped_latex || text.contains('<') {
        Category::RawHtmlText
    } else {
        Category::PlainText
    }
}

/// Returns `true` when `text` names an existing local file with an image
/// extension.
pub fn is_image_file(text: &str) -> bool {
    let path = Path::new(text);
    if !path.is_file() {
        return false;
    }

    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Returns `true` when `text` is URL-shaped and carries an image extension.
///
/// Host names are matched by a URL pattern; absolute `http(s)` URLs with
/// an IP address or `localhost` host are recognized by parsing.
pub fn is_image_url(text: &str) -> bool {
    (URL_PATTERN.is_match(text) || is_absolute_http_url(text))
        && IMAGE_EXTENSION_PATTERN.is_match(text)
}

fn is_absolute_http_url(text: &str) -> bool {
    !text.contains(char::is_whitespace)
        && Url::parse(text)
            .map(|url| matches!(url.scheme(), "http" | "https") && url.host().is_some())
            .unwrap_or(false)
}

/// Returns `true` when `text` looks like a Plotly figure.
///
/// Text that parses as JSON must have the Plotly structure. Text that does
/// not parse falls back to a loose substring check for a `data` member; this
/// fallback is deliberately lenient and can match malformed or truncated
/// JSON.
pub fn is_plotly_text(text: &str) -> bool {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => is_plotly_structure(&value),
        Err(_) => text.contains(r#"{"data":[{"#) || text.contains(r#""data":"#),
    }
}

/// Returns `true` when `value` is an object with a `data` list that either
/// holds a recognizable trace or sits next to a `layout` member.
///
/// A trace is recognizable when its `type` is in [`PLOTLY_TRACE_TYPES`], or,
/// for traces without a `type`, when it carries an axis-like key. A trace
/// with an unknown `type` is not recognizable even if it has axis keys.
pub fn is_plotly_structure(value: &Value) -> bool {
    let Some(object) = value.as_object() else {
        return false;
    };
    let Some(traces) = object.get("data").and_then(Value::as_array) else {
        return false;
    };

    let has_known_trace = traces.iter().filter_map(Value::as_object).any(|trace| {
        match trace.get("type") {
            Some(kind) => kind
                .as_str()
                .map(|kind| PLOTLY_TRACE_TYPES.contains(&kind))
                .unwrap_or(false),
            None => AXIS_KEYS.iter().any(|key| trace.contains_key(*key)),
        }
    });

    has_known_trace || object.contains_key("layout")
}
