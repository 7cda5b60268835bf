//! Content items and their classification.
//!
//! A [`ContentItem`] is an untyped input: text (which may be a path, a URL,
//! serialized JSON, markdown or HTML), a parsed JSON value, or an in-memory
//! figure. [`classify`] decides which [`Category`] of renderer applies.
//!
//! ## Examples
//!
//! ```
//! use mosaic_lib::content::{Category, ContentItem, classify};
//! use serde_json::json;
//!
//! let item = ContentItem::from(json!({
//!     "data": [{"type": "bar", "x": ["a"], "y": [1]}],
//!     "layout": {}
//! }));
//! assert_eq!(classify(&item), Category::PlotlySpec);
//! ```

pub mod classify;
mod figure;
mod types;

pub use classify::{classify, classify_json, classify_prose, classify_text};
pub use figure::{Figure, FigureError, FigureFormat, PlotlyChart, PlotlyFigure, SvgFigure};
pub use types::{Category, ContentItem};
