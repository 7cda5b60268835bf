//! Content classification and HTML fragment rendering for slide decks.
//!
//! Heterogeneous content items (plain strings, markdown with LaTeX, image
//! paths and URLs, Plotly and Vega-Lite chart specs, in-memory figures) are
//! classified into a [`content::Category`] and rendered into HTML fragments.
//! Interactive charts are drawn client-side by an embedded script, and
//! several charts can share one large JSON payload registered once in a
//! [`shared_data::SharedDataStore`].
//!
//! ## Modules
//!
//! - [`style`] - Style/class specifications encoded as attribute text
//! - [`content`] - Content items, figure capabilities and the classifier
//! - [`shared_data`] - Named JSON payloads shared between charts
//! - [`render`] - Per-category fragment rendering and emitted scripts
//! - [`session`] - Fragment accumulation for one document
//! - [`row`] - Grid rows of rendered items
//! - [`pretty`] - HTML pretty-printing
//!
//! ## Examples
//!
//! ```
//! use mosaic_lib::content::{Category, ContentItem, classify};
//! use mosaic_lib::session::Session;
//! use mosaic_lib::style::StyleSpec;
//!
//! assert_eq!(classify(&ContentItem::from("$x^2$ is nice")), Category::MarkdownText);
//!
//! let mut session = Session::new();
//! session.add_item("Plain words", &StyleSpec::new(), None).unwrap();
//! assert_eq!(session.render_raw(), "<div><p>Plain words</p></div>");
//! ```

pub mod content;
pub mod pretty;
pub mod render;
pub mod row;
pub mod session;
pub mod shared_data;
pub mod style;
