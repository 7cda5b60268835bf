//! Rendering of classified content into HTML fragments.
//!
//! [`Renderer::render`] dispatches on a [`Category`] and produces a
//! [`RenderedFragment`]. Interactive categories (Plotly and Vega-Lite) pair
//! a uniquely identified container with a `<script>` block that draws the
//! chart in the browser; see [`script`] for the emitted scripts.
//!
//! Image-bearing categories always receive the `img-fluid` class on top of
//! the caller's style.
//!
//! ## Examples
//!
//! ```
//! use mosaic_lib::content::{Category, ContentItem};
//! use mosaic_lib::render::Renderer;
//! use mosaic_lib::shared_data::SharedDataStore;
//! use mosaic_lib::style::StyleSpec;
//!
//! let store = SharedDataStore::new();
//! let renderer = Renderer::new(&store);
//!
//! let fragment = renderer
//!     .render(Category::PlainText, &ContentItem::from("Hello"), &StyleSpec::new(), None)
//!     .unwrap();
//! assert_eq!(fragment.html(), "<p>Hello</p>");
//! ```

mod elements;
mod image;
mod markdown;
pub mod script;
mod types;

pub use elements::{HEADING_TAGS, TEXT_TAGS, div, element, heading, img, list, text};
pub use image::{data_uri, is_remote, load_image_bytes, mime_type_for};
pub use markdown::{markdown_to_html, rewrite_latex};
pub use types::{DEFAULT_CHART_HEIGHT, RenderError, RenderOptions, RenderResult, RenderedFragment};

use std::borrow::Cow;

use serde_json::Value;
use uuid::Uuid;

use crate::content::{Category, ContentItem, Figure, FigureFormat, classify};
use crate::shared_data::SharedDataStore;
use crate::style::{IMG_FLUID, StyleSpec};

/// Renders content items against a session's shared data store.
#[derive(Debug, Clone)]
pub struct Renderer<'a> {
    store: &'a SharedDataStore,
    options: RenderOptions,
}

impl<'a> Renderer<'a> {
    /// Creates a renderer with default [`RenderOptions`].
    pub fn new(store: &'a SharedDataStore) -> Self {
        Self {
            store,
            options: RenderOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Classifies `item` and renders it.
    pub fn render_item(
        &self,
        item: &ContentItem,
        style: &StyleSpec,
        shared_data_id: Option<&str>,
    ) -> RenderResult<RenderedFragment> {
        self.render(classify(item), item, style, shared_data_id)
    }

    /// Renders `item` as `category`.
    ///
    /// `shared_data_id` only affects [`Category::PlotlySpec`].
    ///
    /// ## Errors
    ///
    /// - [`RenderError::Style`] if the style cannot be encoded
    /// - [`RenderError::ContentMismatch`] if `item` has the wrong shape for
    ///   `category` (for example a figure rendered as markdown)
    /// - fetch, file, figure export and serialization errors from the
    ///   per-category builders
    #[tracing::instrument(level = "debug", skip(self, item, style), fields(kind = item.kind()))]
    pub fn render(
        &self,
        category: Category,
        item: &ContentItem,
        style: &StyleSpec,
        shared_data_id: Option<&str>,
    ) -> RenderResult<RenderedFragment> {
        let mut style = style.clone();
        if category.is_image_bearing() {
            style.append_class(IMG_FLUID);
        }

        match category {
            Category::PlotFigure => match item {
                ContentItem::Figure(figure) => self.figure_fragment(figure.as_ref(), style),
                _ => Err(mismatch(category, item)),
            },
            Category::ImageFile | Category::ImageUrl => {
                let source = item.as_text().ok_or_else(|| mismatch(category, item))?;
                let source = if category == Category::ImageUrl && !is_remote(source) {
                    Cow::Owned(format!("https://{source}"))
                } else {
                    Cow::Borrowed(source)
                };
                self.image_fragment(&source, style)
            }
            Category::VegaLiteSpec => self.vega_lite_fragment(item, style),
            Category::PlotlySpec => self.plotly_fragment(item, style, shared_data_id),
            Category::MarkdownText => {
                let html = markdown_to_html(&text_of(category, item)?)?;
                Ok(RenderedFragment::new(div(&html, &style)?))
            }
            Category::RawHtmlText => Ok(RenderedFragment::new(div(
                &text_of(category, item)?,
                &style,
            )?)),
            Category::PlainText => Ok(RenderedFragment::new(text(
                &text_of(category, item)?,
                "p",
                &style,
            )?)),
        }
    }

    /// Renders an in-memory figure as inline SVG or a PNG data URI,
    /// according to [`RenderOptions::figure_format`].
    pub fn figure_fragment(
        &self,
        figure: &dyn Figure,
        style: StyleSpec,
    ) -> RenderResult<RenderedFragment> {
        let attrs = style.encode()?;
        let html = match self.options.figure_format {
            FigureFormat::Svg => {
                let bytes = figure.save(FigureFormat::Svg)?;
                let svg = String::from_utf8_lossy(&bytes).replace('\n', "");
                element("div", &attrs, &svg)
            }
            FigureFormat::Png => {
                let bytes = figure.save(FigureFormat::Png)?;
                img(&data_uri("image/png", &bytes), &self.options.alt, &attrs)
            }
        };
        Ok(RenderedFragment::new(html))
    }

    /// Renders a local or remote image as a data URI `img`.
    ///
    /// SVG images get `max-width: 100%` unless the style sets a max width.
    pub fn image_fragment(
        &self,
        source: &str,
        mut style: StyleSpec,
    ) -> RenderResult<RenderedFragment> {
        let mime = mime_type_for(source);
        if mime == "image/svg+xml" && !style.contains_key("max_width") {
            style.insert("max_width", "100%");
        }
        let bytes = load_image_bytes(source)?;
        Ok(RenderedFragment::new(img(
            &data_uri(mime, &bytes),
            &self.options.alt,
            &style.encode()?,
        )))
    }

    /// Renders a Vega-Lite spec as a container plus a `vegaEmbed` script.
    pub fn vega_lite_fragment(
        &self,
        item: &ContentItem,
        style: StyleSpec,
    ) -> RenderResult<RenderedFragment> {
        let spec_expr = match item {
            ContentItem::Json(value) => script::escape_script_json(&value.to_string()),
            ContentItem::Text(text) => match serde_json::from_str::<Value>(text) {
                Ok(_) => script::escape_script_json(text.trim()),
                Err(e) => {
                    tracing::warn!(error = %e, "Vega-Lite spec is not valid JSON; the chart will report the error when drawn");
                    format!("JSON.parse({})", script::js_string(text))
                }
            },
            _ => return Err(mismatch(Category::VegaLiteSpec, item)),
        };

        let chart_id = format!("chart-{}", Uuid::new_v4());
        let html = chart_container(&chart_id, &style)?;
        let script = script::vega_lite_script(&chart_id, &spec_expr, &self.options.vega_renderer);

        tracing::debug!(chart_id = %chart_id, "Rendered Vega-Lite chart");
        Ok(RenderedFragment::with_script(html, script))
    }

    /// Renders a Plotly figure as a sized container plus a drawing script.
    ///
    /// Without `shared_data_id` the figure JSON is embedded as a string
    /// literal. With one, the script reads the shared payload from the
    /// element the store resolves the id to (`shared-data-<id>` when
    /// registered, the id itself otherwise) and merges it at draw time; an
    /// empty figure means a default world choropleth of the payload.
    pub fn plotly_fragment(
        &self,
        item: &ContentItem,
        mut style: StyleSpec,
        shared_data_id: Option<&str>,
    ) -> RenderResult<RenderedFragment> {
        if !style.contains_key("width") {
            style.insert("width", "100%");
        }
        if !style.contains_key("height") {
            style.insert("height", self.options.chart_height.clone());
        }

        let chart_id = format!("plotly-chart-{}", Uuid::new_v4());
        let html = chart_container(&chart_id, &style)?;

        let script = match shared_data_id {
            Some(id) => {
                let element = self.store.resolve(id);
                let config = shared_chart_config(item)?;
                tracing::debug!(
                    chart_id = %chart_id,
                    element_id = element.element_id(),
                    local = element.is_local(),
                    has_config = config.is_some(),
                    "Rendered Plotly chart over shared data"
                );
                script::plotly_shared_script(&chart_id, element.element_id(), config.as_deref())
            }
            None => {
                let json = plotly_json(item)?;
                tracing::debug!(chart_id = %chart_id, bytes = json.len(), "Rendered Plotly chart");
                script::plotly_literal_script(&chart_id, &json)
            }
        };

        Ok(RenderedFragment::with_script(html, script))
    }

    /// Renders a Plotly figure whose choropleth traces read their GeoJSON
    /// from the document-global element `geojson_element_id`.
    pub fn global_geojson_fragment(
        &self,
        item: &ContentItem,
        geojson_element_id: &str,
        mut style: StyleSpec,
    ) -> RenderResult<RenderedFragment> {
        style.append_class(IMG_FLUID);
        if !style.contains_key("width") {
            style.insert("width", "100%");
        }
        if !style.contains_key("height") {
            style.insert("height", self.options.chart_height.clone());
        }

        let figure: Value = serde_json::from_str(&plotly_json(item)?)?;
        let chart_id = format!("plotly-chart-{}", Uuid::new_v4());
        let html = chart_container(&chart_id, &style)?;
        let script = script::plotly_global_geojson_script(
            &chart_id,
            geojson_element_id,
            &script::escape_script_json(&figure.to_string()),
        );

        tracing::debug!(chart_id = %chart_id, geojson_element_id, "Rendered global GeoJSON chart");
        Ok(RenderedFragment::with_script(html, script))
    }
}

fn mismatch(category: Category, item: &ContentItem) -> RenderError {
    RenderError::ContentMismatch {
        category,
        found: item.kind(),
    }
}

fn text_of(category: Category, item: &ContentItem) -> RenderResult<Cow<'_, str>> {
    match item {
        ContentItem::Text(text) => Ok(Cow::Borrowed(text.as_str())),
        ContentItem::Json(value) => Ok(Cow::Owned(value.to_string())),
        _ => Err(mismatch(category, item)),
    }
}

fn chart_container(chart_id: &str, style: &StyleSpec) -> RenderResult<String> {
    let attrs = style.encode()?;
    let id = format!("id='{chart_id}'");
    let attrs = if attrs.is_empty() {
        id
    } else {
        format!("{attrs} {id}")
    };
    Ok(element("div", &attrs, ""))
}

/// The Plotly figure JSON text of an item.
fn plotly_json(item: &ContentItem) -> RenderResult<String> {
    match item {
        ContentItem::Text(text) => Ok(text.clone()),
        ContentItem::Json(value) => Ok(value.to_string()),
        ContentItem::Plotly(figure) => Ok(figure.to_json()?),
        ContentItem::Figure(_) => Err(mismatch(Category::PlotlySpec, item)),
    }
}

/// The figure to combine with shared data, ready to embed as code, or
/// `None` when the item is empty.
fn shared_chart_config(item: &ContentItem) -> RenderResult<Option<String>> {
    let value = match item {
        ContentItem::Text(text) if text.trim().is_empty() => return Ok(None),
        ContentItem::Text(text) => match serde_json::from_str::<Value>(text) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "Chart config is not valid JSON; drawing the default map");
                return Ok(None);
            }
        },
        ContentItem::Json(value) => value.clone(),
        ContentItem::Plotly(figure) => serde_json::from_str(&figure.to_json()?)?,
        ContentItem::Figure(_) => return Err(mismatch(Category::PlotlySpec, item)),
    };

    let empty = match &value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(text) => text.is_empty(),
        _ => false,
    };

    Ok((!empty).then(|| script::escape_script_json(&value.to_string())))
}
