//! A rendering session: one logical document build.
//!
//! A [`Session`] owns the [`SharedDataStore`] for the document, an ordered
//! list of rendered fragments and a registry of named document-level
//! scripts. Every `add_*` operation renders one fragment immediately and
//! appends it; [`Session::render`] assembles the document body.
//!
//! ## Examples
//!
//! ```
//! use mosaic_lib::session::Session;
//! use mosaic_lib::shared_data::SharedDataType;
//! use mosaic_lib::style::StyleSpec;
//! use serde_json::json;
//!
//! let mut session = Session::new();
//! session
//!     .add_shared_data("geo1", json!({"type": "FeatureCollection", "features": []}), SharedDataType::Geojson)
//!     .unwrap();
//! session.add_heading("Coverage", "h2", None, &StyleSpec::new()).unwrap();
//! session.add_plotly(json!({}), Some("geo1"), &StyleSpec::new()).unwrap();
//!
//! let html = session.render();
//! assert!(html.contains(r#"id="shared-data-geo1""#));
//! assert!(html.contains(r#"var dataElementId = "shared-data-geo1";"#));
//! ```

use crate::content::{Category, ContentItem, Figure, FigureFormat};
use crate::pretty::prettify;
use crate::render::{
    RenderOptions, RenderResult, RenderedFragment, Renderer, div, heading, is_remote, list, text,
};
use crate::row::render_row;
use crate::shared_data::{SharedDataStore, SharedDataType, SharedDatum, SharedPayload};
use crate::style::{IMG_FLUID, StyleSpec};

/// Accumulates fragments and shared data for one document.
#[derive(Debug, Default)]
pub struct Session {
    options: RenderOptions,
    store: SharedDataStore,
    fragments: Vec<RenderedFragment>,
    scripts: Vec<(String, String)>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RenderOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn store(&self) -> &SharedDataStore {
        &self.store
    }

    /// The fragments rendered so far, in order.
    pub fn fragments(&self) -> &[RenderedFragment] {
        &self.fragments
    }

    /// Named document-level scripts, in first-registration order.
    pub fn scripts(&self) -> impl Iterator<Item = (&str, &str)> {
        self.scripts
            .iter()
            .map(|(name, script)| (name.as_str(), script.as_str()))
    }

    fn renderer(&self) -> Renderer<'_> {
        Renderer::new(&self.store).with_options(self.options.clone())
    }

    fn push(&mut self, fragment: RenderedFragment) {
        self.fragments.push(fragment);
    }

    /// Drops every fragment, script and shared payload.
    pub fn clear(&mut self) {
        tracing::debug!(
            fragments = self.fragments.len(),
            shared = self.store.len(),
            "Clearing session"
        );
        self.fragments.clear();
        self.scripts.clear();
        self.store.clear();
    }

    /// Registers a named document-level script, replacing one with the same
    /// name.
    pub fn add_script(&mut self, name: impl Into<String>, script: impl Into<String>) {
        let name = name.into();
        let script = script.into();
        match self.scripts.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = script,
            None => self.scripts.push((name, script)),
        }
    }

    /// Registers a shared payload; its hidden element is emitted by
    /// [`Session::render`] ahead of every fragment.
    pub fn add_shared_data(
        &mut self,
        id: impl Into<String>,
        payload: impl Into<SharedPayload>,
        data_type: SharedDataType,
    ) -> RenderResult<&SharedDatum> {
        Ok(self.store.register(id, payload, data_type)?)
    }

    /// Adds a heading (`h1` to `h5`), optionally preceded by an icon.
    pub fn add_heading(
        &mut self,
        text: &str,
        tag: &str,
        icon: Option<&str>,
        style: &StyleSpec,
    ) -> RenderResult<()> {
        let html = heading(text, tag, icon, style)?;
        self.push(RenderedFragment::new(html));
        Ok(())
    }

    /// Adds a paragraph (`p`) or a `span`.
    pub fn add_text(&mut self, content: &str, tag: &str, style: &StyleSpec) -> RenderResult<()> {
        let html = text(content, tag, style)?;
        self.push(RenderedFragment::new(html));
        Ok(())
    }

    pub fn add_list<S: AsRef<str>>(
        &mut self,
        items: &[S],
        ordered: bool,
        style: &StyleSpec,
    ) -> RenderResult<()> {
        let html = list(items, ordered, style)?;
        self.push(RenderedFragment::new(html));
        Ok(())
    }

    /// Adds a local or remote image, embedded as a data URI.
    pub fn add_image(&mut self, src: &str, alt: Option<&str>, style: &StyleSpec) -> RenderResult<()> {
        let mut options = self.options.clone();
        if let Some(alt) = alt {
            options.alt = alt.to_string();
        }
        let category = if is_remote(src) {
            Category::ImageUrl
        } else {
            Category::ImageFile
        };
        let fragment = Renderer::new(&self.store)
            .with_options(options)
            .render(category, &ContentItem::from(src), style, None)?;
        self.push(fragment);
        Ok(())
    }

    /// Adds inline SVG markup.
    pub fn add_svg(&mut self, svg: &str, style: &StyleSpec) -> RenderResult<()> {
        let html = div(svg, &style.clone().with_class(IMG_FLUID))?;
        self.push(RenderedFragment::new(html));
        Ok(())
    }

    /// Adds raw HTML in a `div`.
    pub fn add_div(&mut self, html: &str, style: &StyleSpec) -> RenderResult<()> {
        let html = div(html, style)?;
        self.push(RenderedFragment::new(html));
        Ok(())
    }

    /// Adds an in-memory figure as inline SVG or as a PNG `img`.
    pub fn add_figure(
        &mut self,
        figure: &dyn Figure,
        alt: Option<&str>,
        format: FigureFormat,
        style: &StyleSpec,
    ) -> RenderResult<()> {
        let mut options = self.options.clone();
        options.figure_format = format;
        if let Some(alt) = alt {
            options.alt = alt.to_string();
        }
        let fragment = Renderer::new(&self.store)
            .with_options(options)
            .figure_fragment(figure, style.clone().with_class(IMG_FLUID))?;
        self.push(fragment);
        Ok(())
    }

    /// Adds an interactive Plotly chart, optionally drawn over shared data.
    pub fn add_plotly(
        &mut self,
        item: impl Into<ContentItem>,
        shared_data_id: Option<&str>,
        style: &StyleSpec,
    ) -> RenderResult<()> {
        let fragment =
            self.renderer()
                .render(Category::PlotlySpec, &item.into(), style, shared_data_id)?;
        self.push(fragment);
        Ok(())
    }

    /// Adds an interactive Vega-Lite chart.
    pub fn add_vega_lite(&mut self, item: impl Into<ContentItem>, style: &StyleSpec) -> RenderResult<()> {
        let fragment = self
            .renderer()
            .render(Category::VegaLiteSpec, &item.into(), style, None)?;
        self.push(fragment);
        Ok(())
    }

    /// Adds a Plotly chart whose choropleth traces read their GeoJSON from
    /// the document-global element `geojson_element_id`.
    pub fn add_global_geojson_chart(
        &mut self,
        config: impl Into<ContentItem>,
        geojson_element_id: &str,
        style: &StyleSpec,
    ) -> RenderResult<()> {
        let fragment = self.renderer().global_geojson_fragment(
            &config.into(),
            geojson_element_id,
            style.clone(),
        )?;
        self.push(fragment);
        Ok(())
    }

    /// Classifies `item` and adds it.
    pub fn add_item(
        &mut self,
        item: impl Into<ContentItem>,
        style: &StyleSpec,
        shared_data_id: Option<&str>,
    ) -> RenderResult<()> {
        let fragment = self
            .renderer()
            .render_item(&item.into(), style, shared_data_id)?;
        self.push(fragment);
        Ok(())
    }

    /// Adds a grid row; see [`render_row`].
    pub fn add_row(
        &mut self,
        items: &[ContentItem],
        columns: Option<&[u8]>,
        styles: Option<&[StyleSpec]>,
        shared_data_ids: Option<&[Option<String>]>,
    ) -> RenderResult<()> {
        let html = render_row(&self.renderer(), items, columns, styles, shared_data_ids)?;
        self.push(RenderedFragment::new(html));
        Ok(())
    }

    /// The document body: shared data elements, then every fragment, in one
    /// `div`, without pretty-printing.
    pub fn render_raw(&self) -> String {
        let mut body = self.store.elements_html();
        for fragment in &self.fragments {
            body.push_str(&fragment.to_string());
        }
        format!("<div>{body}</div>")
    }

    /// The pretty-printed document body.
    pub fn render(&self) -> String {
        prettify(&self.render_raw())
    }
}
