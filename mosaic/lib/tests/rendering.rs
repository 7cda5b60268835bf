mod common;

use common::{first_single_quoted_id, fixture_path, load_fixture};
use mosaic_lib::content::{ContentItem, FigureFormat, SvgFigure};
use mosaic_lib::render::{RenderError, RenderOptions, Renderer};
use mosaic_lib::row::render_list;
use mosaic_lib::session::Session;
use mosaic_lib::shared_data::SharedDataStore;
use mosaic_lib::style::{StyleError, StyleSpec, encode};
use serde_json::json;

#[test]
fn test_class_list_matches_class_string() {
    let list = StyleSpec::new().with("class", json!(["a", "b"]));
    let text = StyleSpec::new().with("class", "a b");
    assert_eq!(encode(&list).unwrap(), "class='a b'");
    assert_eq!(encode(&list).unwrap(), encode(&text).unwrap());
}

#[test]
fn test_list_style_value_is_invalid() {
    let err = encode(&StyleSpec::new().with("font_size", json!([1, 2]))).unwrap_err();
    assert!(matches!(err, StyleError::InvalidStyleValue { .. }));
}

#[test]
fn test_render_list_length_mismatch() {
    let store = SharedDataStore::new();
    let renderer = Renderer::new(&store);
    let items = vec![ContentItem::from("a"), ContentItem::from("b"), ContentItem::from("c")];
    let err = render_list(&renderer, &items, Some(&[1, 2]), None, None).unwrap_err();
    assert!(matches!(err, RenderError::LengthMismatch { .. }));
}

#[test]
fn test_markdown_fixture() {
    let store = SharedDataStore::new();
    let fragment = Renderer::new(&store)
        .render_item(&load_fixture("notes.md").into(), &StyleSpec::new(), None)
        .unwrap();
    let html = fragment.html();

    assert!(html.starts_with("<div>"));
    assert!(html.contains("<h2>Findings</h2>"));
    assert!(html.contains(r"\(y = ax^2 + b\)"));
    assert!(html.contains(r"\["));
    assert!(html.contains("<em>convergence</em>"));
    assert!(html.contains(r#"<a href="https://example.com/outliers">outliers</a>"#));
    assert!(html.contains(r#"<div class="codehilite"><pre><code class="language-python">"#));
}

#[test]
fn test_vega_fixture() {
    let store = SharedDataStore::new();
    let fragment = Renderer::new(&store)
        .render_item(&load_fixture("vega_bar.json").into(), &StyleSpec::new(), None)
        .unwrap();

    let chart_id = first_single_quoted_id(fragment.html());
    assert!(chart_id.starts_with("chart-"));
    let script = fragment.script().unwrap();
    assert!(script.contains(&chart_id));
    assert!(script.contains(r#""mark": "bar""#));
    assert!(script.contains("vegaEmbed("));
}

#[test]
fn test_plotly_fixture_literal_embedding() {
    let store = SharedDataStore::new();
    let fragment = Renderer::new(&store)
        .render_item(&load_fixture("plotly_scatter.json").into(), &StyleSpec::new(), None)
        .unwrap();

    assert!(fragment.html().contains("height: 400px;"));
    let script = fragment.script().unwrap();
    assert!(script.contains(r#"\"type\": \"scatter\""#));
    assert!(script.contains(r#"replace(/\u2019/g, "'")"#));
    assert!(script.contains("showError('Error: Plotly.js is not loaded');"));
}

#[test]
fn test_local_image_fixture() {
    let store = SharedDataStore::new();
    let path = fixture_path("square.svg");
    let fragment = Renderer::new(&store)
        .render_item(&ContentItem::from(path.as_path()), &StyleSpec::new(), None)
        .unwrap();

    let html = fragment.html();
    assert!(html.starts_with(r#"<img src="data:image/svg+xml;base64,"#));
    assert!(html.contains("style='max-width: 100%;' class='img-fluid'"));
}

#[test]
fn test_session_options_apply_to_figures() {
    let mut options = RenderOptions::default();
    options.figure_format = FigureFormat::Png;
    options.alt = "A square".to_string();
    let mut session = Session::with_options(options);

    session
        .add_item(SvgFigure::new(load_fixture("square.svg")), &StyleSpec::new(), None)
        .unwrap();
    let html = session.fragments()[0].html();
    assert!(html.starts_with(r#"<img src="data:image/png;base64,iVBORw0KGgo"#));
    assert!(html.contains(r#"alt="A square""#));
}

#[test]
fn test_row_with_mixed_content() {
    let mut session = Session::new();
    let items = vec![
        ContentItem::from("Intro text"),
        ContentItem::from(fixture_path("square.svg").as_path()),
    ];
    session.add_row(&items, Some(&[4, 8]), None, None).unwrap();

    let html = session.fragments()[0].html();
    assert!(html.starts_with("<div class='row'><div class='col-md-4 responsive-text'><p>Intro text</p></div>"));
    assert!(html.contains("<div class='col-md-8 responsive-text'><img "));
    assert!(html.contains("class='d-flex justify-content-center mx-auto img-fluid'"));
}

#[test]
fn test_global_geojson_chart() {
    let mut session = Session::new();
    session
        .add_global_geojson_chart(
            load_fixture("plotly_scatter.json"),
            "world-geojson",
            &StyleSpec::new(),
        )
        .unwrap();
    let script = session.fragments()[0].script().unwrap();
    assert!(script.contains(r#"var geojsonElementId = "world-geojson";"#));
    assert!(script.contains(r#""type":"scatter""#));
}
