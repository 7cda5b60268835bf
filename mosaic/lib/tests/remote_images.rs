use mosaic_lib::content::{Category, ContentItem, classify};
use mosaic_lib::render::{RenderError, RenderedFragment, Renderer, load_image_bytes};
use mosaic_lib::shared_data::SharedDataStore;
use mosaic_lib::style::StyleSpec;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n";

/// Renders `url` on a blocking thread; the fetch uses a blocking client.
async fn render_url(url: String) -> Result<RenderedFragment, RenderError> {
    tokio::task::spawn_blocking(move || {
        let store = SharedDataStore::new();
        let item = ContentItem::from(url);
        Renderer::new(&store).render_item(&item, &StyleSpec::new(), None)
    })
    .await
    .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_remote_image_is_embedded() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/img/logo.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(PNG_BYTES))
        .mount(&mock_server)
        .await;

    let url = format!("{}/img/logo.png", mock_server.uri());
    assert_eq!(classify(&ContentItem::from(url.as_str())), Category::ImageUrl);

    let fragment = render_url(url).await.unwrap();
    assert_eq!(
        fragment.html(),
        r#"<img src="data:image/png;base64,iVBORw0KGgo=" alt="" class='img-fluid'>"#
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_remote_svg_uses_url_path_for_mime() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/chart.svg"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<svg></svg>"))
        .mount(&mock_server)
        .await;

    let url = format!("{}/chart.svg?version=2", mock_server.uri());
    let fragment = render_url(url).await.unwrap();
    assert!(fragment.html().starts_with(r#"<img src="data:image/svg+xml;base64,"#));
    assert!(fragment.html().contains("max-width: 100%;"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_error_status_is_a_fetch_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing.png"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let url = format!("{}/missing.png", mock_server.uri());
    let err = render_url(url.clone()).await.unwrap_err();
    match err {
        RenderError::FetchStatus { url: failed, status } => {
            assert_eq!(failed, url);
            assert_eq!(status, 404);
        }
        other => panic!("expected FetchStatus, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unreachable_host_is_a_fetch_error() {
    // Reserve a port, then release it so connections are refused.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let url = format!("http://{addr}/gone.png");

    let result = tokio::task::spawn_blocking(move || load_image_bytes(&url))
        .await
        .unwrap();
    assert!(
        matches!(result, Err(RenderError::FetchError { .. })),
        "expected FetchError, got {result:?}"
    );
}
