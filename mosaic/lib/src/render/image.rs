//! Image loading and embedding.
//!
//! Local files are read from disk and remote images are fetched with a
//! blocking GET; either way the bytes end up inline as a base64 data URI.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use url::Url;

use super::types::{RenderError, RenderResult};

/// Returns `true` when `source` carries an `http` or `https` scheme.
pub fn is_remote(source: &str) -> bool {
    let lower = source.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// The MIME type for an image path or URL, from its extension.
///
/// For URLs only the path component is considered, so query strings and
/// fragments do not hide the extension. Unknown extensions map to
/// `image/png`.
pub fn mime_type_for(source: &str) -> &'static str {
    let extension = if is_remote(source) {
        Url::parse(source)
            .ok()
            .and_then(|url| extension_of(url.path()))
    } else {
        extension_of(source)
    };

    match extension.as_deref() {
        Some("svg") => "image/svg+xml",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        _ => "image/png",
    }
}

fn extension_of(path: &str) -> Option<String> {
    Path::new(path)
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
}

/// Encodes bytes as a `data:` URI.
pub fn data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, BASE64.encode(bytes))
}

/// Loads image bytes from a local path or an `http(s)` URL.
///
/// ## Errors
///
/// - [`RenderError::FileRead`] if a local file cannot be read
/// - [`RenderError::FetchError`] if the request fails
/// - [`RenderError::FetchStatus`] if the server answers with a non-success
///   status
#[tracing::instrument]
pub fn load_image_bytes(source: &str) -> RenderResult<Vec<u8>> {
    if is_remote(source) {
        fetch_image(source)
    } else {
        std::fs::read(source).map_err(|e| RenderError::FileRead {
            path: source.into(),
            source: e,
        })
    }
}

fn fetch_image(url: &str) -> RenderResult<Vec<u8>> {
    tracing::debug!(url = %url, "Fetching remote image");

    let response = reqwest::blocking::get(url).map_err(|e| RenderError::FetchError {
        url: url.to_string(),
        source: e,
    })?;

    let status = response.status();
    if !status.is_success() {
        tracing::warn!(url = %url, status = status.as_u16(), "Image fetch returned an error status");
        return Err(RenderError::FetchStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let bytes = response.bytes().map_err(|e| RenderError::FetchError {
        url: url.to_string(),
        source: e,
    })?;

    tracing::debug!(url = %url, bytes = bytes.len(), "Fetched remote image");
    Ok(bytes.to_vec())
}
