//! Plain HTML element builders.
//!
//! Content passed to these builders is HTML and is inserted as-is; only
//! attribute values are escaped.

use crate::style::StyleSpec;

use super::types::{RenderError, RenderResult};

/// Tags accepted by [`heading`].
pub const HEADING_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5"];

/// Tags accepted by [`text`].
pub const TEXT_TAGS: &[&str] = &["p", "span"];

/// Wraps `inner` in `tag`, adding `attrs` when non-empty.
pub fn element(tag: &str, attrs: &str, inner: &str) -> String {
    if attrs.is_empty() {
        format!("<{tag}>{inner}</{tag}>")
    } else {
        format!("<{tag} {attrs}>{inner}</{tag}>")
    }
}

/// An `img` element with an already-encoded `src`.
pub fn img(src: &str, alt: &str, attrs: &str) -> String {
    let mut out = format!(
        r#"<img src="{}" alt="{}""#,
        html_escape::encode_double_quoted_attribute(src),
        html_escape::encode_double_quoted_attribute(alt)
    );
    if !attrs.is_empty() {
        out.push(' ');
        out.push_str(attrs);
    }
    out.push('>');
    out
}

fn check_tag(tag: &str, allowed: &[&str], names: &'static str) -> RenderResult<()> {
    if allowed.contains(&tag) {
        Ok(())
    } else {
        Err(RenderError::UnsupportedTag {
            tag: tag.to_string(),
            allowed: names,
        })
    }
}

/// A heading, optionally preceded by an icon.
///
/// ## Errors
///
/// [`RenderError::UnsupportedTag`] unless `tag` is `h1` through `h5`.
///
/// ## Examples
///
/// ```
/// use mosaic_lib::render::heading;
/// use mosaic_lib::style::StyleSpec;
///
/// let html = heading("Results", "h2", Some("fa fa-chart"), &StyleSpec::new()).unwrap();
/// assert_eq!(html, "<h2><i class='fa fa-chart'></i> Results</h2>");
/// assert!(heading("Results", "h6", None, &StyleSpec::new()).is_err());
/// ```
pub fn heading(text: &str, tag: &str, icon: Option<&str>, style: &StyleSpec) -> RenderResult<String> {
    check_tag(tag, HEADING_TAGS, "h1, h2, h3, h4, h5")?;
    let inner = match icon {
        Some(icon) => format!(
            "<i class='{}'></i> {}",
            html_escape::encode_single_quoted_attribute(icon),
            text
        ),
        None => text.to_string(),
    };
    Ok(element(tag, &style.encode()?, &inner))
}

/// A paragraph or span.
///
/// ## Errors
///
/// [`RenderError::UnsupportedTag`] unless `tag` is `p` or `span`.
pub fn text(text: &str, tag: &str, style: &StyleSpec) -> RenderResult<String> {
    check_tag(tag, TEXT_TAGS, "p, span")?;
    Ok(element(tag, &style.encode()?, text))
}

/// An unordered (`ul`) or ordered (`ol`) list.
pub fn list<S: AsRef<str>>(items: &[S], ordered: bool, style: &StyleSpec) -> RenderResult<String> {
    let tag = if ordered { "ol" } else { "ul" };
    let inner: String = items
        .iter()
        .map(|item| format!("<li>{}</li>", item.as_ref()))
        .collect();
    Ok(element(tag, &style.encode()?, &inner))
}

/// A `div` around raw HTML.
pub fn div(html: &str, style: &StyleSpec) -> RenderResult<String> {
    Ok(element("div", &style.encode()?, html))
}
