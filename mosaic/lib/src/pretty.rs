//! HTML pretty-printing.
//!
//! Fragments are parsed with `scraper` (html5ever) and written back one node
//! per line, indented by one space per level. Parsing also normalizes the
//! markup: unclosed tags are closed and attribute values are re-quoted.
//!
//! ## Examples
//!
//! ```
//! use mosaic_lib::pretty::prettify;
//!
//! assert_eq!(
//!     prettify("<div><p>Hello</p></div>"),
//!     "<div>\n <p>\n  Hello\n </p>\n</div>\n"
//! );
//! ```

use scraper::{ElementRef, Html, Node};

/// Elements without content or closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Elements whose text content is written back unescaped.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Elements whose content keeps its whitespace and markup.
const VERBATIM_ELEMENTS: &[&str] = &["pre", "textarea"];

/// Re-indents an HTML fragment.
pub fn prettify(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut out = String::with_capacity(html.len() + html.len() / 2);
    write_children(fragment.root_element(), 0, &mut out);
    out
}

fn indent(depth: usize, out: &mut String) {
    out.extend(std::iter::repeat_n(' ', depth));
}

fn write_children(parent: ElementRef<'_>, depth: usize, out: &mut String) {
    for child in parent.children() {
        if let Some(element) = ElementRef::wrap(child) {
            write_element(element, depth, out);
            continue;
        }

        match child.value() {
            Node::Text(text) => {
                let text = text.trim();
                if !text.is_empty() {
                    indent(depth, out);
                    out.push_str(&html_escape::encode_text(text));
                    out.push('\n');
                }
            }
            Node::Comment(comment) => {
                indent(depth, out);
                out.push_str("<!--");
                out.push_str(comment);
                out.push_str("-->\n");
            }
            _ => {}
        }
    }
}

fn write_element(element: ElementRef<'_>, depth: usize, out: &mut String) {
    let name = element.value().name();

    indent(depth, out);
    out.push('<');
    out.push_str(name);
    for (attr, value) in element.value().attrs.iter() {
        let value: &str = value;
        out.push(' ');
        if let Some(prefix) = &attr.prefix {
            out.push_str(prefix);
            out.push(':');
        }
        out.push_str(&attr.local);
        out.push_str("=\"");
        out.push_str(&html_escape::encode_double_quoted_attribute(value));
        out.push('"');
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&name) {
        out.push('\n');
        return;
    }

    if RAW_TEXT_ELEMENTS.contains(&name) {
        out.extend(element.text());
        out.push_str("</");
        out.push_str(name);
        out.push_str(">\n");
        return;
    }

    if VERBATIM_ELEMENTS.contains(&name) {
        out.push_str(&element.inner_html());
        out.push_str("</");
        out.push_str(name);
        out.push_str(">\n");
        return;
    }

    out.push('\n');
    write_children(element, depth + 1, out);
    indent(depth, out);
    out.push_str("</");
    out.push_str(name);
    out.push_str(">\n");
}
