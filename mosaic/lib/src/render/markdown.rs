//! Markdown to HTML with LaTeX delimiter rewriting.
//!
//! `$$...$$` (display, may span lines) and `$...$` (inline) are rewritten
//! to `\\[...\\]` and `\\(...\\)` before conversion. Markdown consumes one
//! level of backslash escaping, so the HTML carries the `\[...\]` and
//! `\(...\)` delimiters that client-side math renderers look for.
//!
//! Fenced and indented code blocks are highlighted with class-based spans
//! inside `<div class="codehilite">`, leaving colors to the page's CSS.

use lazy_static::lazy_static;
use pulldown_cmark::{CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use regex::Regex;
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use super::types::{RenderError, RenderResult};

lazy_static! {
    static ref DISPLAY_MATH: Regex = Regex::new(r"(?s)\$\$(.*?)\$\$").unwrap();
    static ref INLINE_MATH: Regex = Regex::new(r"\$(.*?)\$").unwrap();
    static ref SYNTAX_SET: SyntaxSet = two_face::syntax::extra_newlines();
}

/// Rewrites `$$...$$` and `$...$` LaTeX delimiters into escaped bracket
/// delimiters that survive markdown conversion.
///
/// ## Examples
///
/// ```
/// use mosaic_lib::render::rewrite_latex;
///
/// assert_eq!(rewrite_latex("$$x^2$$"), r"\\[x^2\\]");
/// assert_eq!(rewrite_latex("where $a$ holds"), r"where \\(a\\) holds");
/// ```
pub fn rewrite_latex(text: &str) -> String {
    let display = DISPLAY_MATH.replace_all(text, r"\\[${1}\\]");
    INLINE_MATH.replace_all(&display, r"\\(${1}\\)").into_owned()
}

fn markdown_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_HEADING_ATTRIBUTES
        | Options::ENABLE_DEFINITION_LIST
}

/// Converts markdown (with LaTeX) to HTML.
///
/// ## Errors
///
/// Returns [`RenderError::Highlight`] if a code block cannot be highlighted.
pub fn markdown_to_html(text: &str) -> RenderResult<String> {
    let source = rewrite_latex(text);
    let parser = Parser::new_ext(&source, markdown_options());

    let mut events: Vec<Event> = Vec::new();
    let mut in_code_block = false;
    let mut code_buffer = String::new();
    let mut code_lang = String::new();

    for event in parser {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                in_code_block = true;
                code_buffer.clear();
                code_lang = match kind {
                    CodeBlockKind::Fenced(info) => {
                        info.split_whitespace().next().unwrap_or("").to_string()
                    }
                    CodeBlockKind::Indented => String::new(),
                };
            }
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
                let html = highlight_code(&code_buffer, &code_lang)?;
                events.push(Event::Html(CowStr::from(html)));
            }
            Event::Text(text) if in_code_block => code_buffer.push_str(&text),
            other => events.push(other),
        }
    }

    let mut output = String::with_capacity(source.len() * 3 / 2);
    pulldown_cmark::html::push_html(&mut output, events.into_iter());
    Ok(output)
}

/// Highlights one code block as class-based spans.
fn highlight_code(code: &str, language: &str) -> RenderResult<String> {
    let syntax = if language.is_empty() {
        SYNTAX_SET.find_syntax_plain_text()
    } else {
        SYNTAX_SET
            .find_syntax_by_token(language)
            .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text())
    };

    let mut generator =
        ClassedHTMLGenerator::new_with_class_style(syntax, &SYNTAX_SET, ClassStyle::Spaced);
    for line in LinesWithEndings::from(code) {
        generator
            .parse_html_for_line_which_includes_newline(line)
            .map_err(|e| RenderError::Highlight(e.to_string()))?;
    }

    let mut output = String::from(r#"<div class="codehilite"><pre><code"#);
    if !language.is_empty() {
        output.push_str(&format!(
            r#" class="language-{}""#,
            html_escape::encode_double_quoted_attribute(language)
        ));
    }
    output.push('>');
    output.push_str(&generator.finalize());
    output.push_str("</code></pre></div>\n");
    Ok(output)
}
