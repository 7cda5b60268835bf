//! Rows of content items laid out in responsive grid columns.
//!
//! Each item is classified and rendered, then wrapped in a
//! `col-md-<n> responsive-text` cell; the cells share one `row` container.

use crate::content::{ContentItem, classify};
use crate::render::{RenderError, RenderResult, Renderer, element};
use crate::style::StyleSpec;

/// Column width given to each item when no widths are supplied.
pub const FULL_WIDTH: u8 = 12;

/// Classes that center image-bearing items inside their cell.
pub const CENTER_CLASSES: &[&str] = &["d-flex", "justify-content-center", "mx-auto"];

/// Resolves column widths for `count` items.
///
/// `None` gives every item the full width and a single width is repeated for
/// every item.
///
/// ## Errors
///
/// [`RenderError::LengthMismatch`] when the widths cannot be matched to the
/// items.
pub fn resolve_columns(count: usize, columns: Option<&[u8]>) -> RenderResult<Vec<u8>> {
    match columns {
        None => Ok(vec![FULL_WIDTH; count]),
        Some([width]) if count > 1 => Ok(vec![*width; count]),
        Some(widths) if widths.len() == count => Ok(widths.to_vec()),
        Some(widths) => Err(RenderError::LengthMismatch {
            what: "columns",
            expected: count,
            actual: widths.len(),
        }),
    }
}

/// Renders `items` as one grid row.
///
/// `styles` (one per item) style the cells; `shared_data_ids` may be
/// shorter than `items`, missing entries meaning no shared data.
///
/// ## Errors
///
/// - [`RenderError::LengthMismatch`] if `columns` or `styles` do not fit the
///   items
/// - any error from rendering an item
///
/// ## Examples
///
/// ```
/// use mosaic_lib::content::ContentItem;
/// use mosaic_lib::render::Renderer;
/// use mosaic_lib::row::render_row;
/// use mosaic_lib::shared_data::SharedDataStore;
///
/// let store = SharedDataStore::new();
/// let renderer = Renderer::new(&store);
/// let items = vec![ContentItem::from("Left"), ContentItem::from("Right")];
///
/// let html = render_row(&renderer, &items, Some(&[6]), None, None).unwrap();
/// assert_eq!(
///     html,
///     "<div class='row'><div class='col-md-6 responsive-text'><p>Left</p></div>\
///      <div class='col-md-6 responsive-text'><p>Right</p></div></div>"
/// );
/// ```
pub fn render_row(
    renderer: &Renderer<'_>,
    items: &[ContentItem],
    columns: Option<&[u8]>,
    styles: Option<&[StyleSpec]>,
    shared_data_ids: Option<&[Option<String>]>,
) -> RenderResult<String> {
    let columns = resolve_columns(items.len(), columns)?;
    if let Some(styles) = styles
        && styles.len() != items.len()
    {
        return Err(RenderError::LengthMismatch {
            what: "styles",
            expected: items.len(),
            actual: styles.len(),
        });
    }

    let mut cells = String::new();
    for (i, item) in items.iter().enumerate() {
        let category = classify(item);
        let mut item_style = StyleSpec::new();
        if category.is_image_bearing() {
            for class in CENTER_CLASSES {
                item_style.append_class(*class);
            }
        }

        let shared_data_id = shared_data_ids
            .and_then(|ids| ids.get(i))
            .and_then(|id| id.as_deref());
        let fragment = renderer.render(category, item, &item_style, shared_data_id)?;

        let mut cell_style =
            StyleSpec::new().with_class(format!("col-md-{}", columns[i])).with_class("responsive-text");
        if let Some(style) = styles.and_then(|styles| styles.get(i)) {
            cell_style.merge(style);
        }
        cells.push_str(&element("div", &cell_style.encode()?, &fragment.into_html()));
    }

    tracing::debug!(items = items.len(), "Rendered row");
    Ok(element("div", "class='row'", &cells))
}

pub use self::render_row as render_list;
