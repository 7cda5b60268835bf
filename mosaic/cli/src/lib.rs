//! # Mosaic CLI
//!
//! Renders text, markdown, images and chart specifications into an
//! embeddable HTML fragment.
//!
//! Every positional item is classified and rendered in order. The result
//! is a single `<div>` holding any shared chart data followed by one
//! fragment per item.
//!
//! ## Usage
//!
//! ```bash
//! # Plain text and markdown
//! mosaic "Hello" "# Title\n\nSome *markdown*"
//!
//! # Read an item from a file, or from stdin
//! mosaic @chart.json
//! cat notes.md | mosaic -
//!
//! # Local or remote images are embedded as data URIs
//! mosaic ./diagram.svg https://example.com/logo.png
//!
//! # Lay items out in a grid row
//! mosaic --row --columns 4,8 "Caption" ./figure.png
//!
//! # Share one GeoJSON payload between several Plotly charts
//! mosaic --shared regions=world.geojson --use-shared regions @map1.json @map2.json
//!
//! # Only print the inferred category of each item
//! mosaic --classify "Hello" @chart.json
//! ```
//!
//! ### Verbosity
//!
//! ```bash
//! mosaic notes.md -v      # INFO level
//! mosaic notes.md -vv     # DEBUG level
//! mosaic notes.md -vvv    # TRACE level
//! ```
//!
//! ## Library Usage
//!
//! Rendering is provided by the [`mosaic_lib`] crate; see
//! [`mosaic_lib::session::Session`] for the document API.

use std::path::PathBuf;

use mosaic_lib::shared_data::SharedDataType;

pub use cli::Cli;

mod cli {
    use clap::Parser;
    use mosaic_lib::content::FigureFormat;

    use super::SharedSource;

    /// Command-line interface for the mosaic fragment renderer.
    #[derive(Parser, Debug)]
    #[command(name = "mosaic", about = "Render mixed content as HTML fragments", version)]
    pub struct Cli {
        /// Content items: text, markdown, image paths or URLs, chart JSON.
        /// `@FILE` reads an item from a file; `-` reads one from stdin.
        #[arg(required = true)]
        pub items: Vec<String>,

        /// JSON object of CSS properties and classes applied to every item
        #[arg(long, value_name = "JSON")]
        pub style: Option<String>,

        /// Export format for in-memory figures
        #[arg(long, value_name = "FORMAT", default_value_t = FigureFormat::Svg)]
        pub figure_format: FigureFormat,

        /// CSS height of Plotly chart containers
        #[arg(long, value_name = "CSS")]
        pub height: Option<String>,

        /// Alt text for embedded images
        #[arg(long)]
        pub alt: Option<String>,

        /// Register a shared data payload (repeatable).
        /// The type is inferred from a `.geojson` extension unless given.
        #[arg(long = "shared", value_name = "ID=PATH[:TYPE]", value_parser = super::parse_shared_source)]
        pub shared: Vec<SharedSource>,

        /// Shared data id used by every Plotly chart among the items
        #[arg(long, value_name = "ID")]
        pub use_shared: Option<String>,

        /// Lay the items out side by side in one grid row
        #[arg(long)]
        pub row: bool,

        /// Column widths (out of 12) for `--row`; one value applies to all
        #[arg(long, value_delimiter = ',', requires = "row")]
        pub columns: Option<Vec<u8>>,

        /// Print the category of each item instead of rendering
        #[arg(long, conflicts_with_all = ["row", "raw"])]
        pub classify: bool,

        /// Skip pretty-printing of the output
        #[arg(long)]
        pub raw: bool,

        /// Increase verbosity (-v INFO, -vv DEBUG, -vvv TRACE, -vvvv TRACE with file/line)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        pub verbose: u8,
    }
}

/// A `--shared` argument: a payload file registered under an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedSource {
    pub id: String,
    pub path: PathBuf,
    pub data_type: SharedDataType,
}

/// Parses `ID=PATH[:TYPE]`.
///
/// A trailing `:TYPE` is only split off when it names a known type, so
/// paths containing `:` still work.
fn parse_shared_source(arg: &str) -> Result<SharedSource, String> {
    let (id, rest) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected ID=PATH[:TYPE], got `{arg}`"))?;
    if id.is_empty() || rest.is_empty() {
        return Err(format!("expected ID=PATH[:TYPE], got `{arg}`"));
    }

    let (path, explicit) = match rest.rsplit_once(':') {
        Some((path, tag)) => match SharedDataType::parse(tag) {
            Ok(data_type) => (path, Some(data_type)),
            Err(_) => (rest, None),
        },
        None => (rest, None),
    };

    let path = PathBuf::from(path);
    let data_type = explicit.unwrap_or_else(|| {
        let is_geojson = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("geojson"));
        if is_geojson {
            SharedDataType::Geojson
        } else {
            SharedDataType::Json
        }
    });

    Ok(SharedSource {
        id: id.to_string(),
        path,
        data_type,
    })
}
