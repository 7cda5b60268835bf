use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use mosaic_cli::Cli;
use mosaic_lib::content::{ContentItem, classify};
use mosaic_lib::render::RenderOptions;
use mosaic_lib::session::Session;
use mosaic_lib::style::StyleSpec;
use std::io::{self, Read};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing subscriber based on verbosity level.
///
/// Verbosity levels:
/// - 0 (default): no subscriber
/// - 1 (-v): INFO (items added, shared data registered)
/// - 2 (-vv): DEBUG (classification and per-item rendering)
/// - 3 (-vvv): TRACE
/// - 4+ (-vvvv): TRACE with file/line numbers
fn init_tracing(verbose: u8) {
    if verbose == 0 {
        return;
    }

    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            1 => "info,mosaic=info,mosaic_lib=info".to_string(),
            2 => "info,mosaic=debug,mosaic_lib=debug".to_string(),
            _ => "debug,mosaic=trace,mosaic_lib=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_thread_ids(false)
                .with_file(verbose >= 4)
                .with_line_number(verbose >= 4)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let items = load_items(&cli.items)?;

    if cli.classify {
        for item in &items {
            println!("{}", classify(item));
        }
        return Ok(());
    }

    let style = match cli.style.as_deref() {
        Some(json) => {
            serde_json::from_str::<StyleSpec>(json).wrap_err("Invalid JSON in --style argument")?
        }
        None => StyleSpec::new(),
    };

    let mut options = RenderOptions::default();
    options.figure_format = cli.figure_format;
    if let Some(height) = cli.height {
        options.chart_height = height;
    }
    if let Some(alt) = cli.alt {
        options.alt = alt;
    }

    let mut session = Session::with_options(options);

    for source in &cli.shared {
        let payload = std::fs::read_to_string(&source.path)
            .wrap_err_with(|| format!("Failed to read shared data file {:?}", source.path))?;
        session
            .add_shared_data(source.id.as_str(), payload, source.data_type)
            .wrap_err_with(|| format!("Failed to register shared data `{}`", source.id))?;
        tracing::info!(id = %source.id, data_type = %source.data_type, "Registered shared data");
    }

    let shared_id = cli.use_shared.as_deref();
    if cli.row {
        let styles = (!style.is_empty()).then(|| vec![style.clone(); items.len()]);
        let shared_ids =
            shared_id.map(|id| vec![Some(id.to_string()); items.len()]);
        session
            .add_row(
                &items,
                cli.columns.as_deref(),
                styles.as_deref(),
                shared_ids.as_deref(),
            )
            .wrap_err("Failed to render row")?;
    } else {
        for (index, item) in items.into_iter().enumerate() {
            session
                .add_item(item, &style, shared_id)
                .wrap_err_with(|| format!("Failed to render item {}", index + 1))?;
        }
    }

    if cli.raw {
        println!("{}", session.render_raw());
    } else {
        println!("{}", session.render());
    }

    Ok(())
}

/// Resolves `-` (stdin) and `@FILE` arguments into content items.
///
/// Anything else is passed through as text, so image paths and URLs are
/// left for classification to recognize.
fn load_items(args: &[String]) -> Result<Vec<ContentItem>> {
    let mut stdin_used = false;
    let mut items = Vec::with_capacity(args.len());

    for arg in args {
        let text = if arg == "-" {
            if stdin_used {
                return Err(eyre!("stdin (`-`) can only be used once"));
            }
            stdin_used = true;
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .wrap_err("Failed to read from stdin")?;
            buffer
        } else if let Some(path) = arg.strip_prefix('@') {
            std::fs::read_to_string(path).wrap_err_with(|| format!("Failed to read {path:?}"))?
        } else {
            arg.clone()
        };
        items.push(ContentItem::from(text));
    }

    Ok(items)
}
