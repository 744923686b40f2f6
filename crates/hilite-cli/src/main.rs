//! hilite - Main Entry Point
//!
//! Reads an HTML file, applies `annotate` or `clear` to a selection named
//! on the command line, and writes the resulting HTML.

mod select;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use hilite::dom::{Document, Range};
use hilite::{HighlightConfig, Highlighter};
use tracing_subscriber::EnvFilter;

use crate::select::SelectionSpec;

/// Sentence highlighter for HTML documents
#[derive(Parser, Debug)]
#[command(name = "hilite", version, about = "Highlight sentences in HTML documents")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Highlighter configuration (JSON)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the result here instead of stdout
    #[arg(short, long, global = true, value_name = "FILE")]
    output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Wrap every selected sentence in a highlight
    Annotate(Target),
    /// Remove highlights inside the selection
    Clear(Target),
}

#[derive(Args, Debug)]
struct Target {
    /// HTML file to read
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Selection: `#id` or `#id:start..end`
    #[arg(short, long, value_name = "SELECTOR")]
    select: SelectionSpec,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => HighlightConfig::default(),
    };
    let highlighter = Highlighter::new(config);

    let target = match &cli.command {
        Command::Annotate(target) | Command::Clear(target) => target,
    };
    let html = fs::read_to_string(&target.file)
        .with_context(|| format!("Failed to read {}", target.file.display()))?;
    let mut document = hilite::html::HtmlParser::new()
        .parse_with_url(&html, &file_url(&target.file))
        .context("Failed to parse HTML")?;
    let mut selection = target.select.resolve(&document)?;
    if let Some(range) = selection.get_range_at(0) {
        tracing::debug!(id = %target.select.id, text = %selected_text(&document, range), "resolved selection");
    }

    match cli.command {
        Command::Annotate(_) => {
            let report = highlighter.annotate(&mut document, &selection)?;
            if report.nothing_selected {
                tracing::warn!("selection is empty, document unchanged");
            }
        }
        Command::Clear(_) => {
            highlighter.clear(&mut document, &mut selection)?;
        }
    }

    let output = hilite::html::serialize(&document);
    match &cli.output {
        Some(path) => fs::write(path, output)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => std::io::stdout()
            .write_all(output.as_bytes())
            .context("Failed to write to stdout")?,
    }
    Ok(())
}

fn load_config(path: &Path) -> Result<HighlightConfig> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config = serde_json::from_str(&json)
        .with_context(|| format!("Invalid config {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Text under `range`, looked up in whichever document owns it
fn selected_text(document: &Document, range: &Range) -> String {
    if range.tree_id() == document.tree.id() {
        return range.text(&document.tree);
    }
    document
        .frame_hosts()
        .into_iter()
        .filter_map(|host| document.content_document(host).ok())
        .find(|frame| frame.tree.id() == range.tree_id())
        .map(|frame| range.text(&frame.tree))
        .unwrap_or_default()
}

fn file_url(path: &Path) -> String {
    format!("file://{}", path.display())
}
