//! Render command - shows one page across a sequence of viewport widths.

use anyhow::{Context, Result};
use clap::ValueEnum;
use folio::{HtmlSink, MemorySink, PageRenderer, PageTree, ViewportFeed, ViewportSize};

use super::Site;
use crate::style::colors::SemanticStyle;

/// How each presented page is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Indented outline of nodes and widths.
    Outline,
    /// The page tree as JSON.
    Json,
    /// The full HTML document.
    Html,
}

pub fn run(project: &str, page: &str, widths: &[u32], format: Format) -> Result<()> {
    let site = Site::open(project)?;
    let height = site.config.viewport.height;

    let (first, rest) = match widths.split_first() {
        Some((first, rest)) => (*first, rest),
        None => (site.config.viewport.width, &[][..]),
    };

    let unit = site.load(page)?;
    let mut feed = ViewportFeed::new(ViewportSize::new(first, height));
    let mut renderer = PageRenderer::new(unit, site.composer_for(page), MemorySink::new());

    renderer.activate(&mut feed)?;
    for width in rest {
        feed.publish(ViewportSize::new(*width, height));
        renderer.pump()?;
    }
    renderer.teardown();

    tracing::debug!(page, renders = renderer.renders(), "Rendered page");

    let sink = renderer.into_sink();
    for (index, tree) in sink.presented().iter().enumerate() {
        if index > 0 {
            println!();
        }
        print_tree(&site, tree, format)?;
    }

    Ok(())
}

fn print_tree(site: &Site, tree: &PageTree, format: Format) -> Result<()> {
    match format {
        Format::Outline => {
            println!("{}", format!("── {}px ──", tree.viewport_width).muted());
            print!("{}", tree.outline());
        }
        Format::Json => {
            let json =
                serde_json::to_string_pretty(tree).context("Failed to serialize page tree")?;
            println!("{json}");
        }
        Format::Html => {
            let html = site.html_sink(HtmlSink::buffered()).render(tree)?;
            println!("{html}");
        }
    }
    Ok(())
}
