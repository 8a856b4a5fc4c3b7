//! Build command - renders every page to HTML.

use anyhow::{Context, Result};
use folio::{HtmlSink, PageRenderer, ViewportFeed, ViewportSize};

use super::Site;
use crate::style::{
    colors::SemanticStyle, print_labeled, print_report_table, print_spacer, print_success,
    print_warn,
};

pub fn run(project: &str, width: Option<u32>, height: Option<u32>) -> Result<()> {
    let site = Site::open(project)?;
    let viewport = ViewportSize::new(
        width.unwrap_or(site.config.viewport.width),
        height.unwrap_or(site.config.viewport.height),
    );

    let page_ids = site.page_ids();
    if page_ids.is_empty() {
        print_warn(&format!(
            "No pages found in {}",
            site.config.content.dir.display()
        ));
        return Ok(());
    }

    print_spacer();
    println!("{}", format!("Building {} pages at {viewport}", page_ids.len()).header());
    print_spacer();

    let mut feed = ViewportFeed::new(viewport);
    let mut rows = Vec::with_capacity(page_ids.len());

    for id in &page_ids {
        let unit = site.load(id)?;
        let composer = site.composer_for(id);
        let cap = composer.cap_for(&unit);
        let output = site.config.output.dir.join(format!("{id}.html"));

        let mut renderer = PageRenderer::new(
            unit,
            composer,
            site.html_sink(HtmlSink::to_file(&output)),
        );
        renderer
            .activate(&mut feed)
            .with_context(|| format!("Failed to render page '{id}'"))?;

        let column = renderer
            .current()
            .map_or_else(|| "-".to_string(), |tree| format!("{}px", tree.column_width));
        renderer.teardown();

        tracing::debug!(page = %id, path = %output.display(), "Wrote page");
        rows.push(vec![
            id.clone(),
            format!("{cap}px"),
            column,
            output
                .strip_prefix(&site.config.output.dir)
                .unwrap_or(output.as_path())
                .display()
                .to_string(),
        ]);
    }

    print_report_table(&["Page", "Cap", "Column", "Output"], &rows, "page");
    print_spacer();
    print_success("Site built");
    print_labeled("Output", &site.config.output.dir.display().to_string());

    Ok(())
}
