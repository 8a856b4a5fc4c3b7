//! Initialize command - scaffolds a new folio site.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use folio_config::{Paths, SiteConfig};

use crate::style::{
    colors::SemanticStyle, print_code_example, print_hint, print_labeled, print_spacer,
    print_success,
};

const INDEX_PAGE: &str = r#"---
title: Welcome
---

# Welcome

This site is built with folio. Every page is laid out in a single column
that is never wider than its cap, so it reads the same on a phone and on a
wide monitor.

See the [stacked example](examples/stack.md) for a page whose column is
capped at 150 pixels.

## Building

```rust
fn main() {
    println!("Hello from folio!");
}
```
"#;

const STACK_EXAMPLE: &str = r#"title = "Stacked layout"
cap = 150

[[element]]
kind = "label"
text = "A column capped at 150px"

[[element]]
kind = "image"
src = "/images/square.png"
width = 200
height = 200
alt = "A square"

[[element]]
kind = "image"
src = "/images/wide.png"
width = 472
height = 315
alt = "A wide photo"
"#;

const GITIGNORE: &str = r"# Generated site
public/

# Local config overrides (not tracked in git)
folio.local.toml
";

pub fn run(path: &str, title: Option<&str>) -> Result<()> {
    let project_dir = Path::new(path);

    if Paths::is_initialized(project_dir) {
        anyhow::bail!(
            "Site already initialized in {}. folio.toml already exists.",
            project_dir.display()
        );
    }

    print_spacer();
    println!("Initializing new folio site...");
    print_spacer();

    let content_dir = Paths::content_dir(project_dir);
    fs::create_dir_all(content_dir.join("examples"))
        .context("Failed to create content directory")?;
    print_success("Created content/");

    let title = title.map_or_else(|| default_title(project_dir), str::to_string);
    let config = SiteConfig::starter(&title);
    let config_content =
        toml::to_string_pretty(&config).context("Failed to serialize configuration")?;
    fs::write(Paths::project_config_file(project_dir), config_content)
        .context("Failed to write folio.toml")?;
    print_success("Wrote folio.toml");

    write_if_missing(&content_dir.join("index.md"), INDEX_PAGE)?;
    write_if_missing(&content_dir.join("examples").join("stack.toml"), STACK_EXAMPLE)?;
    write_if_missing(&project_dir.join(".gitignore"), GITIGNORE)?;

    print_spacer();
    print_success("Site initialized successfully!");
    print_spacer();

    let canonical_path = project_dir
        .canonicalize()
        .unwrap_or_else(|_| project_dir.to_path_buf());
    print_labeled("Location", &canonical_path.display().to_string());
    print_labeled("Title", &title);
    print_labeled("Content", "content/");

    print_spacer();
    println!("{}", "Next steps:".header());
    print_spacer();

    print_hint("Build the site:");
    print_code_example(&format!("folio build --project {path}"));
    print_spacer();

    print_hint("Or watch a page respond to resizes:");
    print_code_example(&format!(
        "folio render examples/stack --project {path} --width 1200 --width 100"
    ));

    Ok(())
}

fn default_title(project_dir: &Path) -> String {
    project_dir
        .canonicalize()
        .ok()
        .and_then(|dir| dir.file_name().map(|name| name.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "Folio".to_string())
}

fn write_if_missing(path: &Path, contents: &str) -> Result<()> {
    let name = path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    );

    if path.exists() {
        println!("{}", format!("⏭  {name} already exists").muted());
        return Ok(());
    }

    fs::write(path, contents).with_context(|| format!("Failed to write {name}"))?;
    print_success(&format!("Created {name}"));
    Ok(())
}
