//! folio command-line site builder.
//!
//! Builds documentation sites from markdown pages and example documents.
//!
//! # Quick Start
//!
//! ```bash
//! # Scaffold a site
//! folio init ./docs
//!
//! # Build every page at the configured viewport
//! folio build --project ./docs
//!
//! # Watch one page respond to viewport changes
//! folio render examples/stack --project ./docs --width 1200 --width 375
//! ```

mod commands;
mod style;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::render::Format;

/// folio - documentation sites laid out for every viewport.
#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version information.
    Version,

    /// Scaffold a new site.
    Init {
        /// Directory to create the site in.
        path: String,

        /// Site title written to folio.toml.
        #[arg(short, long)]
        title: Option<String>,
    },

    /// Render every page to HTML.
    Build {
        /// Site directory containing folio.toml.
        #[arg(short, long, default_value = ".")]
        project: String,

        /// Viewport width in pixels (defaults to viewport.width).
        #[arg(long)]
        width: Option<u32>,

        /// Viewport height in pixels (defaults to viewport.height).
        #[arg(long)]
        height: Option<u32>,
    },

    /// Render one page across a sequence of viewport widths.
    Render {
        /// Page id (content path without extension, e.g. tutorial/intro).
        page: String,

        /// Site directory containing folio.toml.
        #[arg(short, long, default_value = ".")]
        project: String,

        /// Viewport width; repeat to simulate resizes.
        #[arg(short = 'w', long = "width")]
        widths: Vec<u32>,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = Format::Outline)]
        format: Format,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    style::set_no_color(cli.no_color);

    match cli.command {
        Commands::Version => {
            commands::version::run();
            Ok(())
        }
        Commands::Init { path, title } => commands::init::run(&path, title.as_deref()),
        Commands::Build {
            project,
            width,
            height,
        } => commands::build::run(&project, width, height),
        Commands::Render {
            page,
            project,
            widths,
            format,
        } => commands::render::run(&project, &page, &widths, format),
    }
}
