//! folio: viewport-driven page composition for documentation sites
//!
//! Pages are loaded from a [`ContentSource`], laid out by a
//! [`LayoutComposer`] into a [`PageTree`] whose content column is
//! `min(cap, viewport width)`, and displayed through a [`RenderSink`]. A
//! [`PageRenderer`] ties the three together and recomposes its page for
//! every distinct size published on a [`ViewportFeed`].
//!
//! # Example
//!
//! ```
//! use folio::{
//!     ContentSource, ContentStore, LayoutComposer, MemorySink, PageRenderer, ViewportFeed,
//!     ViewportSize,
//! };
//!
//! let mut store = ContentStore::new();
//! store.register_example(
//!     "examples/stack",
//!     r#"
//! cap = 150
//!
//! [[element]]
//! kind = "label"
//! text = "Ferris"
//!
//! [[element]]
//! kind = "image"
//! src = "ferris.png"
//! width = 472
//! height = 315
//! "#,
//! );
//!
//! let unit = store.load("examples/stack").unwrap();
//! let mut feed = ViewportFeed::new(ViewportSize::new(1200, 800));
//! let mut renderer = PageRenderer::new(unit, LayoutComposer::new(), MemorySink::new());
//! renderer.activate(&mut feed).unwrap();
//!
//! let tree = renderer.current().unwrap();
//! assert_eq!(tree.column_width, 150);
//! assert!(tree.content().iter().all(|node| node.width == 150));
//! ```

mod content;
mod error;
mod html;
mod layout;
mod renderer;
mod tree;
mod viewport;

#[cfg(test)]
mod tests;

pub use content::{
    Block, ContentBody, ContentSource, ContentStore, ContentUnit, Element, Inline, PageMeta,
};
pub use error::{ContentError, SinkError};
pub use html::HtmlSink;
pub use layout::{DEFAULT_CAP, LayoutComposer, NavLink, column_width, page_href};
pub use renderer::{MemorySink, PageRenderer, RenderSink, RendererState};
pub use tree::{Axis, Node, NodeKind, Outline, PageTree, Role, TextStyle};
pub use viewport::{Subscription, ViewportFeed, ViewportSize};

/// Library version, embedded in generated pages.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
