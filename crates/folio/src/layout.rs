//! Page Composition
//!
//! [`LayoutComposer::compose`] turns a content unit and a viewport width into
//! a [`PageTree`]. Composition is a pure function of its inputs: the column
//! width is `min(cap, viewport_width)` and every child of the column is
//! constrained against that width independently.

use crate::content::{Block, ContentBody, ContentUnit, Element, Inline};
use crate::tree::{Axis, Node, PageTree, Role, TextStyle};

/// Column cap used when neither configuration nor content declares one.
pub const DEFAULT_CAP: u32 = 600;

/// A navigation entry shown in the page chrome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: String,
    pub page: String,
}

impl NavLink {
    pub fn new(label: impl Into<String>, page: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            page: page.into(),
        }
    }
}

/// Site URL of a page id.
pub fn page_href(page: &str) -> String {
    format!("/{page}.html")
}

/// Width allotted to content for a cap and viewport width.
pub fn column_width(cap: u32, viewport_width: u32) -> u32 {
    cap.min(viewport_width)
}

/// Lays out content units into page trees.
///
/// # Example
///
/// ```
/// use folio::{ContentSource, ContentStore, LayoutComposer};
///
/// let mut store = ContentStore::new();
/// store.register_markdown("intro", "# Intro\n\nHello.");
/// let unit = store.load("intro").unwrap();
///
/// let composer = LayoutComposer::new().with_cap(600);
/// assert_eq!(composer.compose(&unit, 375).column_width, 375);
/// assert_eq!(composer.compose(&unit, 1200).column_width, 600);
/// ```
#[derive(Debug, Clone)]
pub struct LayoutComposer {
    cap: Option<u32>,
    default_cap: u32,
    navigation: Vec<NavLink>,
}

impl Default for LayoutComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutComposer {
    pub fn new() -> Self {
        Self {
            cap: None,
            default_cap: DEFAULT_CAP,
            navigation: Vec::new(),
        }
    }

    /// Fixes the cap for every page, overriding what the content declares.
    pub fn with_cap(mut self, cap: u32) -> Self {
        self.cap = Some(cap);
        self
    }

    /// Cap for content that declares none.
    pub fn with_default_cap(mut self, cap: u32) -> Self {
        self.default_cap = cap;
        self
    }

    pub fn with_navigation(mut self, links: impl IntoIterator<Item = NavLink>) -> Self {
        self.navigation.extend(links);
        self
    }

    /// The cap that applies to `content`.
    pub fn cap_for(&self, content: &ContentUnit) -> u32 {
        self.cap
            .or(content.meta().cap)
            .unwrap_or(self.default_cap)
    }

    /// Composes `content` for a viewport `viewport_width` pixels wide.
    pub fn compose(&self, content: &ContentUnit, viewport_width: u32) -> PageTree {
        let cap = self.cap_for(content);
        let column = column_width(cap, viewport_width);
        let title = content.title().to_string();

        let body = match content.body() {
            ContentBody::Markdown(blocks) => blocks
                .iter()
                .map(|block| block_node(block, column))
                .collect(),
            ContentBody::Example(elements) => elements
                .iter()
                .map(|element| element_node(element, column))
                .collect(),
        };

        let mut regions = Vec::with_capacity(3);
        if !title.is_empty() {
            regions.push(Node::container(
                Role::Header,
                Axis::Vertical,
                column,
                vec![Node::text(TextStyle::Title, title.clone(), column)],
            ));
        }
        if !self.navigation.is_empty() {
            let links = self
                .navigation
                .iter()
                .map(|link| {
                    let active = link.page == content.id();
                    Node::link(page_href(&link.page), link.label.clone(), active, column)
                })
                .collect();
            regions.push(Node::container(Role::Nav, Axis::Horizontal, column, links));
        }
        regions.push(Node::container(Role::Main, Axis::Vertical, column, body));

        tracing::debug!(
            page = content.id(),
            viewport_width,
            cap,
            column,
            "composed page"
        );

        PageTree {
            title,
            viewport_width,
            column_width: column,
            root: Node::container(Role::Page, Axis::Vertical, viewport_width, regions),
        }
    }
}

fn block_node(block: &Block, column: u32) -> Node {
    match block {
        Block::Heading {
            level,
            text,
            anchor,
        } => Node::text(
            TextStyle::Heading {
                level: *level,
                anchor: anchor.clone(),
            },
            text.clone(),
            column,
        ),
        Block::Paragraph(inlines) => Node::container(
            Role::Paragraph,
            Axis::Inline,
            column,
            inline_nodes(inlines, column),
        ),
        Block::Code { language, code } => Node::text(
            TextStyle::Code {
                language: language.clone(),
            },
            code.clone(),
            column,
        ),
        Block::Image { src, alt } => Node::image(src.clone(), alt.clone(), column, None),
        Block::List { ordered, items } => Node::container(
            Role::List { ordered: *ordered },
            Axis::Vertical,
            column,
            items
                .iter()
                .map(|item| {
                    let children = item.iter().map(|block| block_node(block, column)).collect();
                    Node::container(Role::ListItem, Axis::Vertical, column, children)
                })
                .collect(),
        ),
    }
}

fn inline_nodes(inlines: &[Inline], column: u32) -> Vec<Node> {
    inlines
        .iter()
        .map(|inline| match inline {
            Inline::Text(text) => Node::text(TextStyle::Body, text.clone(), column),
            Inline::Code(code) => Node::text(TextStyle::InlineCode, code.clone(), column),
            Inline::Link { href, label } => Node::link(href.clone(), label.clone(), false, column),
        })
        .collect()
}

fn element_node(element: &Element, column: u32) -> Node {
    match element {
        Element::Label { text } => Node::text(TextStyle::Label, text.clone(), column),
        Element::Image {
            src,
            width,
            height,
            alt,
        } => {
            let (width, height) = fit_image(*width, *height, column);
            Node::image(src.clone(), alt.clone(), width, Some(height))
        }
        Element::Link { href, label } => Node::link(href.clone(), label.clone(), false, column),
        Element::Stack { children } => Node::container(
            Role::Stack,
            Axis::Vertical,
            column,
            children
                .iter()
                .map(|child| element_node(child, column))
                .collect(),
        ),
    }
}

/// Shrinks an image to the column, keeping its aspect ratio.
///
/// Images narrower than the column keep their intrinsic size.
fn fit_image(width: u32, height: u32, column: u32) -> (u32, u32) {
    if width <= column {
        return (width, height);
    }
    let scaled = (u64::from(height) * u64::from(column) + u64::from(width) / 2) / u64::from(width);
    (column, scaled as u32)
}
