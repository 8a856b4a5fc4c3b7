//! Laid-out page trees.
//!
//! A [`PageTree`] is produced fresh by every composition and carries no
//! identity across renders. Two trees composed from the same content at the
//! same viewport width compare equal.

use std::fmt;

use serde::Serialize;

/// A fully laid-out page at one viewport width.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageTree {
    pub title: String,
    pub viewport_width: u32,
    /// `min(cap, viewport_width)`.
    pub column_width: u32,
    pub root: Node,
}

impl PageTree {
    /// The main content column, if the root holds one.
    pub fn main(&self) -> Option<&Node> {
        self.root.children().iter().find(|node| {
            matches!(
                node.kind,
                NodeKind::Container {
                    role: Role::Main,
                    ..
                }
            )
        })
    }

    /// Children of the main content column.
    pub fn content(&self) -> &[Node] {
        match self.main() {
            Some(main) => main.children(),
            None => &[],
        }
    }

    /// Human-readable indented outline of the tree.
    pub fn outline(&self) -> Outline<'_> {
        Outline(self)
    }
}

/// A visual node with its resolved width.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub width: u32,
    /// Resolved height, when the node has an intrinsic one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    pub kind: NodeKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    Container {
        role: Role,
        axis: Axis,
        children: Vec<Node>,
    },
    Text {
        style: TextStyle,
        text: String,
    },
    Image {
        src: String,
        alt: String,
    },
    Link {
        href: String,
        label: String,
        active: bool,
    },
}

/// Direction in which a container stacks its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Vertical,
    Horizontal,
    /// Children flow as a run of inline text.
    Inline,
}

/// What part of the page a container represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Page,
    Header,
    Nav,
    Main,
    Stack,
    Paragraph,
    List { ordered: bool },
    ListItem,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextStyle {
    Title,
    Heading { level: u8, anchor: String },
    Body,
    Label,
    Code { language: Option<String> },
    InlineCode,
}

impl Node {
    pub fn container(role: Role, axis: Axis, width: u32, children: Vec<Node>) -> Self {
        Self {
            width,
            height: None,
            kind: NodeKind::Container {
                role,
                axis,
                children,
            },
        }
    }

    pub fn text(style: TextStyle, text: impl Into<String>, width: u32) -> Self {
        Self {
            width,
            height: None,
            kind: NodeKind::Text {
                style,
                text: text.into(),
            },
        }
    }

    pub fn image(src: impl Into<String>, alt: impl Into<String>, width: u32, height: Option<u32>) -> Self {
        Self {
            width,
            height,
            kind: NodeKind::Image {
                src: src.into(),
                alt: alt.into(),
            },
        }
    }

    pub fn link(href: impl Into<String>, label: impl Into<String>, active: bool, width: u32) -> Self {
        Self {
            width,
            height: None,
            kind: NodeKind::Link {
                href: href.into(),
                label: label.into(),
                active,
            },
        }
    }

    /// Children of a container; empty for leaves.
    pub fn children(&self) -> &[Node] {
        match &self.kind {
            NodeKind::Container { children, .. } => children,
            _ => &[],
        }
    }
}

/// Display adapter returned by [`PageTree::outline`].
pub struct Outline<'a>(&'a PageTree);

impl fmt::Display for Outline<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tree = self.0;
        writeln!(
            f,
            "{} (viewport {}px, column {}px)",
            tree.title, tree.viewport_width, tree.column_width
        )?;
        write_node(f, &tree.root, 1)
    }
}

fn write_node(f: &mut fmt::Formatter<'_>, node: &Node, depth: usize) -> fmt::Result {
    let indent = "  ".repeat(depth);
    match &node.kind {
        NodeKind::Container { role, children, .. } => {
            writeln!(f, "{indent}{} {}px", role_name(*role), node.width)?;
            for child in children {
                write_node(f, child, depth + 1)?;
            }
            Ok(())
        }
        NodeKind::Text { style, text } => {
            let style = match style {
                TextStyle::Title => "title".to_string(),
                TextStyle::Heading { level, anchor } => format!("h{level}#{anchor}"),
                TextStyle::Body => "text".to_string(),
                TextStyle::Label => "label".to_string(),
                TextStyle::Code { language } => {
                    format!("code[{}]", language.as_deref().unwrap_or("plain"))
                }
                TextStyle::InlineCode => "code".to_string(),
            };
            writeln!(f, "{indent}{style} {}px {text:?}", node.width)
        }
        NodeKind::Image { src, .. } => match node.height {
            Some(height) => writeln!(f, "{indent}image {}x{height} {src}", node.width),
            None => writeln!(f, "{indent}image {}px {src}", node.width),
        },
        NodeKind::Link {
            href,
            label,
            active,
        } => {
            let marker = if *active { " (active)" } else { "" };
            writeln!(f, "{indent}link {}px {label:?} -> {href}{marker}", node.width)
        }
    }
}

fn role_name(role: Role) -> &'static str {
    match role {
        Role::Page => "page",
        Role::Header => "header",
        Role::Nav => "nav",
        Role::Main => "main",
        Role::Stack => "stack",
        Role::Paragraph => "paragraph",
        Role::List { ordered: true } => "ordered-list",
        Role::List { ordered: false } => "list",
        Role::ListItem => "item",
    }
}
