//! HTML Output
//!
//! Renders page trees into the shared site skeleton. Widths are emitted as
//! inline `max-width` styles so the page stays responsive when a browser
//! viewport differs from the one the tree was composed for.

use std::{
    fmt::Write as _,
    fs,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use askama::Template;
use syntect::{
    html::{ClassStyle, ClassedHTMLGenerator},
    parsing::SyntaxSet,
};

use crate::error::SinkError;
use crate::renderer::RenderSink;
use crate::tree::{Node, NodeKind, PageTree, Role, TextStyle};

/// Site skeleton wrapped around every page.
#[derive(Template)]
#[template(path = "page.html")]
struct PageTemplate<'a> {
    title: &'a str,
    site_title: &'a str,
    stylesheet: &'a str,
    version: &'static str,
    body: String,
}

#[derive(Debug)]
enum Target {
    File(PathBuf),
    Buffer(String),
}

/// Sink that renders trees to HTML documents.
#[derive(Debug)]
pub struct HtmlSink {
    target: Target,
    site_title: String,
    stylesheet: String,
    syntaxes: &'static SyntaxSet,
}

impl HtmlSink {
    /// Writes each presented page to `path`, replacing the previous one.
    pub fn to_file(path: impl Into<PathBuf>) -> Self {
        Self::with_target(Target::File(path.into()))
    }

    /// Keeps the latest presented page in memory.
    pub fn buffered() -> Self {
        Self::with_target(Target::Buffer(String::new()))
    }

    fn with_target(target: Target) -> Self {
        Self {
            target,
            site_title: String::new(),
            stylesheet: String::new(),
            syntaxes: syntax_set(),
        }
    }

    pub fn with_site_title(mut self, title: impl Into<String>) -> Self {
        self.site_title = title.into();
        self
    }

    pub fn with_stylesheet(mut self, href: impl Into<String>) -> Self {
        self.stylesheet = href.into();
        self
    }

    /// The latest page of a buffered sink.
    pub fn html(&self) -> Option<&str> {
        match &self.target {
            Target::Buffer(html) => Some(html),
            Target::File(_) => None,
        }
    }

    /// Renders a full HTML document for `tree`.
    pub fn render(&self, tree: &PageTree) -> Result<String, SinkError> {
        let mut body = String::new();
        self.write_node(&mut body, &tree.root);

        let page = PageTemplate {
            title: &tree.title,
            site_title: &self.site_title,
            stylesheet: &self.stylesheet,
            version: crate::VERSION,
            body,
        };
        Ok(page.render()?)
    }

    fn write_node(&self, out: &mut String, node: &Node) {
        match &node.kind {
            NodeKind::Container { role, children, .. } => {
                let (tag, class) = container_tag(*role);
                let _ = write!(out, "<{tag} class=\"{class}\"");
                if !matches!(role, Role::ListItem) {
                    let _ = write!(out, " style=\"max-width:{}px\"", node.width);
                }
                out.push('>');
                for child in children {
                    self.write_node(out, child);
                }
                let _ = write!(out, "</{tag}>");
            }
            NodeKind::Text { style, text } => self.write_text(out, style, text, node.width),
            NodeKind::Image { src, alt } => {
                let _ = write!(
                    out,
                    "<img src=\"{}\" alt=\"{}\" width=\"{}\"",
                    escape(src),
                    escape(alt),
                    node.width
                );
                if let Some(height) = node.height {
                    let _ = write!(out, " height=\"{height}\"");
                }
                out.push('>');
            }
            NodeKind::Link {
                href,
                label,
                active,
            } => {
                let class = if *active { " class=\"active\" aria-current=\"page\"" } else { "" };
                let _ = write!(out, "<a href=\"{}\"{class}>{}</a>", escape(href), escape(label));
            }
        }
    }

    fn write_text(&self, out: &mut String, style: &TextStyle, text: &str, width: u32) {
        match style {
            TextStyle::Title => {
                let _ = write!(out, "<h1>{}</h1>", escape(text));
            }
            TextStyle::Heading { level, anchor } => {
                let _ = write!(out, "<h{level} id=\"{anchor}\">{}</h{level}>", escape(text));
            }
            TextStyle::Body => out.push_str(&escape(text)),
            TextStyle::Label => {
                let _ = write!(
                    out,
                    "<div class=\"label\" style=\"max-width:{width}px\">{}</div>",
                    escape(text)
                );
            }
            TextStyle::Code { language } => {
                let highlighted = highlight_code(text, language.as_deref(), self.syntaxes);
                let lang_class = language
                    .as_ref()
                    .map(|l| format!(" language-{}", escape(l)))
                    .unwrap_or_default();
                let _ = write!(
                    out,
                    "<pre class=\"highlight{lang_class}\" style=\"max-width:{width}px\"><code>{highlighted}</code></pre>"
                );
            }
            TextStyle::InlineCode => {
                let _ = write!(out, "<code>{}</code>", escape(text));
            }
        }
    }
}

impl RenderSink for HtmlSink {
    fn present(&mut self, tree: &PageTree) -> Result<(), SinkError> {
        let html = self.render(tree)?;
        match &mut self.target {
            Target::File(path) => write_file(path, &html),
            Target::Buffer(buffer) => {
                *buffer = html;
                Ok(())
            }
        }
    }
}

fn write_file(path: &Path, html: &str) -> Result<(), SinkError> {
    let io_error = |source| SinkError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    fs::write(path, html).map_err(io_error)?;
    tracing::debug!("Wrote {}", path.display());
    Ok(())
}

fn container_tag(role: Role) -> (&'static str, &'static str) {
    match role {
        Role::Page => ("div", "page"),
        Role::Header => ("header", "site-header"),
        Role::Nav => ("nav", "site-nav"),
        Role::Main => ("main", "content"),
        Role::Stack => ("div", "stack"),
        Role::Paragraph => ("p", "paragraph"),
        Role::List { ordered: true } => ("ol", "list"),
        Role::List { ordered: false } => ("ul", "list"),
        Role::ListItem => ("li", "item"),
    }
}

/// Minimal HTML escaping for text and attribute values.
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Default syntaxes, loaded once and shared by every sink.
fn syntax_set() -> &'static SyntaxSet {
    static SYNTAXES: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAXES.get_or_init(SyntaxSet::load_defaults_newlines)
}

/// Highlight code using syntect with CSS classes.
fn highlight_code(code: &str, lang: Option<&str>, syntaxes: &SyntaxSet) -> String {
    let syntax = lang
        .and_then(|l| syntaxes.find_syntax_by_token(l))
        .unwrap_or_else(|| syntaxes.find_syntax_plain_text());

    let mut generator =
        ClassedHTMLGenerator::new_with_class_style(syntax, syntaxes, ClassStyle::Spaced);

    for line in code.lines() {
        let _ = generator.parse_html_for_line_which_includes_newline(&format!("{line}\n"));
    }

    generator.finalize()
}
