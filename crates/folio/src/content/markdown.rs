//! Markdown pages with YAML frontmatter.
//!
//! The body is reduced to block-level elements the layout composer knows how
//! to place. Relative `.md` links are rewritten to site URLs while parsing.

use gray_matter::{Matter, ParsedEntity, engine::YAML};
use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use serde::Deserialize;

use super::{ContentBody, ContentUnit, PageMeta};
use crate::error::ContentError;

/// A block-level piece of a markdown page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading {
        level: u8,
        text: String,
        anchor: String,
    },
    Paragraph(Vec<Inline>),
    Code {
        language: Option<String>,
        code: String,
    },
    Image {
        src: String,
        alt: String,
    },
    List {
        ordered: bool,
        /// Each item holds the blocks written under its marker.
        items: Vec<Vec<Block>>,
    },
}

/// A run of inline content inside a paragraph or list item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Code(String),
    Link { href: String, label: String },
}

#[derive(Deserialize)]
struct Frontmatter {
    title: Option<String>,
    cap: Option<u32>,
}

pub(super) fn parse(id: &str, source: &str) -> Result<ContentUnit, ContentError> {
    let matter = Matter::<YAML>::new();
    let parsed: ParsedEntity<Frontmatter> = matter
        .parse(source)
        .map_err(|e| ContentError::malformed(id, format!("invalid frontmatter: {e}")))?;

    let (title, cap) = parsed
        .data
        .map(|frontmatter| (frontmatter.title, frontmatter.cap))
        .unwrap_or_default();
    if cap == Some(0) {
        return Err(ContentError::malformed(id, "cap must be greater than zero"));
    }

    let mut builder = BlockBuilder::new(id);
    for event in Parser::new_ext(&parsed.content, Options::all()) {
        builder.push(event);
    }
    let (blocks, first_heading) = builder.finish();

    let meta = PageMeta {
        title: title.or(first_heading),
        cap,
    };
    Ok(ContentUnit::new(id, meta, ContentBody::Markdown(blocks)))
}

#[derive(Default)]
struct OpenList {
    ordered: bool,
    items: Vec<Vec<Block>>,
    /// Blocks of the item being read.
    current: Option<Vec<Block>>,
}

impl OpenList {
    fn close_item(&mut self) {
        if let Some(item) = self.current.take() {
            if !item.is_empty() {
                self.items.push(item);
            }
        }
    }
}

/// Folds pulldown-cmark events into blocks.
struct BlockBuilder<'a> {
    page_id: &'a str,
    blocks: Vec<Block>,
    first_heading: Option<String>,
    seen_h1: bool,
    inlines: Vec<Inline>,
    heading: Option<(u8, String)>,
    code: Option<(Option<String>, String)>,
    link: Option<(String, String)>,
    image: Option<(String, String)>,
    lists: Vec<OpenList>,
}

impl<'a> BlockBuilder<'a> {
    fn new(page_id: &'a str) -> Self {
        Self {
            page_id,
            blocks: Vec::new(),
            first_heading: None,
            seen_h1: false,
            inlines: Vec::new(),
            heading: None,
            code: None,
            link: None,
            image: None,
            lists: Vec::new(),
        }
    }

    fn push(&mut self, event: Event<'_>) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                self.flush_paragraph();
                self.heading = Some((level as u8, String::new()));
            }
            Event::End(TagEnd::Heading(_)) => self.end_heading(),
            Event::Start(Tag::CodeBlock(kind)) => {
                self.flush_paragraph();
                let language = match kind {
                    CodeBlockKind::Fenced(lang) => {
                        // "rust,ignore" -> "rust"
                        let clean = lang.split(',').next().unwrap_or("").trim().to_string();
                        if clean.is_empty() { None } else { Some(clean) }
                    }
                    CodeBlockKind::Indented => None,
                };
                self.code = Some((language, String::new()));
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some((language, code)) = self.code.take() {
                    self.emit(Block::Code { language, code });
                }
            }
            Event::Start(Tag::Link { dest_url, .. }) => {
                // Headings and image alt text keep only the link's label.
                if self.heading.is_none() && self.image.is_none() {
                    self.link = Some((rewrite_link(&dest_url, self.page_id), String::new()));
                }
            }
            Event::End(TagEnd::Link) => self.end_link(),
            Event::Start(Tag::Image { dest_url, .. }) => {
                self.image = Some((dest_url.to_string(), String::new()));
            }
            Event::End(TagEnd::Image) => {
                if let Some((src, alt)) = self.image.take() {
                    // Images are laid out as blocks of their own.
                    self.flush_paragraph();
                    self.emit(Block::Image { src, alt });
                }
            }
            Event::Start(Tag::List(first)) => {
                self.flush_paragraph();
                self.lists.push(OpenList {
                    ordered: first.is_some(),
                    ..OpenList::default()
                });
            }
            Event::End(TagEnd::List(_)) => self.end_list(),
            Event::Start(Tag::Item) => {
                self.flush_paragraph();
                if let Some(list) = self.lists.last_mut() {
                    list.close_item();
                    list.current = Some(Vec::new());
                }
            }
            Event::End(TagEnd::Item) => {
                self.flush_paragraph();
                if let Some(list) = self.lists.last_mut() {
                    list.close_item();
                }
            }
            Event::End(TagEnd::Paragraph | TagEnd::TableHead | TagEnd::TableRow) => {
                self.flush_paragraph();
            }
            Event::End(TagEnd::TableCell) => self.push_text(" "),
            Event::Text(text) => self.push_text(&text),
            Event::Code(code) => self.push_code(&code),
            Event::SoftBreak | Event::HardBreak => self.push_text(" "),
            Event::Html(html) | Event::InlineHtml(html) => {
                tracing::debug!(page = self.page_id, "Dropping raw HTML: {}", html.trim());
            }
            _ => {}
        }
    }

    fn end_heading(&mut self) {
        let Some((level, text)) = self.heading.take() else {
            return;
        };
        if level == 1 && !self.seen_h1 {
            // The first h1 becomes the page title and is not repeated.
            self.seen_h1 = true;
            self.first_heading = Some(text);
            return;
        }
        let anchor = slugify(&text);
        self.emit(Block::Heading { level, text, anchor });
    }

    fn end_link(&mut self) {
        let Some((href, label)) = self.link.take() else {
            return;
        };
        if label.trim().is_empty() {
            // A linked image has already been emitted as its own block.
            tracing::debug!(page = self.page_id, "Dropping link without a label: {href}");
            return;
        }
        self.inlines.push(Inline::Link { href, label });
    }

    fn end_list(&mut self) {
        self.flush_paragraph();
        let Some(mut list) = self.lists.pop() else {
            return;
        };
        list.close_item();

        match self.lists.last_mut() {
            // Nested lists are flattened into their parent, after the parent
            // item's content so far.
            Some(parent) => {
                parent.close_item();
                parent.items.extend(list.items);
                parent.current = Some(Vec::new());
            }
            None => self.blocks.push(Block::List {
                ordered: list.ordered,
                items: list.items,
            }),
        }
    }

    fn push_text(&mut self, text: &str) {
        if let Some((_, code)) = self.code.as_mut() {
            code.push_str(text);
        } else if let Some((_, heading)) = self.heading.as_mut() {
            heading.push_str(text);
        } else if let Some((_, alt)) = self.image.as_mut() {
            alt.push_str(text);
        } else if let Some((_, label)) = self.link.as_mut() {
            label.push_str(text);
        } else if let Some(Inline::Text(last)) = self.inlines.last_mut() {
            last.push_str(text);
        } else {
            self.inlines.push(Inline::Text(text.to_string()));
        }
    }

    fn push_code(&mut self, code: &str) {
        if self.heading.is_some() || self.link.is_some() || self.image.is_some() {
            self.push_text(code);
        } else {
            self.inlines.push(Inline::Code(code.to_string()));
        }
    }

    /// Appends a block to the open list item, or to the page.
    fn emit(&mut self, block: Block) {
        match self.lists.last_mut() {
            Some(list) => list.current.get_or_insert_with(Vec::new).push(block),
            None => self.blocks.push(block),
        }
    }

    fn flush_paragraph(&mut self) {
        let inlines = take_trimmed(&mut self.inlines);
        if !inlines.is_empty() {
            self.emit(Block::Paragraph(inlines));
        }
    }

    fn finish(mut self) -> (Vec<Block>, Option<String>) {
        self.flush_paragraph();
        while !self.lists.is_empty() {
            self.end_list();
        }
        (self.blocks, self.first_heading)
    }
}

/// Drains `inlines`, dropping whitespace-only text runs.
fn take_trimmed(inlines: &mut Vec<Inline>) -> Vec<Inline> {
    std::mem::take(inlines)
        .into_iter()
        .filter(|inline| !matches!(inline, Inline::Text(text) if text.trim().is_empty()))
        .collect()
}

/// Slugify a heading text for use as an anchor id.
fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Rewrites a link destination for the generated site.
///
/// - External links (`http`/`https`/`mailto`) and anchors are unchanged
/// - Relative `.md` links resolve against the current page id to
///   `/{page}.html{#anchor}`
/// - Links that climb above the content root are left as written
fn rewrite_link(url: &str, current_page: &str) -> String {
    if url.starts_with("http://")
        || url.starts_with("https://")
        || url.starts_with('#')
        || url.starts_with("mailto:")
    {
        return url.to_string();
    }

    let (path_part, anchor) = match url.find('#') {
        Some(i) => (&url[..i], &url[i..]),
        None => (url, ""),
    };

    let Some(target) = path_part.strip_suffix(".md") else {
        return url.to_string();
    };

    // "tutorial/signals" -> ["tutorial"]
    let mut parts: Vec<&str> = current_page.split('/').collect();
    parts.pop();

    for segment in target.split('/') {
        match segment {
            ".." => {
                if parts.pop().is_none() {
                    tracing::warn!(page = current_page, "Link escapes content root: {url}");
                    return url.to_string();
                }
            }
            "." | "" => {}
            s => parts.push(s),
        }
    }

    format!("/{}.html{anchor}", parts.join("/"))
}
