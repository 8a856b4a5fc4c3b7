//! Content Loading
//!
//! Pages are stored as raw markdown or as TOML example documents and are
//! parsed on [`ContentSource::load`]. Parsing at load time means a unit that
//! comes back is always complete; a body that cannot be parsed is reported as
//! [`ContentError::Malformed`].

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use crate::error::ContentError;

mod example;
mod markdown;

pub use example::Element;
pub use markdown::{Block, Inline};

/// Loads content units by page id.
pub trait ContentSource {
    fn load(&self, id: &str) -> Result<ContentUnit, ContentError>;
}

/// A page's subject matter prior to layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentUnit {
    id: String,
    meta: PageMeta,
    body: ContentBody,
}

/// Metadata a page declares about itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMeta {
    pub title: Option<String>,
    /// Maximum column width in pixels.
    pub cap: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBody {
    /// Prose parsed into block-level elements.
    Markdown(Vec<Block>),
    /// An ordered sequence of visual primitives.
    Example(Vec<Element>),
}

impl ContentUnit {
    pub fn new(id: impl Into<String>, meta: PageMeta, body: ContentBody) -> Self {
        Self {
            id: id.into(),
            meta,
            body,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn meta(&self) -> &PageMeta {
        &self.meta
    }

    pub fn body(&self) -> &ContentBody {
        &self.body
    }

    /// Declared title, falling back to the page id.
    pub fn title(&self) -> &str {
        self.meta.title.as_deref().unwrap_or(&self.id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceFormat {
    Markdown,
    Example,
}

#[derive(Debug, Clone)]
struct RawContent {
    format: SourceFormat,
    text: String,
}

/// In-memory registry of raw page sources keyed by page id.
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    entries: BTreeMap<String, RawContent>,
}

impl ContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers every `*.md` and `*.toml` file below `root`.
    ///
    /// A file's id is its path relative to `root` without the extension,
    /// joined with `/` (e.g. `tutorial/signals`).
    pub fn from_dir(root: impl AsRef<Path>) -> Result<Self, ContentError> {
        let root = root.as_ref();
        let mut files = Vec::new();
        collect_files(root, &mut files)?;

        let mut store = Self::new();
        for path in files {
            let format = match path.extension().and_then(|ext| ext.to_str()) {
                Some("md") => SourceFormat::Markdown,
                Some("toml") => SourceFormat::Example,
                _ => continue,
            };

            let Some(id) = page_id(root, &path) else {
                tracing::warn!("Skipping content file with non-UTF-8 path: {:?}", path);
                continue;
            };

            let text = fs::read_to_string(&path).map_err(|source| ContentError::Io {
                path: path.clone(),
                source,
            })?;
            store.insert(id, format, text);
        }

        tracing::info!("Loaded {} content sources from {}", store.len(), root.display());
        Ok(store)
    }

    pub fn register_markdown(&mut self, id: impl Into<String>, text: impl Into<String>) {
        self.insert(id.into(), SourceFormat::Markdown, text.into());
    }

    pub fn register_example(&mut self, id: impl Into<String>, text: impl Into<String>) {
        self.insert(id.into(), SourceFormat::Example, text.into());
    }

    fn insert(&mut self, id: String, format: SourceFormat, text: String) {
        if self.entries.insert(id.clone(), RawContent { format, text }).is_some() {
            tracing::warn!(page = %id, "Replacing previously registered content");
        }
    }

    /// All registered ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ContentSource for ContentStore {
    fn load(&self, id: &str) -> Result<ContentUnit, ContentError> {
        let raw = self
            .entries
            .get(id)
            .ok_or_else(|| ContentError::NotFound(id.to_string()))?;

        match raw.format {
            SourceFormat::Markdown => markdown::parse(id, &raw.text),
            SourceFormat::Example => example::parse(id, &raw.text),
        }
    }
}

fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), ContentError> {
    let io_error = |source| ContentError::Io {
        path: dir.to_path_buf(),
        source,
    };

    for entry in fs::read_dir(dir).map_err(io_error)? {
        let entry = entry.map_err(io_error)?;
        let path = entry.path();
        // `DirEntry::file_type` does not follow symlinks.
        let file_type = entry.file_type().map_err(io_error)?;
        if file_type.is_dir() {
            collect_files(&path, files)?;
        } else if file_type.is_file() || path.is_file() {
            files.push(path);
        } else if file_type.is_symlink() {
            tracing::warn!("Not following symlinked directory {}", path.display());
        }
    }
    Ok(())
}

fn page_id(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?.with_extension("");
    let segments = relative
        .components()
        .map(|component| component.as_os_str().to_str())
        .collect::<Option<Vec<_>>>()?;
    Some(segments.join("/"))
}
