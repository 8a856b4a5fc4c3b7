//! Configuration management for folio sites
//!
//! Provides hierarchical configuration loading from multiple sources:
//! 1. Environment variables (FOLIO_* prefix, `__` between nested keys)
//! 2. folio.local.toml (gitignored, local overrides)
//! 3. folio.toml (git-tracked, site config)
//! 4. ~/.config/folio/config.toml (user defaults)
//! 5. Built-in defaults (lowest precedence)
//!
//! Page ids and their column caps live here rather than in code: a site
//! lists the pages it builds under `[[pages]]`, and pages without an entry
//! fall back to the cap their content declares or `layout.default_cap`.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

mod error;
mod loader;
mod paths;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use paths::Paths;

/// Main site configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub site: SiteSection,
    pub content: ContentConfig,
    pub output: OutputConfig,
    pub layout: LayoutConfig,
    pub viewport: ViewportConfig,
    pub pages: Vec<PageEntry>,
    pub navigation: Vec<NavEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSection {
    pub title: String,
    /// Stylesheet href linked from every page; empty for none.
    pub stylesheet: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: "Folio".to_string(),
            stylesheet: "/style.css".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    pub dir: PathBuf,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("content"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("public"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Column cap in pixels for pages that declare none.
    pub default_cap: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self { default_cap: 600 }
    }
}

/// Viewport used when building pages ahead of time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 800,
        }
    }
}

/// A page the site builds, with optional overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageEntry {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cap: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// A navigation link pointing at a page id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavEntry {
    pub label: String,
    pub page: String,
}

impl SiteConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        ConfigLoader::new().load()
    }

    /// Load configuration from specific project directory
    pub fn load_from_dir(project_dir: impl AsRef<Path>) -> Result<Self> {
        ConfigLoader::new().with_project_dir(project_dir).load()
    }

    /// Configuration written by `folio init`
    pub fn starter(title: impl Into<String>) -> Self {
        Self {
            site: SiteSection {
                title: title.into(),
                ..Default::default()
            },
            pages: vec![
                PageEntry {
                    id: "index".to_string(),
                    cap: None,
                    title: None,
                },
                PageEntry {
                    id: "examples/stack".to_string(),
                    cap: Some(150),
                    title: None,
                },
            ],
            navigation: vec![
                NavEntry {
                    label: "Home".to_string(),
                    page: "index".to_string(),
                },
                NavEntry {
                    label: "Examples".to_string(),
                    page: "examples/stack".to_string(),
                },
            ],
            ..Default::default()
        }
    }

    /// Configured entry for a page id
    pub fn page(&self, id: &str) -> Option<&PageEntry> {
        self.pages.iter().find(|page| page.id == id)
    }

    /// Check caps and page ids
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.layout.default_cap == 0 {
            return Err(ConfigError::ValidationError(
                "layout.default_cap must be greater than zero".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for page in &self.pages {
            if page.id.is_empty() {
                return Err(ConfigError::ValidationError(
                    "page id must not be empty".to_string(),
                ));
            }
            if !seen.insert(page.id.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "page '{}' is listed more than once",
                    page.id
                )));
            }
            if page.cap == Some(0) {
                return Err(ConfigError::ValidationError(format!(
                    "page '{}' has a zero cap",
                    page.id
                )));
            }
        }

        if let Some(entry) = self.navigation.iter().find(|entry| entry.page.is_empty()) {
            return Err(ConfigError::ValidationError(format!(
                "navigation entry '{}' has no page",
                entry.label
            )));
        }

        Ok(())
    }

    /// Resolve relative paths to absolute
    pub fn resolve_paths(&mut self, base_dir: impl AsRef<Path>) {
        let base = base_dir.as_ref();

        if self.content.dir.is_relative() {
            self.content.dir = base.join(&self.content.dir);
        }

        if self.output.dir.is_relative() {
            self.output.dir = base.join(&self.output.dir);
        }
    }
}
