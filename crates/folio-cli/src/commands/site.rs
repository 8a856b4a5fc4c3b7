//! Loads a site's configuration and content for the build commands.

use std::path::Path;

use anyhow::{Context, Result};
use folio::{
    ContentSource, ContentStore, ContentUnit, HtmlSink, LayoutComposer, NavLink, PageMeta,
};
use folio_config::{ConfigLoader, Paths, SiteConfig};

/// An initialized site: merged configuration plus its content store.
pub struct Site {
    pub config: SiteConfig,
    pub store: ContentStore,
}

impl Site {
    pub fn open(project: &str) -> Result<Self> {
        let project_dir = Path::new(project);
        if !Paths::is_initialized(project_dir) {
            anyhow::bail!(
                "No folio.toml found in {}. Run `folio init` first.",
                project_dir.display()
            );
        }

        let config = ConfigLoader::new()
            .with_project_dir(project_dir)
            .load()
            .context("Failed to load site configuration")?;

        let store = ContentStore::from_dir(&config.content.dir).with_context(|| {
            format!("Failed to read content from {}", config.content.dir.display())
        })?;

        Ok(Self { config, store })
    }

    /// Pages listed under `[[pages]]`, or every page in the content store.
    pub fn page_ids(&self) -> Vec<String> {
        if self.config.pages.is_empty() {
            self.store.ids().map(str::to_string).collect()
        } else {
            self.config.pages.iter().map(|page| page.id.clone()).collect()
        }
    }

    pub fn composer_for(&self, id: &str) -> LayoutComposer {
        let navigation = self
            .config
            .navigation
            .iter()
            .map(|entry| NavLink::new(&entry.label, &entry.page));

        let composer = LayoutComposer::new()
            .with_default_cap(self.config.layout.default_cap)
            .with_navigation(navigation);

        match self.config.page(id).and_then(|page| page.cap) {
            Some(cap) => composer.with_cap(cap),
            None => composer,
        }
    }

    /// Loads a page, applying any title override from configuration.
    pub fn load(&self, id: &str) -> Result<ContentUnit> {
        let unit = self
            .store
            .load(id)
            .with_context(|| format!("Failed to load page '{id}'"))?;

        match self.config.page(id).and_then(|page| page.title.clone()) {
            Some(title) => {
                let meta = PageMeta {
                    title: Some(title),
                    ..unit.meta().clone()
                };
                Ok(ContentUnit::new(unit.id(), meta, unit.body().clone()))
            }
            None => Ok(unit),
        }
    }

    pub fn html_sink(&self, sink: HtmlSink) -> HtmlSink {
        sink.with_site_title(&self.config.site.title)
            .with_stylesheet(&self.config.site.stylesheet)
    }
}
