use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use pyq_lib::config::{SiteConfig, CONFIG_FILE_NAME};
use pyq_lib::content::{Catalog, ContentStore};

/// Shared state for CLI commands
pub struct App {
    pub store: ContentStore,
    pub config: SiteConfig,
}

impl App {
    /// Open a content root, reading `pyq.toml` from it unless a config path
    /// is given.
    pub fn new(content_root: &Path, config_path: Option<&Path>) -> Result<Self> {
        let config_path: PathBuf = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| content_root.join(CONFIG_FILE_NAME));
        let config = SiteConfig::load(&config_path)
            .with_context(|| format!("Failed to load config {}", config_path.display()))?;

        Ok(Self {
            store: ContentStore::new(content_root.to_path_buf()),
            config,
        })
    }

    /// Enumerate the content tree
    pub fn catalog(&self) -> Result<Catalog> {
        Catalog::load(&self.store, &self.config.subject_names).with_context(|| {
            format!(
                "Failed to enumerate content in {}",
                self.store.subjects_dir().display()
            )
        })
    }
}
