//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};
use tienda_commerce::cart::{CacheCartStore, CartManager};
use tienda_commerce::catalog::{InMemoryCatalog, Taxonomy};

use crate::config::{CliConfig, CONFIG_NAMES};
use crate::output::Output;
use crate::source::FileCatalog;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Config file in use, if any.
    pub config_path: Option<PathBuf>,
    /// The store's category tree.
    pub taxonomy: Taxonomy,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (CliConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        Ok(Self {
            config,
            output,
            cwd,
            config_path,
            taxonomy: Taxonomy::default_store(),
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some((config, config_path));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Directory relative paths in the config are resolved against: the
    /// config file's directory, or the working directory without one.
    pub fn root(&self) -> PathBuf {
        self.config_path
            .as_ref()
            .and_then(|p| p.parent())
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| self.cwd.join(p))
            .unwrap_or_else(|| self.cwd.clone())
    }

    /// Resolve a path relative to the project root.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.root().join(path)
        }
    }

    /// The catalog data file.
    pub fn data_file(&self) -> PathBuf {
        self.resolve_path(&self.config.catalog.data_file)
    }

    /// Read-only source for browsing.
    pub fn catalog_source(&self) -> FileCatalog {
        FileCatalog::new(self.data_file())
    }

    /// Load the catalog for editing. A missing data file is an empty catalog.
    pub fn load_catalog(&self) -> Result<InMemoryCatalog> {
        let path = self.data_file();
        if !path.exists() {
            self.output
                .debug(&format!("No catalog at {}, starting empty", path.display()));
            return Ok(InMemoryCatalog::new());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
        InMemoryCatalog::from_json(&content)
            .with_context(|| format!("Failed to parse catalog: {}", path.display()))
    }

    /// Write the catalog back to the data file.
    pub fn save_catalog(&self, catalog: &InMemoryCatalog) -> Result<()> {
        let path = self.data_file();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, catalog.to_json()?)
            .with_context(|| format!("Failed to write catalog: {}", path.display()))
    }

    /// Open the persisted cart.
    pub fn open_cart(&self) -> Result<CartManager<CacheCartStore>> {
        let key = self.config.storage.cart_key.as_str();
        if !tienda_cache::is_valid_key(key) {
            bail!(
                "Invalid storage.cart_key '{}'. Run `tienda config validate` for details.",
                key
            );
        }
        let dir = self.resolve_path(&self.config.storage.cart_dir);
        let store = CacheCartStore::open(&dir)
            .with_context(|| format!("Failed to open cart storage: {}", dir.display()))?
            .with_key(key);
        Ok(CartManager::load(store))
    }
}
