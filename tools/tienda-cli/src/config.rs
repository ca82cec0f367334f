//! CLI configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tienda_commerce::cart::CART_STORAGE_KEY;
use tienda_commerce::search::{
    MatchFields, SuggestSettings, ADMIN_PAGE_SIZE, CATALOG_PAGE_SIZE, FEATURED_LIMIT,
};

/// File names searched for, in order, when no `--config` is given.
pub const CONFIG_NAMES: [&str; 3] = ["tienda.toml", ".tienda.toml", "tienda.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Catalog data and page sizes.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Text filter and quick search.
    #[serde(default)]
    pub search: SearchConfig,

    /// Cart persistence.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))
    }

    /// Quick-search settings.
    pub fn suggest_settings(&self) -> SuggestSettings {
        SuggestSettings {
            min_chars: self.search.suggestion_min_chars,
            limit: self.search.suggestion_limit,
        }
    }
}

/// Catalog configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON file holding the product records.
    #[serde(default = "default_data_file")]
    pub data_file: String,

    /// Products per catalog page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Products per admin table page.
    #[serde(default = "default_admin_page_size")]
    pub admin_page_size: u32,

    /// Products per category on the home listing.
    #[serde(default = "default_featured_limit")]
    pub featured_limit: usize,
}

fn default_data_file() -> String {
    "catalog.json".to_string()
}

fn default_page_size() -> u32 {
    CATALOG_PAGE_SIZE
}

fn default_admin_page_size() -> u32 {
    ADMIN_PAGE_SIZE
}

fn default_featured_limit() -> usize {
    FEATURED_LIMIT
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            page_size: default_page_size(),
            admin_page_size: default_admin_page_size(),
            featured_limit: default_featured_limit(),
        }
    }
}

/// Search configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Fields the catalog search term matches.
    #[serde(default = "MatchFields::name_only")]
    pub match_fields: MatchFields,

    /// Fields the admin search term matches.
    #[serde(default = "MatchFields::all")]
    pub admin_match_fields: MatchFields,

    /// Shortest term that produces suggestions.
    #[serde(default = "default_suggestion_min_chars")]
    pub suggestion_min_chars: usize,

    /// Maximum number of suggestions.
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,
}

fn default_suggestion_min_chars() -> usize {
    SuggestSettings::default().min_chars
}

fn default_suggestion_limit() -> usize {
    SuggestSettings::default().limit
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            match_fields: MatchFields::name_only(),
            admin_match_fields: MatchFields::all(),
            suggestion_min_chars: default_suggestion_min_chars(),
            suggestion_limit: default_suggestion_limit(),
        }
    }
}

/// Cart storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory the cart is persisted in.
    #[serde(default = "default_cart_dir")]
    pub cart_dir: String,

    /// Key the cart is stored under.
    #[serde(default = "default_cart_key")]
    pub cart_key: String,
}

fn default_cart_dir() -> String {
    ".tienda/cart".to_string()
}

fn default_cart_key() -> String {
    CART_STORAGE_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            cart_dir: default_cart_dir(),
            cart_key: default_cart_key(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log filter; `RUST_LOG` takes precedence.
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

/// Generate a default tienda.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# tienda storefront configuration

[catalog]
# Product records, relative to this file
data_file = "{data_file}"
page_size = {page_size}
admin_page_size = {admin_page_size}
featured_limit = {featured_limit}

[search]
# Any of "name", "category", "subcategory"
match_fields = ["name"]
admin_match_fields = ["name", "category", "subcategory"]
suggestion_min_chars = {min_chars}
suggestion_limit = {limit}

[storage]
cart_dir = "{cart_dir}"
cart_key = "{cart_key}"

[logging]
# Overridden by RUST_LOG
level = "{level}"
"#,
        data_file = default_data_file(),
        page_size = CATALOG_PAGE_SIZE,
        admin_page_size = ADMIN_PAGE_SIZE,
        featured_limit = FEATURED_LIMIT,
        min_chars = default_suggestion_min_chars(),
        limit = default_suggestion_limit(),
        cart_dir = default_cart_dir(),
        cart_key = default_cart_key(),
        level = default_level(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tienda_commerce::search::MatchField;

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();

        assert_eq!(config.catalog.data_file, "catalog.json");
        assert_eq!(config.catalog.page_size, 12);
        assert_eq!(config.catalog.admin_page_size, 10);
        assert_eq!(config.catalog.featured_limit, 8);
        assert_eq!(config.search.match_fields, MatchFields::name_only());
        assert_eq!(config.search.admin_match_fields, MatchFields::all());
        assert_eq!(config.suggest_settings(), SuggestSettings::default());
        assert_eq!(config.storage.cart_key, "cart");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: CliConfig = toml::from_str(
            r#"
            [search]
            match_fields = ["name", "subcategory"]
            "#,
        )
        .unwrap();

        assert!(config.search.match_fields.contains(MatchField::Subcategory));
        assert!(!config.search.match_fields.contains(MatchField::Category));
        assert_eq!(config.catalog.page_size, 12);
        assert_eq!(config.storage.cart_dir, ".tienda/cart");
    }

    #[test]
    fn test_save_and_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tienda.json");
        let path = path.to_str().unwrap();

        let mut config = CliConfig::default();
        config.catalog.page_size = 24;
        config.save(path).unwrap();

        let loaded = CliConfig::load(path).unwrap();
        assert_eq!(loaded.catalog.page_size, 24);
        assert_eq!(loaded.search.admin_match_fields, MatchFields::all());
    }
}
