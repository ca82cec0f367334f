//! JSON file catalog source.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tienda_commerce::catalog::{CatalogRecord, CatalogSource, InMemoryCatalog};
use tienda_commerce::search::Scope;
use tienda_commerce::CommerceError;

/// Reads the catalog data file on every fetch.
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for FileCatalog {
    async fn fetch_records(&self, scope: &Scope) -> Result<Vec<CatalogRecord>, CommerceError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no catalog file");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(CommerceError::DataSourceError(format!(
                    "{}: {}",
                    self.path.display(),
                    e
                )))
            }
        };
        let catalog = InMemoryCatalog::from_json(&content).map_err(|e| {
            CommerceError::DataSourceError(format!("{}: {}", self.path.display(), e))
        })?;
        catalog.fetch_records(scope).await
    }
}
