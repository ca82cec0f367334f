//! Commerce error types.
//!
//! The cart and query engines themselves are infallible; these errors come
//! from the ambient layers around them (stores, data sources, admin edits).

use thiserror::Error;

/// Errors that can occur in storefront operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A record with this id already exists.
    #[error("Product already exists: {0}")]
    DuplicateProduct(String),

    /// Record failed admin validation.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The catalog data source could not be read.
    #[error("Data source error: {0}")]
    DataSourceError(String),

    /// Cart storage could not be read or written.
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Cache error.
    #[error("Cache error: {0}")]
    CacheError(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[cfg(feature = "storage")]
impl From<tienda_cache::CacheError> for CommerceError {
    fn from(e: tienda_cache::CacheError) -> Self {
        match e {
            tienda_cache::CacheError::SerializeError(inner) => {
                CommerceError::SerializationError(inner.to_string())
            }
            other => CommerceError::CacheError(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
