//! Catalog data sources.
//!
//! The query engine works on a point-in-time snapshot; a source only has to
//! return every record matching an exact category/subcategory scope.

use async_trait::async_trait;

use crate::catalog::CatalogRecord;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::search::Scope;

/// Something that can list catalog records for a scope.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch all records matching `scope` exactly.
    async fn fetch_records(&self, scope: &Scope) -> Result<Vec<CatalogRecord>, CommerceError>;
}

/// Fetch a snapshot, degrading a failing source to an empty one.
///
/// The failure is logged here; the engine then simply sees zero records.
pub async fn fetch_or_empty<S>(source: &S, scope: &Scope) -> Vec<CatalogRecord>
where
    S: CatalogSource + ?Sized,
{
    match source.fetch_records(scope).await {
        Ok(records) => {
            tracing::debug!(
                category = ?scope.category,
                subcategory = ?scope.subcategory,
                count = records.len(),
                "fetched catalog snapshot"
            );
            records
        }
        Err(e) => {
            tracing::error!(error = %e, "catalog fetch failed, using empty snapshot");
            Vec::new()
        }
    }
}

/// Vec-backed catalog with the admin CRUD operations.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    records: Vec<CatalogRecord>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from records, validating each and rejecting duplicate ids.
    pub fn from_records(records: Vec<CatalogRecord>) -> Result<Self, CommerceError> {
        let mut catalog = Self::new();
        for record in records {
            catalog.insert(record)?;
        }
        Ok(catalog)
    }

    /// Parse a JSON array of record documents.
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        let records: Vec<CatalogRecord> = serde_json::from_str(json)?;
        Self::from_records(records)
    }

    /// Serialize all records as a pretty JSON array.
    pub fn to_json(&self) -> Result<String, CommerceError> {
        Ok(serde_json::to_string_pretty(&self.records)?)
    }

    /// All records in insertion order.
    pub fn records(&self) -> &[CatalogRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &ProductId) -> Option<&CatalogRecord> {
        self.records.iter().find(|r| &r.id == id)
    }

    /// Add a new record.
    pub fn insert(&mut self, record: CatalogRecord) -> Result<(), CommerceError> {
        record.validate()?;
        if self.get(&record.id).is_some() {
            return Err(CommerceError::DuplicateProduct(record.id.into_inner()));
        }
        tracing::debug!(id = %record.id, "inserted catalog record");
        self.records.push(record);
        Ok(())
    }

    /// Replace an existing record in place.
    pub fn update(&mut self, record: CatalogRecord) -> Result<(), CommerceError> {
        record.validate()?;
        let slot = self
            .records
            .iter_mut()
            .find(|r| r.id == record.id)
            .ok_or_else(|| CommerceError::ProductNotFound(record.id.to_string()))?;
        *slot = record;
        Ok(())
    }

    /// Delete a record, returning it.
    pub fn remove(&mut self, id: &ProductId) -> Result<CatalogRecord, CommerceError> {
        let index = self
            .records
            .iter()
            .position(|r| &r.id == id)
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))?;
        Ok(self.records.remove(index))
    }
}

#[async_trait]
impl CatalogSource for InMemoryCatalog {
    async fn fetch_records(&self, scope: &Scope) -> Result<Vec<CatalogRecord>, CommerceError> {
        Ok(self
            .records
            .iter()
            .filter(|r| scope.matches(r))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    struct Offline;

    #[async_trait]
    impl CatalogSource for Offline {
        async fn fetch_records(&self, _scope: &Scope) -> Result<Vec<CatalogRecord>, CommerceError> {
            Err(CommerceError::DataSourceError("connection refused".to_string()))
        }
    }

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::from_records(vec![
            CatalogRecord::new("1", "Alfajor", "golosinas", "alfajores", Money::ars(100)),
            CatalogRecord::new("2", "Chicle", "golosinas", "chicles", Money::ars(20)),
            CatalogRecord::new("3", "Fideos", "almacen", "pastas", Money::ars(900)),
        ])
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_by_scope() {
        let catalog = catalog();

        let all = catalog.fetch_records(&Scope::all()).await.unwrap();
        assert_eq!(all.len(), 3);

        let sweets = catalog.fetch_records(&Scope::category("golosinas")).await.unwrap();
        assert_eq!(sweets.len(), 2);

        let gum = catalog
            .fetch_records(&Scope::subcategory("golosinas", "chicles"))
            .await
            .unwrap();
        assert_eq!(gum.len(), 1);
        assert_eq!(gum[0].name, "Chicle");
    }

    #[tokio::test]
    async fn test_failing_source_yields_empty_snapshot() {
        let records = fetch_or_empty(&Offline, &Scope::all()).await;
        assert!(records.is_empty());
    }

    #[test]
    fn test_insert_rejects_duplicates_and_invalid() {
        let mut catalog = catalog();
        let dup = CatalogRecord::new("1", "Otro", "golosinas", "alfajores", Money::ars(1));
        assert!(matches!(catalog.insert(dup), Err(CommerceError::DuplicateProduct(_))));

        let invalid = CatalogRecord::new("9", "", "golosinas", "alfajores", Money::ars(1));
        assert!(matches!(catalog.insert(invalid), Err(CommerceError::ValidationError(_))));
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_update_and_remove() {
        let mut catalog = catalog();
        let renamed = CatalogRecord::new("1", "Alfajor Doble", "golosinas", "alfajores", Money::ars(120));
        catalog.update(renamed).unwrap();
        assert_eq!(catalog.get(&"1".into()).unwrap().name, "Alfajor Doble");

        let missing = CatalogRecord::new("404", "Nada", "golosinas", "alfajores", Money::ars(1));
        assert!(matches!(catalog.update(missing), Err(CommerceError::ProductNotFound(_))));

        let removed = catalog.remove(&"2".into()).unwrap();
        assert_eq!(removed.name, "Chicle");
        assert!(matches!(catalog.remove(&"2".into()), Err(CommerceError::ProductNotFound(_))));
    }

    #[test]
    fn test_json_round_trip() {
        let catalog = catalog();
        let json = catalog.to_json().unwrap();
        let back = InMemoryCatalog::from_json(&json).unwrap();
        assert_eq!(back.records(), catalog.records());
    }
}
