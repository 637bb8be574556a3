//! Persistence seam for access records

use async_trait::async_trait;
use chrono::Utc;
use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::aggregate::ValidatedAccess;
use crate::error::StoreError;
use crate::model::{AccessId, AccessRecord};

/// Trait for access record storage
///
/// The store owns ids and timestamps; the editor only hands it validated
/// drafts.
#[async_trait]
pub trait AccessStore: Send + Sync {
    /// Create a record
    async fn create(&self, access: ValidatedAccess) -> Result<AccessRecord, StoreError>;

    /// Replace name, provider and config of an existing record
    async fn update(
        &self,
        id: AccessId,
        access: ValidatedAccess,
    ) -> Result<AccessRecord, StoreError>;

    /// Load one record
    async fn get(&self, id: AccessId) -> Result<AccessRecord, StoreError>;

    /// All records, oldest first
    async fn list(&self) -> Result<Vec<AccessRecord>, StoreError>;

    /// Delete a record
    async fn delete(&self, id: AccessId) -> Result<(), StoreError>;
}

/// In-memory implementation of [`AccessStore`]
#[derive(Debug, Default)]
pub struct MemoryAccessStore {
    records: RwLock<IndexMap<AccessId, AccessRecord>>,
}

impl MemoryAccessStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get number of stored records
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    fn ensure_unique(
        records: &IndexMap<AccessId, AccessRecord>,
        name: &str,
        except: Option<AccessId>,
    ) -> Result<(), StoreError> {
        let taken = records
            .values()
            .any(|record| record.name == name && Some(record.id) != except);
        if taken {
            Err(StoreError::DuplicateName(name.to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl AccessStore for MemoryAccessStore {
    async fn create(&self, access: ValidatedAccess) -> Result<AccessRecord, StoreError> {
        let mut records = self.records.write();
        Self::ensure_unique(&records, &access.name, None)?;

        let now = Utc::now();
        let record = AccessRecord {
            id: AccessId::new(),
            name: access.name,
            provider: access.provider,
            usage: access.provider.info().usage,
            config: access.config,
            created_at: now,
            updated_at: now,
        };
        records.insert(record.id, record.clone());
        tracing::debug!(id = %record.id, provider = %record.provider, "access record created");
        Ok(record)
    }

    async fn update(
        &self,
        id: AccessId,
        access: ValidatedAccess,
    ) -> Result<AccessRecord, StoreError> {
        let mut records = self.records.write();
        Self::ensure_unique(&records, &access.name, Some(id))?;

        let record = records.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        record.name = access.name;
        record.provider = access.provider;
        record.usage = access.provider.info().usage;
        record.config = access.config;
        record.updated_at = Utc::now();
        tracing::debug!(%id, "access record updated");
        Ok(record.clone())
    }

    async fn get(&self, id: AccessId) -> Result<AccessRecord, StoreError> {
        self.records
            .read()
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn list(&self) -> Result<Vec<AccessRecord>, StoreError> {
        Ok(self.records.read().values().cloned().collect())
    }

    async fn delete(&self, id: AccessId) -> Result<(), StoreError> {
        self.records
            .write()
            .shift_remove(&id)
            .ok_or(StoreError::NotFound(id))?;
        tracing::debug!(%id, "access record deleted");
        Ok(())
    }
}
