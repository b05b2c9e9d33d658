//! Scalable-target registry — redb-backed store of registered targets.
//!
//! Targets are keyed by `{namespace}|{resource_id}|{dimension}` and
//! JSON-serialized into redb's `&[u8]` value column. Only the in-memory
//! backend is used (the emulation never persists across processes), but
//! writes still go through serialized transactions so an upsert either
//! fully replaces an entry or fully inserts a new one.

use std::sync::Arc;

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use tracing::debug;

use crate::error::{RegistryError, RegistryResult};
use crate::types::{ScalableTarget, TargetIdent};

/// Registered targets keyed by `{namespace}|{resource_id}|{dimension}`.
const TARGETS: TableDefinition<&str, &[u8]> = TableDefinition::new("scalable_targets");

/// Convert any `Display` error into a `RegistryError` variant via a closure factory.
macro_rules! map_err {
    ($variant:ident) => {
        |e| RegistryError::$variant(e.to_string())
    };
}

/// Thread-safe registry of scalable targets for one region/account scope.
#[derive(Clone)]
pub struct TargetRegistry {
    db: Arc<Database>,
}

impl TargetRegistry {
    /// Create an empty in-memory registry.
    pub fn open_in_memory() -> RegistryResult<Self> {
        let backend = redb::backends::InMemoryBackend::new();
        let db = Database::builder()
            .create_with_backend(backend)
            .map_err(map_err!(Open))?;
        let registry = Self { db: Arc::new(db) };
        registry.ensure_tables()?;
        debug!("in-memory target registry opened");
        Ok(registry)
    }

    /// Create all tables if they don't exist yet.
    fn ensure_tables(&self) -> RegistryResult<()> {
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        txn.open_table(TARGETS).map_err(map_err!(Table))?;
        txn.commit().map_err(map_err!(Transaction))?;
        Ok(())
    }

    /// Insert or fully replace the target stored under its identity.
    pub fn upsert(&self, target: &ScalableTarget) -> RegistryResult<()> {
        let key = target.table_key();
        let value = serde_json::to_vec(target).map_err(map_err!(Serialize))?;
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        {
            let mut table = txn.open_table(TARGETS).map_err(map_err!(Table))?;
            table
                .insert(key.as_str(), value.as_slice())
                .map_err(map_err!(Write))?;
        }
        txn.commit().map_err(map_err!(Transaction))?;
        debug!(%key, "scalable target stored");
        Ok(())
    }

    /// Get one target by identity.
    pub fn get(&self, ident: &TargetIdent) -> RegistryResult<Option<ScalableTarget>> {
        let key = ident.table_key();
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(TARGETS).map_err(map_err!(Table))?;
        match table.get(key.as_str()).map_err(map_err!(Read))? {
            Some(guard) => {
                let target: ScalableTarget =
                    serde_json::from_slice(guard.value()).map_err(map_err!(Deserialize))?;
                Ok(Some(target))
            }
            None => Ok(None),
        }
    }

    /// List targets in a namespace, optionally narrowed by dimension and
    /// resource ids, in stable key order. An empty resource-id list means
    /// no filter.
    pub fn query(
        &self,
        namespace: &str,
        dimension: Option<&str>,
        resource_ids: Option<&[String]>,
    ) -> RegistryResult<Vec<ScalableTarget>> {
        let prefix = format!("{namespace}|");
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(TARGETS).map_err(map_err!(Table))?;
        let mut results = Vec::new();
        for entry in table.iter().map_err(map_err!(Read))? {
            let (key, value) = entry.map_err(map_err!(Read))?;
            if !key.value().starts_with(&prefix) {
                continue;
            }
            let target: ScalableTarget =
                serde_json::from_slice(value.value()).map_err(map_err!(Deserialize))?;
            if let Some(dim) = dimension
                && target.scalable_dimension != dim
            {
                continue;
            }
            if let Some(ids) = resource_ids
                && !ids.is_empty()
                && !ids.iter().any(|id| *id == target.resource_id)
            {
                continue;
            }
            results.push(target);
        }
        Ok(results)
    }
}
