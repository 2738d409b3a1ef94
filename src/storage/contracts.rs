//! Contract Store
//!
//! A persistence facade over a named collection of [`Contract`] entities,
//! keyed by an opaque string id. The store supports exact-id lookup,
//! full-scan listing, secondary-field lookup (by consultantId, by unitId),
//! insert/upsert, delete, and count.
//!
//! The collection lives behind an async `RwLock`, so every operation is
//! independently atomic at single-entity granularity and the store handle is
//! safe to share across concurrent request handlers. No multi-entity
//! transactions are provided.

use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::model::Contract;

/// Errors surfaced by store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The entity passed to `delete` carries no id
    #[error("contract has no id")]
    MissingId,
    /// No entity with the given id exists in the collection
    #[error("no contract with id {0}")]
    NotFound(String),
}

/// Document-collection store for contracts.
///
/// Cloning the store clones a handle to the same underlying collection.
#[derive(Debug, Clone)]
pub struct ContractStore {
    /// Collection name, used for logging only
    collection: String,
    /// Stored contracts keyed by id
    contracts: Arc<RwLock<HashMap<String, Contract>>>,
}

impl ContractStore {
    /// Creates an empty store over the given collection name.
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            contracts: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Returns every stored contract. Order is unspecified.
    pub async fn find_all(&self) -> Vec<Contract> {
        let contracts = self.contracts.read().await;
        contracts.values().cloned().collect()
    }

    /// Looks up a contract by exact id.
    ///
    /// # Returns
    ///
    /// * `Some(Contract)` - The stored entity with that id
    /// * `None` - No entity has that id (this is not an error)
    pub async fn find_by_id(&self, id: &str) -> Option<Contract> {
        let contracts = self.contracts.read().await;
        contracts.get(id).cloned()
    }

    /// Returns all contracts whose consultantId equals the given value
    /// exactly (case-sensitive). Empty when none match.
    pub async fn find_by_consultant_id(&self, consultant_id: &str) -> Vec<Contract> {
        let contracts = self.contracts.read().await;
        contracts
            .values()
            .filter(|c| c.consultant_id == consultant_id)
            .cloned()
            .collect()
    }

    /// Returns all contracts whose unitId equals the given value exactly
    /// (case-sensitive). Empty when none match.
    pub async fn find_by_unit_id(&self, unit_id: &str) -> Vec<Contract> {
        let contracts = self.contracts.read().await;
        contracts
            .values()
            .filter(|c| c.unit_id == unit_id)
            .cloned()
            .collect()
    }

    /// Inserts or overwrites a contract.
    ///
    /// If the entity has no id, a fresh globally-unique id is assigned and
    /// the entity is inserted. If it has an id, any existing record under
    /// that id is overwritten; last writer wins, there is no optimistic-lock
    /// check.
    ///
    /// # Returns
    ///
    /// The stored, id-populated copy.
    pub async fn save(&self, mut contract: Contract) -> Contract {
        let id = match contract.id.clone() {
            Some(id) => id,
            None => {
                let id = Uuid::new_v4().to_string();
                contract.id = Some(id.clone());
                id
            }
        };

        let mut contracts = self.contracts.write().await;
        contracts.insert(id.clone(), contract.clone());
        debug!("saved contract {} in collection {}", id, self.collection);

        contract
    }

    /// Removes the record matching the entity's id.
    ///
    /// Callers are expected to pre-check existence; deleting an absent id is
    /// an error, not a no-op.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The record was removed
    /// * `Err(StoreError::MissingId)` - The entity carries no id
    /// * `Err(StoreError::NotFound)` - No record with that id exists
    pub async fn delete(&self, contract: &Contract) -> Result<(), StoreError> {
        let id = contract.id.as_deref().ok_or(StoreError::MissingId)?;

        let mut contracts = self.contracts.write().await;
        match contracts.remove(id) {
            Some(_) => {
                debug!("deleted contract {} from collection {}", id, self.collection);
                Ok(())
            }
            None => Err(StoreError::NotFound(id.to_string())),
        }
    }

    /// Total number of contracts currently stored.
    pub async fn count(&self) -> usize {
        let contracts = self.contracts.read().await;
        contracts.len()
    }
}
