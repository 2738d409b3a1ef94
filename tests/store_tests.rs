//! Unit tests for the contract store
//!
//! These tests exercise the document-collection facade directly, without
//! going through the HTTP layer.

use contract_service::model::Contract;
use contract_service::storage::{ContractStore, StoreError};

#[path = "mod.rs"]
mod test_helpers;
use test_helpers::{new_contract, numbered_contract, NON_EXISTING_ID, TEST_COLLECTION};

/// Test that save assigns a fresh id to an entity without one
/// Why: The store owns id assignment; callers never pick ids
#[tokio::test]
async fn test_save_assigns_id() {
    let store = ContractStore::new(TEST_COLLECTION);

    let saved = store.save(numbered_contract(1)).await;

    let id = saved.id.expect("saved contract must carry an id");
    assert!(!id.is_empty());
    assert_eq!(store.count().await, 1);
}

/// Test that two saves assign distinct ids
/// Why: Ids must be globally unique within the collection
#[tokio::test]
async fn test_save_assigns_distinct_ids() {
    let store = ContractStore::new(TEST_COLLECTION);

    let first = store.save(numbered_contract(1)).await;
    let second = store.save(numbered_contract(2)).await;

    assert_ne!(first.id, second.id);
    assert_eq!(store.count().await, 2);
}

/// Test that saving an entity with an existing id overwrites the record
/// Why: save is an upsert; last writer wins, no optimistic locking
#[tokio::test]
async fn test_save_with_id_overwrites() {
    let store = ContractStore::new(TEST_COLLECTION);

    let mut saved = store.save(numbered_contract(1)).await;
    saved.contract_type = "typeEdited".to_string();

    let resaved = store.save(saved.clone()).await;

    assert_eq!(resaved, saved);
    assert_eq!(store.count().await, 1, "overwrite must not add a record");

    let from_store = store.find_by_id(saved.id.as_deref().unwrap()).await.unwrap();
    assert_eq!(from_store.contract_type, "typeEdited");
}

/// Test that find_by_id returns None for an unknown id
/// Why: Absence is an explicit Option, not an error
#[tokio::test]
async fn test_find_by_id_absent() {
    let store = ContractStore::new(TEST_COLLECTION);

    assert!(store.find_by_id(NON_EXISTING_ID).await.is_none());
}

/// Test that find_all returns every stored entity
/// Why: Full-scan listing backs GET /contracts
#[tokio::test]
async fn test_find_all() {
    let store = ContractStore::new(TEST_COLLECTION);

    let saved1 = store.save(numbered_contract(1)).await;
    let saved2 = store.save(numbered_contract(2)).await;
    let saved3 = store.save(numbered_contract(3)).await;

    let all = store.find_all().await;
    assert_eq!(all.len(), 3);
    for saved in [saved1, saved2, saved3] {
        assert!(all.contains(&saved));
    }
}

/// Test that find_by_consultant_id filters exactly and case-sensitively
/// Why: Secondary lookup must not fuzzy-match
#[tokio::test]
async fn test_find_by_consultant_id_exact_match() {
    let store = ContractStore::new(TEST_COLLECTION);

    store
        .save(new_contract("unitId1", "consultantId1", "s1", "e1", "t1"))
        .await;
    store
        .save(new_contract("unitId2", "consultantId1", "s2", "e2", "t2"))
        .await;
    store
        .save(new_contract("unitId3", "consultantid1", "s3", "e3", "t3"))
        .await;

    let matches = store.find_by_consultant_id("consultantId1").await;
    assert_eq!(matches.len(), 2);
    assert!(matches.iter().all(|c| c.consultant_id == "consultantId1"));

    // Lookup is case-sensitive
    assert_eq!(store.find_by_consultant_id("consultantid1").await.len(), 1);
    assert!(store.find_by_consultant_id("CONSULTANTID1").await.is_empty());
}

/// Test that find_by_unit_id filters on the unit side
/// Why: Symmetric secondary lookup
#[tokio::test]
async fn test_find_by_unit_id() {
    let store = ContractStore::new(TEST_COLLECTION);

    store
        .save(new_contract("unitId1", "consultantId1", "s1", "e1", "t1"))
        .await;
    store
        .save(new_contract("unitId1", "consultantId2", "s2", "e2", "t2"))
        .await;
    store
        .save(new_contract("unitId3", "consultantId3", "s3", "e3", "t3"))
        .await;

    let matches = store.find_by_unit_id("unitId1").await;
    assert_eq!(matches.len(), 2);
    assert!(matches.iter().all(|c| c.unit_id == "unitId1"));

    assert!(store.find_by_unit_id("unitId9").await.is_empty());
}

/// Test that delete removes the record matching the entity's id
/// Why: Deletion must shrink the collection by exactly one
#[tokio::test]
async fn test_delete_existing() {
    let store = ContractStore::new(TEST_COLLECTION);

    let saved = store.save(numbered_contract(1)).await;
    let kept = store.save(numbered_contract(2)).await;

    store.delete(&saved).await.expect("delete should succeed");

    assert_eq!(store.count().await, 1);
    assert!(store.find_by_id(saved.id.as_deref().unwrap()).await.is_none());
    assert!(store.find_by_id(kept.id.as_deref().unwrap()).await.is_some());
}

/// Test that deleting an absent id is an error, not a no-op
/// Why: Callers pre-check existence; the store reports the inconsistency
#[tokio::test]
async fn test_delete_absent_is_error() {
    let store = ContractStore::new(TEST_COLLECTION);

    let mut ghost = numbered_contract(1);
    ghost.id = Some(NON_EXISTING_ID.to_string());

    let result = store.delete(&ghost).await;
    assert!(matches!(result, Err(StoreError::NotFound(_))));
}

/// Test that deleting an entity without an id is rejected
/// Why: There is nothing to match against in the collection
#[tokio::test]
async fn test_delete_without_id_is_error() {
    let store = ContractStore::new(TEST_COLLECTION);

    let unsaved = numbered_contract(1);

    let result = store.delete(&unsaved).await;
    assert!(matches!(result, Err(StoreError::MissingId)));
}

/// Test that cloned handles share the same collection
/// Why: The server and background callers must see one consistent store
#[tokio::test]
async fn test_clone_shares_collection() {
    let store = ContractStore::new(TEST_COLLECTION);
    let handle = store.clone();

    let saved = store.save(numbered_contract(1)).await;

    assert_eq!(handle.count().await, 1);
    let via_handle: Option<Contract> = handle.find_by_id(saved.id.as_deref().unwrap()).await;
    assert_eq!(via_handle.as_ref(), Some(&saved));
}
