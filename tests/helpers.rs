//! Shared test helpers for unit tests
//!
//! This module provides helper functions used by unit tests.
//!
//! The module is organized into two categories:
//! - **Configuration Builders**: Functions to create test configurations
//! - **Contract Builders**: Functions to create test contracts

use contract_service::api::ApiServer;
use contract_service::config::{ApiConfig, Config, StoreConfig};
use contract_service::model::Contract;
use contract_service::storage::ContractStore;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Id that is guaranteed not to exist in a freshly built store
#[allow(dead_code)]
pub const NON_EXISTING_ID: &str = "nonExistingId";

/// Collection name used by test stores
#[allow(dead_code)]
pub const TEST_COLLECTION: &str = "contracts-test";

// ============================================================================
// CONFIGURATION BUILDERS
// ============================================================================

/// Builds a minimal valid configuration for tests.
#[allow(dead_code)]
pub fn build_test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 8888,
            cors_origins: vec!["*".to_string()],
        },
        store: StoreConfig {
            collection: TEST_COLLECTION.to_string(),
        },
    }
}

/// Creates a test API server together with a handle to its backing store.
///
/// The store handle shares the collection with the server, so tests can
/// seed and inspect entities directly while driving the HTTP surface.
#[allow(dead_code)]
pub fn create_test_api_server() -> (ApiServer, ContractStore) {
    let config = build_test_config();
    let store = ContractStore::new(TEST_COLLECTION);

    (ApiServer::new(config, store.clone()), store)
}

// ============================================================================
// CONTRACT BUILDERS
// ============================================================================

/// Builds a contract with the given field values and no id.
#[allow(dead_code)]
pub fn new_contract(
    unit_id: &str,
    consultant_id: &str,
    start_date: &str,
    end_date: &str,
    contract_type: &str,
) -> Contract {
    Contract {
        id: None,
        unit_id: unit_id.to_string(),
        consultant_id: consultant_id.to_string(),
        start_date: start_date.to_string(),
        end_date: end_date.to_string(),
        contract_type: contract_type.to_string(),
    }
}

/// Builds the n-th numbered test contract (unitId1/consultantId1/... for n = 1).
#[allow(dead_code)]
pub fn numbered_contract(n: u32) -> Contract {
    new_contract(
        &format!("unitId{}", n),
        &format!("consultantId{}", n),
        &format!("startDate{}", n),
        &format!("endDate{}", n),
        &format!("type{}", n),
    )
}
