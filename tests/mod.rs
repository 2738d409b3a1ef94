//! Test module organization
//!
//! This module re-exports test helpers for use in test files.

mod helpers;

#[allow(unused_imports)]
pub use helpers::{
    build_test_config, create_test_api_server, new_contract, numbered_contract, NON_EXISTING_ID,
    TEST_COLLECTION,
};
