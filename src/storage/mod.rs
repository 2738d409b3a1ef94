//! Storage Module
//!
//! In-process document-collection storage for the contract service. The
//! endpoint layer only ever talks to [`contracts::ContractStore`]; the
//! concrete collection representation is not part of the service contract.

pub mod contracts;

pub use contracts::{ContractStore, StoreError};
