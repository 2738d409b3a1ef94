//! REST API Server Module
//!
//! This module provides the REST API server for the contract service,
//! exposing CRUD endpoints for contract resources plus secondary lookups
//! by consultant and by unit.

// Contract resource routes and handlers
mod contracts;

// Re-export ApiServer for convenience
pub use contracts::ApiServer;
// Re-export ErrorMessage for testing
#[allow(unused_imports)]
pub use contracts::ErrorMessage;
