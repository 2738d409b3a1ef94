//! Contract resource API
//!
//! This module contains the route definitions and handlers translating HTTP
//! requests into [`ContractStore`] calls. Success bodies are the plain
//! entity or entity array; there is no response envelope.
//!
//! ## Status code quirk
//!
//! PUT and DELETE on a nonexistent id answer 400 (Bad Request) rather than
//! the conventional 404. This mirrors the wire behavior of the service this
//! one replaces and is kept deliberately for client compatibility.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info};
use warp::hyper::body::Bytes;
use warp::{
    http::{Method, StatusCode},
    Filter, Rejection, Reply,
};

use crate::config::Config;
use crate::model::Contract;
use crate::storage::ContractStore;

// ============================================================================
// SHARED RESPONSE STRUCTURES
// ============================================================================

/// Error body produced by the rejection handler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    /// Human-readable description of what went wrong
    pub error: String,
}

/// Body of the health endpoint.
#[derive(Debug, Serialize)]
struct HealthStatus {
    status: &'static str,
}

// ============================================================================
// CONTRACT API HANDLERS
// ============================================================================

/// Handler for GET /contracts.
///
/// Returns every stored contract as a JSON array; order is unspecified.
pub async fn list_contracts_handler(
    store: ContractStore,
) -> Result<impl warp::Reply, warp::Rejection> {
    let contracts = store.find_all().await;
    info!(
        "/contracts getAll method called, response size: {}",
        store.count().await
    );
    Ok(warp::reply::json(&contracts))
}

/// Handler for GET /contracts/{id}.
///
/// # Returns
///
/// * 200 with the entity when the id exists
/// * 404 with an empty body when it does not
pub async fn get_contract_handler(
    id: String,
    store: ContractStore,
) -> Result<Box<dyn Reply>, warp::Rejection> {
    info!("/contracts getById method called");
    match store.find_by_id(&id).await {
        Some(contract) => Ok(Box::new(warp::reply::json(&contract))),
        None => Ok(Box::new(warp::reply::with_status(
            warp::reply::reply(),
            StatusCode::NOT_FOUND,
        ))),
    }
}

/// Handler for GET /contractsbycid/{consultantId}.
///
/// Returns all contracts held by the given consultant; the array is empty
/// when none match, never an error.
pub async fn get_contracts_by_consultant_handler(
    consultant_id: String,
    store: ContractStore,
) -> Result<impl warp::Reply, warp::Rejection> {
    info!("/contractsbycid getByConsultantId method called");
    let contracts = store.find_by_consultant_id(&consultant_id).await;
    Ok(warp::reply::json(&contracts))
}

/// Handler for GET /contractsbyuid/{unitId}.
///
/// Symmetric to the consultant lookup, on the unit side.
pub async fn get_contracts_by_unit_handler(
    unit_id: String,
    store: ContractStore,
) -> Result<impl warp::Reply, warp::Rejection> {
    info!("/contractsbyuid getByUnitId method called");
    let contracts = store.find_by_unit_id(&unit_id).await;
    Ok(warp::reply::json(&contracts))
}

/// Handler for POST /contracts.
///
/// Saves the contract from the request body and returns the stored copy
/// with its assigned id. Body parse failures are rejected before this
/// handler runs.
pub async fn create_contract_handler(
    contract: Contract,
    store: ContractStore,
) -> Result<impl warp::Reply, warp::Rejection> {
    info!("/contracts create method called");
    let created = store.save(contract).await;
    Ok(warp::reply::json(&created))
}

/// Handler for PUT /contracts/{id}.
///
/// Loads the existing entity and overwrites all non-id fields from the
/// request body, then persists and returns the updated entity. When the id
/// is unknown the store is left untouched and the response is 400 with an
/// empty body (see module docs on the status code quirk).
pub async fn update_contract_handler(
    id: String,
    update: Contract,
    store: ContractStore,
) -> Result<Box<dyn Reply>, warp::Rejection> {
    info!("/contracts update method called");
    match store.find_by_id(&id).await {
        Some(mut existing) => {
            existing.apply_update(update);
            let updated = store.save(existing).await;
            Ok(Box::new(warp::reply::json(&updated)))
        }
        None => Ok(Box::new(warp::reply::with_status(
            warp::reply::reply(),
            StatusCode::BAD_REQUEST,
        ))),
    }
}

/// Handler for DELETE /contracts/{id}.
///
/// # Returns
///
/// * 204 with an empty body when the entity existed and was removed
/// * 400 with an empty body when the id is unknown (status code quirk)
pub async fn delete_contract_handler(
    id: String,
    store: ContractStore,
) -> Result<Box<dyn Reply>, warp::Rejection> {
    info!("/contracts delete method called");
    match store.find_by_id(&id).await {
        Some(contract) => {
            store
                .delete(&contract)
                .await
                .map_err(|e| warp::reject::custom(StoreFault(e.to_string())))?;
            Ok(Box::new(warp::reply::with_status(
                warp::reply::reply(),
                StatusCode::NO_CONTENT,
            )))
        }
        None => Ok(Box::new(warp::reply::with_status(
            warp::reply::reply(),
            StatusCode::BAD_REQUEST,
        ))),
    }
}

// ============================================================================
// WARP FILTER HELPERS
// ============================================================================

/// Creates a warp filter that injects the contract store into handlers.
pub fn with_store(
    store: ContractStore,
) -> impl Filter<Extract = (ContractStore,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || store.clone())
}

// ============================================================================
// CUSTOM REJECTION TYPES
// ============================================================================

/// Custom rejection for JSON deserialization errors
#[derive(Debug)]
pub struct JsonDeserializeError(pub String);

impl warp::reject::Reject for JsonDeserializeError {}

/// Custom rejection for store-level faults
#[derive(Debug)]
pub struct StoreFault(pub String);

impl warp::reject::Reject for StoreFault {}

// ============================================================================
// CORS CONFIGURATION
// ============================================================================

/// Creates a CORS filter based on the configured allowed origins.
fn create_cors_filter(allowed_origins: &[String]) -> warp::cors::Builder {
    let methods = vec![
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ];

    if allowed_origins.contains(&"*".to_string()) {
        warp::cors()
            .allow_any_origin()
            .allow_methods(methods.clone())
            .allow_headers(vec!["content-type"])
    } else {
        let origins: Vec<&str> = allowed_origins.iter().map(|s| s.as_str()).collect();
        warp::cors()
            .allow_origins(origins)
            .allow_methods(methods)
            .allow_headers(vec!["content-type"])
    }
}

// ============================================================================
// REJECTION HANDLER
// ============================================================================

/// Global rejection handler for all API routes.
///
/// Converts warp rejections into JSON error bodies with the appropriate
/// HTTP status codes. Store faults and anything unrecognized surface as
/// internal server errors.
pub async fn handle_rejection(rej: Rejection) -> Result<impl Reply, std::convert::Infallible> {
    let (status, message) = if let Some(err) = rej.find::<JsonDeserializeError>() {
        (StatusCode::BAD_REQUEST, err.0.clone())
    } else if let Some(err) = rej.find::<warp::filters::body::BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, format!("Invalid JSON: {}", err))
    } else if rej.is_not_found() {
        (StatusCode::NOT_FOUND, "Endpoint not found".to_string())
    } else if rej.find::<warp::reject::MethodNotAllowed>().is_some() {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            "Method not allowed".to_string(),
        )
    } else if let Some(err) = rej.find::<StoreFault>() {
        error!("Store fault: {}", err.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error".to_string(),
        )
    } else {
        error!("Unhandled rejection: {:?}", rej);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error".to_string(),
        )
    };

    Ok(warp::reply::with_status(
        warp::reply::json(&ErrorMessage { error: message }),
        status,
    ))
}

// ============================================================================
// API SERVER IMPLEMENTATION
// ============================================================================

/// REST API server for the contract service.
///
/// The server owns no state of its own beyond the configuration and the
/// store handle wired in at construction time; there is no global store
/// singleton.
pub struct ApiServer {
    /// Service configuration
    config: Arc<Config>,
    /// Contract store backing all resource routes
    store: ContractStore,
}

impl ApiServer {
    /// Creates a new API server over the given store.
    ///
    /// # Arguments
    ///
    /// * `config` - Service configuration
    /// * `store` - Contract store instance (explicit dependency injection)
    pub fn new(config: Config, store: ContractStore) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }

    /// Starts the API server and begins handling HTTP requests.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Server ran until shutdown
    /// * `Err(anyhow::Error)` - Failed to start server
    pub async fn run(&self) -> Result<()> {
        info!(
            "Starting API server on {}:{}",
            self.config.api.host, self.config.api.port
        );

        let routes = self.create_routes();

        let addr: std::net::SocketAddr =
            format!("{}:{}", self.config.api.host, self.config.api.port)
                .parse()
                .context("Failed to parse API server address")?;

        warp::serve(routes).run(addr).await;

        Ok(())
    }

    /// Creates all API routes for the server.
    ///
    /// Defines the seven contract resource endpoints plus the health check,
    /// applies CORS, and normalizes rejections.
    pub(crate) fn create_routes(
        &self,
    ) -> impl Filter<Extract = impl warp::Reply, Error = std::convert::Infallible> + Clone {
        let store = self.store.clone();

        // Health check endpoint - returns service status
        let health = warp::path("health")
            .and(warp::path::end())
            .and(warp::get())
            .map(|| warp::reply::json(&HealthStatus { status: "UP" }));

        // GET /contracts - list all contracts
        let list_contracts = warp::path("contracts")
            .and(warp::path::end()) // Exact match - don't match /contracts/:id
            .and(warp::get())
            .and(with_store(store.clone()))
            .and_then(list_contracts_handler);

        // GET /contracts/:id - lookup by id
        let get_contract = warp::path("contracts")
            .and(warp::path::param())
            .and(warp::path::end())
            .and(warp::get())
            .and(with_store(store.clone()))
            .and_then(get_contract_handler);

        // GET /contractsbycid/:consultantId - secondary lookup by consultant
        let contracts_by_consultant = warp::path("contractsbycid")
            .and(warp::path::param())
            .and(warp::path::end())
            .and(warp::get())
            .and(with_store(store.clone()))
            .and_then(get_contracts_by_consultant_handler);

        // GET /contractsbyuid/:unitId - secondary lookup by unit
        let contracts_by_unit = warp::path("contractsbyuid")
            .and(warp::path::param())
            .and(warp::path::end())
            .and(warp::get())
            .and(with_store(store.clone()))
            .and_then(get_contracts_by_unit_handler);

        // POST /contracts - create from request body
        let create_store = store.clone();
        let create_contract = warp::path("contracts")
            .and(warp::path::end())
            .and(warp::post())
            .and(warp::body::bytes())
            .and_then(move |body: Bytes| {
                let store = create_store.clone();
                async move {
                    // Log raw request body for debugging
                    let body_str = String::from_utf8_lossy(&body);
                    debug!("POST /contracts - Received body: {}", body_str);

                    // Deserialize and handle
                    match serde_json::from_slice::<Contract>(&body) {
                        Ok(contract) => create_contract_handler(contract, store).await,
                        Err(e) => {
                            error!("Contract deserialization failed: {}. Body: {}", e, body_str);
                            Err(warp::reject::custom(JsonDeserializeError(format!(
                                "Invalid JSON: {}",
                                e
                            ))))
                        }
                    }
                }
            });

        // PUT /contracts/:id - full field replacement
        let update_store = store.clone();
        let update_contract = warp::path("contracts")
            .and(warp::path::param())
            .and(warp::path::end())
            .and(warp::put())
            .and(warp::body::bytes())
            .and_then(move |id: String, body: Bytes| {
                let store = update_store.clone();
                async move {
                    // Log raw request body for debugging
                    let body_str = String::from_utf8_lossy(&body);
                    debug!("PUT /contracts/{} - Received body: {}", id, body_str);

                    // Deserialize and handle
                    match serde_json::from_slice::<Contract>(&body) {
                        Ok(update) => update_contract_handler(id, update, store).await,
                        Err(e) => {
                            error!("Contract deserialization failed: {}. Body: {}", e, body_str);
                            Err(warp::reject::custom(JsonDeserializeError(format!(
                                "Invalid JSON: {}",
                                e
                            ))))
                        }
                    }
                }
            });

        // DELETE /contracts/:id - remove by id
        let delete_contract = warp::path("contracts")
            .and(warp::path::param())
            .and(warp::path::end())
            .and(warp::delete())
            .and(with_store(store))
            .and_then(delete_contract_handler);

        // Combine all routes and apply rejection handler
        health
            .or(list_contracts)
            .or(get_contract)
            .or(contracts_by_consultant)
            .or(contracts_by_unit)
            .or(create_contract)
            .or(update_contract)
            .or(delete_contract)
            .with(create_cors_filter(&self.config.api.cors_origins))
            .recover(handle_rejection)
    }

    /// Public method for testing - exposes routes for integration tests
    #[allow(dead_code)] // Used by tests
    pub fn test_routes(
        &self,
    ) -> impl Filter<Extract = impl warp::Reply, Error = std::convert::Infallible> + Clone {
        self.create_routes()
    }
}
