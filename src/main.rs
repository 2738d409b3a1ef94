//! Contract Service
//!
//! A single-resource CRUD microservice managing Contract records behind an
//! HTTP REST interface. Each request is handled independently; the only
//! cross-request state is the contract store wired into the API server at
//! startup.

use anyhow::Result;
use tracing::info;

use contract_service::api::ApiServer;
use contract_service::config::Config;
use contract_service::storage::ContractStore;

// ============================================================================
// MAIN APPLICATION ENTRY POINT
// ============================================================================

/// Main application entry point that initializes and runs the contract service.
///
/// This function:
/// 1. Initializes logging and tracing
/// 2. Loads configuration from TOML file
/// 3. Constructs the contract store
/// 4. Starts the API server
/// 5. Runs the service until shutdown
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured logging for debugging and monitoring
    tracing_subscriber::fmt::init();

    info!("Starting Contract Service");

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();

    // Check for help flag
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        println!("Contract Service");
        println!();
        println!("Usage: contract-service [OPTIONS]");
        println!();
        println!("Options:");
        println!("  --config <path>   Use custom config file path");
        println!("  --help, -h        Show this help message");
        println!();
        println!("Environment variables:");
        println!("  CONTRACT_SERVICE_CONFIG_PATH    Path to config file (overrides --config)");
        return Ok(());
    }

    // Check for custom config path
    let mut config_path = None;
    for (i, arg) in args.iter().enumerate() {
        if arg == "--config" && i + 1 < args.len() {
            config_path = Some(args[i + 1].clone());
            break;
        }
    }

    if let Some(path) = config_path {
        std::env::set_var("CONTRACT_SERVICE_CONFIG_PATH", &path);
        info!("Using custom config: {}", path);
    }

    // Load configuration from config file (or CONTRACT_SERVICE_CONFIG_PATH env var)
    let config = Config::load()?;
    info!("Configuration loaded successfully");

    // Construct the contract store backing all resource routes
    let store = ContractStore::new(&config.store.collection);
    info!("Contract store initialized for collection {}", config.store.collection);

    // Start the REST API server; this blocks until shutdown
    let api_server = ApiServer::new(config, store);
    api_server.run().await?;

    Ok(())
}
