//! Configuration Management Module
//!
//! This module handles loading and managing configuration for the contract
//! service. Configuration covers the API server (bind address, CORS) and the
//! backing contract collection.

use serde::{Deserialize, Serialize};

// ============================================================================
// CONFIGURATION STRUCTURES
// ============================================================================

/// Main configuration structure containing all service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration (host, port, CORS settings)
    pub api: ApiConfig,
    /// Contract store configuration
    #[serde(default)]
    pub store: StoreConfig,
}

/// API server configuration for external communication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host address to bind the API server to
    pub host: String,
    /// Port number to bind the API server to
    pub port: u16,
    /// Allowed CORS origins for cross-origin requests
    pub cors_origins: Vec<String>,
}

/// Contract store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Name of the contract collection
    #[serde(default = "default_collection")]
    pub collection: String,
}

fn default_collection() -> String {
    "contracts".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            collection: default_collection(),
        }
    }
}

// ============================================================================
// CONFIGURATION LOADING AND MANAGEMENT
// ============================================================================

impl Config {
    /// Validates the configuration.
    ///
    /// This function ensures that:
    /// - The API host is not empty
    /// - The collection name is not empty
    ///
    /// # Returns
    ///
    /// - `Ok(())` - Configuration is valid
    /// - `Err(anyhow::Error)` - A structural problem was detected
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api.host.trim().is_empty() {
            return Err(anyhow::anyhow!(
                "Configuration error: api.host must not be empty"
            ));
        }

        if self.store.collection.trim().is_empty() {
            return Err(anyhow::anyhow!(
                "Configuration error: store.collection must not be empty"
            ));
        }

        Ok(())
    }

    /// Loads configuration from the TOML file.
    ///
    /// This function:
    /// 1. Resolves the config path (CONTRACT_SERVICE_CONFIG_PATH env var, or
    ///    config/contract-service.toml)
    /// 2. Loads and parses the configuration if the file exists
    /// 3. Validates the configuration
    /// 4. Returns an error asking the user to copy the template otherwise
    ///
    /// # Returns
    ///
    /// - `Ok(Config)` - Successfully loaded and validated configuration
    /// - `Err(anyhow::Error)` - File missing, unparseable, or invalid
    pub fn load() -> anyhow::Result<Self> {
        // Check for custom config path via environment variable (for tests)
        let config_path = std::env::var("CONTRACT_SERVICE_CONFIG_PATH")
            .unwrap_or_else(|_| "config/contract-service.toml".to_string());

        if std::path::Path::new(&config_path).exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Err(anyhow::anyhow!(
                "Configuration file '{}' not found. Please copy the template:\n\
                cp config/contract-service.template.toml config/contract-service.toml\n\
                Then edit config/contract-service.toml with your actual values.",
                config_path
            ))
        }
    }
}

impl Default for Config {
    /// Default configuration suitable for local development and testing.
    fn default() -> Self {
        Self {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 8888,
                cors_origins: vec!["http://localhost:8888".to_string()],
            },
            store: StoreConfig::default(),
        }
    }
}
