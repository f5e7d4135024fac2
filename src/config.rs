/// Configuration module for gridmesh-events
///
/// This module provides a comprehensive configuration system that supports:
/// - Multiple formats (YAML, TOML, JSON)
/// - Layered configuration (defaults → file → env vars → CLI args)
/// - Type-safe configuration with validation
/// - Environment-agnostic deployment
///
/// # Configuration Priority
///
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (GRIDMESH_ prefix)
/// 3. Configuration file
/// 4. Built-in defaults (lowest priority)
///
/// # Example
///
/// ```ignore
/// // Load from default locations
/// let config = AppConfig::load()?;
///
/// // Load from specific file
/// let config = AppConfig::load_from_file("config.yaml")?;
/// ```
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// RPC configuration
    pub rpc: RpcConfig,

    /// Blockchain configuration
    pub blockchain: BlockchainConfig,

    /// Contract configurations
    pub contracts: Vec<ContractConfig>,

    /// Retry configuration (used by the CLI command layer)
    pub retry: RetryConfig,
}

/// RPC configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcConfig {
    /// RPC endpoint URL
    pub url: String,
}

/// Blockchain configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockchainConfig {
    /// Seconds between polls of a live subscription
    ///
    /// Default: 5 (roughly one GridMesh block)
    pub poll_interval_seconds: u64,

    /// Default lookback window for history queries, in blocks
    ///
    /// Default: 1000
    pub lookback_blocks: u64,
}

/// Contract configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractConfig {
    /// Human-readable contract name
    pub name: String,

    /// Contract type identifier (must match implementation)
    ///
    /// Valid values: "NodeRegistry", "EnergyMarket", "EnergyAssetNft",
    /// "Governance", "GridToken"
    pub contract_type: String,

    /// Contract address on blockchain (hex string with 0x prefix)
    pub address: String,
}

// Re-export RetryConfig from retry module to avoid duplication
pub use crate::retry::RetryConfig;

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rpc: RpcConfig {
                url: "https://rpc.gridmesh.energy".to_string(),
            },
            blockchain: BlockchainConfig {
                poll_interval_seconds: 5,
                lookback_blocks: 1000,
            },
            contracts: vec![
                ContractConfig {
                    name: "NodeRegistry".to_string(),
                    contract_type: "NodeRegistry".to_string(),
                    address: "0x7a3d05c70581bD345fe117c06e45f9669205384f".to_string(),
                },
                ContractConfig {
                    name: "EnergyMarket".to_string(),
                    contract_type: "EnergyMarket".to_string(),
                    address: "0x9fE46736679d2D9a65F0992F2272dE9f3c7fa6e0".to_string(),
                },
                ContractConfig {
                    name: "EnergyAssetNft".to_string(),
                    contract_type: "EnergyAssetNft".to_string(),
                    address: "0xCf7Ed3AccA5a467e9e704C703E8D87F634fB0Fc9".to_string(),
                },
                ContractConfig {
                    name: "Governance".to_string(),
                    contract_type: "Governance".to_string(),
                    address: "0xDc64a140Aa3E981100a9becA4E685f962f0cF6C9".to_string(),
                },
                ContractConfig {
                    name: "GridToken".to_string(),
                    contract_type: "GridToken".to_string(),
                    address: "0x5FbDB2315678afecb367f032d93F642f64180aa3".to_string(),
                },
            ],
            retry: RetryConfig {
                max_retries: 5,
                initial_delay_ms: 100,
                backoff_multiplier: 4,
            },
        }
    }
}

impl AppConfig {
    /// Load configuration with default search paths
    ///
    /// Searches for config files in this order:
    /// 1. `./config.{yaml,toml,json}` (current directory)
    /// 2. `~/.config/gridmesh/config.{yaml,toml,json}` (user config)
    ///
    /// If no config file is found, uses built-in defaults.
    /// Environment variables with `GRIDMESH_` prefix can override any setting.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_optional_file(None)
    }

    /// Load configuration from a specific file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file (supports .yaml, .toml, .json)
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::load_from_optional_file(Some(path.as_ref()))
    }

    /// Internal method to load configuration with optional file path
    fn load_from_optional_file(path: Option<&Path>) -> Result<Self, ConfigError> {
        // Start with defaults
        let mut builder = Config::builder().add_source(Config::try_from(&AppConfig::default())?);

        // Add config file if specified or search default locations
        if let Some(config_path) = path {
            // Specific file path provided - must exist
            builder = builder.add_source(File::from(config_path).required(true));
        } else {
            // Search default locations (optional)
            builder = builder
                .add_source(File::with_name("config").required(false))
                .add_source(File::with_name("~/.config/gridmesh/config").required(false));
        }

        // Add environment variable overrides
        // Environment variables use double underscore for nesting:
        // GRIDMESH__RPC__URL=https://... overrides rpc.url
        // GRIDMESH__RETRY__MAX_RETRIES=10 overrides retry.max_retries
        builder = builder.add_source(
            Environment::with_prefix("GRIDMESH")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Validate the configuration
    ///
    /// Checks for:
    /// - Valid URLs
    /// - Hex addresses with 0x prefix
    /// - Positive values for numeric fields
    /// - Known contract types
    ///
    /// # Returns
    ///
    /// Returns `Ok(())` if valid, or an error message describing the problem.
    pub fn validate(&self) -> Result<(), String> {
        // Validate RPC URL format
        if !self.rpc.url.starts_with("http://") && !self.rpc.url.starts_with("https://") {
            return Err(format!(
                "Invalid RPC URL '{}': must start with http:// or https://",
                self.rpc.url
            ));
        }

        // Validate blockchain config
        if self.blockchain.poll_interval_seconds == 0 {
            return Err("Blockchain poll_interval_seconds must be greater than 0".to_string());
        }

        // Validate contracts
        if self.contracts.is_empty() {
            return Err("At least one contract must be configured".to_string());
        }

        for contract in &self.contracts {
            // Validate contract name
            if contract.name.is_empty() {
                return Err("Contract name cannot be empty".to_string());
            }

            // Validate contract type
            let valid_types = [
                "NodeRegistry",
                "EnergyMarket",
                "EnergyAssetNft",
                "Governance",
                "GridToken",
            ];
            if !valid_types.contains(&contract.contract_type.as_str()) {
                return Err(format!(
                    "Unknown contract type '{}' for contract '{}'. Valid types: {}",
                    contract.contract_type,
                    contract.name,
                    valid_types.join(", ")
                ));
            }

            // Validate address format
            if !contract.address.starts_with("0x") {
                return Err(format!(
                    "Contract address '{}' for contract '{}' must start with 0x",
                    contract.address, contract.name
                ));
            }

            if contract.address.len() != 42 {
                return Err(format!(
                    "Contract address '{}' for contract '{}' must be 42 characters (0x + 40 hex digits)",
                    contract.address, contract.name
                ));
            }
        }

        // Validate retry config
        if self.retry.initial_delay_ms == 0 {
            return Err("Retry initial_delay_ms must be greater than 0".to_string());
        }

        if self.retry.backoff_multiplier == 0 {
            return Err("Retry backoff_multiplier must be greater than 0".to_string());
        }

        Ok(())
    }
}
