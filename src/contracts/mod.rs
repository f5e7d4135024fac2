/// Contract abstraction module
///
/// This module names the deployed GridMesh contracts and maps each tracked
/// event kind to the contract that emits it.
///
/// # Architecture
///
/// - `ContractHandle`: opaque reference to one deployed contract
/// - `ContractCatalog`: per-event-kind lookup built from configuration
/// - `abi`: contract event ABIs using the sol! macro
/// - `parser`: log-to-raw-event conversion
pub mod abi;
pub mod parser;

use crate::config::AppConfig;
use crate::error::{GridError, Result};
use crate::events::EventKind;
use crate::types::ChainAddress;
use std::collections::HashMap;

/// Reference to a deployed contract exposing named events
///
/// Handles are cheap to clone; the subscription registry and history service
/// keep clones rather than owning the catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractHandle {
    name: String,
    address: ChainAddress,
}

impl ContractHandle {
    pub fn new(name: impl Into<String>, address: ChainAddress) -> Self {
        Self {
            name: name.into(),
            address,
        }
    }

    /// Human-readable contract name (e.g. "EnergyMarket")
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Contract address on chain
    pub fn address(&self) -> &ChainAddress {
        &self.address
    }
}

/// Catalog of the deployed GridMesh contracts, keyed by the event kind each
/// one emits
///
/// # Example
///
/// ```ignore
/// let catalog = ContractCatalog::from_config(&config)?;
/// let market = catalog.handle_for(EventKind::EnergyPurchased)?;
/// ```
#[derive(Debug, Clone)]
pub struct ContractCatalog {
    handles: HashMap<EventKind, ContractHandle>,
}

impl ContractCatalog {
    /// Build the catalog from configuration
    ///
    /// Every tracked event kind must have a configured contract; a missing or
    /// unknown `contract_type` is a configuration error.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let mut handles = HashMap::new();

        for contract in &config.contracts {
            let kind = match contract.contract_type.as_str() {
                "NodeRegistry" => EventKind::NodeRegistered,
                "EnergyMarket" => EventKind::EnergyPurchased,
                "EnergyAssetNft" => EventKind::AssetMinted,
                "Governance" => EventKind::ProposalCreated,
                "GridToken" => EventKind::TokenTransferred,
                other => {
                    return Err(GridError::Config(format!(
                        "Unknown contract type '{}' for contract '{}'. Valid types: \
                         NodeRegistry, EnergyMarket, EnergyAssetNft, Governance, GridToken",
                        other, contract.name
                    )));
                }
            };

            let address = ChainAddress::new(&contract.address)?;
            handles.insert(kind, ContractHandle::new(contract.name.clone(), address));
        }

        for kind in EventKind::all() {
            if !handles.contains_key(&kind) {
                return Err(GridError::Config(format!(
                    "No contract configured for {kind} events"
                )));
            }
        }

        Ok(Self { handles })
    }

    /// Handle of the contract emitting `kind` events
    pub fn handle_for(&self, kind: EventKind) -> &ContractHandle {
        // from_config guarantees every kind is present
        &self.handles[&kind]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn test_catalog_from_default_config() {
        let config = AppConfig::default();
        let catalog = ContractCatalog::from_config(&config).unwrap();

        let market = catalog.handle_for(EventKind::EnergyPurchased);
        assert_eq!(market.name(), "EnergyMarket");

        let token = catalog.handle_for(EventKind::TokenTransferred);
        assert_eq!(token.name(), "GridToken");
    }

    #[test]
    fn test_catalog_unknown_contract_type() {
        let mut config = AppConfig::default();
        config.contracts[0].contract_type = "UnknownContract".to_string();

        let result = ContractCatalog::from_config(&config);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Unknown contract type"));
    }

    #[test]
    fn test_catalog_missing_concern() {
        let mut config = AppConfig::default();
        config.contracts.retain(|c| c.contract_type != "Governance");

        let result = ContractCatalog::from_config(&config);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("No contract configured"));
    }
}
