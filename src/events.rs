use serde::{Deserialize, Serialize};

/// Unified event type that can represent any GridMesh contract event
///
/// Every event carries its provenance (block number and transaction hash)
/// alongside the kind-specific payload. Numeric on-chain values are kept as
/// exact decimal strings so large balances survive serialization boundaries
/// without precision loss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainEvent {
    pub kind: EventKind,
    pub block_number: u64,
    pub transaction_hash: String,
    pub data: EventData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    NodeRegistered,
    EnergyPurchased,
    AssetMinted,
    ProposalCreated,
    TokenTransferred,
}

impl EventKind {
    /// The contract event name this kind is decoded from
    pub fn event_name(&self) -> &'static str {
        match self {
            EventKind::NodeRegistered => "NodeRegistered",
            EventKind::EnergyPurchased => "EnergyPurchased",
            EventKind::AssetMinted => "EnergyAssetMinted",
            EventKind::ProposalCreated => "ProposalCreated",
            EventKind::TokenTransferred => "Transfer",
        }
    }

    pub fn all() -> [EventKind; 5] {
        [
            EventKind::NodeRegistered,
            EventKind::EnergyPurchased,
            EventKind::AssetMinted,
            EventKind::ProposalCreated,
            EventKind::TokenTransferred,
        ]
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventKind::NodeRegistered => write!(f, "NodeRegistered"),
            EventKind::EnergyPurchased => write!(f, "EnergyPurchased"),
            EventKind::AssetMinted => write!(f, "AssetMinted"),
            EventKind::ProposalCreated => write!(f, "ProposalCreated"),
            EventKind::TokenTransferred => write!(f, "TokenTransferred"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EventData {
    NodeRegistered {
        node_address: String,
        owner: String,
        name: String,
        capacity: String,
    },
    EnergyPurchased {
        buyer: String,
        seller: String,
        energy_amount: String,
        price: String,
    },
    AssetMinted {
        token_id: String,
        owner: String,
        asset_type: String,
        capacity: String,
    },
    ProposalCreated {
        proposal_id: String,
        proposer: String,
        description: String,
        voting_deadline: String,
    },
    TokenTransferred {
        from: String,
        to: String,
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_display() {
        assert_eq!(EventKind::NodeRegistered.to_string(), "NodeRegistered");
        assert_eq!(EventKind::EnergyPurchased.to_string(), "EnergyPurchased");
        assert_eq!(EventKind::TokenTransferred.to_string(), "TokenTransferred");
    }

    #[test]
    fn test_event_kind_event_names() {
        assert_eq!(EventKind::AssetMinted.event_name(), "EnergyAssetMinted");
        assert_eq!(EventKind::TokenTransferred.event_name(), "Transfer");
        assert_eq!(EventKind::NodeRegistered.event_name(), "NodeRegistered");
    }

    #[test]
    fn test_event_serialization() {
        let event = DomainEvent {
            kind: EventKind::NodeRegistered,
            block_number: 1000,
            transaction_hash: "0xabcd".to_string(),
            data: EventData::NodeRegistered {
                node_address: "0x1234".to_string(),
                owner: "0x5678".to_string(),
                name: "Rooftop Solar #12".to_string(),
                capacity: "50000000000000000000".to_string(),
            },
        };

        let json = serde_json::to_string(&event).unwrap();
        let deserialized: DomainEvent = serde_json::from_str(&json).unwrap();

        assert_eq!(event, deserialized);
        assert_eq!(deserialized.block_number, 1000);
    }
}
