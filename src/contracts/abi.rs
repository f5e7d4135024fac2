/// Contract event ABIs
///
/// This module declares the GridMesh contract events using alloy's sol!
/// macro. The ABIs are kept in Rust code (not moved to config files) because
/// the sol! macro provides compile-time type safety for event decoding.
use alloy::sol;
use alloy::sol_types::SolEvent;

sol! {
    /// Emitted by the NodeRegistry contract when an energy node joins the grid
    event NodeRegistered(address indexed nodeAddress, address indexed owner, string name, uint256 capacity);

    /// Emitted by the EnergyMarket contract for each settled trade
    event EnergyPurchased(address indexed buyer, address indexed seller, uint256 energyAmount, uint256 price);

    /// Emitted by the EnergyAssetNft contract when a production asset is minted
    event EnergyAssetMinted(uint256 indexed tokenId, address indexed owner, string assetType, uint256 capacity);

    /// Emitted by the Governance contract when a proposal opens for voting
    event ProposalCreated(uint256 indexed proposalId, address indexed proposer, string description, uint256 votingDeadline);

    /// Standard ERC-20 transfer event of the GRID token
    event Transfer(address indexed from, address indexed to, uint256 value);
}

/// Full Solidity signature for a GridMesh event name, used to build log
/// filters (topic0)
pub fn signature_for(event_name: &str) -> Option<&'static str> {
    match event_name {
        "NodeRegistered" => Some(NodeRegistered::SIGNATURE),
        "EnergyPurchased" => Some(EnergyPurchased::SIGNATURE),
        "EnergyAssetMinted" => Some(EnergyAssetMinted::SIGNATURE),
        "ProposalCreated" => Some(ProposalCreated::SIGNATURE),
        "Transfer" => Some(Transfer::SIGNATURE),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_lookup() {
        assert_eq!(
            signature_for("Transfer"),
            Some("Transfer(address,address,uint256)")
        );
        assert_eq!(
            signature_for("NodeRegistered"),
            Some("NodeRegistered(address,address,string,uint256)")
        );
        assert!(signature_for("NotAnEvent").is_none());
    }
}
