/// Log-to-raw-event conversion
///
/// Turns an RPC log into the untyped [`RawEvent`] record the rest of the
/// event layer speaks, one decode path per GridMesh event. Logs that do not
/// decode as the requested event are skipped rather than failed: a contract
/// may emit event types this crate does not track.
use crate::chain::{ArgValue, RawEvent};
use crate::contracts::abi;
use crate::error::{GridError, Result};
use crate::types::ChainAddress;
use alloy::primitives::Address;
use alloy::rpc::types::Log;
use alloy::sol_types::SolEvent;

fn address_arg(address: Address) -> Result<ArgValue> {
    Ok(ArgValue::Address(ChainAddress::new(format!("{address:?}"))?))
}

/// Convert a log into a raw event record for `event_name`
///
/// # Returns
///
/// - `Ok(Some(raw))` if the log decodes as `event_name`
/// - `Ok(None)` if the log is some other event
/// - `Err(...)` if the log is missing provenance fields or `event_name` is
///   not a GridMesh event
pub fn raw_from_log(event_name: &str, log: &Log) -> Result<Option<RawEvent>> {
    let block_number = log
        .block_number
        .ok_or_else(|| GridError::Parse("Missing block number".to_string()))?;

    let transaction_hash = log
        .transaction_hash
        .ok_or_else(|| GridError::Parse("Missing transaction hash".to_string()))?;

    let raw = RawEvent::new(block_number, format!("{transaction_hash:?}"));

    match event_name {
        "NodeRegistered" => {
            let Ok(event) = abi::NodeRegistered::decode_log(&log.inner, true) else {
                return Ok(None);
            };
            Ok(Some(
                raw.with_arg("nodeAddress", address_arg(event.nodeAddress)?)
                    .with_arg("owner", address_arg(event.owner)?)
                    .with_arg("name", ArgValue::Str(event.name.clone()))
                    .with_arg("capacity", ArgValue::Uint(event.capacity)),
            ))
        }
        "EnergyPurchased" => {
            let Ok(event) = abi::EnergyPurchased::decode_log(&log.inner, true) else {
                return Ok(None);
            };
            Ok(Some(
                raw.with_arg("buyer", address_arg(event.buyer)?)
                    .with_arg("seller", address_arg(event.seller)?)
                    .with_arg("energyAmount", ArgValue::Uint(event.energyAmount))
                    .with_arg("price", ArgValue::Uint(event.price)),
            ))
        }
        "EnergyAssetMinted" => {
            let Ok(event) = abi::EnergyAssetMinted::decode_log(&log.inner, true) else {
                return Ok(None);
            };
            Ok(Some(
                raw.with_arg("tokenId", ArgValue::Uint(event.tokenId))
                    .with_arg("owner", address_arg(event.owner)?)
                    .with_arg("assetType", ArgValue::Str(event.assetType.clone()))
                    .with_arg("capacity", ArgValue::Uint(event.capacity)),
            ))
        }
        "ProposalCreated" => {
            let Ok(event) = abi::ProposalCreated::decode_log(&log.inner, true) else {
                return Ok(None);
            };
            Ok(Some(
                raw.with_arg("proposalId", ArgValue::Uint(event.proposalId))
                    .with_arg("proposer", address_arg(event.proposer)?)
                    .with_arg("description", ArgValue::Str(event.description.clone()))
                    .with_arg("votingDeadline", ArgValue::Uint(event.votingDeadline)),
            ))
        }
        "Transfer" => {
            let Ok(event) = abi::Transfer::decode_log(&log.inner, true) else {
                return Ok(None);
            };
            Ok(Some(
                raw.with_arg("from", address_arg(event.from)?)
                    .with_arg("to", address_arg(event.to)?)
                    .with_arg("value", ArgValue::Uint(event.value)),
            ))
        }
        other => Err(GridError::Parse(format!(
            "Unknown GridMesh event '{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_event_name_is_an_error() {
        let log = Log {
            block_number: Some(5),
            transaction_hash: Some(alloy::primitives::TxHash::ZERO),
            ..Default::default()
        };
        let result = raw_from_log("SomethingElse", &log);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Unknown GridMesh event"));
    }

    #[test]
    fn test_missing_block_number_is_an_error() {
        let log = Log::default();
        let result = raw_from_log("Transfer", &log);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Missing block number"));
    }
}
