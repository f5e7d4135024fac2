//! Event decoder tests
//!
//! Tests cover:
//! - Full decoding of every tracked event kind
//! - Exact decimal string rendering of large integers
//! - Missing-argument errors naming the field and the kind

use alloy::primitives::U256;
use gridmesh_events::decode::{
    decode_asset_minted, decode_energy_purchased, decode_event, decode_events,
    decode_node_registered, decode_proposal_created, decode_token_transferred,
};
use gridmesh_events::events::{EventData, EventKind};
use gridmesh_events::{ArgValue, ChainAddress, GridError, RawEvent};

const ALICE: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
const BOB: &str = "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";

fn addr(s: &str) -> ArgValue {
    ArgValue::Address(ChainAddress::new(s).unwrap())
}

fn purchase_event() -> RawEvent {
    RawEvent::new(1200, "0xfeed")
        .with_arg("buyer", addr(ALICE))
        .with_arg("seller", addr(BOB))
        .with_arg("energyAmount", ArgValue::Uint(U256::from(2500u64)))
        .with_arg("price", ArgValue::Uint(U256::from(180_000_000_000_000_000u64)))
}

#[test]
fn test_decode_energy_purchased_populates_every_field() {
    let event = decode_energy_purchased(&purchase_event()).unwrap();

    assert_eq!(event.kind, EventKind::EnergyPurchased);
    assert_eq!(event.block_number, 1200);
    assert_eq!(event.transaction_hash, "0xfeed");
    match event.data {
        EventData::EnergyPurchased {
            buyer,
            seller,
            energy_amount,
            price,
        } => {
            assert_eq!(buyer, ALICE);
            assert_eq!(seller, BOB);
            assert_eq!(energy_amount, "2500");
            assert_eq!(price, "180000000000000000");
        }
        other => panic!("wrong variant: {other:?}"),
    }
}

#[test]
fn test_decode_preserves_huge_integers_exactly() {
    // 2^200: far beyond what any float or u64 could carry
    let huge = U256::from(2u8).pow(U256::from(200u64));
    let raw = RawEvent::new(1, "0x01")
        .with_arg("from", addr(ALICE))
        .with_arg("to", addr(BOB))
        .with_arg("value", ArgValue::Uint(huge));

    let event = decode_token_transferred(&raw).unwrap();
    match event.data {
        EventData::TokenTransferred { value, .. } => assert_eq!(
            value,
            "1606938044258990275541962092341162602522202993782792835301376"
        ),
        other => panic!("wrong variant: {other:?}"),
    }
}

#[test]
fn test_decode_node_registered() {
    let raw = RawEvent::new(77, "0xbeef")
        .with_arg("nodeAddress", addr(ALICE))
        .with_arg("owner", addr(BOB))
        .with_arg("name", ArgValue::Str("Wind Farm North".to_string()))
        .with_arg("capacity", ArgValue::Uint(U256::from(120_000u64)));

    let event = decode_node_registered(&raw).unwrap();
    match event.data {
        EventData::NodeRegistered {
            node_address,
            owner,
            name,
            capacity,
        } => {
            assert_eq!(node_address, ALICE);
            assert_eq!(owner, BOB);
            assert_eq!(name, "Wind Farm North");
            assert_eq!(capacity, "120000");
        }
        other => panic!("wrong variant: {other:?}"),
    }
}

#[test]
fn test_decode_asset_minted() {
    let raw = RawEvent::new(88, "0xcafe")
        .with_arg("tokenId", ArgValue::Uint(U256::from(17u64)))
        .with_arg("owner", addr(ALICE))
        .with_arg("assetType", ArgValue::Str("solar".to_string()))
        .with_arg("capacity", ArgValue::Uint(U256::from(9000u64)));

    let event = decode_asset_minted(&raw).unwrap();
    match event.data {
        EventData::AssetMinted {
            token_id,
            owner,
            asset_type,
            capacity,
        } => {
            assert_eq!(token_id, "17");
            assert_eq!(owner, ALICE);
            assert_eq!(asset_type, "solar");
            assert_eq!(capacity, "9000");
        }
        other => panic!("wrong variant: {other:?}"),
    }
}

#[test]
fn test_decode_proposal_created() {
    let raw = RawEvent::new(99, "0xdead")
        .with_arg("proposalId", ArgValue::Uint(U256::from(3u64)))
        .with_arg("proposer", addr(BOB))
        .with_arg(
            "description",
            ArgValue::Str("Raise feed-in tariff".to_string()),
        )
        .with_arg("votingDeadline", ArgValue::Uint(U256::from(1_760_000_000u64)));

    let event = decode_proposal_created(&raw).unwrap();
    match event.data {
        EventData::ProposalCreated {
            proposal_id,
            proposer,
            description,
            voting_deadline,
        } => {
            assert_eq!(proposal_id, "3");
            assert_eq!(proposer, BOB);
            assert_eq!(description, "Raise feed-in tariff");
            assert_eq!(voting_deadline, "1760000000");
        }
        other => panic!("wrong variant: {other:?}"),
    }
}

#[test]
fn test_decode_missing_argument_names_field_and_kind() {
    let mut raw = purchase_event();
    raw.args.remove("seller");

    let err = decode_energy_purchased(&raw).unwrap_err();
    match &err {
        GridError::Decode { kind, field } => {
            assert_eq!(kind, "EnergyPurchased");
            assert_eq!(field, "seller");
        }
        other => panic!("wrong error: {other:?}"),
    }
    assert!(err.to_string().contains("EnergyPurchased"));
    assert!(err.to_string().contains("'seller'"));
}

#[test]
fn test_decode_mistyped_argument_is_an_error() {
    let mut raw = purchase_event();
    raw.args
        .insert("price".to_string(), ArgValue::Str("cheap".to_string()));

    let err = decode_energy_purchased(&raw).unwrap_err();
    assert!(matches!(err, GridError::Decode { .. }));
    assert!(err.to_string().contains("'price'"));
}

#[test]
fn test_decode_event_dispatches_by_kind() {
    let event = decode_event(EventKind::EnergyPurchased, &purchase_event()).unwrap();
    assert_eq!(event.kind, EventKind::EnergyPurchased);
}

#[test]
fn test_decode_events_fails_on_first_malformed_record() {
    let good = purchase_event();
    let mut bad = purchase_event();
    bad.args.remove("buyer");

    let result = decode_events(EventKind::EnergyPurchased, &[good.clone(), bad]);
    assert!(result.is_err());

    let decoded = decode_events(EventKind::EnergyPurchased, &[good]).unwrap();
    assert_eq!(decoded.len(), 1);
}
