//! Raw-to-domain event decoding
//!
//! One pure function per event kind, mapping an untyped [`RawEvent`] into a
//! typed [`DomainEvent`]. Numeric arguments become exact decimal strings
//! (U256 display), never floats. A missing or mistyped argument is a decode
//! error naming the field and the event kind; decoders never substitute
//! defaults for absent on-chain arguments.

use crate::chain::{ArgValue, RawEvent};
use crate::error::{GridError, Result};
use crate::events::{DomainEvent, EventData, EventKind};

fn require<'a>(raw: &'a RawEvent, kind: EventKind, field: &str) -> Result<&'a ArgValue> {
    raw.args.get(field).ok_or_else(|| GridError::Decode {
        kind: kind.to_string(),
        field: field.to_string(),
    })
}

fn address_field(raw: &RawEvent, kind: EventKind, field: &str) -> Result<String> {
    require(raw, kind, field)?
        .as_address()
        .map(|addr| addr.to_string())
        .ok_or_else(|| GridError::Decode {
            kind: kind.to_string(),
            field: field.to_string(),
        })
}

fn uint_field(raw: &RawEvent, kind: EventKind, field: &str) -> Result<String> {
    require(raw, kind, field)?
        .as_uint()
        .map(|value| value.to_string())
        .ok_or_else(|| GridError::Decode {
            kind: kind.to_string(),
            field: field.to_string(),
        })
}

fn string_field(raw: &RawEvent, kind: EventKind, field: &str) -> Result<String> {
    require(raw, kind, field)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| GridError::Decode {
            kind: kind.to_string(),
            field: field.to_string(),
        })
}

pub fn decode_node_registered(raw: &RawEvent) -> Result<DomainEvent> {
    let kind = EventKind::NodeRegistered;
    Ok(DomainEvent {
        kind,
        block_number: raw.block_number,
        transaction_hash: raw.transaction_hash.clone(),
        data: EventData::NodeRegistered {
            node_address: address_field(raw, kind, "nodeAddress")?,
            owner: address_field(raw, kind, "owner")?,
            name: string_field(raw, kind, "name")?,
            capacity: uint_field(raw, kind, "capacity")?,
        },
    })
}

pub fn decode_energy_purchased(raw: &RawEvent) -> Result<DomainEvent> {
    let kind = EventKind::EnergyPurchased;
    Ok(DomainEvent {
        kind,
        block_number: raw.block_number,
        transaction_hash: raw.transaction_hash.clone(),
        data: EventData::EnergyPurchased {
            buyer: address_field(raw, kind, "buyer")?,
            seller: address_field(raw, kind, "seller")?,
            energy_amount: uint_field(raw, kind, "energyAmount")?,
            price: uint_field(raw, kind, "price")?,
        },
    })
}

pub fn decode_asset_minted(raw: &RawEvent) -> Result<DomainEvent> {
    let kind = EventKind::AssetMinted;
    Ok(DomainEvent {
        kind,
        block_number: raw.block_number,
        transaction_hash: raw.transaction_hash.clone(),
        data: EventData::AssetMinted {
            token_id: uint_field(raw, kind, "tokenId")?,
            owner: address_field(raw, kind, "owner")?,
            asset_type: string_field(raw, kind, "assetType")?,
            capacity: uint_field(raw, kind, "capacity")?,
        },
    })
}

pub fn decode_proposal_created(raw: &RawEvent) -> Result<DomainEvent> {
    let kind = EventKind::ProposalCreated;
    Ok(DomainEvent {
        kind,
        block_number: raw.block_number,
        transaction_hash: raw.transaction_hash.clone(),
        data: EventData::ProposalCreated {
            proposal_id: uint_field(raw, kind, "proposalId")?,
            proposer: address_field(raw, kind, "proposer")?,
            description: string_field(raw, kind, "description")?,
            voting_deadline: uint_field(raw, kind, "votingDeadline")?,
        },
    })
}

pub fn decode_token_transferred(raw: &RawEvent) -> Result<DomainEvent> {
    let kind = EventKind::TokenTransferred;
    Ok(DomainEvent {
        kind,
        block_number: raw.block_number,
        transaction_hash: raw.transaction_hash.clone(),
        data: EventData::TokenTransferred {
            from: address_field(raw, kind, "from")?,
            to: address_field(raw, kind, "to")?,
            value: uint_field(raw, kind, "value")?,
        },
    })
}

/// Decode a raw event as `kind`
pub fn decode_event(kind: EventKind, raw: &RawEvent) -> Result<DomainEvent> {
    match kind {
        EventKind::NodeRegistered => decode_node_registered(raw),
        EventKind::EnergyPurchased => decode_energy_purchased(raw),
        EventKind::AssetMinted => decode_asset_minted(raw),
        EventKind::ProposalCreated => decode_proposal_created(raw),
        EventKind::TokenTransferred => decode_token_transferred(raw),
    }
}

/// Decode a batch of raw events as `kind`
///
/// Fails on the first malformed event; the offending record is surfaced in
/// the error rather than silently dropped.
pub fn decode_events(kind: EventKind, raws: &[RawEvent]) -> Result<Vec<DomainEvent>> {
    raws.iter().map(|raw| decode_event(kind, raw)).collect()
}
