//! Chain access seam
//!
//! Everything the event layer needs from a blockchain node is expressed
//! through the [`ChainAccess`] trait: attaching and detaching event callbacks
//! and querying historical events over a block range. The production
//! implementation lives in `blockchain.rs`; tests substitute scripted
//! implementations.

use crate::error::Result;
use crate::types::{BlockRange, ChainAddress};
use alloy::primitives::U256;
use async_trait::async_trait;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::contracts::ContractHandle;

/// One argument value carried by a raw chain event
///
/// Raw event payloads are untyped on the wire; this tagged union is as narrow
/// as the decoders need. Numeric values stay as `U256` until a decoder turns
/// them into decimal strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    Address(ChainAddress),
    Uint(U256),
    Bool(bool),
    Str(String),
    Bytes(Vec<u8>),
}

impl ArgValue {
    pub fn as_address(&self) -> Option<&ChainAddress> {
        match self {
            ArgValue::Address(addr) => Some(addr),
            _ => None,
        }
    }

    pub fn as_uint(&self) -> Option<&U256> {
        match self {
            ArgValue::Uint(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ArgValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::Str(value) => Some(value),
            _ => None,
        }
    }
}

/// Raw event record as delivered by the chain-access layer
///
/// Carries the named arguments plus the two provenance fields every decoded
/// event keeps: block number and transaction hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEvent {
    pub args: HashMap<String, ArgValue>,
    pub block_number: u64,
    pub transaction_hash: String,
}

impl RawEvent {
    pub fn new(block_number: u64, transaction_hash: impl Into<String>) -> Self {
        Self {
            args: HashMap::new(),
            block_number,
            transaction_hash: transaction_hash.into(),
        }
    }

    pub fn with_arg(mut self, name: impl Into<String>, value: ArgValue) -> Self {
        self.args.insert(name.into(), value);
        self
    }
}

/// Filter criteria narrowing which emitted events match
///
/// Interpretation belongs to the chain-access layer; [`EventFilter::matches`]
/// is the reference interpretation used by the RPC adapter and available to
/// any other implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventFilter {
    /// Match events where the address appears in any address-valued argument
    Participant(ChainAddress),

    /// Match transfer-style events by their `from` / `to` arguments.
    /// A side left as `None` matches anything.
    FromTo {
        from: Option<ChainAddress>,
        to: Option<ChainAddress>,
    },
}

impl EventFilter {
    pub fn matches(&self, raw: &RawEvent) -> bool {
        match self {
            EventFilter::Participant(address) => raw
                .args
                .values()
                .any(|value| value.as_address() == Some(address)),
            EventFilter::FromTo { from, to } => {
                let side_matches = |side: &Option<ChainAddress>, arg: &str| match side {
                    Some(address) => {
                        raw.args.get(arg).and_then(ArgValue::as_address) == Some(address)
                    }
                    None => true,
                };
                side_matches(from, "from") && side_matches(to, "to")
            }
        }
    }
}

/// Callback invoked once per matching raw event
pub type EventCallback = Arc<dyn Fn(RawEvent) + Send + Sync>;

/// Opaque handle to a live subscription
///
/// Returned by [`ChainAccess::attach`] and owned by the subscription registry
/// until it is released, exactly once, through [`ChainAccess::detach`]. The
/// payload is implementation-defined: the RPC adapter stores its polling task
/// handle here.
pub struct LiveHandle(Box<dyn Any + Send>);

impl LiveHandle {
    pub fn new<T: Any + Send>(inner: T) -> Self {
        Self(Box::new(inner))
    }

    /// Recover the implementation-defined payload
    pub fn downcast<T: Any>(self) -> Option<T> {
        self.0.downcast::<T>().ok().map(|inner| *inner)
    }
}

impl fmt::Debug for LiveHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LiveHandle(..)")
    }
}

/// Capability object providing event attachment and history queries
///
/// All operations are async and may suspend the caller while the node
/// responds; ordering between concurrently issued queries is not guaranteed.
#[async_trait]
pub trait ChainAccess: Send + Sync {
    /// Attach `callback` to `event_name` on `contract`, optionally filtered
    ///
    /// Fails with an attach error if the contract or event is invalid or the
    /// connection is down. On success the returned handle must eventually be
    /// released through [`ChainAccess::detach`].
    async fn attach(
        &self,
        contract: &ContractHandle,
        event_name: &str,
        filter: Option<EventFilter>,
        callback: EventCallback,
    ) -> Result<LiveHandle>;

    /// Release a live subscription, best-effort
    async fn detach(
        &self,
        contract: &ContractHandle,
        event_name: &str,
        handle: LiveHandle,
    ) -> Result<()>;

    /// Current chain tip
    async fn current_block_number(&self) -> Result<u64>;

    /// Historical events for `event_name` on `contract` within `range`
    async fn query_range(
        &self,
        contract: &ContractHandle,
        event_name: &str,
        range: BlockRange,
        filter: Option<&EventFilter>,
    ) -> Result<Vec<RawEvent>>;
}
