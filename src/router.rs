//! Domain event routing
//!
//! Fixed catalog of the GridMesh concerns — node registration, energy
//! trading, asset minting, governance, token transfers — composed over the
//! subscription registry and the history service. Subscribe methods deliver
//! raw events to the supplied callback; history methods decode before
//! returning.

use crate::chain::{ChainAccess, EventCallback, EventFilter};
use crate::contracts::ContractCatalog;
use crate::decode::decode_events;
use crate::error::Result;
use crate::events::{DomainEvent, EventKind};
use crate::history::{DEFAULT_LOOKBACK_BLOCKS, EventHistory};
use crate::registry::SubscriptionRegistry;
use crate::types::{BlockRange, ChainAddress, SubscriptionId};
use std::sync::Arc;

/// Facade over subscriptions and history for the five GridMesh concerns
///
/// # Lifecycle
///
/// Construct once per consumer, use, then call [`EventRouter::shutdown`]
/// before discarding so chain-side listeners are released.
pub struct EventRouter {
    catalog: ContractCatalog,
    registry: SubscriptionRegistry,
    history: EventHistory,
}

impl EventRouter {
    pub fn new(access: Arc<dyn ChainAccess>, catalog: ContractCatalog) -> Self {
        Self {
            registry: SubscriptionRegistry::new(Arc::clone(&access)),
            history: EventHistory::new(access),
            catalog,
        }
    }

    /// The underlying subscription registry
    pub fn registry(&self) -> &SubscriptionRegistry {
        &self.registry
    }

    /// The underlying history service
    pub fn history(&self) -> &EventHistory {
        &self.history
    }

    async fn subscribe_kind(
        &self,
        kind: EventKind,
        filter: Option<EventFilter>,
        callback: EventCallback,
    ) -> Result<SubscriptionId> {
        let contract = self.catalog.handle_for(kind);
        self.registry
            .subscribe(contract, kind.event_name(), callback, filter)
            .await
    }

    async fn history_for_kind(
        &self,
        kind: EventKind,
        range: Option<BlockRange>,
    ) -> Result<Vec<DomainEvent>> {
        let contract = self.catalog.handle_for(kind);
        let raws = match range {
            Some(range) => {
                self.history
                    .query_range(contract, kind.event_name(), range, None)
                    .await?
            }
            None => {
                self.history
                    .query_recent(contract, kind.event_name(), DEFAULT_LOOKBACK_BLOCKS, None)
                    .await?
            }
        };
        decode_events(kind, &raws)
    }

    /// Subscribe to `NodeRegistered` events on the node registry
    pub async fn subscribe_node_registrations(
        &self,
        callback: EventCallback,
    ) -> Result<SubscriptionId> {
        self.subscribe_kind(EventKind::NodeRegistered, None, callback)
            .await
    }

    /// Subscribe to `EnergyPurchased` events on the energy market
    pub async fn subscribe_energy_trades(&self, callback: EventCallback) -> Result<SubscriptionId> {
        self.subscribe_kind(EventKind::EnergyPurchased, None, callback)
            .await
    }

    /// Subscribe to `EnergyAssetMinted` events on the asset NFT contract
    pub async fn subscribe_asset_mints(&self, callback: EventCallback) -> Result<SubscriptionId> {
        self.subscribe_kind(EventKind::AssetMinted, None, callback)
            .await
    }

    /// Subscribe to `ProposalCreated` events on the governance contract
    pub async fn subscribe_proposals(&self, callback: EventCallback) -> Result<SubscriptionId> {
        self.subscribe_kind(EventKind::ProposalCreated, None, callback)
            .await
    }

    /// Subscribe to GRID token `Transfer` events, optionally narrowed by
    /// sender and/or recipient
    pub async fn subscribe_token_transfers(
        &self,
        from: Option<ChainAddress>,
        to: Option<ChainAddress>,
        callback: EventCallback,
    ) -> Result<SubscriptionId> {
        let filter = EventFilter::FromTo { from, to };
        self.subscribe_kind(EventKind::TokenTransferred, Some(filter), callback)
            .await
    }

    /// Decoded `NodeRegistered` history; defaults to the last 1000 blocks
    pub async fn node_registration_history(
        &self,
        range: Option<BlockRange>,
    ) -> Result<Vec<DomainEvent>> {
        self.history_for_kind(EventKind::NodeRegistered, range).await
    }

    /// Decoded `EnergyPurchased` history; defaults to the last 1000 blocks
    pub async fn energy_trading_history(
        &self,
        range: Option<BlockRange>,
    ) -> Result<Vec<DomainEvent>> {
        self.history_for_kind(EventKind::EnergyPurchased, range).await
    }

    /// Decoded `EnergyAssetMinted` history; defaults to the last 1000 blocks
    pub async fn asset_minting_history(
        &self,
        range: Option<BlockRange>,
    ) -> Result<Vec<DomainEvent>> {
        self.history_for_kind(EventKind::AssetMinted, range).await
    }

    /// Decoded `ProposalCreated` history; defaults to the last 1000 blocks
    pub async fn governance_history(&self, range: Option<BlockRange>) -> Result<Vec<DomainEvent>> {
        self.history_for_kind(EventKind::ProposalCreated, range).await
    }

    /// Decoded GRID token transfers involving `address`; defaults to the
    /// last 1000 blocks
    pub async fn user_token_transfers(
        &self,
        address: ChainAddress,
        range: Option<BlockRange>,
    ) -> Result<Vec<DomainEvent>> {
        let kind = EventKind::TokenTransferred;
        let contract = self.catalog.handle_for(kind);
        let raws = self
            .history
            .query_by_address(contract, kind.event_name(), address, range)
            .await?;
        decode_events(kind, &raws)
    }

    /// Release every active subscription
    pub async fn shutdown(&self) {
        self.registry.unsubscribe_all().await;
    }

    /// Decoded history for an arbitrary tracked kind
    pub async fn history_of(
        &self,
        kind: EventKind,
        range: Option<BlockRange>,
    ) -> Result<Vec<DomainEvent>> {
        self.history_for_kind(kind, range).await
    }

    /// Subscribe to an arbitrary tracked kind without a filter
    pub async fn subscribe_to(
        &self,
        kind: EventKind,
        callback: EventCallback,
    ) -> Result<SubscriptionId> {
        self.subscribe_kind(kind, None, callback).await
    }
}
