use crate::chain::{ChainAccess, EventCallback, EventFilter, LiveHandle, RawEvent};
use crate::contracts::{ContractHandle, abi, parser};
use crate::error::{GridError, Result};
use crate::types::BlockRange;
use alloy::primitives::Address;
use alloy::providers::{Provider, ProviderBuilder, RootProvider};
use alloy::rpc::types::Filter;
use alloy::transports::http::{Client, Http};
use async_trait::async_trait;
use std::str::FromStr;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Chain access over a JSON-RPC HTTP provider
///
/// History queries map to `eth_getLogs` with a per-event topic filter.
/// Subscriptions are served by a polling task per listener: every
/// `poll_interval` the task fetches logs newer than its last window and
/// feeds them to the callback. The first window starts at the block after
/// attach, so a subscription only sees events emitted after it existed.
#[derive(Clone)]
pub struct BlockchainClient {
    provider: RootProvider<Http<Client>>,
    poll_interval: Duration,
}

impl BlockchainClient {
    /// Create a new blockchain client
    pub fn new(rpc_url: &str, poll_interval: Duration) -> Result<Self> {
        let provider = ProviderBuilder::new().on_http(
            rpc_url
                .parse()
                .map_err(|e| GridError::Config(format!("Invalid RPC URL: {e}")))?,
        );

        Ok(Self {
            provider,
            poll_interval,
        })
    }

    fn contract_address(contract: &ContractHandle) -> Result<Address> {
        Address::from_str(contract.address().as_str())
            .map_err(|e| GridError::Config(format!("Invalid contract address: {e}")))
    }

    /// Fetch and convert matching logs for one event over one range
    async fn fetch_raw_events(
        &self,
        contract: &ContractHandle,
        event_name: &str,
        range: BlockRange,
        filter: Option<&EventFilter>,
    ) -> Result<Vec<RawEvent>> {
        let address = Self::contract_address(contract)?;
        let signature = abi::signature_for(event_name).ok_or_else(|| {
            GridError::Query(format!("Unknown event '{event_name}'"))
        })?;

        let rpc_filter = Filter::new()
            .address(address)
            .event(signature)
            .from_block(range.from_block)
            .to_block(range.to_block);

        tracing::debug!(
            "RPC: get_logs(contract={}, event={}, range={})",
            contract.address(),
            event_name,
            range
        );
        let logs = self
            .provider
            .get_logs(&rpc_filter)
            .await
            .map_err(|e| GridError::Query(format!("Failed to get logs: {e}")))?;

        let mut events = Vec::new();
        for log in logs {
            if let Some(raw) = parser::raw_from_log(event_name, &log)? {
                if filter.is_none_or(|f| f.matches(&raw)) {
                    events.push(raw);
                }
            }
        }

        Ok(events)
    }
}

#[async_trait]
impl ChainAccess for BlockchainClient {
    async fn attach(
        &self,
        contract: &ContractHandle,
        event_name: &str,
        filter: Option<EventFilter>,
        callback: EventCallback,
    ) -> Result<LiveHandle> {
        if abi::signature_for(event_name).is_none() {
            return Err(GridError::Attach(format!(
                "Unknown event '{}' on contract '{}'",
                event_name,
                contract.name()
            )));
        }
        Self::contract_address(contract)
            .map_err(|e| GridError::Attach(e.to_string()))?;

        // Also proves the endpoint is reachable before a listener is handed out
        let tip = self
            .provider
            .get_block_number()
            .await
            .map_err(|e| GridError::Attach(format!("Failed to reach chain: {e}")))?;

        let client = self.clone();
        let contract = contract.clone();
        let event_name = event_name.to_string();
        let poll_interval = self.poll_interval;

        let task: JoinHandle<()> = tokio::spawn(async move {
            let mut interval = tokio::time::interval(poll_interval);
            let mut next_block = tip + 1;

            loop {
                interval.tick().await;

                let tip = match client.provider.get_block_number().await {
                    Ok(tip) => tip,
                    Err(e) => {
                        tracing::debug!("Skipping poll, tip unavailable: {e}");
                        continue;
                    }
                };
                if tip < next_block {
                    continue;
                }

                let range = BlockRange {
                    from_block: next_block,
                    to_block: tip,
                };
                match client
                    .fetch_raw_events(&contract, &event_name, range, filter.as_ref())
                    .await
                {
                    Ok(events) => {
                        if !events.is_empty() {
                            tracing::debug!(
                                "Delivering {} {} event(s) from {}",
                                events.len(),
                                event_name,
                                range
                            );
                        }
                        for raw in events {
                            callback(raw);
                        }
                        next_block = tip + 1;
                    }
                    // Window is not advanced, the next poll retries it
                    Err(e) => {
                        tracing::warn!(
                            "Event poll failed for {} on {}: {e}",
                            event_name,
                            contract.name()
                        );
                    }
                }
            }
        });

        Ok(LiveHandle::new(task))
    }

    async fn detach(
        &self,
        _contract: &ContractHandle,
        _event_name: &str,
        handle: LiveHandle,
    ) -> Result<()> {
        match handle.downcast::<JoinHandle<()>>() {
            Some(task) => {
                task.abort();
                Ok(())
            }
            None => Err(GridError::Detach(
                "Live handle was not issued by this client".to_string(),
            )),
        }
    }

    async fn current_block_number(&self) -> Result<u64> {
        tracing::debug!("RPC: get_block_number()");
        self.provider
            .get_block_number()
            .await
            .map_err(|e| GridError::Query(format!("Failed to get current block: {e}")))
    }

    async fn query_range(
        &self,
        contract: &ContractHandle,
        event_name: &str,
        range: BlockRange,
        filter: Option<&EventFilter>,
    ) -> Result<Vec<RawEvent>> {
        self.fetch_raw_events(contract, event_name, range, filter)
            .await
    }
}

// Note: Integration tests with actual RPC would go in tests/ directory
// to avoid making network calls during unit tests
