//! Historical event queries
//!
//! Stateless range computation over the chain-access layer: explicit ranges,
//! trailing windows anchored at the current tip, and per-address filtering.
//! Failures from the chain are surfaced as-is; nothing here retries.

use crate::chain::{ChainAccess, EventFilter, RawEvent};
use crate::contracts::ContractHandle;
use crate::error::Result;
use crate::types::{BlockRange, ChainAddress};
use std::sync::Arc;

/// Default lookback window for history queries, in blocks
pub const DEFAULT_LOOKBACK_BLOCKS: u64 = 1_000;

/// Block-range history queries against one chain-access object
#[derive(Clone)]
pub struct EventHistory {
    access: Arc<dyn ChainAccess>,
}

impl EventHistory {
    pub fn new(access: Arc<dyn ChainAccess>) -> Self {
        Self { access }
    }

    /// Events for `event_name` on `contract` within `range`
    pub async fn query_range(
        &self,
        contract: &ContractHandle,
        event_name: &str,
        range: BlockRange,
        filter: Option<&EventFilter>,
    ) -> Result<Vec<RawEvent>> {
        tracing::debug!(
            "History query: {} on {} over {}",
            event_name,
            contract.name(),
            range
        );
        self.access
            .query_range(contract, event_name, range, filter)
            .await
    }

    /// Events within the last `block_count` blocks
    ///
    /// The window is `[tip - block_count, tip]`, clamped at block 0. A
    /// `block_count` of 0 queries just the current block.
    pub async fn query_recent(
        &self,
        contract: &ContractHandle,
        event_name: &str,
        block_count: u64,
        filter: Option<&EventFilter>,
    ) -> Result<Vec<RawEvent>> {
        let tip = self.access.current_block_number().await?;
        let range = BlockRange::trailing(tip, block_count);
        self.query_range(contract, event_name, range, filter).await
    }

    /// Events involving `address`, within `range` or the default trailing
    /// window when no range is given
    ///
    /// How the address is matched (sender, recipient, any indexed
    /// participant) is up to the chain-access layer.
    pub async fn query_by_address(
        &self,
        contract: &ContractHandle,
        event_name: &str,
        address: ChainAddress,
        range: Option<BlockRange>,
    ) -> Result<Vec<RawEvent>> {
        let filter = EventFilter::Participant(address);
        match range {
            Some(range) => {
                self.query_range(contract, event_name, range, Some(&filter))
                    .await
            }
            None => {
                self.query_recent(contract, event_name, DEFAULT_LOOKBACK_BLOCKS, Some(&filter))
                    .await
            }
        }
    }
}

// Window-computation properties are covered in tests/history_tests.rs.
