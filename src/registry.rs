//! Subscription bookkeeping
//!
//! The registry owns the mapping from issued subscription ids to their
//! listener descriptors and live chain-side handles. Its lifecycle is
//! explicit: construct, subscribe/unsubscribe, then `unsubscribe_all` on
//! shutdown. There is no process-wide singleton.

use crate::chain::{ChainAccess, EventCallback, EventFilter, LiveHandle};
use crate::contracts::ContractHandle;
use crate::error::Result;
use crate::types::SubscriptionId;
use chrono::Utc;
use futures::future::join_all;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// One active subscription intent
///
/// Descriptors are inserted and removed whole, never mutated in place.
pub struct ListenerDescriptor {
    pub contract: ContractHandle,
    pub event_name: String,
    pub callback: EventCallback,
    pub filter: Option<EventFilter>,
}

/// Descriptor map and live-handle map, always modified together
///
/// An id is either present in both maps or in neither; the single lock around
/// this struct is what makes add and remove atomic per id.
#[derive(Default)]
struct SubscriptionMaps {
    descriptors: HashMap<SubscriptionId, ListenerDescriptor>,
    live: HashMap<SubscriptionId, LiveHandle>,
}

/// Registry of active event subscriptions against one chain-access object
pub struct SubscriptionRegistry {
    access: Arc<dyn ChainAccess>,
    maps: Mutex<SubscriptionMaps>,
    next_seq: AtomicU64,
}

impl SubscriptionRegistry {
    pub fn new(access: Arc<dyn ChainAccess>) -> Self {
        Self {
            access,
            maps: Mutex::new(SubscriptionMaps::default()),
            next_seq: AtomicU64::new(0),
        }
    }

    /// Attach `callback` to `event_name` on `contract` and record the
    /// subscription
    ///
    /// The returned id is unique for the lifetime of this registry, even for
    /// subscriptions registered within the same millisecond. If the chain
    /// attach fails nothing is recorded and no id is issued.
    pub async fn subscribe(
        &self,
        contract: &ContractHandle,
        event_name: &str,
        callback: EventCallback,
        filter: Option<EventFilter>,
    ) -> Result<SubscriptionId> {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        let id = SubscriptionId::compose(
            contract.address(),
            event_name,
            Utc::now().timestamp_millis(),
            seq,
        );

        let handle = self
            .access
            .attach(contract, event_name, filter.clone(), Arc::clone(&callback))
            .await?;

        let descriptor = ListenerDescriptor {
            contract: contract.clone(),
            event_name: event_name.to_string(),
            callback,
            filter,
        };

        {
            let mut maps = self.maps.lock().expect("subscription maps poisoned");
            maps.descriptors.insert(id.clone(), descriptor);
            maps.live.insert(id.clone(), handle);
        }

        tracing::debug!(
            "Subscribed to {} on {} as {}",
            event_name,
            contract.name(),
            id
        );
        Ok(id)
    }

    /// Drop a subscription; no-op for unknown ids
    ///
    /// Local bookkeeping is removed first, so a failing chain detach never
    /// leaves a dangling entry; the failure is logged as a warning and not
    /// surfaced. Returns whether a subscription was actually removed, which
    /// also makes the call idempotent: a second call for the same id finds
    /// nothing and performs no second detach.
    pub async fn unsubscribe(&self, id: &SubscriptionId) -> bool {
        let removed = {
            let mut maps = self.maps.lock().expect("subscription maps poisoned");
            let descriptor = maps.descriptors.remove(id);
            let handle = maps.live.remove(id);
            descriptor.zip(handle)
        };

        let Some((descriptor, handle)) = removed else {
            return false;
        };

        if let Err(e) = self
            .access
            .detach(&descriptor.contract, &descriptor.event_name, handle)
            .await
        {
            tracing::warn!("Detach failed for {id}, subscription removed locally: {e}");
        } else {
            tracing::debug!("Unsubscribed {id}");
        }

        true
    }

    /// Drop every active subscription
    ///
    /// Intended as the explicit teardown before discarding the registry.
    /// Detach failures are logged per subscription; afterwards no
    /// subscription remains regardless of how the chain client behaved.
    pub async fn unsubscribe_all(&self) {
        let ids: Vec<SubscriptionId> = {
            let maps = self.maps.lock().expect("subscription maps poisoned");
            maps.descriptors.keys().cloned().collect()
        };

        join_all(ids.iter().map(|id| self.unsubscribe(id))).await;
    }

    /// Snapshot of the currently registered subscription ids
    pub fn list_active(&self) -> HashSet<SubscriptionId> {
        let maps = self.maps.lock().expect("subscription maps poisoned");
        maps.descriptors.keys().cloned().collect()
    }

    pub fn has(&self, id: &SubscriptionId) -> bool {
        let maps = self.maps.lock().expect("subscription maps poisoned");
        maps.descriptors.contains_key(id)
    }
}

// Lifecycle tests with a scripted ChainAccess live in tests/registry_tests.rs.
