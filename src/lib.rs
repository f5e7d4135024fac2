//! GridMesh Events library
//!
//! This library tracks contract events of the GridMesh distributed energy
//! network: live subscriptions with explicit lifecycle management, and
//! block-range history queries with decoded, typed results. All chain access
//! goes through the [`chain::ChainAccess`] seam; `blockchain` provides the
//! JSON-RPC implementation.

pub mod blockchain;
pub mod chain;
pub mod cli;
pub mod commands;
pub mod config;
pub mod contracts;
pub mod decode;
pub mod display;
pub mod error;
pub mod events;
pub mod export;
pub mod history;
pub mod registry;
pub mod retry;
pub mod router;
pub mod types;

// Re-export commonly used types
pub use chain::{ArgValue, ChainAccess, EventCallback, EventFilter, LiveHandle, RawEvent};
pub use config::AppConfig;
pub use contracts::{ContractCatalog, ContractHandle};
pub use error::{GridError, Result};
pub use events::{DomainEvent, EventData, EventKind};
pub use history::{DEFAULT_LOOKBACK_BLOCKS, EventHistory};
pub use registry::{ListenerDescriptor, SubscriptionRegistry};
pub use retry::RetryConfig;
pub use router::EventRouter;
pub use types::{BlockNumber, BlockRange, ChainAddress, SubscriptionId};
