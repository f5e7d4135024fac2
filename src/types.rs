//! Type-safe wrappers for blockchain primitives
//!
//! This module provides newtype wrappers around primitive types to prevent
//! mixing up different kinds of data and enable compile-time type checking.

use crate::error::{GridError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account or contract address on the chain (hex string with 0x prefix)
///
/// # Example
///
/// ```ignore
/// let addr = ChainAddress::new("0x45a1502382541Cd610CC9068e88727426b696293")?;
/// assert_eq!(addr.as_str(), "0x45a1502382541cd610cc9068e88727426b696293");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChainAddress(String);

impl ChainAddress {
    /// Create from string, validating format and normalizing to lowercase
    ///
    /// # Arguments
    ///
    /// * `address` - Ethereum-style address with 0x prefix (42 chars total)
    ///
    /// # Errors
    ///
    /// Returns error if address format is invalid
    pub fn new(address: impl Into<String>) -> Result<Self> {
        let addr = address.into();

        // Validate: 0x prefix
        if !addr.starts_with("0x") {
            return Err(GridError::Config(format!(
                "Invalid address '{addr}': must start with 0x"
            )));
        }

        // Validate: 40 hex chars after 0x
        if addr.len() != 42 {
            return Err(GridError::Config(format!(
                "Invalid address '{}': must be 42 characters (0x + 40 hex chars), got {}",
                addr,
                addr.len()
            )));
        }

        // Validate: all chars after 0x are hex
        if !addr[2..].chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(GridError::Config(format!(
                "Invalid address '{addr}': contains non-hex characters"
            )));
        }

        // Normalize to lowercase for consistent comparisons
        Ok(Self(addr.to_lowercase()))
    }

    /// Get as string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChainAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ChainAddress {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

/// Identifier issued for one active event subscription
///
/// Generated by the subscription registry as
/// `<contract address>-<event name>-<unix millis>-<sequence>`. The sequence
/// component is a process-monotonic counter, so ids stay unique even when two
/// subscriptions are registered within the same millisecond.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(String);

impl SubscriptionId {
    pub(crate) fn compose(address: &ChainAddress, event_name: &str, millis: i64, seq: u64) -> Self {
        Self(format!("{address}-{event_name}-{millis}-{seq}"))
    }

    /// Get as string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Block number on blockchain
///
/// # Example
///
/// ```ignore
/// let block = BlockNumber(31305656);
/// assert!(block > BlockNumber(31305655));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockNumber(pub u64);

impl BlockNumber {
    /// Create new block number
    pub fn new(block: u64) -> Self {
        Self(block)
    }

    /// Get as u64
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for BlockNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for BlockNumber {
    fn from(block: u64) -> Self {
        Self(block)
    }
}

impl From<BlockNumber> for u64 {
    fn from(block: BlockNumber) -> Self {
        block.0
    }
}

/// Inclusive block range with `from_block <= to_block` guaranteed
///
/// Explicit ranges are validated at construction; computed trailing windows
/// clamp at block 0 instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRange {
    pub from_block: u64,
    pub to_block: u64,
}

impl BlockRange {
    /// Create a validated range
    ///
    /// # Errors
    ///
    /// Returns a query error if `from_block > to_block`
    pub fn new(from_block: u64, to_block: u64) -> Result<Self> {
        if from_block > to_block {
            return Err(GridError::Query(format!(
                "Invalid block range: from_block ({from_block}) is after to_block ({to_block})"
            )));
        }

        Ok(Self {
            from_block,
            to_block,
        })
    }

    /// Window covering the last `block_count` blocks up to `tip`, inclusive
    ///
    /// `from_block` saturates at 0 when the window reaches past the genesis
    /// block. A `block_count` of 0 yields `[tip, tip]`, i.e. just the block
    /// the chain is currently on.
    pub fn trailing(tip: u64, block_count: u64) -> Self {
        Self {
            from_block: tip.saturating_sub(block_count),
            to_block: tip,
        }
    }

    /// Number of blocks covered, inclusive of both ends
    pub fn block_count(&self) -> u64 {
        self.to_block - self.from_block + 1
    }
}

impl fmt::Display for BlockRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.from_block, self.to_block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_address_valid() {
        let addr = ChainAddress::new("0x45a1502382541Cd610CC9068e88727426b696293").unwrap();
        assert_eq!(addr.as_str(), "0x45a1502382541cd610cc9068e88727426b696293");
    }

    #[test]
    fn test_chain_address_normalizes_case() {
        let addr1 = ChainAddress::new("0xABCDEF1234567890ABCDef1234567890abcDEF12").unwrap();
        let addr2 = ChainAddress::new("0xabcdef1234567890abcdef1234567890abcdef12").unwrap();
        assert_eq!(addr1, addr2);
    }

    #[test]
    fn test_chain_address_missing_0x() {
        let result = ChainAddress::new("45a1502382541Cd610CC9068e88727426b696293");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("must start with 0x"));
    }

    #[test]
    fn test_chain_address_wrong_length() {
        let result = ChainAddress::new("0x123");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("must be 42 characters"));
    }

    #[test]
    fn test_chain_address_invalid_hex() {
        let result = ChainAddress::new("0x45a1502382541Cd610CC9068e88727426b696zz");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("non-hex"));
    }

    #[test]
    fn test_subscription_id_composition() {
        let addr = ChainAddress::new("0x1234567890123456789012345678901234567890").unwrap();
        let id = SubscriptionId::compose(&addr, "NodeRegistered", 1700000000123, 7);
        assert_eq!(
            id.as_str(),
            "0x1234567890123456789012345678901234567890-NodeRegistered-1700000000123-7"
        );
    }

    #[test]
    fn test_block_number_ordering() {
        let block1 = BlockNumber(100);
        let block2 = BlockNumber(200);
        assert!(block1 < block2);
        assert!(block2 > block1);
        assert_eq!(block1, BlockNumber(100));
    }

    #[test]
    fn test_block_number_conversion() {
        let block = BlockNumber::from(12345u64);
        assert_eq!(block.as_u64(), 12345);
        assert_eq!(u64::from(block), 12345);
    }

    #[test]
    fn test_block_range_valid() {
        let range = BlockRange::new(100, 200).unwrap();
        assert_eq!(range.from_block, 100);
        assert_eq!(range.to_block, 200);
        assert_eq!(range.block_count(), 101);
    }

    #[test]
    fn test_block_range_inverted() {
        let result = BlockRange::new(200, 100);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid block range"));
    }

    #[test]
    fn test_block_range_trailing() {
        let range = BlockRange::trailing(1200, 500);
        assert_eq!(range.from_block, 700);
        assert_eq!(range.to_block, 1200);
    }

    #[test]
    fn test_block_range_trailing_clamps_to_genesis() {
        let range = BlockRange::trailing(300, 5000);
        assert_eq!(range.from_block, 0);
        assert_eq!(range.to_block, 300);
    }

    #[test]
    fn test_block_range_trailing_zero_count() {
        let range = BlockRange::trailing(1200, 0);
        assert_eq!(range.from_block, 1200);
        assert_eq!(range.to_block, 1200);
        assert_eq!(range.block_count(), 1);
    }

    #[test]
    fn test_block_range_single_block() {
        let range = BlockRange::new(42, 42).unwrap();
        assert_eq!(range.block_count(), 1);
    }
}
