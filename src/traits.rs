//! Chain access traits
//!
//! The analyzer never talks to a node directly; it goes through
//! [`ChainReader`]. The production implementation wraps an alloy provider
//! ([`crate::provider::RpcReader`]), tests substitute in-memory fixtures.
//!
//! # Key Traits
//! - `ChainReader`: Receipt, transaction and block lookups plus read-only calls

use alloy::{primitives::B256, transports::TransportError};
use async_trait::async_trait;

use crate::types::{CallOutcome, ReceiptRecord, SimulatedCall, TransactionRecord};

/// Read-only access to chain data
///
/// Lookups return `Ok(None)` when the node does not know the requested
/// item; transport failures are returned as errors and never retried here.
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Fetch the receipt of a mined transaction
    async fn receipt(&self, hash: B256) -> Result<Option<ReceiptRecord>, TransportError>;

    /// Fetch a transaction by hash
    async fn transaction(&self, hash: B256) -> Result<Option<TransactionRecord>, TransportError>;

    /// Fetch the timestamp of a block
    async fn block_timestamp(&self, number: u64) -> Result<Option<u64>, TransportError>;

    /// Execute a read-only call
    ///
    /// A revert is a successful lookup and is reported as
    /// [`CallOutcome::Reverted`], not as an error.
    async fn call(&self, call: &SimulatedCall) -> Result<CallOutcome, TransportError>;
}
