//! Error types for transaction analysis
//!
//! This module defines the error handling system that covers:
//! - Lookup failures (unknown transaction hash, no matching contract)
//! - Provider and ABI initialization errors
//! - Fetch errors for receipts, transactions and blocks
//! - Decoding errors for events and revert payloads
//!
//! Every stage of the pipeline fails fast; no partially decoded result is
//! ever returned alongside an error.

use alloy::primitives::{Address, Bytes, B256};
use alloy::transports::TransportError;
use thiserror::Error;

/// Top-level error type for the analyzer
///
/// Encompasses all possible errors that can occur while analyzing a
/// transaction, providing a unified error handling interface for users.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// The node has no receipt for the given transaction hash
    #[error("txHash not found {0}")]
    InvalidTxHash(String),

    /// No provider or wallet is available on the caller side
    #[error("Wallet not detected")]
    WalletNotDetected,

    /// The call data selector matches no known contract ABI
    #[error("Not found a contract with selector:{0}")]
    ContractNotFound(String),

    /// A deployment transaction whose constructor arguments cannot be decoded
    #[error("Can't retrieve information about a ConstructorTransaction without bytecode")]
    ConstructorTransaction,

    /// Errors occurring while setting up providers or contract descriptors
    #[error("Failed to initialize: {0}")]
    Init(#[from] InitError),

    /// Errors occurring while fetching transaction context
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Errors occurring while decoding logs or revert data
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Node/transport errors, passed through unchanged
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Errors raised before any transaction is analyzed
///
/// Covers opening the node connection and loading contract descriptors
/// from ABI JSON, bytecode or compiler artifacts.
#[derive(Debug, Error)]
pub enum InitError {
    /// An `http(s)` endpoint that does not parse as a URL
    #[error("Malformed node endpoint: {0}")]
    MalformedEndpoint(String),

    /// The WebSocket handshake with the node failed
    #[error("Could not open socket to node: {0}")]
    SocketHandshake(String),

    /// ABI JSON could not be parsed
    #[error("Invalid ABI: {0}")]
    InvalidAbi(String),

    /// Deployment bytecode is not valid hex
    #[error("Invalid bytecode: {0}")]
    InvalidBytecode(String),

    /// Compiler artifact is missing required fields
    #[error("Invalid artifact: {0}")]
    InvalidArtifact(String),
}

/// Errors raised while resolving a transaction hash into its full context
#[derive(Debug, Error)]
pub enum FetchError {
    /// A receipt exists but the node returned no transaction for it
    #[error("Transaction {0} not found for existing receipt")]
    TransactionMissing(B256),

    /// Receipt is not attached to a block
    #[error("Receipt for {0} has no block number")]
    PendingReceipt(B256),

    /// The block containing the transaction could not be fetched
    #[error("Block {0} not found")]
    BlockMissing(u64),
}

/// Decoding errors
///
/// These errors occur after an interface has been matched, while decoding
/// the receipt logs or the revert payload of a failed transaction.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Log topic does not belong to any event of the matched interface
    ///
    /// # Fields
    /// * `index` - Position of the log in the receipt
    /// * `address` - Contract that emitted the log
    /// * `topic` - First topic of the log, if any
    #[error("Log {index} from {address} does not match any known event (topic0: {topic:?})")]
    UnknownEvent {
        index: usize,
        address: Address,
        topic: Option<B256>,
    },

    /// Log matched an event but its data failed to decode
    ///
    /// # Fields
    /// * `index` - Position of the log in the receipt
    /// * `reason` - Detailed error message
    #[error("Failed to decode log {index}: {reason}")]
    EventDecode {
        index: usize,
        reason: String,
    },

    /// The failed transaction executed successfully when simulated
    #[error("Simulated call did not revert")]
    RevertNotReproduced,

    /// Revert payload does not match any known error
    ///
    /// # Fields
    /// * `data` - Raw revert bytes
    #[error("Unknown revert data {data}")]
    UnknownRevert {
        data: Bytes,
    },
}
