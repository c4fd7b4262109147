//! Core types for transaction analysis
//!
//! This module defines the core data structures used throughout the analyzer:
//! - Contract descriptors (ABI + optional deployment bytecode)
//! - Raw receipt/transaction records fetched from the node
//! - Simulated call requests and outcomes
//! - Decoded calls, events, reverts and the assembled result

pub use alloy::primitives::{Address, Bytes, B256, U256};
use alloy::json_abi::JsonAbi;
use serde::Serialize;

use crate::errors::InitError;
use crate::utils::error_utils::{describe_panic, ERROR_STRING_SELECTOR, PANIC_SELECTOR};
use crate::value::{FlatArgs, FlatValue, Scalar};

/// A known contract: its ABI and, optionally, its deployment bytecode
#[derive(Debug, Clone)]
pub struct ContractDescriptor {
    /// Contract interface
    pub abi: JsonAbi,
    /// Creation bytecode, needed to decode constructor transactions
    pub bytecode: Option<Bytes>,
}

impl ContractDescriptor {
    /// Create a descriptor without bytecode
    pub fn new(abi: JsonAbi) -> Self {
        Self { abi, bytecode: None }
    }

    /// Attach creation bytecode
    pub fn with_bytecode(mut self, bytecode: Bytes) -> Self {
        self.bytecode = Some(bytecode);
        self
    }

    /// Create a descriptor from ABI JSON text and optional hex bytecode
    ///
    /// # Errors
    /// Returns `InitError` if the ABI is not valid JSON ABI or the bytecode is not hex.
    pub fn from_abi_json(abi_json: &str, bytecode: Option<&str>) -> Result<Self, InitError> {
        let abi: JsonAbi =
            serde_json::from_str(abi_json).map_err(|e| InitError::InvalidAbi(e.to_string()))?;
        Ok(Self {
            abi,
            bytecode: bytecode.map(parse_bytecode).transpose()?.flatten(),
        })
    }

    /// Create a descriptor from a compiler artifact
    ///
    /// Accepts both layouts:
    /// - Hardhat: `{"abi": [...], "bytecode": "0x..."}`
    /// - Foundry: `{"abi": [...], "bytecode": {"object": "0x..."}}`
    ///
    /// Empty bytecode (`"0x"`, e.g. interfaces) is treated as absent.
    pub fn from_artifact_json(artifact_json: &str) -> Result<Self, InitError> {
        let artifact: serde_json::Value = serde_json::from_str(artifact_json)
            .map_err(|e| InitError::InvalidArtifact(e.to_string()))?;

        let abi = artifact
            .get("abi")
            .cloned()
            .ok_or_else(|| InitError::InvalidArtifact("missing `abi` field".to_string()))?;
        let abi: JsonAbi =
            serde_json::from_value(abi).map_err(|e| InitError::InvalidAbi(e.to_string()))?;

        let bytecode = match artifact.get("bytecode") {
            Some(serde_json::Value::String(code)) => Some(code.as_str()),
            Some(serde_json::Value::Object(obj)) => obj.get("object").and_then(|o| o.as_str()),
            _ => None,
        };

        Ok(Self {
            abi,
            bytecode: bytecode.map(parse_bytecode).transpose()?.flatten(),
        })
    }
}

fn parse_bytecode(code: &str) -> Result<Option<Bytes>, InitError> {
    let bytes: Bytes = code
        .trim()
        .parse()
        .map_err(|e| InitError::InvalidBytecode(format!("{e}")))?;
    Ok((!bytes.is_empty()).then_some(bytes))
}

/// A log entry as stored in a receipt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Emitting contract
    pub address: Address,
    /// Indexed topics, topic0 being the event selector
    pub topics: Vec<B256>,
    /// Non-indexed data
    pub data: Bytes,
}

/// Receipt fields needed for analysis
#[derive(Debug, Clone)]
pub struct ReceiptRecord {
    pub transaction_hash: B256,
    pub from: Address,
    /// Recipient, `None` for contract creation
    pub to: Option<Address>,
    /// Execution status, `None` for pre-Byzantium receipts
    pub status: Option<bool>,
    pub block_number: Option<u64>,
    pub gas_used: u64,
    pub effective_gas_price: u128,
    /// Address of the created contract, if any
    pub contract_address: Option<Address>,
    pub logs: Vec<LogRecord>,
}

/// Transaction fields needed for analysis
#[derive(Debug, Clone)]
pub struct TransactionRecord {
    pub from: Address,
    pub to: Option<Address>,
    pub value: U256,
    pub input: Bytes,
    pub gas_limit: u64,
    /// Legacy/EIP-2930 gas price, `None` for dynamic-fee transactions
    pub gas_price: Option<u128>,
}

/// Receipt and transaction fields merged, plus the block timestamp
#[derive(Debug, Clone)]
pub struct RawTransactionContext {
    pub hash: B256,
    pub from: Address,
    pub to: Option<Address>,
    pub status: Option<bool>,
    pub block_number: u64,
    pub block_timestamp: u64,
    pub value: U256,
    /// Effective gas price paid
    pub gas_price: u128,
    pub gas_used: u64,
    pub gas_limit: u64,
    /// Gas price declared by the transaction itself
    pub tx_gas_price: Option<u128>,
    pub input: Bytes,
    pub contract_address: Option<Address>,
    pub logs: Vec<LogRecord>,
}

impl RawTransactionContext {
    /// Check if the receipt reports success
    pub fn is_success(&self) -> bool {
        self.status == Some(true)
    }

    /// Check if this transaction deploys a contract
    pub fn is_constructor_transaction(&self) -> bool {
        self.to.is_none()
    }
}

/// Read-only call used to reproduce a failed transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatedCall {
    pub from: Address,
    pub to: Option<Address>,
    pub input: Bytes,
    pub value: U256,
    pub gas_limit: u64,
    pub gas_price: Option<u128>,
    /// Block to execute against, `None` for latest
    pub block: Option<u64>,
}

/// Result of a simulated call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    /// Call returned normally with the given output
    Success(Bytes),
    /// Call reverted with the given payload
    Reverted(Bytes),
}

/// A function or constructor call decoded against a contract ABI
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedCall {
    /// Function name, empty for constructors
    pub name: String,
    /// `0x`-prefixed 4-byte selector, empty for constructors
    pub selector: String,
    pub args: FlatArgs,
}

/// A receipt log decoded against the matched ABI
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedEvent {
    pub name: String,
    pub args: FlatArgs,
}

/// Revert payload decoded against the matched ABI
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedRevert {
    pub name: String,
    pub selector: String,
    pub args: FlatArgs,
}

impl DecodedRevert {
    /// Human-readable reason for the built-in `Error(string)` and `Panic(uint256)`
    ///
    /// Returns `None` for custom errors.
    pub fn reason(&self) -> Option<String> {
        let first = match self.args.first().map(|arg| &arg.value) {
            Some(FlatValue::Scalar(scalar)) => scalar,
            _ => return None,
        };
        match (self.selector.as_str(), first) {
            (ERROR_STRING_SELECTOR, Scalar::String(message)) => Some(message.clone()),
            (PANIC_SELECTOR, Scalar::Uint(code)) => Some(describe_panic(*code)),
            _ => None,
        }
    }
}

/// Transaction and receipt fields formatted for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionData {
    pub hash: B256,
    pub from: Address,
    pub to: Option<Address>,
    /// 1 for success, 0 for failure, `None` when the receipt has no status
    pub status: Option<u8>,
    pub block_number: u64,
    pub block_timestamp: u64,
    pub is_constructor_transaction: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<Address>,
    /// Value sent, in native units (e.g. `"0.5 ETH"`)
    pub tx_value: String,
    /// Effective gas price in gwei (e.g. `"12.5 Gwei"`)
    pub tx_gas_price: String,
    /// Fee paid (gas price × gas used), in native units
    pub tx_gas_used: String,
}

/// Decoded call and events of the matched contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractData {
    pub name: String,
    pub selector: String,
    pub args: FlatArgs,
    pub events: Vec<DecodedEvent>,
}

/// Complete analysis of one transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TxAnalysisResult {
    pub transaction_data: TransactionData,
    pub contract_data: ContractData,
    /// Only present for failed transactions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revert_data: Option<DecodedRevert>,
}

impl TxAnalysisResult {
    /// Check if the analyzed transaction succeeded
    pub fn is_success(&self) -> bool {
        self.transaction_data.status == Some(1)
    }
}
