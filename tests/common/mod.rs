#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use alloy::primitives::{address, Address, Bytes, B256, U256};
use alloy::sol;
use alloy::sol_types::SolEvent;
use alloy::transports::{TransportError, TransportErrorKind};
use async_trait::async_trait;
use tx_analyzer::{
    types::{CallOutcome, LogRecord, ReceiptRecord, SimulatedCall, TransactionRecord},
    ChainReader, ContractDescriptor,
};

sol! {
    struct Inner {
        uint256 amount;
        address owner;
    }

    struct Order {
        string label;
        Inner inner;
    }

    function transfer(address to, uint256 amount) returns (bool);
    function submit(Order order, uint8 flag);
    function pause();

    event Transfer(address indexed from, address indexed to, uint256 value);
    event Submitted(address indexed maker, Order order);

    error InsufficientBalance(uint256 available, uint256 required);
}

pub const SENDER: Address = address!("C255fC198eEdAC7AF8aF0f6e0ca781794B094A61");
pub const TOKEN: Address = address!("d878229c9c3575F224784DE610911B5607a3ad15");
pub const RECIPIENT: Address = address!("00000000000000000000000000000000000000bb");
pub const DEPLOYED: Address = address!("00000000000000000000000000000000000000dd");

pub const TOKEN_BYTECODE: [u8; 6] = [0x60, 0x80, 0x60, 0x40, 0x52, 0x00];

pub const TOKEN_ABI: &str = r#"[
    {
        "type": "constructor",
        "inputs": [
            {"name": "supply", "type": "uint256"},
            {"name": "owner", "type": "address"}
        ],
        "stateMutability": "nonpayable"
    },
    {
        "type": "function",
        "name": "transfer",
        "inputs": [
            {"name": "to", "type": "address"},
            {"name": "amount", "type": "uint256"}
        ],
        "outputs": [{"name": "", "type": "bool"}],
        "stateMutability": "nonpayable"
    },
    {
        "type": "event",
        "name": "Transfer",
        "inputs": [
            {"name": "from", "type": "address", "indexed": true},
            {"name": "to", "type": "address", "indexed": true},
            {"name": "value", "type": "uint256", "indexed": false}
        ],
        "anonymous": false
    },
    {
        "type": "error",
        "name": "InsufficientBalance",
        "inputs": [
            {"name": "available", "type": "uint256"},
            {"name": "required", "type": "uint256"}
        ]
    }
]"#;

/// Same `transfer` selector as the token, with unnamed inputs and no events
pub const SHADOW_ABI: &str = r#"[
    {
        "type": "function",
        "name": "transfer",
        "inputs": [
            {"name": "", "type": "address"},
            {"name": "", "type": "uint256"}
        ],
        "outputs": [],
        "stateMutability": "nonpayable"
    }
]"#;

pub const ORDER_BOOK_ABI: &str = r#"[
    {
        "type": "function",
        "name": "submit",
        "inputs": [
            {
                "name": "order",
                "type": "tuple",
                "internalType": "struct Order",
                "components": [
                    {"name": "label", "type": "string"},
                    {
                        "name": "inner",
                        "type": "tuple",
                        "internalType": "struct Inner",
                        "components": [
                            {"name": "amount", "type": "uint256"},
                            {"name": "owner", "type": "address"}
                        ]
                    }
                ]
            },
            {"name": "flag", "type": "uint8"}
        ],
        "outputs": [],
        "stateMutability": "nonpayable"
    },
    {
        "type": "function",
        "name": "pause",
        "inputs": [],
        "outputs": [],
        "stateMutability": "nonpayable"
    },
    {
        "type": "event",
        "name": "Submitted",
        "inputs": [
            {"name": "maker", "type": "address", "indexed": true},
            {
                "name": "order",
                "type": "tuple",
                "indexed": false,
                "components": [
                    {"name": "label", "type": "string"},
                    {
                        "name": "inner",
                        "type": "tuple",
                        "components": [
                            {"name": "amount", "type": "uint256"},
                            {"name": "owner", "type": "address"}
                        ]
                    }
                ]
            }
        ],
        "anonymous": false
    }
]"#;

pub fn token() -> ContractDescriptor {
    ContractDescriptor::from_abi_json(TOKEN_ABI, None)
        .unwrap()
        .with_bytecode(Bytes::from(TOKEN_BYTECODE.to_vec()))
}

pub fn shadow() -> ContractDescriptor {
    ContractDescriptor::from_abi_json(SHADOW_ABI, None).unwrap()
}

pub fn order_book() -> ContractDescriptor {
    ContractDescriptor::from_abi_json(ORDER_BOOK_ABI, None).unwrap()
}

pub fn tx_hash(n: u8) -> B256 {
    B256::with_last_byte(n)
}

pub fn log_record<E: SolEvent>(address: Address, event: &E) -> LogRecord {
    let data = event.encode_log_data();
    LogRecord {
        address,
        topics: data.topics().to_vec(),
        data: data.data,
    }
}

pub const GAS_USED: u64 = 21_000;
pub const GAS_PRICE: u128 = 20_000_000_000;
pub const GAS_LIMIT: u64 = 100_000;
pub const BLOCK: u64 = 21_784_863;

/// A mined transaction to serve from [`MockReader`]
#[derive(Debug, Clone)]
pub struct MockTx {
    pub hash: B256,
    pub to: Option<Address>,
    pub input: Bytes,
    pub value: U256,
    pub status: Option<bool>,
    pub logs: Vec<LogRecord>,
}

impl MockTx {
    pub fn call(hash: B256, to: Address, input: impl Into<Bytes>) -> Self {
        Self {
            hash,
            to: Some(to),
            input: input.into(),
            value: U256::ZERO,
            status: Some(true),
            logs: vec![],
        }
    }

    pub fn deploy(hash: B256, input: impl Into<Bytes>) -> Self {
        Self { to: None, ..Self::call(hash, Address::ZERO, input) }
    }

    pub fn failed(mut self) -> Self {
        self.status = Some(false);
        self
    }

    pub fn with_value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }

    pub fn with_logs(mut self, logs: Vec<LogRecord>) -> Self {
        self.logs = logs;
        self
    }
}

/// In-memory [`ChainReader`]
#[derive(Debug, Default)]
pub struct MockReader {
    receipts: HashMap<B256, ReceiptRecord>,
    transactions: HashMap<B256, TransactionRecord>,
    timestamps: HashMap<u64, u64>,
    call_outcome: Option<CallOutcome>,
    calls: Mutex<Vec<SimulatedCall>>,
    transaction_lookups_fail: bool,
    transaction_lookups: Mutex<usize>,
}

impl MockReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tx(mut self, tx: MockTx) -> Self {
        self.receipts.insert(
            tx.hash,
            ReceiptRecord {
                transaction_hash: tx.hash,
                from: SENDER,
                to: tx.to,
                status: tx.status,
                block_number: Some(BLOCK),
                gas_used: GAS_USED,
                effective_gas_price: GAS_PRICE,
                contract_address: tx.to.is_none().then_some(DEPLOYED),
                logs: tx.logs,
            },
        );
        self.transactions.insert(
            tx.hash,
            TransactionRecord {
                from: SENDER,
                to: tx.to,
                value: tx.value,
                input: tx.input,
                gas_limit: GAS_LIMIT,
                gas_price: Some(GAS_PRICE),
            },
        );
        self.timestamps.insert(BLOCK, 1_700_000_000);
        self
    }

    /// Outcome returned for every simulated call
    pub fn with_call_outcome(mut self, outcome: CallOutcome) -> Self {
        self.call_outcome = Some(outcome);
        self
    }

    pub fn recorded_calls(&self) -> Vec<SimulatedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Make every transaction lookup fail with a node error
    pub fn with_failing_transaction_lookups(mut self) -> Self {
        self.transaction_lookups_fail = true;
        self
    }

    pub fn transaction_lookups(&self) -> usize {
        *self.transaction_lookups.lock().unwrap()
    }
}

#[async_trait]
impl ChainReader for MockReader {
    async fn receipt(&self, hash: B256) -> Result<Option<ReceiptRecord>, TransportError> {
        Ok(self.receipts.get(&hash).cloned())
    }

    async fn transaction(&self, hash: B256) -> Result<Option<TransactionRecord>, TransportError> {
        *self.transaction_lookups.lock().unwrap() += 1;
        if self.transaction_lookups_fail {
            return Err(TransportErrorKind::custom_str("transaction lookup failed"));
        }
        Ok(self.transactions.get(&hash).cloned())
    }

    async fn block_timestamp(&self, number: u64) -> Result<Option<u64>, TransportError> {
        Ok(self.timestamps.get(&number).copied())
    }

    async fn call(&self, call: &SimulatedCall) -> Result<CallOutcome, TransportError> {
        self.calls.lock().unwrap().push(call.clone());
        Ok(self
            .call_outcome
            .clone()
            .unwrap_or_else(|| CallOutcome::Success(Bytes::new())))
    }
}
