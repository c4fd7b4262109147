//! # EVM Transaction Analyzer
//!
//! A library for decoding mined EVM transactions into human-readable data
//! using a set of known contract ABIs.
//!
//! ## Core Features
//!
//! - **Call Decoding**
//!   - Ordered matching of call data against known interfaces
//!   - Constructor decoding for deployment transactions via creation bytecode
//!   - Nested structs and arrays flattened into ordered `{ key, value }` entries
//!
//! - **Event Decoding**
//!   - Every receipt log decoded against the matched interface
//!   - Indexed and non-indexed arguments in declaration order
//!
//! - **Revert Analysis**
//!   - Failed transactions replayed as a read-only call
//!   - Built-in `Error(string)` / `Panic(uint256)` and custom errors
//!
//! ## Features
//!
//! - `rustls-tls`: Uses rustls as the TLS implementation instead of native-tls (OpenSSL).
//!   This is useful for environments where OpenSSL is not available or not desired.
//!
//!   Usage example:
//!   ```toml
//!   [dependencies]
//!   tx-analyzer = { version = "0.1.0", default-features = false, features = ["rustls-tls"] }
//!   ```
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use tx_analyzer::{connect, stringify, AnalyzerConfig, ContractDescriptor, TxAnalyzer};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let reader = connect("https://eth-mainnet.g.alchemy.com/v2/your-api-key").await?;
//!
//! // Known contracts, in matching priority order
//! let token = ContractDescriptor::from_artifact_json(&std::fs::read_to_string("out/Token.json")?)?;
//! let vault = ContractDescriptor::from_artifact_json(&std::fs::read_to_string("out/Vault.json")?)?;
//!
//! let analyzer = TxAnalyzer::with_config(reader, vec![token, vault], AnalyzerConfig::for_chain(1));
//! let result = analyzer
//!     .analyze("0x5c504ed432cb51138bcf09aa5e8a410dd4a1e204ef84bfed1be16dfba1b22060")
//!     .await?;
//!
//! println!("{} ({})", result.contract_data.name, result.contract_data.selector);
//! for event in &result.contract_data.events {
//!     println!("  event {}", event.name);
//! }
//! if let Some(revert) = &result.revert_data {
//!     println!("reverted with {}: {:?}", revert.name, revert.reason());
//! }
//! println!("{}", stringify(&result)?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Structure
//!
//! - `analyzer`: The analysis pipeline
//! - `matcher`: Ordered interface matching
//! - `interface`: Decoding against a single contract interface
//! - `revert`: Revert reproduction and decoding
//! - `provider`: Alloy-backed chain reader
//! - `value`: Decoded value shaping, flattening and rendering
//! - `types`: Core data structures and type definitions
//! - `traits`: Trait definitions for extensibility
//! - `config`: Analyzer configuration
//! - `errors`: Error types and handling
//! - `utils`: Helper functions and utilities

pub mod analyzer;
pub mod config;
pub mod errors;
pub mod interface;
pub mod matcher;
pub mod provider;
pub mod revert;
pub mod traits;
pub mod types;
pub mod utils;
pub mod value;

// Re-export only the essential types and functions
pub use analyzer::TxAnalyzer;
pub use config::{AnalyzerConfig, SimulationBlock, TokenConfig};
pub use errors::AnalyzerError;
pub use provider::{connect, RpcReader};
pub use traits::ChainReader;
pub use types::{ContractDescriptor, TxAnalysisResult};
pub use value::stringify;
