//! Analyzer configuration
//!
//! Provides:
//! - Native token settings used when formatting values and fees
//! - The block context used to reproduce reverts
//! - Defaults for well-known chains

use serde::Serialize;

/// Token configuration including symbol and decimals
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenConfig {
    /// Token symbol (e.g., "ETH", "BNB")
    pub symbol: String,
    /// Number of decimal places
    pub decimals: u8,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self { symbol: "ETH".into(), decimals: 18 }
    }
}

/// Get default native token configuration for known chains
pub fn get_default_native_token(chain_id: u64) -> TokenConfig {
    match chain_id {
        1 => TokenConfig { symbol: "ETH".into(), decimals: 18 },
        10 => TokenConfig { symbol: "ETH".into(), decimals: 18 },
        56 => TokenConfig { symbol: "BNB".into(), decimals: 18 },
        100 => TokenConfig { symbol: "xDAI".into(), decimals: 18 },
        137 => TokenConfig { symbol: "POL".into(), decimals: 18 },
        8453 => TokenConfig { symbol: "ETH".into(), decimals: 18 },
        42161 => TokenConfig { symbol: "ETH".into(), decimals: 18 },
        43114 => TokenConfig { symbol: "AVAX".into(), decimals: 18 },
        11155111 => TokenConfig { symbol: "SepoliaETH".into(), decimals: 18 },
        // Default to ETH configuration for unknown chains
        _ => TokenConfig::default(),
    }
}

/// Block state used when re-simulating a failed transaction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum SimulationBlock {
    /// State at the end of the parent block (closest to pre-transaction state)
    #[default]
    Parent,
    /// State at the end of the block that included the transaction
    Inclusion,
    /// Latest state of the node
    Latest,
}

impl SimulationBlock {
    /// Resolve the block number to simulate at, `None` meaning latest
    pub fn resolve(self, inclusion_block: u64) -> Option<u64> {
        match self {
            SimulationBlock::Parent => Some(inclusion_block.saturating_sub(1)),
            SimulationBlock::Inclusion => Some(inclusion_block),
            SimulationBlock::Latest => None,
        }
    }
}

/// Analyzer configuration parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// Native token used to format value and fee amounts
    pub native_token: TokenConfig,
    /// Block context for revert reproduction
    pub simulation_block: SimulationBlock,
}

impl AnalyzerConfig {
    /// Configuration with the native token of a known chain
    pub fn for_chain(chain_id: u64) -> Self {
        Self {
            native_token: get_default_native_token(chain_id),
            ..Default::default()
        }
    }

    pub fn with_native_token(mut self, native_token: TokenConfig) -> Self {
        self.native_token = native_token;
        self
    }

    pub fn with_simulation_block(mut self, simulation_block: SimulationBlock) -> Self {
        self.simulation_block = simulation_block;
        self
    }
}
