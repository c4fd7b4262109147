//! Transaction analysis pipeline
//!
//! [`TxAnalyzer`] resolves a transaction hash into its receipt, transaction
//! and block, matches the call data against an ordered list of known
//! contracts, decodes the call and every emitted log, and for failed
//! transactions replays the call to decode the revert reason.
//!
//! # Example
//! ```no_run
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! use tx_analyzer::{connect, stringify, ContractDescriptor, TxAnalyzer};
//!
//! let reader = connect("https://eth.llamarpc.com").await?;
//! let token = ContractDescriptor::from_artifact_json(&std::fs::read_to_string("out/Token.json")?)?;
//! let analyzer = TxAnalyzer::new(reader, vec![token]);
//!
//! let result = analyzer
//!     .analyze("0x5c504ed432cb51138bcf09aa5e8a410dd4a1e204ef84bfed1be16dfba1b22060")
//!     .await?;
//! println!("{}", stringify(&result)?);
//! # Ok(())
//! # }
//! ```

use alloy::primitives::B256;
use tracing::{debug, info};

use crate::{
    config::AnalyzerConfig,
    errors::{AnalyzerError, FetchError},
    matcher::match_interface,
    revert::decode_revert,
    traits::ChainReader,
    types::{
        ContractData, ContractDescriptor, DecodedEvent, RawTransactionContext, TransactionData,
        TxAnalysisResult,
    },
    utils::format_utils::{format_gwei, format_native, transaction_fee},
};

/// Decodes transactions against an ordered list of known contracts
///
/// The descriptor list is fixed at construction; its order is the matching
/// priority. `analyze` takes `&self` and keeps no state between calls, so
/// one analyzer can serve concurrent requests.
#[derive(Debug)]
pub struct TxAnalyzer<R> {
    reader: R,
    descriptors: Vec<ContractDescriptor>,
    config: AnalyzerConfig,
}

impl<R: ChainReader> TxAnalyzer<R> {
    /// Create an analyzer with the default configuration
    pub fn new(reader: R, descriptors: Vec<ContractDescriptor>) -> Self {
        Self::with_config(reader, descriptors, AnalyzerConfig::default())
    }

    pub fn with_config(
        reader: R,
        descriptors: Vec<ContractDescriptor>,
        config: AnalyzerConfig,
    ) -> Self {
        Self { reader, descriptors, config }
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    /// Analyze a transaction given its hash as hex text
    ///
    /// # Errors
    /// Returns `AnalyzerError::InvalidTxHash` if the text is not a 32-byte
    /// hex hash or the node has no receipt for it; see [`Self::analyze_hash`]
    /// for the remaining cases.
    pub async fn analyze(&self, tx_hash: &str) -> Result<TxAnalysisResult, AnalyzerError> {
        let hash: B256 = tx_hash
            .trim()
            .parse()
            .map_err(|_| AnalyzerError::InvalidTxHash(tx_hash.to_string()))?;
        self.analyze_hash(hash).await
    }

    /// Analyze a transaction
    ///
    /// # Errors
    /// * `InvalidTxHash` - No receipt exists for the hash
    /// * `ContractNotFound` / `ConstructorTransaction` - No descriptor matches
    /// * `Fetch` - Transaction or block missing for an existing receipt
    /// * `Decode` - A log or the revert payload could not be decoded
    /// * `Transport` - Any node failure
    pub async fn analyze_hash(&self, hash: B256) -> Result<TxAnalysisResult, AnalyzerError> {
        let ctx = self.fetch_context(hash).await?;
        info!(hash = %ctx.hash, status = ?ctx.status, "analyzing transaction");

        let (index, call) =
            match_interface(&self.descriptors, &ctx.input, ctx.is_constructor_transaction())?;
        let descriptor = &self.descriptors[index];

        let events = ctx
            .logs
            .iter()
            .enumerate()
            .map(|(i, log)| descriptor.parse_log(log, i))
            .collect::<Result<Vec<DecodedEvent>, _>>()?;
        debug!(count = events.len(), "decoded events");

        let revert_data = if ctx.is_success() {
            None
        } else {
            Some(decode_revert(&self.reader, &ctx, descriptor, self.config.simulation_block).await?)
        };

        Ok(TxAnalysisResult {
            transaction_data: self.transaction_data(&ctx),
            contract_data: ContractData {
                name: call.name,
                selector: call.selector,
                args: call.args,
                events,
            },
            revert_data,
        })
    }

    /// Resolve a hash into receipt, transaction and block timestamp
    pub async fn fetch_context(&self, hash: B256) -> Result<RawTransactionContext, AnalyzerError> {
        // An unknown hash must surface as InvalidTxHash, so the transaction
        // lookup only runs once a receipt exists.
        let receipt = self
            .reader
            .receipt(hash)
            .await?
            .ok_or_else(|| AnalyzerError::InvalidTxHash(hash.to_string()))?;
        let transaction = self
            .reader
            .transaction(hash)
            .await?
            .ok_or(FetchError::TransactionMissing(hash))?;
        let block_number = receipt.block_number.ok_or(FetchError::PendingReceipt(hash))?;
        let block_timestamp = self
            .reader
            .block_timestamp(block_number)
            .await?
            .ok_or(FetchError::BlockMissing(block_number))?;

        Ok(RawTransactionContext {
            hash: receipt.transaction_hash,
            from: receipt.from,
            to: receipt.to,
            status: receipt.status,
            block_number,
            block_timestamp,
            value: transaction.value,
            gas_price: receipt.effective_gas_price,
            gas_used: receipt.gas_used,
            gas_limit: transaction.gas_limit,
            tx_gas_price: transaction.gas_price,
            input: transaction.input,
            contract_address: receipt.contract_address,
            logs: receipt.logs,
        })
    }

    fn transaction_data(&self, ctx: &RawTransactionContext) -> TransactionData {
        let token = &self.config.native_token;
        TransactionData {
            hash: ctx.hash,
            from: ctx.from,
            to: ctx.to,
            status: ctx.status.map(u8::from),
            block_number: ctx.block_number,
            block_timestamp: ctx.block_timestamp,
            is_constructor_transaction: ctx.is_constructor_transaction(),
            contract_address: ctx.contract_address,
            tx_value: format_native(ctx.value, token),
            tx_gas_price: format_gwei(ctx.gas_price),
            tx_gas_used: format_native(transaction_fee(ctx.gas_price, ctx.gas_used), token),
        }
    }
}
