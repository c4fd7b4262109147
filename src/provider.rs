//! Alloy-backed chain reader
//!
//! [`RpcReader`] adapts any alloy provider on [`AnyNetwork`] to the
//! [`ChainReader`] trait, converting RPC response types into the plain
//! records the analyzer works with. [`connect`] builds one from a URL,
//! choosing HTTP or WebSocket transport by scheme.

use alloy::{
    consensus::{Eip658Value, Transaction as ConsensusTransaction},
    eips::{BlockId, BlockNumberOrTag},
    network::{AnyNetwork, TransactionResponse},
    primitives::{TxKind, B256},
    providers::{DynProvider, Provider, ProviderBuilder, WsConnect},
    rpc::types::{TransactionInput, TransactionRequest},
    transports::TransportError,
};
use async_trait::async_trait;
use tracing::debug;

use crate::{
    errors::InitError,
    traits::ChainReader,
    types::{CallOutcome, LogRecord, ReceiptRecord, SimulatedCall, TransactionRecord},
};

/// Type-erased provider over any EVM network
pub type AnyNetworkProvider = DynProvider<AnyNetwork>;

/// Connect to a node and wrap the provider in an [`RpcReader`]
///
/// URLs starting with `http` use HTTP transport; anything else is treated
/// as a WebSocket endpoint.
///
/// # Example
/// ```no_run
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// use tx_analyzer::connect;
///
/// let reader = connect("https://eth.llamarpc.com").await?;
/// # Ok(())
/// # }
/// ```
pub async fn connect(rpc_url: &str) -> Result<RpcReader, InitError> {
    let provider = if rpc_url.starts_with("http") {
        let url = rpc_url
            .parse()
            .map_err(|_| InitError::MalformedEndpoint(rpc_url.to_string()))?;
        ProviderBuilder::new()
            .network::<AnyNetwork>()
            .connect_http(url)
            .erased()
    } else {
        let ws_connect = WsConnect::new(rpc_url);
        ProviderBuilder::new_with_network::<AnyNetwork>()
            .connect_ws(ws_connect)
            .await
            .map_err(|e| InitError::SocketHandshake(e.to_string()))?
            .erased()
    };
    Ok(RpcReader::new(provider))
}

/// [`ChainReader`] backed by an alloy provider
#[derive(Debug, Clone)]
pub struct RpcReader<P = AnyNetworkProvider> {
    provider: P,
}

impl<P> RpcReader<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Access the underlying provider
    pub fn provider(&self) -> &P {
        &self.provider
    }
}

#[async_trait]
impl<P> ChainReader for RpcReader<P>
where
    P: Provider<AnyNetwork>,
{
    async fn receipt(&self, hash: B256) -> Result<Option<ReceiptRecord>, TransportError> {
        let Some(receipt) = self.provider.get_transaction_receipt(hash).await? else {
            return Ok(None);
        };

        let receipt_with_bloom = &receipt.inner.inner.inner;
        let status = match receipt_with_bloom.receipt.status {
            Eip658Value::Eip658(success) => Some(success),
            Eip658Value::PostState(_) => None,
        };
        let logs = receipt_with_bloom
            .receipt
            .logs
            .iter()
            .map(|log| LogRecord {
                address: log.address(),
                topics: log.topics().to_vec(),
                data: log.data().data.clone(),
            })
            .collect();

        Ok(Some(ReceiptRecord {
            transaction_hash: receipt.inner.transaction_hash,
            from: receipt.inner.from,
            to: receipt.inner.to,
            status,
            block_number: receipt.inner.block_number,
            gas_used: receipt.inner.gas_used,
            effective_gas_price: receipt.inner.effective_gas_price,
            contract_address: receipt.inner.contract_address,
            logs,
        }))
    }

    async fn transaction(&self, hash: B256) -> Result<Option<TransactionRecord>, TransportError> {
        let Some(tx) = self.provider.get_transaction_by_hash(hash).await? else {
            return Ok(None);
        };

        Ok(Some(TransactionRecord {
            from: TransactionResponse::from(&tx),
            to: ConsensusTransaction::to(&tx),
            value: ConsensusTransaction::value(&tx),
            input: ConsensusTransaction::input(&tx).clone(),
            gas_limit: ConsensusTransaction::gas_limit(&tx),
            gas_price: ConsensusTransaction::gas_price(&tx),
        }))
    }

    async fn block_timestamp(&self, number: u64) -> Result<Option<u64>, TransportError> {
        let block = self
            .provider
            .get_block_by_number(BlockNumberOrTag::Number(number))
            .await?;
        Ok(block.map(|block| block.header.inner.timestamp))
    }

    async fn call(&self, call: &SimulatedCall) -> Result<CallOutcome, TransportError> {
        let mut request = TransactionRequest::default()
            .from(call.from)
            .input(TransactionInput::new(call.input.clone()))
            .value(call.value)
            .gas_limit(call.gas_limit);
        request.to = Some(call.to.map_or(TxKind::Create, TxKind::Call));
        if let Some(gas_price) = call.gas_price {
            request = request.gas_price(gas_price);
        }

        let block = call
            .block
            .map_or_else(BlockId::latest, BlockId::number);
        debug!(?block, to = ?call.to, "simulating call");

        match self.provider.call(request.into()).block(block).await {
            Ok(output) => Ok(CallOutcome::Success(output)),
            Err(err) => {
                let Some(payload) = err.as_error_resp() else {
                    return Err(err);
                };
                if let Some(data) = payload.as_revert_data() {
                    return Ok(CallOutcome::Reverted(data));
                }
                // Some nodes report a bare revert without any payload
                if payload.message.contains("revert") {
                    return Ok(CallOutcome::Reverted(Default::default()));
                }
                Err(err)
            }
        }
    }
}
