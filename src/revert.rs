//! Revert reproduction and decoding
//!
//! Receipts do not carry revert data, so a failed transaction is replayed
//! as a read-only call and the returned payload is decoded against the
//! matched interface.

use tracing::{debug, warn};

use crate::{
    config::SimulationBlock,
    errors::{AnalyzerError, DecodeError},
    traits::ChainReader,
    types::{CallOutcome, ContractDescriptor, DecodedRevert, RawTransactionContext, SimulatedCall},
};

/// Build the read-only call that replays `ctx`
pub fn simulated_call(ctx: &RawTransactionContext, block: SimulationBlock) -> SimulatedCall {
    SimulatedCall {
        from: ctx.from,
        to: ctx.to,
        input: ctx.input.clone(),
        value: ctx.value,
        gas_limit: ctx.gas_limit,
        gas_price: ctx.tx_gas_price,
        block: block.resolve(ctx.block_number),
    }
}

/// Replay a failed transaction and decode its revert payload
///
/// # Errors
/// * `DecodeError::RevertNotReproduced` - The replayed call succeeded
/// * `DecodeError::UnknownRevert` - The payload matches no known error
/// * `AnalyzerError::Transport` - The node call itself failed
pub async fn decode_revert<R: ChainReader + ?Sized>(
    reader: &R,
    ctx: &RawTransactionContext,
    descriptor: &ContractDescriptor,
    block: SimulationBlock,
) -> Result<DecodedRevert, AnalyzerError> {
    let call = simulated_call(ctx, block);
    debug!(hash = %ctx.hash, block = ?call.block, "replaying failed transaction");

    let data = match reader.call(&call).await? {
        CallOutcome::Reverted(data) => data,
        CallOutcome::Success(_) => {
            warn!(hash = %ctx.hash, "failed transaction did not revert when replayed");
            return Err(DecodeError::RevertNotReproduced.into());
        }
    };

    descriptor
        .parse_error(&data)
        .ok_or_else(|| DecodeError::UnknownRevert { data }.into())
}
