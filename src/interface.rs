//! Decoding against a single contract interface
//!
//! Each [`ContractDescriptor`] can try to interpret call data, deployment
//! data, receipt logs and revert payloads. Per-descriptor attempts return
//! `Option` so the matcher can move on to the next candidate; log decoding
//! happens after a match and reports a [`DecodeError`] instead.

use alloy::{
    dyn_abi::{DynSolValue, EventExt, JsonAbiExt},
    primitives::hex,
};
use tracing::trace;

use crate::{
    errors::DecodeError,
    types::{ContractDescriptor, DecodedCall, DecodedEvent, DecodedRevert, LogRecord},
    utils::error_utils::{decode_builtin_error, decode_with_error},
    value::{flatten_args, DecodedValue},
};

impl ContractDescriptor {
    /// Decode call data as a call to one of this interface's functions
    ///
    /// Returns `None` when the selector is unknown or the arguments do not
    /// decode against the function inputs.
    pub fn parse_call(&self, input: &[u8]) -> Option<DecodedCall> {
        let (selector, payload) = input.split_first_chunk::<4>()?;
        let function = self
            .abi
            .functions()
            .find(|function| function.selector().0 == *selector)?;
        let values = function.abi_decode_input(payload).ok()?;

        trace!(name = %function.name, "decoded function call");
        Some(DecodedCall {
            name: function.name.clone(),
            selector: hex::encode_prefixed(selector),
            args: flatten_args(DecodedValue::from_params(values, &function.inputs)),
        })
    }

    /// Decode deployment data as this contract's creation code plus
    /// constructor arguments
    ///
    /// Requires bytecode; the input must start with it. An interface without
    /// a constructor decodes to an empty argument list.
    pub fn parse_constructor(&self, input: &[u8]) -> Option<DecodedCall> {
        let bytecode = self.bytecode.as_ref()?;
        let encoded_args = input.strip_prefix(&bytecode[..])?;

        let args = match &self.abi.constructor {
            Some(constructor) if !constructor.inputs.is_empty() => {
                let values = constructor.abi_decode_input(encoded_args).ok()?;
                flatten_args(DecodedValue::from_params(values, &constructor.inputs))
            }
            _ => Vec::new(),
        };

        Some(DecodedCall {
            name: String::new(),
            selector: String::new(),
            args,
        })
    }

    /// Decode a receipt log against this interface's events
    ///
    /// # Arguments
    /// * `log` - Log to decode
    /// * `index` - Position of the log in the receipt, used for error reporting
    ///
    /// # Errors
    /// * `DecodeError::UnknownEvent` - No non-anonymous event has the log's topic0
    /// * `DecodeError::EventDecode` - The event matched but topics or data are malformed
    pub fn parse_log(&self, log: &LogRecord, index: usize) -> Result<DecodedEvent, DecodeError> {
        let topic0 = log.topics.first().copied();
        let event = topic0
            .and_then(|topic0| {
                self.abi
                    .events()
                    .find(|event| !event.anonymous && event.selector() == topic0)
            })
            .ok_or(DecodeError::UnknownEvent { index, address: log.address, topic: topic0 })?;

        let decoded = event
            .decode_log_parts(log.topics.iter().copied(), &log.data)
            .map_err(|e| DecodeError::EventDecode { index, reason: e.to_string() })?;

        // Indexed and body values come back separately; restore declaration order
        let mut indexed = decoded.indexed.into_iter();
        let mut body = decoded.body.into_iter();
        let values: Vec<DynSolValue> = event
            .inputs
            .iter()
            .map_while(|param| if param.indexed { indexed.next() } else { body.next() })
            .collect();
        if values.len() != event.inputs.len() {
            return Err(DecodeError::EventDecode {
                index,
                reason: format!("expected {} values, decoded {}", event.inputs.len(), values.len()),
            });
        }

        Ok(DecodedEvent {
            name: event.name.clone(),
            args: flatten_args(DecodedValue::from_event_params(values, &event.inputs)),
        })
    }

    /// Decode revert data
    ///
    /// Built-in `Error(string)` and `Panic(uint256)` are tried before the
    /// custom errors of this interface.
    pub fn parse_error(&self, data: &[u8]) -> Option<DecodedRevert> {
        decode_builtin_error(data)
            .or_else(|| self.abi.errors().find_map(|error| decode_with_error(error, data)))
    }
}
