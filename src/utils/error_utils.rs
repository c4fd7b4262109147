//! Revert payload decoding utilities
//!
//! This module decodes revert data into [`DecodedRevert`]:
//! - Solidity `Error(string)` (selector: 0x08c379a0)
//! - Solidity `Panic(uint256)` (selector: 0x4e487b71)
//! - Custom errors declared in a contract ABI
//!
//! Common error scenarios that this module handles:
//! - Revert with string message (`require(cond, "msg")`)
//! - Assertion failures and arithmetic checks (panics)
//! - Solidity 0.8.4+ custom errors

use alloy::{
    dyn_abi::JsonAbiExt,
    json_abi::{Error, Param},
    primitives::{hex, U256},
};
use once_cell::sync::Lazy;

use crate::types::DecodedRevert;
use crate::value::{flatten_args, DecodedValue};

/// Selector of `Error(string)`
pub const ERROR_STRING_SELECTOR: &str = "0x08c379a0";

/// Selector of `Panic(uint256)`
pub const PANIC_SELECTOR: &str = "0x4e487b71";

/// Errors every Solidity contract can revert with, regardless of its ABI
static BUILTIN_ERRORS: Lazy<Vec<Error>> = Lazy::new(|| {
    let unnamed = |ty: &str| Param {
        ty: ty.to_string(),
        name: String::new(),
        components: vec![],
        internal_type: None,
    };
    vec![
        Error { name: "Error".to_string(), inputs: vec![unnamed("string")] },
        Error { name: "Panic".to_string(), inputs: vec![unnamed("uint256")] },
    ]
});

/// Decode revert data against a single error definition
///
/// Returns `None` if the selector differs or the arguments fail to decode.
pub fn decode_with_error(error: &Error, data: &[u8]) -> Option<DecodedRevert> {
    let (selector, payload) = data.split_first_chunk::<4>()?;
    if error.selector().0 != *selector {
        return None;
    }
    let values = error.abi_decode_input(payload).ok()?;
    Some(DecodedRevert {
        name: error.name.clone(),
        selector: hex::encode_prefixed(selector),
        args: flatten_args(DecodedValue::from_params(values, &error.inputs)),
    })
}

/// Decode `Error(string)` and `Panic(uint256)` revert data
///
/// # Arguments
/// * `data` - Raw revert bytes, including the selector
///
/// # Returns
/// * `Some(DecodedRevert)` - Decoded built-in error with one positional argument
/// * `None` - If the data is not a well-formed built-in error
///
/// # Example
/// ```
/// use alloy::primitives::hex;
/// use tx_analyzer::utils::error_utils::decode_builtin_error;
///
/// let data = hex::decode("08c379a000000000000000000000000000000000000000000000000000000000000000200000000000000000000000000000000000000000000000000000000000000014496e73756666696369656e742062616c616e6365000000000000000000000000").unwrap();
/// let revert = decode_builtin_error(&data).unwrap();
/// assert_eq!(revert.name, "Error");
/// assert_eq!(revert.reason(), Some("Insufficient balance".to_string()));
/// ```
pub fn decode_builtin_error(data: &[u8]) -> Option<DecodedRevert> {
    BUILTIN_ERRORS
        .iter()
        .find_map(|error| decode_with_error(error, data))
}

/// Describe a Solidity panic code
pub fn describe_panic(code: U256) -> String {
    let code = match u64::try_from(code) {
        Ok(code) => code,
        Err(_) => return format!("Panic: Unknown error code (0x{code:x})"),
    };
    match code {
        0x00 => "Panic: Generic compiler panic".to_string(),
        0x01 => "Panic: Assertion failed".to_string(),
        0x11 => "Panic: Arithmetic overflow".to_string(),
        0x12 => "Panic: Division by zero".to_string(),
        0x21 => "Panic: Invalid enum value".to_string(),
        0x22 => "Panic: Invalid storage byte array encoding".to_string(),
        0x31 => "Panic: Pop on empty array".to_string(),
        0x32 => "Panic: Array access out of bounds".to_string(),
        0x41 => "Panic: Out of memory".to_string(),
        0x51 => "Panic: Call to zero-initialized function".to_string(),
        code => format!("Panic: Unknown error code (0x{code:x})"),
    }
}
