//! Ordered interface matching
//!
//! Candidates are tried in list order and the first one that decodes the
//! call data wins. Deployment transactions fall back to matching the
//! descriptor's creation bytecode.

use alloy::primitives::hex;
use tracing::debug;

use crate::{
    errors::AnalyzerError,
    types::{ContractDescriptor, DecodedCall},
};

/// Find the first descriptor that decodes `input`
///
/// # Arguments
/// * `descriptors` - Candidate interfaces, in priority order
/// * `input` - Transaction call data
/// * `is_deployment` - Whether the transaction has no recipient
///
/// # Returns
/// * `Ok((index, call))` - Index of the matched descriptor and the decoded call
/// * `Err(AnalyzerError::ContractNotFound)` - No descriptor knows the selector
/// * `Err(AnalyzerError::ConstructorTransaction)` - Deployment matching no bytecode
pub fn match_interface(
    descriptors: &[ContractDescriptor],
    input: &[u8],
    is_deployment: bool,
) -> Result<(usize, DecodedCall), AnalyzerError> {
    for (index, descriptor) in descriptors.iter().enumerate() {
        if let Some(call) = descriptor.parse_call(input) {
            debug!(index, name = %call.name, "matched function call");
            return Ok((index, call));
        }

        if is_deployment && descriptor.bytecode.is_some() {
            if let Some(call) = descriptor.parse_constructor(input) {
                debug!(index, "matched constructor bytecode");
                return Ok((index, call));
            }
            debug!(index, "constructor bytecode did not match");
        }
    }

    if is_deployment {
        Err(AnalyzerError::ConstructorTransaction)
    } else {
        Err(AnalyzerError::ContractNotFound(hex::encode_prefixed(
            &input[..input.len().min(4)],
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::{json_abi::JsonAbi, primitives::Bytes};

    fn descriptor(abi: &str) -> ContractDescriptor {
        ContractDescriptor::new(serde_json::from_str::<JsonAbi>(abi).unwrap())
    }

    const PAUSE_ABI: &str = r#"[{"type":"function","name":"pause","inputs":[],"outputs":[],"stateMutability":"nonpayable"}]"#;
    const EMPTY_ABI: &str = "[]";

    #[test]
    fn test_first_match_wins() {
        let input = hex::decode("8456cb59").unwrap();
        let descriptors = [descriptor(EMPTY_ABI), descriptor(PAUSE_ABI), descriptor(PAUSE_ABI)];
        let (index, call) = match_interface(&descriptors, &input, false).unwrap();
        assert_eq!(index, 1);
        assert_eq!(call.name, "pause");
        assert!(call.args.is_empty());
    }

    #[test]
    fn test_contract_not_found_reports_selector() {
        let descriptors = [descriptor(PAUSE_ABI)];
        let err = match_interface(&descriptors, &hex::decode("deadbeef0011").unwrap(), false)
            .unwrap_err();
        assert!(matches!(err, AnalyzerError::ContractNotFound(ref s) if s == "0xdeadbeef"));

        let err = match_interface(&descriptors, &[0xab, 0xcd], false).unwrap_err();
        assert!(matches!(err, AnalyzerError::ContractNotFound(ref s) if s == "0xabcd"));
    }

    #[test]
    fn test_deployment_fallback() {
        let bytecode = Bytes::from(vec![0x60, 0x80]);
        let descriptors = [
            descriptor(PAUSE_ABI),
            descriptor(EMPTY_ABI).with_bytecode(bytecode.clone()),
        ];
        let (index, call) = match_interface(&descriptors, &bytecode, true).unwrap();
        assert_eq!(index, 1);
        assert_eq!(call.name, "");
        assert_eq!(call.selector, "");

        let err = match_interface(&descriptors, &[0x61, 0x00], true).unwrap_err();
        assert!(matches!(err, AnalyzerError::ConstructorTransaction));

        // Bytecode is never consulted for calls to an existing contract
        let err = match_interface(&descriptors, &bytecode, false).unwrap_err();
        assert!(matches!(err, AnalyzerError::ContractNotFound(_)));
    }
}
