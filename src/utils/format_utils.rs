//! Amount formatting helpers
//!
//! Renders wei amounts as human-readable unit strings, trimming trailing
//! zeros down to a single decimal digit (`1.0 ETH`, `12.5 Gwei`).

use alloy::primitives::{utils::format_units, U256};

use crate::config::TokenConfig;

/// Format a wei amount in the native token's units, e.g. `"0.12 ETH"`
pub fn format_native(amount: U256, token: &TokenConfig) -> String {
    format!("{} {}", format_decimal(amount, token.decimals), token.symbol)
}

/// Format a gas price in gwei, e.g. `"25.5 Gwei"`
pub fn format_gwei(gas_price: u128) -> String {
    format!("{} Gwei", format_decimal(U256::from(gas_price), 9))
}

/// Fee paid by a transaction: `gas_price * gas_used`
pub fn transaction_fee(gas_price: u128, gas_used: u64) -> U256 {
    U256::from(gas_price).saturating_mul(U256::from(gas_used))
}

fn format_decimal(amount: U256, decimals: u8) -> String {
    match format_units(amount, decimals) {
        Ok(formatted) => trim_fraction(&formatted),
        Err(_) => amount.to_string(),
    }
}

fn trim_fraction(formatted: &str) -> String {
    match formatted.split_once('.') {
        Some((whole, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            if fraction.is_empty() {
                format!("{whole}.0")
            } else {
                format!("{whole}.{fraction}")
            }
        }
        None => format!("{formatted}.0"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_native() {
        let eth = TokenConfig::default();
        assert_eq!(format_native(U256::from(10u64).pow(U256::from(18)), &eth), "1.0 ETH");
        assert_eq!(format_native(U256::from(120_000_000_000_000_000u64), &eth), "0.12 ETH");
        assert_eq!(format_native(U256::ZERO, &eth), "0.0 ETH");

        let six = TokenConfig { symbol: "USDC".into(), decimals: 6 };
        assert_eq!(format_native(U256::from(1_500_000u64), &six), "1.5 USDC");
    }

    #[test]
    fn test_format_gwei() {
        assert_eq!(format_gwei(25_500_000_000), "25.5 Gwei");
        assert_eq!(format_gwei(1), "0.000000001 Gwei");
    }

    #[test]
    fn test_transaction_fee() {
        let fee = transaction_fee(20_000_000_000, 21_000);
        assert_eq!(fee, U256::from(420_000_000_000_000u64));
        assert_eq!(format_native(fee, &TokenConfig::default()), "0.00042 ETH");
    }

    #[test]
    fn test_trim_fraction() {
        assert_eq!(trim_fraction("12"), "12.0");
        assert_eq!(trim_fraction("12.000"), "12.0");
        assert_eq!(trim_fraction("12.010"), "12.01");
    }
}
