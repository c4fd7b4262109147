//! Utility functions for transaction analysis
//!
//! # Modules
//!
//! - [`error_utils`]: Revert payload decoding
//!   - Solidity `Error(string)` and `Panic(uint256)`
//!   - Custom error decoding against an error definition
//!   - Panic code interpretation
//!
//! - [`format_utils`]: Human-readable amounts
//!   - Native token and gwei formatting
//!   - Transaction fee computation

/// Revert decoding utilities
pub mod error_utils;

/// Amount formatting utilities
pub mod format_utils;
