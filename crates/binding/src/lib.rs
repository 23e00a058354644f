//! Contract bindings for all external contracts.
//!
//! This crate consolidates all Solidity contract interfaces used by the syncer:
//! - Redemptions app (token list, redeemable token, spendable balances)
//! - Vault (per-token balances, initialization block)
//! - ERC20 tokens, including legacy `bytes32` metadata tokens
//!
//! All bindings are generated using alloy's `sol!` macro.

pub mod redemptions;
pub mod token;
pub mod vault;
