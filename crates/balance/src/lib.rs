//! Vault balances and token metadata.
//!
//! This crate resolves, for an ordered list of token addresses, the vault's
//! balance of each token together with its decimals, name, symbol and
//! verification status. Token metadata is cached per process; balances never are.

pub mod aggregator;
pub mod cache;
pub mod monitor;

pub use aggregator::BalanceAggregator;
pub use cache::{MetadataCache, TextField};
pub use monitor::TokenMonitor;

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use std::future::Future;

/// One row of the vault's token holdings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceEntry {
    /// Token address (zero address for the native asset)
    pub address: Address,
    /// Token name, empty if unknown
    pub name: String,
    /// Token symbol, empty if unknown
    pub symbol: String,
    /// Token decimals, zero if unknown
    pub decimals: u8,
    /// Amount of the token held by the vault
    pub amount: U256,
    /// Whether the token is on the network's curated list (or is the native asset)
    pub verified: bool,
}

/// External token calls needed to build [`BalanceEntry`] values.
pub trait TokenSource: Send + Sync {
    /// Balance of `token` held by `vault`.
    fn vault_balance(
        &self,
        vault: Address,
        token: Address,
    ) -> impl Future<Output = eyre::Result<U256>> + Send;

    /// `decimals()` of an ERC20 token.
    fn token_decimals(&self, token: Address) -> impl Future<Output = eyre::Result<u8>> + Send;

    /// `name()` of an ERC20 token.
    fn token_name(&self, token: Address) -> impl Future<Output = eyre::Result<String>> + Send;

    /// `symbol()` of an ERC20 token.
    fn token_symbol(&self, token: Address) -> impl Future<Output = eyre::Result<String>> + Send;
}
