//! Application state snapshots.

use alloy_primitives::U256;
use balance::BalanceEntry;
use serde::{Deserialize, Serialize};

/// The token burned on redemption.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedeemableToken {
    pub symbol: String,
    pub decimals: u8,
    pub total_supply: U256,
    /// Spendable balance of the selected account, once one is known
    pub account_balance: Option<U256>,
}

/// One immutable application state value.
///
/// The reducer never mutates a snapshot; every processed event yields a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub redeemable_token: RedeemableToken,
    /// Vault holdings, in the app's token list order
    pub tokens: Vec<BalanceEntry>,
}
