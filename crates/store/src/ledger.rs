//! External contracts the store depends on.

use crate::event::LedgerLog;
use alloy_primitives::{Address, U256};
use balance::TokenSource;
use config::NetworkType;
use futures::stream::BoxStream;
use std::future::Future;

/// Stream of contract logs in arrival order.
pub type LogStream = BoxStream<'static, LedgerLog>;

/// Calls against the redemptions app, its vault and the redeemable token.
///
/// Token and vault balance calls come from the [`TokenSource`] supertrait.
pub trait Ledger: TokenSource {
    /// `vault()` of the app.
    fn vault(&self) -> impl Future<Output = eyre::Result<Address>> + Send;

    /// `getRedeemableToken()` of the app.
    fn redeemable_token(&self) -> impl Future<Output = eyre::Result<Address>> + Send;

    /// Identity of the connected network.
    fn network(&self) -> impl Future<Output = eyre::Result<NetworkType>> + Send;

    /// `getTokens()` of the app, in on-chain order.
    fn tokens(&self) -> impl Future<Output = eyre::Result<Vec<Address>>> + Send;

    /// `spendableBalanceOf(account)` of the app.
    fn spendable_balance_of(
        &self,
        account: Address,
    ) -> impl Future<Output = eyre::Result<U256>> + Send;

    /// `totalSupply()` of an ERC20 token.
    fn total_supply(&self, token: Address) -> impl Future<Output = eyre::Result<U256>> + Send;

    /// `getInitializationBlock()` of the vault.
    fn initialization_block(
        &self,
        vault: Address,
    ) -> impl Future<Output = eyre::Result<u64>> + Send;

    /// Logs emitted by `vault` and by the app contract.
    ///
    /// Starts at `from_block` when given, otherwise at the chain head.
    fn ledger_logs(&self, vault: Address, from_block: Option<u64>) -> LogStream;
}
