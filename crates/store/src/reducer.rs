//! State transition function.

use crate::{
    event::{Event, LedgerLog},
    ledger::Ledger,
    settings::Settings,
    state::{AppState, RedeemableToken},
};
use alloy_primitives::Address;
use balance::{BalanceAggregator, BalanceEntry, MetadataCache};
use std::sync::Arc;
use tracing::debug;

/// Folds one event into the next state.
pub struct Reducer<L> {
    ledger: Arc<L>,
    cache: Arc<MetadataCache>,
    settings: Settings,
}

impl<L> Reducer<L>
where
    L: Ledger,
{
    pub const fn new(ledger: Arc<L>, cache: Arc<MetadataCache>, settings: Settings) -> Self {
        Self {
            ledger,
            cache,
            settings,
        }
    }

    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Produce the state that follows `state` after `event`.
    ///
    /// `state` is never modified. On error the caller keeps `state`.
    pub async fn reduce(&self, state: &AppState, event: &Event) -> eyre::Result<AppState> {
        match event {
            Event::Initialization => self.initialize_state(state).await,
            Event::AccountChanged(account) => self.update_connected_account(state, *account).await,
            Event::LedgerLog(log) if self.is_vault_log(log) => {
                // Vault events carry no handler; token changes surface through app events.
                debug!(kind = ?log.kind, block = ?log.block_number, "Ignoring vault event");
                Ok(state.clone())
            }
            Event::LedgerLog(log) => {
                debug!(kind = ?log.kind, block = ?log.block_number, "Redemptions event");
                self.update_on_redemption(state).await
            }
        }
    }

    fn is_vault_log(&self, log: &LedgerLog) -> bool {
        log.address == self.settings.vault
    }

    async fn initialize_state(&self, state: &AppState) -> eyre::Result<AppState> {
        let (redeemable_token, tokens) =
            futures::try_join!(self.redeemable_token_data(), self.update_tokens())?;

        Ok(AppState {
            redeemable_token: RedeemableToken {
                account_balance: state.redeemable_token.account_balance,
                ..redeemable_token
            },
            tokens,
        })
    }

    async fn update_connected_account(
        &self,
        state: &AppState,
        account: Address,
    ) -> eyre::Result<AppState> {
        let balance = self.ledger.spendable_balance_of(account).await?;
        debug!(account = %account, balance = %balance, "Updated account balance");

        Ok(AppState {
            redeemable_token: RedeemableToken {
                account_balance: Some(balance),
                ..state.redeemable_token.clone()
            },
            tokens: state.tokens.clone(),
        })
    }

    async fn update_on_redemption(&self, state: &AppState) -> eyre::Result<AppState> {
        let (total_supply, tokens) = futures::try_join!(
            self.ledger.total_supply(self.settings.redeemable_token),
            self.update_tokens()
        )?;

        Ok(AppState {
            redeemable_token: RedeemableToken {
                total_supply,
                ..state.redeemable_token.clone()
            },
            tokens,
        })
    }

    async fn update_tokens(&self) -> eyre::Result<Vec<BalanceEntry>> {
        let tokens = self.ledger.tokens().await?;

        BalanceAggregator::new(
            self.ledger.as_ref(),
            &self.cache,
            self.settings.vault,
            self.settings.native_token,
            self.settings.network,
        )
        .balances(&tokens)
        .await
    }

    async fn redeemable_token_data(&self) -> eyre::Result<RedeemableToken> {
        let token = self.settings.redeemable_token;
        let (symbol, decimals, total_supply) = futures::try_join!(
            self.ledger.token_symbol(token),
            self.ledger.token_decimals(token),
            self.ledger.total_supply(token)
        )?;

        Ok(RedeemableToken {
            symbol,
            decimals,
            total_supply,
            account_balance: None,
        })
    }
}
