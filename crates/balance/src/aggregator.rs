//! Scatter-gather resolution of vault balances.

use crate::{BalanceEntry, MetadataCache, TextField, TokenSource};
use alloy_primitives::Address;
use config::{fallback_decimals, fallback_text, is_token_verified, NetworkType};
use futures::future::try_join_all;
use tracing::{debug, warn};

/// Builds [`BalanceEntry`] lists for the vault.
///
/// Every token is resolved concurrently, and within a token the balance and
/// the three metadata fields are resolved concurrently too. The output keeps
/// the order of the input list.
pub struct BalanceAggregator<'a, S> {
    source: &'a S,
    cache: &'a MetadataCache,
    vault: Address,
    native_token: Address,
    network: NetworkType,
}

impl<'a, S> BalanceAggregator<'a, S>
where
    S: TokenSource,
{
    pub const fn new(
        source: &'a S,
        cache: &'a MetadataCache,
        vault: Address,
        native_token: Address,
        network: NetworkType,
    ) -> Self {
        Self {
            source,
            cache,
            vault,
            native_token,
            network,
        }
    }

    /// Resolve a balance entry for every token in `tokens`.
    ///
    /// Fails if any vault balance query fails. Metadata failures never fail
    /// the call; they degrade to fallback or default values.
    pub async fn balances(&self, tokens: &[Address]) -> eyre::Result<Vec<BalanceEntry>> {
        debug!(count = tokens.len(), vault = %self.vault, "Resolving vault balances");

        try_join_all(tokens.iter().map(|token| self.balance_entry(*token))).await
    }

    async fn balance_entry(&self, token: Address) -> eyre::Result<BalanceEntry> {
        let (amount, decimals, name, symbol) = futures::join!(
            self.source.vault_balance(self.vault, token),
            self.load_decimals(token),
            self.load_text(token, TextField::Name),
            self.load_text(token, TextField::Symbol),
        );

        Ok(BalanceEntry {
            address: token,
            name,
            symbol,
            decimals,
            amount: amount?,
            verified: self.is_verified(token),
        })
    }

    fn is_verified(&self, token: Address) -> bool {
        is_token_verified(token, self.network) || token == self.native_token
    }

    async fn load_decimals(&self, token: Address) -> u8 {
        if let Some(decimals) = self.cache.decimals(&token) {
            return decimals;
        }

        match self.source.token_decimals(token).await {
            Ok(decimals) => {
                self.cache.set_decimals(token, decimals);
                decimals
            }
            Err(e) => {
                warn!(token = %token, error = %e, "Failed to fetch decimals, using fallback");
                fallback_decimals(token, self.network).unwrap_or_default()
            }
        }
    }

    async fn load_text(&self, token: Address, field: TextField) -> String {
        if let Some(text) = self.cache.text(&token, field) {
            return text;
        }

        let fetched = match field {
            TextField::Name => self.source.token_name(token).await,
            TextField::Symbol => self.source.token_symbol(token).await,
        };

        match fetched {
            Ok(text) if !text.is_empty() => {
                self.cache.set_text(token, field, text.clone());
                return text;
            }
            Ok(_) => debug!(token = %token, field = ?field, "Empty metadata, using fallback"),
            Err(e) => {
                warn!(token = %token, field = ?field, error = %e, "Failed to fetch metadata, using fallback")
            }
        }

        fallback_text(token, field.into(), self.network)
            .map(str::to_string)
            .unwrap_or_default()
    }
}
