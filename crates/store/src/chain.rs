//! [`Ledger`] backed by a JSON-RPC provider.

use crate::{
    event::LedgerLog,
    ledger::{Ledger, LogStream},
};
use alloy_primitives::{Address, U256};
use alloy_provider::Provider;
use alloy_rpc_types_eth::Filter;
use balance::{TokenMonitor, TokenSource};
use binding::{redemptions::IRedemptions, token::IERC20, vault::IVault};
use config::NetworkType;
use futures::stream;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_retry::{strategy::ExponentialBackoff, Retry};
use tracing::{debug, warn};

// Stay under the 10k block range most RPC providers allow for eth_getLogs.
const CHUNK_SIZE: u64 = 9_500;

const LOG_BUFFER: usize = 256;

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(4);

/// Calls against a deployed redemptions app.
pub struct ChainLedger<P> {
    monitor: TokenMonitor<P>,
    app: Address,
    poll_interval: Duration,
}

impl<P> ChainLedger<P>
where
    P: Provider + Clone,
{
    pub const fn new(provider: P, app: Address) -> Self {
        Self {
            monitor: TokenMonitor::new(provider),
            app,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// How often to poll for new blocks once the log backfill is done.
    pub const fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub const fn app(&self) -> Address {
        self.app
    }

    fn provider(&self) -> &P {
        self.monitor.provider()
    }
}

impl<P> TokenSource for ChainLedger<P>
where
    P: Provider + Clone,
{
    async fn vault_balance(&self, vault: Address, token: Address) -> eyre::Result<U256> {
        self.monitor.vault_balance(vault, token).await
    }

    async fn token_decimals(&self, token: Address) -> eyre::Result<u8> {
        self.monitor.token_decimals(token).await
    }

    async fn token_name(&self, token: Address) -> eyre::Result<String> {
        self.monitor.token_name(token).await
    }

    async fn token_symbol(&self, token: Address) -> eyre::Result<String> {
        self.monitor.token_symbol(token).await
    }
}

impl<P> Ledger for ChainLedger<P>
where
    P: Provider + Clone + 'static,
{
    async fn vault(&self) -> eyre::Result<Address> {
        let contract = IRedemptions::new(self.app, self.provider());
        let vault = contract.vault().call().await?;

        Ok(vault)
    }

    async fn redeemable_token(&self) -> eyre::Result<Address> {
        let contract = IRedemptions::new(self.app, self.provider());
        let token = contract.getRedeemableToken().call().await?;

        Ok(token)
    }

    async fn network(&self) -> eyre::Result<NetworkType> {
        let chain_id = self.provider().get_chain_id().await?;

        Ok(NetworkType::from_chain_id(chain_id))
    }

    async fn tokens(&self) -> eyre::Result<Vec<Address>> {
        let contract = IRedemptions::new(self.app, self.provider());
        let tokens = contract.getTokens().call().await?;

        Ok(tokens)
    }

    async fn spendable_balance_of(&self, account: Address) -> eyre::Result<U256> {
        let contract = IRedemptions::new(self.app, self.provider());
        let balance = contract.spendableBalanceOf(account).call().await?;

        Ok(balance)
    }

    async fn total_supply(&self, token: Address) -> eyre::Result<U256> {
        let contract = IERC20::new(token, self.provider());
        let supply = contract.totalSupply().call().await?;

        Ok(supply)
    }

    async fn initialization_block(&self, vault: Address) -> eyre::Result<u64> {
        let contract = IVault::new(vault, self.provider());
        let block = contract.getInitializationBlock().call().await?;

        u64::try_from(block).map_err(|e| eyre::eyre!("Initialization block out of range: {}", e))
    }

    fn ledger_logs(&self, vault: Address, from_block: Option<u64>) -> LogStream {
        let (tx, rx) = mpsc::channel(LOG_BUFFER);
        let follower = LogFollower {
            provider: self.provider().clone(),
            addresses: vec![self.app, vault],
            poll_interval: self.poll_interval,
        };

        tokio::spawn(async move {
            follower.run(from_block, tx).await;
            debug!("Log follower stopped");
        });

        Box::pin(stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|log| (log, rx))
        }))
    }
}

/// Backfills historical logs, then polls for new ones.
struct LogFollower<P> {
    provider: P,
    addresses: Vec<Address>,
    poll_interval: Duration,
}

impl<P> LogFollower<P>
where
    P: Provider + Clone,
{
    /// Runs until the receiving side is dropped.
    ///
    /// A failed poll is retried on the next tick from the first block not yet
    /// forwarded, so no range is skipped or sent twice.
    async fn run(self, from_block: Option<u64>, tx: mpsc::Sender<LedgerLog>) {
        let mut cursor = from_block;
        let mut interval = tokio::time::interval(self.poll_interval);

        loop {
            interval.tick().await;

            if tx.is_closed() {
                return;
            }

            match self.poll(&mut cursor, &tx).await {
                Ok(true) => {}
                Ok(false) => return,
                Err(e) => {
                    warn!(from = ?cursor, error = %e, "Log poll failed, will retry");
                }
            }
        }
    }

    /// Forward logs from `cursor` up to the current head.
    ///
    /// With no cursor yet, following starts after the current head. Returns
    /// false once the receiver is gone.
    async fn poll(
        &self,
        cursor: &mut Option<u64>,
        tx: &mpsc::Sender<LedgerLog>,
    ) -> eyre::Result<bool> {
        let head = self.provider.get_block_number().await?;
        let next_block = cursor.get_or_insert(head + 1);

        if head < *next_block {
            return Ok(true);
        }

        debug!(from = *next_block, to = head, "Scanning ledger logs");
        self.scan(next_block, head, tx).await
    }

    /// Forward logs in `[*next_block, to_block]`, advancing `next_block` past
    /// every chunk sent. Returns false once the receiver is gone.
    async fn scan(
        &self,
        next_block: &mut u64,
        to_block: u64,
        tx: &mpsc::Sender<LedgerLog>,
    ) -> eyre::Result<bool> {
        for (from, to) in chunk_ranges(*next_block, to_block) {
            for log in self.scan_chunk_with_retry(from, to).await? {
                if tx.send(LedgerLog::from(log)).await.is_err() {
                    return Ok(false);
                }
            }

            *next_block = to + 1;
        }

        Ok(true)
    }

    async fn scan_chunk_with_retry(
        &self,
        from_block: u64,
        to_block: u64,
    ) -> eyre::Result<Vec<alloy_rpc_types_eth::Log>> {
        // Exponential backoff: 100ms, 200ms, 400ms, 800ms, 1.6s (max 5 retries)
        let retry_strategy = ExponentialBackoff::from_millis(2).factor(50).take(5);

        Retry::spawn(retry_strategy, || async {
            self.scan_chunk(from_block, to_block).await.map_err(|e| {
                warn!(
                    from = from_block,
                    to = to_block,
                    error = %e,
                    "Log chunk scan failed, will retry"
                );
                e
            })
        })
        .await
    }

    async fn scan_chunk(
        &self,
        from_block: u64,
        to_block: u64,
    ) -> eyre::Result<Vec<alloy_rpc_types_eth::Log>> {
        let filter = Filter::new()
            .address(self.addresses.clone())
            .from_block(from_block)
            .to_block(to_block);

        let logs = self.provider.get_logs(&filter).await?;

        Ok(logs)
    }
}

/// Split the inclusive range `[from_block, to_block]` into chunks of at most
/// `CHUNK_SIZE` blocks.
fn chunk_ranges(from_block: u64, to_block: u64) -> impl Iterator<Item = (u64, u64)> {
    (from_block..=to_block)
        .step_by(CHUNK_SIZE as usize)
        .map(move |start| (start, (start + CHUNK_SIZE - 1).min(to_block)))
}
