//! One-time resolution of contract addresses and network identity.

use crate::{error::BootstrapError, ledger::Ledger};
use alloy_primitives::Address;
use balance::MetadataCache;
use config::{NetworkType, ETHER_DECIMALS, ETHER_NAME, ETHER_SYMBOL, ETHER_TOKEN_FAKE_ADDRESS};
use serde::Serialize;
use std::time::Duration;
use tokio_retry::{strategy::FixedInterval, Retry};
use tracing::{info, warn};

/// Addresses and network resolved at bootstrap. Read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub network: NetworkType,
    pub vault: Address,
    pub redeemable_token: Address,
    /// Placeholder address of the native asset
    pub native_token: Address,
}

/// Resolve the vault, the redeemable token and the network, in that order.
///
/// On success the native-asset placeholder is registered in `cache` so its
/// metadata is never fetched.
pub async fn bootstrap<L>(ledger: &L, cache: &MetadataCache) -> Result<Settings, BootstrapError>
where
    L: Ledger,
{
    let vault = ledger.vault().await.map_err(BootstrapError::Vault)?;
    let redeemable_token = ledger
        .redeemable_token()
        .await
        .map_err(BootstrapError::RedeemableToken)?;
    let network = ledger.network().await.map_err(BootstrapError::Network)?;

    cache.insert_static(
        ETHER_TOKEN_FAKE_ADDRESS,
        ETHER_DECIMALS,
        ETHER_NAME,
        ETHER_SYMBOL,
    );

    info!(
        network = %network,
        vault = %vault,
        redeemable_token = %redeemable_token,
        "Bootstrap complete"
    );

    Ok(Settings {
        network,
        vault,
        redeemable_token,
        native_token: ETHER_TOKEN_FAKE_ADDRESS,
    })
}

/// [`bootstrap`] with a fixed delay between attempts.
///
/// `max_attempts` of `None` retries forever.
pub async fn bootstrap_with_retry<L>(
    ledger: &L,
    cache: &MetadataCache,
    delay: Duration,
    max_attempts: Option<usize>,
) -> Result<Settings, BootstrapError>
where
    L: Ledger,
{
    let strategy: Box<dyn Iterator<Item = Duration> + Send> = match max_attempts {
        Some(attempts) => Box::new(FixedInterval::new(delay).take(attempts.saturating_sub(1))),
        None => Box::new(FixedInterval::new(delay)),
    };

    let mut attempt = 0usize;
    Retry::spawn(strategy, || {
        attempt += 1;
        let current = attempt;
        async move {
            bootstrap(ledger, cache).await.map_err(|e| {
                warn!(attempt = current, error = %e, "Bootstrap failed, will retry");
                e
            })
        }
    })
    .await
}
