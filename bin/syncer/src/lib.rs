pub mod config;
pub mod metrics;

use crate::metrics::Metrics;
use alloy_primitives::Address;
use alloy_provider::Provider;
use std::time::Duration;
use store::{Ledger, Store, StoreHandle};
use tokio::sync::watch;
use tracing::{info, warn};

/// Keep `accounts` set to the first account the node reports.
///
/// Only changes are published. Returns once every receiver is gone.
pub async fn poll_accounts<P>(
    provider: P,
    accounts: watch::Sender<Option<Address>>,
    poll_interval: Duration,
) where
    P: Provider,
{
    let mut interval = tokio::time::interval(poll_interval);

    loop {
        interval.tick().await;

        if accounts.is_closed() {
            return;
        }

        match provider.get_accounts().await {
            Ok(list) => {
                let account = list.first().copied();
                accounts.send_if_modified(|current| {
                    if *current == account {
                        return false;
                    }
                    info!(account = ?account, "Selected account changed");
                    *current = account;
                    true
                });
            }
            Err(e) => warn!(error = %e, "Failed to fetch accounts, will retry"),
        }
    }
}

/// Reduce events until the sources close, recording metrics per step.
pub async fn run_store<L>(store: Store<L>, metrics: Metrics)
where
    L: Ledger,
{
    store
        .run(|step, handle| {
            metrics.record_event(step.event, step.committed, step.elapsed);

            if step.committed {
                metrics.set_revision(step.revision);
                metrics.set_tracked_tokens(handle.state().tokens.len());
            }
        })
        .await;
}

/// Log every committed snapshot as JSON until the store is gone.
pub async fn log_snapshots(mut handle: StoreHandle) {
    while let Some(snapshot) = handle.changed().await {
        match serde_json::to_string(snapshot.state.as_ref()) {
            Ok(state) => info!(revision = snapshot.revision, state = %state, "State updated"),
            Err(e) => warn!(error = %e, "Failed to serialize state"),
        }
    }
}
