//! Merges the store's event sources into one ordered sequence.
//!
//! Sources:
//! - a synthetic [`Event::Initialization`], always yielded first
//! - the selected account, read from a single-slot `watch` channel so a late
//!   reader sees only the most recent account
//! - the contract log stream
//!
//! Account changes and logs interleave in arrival order.

use crate::{
    event::{Event, LedgerLog},
    ledger::LogStream,
};
use alloy_primitives::Address;
use futures::StreamExt;
use tokio::sync::watch;
use tracing::debug;

enum Source {
    Account(Option<Option<Address>>),
    Log(Option<LedgerLog>),
}

pub struct EventMultiplexer {
    initialized: bool,
    accounts: Option<watch::Receiver<Option<Address>>>,
    logs: Option<LogStream>,
}

impl EventMultiplexer {
    pub fn new(mut accounts: watch::Receiver<Option<Address>>, logs: LogStream) -> Self {
        // Replay the account already selected when the store starts.
        accounts.mark_changed();

        Self {
            initialized: false,
            accounts: Some(accounts),
            logs: Some(logs),
        }
    }

    /// Next event, or `None` once every live source has closed.
    pub async fn next(&mut self) -> Option<Event> {
        if !self.initialized {
            self.initialized = true;
            return Some(Event::Initialization);
        }

        loop {
            if self.accounts.is_none() && self.logs.is_none() {
                return None;
            }

            let source = tokio::select! {
                account = next_account(&mut self.accounts) => Source::Account(account),
                log = next_log(&mut self.logs) => Source::Log(log),
            };

            match source {
                Source::Account(Some(Some(account))) => return Some(Event::AccountChanged(account)),
                // No account selected.
                Source::Account(Some(None)) => continue,
                Source::Account(None) => {
                    debug!("Account source closed");
                    self.accounts = None;
                }
                Source::Log(Some(log)) => return Some(Event::LedgerLog(log)),
                Source::Log(None) => {
                    debug!("Log source closed");
                    self.logs = None;
                }
            }
        }
    }
}

/// Wait for the next account value. `None` means the sender is gone.
async fn next_account(
    accounts: &mut Option<watch::Receiver<Option<Address>>>,
) -> Option<Option<Address>> {
    match accounts {
        Some(rx) => {
            rx.changed().await.ok()?;
            let account = *rx.borrow_and_update();
            Some(account)
        }
        None => std::future::pending().await,
    }
}

async fn next_log(logs: &mut Option<LogStream>) -> Option<LedgerLog> {
    match logs {
        Some(stream) => stream.next().await,
        None => std::future::pending().await,
    }
}
