//! Serialized event processing and the read side of the state.

use crate::{
    ledger::Ledger, multiplexer::EventMultiplexer, reducer::Reducer, settings::Settings,
    state::AppState,
};
use alloy_primitives::Address;
use balance::MetadataCache;
use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::watch;
use tracing::{debug, error, info};

/// The committed state together with the number of commits so far.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Zero until the first event is reduced
    pub revision: u64,
    pub state: Arc<AppState>,
}

/// Outcome of reducing one event.
#[derive(Debug, Clone, Copy)]
pub struct Step {
    /// Label of the reduced event
    pub event: &'static str,
    pub elapsed: Duration,
    /// False if the reducer failed and the prior state was kept
    pub committed: bool,
    /// Revision current after the step
    pub revision: u64,
}

/// The state machine: pulls one event at a time and commits its result.
pub struct Store<L> {
    reducer: Reducer<L>,
    events: EventMultiplexer,
    snapshots: watch::Sender<Snapshot>,
}

impl<L> Store<L>
where
    L: Ledger,
{
    /// Wire a store for bootstrapped `settings`.
    ///
    /// Logs are followed from the vault's initialization block. If that block
    /// cannot be resolved the error is logged and logs are followed from the
    /// chain head instead.
    pub async fn create(
        ledger: Arc<L>,
        cache: Arc<MetadataCache>,
        settings: Settings,
        accounts: watch::Receiver<Option<Address>>,
    ) -> (Self, StoreHandle) {
        let from_block = match ledger.initialization_block(settings.vault).await {
            Ok(block) => Some(block),
            Err(e) => {
                error!(
                    vault = %settings.vault,
                    error = %e,
                    "Could not get the vault's initialization block"
                );
                None
            }
        };

        let logs = ledger.ledger_logs(settings.vault, from_block);
        let events = EventMultiplexer::new(accounts, logs);
        let (snapshots, receiver) = watch::channel(Snapshot::default());

        let store = Self {
            reducer: Reducer::new(ledger, cache, settings),
            events,
            snapshots,
        };

        (store, StoreHandle::new(receiver))
    }

    pub fn handle(&self) -> StoreHandle {
        StoreHandle::new(self.snapshots.subscribe())
    }

    pub const fn settings(&self) -> &Settings {
        self.reducer.settings()
    }

    /// Reduce the next event. Returns `None` once every event source has closed.
    pub async fn step(&mut self) -> Option<Step> {
        let event = self.events.next().await?;
        let started = Instant::now();
        let prior = self.snapshots.borrow().state.clone();

        let committed = match self.reducer.reduce(&prior, &event).await {
            Ok(next) => {
                self.snapshots.send_modify(|snapshot| {
                    snapshot.revision += 1;
                    snapshot.state = Arc::new(next);
                });
                true
            }
            Err(e) => {
                error!(
                    event = event.label(),
                    error = %e,
                    "Failed to reduce event, keeping prior state"
                );
                false
            }
        };

        let step = Step {
            event: event.label(),
            elapsed: started.elapsed(),
            committed,
            revision: self.snapshots.borrow().revision,
        };
        debug!(
            event = step.event,
            committed = step.committed,
            revision = step.revision,
            elapsed_ms = step.elapsed.as_millis() as u64,
            "Event reduced"
        );

        Some(step)
    }

    /// Reduce events until every source has closed, handing each [`Step`]
    /// to `on_step` together with a handle on the committed state.
    pub async fn run<F>(mut self, mut on_step: F)
    where
        F: FnMut(&Step, &StoreHandle),
    {
        let handle = self.handle();

        while let Some(step) = self.step().await {
            on_step(&step, &handle);
        }

        info!("Event sources closed, store stopped");
    }
}

/// Read access to the latest committed snapshot.
///
/// Reading never blocks the reducer.
#[derive(Debug, Clone)]
pub struct StoreHandle {
    snapshots: watch::Receiver<Snapshot>,
}

impl StoreHandle {
    const fn new(snapshots: watch::Receiver<Snapshot>) -> Self {
        Self { snapshots }
    }

    pub fn current(&self) -> Snapshot {
        self.snapshots.borrow().clone()
    }

    pub fn state(&self) -> Arc<AppState> {
        self.snapshots.borrow().state.clone()
    }

    pub fn revision(&self) -> u64 {
        self.snapshots.borrow().revision
    }

    /// Wait for the next commit. Returns `None` once the store is gone.
    pub async fn changed(&mut self) -> Option<Snapshot> {
        self.snapshots.changed().await.ok()?;
        let snapshot = self.snapshots.borrow_and_update().clone();
        Some(snapshot)
    }

    /// Wait until at least `revision` snapshots have been committed.
    pub async fn wait_for_revision(&mut self, revision: u64) -> Option<Snapshot> {
        let snapshot = self
            .snapshots
            .wait_for(|snapshot| snapshot.revision >= revision)
            .await
            .ok()?;
        Some(snapshot.clone())
    }
}
