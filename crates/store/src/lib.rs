//! Event-sourced state for the redemptions app.
//!
//! The store keeps one application state snapshot up to date from three
//! sources: a synthetic initialization event, the selected account, and the
//! logs of the vault and app contracts. Events are reduced strictly one at a
//! time; the calls made while reducing a single event run concurrently.
//!
//! Startup order:
//! 1. [`bootstrap`] resolves the vault, redeemable token and network
//! 2. [`Store::create`] resolves the log start block and wires the sources
//! 3. [`Store::run`] reduces events for the lifetime of the process
//!
//! Readers use a [`StoreHandle`].

pub mod chain;
pub mod error;
pub mod event;
pub mod ledger;
pub mod multiplexer;
pub mod reducer;
pub mod settings;
pub mod state;
pub mod store;

pub use chain::ChainLedger;
pub use error::BootstrapError;
pub use event::{Event, LedgerLog, LogKind};
pub use ledger::{Ledger, LogStream};
pub use multiplexer::EventMultiplexer;
pub use reducer::Reducer;
pub use settings::{bootstrap, bootstrap_with_retry, Settings};
pub use state::{AppState, RedeemableToken};
pub use store::{Snapshot, Step, Store, StoreHandle};
