//! Events consumed by the reducer.

use alloy_primitives::{Address, LogData, B256};
use alloy_sol_types::SolEvent;
use binding::{
    redemptions::IRedemptions::{AddToken, Redeem, RemoveToken},
    vault::IVault::{VaultDeposit, VaultTransfer},
};

/// One input to the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Synthetic event that always comes first.
    Initialization,
    /// The selected account changed.
    AccountChanged(Address),
    /// A log emitted by the vault or the app contract.
    LedgerLog(LedgerLog),
}

impl Event {
    /// Short label used in logs and metrics.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Initialization => "initialization",
            Self::AccountChanged(_) => "account_changed",
            Self::LedgerLog(_) => "ledger_log",
        }
    }
}

/// Known contract events, decoded from `topic0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    VaultDeposit,
    VaultTransfer,
    Redeem,
    AddToken,
    RemoveToken,
    /// Unrecognized or anonymous event.
    Unknown(Option<B256>),
}

impl LogKind {
    pub fn from_topic0(topic0: Option<&B256>) -> Self {
        let Some(topic0) = topic0 else {
            return Self::Unknown(None);
        };

        let known = [
            (VaultDeposit::SIGNATURE_HASH, Self::VaultDeposit),
            (VaultTransfer::SIGNATURE_HASH, Self::VaultTransfer),
            (Redeem::SIGNATURE_HASH, Self::Redeem),
            (AddToken::SIGNATURE_HASH, Self::AddToken),
            (RemoveToken::SIGNATURE_HASH, Self::RemoveToken),
        ];

        known
            .into_iter()
            .find_map(|(hash, kind)| (hash == *topic0).then_some(kind))
            .unwrap_or(Self::Unknown(Some(*topic0)))
    }
}

/// A contract log as seen by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerLog {
    /// Emitting contract
    pub address: Address,
    /// Decoded event kind
    pub kind: LogKind,
    /// Raw topics and data
    pub payload: LogData,
    /// Block the log was included in, if known
    pub block_number: Option<u64>,
}

impl LedgerLog {
    pub fn new(address: Address, payload: LogData, block_number: Option<u64>) -> Self {
        Self {
            address,
            kind: LogKind::from_topic0(payload.topics().first()),
            payload,
            block_number,
        }
    }
}

impl From<alloy_rpc_types_eth::Log> for LedgerLog {
    fn from(log: alloy_rpc_types_eth::Log) -> Self {
        Self::new(log.inner.address, log.inner.data, log.block_number)
    }
}
