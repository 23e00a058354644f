//! Network identity.
//!
//! The network is resolved once at bootstrap from the RPC endpoint's chain id
//! and scopes every static token table in [`crate::tokens`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Network type, named the way wallets report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    #[serde(rename = "main")]
    Mainnet,
    Ropsten,
    Rinkeby,
    Goerli,
    Kovan,
    Sepolia,
    /// Any chain without a public name (local devnets, forks).
    Private,
}

impl NetworkType {
    /// Map an EIP-155 chain id to a network type.
    pub const fn from_chain_id(chain_id: u64) -> Self {
        match chain_id {
            1 => Self::Mainnet,
            3 => Self::Ropsten,
            4 => Self::Rinkeby,
            5 => Self::Goerli,
            42 => Self::Kovan,
            11155111 => Self::Sepolia,
            _ => Self::Private,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "main",
            Self::Ropsten => "ropsten",
            Self::Rinkeby => "rinkeby",
            Self::Goerli => "goerli",
            Self::Kovan => "kovan",
            Self::Sepolia => "sepolia",
            Self::Private => "private",
        }
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
