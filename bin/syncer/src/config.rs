use alloy_primitives::Address;
use config::NetworkType;
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};

/// Top-level syncer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// RPC endpoint url
    pub rpc_url: String,

    /// Deployed redemptions app address
    pub redemptions_address: Address,

    /// Fixed account to track. When absent the node's accounts are polled.
    #[serde(default)]
    pub account: Option<Address>,

    /// Seconds between account polls
    #[serde(default = "default_account_poll_secs")]
    pub account_poll_secs: u64,

    /// Seconds between bootstrap attempts
    #[serde(default = "default_bootstrap_retry_delay_secs")]
    pub bootstrap_retry_delay_secs: u64,

    /// Give up bootstrapping after this many attempts. Retries forever when absent.
    #[serde(default)]
    pub bootstrap_max_attempts: Option<usize>,

    /// Port for the Prometheus exporter. Metrics are off when absent.
    #[serde(default)]
    pub metrics_port: Option<u16>,

    /// Overrides the network detected from the chain id
    #[serde(default)]
    pub network: Option<NetworkType>,
}

const fn default_account_poll_secs() -> u64 {
    4
}

const fn default_bootstrap_retry_delay_secs() -> u64 {
    1
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;

        Ok(config)
    }

    pub const fn account_poll_interval(&self) -> Duration {
        Duration::from_secs(self.account_poll_secs)
    }

    pub const fn bootstrap_retry_delay(&self) -> Duration {
        Duration::from_secs(self.bootstrap_retry_delay_secs)
    }
}
