use crate::{TextField, TokenSource};
use alloy_primitives::{Address, FixedBytes, U256};
use alloy_provider::Provider;
use binding::{
    token::{IERC20Bytes32, IERC20},
    vault::IVault,
};
use eyre::Result;
use tracing::debug;

// Token and vault queries against a live provider.
pub struct TokenMonitor<P> {
    provider: P,
}

impl<P> TokenMonitor<P>
where
    P: Provider + Clone,
{
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }

    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Query a text field, falling back to the `bytes32` ABI used by legacy tokens.
    async fn query_text(&self, token: Address, field: TextField) -> Result<String> {
        let contract = IERC20::new(token, &self.provider);
        let result = match field {
            TextField::Name => contract.name().call().await,
            TextField::Symbol => contract.symbol().call().await,
        };

        match result {
            Ok(text) => Ok(text),
            Err(e) => {
                debug!(
                    token = %token,
                    field = ?field,
                    error = %e,
                    "String metadata call failed, trying bytes32"
                );

                let legacy = IERC20Bytes32::new(token, &self.provider);
                let raw = match field {
                    TextField::Name => legacy.name().call().await?,
                    TextField::Symbol => legacy.symbol().call().await?,
                };

                Ok(bytes32_to_string(raw))
            }
        }
    }
}

impl<P> TokenSource for TokenMonitor<P>
where
    P: Provider + Clone,
{
    async fn vault_balance(&self, vault: Address, token: Address) -> Result<U256> {
        debug!(vault = %vault, token = %token, "Querying vault balance");

        let contract = IVault::new(vault, &self.provider);
        let amount = contract.balance(token).call().await?;

        Ok(amount)
    }

    async fn token_decimals(&self, token: Address) -> Result<u8> {
        let contract = IERC20::new(token, &self.provider);
        let decimals = contract.decimals().call().await?;

        Ok(decimals)
    }

    async fn token_name(&self, token: Address) -> Result<String> {
        self.query_text(token, TextField::Name).await
    }

    async fn token_symbol(&self, token: Address) -> Result<String> {
        self.query_text(token, TextField::Symbol).await
    }
}

/// Decode a NUL-padded `bytes32` string.
fn bytes32_to_string(raw: FixedBytes<32>) -> String {
    let end = raw.iter().position(|b| *b == 0).unwrap_or(raw.len());
    String::from_utf8_lossy(&raw[..end]).trim().to_string()
}
