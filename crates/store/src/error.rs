use thiserror::Error;

/// Failures that prevent the store from starting.
///
/// Each variant names the bootstrap call that failed. All of them are fatal
/// for the attempt; the caller decides whether to retry.
#[derive(Error, Debug)]
pub enum BootstrapError {
    /// The app did not return its vault address
    #[error("Could not load vault address: {0}")]
    Vault(eyre::Report),

    /// The app did not return its redeemable token address
    #[error("Could not load redeemable token address: {0}")]
    RedeemableToken(eyre::Report),

    /// The network identity could not be resolved
    #[error("Could not resolve network: {0}")]
    Network(eyre::Report),
}
