//! Vault contract bindings.
//!
//! The vault custodies every token the redemptions app can pay out.
//! The native asset is addressed with the zero address.

use alloy_sol_types::sol;

sol! {
    #[sol(rpc)]
    interface IVault {
        /// Emitted when tokens (or ETH) are deposited into the vault
        event VaultDeposit(
            address indexed token,
            address indexed sender,
            uint256 amount
        );

        /// Emitted when tokens (or ETH) leave the vault
        event VaultTransfer(
            address indexed token,
            address indexed to,
            uint256 amount
        );

        /// Balance the vault holds of `token`
        function balance(address token) external view returns (uint256);

        /// Block at which the vault app was initialized
        function getInitializationBlock() external view returns (uint256);
    }
}
