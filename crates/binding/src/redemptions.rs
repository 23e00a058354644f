//! Redemptions app contract bindings.

use alloy_sol_types::sol;

sol! {
    #[sol(rpc)]
    interface IRedemptions {
        /// Emitted when a holder burns redeemable tokens for a share of the vault
        event Redeem(address indexed redeemer, uint256 amount);

        /// Emitted when a token is added to the redeemable set
        event AddToken(address indexed token);

        /// Emitted when a token is removed from the redeemable set
        event RemoveToken(address indexed token);

        /// Vault the app pays redemptions from
        function vault() external view returns (address);

        /// Token burned on redemption
        function getRedeemableToken() external view returns (address);

        /// Tokens paid out on redemption, in on-chain order
        function getTokens() external view returns (address[] memory);

        /// Redeemable token balance `account` can currently redeem
        function spendableBalanceOf(address account) external view returns (uint256);
    }
}
