//! ERC20 token contract bindings.

use alloy_sol_types::sol;

sol! {
    /// Read-only view of the standard ERC20 token interface.
    #[sol(rpc)]
    interface IERC20 {
        /// Emitted when tokens are transferred
        event Transfer(
            address indexed from,
            address indexed to,
            uint256 value
        );

        /// Get token balance of an account
        function balanceOf(address account) external view returns (uint256);

        /// Get token name
        function name() external view returns (string memory);

        /// Get token symbol
        function symbol() external view returns (string memory);

        /// Get token decimals
        function decimals() external view returns (uint8);

        /// Get total supply
        function totalSupply() external view returns (uint256);
    }
}

sol! {
    /// Legacy tokens (MKR, SAI) that return `bytes32` instead of `string`
    /// for their name and symbol.
    #[sol(rpc)]
    interface IERC20Bytes32 {
        function name() external view returns (bytes32);

        function symbol() external view returns (bytes32);
    }
}
