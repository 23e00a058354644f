//! Static, network-scoped token tables.
//!
//! Two lookups live here:
//! - fallback metadata for well-known tokens whose on-chain `name`/`symbol`/`decimals`
//!   calls are missing, non-standard or empty
//! - the curated list of verified tokens per network
//!
//! Nothing in this module performs I/O and every lookup is total.

use crate::NetworkType;
use alloy_primitives::{address, Address};

/// Placeholder address standing in for the native asset (ETH).
pub const ETHER_TOKEN_FAKE_ADDRESS: Address = Address::ZERO;

/// Decimals of the native asset.
pub const ETHER_DECIMALS: u8 = 18;

/// Display name of the native asset.
pub const ETHER_NAME: &str = "Ether";

/// Symbol of the native asset.
pub const ETHER_SYMBOL: &str = "ETH";

/// A metadata field of an ERC20 token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataField {
    Decimals,
    Name,
    Symbol,
}

/// A resolved metadata value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataValue {
    Decimals(u8),
    Text(&'static str),
}

/// Known metadata for a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownToken {
    pub address: Address,
    pub name: &'static str,
    pub symbol: &'static str,
    pub decimals: u8,
}

const MAINNET_FALLBACK: &[KnownToken] = &[
    KnownToken {
        address: address!("0x89d24A6b4CcB1B6fAA2625fE562bDD9a23260359"),
        name: "Dai Stablecoin v1.0",
        symbol: "SAI",
        decimals: 18,
    },
    // MKR returns bytes32 metadata.
    KnownToken {
        address: address!("0x9f8F72aA9304c8B593d555F12eF6589cC3A579A2"),
        name: "Maker",
        symbol: "MKR",
        decimals: 18,
    },
    KnownToken {
        address: address!("0x2260FAC5E5542a773Aa44fBCfeDf7C193bc2C599"),
        name: "Wrapped BTC",
        symbol: "WBTC",
        decimals: 8,
    },
];

const RINKEBY_FALLBACK: &[KnownToken] = &[KnownToken {
    address: address!("0x0527E400502d0CB4f214dd0D2F2a323fc88Ff924"),
    name: "Dai Stablecoin v1.0 (Test)",
    symbol: "DAI",
    decimals: 18,
}];

const MAINNET_VERIFIED: &[Address] = &[
    // ANT
    address!("0x960b236A07cf122663c4303350609A66A7B288C0"),
    // DAI
    address!("0x6B175474E89094C44Da98b954EedeAC495271d0F"),
    // SAI
    address!("0x89d24A6b4CcB1B6fAA2625fE562bDD9a23260359"),
    // MKR
    address!("0x9f8F72aA9304c8B593d555F12eF6589cC3A579A2"),
    // USDC
    address!("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"),
    // USDT
    address!("0xdAC17F958D2ee523a2206206994597C13D831ec7"),
    // WBTC
    address!("0x2260FAC5E5542a773Aa44fBCfeDf7C193bc2C599"),
    // WETH
    address!("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"),
];

const RINKEBY_VERIFIED: &[Address] = &[
    // DAI (test)
    address!("0x0527E400502d0CB4f214dd0D2F2a323fc88Ff924"),
];

const fn fallback_table(network: NetworkType) -> &'static [KnownToken] {
    match network {
        NetworkType::Mainnet => MAINNET_FALLBACK,
        NetworkType::Rinkeby => RINKEBY_FALLBACK,
        _ => &[],
    }
}

const fn verified_table(network: NetworkType) -> &'static [Address] {
    match network {
        NetworkType::Mainnet => MAINNET_VERIFIED,
        NetworkType::Rinkeby => RINKEBY_VERIFIED,
        _ => &[],
    }
}

/// Look up the fallback entry for `address` on `network`.
pub fn known_token(address: Address, network: NetworkType) -> Option<&'static KnownToken> {
    fallback_table(network)
        .iter()
        .find(|token| token.address == address)
}

/// Resolve a single fallback metadata field.
///
/// Returns `None` for unknown addresses or networks without a table.
pub fn token_data_fallback(
    address: Address,
    field: MetadataField,
    network: NetworkType,
) -> Option<MetadataValue> {
    let token = known_token(address, network)?;

    let value = match field {
        MetadataField::Decimals => MetadataValue::Decimals(token.decimals),
        MetadataField::Name => MetadataValue::Text(token.name),
        MetadataField::Symbol => MetadataValue::Text(token.symbol),
    };

    Some(value)
}

/// Fallback decimals for `address` on `network`.
pub fn fallback_decimals(address: Address, network: NetworkType) -> Option<u8> {
    match token_data_fallback(address, MetadataField::Decimals, network)? {
        MetadataValue::Decimals(decimals) => Some(decimals),
        MetadataValue::Text(_) => None,
    }
}

/// Fallback name or symbol for `address` on `network`.
pub fn fallback_text(
    address: Address,
    field: MetadataField,
    network: NetworkType,
) -> Option<&'static str> {
    match token_data_fallback(address, field, network)? {
        MetadataValue::Text(text) if !text.is_empty() => Some(text),
        _ => None,
    }
}

/// Whether `address` is on the curated token list for `network`.
pub fn is_token_verified(address: Address, network: NetworkType) -> bool {
    verified_table(network).contains(&address)
}
