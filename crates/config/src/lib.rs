//! Configuration types for the redemptions state sync.
//!
//! This crate provides:
//! - Network identity resolved from the chain id
//! - The native-asset placeholder and its static metadata
//! - Per-network fallback metadata and verified-token tables

pub mod network;
pub mod tokens;

pub use network::NetworkType;
pub use tokens::{
    fallback_decimals, fallback_text, is_token_verified, known_token, token_data_fallback,
    KnownToken, MetadataField, MetadataValue, ETHER_DECIMALS, ETHER_NAME, ETHER_SYMBOL,
    ETHER_TOKEN_FAKE_ADDRESS,
};
