use alloy_primitives::Address;
use config::MetadataField;
use dashmap::DashMap;

/// A text metadata field of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    Name,
    Symbol,
}

impl From<TextField> for MetadataField {
    fn from(field: TextField) -> Self {
        match field {
            TextField::Name => Self::Name,
            TextField::Symbol => Self::Symbol,
        }
    }
}

/// Process-lifetime cache of token metadata.
///
/// Decimals, names and symbols are independent maps sharing the token address
/// as key. Entries are never evicted: ERC20 metadata does not change once deployed.
/// Writers racing on the same key store the same value, so the last write wins.
#[derive(Debug, Default)]
pub struct MetadataCache {
    decimals: DashMap<Address, u8>,
    names: DashMap<Address, String>,
    symbols: DashMap<Address, String>,
}

impl MetadataCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decimals(&self, token: &Address) -> Option<u8> {
        self.decimals.get(token).map(|entry| *entry)
    }

    pub fn set_decimals(&self, token: Address, decimals: u8) {
        self.decimals.insert(token, decimals);
    }

    pub fn text(&self, token: &Address, field: TextField) -> Option<String> {
        self.text_map(field).get(token).map(|entry| entry.clone())
    }

    pub fn set_text(&self, token: Address, field: TextField, value: String) {
        self.text_map(field).insert(token, value);
    }

    /// Register static metadata for a token that must never be fetched,
    /// such as the native-asset placeholder.
    pub fn insert_static(&self, token: Address, decimals: u8, name: &str, symbol: &str) {
        self.set_decimals(token, decimals);
        self.set_text(token, TextField::Name, name.to_string());
        self.set_text(token, TextField::Symbol, symbol.to_string());
    }

    /// Number of tokens with cached decimals.
    pub fn len(&self) -> usize {
        self.decimals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decimals.is_empty() && self.names.is_empty() && self.symbols.is_empty()
    }

    const fn text_map(&self, field: TextField) -> &DashMap<Address, String> {
        match field {
            TextField::Name => &self.names,
            TextField::Symbol => &self.symbols,
        }
    }
}
