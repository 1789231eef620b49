use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::ChainId;

/// Canonical key under which a chain's native asset is stored.
///
/// Native balances are queried through a different code path than contract
/// tokens, but lookups must not be able to tell the difference, so every
/// feed-specific sentinel is rewritten to this key before storage.
pub const NATIVE_ADDRESS: &str = "native";

/// Sentinel the external feeds use to mark a chain's native asset.
pub const NATIVE_SENTINEL: &str = "0x0000000000000000000000000000000000000000";

/// Address key of a token within one chain, normalized to lowercase.
///
/// A plain string rather than a fixed-width address: alternate-chain token
/// addresses exceed 20 bytes, and the canonical native key is not a hex
/// address at all.
#[derive(Clone, PartialEq, Eq, Hash, derive_more::Debug)]
#[debug("{_0}")]
pub struct TokenAddress(String);

impl TokenAddress {
    pub fn new(address: &str) -> Self { Self(address.trim().to_ascii_lowercase()) }

    /// The canonical native key, see [`NATIVE_ADDRESS`].
    pub fn native() -> Self { Self(NATIVE_ADDRESS.to_owned()) }

    pub fn is_native(&self) -> bool { self.0 == NATIVE_ADDRESS }

    pub fn is_sentinel(&self) -> bool { self.0 == NATIVE_SENTINEL }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Canonical storage key: the feed sentinel aliases to the native key,
    /// everything else stays as-is.
    pub fn canonical(&self) -> TokenAddress {
        if self.is_sentinel() { Self::native() } else { self.clone() }
    }

    pub fn as_str(&self) -> &str { &self.0 }
}

impl std::fmt::Display for TokenAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(&self.0) }
}

impl From<&str> for TokenAddress {
    fn from(address: &str) -> Self { Self::new(address) }
}

impl Serialize for TokenAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TokenAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(|s| TokenAddress::new(&s))
    }
}

/// Token as described by the token-list feed (and as persisted locally).
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenDescriptor {
    pub chain_id: ChainId,
    pub address: TokenAddress,
    pub decimals: u8,
    pub symbol: String,
    #[serde(default)]
    pub name: String,
}

#[cfg(feature = "display")]
impl tabled::Tabled for TokenDescriptor {
    const LENGTH: usize = 5;

    fn fields(&self) -> Vec<std::borrow::Cow<'_, str>> {
        vec![
            self.chain_id.to_string().into(),
            self.symbol.as_str().into(),
            self.name.as_str().into(),
            self.address.as_str().into(),
            self.decimals.to_string().into(),
        ]
    }

    fn headers() -> Vec<std::borrow::Cow<'static, str>> {
        vec!["Chain".into(), "Symbol".into(), "Name".into(), "Address".into(), "Decimals".into()]
    }
}

/// Currency a balance or amount is denominated in.
///
/// Native currencies resolve through the canonical native key, token
/// currencies through their (chain, address) pair.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Currency {
    Native { chain_id: ChainId, decimals: u8, symbol: String, name: String },
    Token(TokenDescriptor),
}

impl Currency {
    /// Wraps a catalog descriptor, turning native-aliased entries into
    /// [`Currency::Native`].
    pub fn from_descriptor(token: TokenDescriptor) -> Self {
        if token.address.is_native() || token.address.is_sentinel() {
            Currency::Native {
                chain_id: token.chain_id,
                decimals: token.decimals,
                symbol: token.symbol,
                name: token.name,
            }
        } else {
            Currency::Token(token)
        }
    }

    pub fn chain_id(&self) -> ChainId {
        match self {
            Currency::Native { chain_id, .. } => *chain_id,
            Currency::Token(token) => token.chain_id,
        }
    }

    pub fn decimals(&self) -> u8 {
        match self {
            Currency::Native { decimals, .. } => *decimals,
            Currency::Token(token) => token.decimals,
        }
    }

    pub fn symbol(&self) -> &str {
        match self {
            Currency::Native { symbol, .. } => symbol,
            Currency::Token(token) => &token.symbol,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Currency::Native { name, .. } => name,
            Currency::Token(token) => &token.name,
        }
    }

    pub fn is_native(&self) -> bool { matches!(self, Currency::Native { .. }) }
}
