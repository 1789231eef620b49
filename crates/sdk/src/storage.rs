//! Persistent token-list cache.
//!
//! A best-effort write-through cache over a scoped key-value store, so the
//! catalog survives process restarts and the UI has tokens to show while the
//! authoritative list is still in flight.

use tracing::warn;

use crate::types::TokenDescriptor;

/// Fixed key the token catalog is persisted under.
pub const TOKEN_LIST_KEY: &str = "crosswap_tokens";

/// Scoped persistent key-value store.
///
/// Implementations swallow their own failures: a read error is `None`, a
/// write error is a no-op. The cache is a warm-start optimization and must
/// never take the caller down with it.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<Vec<u8>>;
    fn set(&self, key: &str, value: &[u8]);
}

/// Write-through cache for the token catalog.
#[derive(Debug)]
pub struct TokenListCache<S> {
    store: S,
}

impl<S: KeyValueStore> TokenListCache<S> {
    pub fn new(store: S) -> Self { Self { store } }

    /// Returns the persisted catalog, or `None` if nothing was persisted or
    /// the persisted bytes are malformed.
    pub fn load(&self) -> Option<Vec<TokenDescriptor>> {
        let bytes = self.store.get(TOKEN_LIST_KEY)?;
        match serde_json::from_slice(&bytes) {
            Ok(tokens) => Some(tokens),
            Err(err) => {
                warn!(target: "storage", %err, "discarding malformed persisted token list");
                None
            },
        }
    }

    /// Persists the catalog, best effort.
    pub fn save(&self, tokens: &[TokenDescriptor]) {
        match serde_json::to_vec(tokens) {
            Ok(bytes) => self.store.set(TOKEN_LIST_KEY, &bytes),
            Err(err) => warn!(target: "storage", %err, "failed to serialize token list"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{testing::MemoryStore, types::TokenAddress};

    fn token(symbol: &str) -> TokenDescriptor {
        TokenDescriptor {
            chain_id: 1,
            address: TokenAddress::new("0xAAA"),
            decimals: 18,
            symbol: symbol.to_owned(),
            name: String::new(),
        }
    }

    #[test]
    fn round_trips_through_store() {
        let cache = TokenListCache::new(MemoryStore::default());
        assert_eq!(cache.load(), None);
        cache.save(&[token("ETH")]);
        let loaded = cache.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].symbol, "ETH");
    }

    #[test]
    fn malformed_bytes_load_as_absent() {
        let store = MemoryStore::default();
        store.set(TOKEN_LIST_KEY, b"not json");
        let cache = TokenListCache::new(store);
        assert_eq!(cache.load(), None);
    }
}
