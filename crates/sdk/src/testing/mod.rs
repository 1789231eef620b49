//! Scripted in-memory collaborators for driving the session without a
//! network.

use std::sync::atomic::{AtomicUsize, Ordering};

use dashmap::DashMap;

use crate::{
    error::Error,
    provider::{BalanceProvider, TokenListProvider},
    storage::KeyValueStore,
    types::{Balance, ChainId, TokenAddress, TokenDescriptor},
};

/// Shorthand token descriptor for fixtures.
pub fn token(chain_id: ChainId, address: &str, decimals: u8, symbol: &str) -> TokenDescriptor {
    TokenDescriptor {
        chain_id,
        address: TokenAddress::new(address),
        decimals,
        symbol: symbol.to_owned(),
        name: symbol.to_owned(),
    }
}

/// Shorthand balance record for fixtures.
pub fn balance(
    chain_id: ChainId,
    address: &str,
    amount: &str,
    decimals: u8,
    symbol: &str,
) -> Balance {
    Balance {
        chain_id,
        address: TokenAddress::new(address),
        balance: amount.to_owned(),
        decimals,
        symbol: symbol.to_owned(),
        name: String::new(),
    }
}

/// Balance provider with scripted per-account responses and an invocation
/// counter, for asserting fetch deduplication.
#[derive(Debug, Default)]
pub struct StaticBalances {
    responses: DashMap<String, Vec<Balance>>,
    fail: bool,
    calls: AtomicUsize,
}

impl StaticBalances {
    pub fn new() -> Self { Self::default() }

    /// Provider whose every call fails.
    pub fn failing() -> Self { Self { fail: true, ..Self::default() } }

    pub fn with_account(self, account: &str, records: Vec<Balance>) -> Self {
        self.responses.insert(account.to_owned(), records);
        self
    }

    /// Number of `get_balances` invocations so far.
    pub fn calls(&self) -> usize { self.calls.load(Ordering::SeqCst) }
}

impl BalanceProvider for StaticBalances {
    async fn get_balances(&self, account: &str) -> Result<Vec<Balance>, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(Error::Fetch("scripted balance failure".to_owned()));
        }
        Ok(self
            .responses
            .get(account)
            .map(|records| records.clone())
            .unwrap_or_default())
    }
}

/// Token-list provider serving a fixed list, or a scripted failure.
#[derive(Debug, Default)]
pub struct StaticTokenList {
    tokens: Vec<TokenDescriptor>,
    fail: bool,
    calls: AtomicUsize,
}

impl StaticTokenList {
    pub fn new(tokens: Vec<TokenDescriptor>) -> Self {
        Self { tokens, fail: false, calls: AtomicUsize::new(0) }
    }

    pub fn failing() -> Self { Self { fail: true, ..Self::default() } }

    pub fn calls(&self) -> usize { self.calls.load(Ordering::SeqCst) }
}

impl TokenListProvider for StaticTokenList {
    async fn get_supported_tokens(&self) -> Result<Vec<TokenDescriptor>, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(Error::Fetch("scripted token list failure".to_owned()));
        }
        Ok(self.tokens.clone())
    }
}

/// In-memory [`KeyValueStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: DashMap<String, Vec<u8>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Vec<u8>> { self.data.get(key).map(|bytes| bytes.clone()) }

    fn set(&self, key: &str, value: &[u8]) {
        self.data.insert(key.to_owned(), value.to_vec());
    }
}
