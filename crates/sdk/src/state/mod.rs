mod balances;
mod catalog;

pub use balances::{BalanceCache, BalanceMap, FetchState, NATIVE_BALANCE_HEADROOM};
pub use catalog::ChainTokenMap;
use tracing::info;

use crate::{
    chains,
    error::Error,
    provider::{BalanceProvider, NameResolver, TokenListProvider},
    storage::{KeyValueStore, TokenListCache},
    types::{AccountClass, ChainId},
};

/// Aggregation session: the catalog, the balance cache, and the active
/// account set behind one explicit object with defined construction and
/// teardown.
///
/// All mutable aggregation state lives here; collaborators receive the
/// session (or its derived views) instead of importing globals.
#[derive(Debug)]
pub struct Session<S> {
    catalog: ChainTokenMap,
    balances: BalanceCache,
    token_cache: TokenListCache<S>,
    evm_chain_id: Option<ChainId>,
    evm_account: Option<String>,
    alt_account: Option<String>,
}

impl<S: KeyValueStore> Session<S> {
    /// Warm-starts the session from the persisted token catalog, if any.
    ///
    /// The catalog may be empty until [`Self::refresh_tokens`] resolves; a
    /// persisted copy makes it non-empty immediately.
    pub fn new(store: S) -> Self {
        let token_cache = TokenListCache::new(store);
        let catalog = token_cache
            .load()
            .map(ChainTokenMap::from_tokens)
            .unwrap_or_default();
        Self {
            catalog,
            balances: BalanceCache::new(),
            token_cache,
            evm_chain_id: None,
            evm_account: None,
            alt_account: None,
        }
    }

    /// Fetches the authoritative token list, replacing the in-memory catalog
    /// and the persisted copy.
    ///
    /// On failure the stale catalog (possibly from a previous run) remains
    /// in effect and the error propagates: an empty or stale catalog
    /// silently degrades trade availability, so the caller must get to see
    /// this one.
    pub async fn refresh_tokens<T: TokenListProvider>(&mut self, provider: &T) -> Result<(), Error> {
        let tokens = provider.get_supported_tokens().await?;
        info!(target: "session", count = tokens.len(), "token catalog refreshed");
        self.token_cache.save(&tokens);
        self.catalog = ChainTokenMap::from_tokens(tokens);
        Ok(())
    }

    pub fn catalog(&self) -> &ChainTokenMap { &self.catalog }

    pub fn balance_cache(&self) -> &BalanceCache { &self.balances }

    /// Chain the EVM wallet is currently connected to.
    pub fn set_evm_chain(&mut self, chain_id: Option<ChainId>) { self.evm_chain_id = chain_id; }

    pub fn set_evm_account(&mut self, account: Option<String>) { self.evm_account = account; }

    pub fn set_alt_account(&mut self, account: Option<String>) { self.alt_account = account; }

    /// Dispatches deduplicated balance fetches for every active account.
    /// Safe to call on every re-evaluation; each account's provider is
    /// invoked at most once per session.
    pub async fn ensure_balances<P, Q>(&self, evm_provider: &P, alt_provider: &Q)
    where
        P: BalanceProvider,
        Q: BalanceProvider,
    {
        if let Some(account) = self.evm_account.as_deref() {
            self.balances.ensure_fetched(AccountClass::Evm, account, evm_provider).await;
        }
        if let Some(account) = self.alt_account.as_deref() {
            self.balances.ensure_fetched(AccountClass::Alt, account, alt_provider).await;
        }
    }

    /// Merged balance view for the active accounts, recomputed on demand.
    pub fn balances(&self) -> BalanceMap {
        self.balances.balance_map(self.evm_account.as_deref(), self.alt_account.as_deref())
    }

    /// Gate for ENS-style name resolution: only constructible while the EVM
    /// wallet is on mainnet. Off mainnet this is a configuration error,
    /// fatal to the resolution attempt only.
    pub fn name_resolver<'r, R: NameResolver>(&self, resolver: &'r R) -> Result<&'r R, Error> {
        if self.evm_chain_id == Some(chains::MAINNET) {
            Ok(resolver)
        } else {
            Err(Error::Configuration(
                "name resolution requires a mainnet connection".to_owned(),
            ))
        }
    }
}
