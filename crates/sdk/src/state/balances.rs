use std::collections::HashMap;

use alloy_primitives::U256;
use dashmap::{DashMap, mapref::entry::Entry};
use tracing::{debug, warn};

use crate::{
    provider::BalanceProvider,
    types::{AccountClass, Balance, ChainId, Currency, CurrencyAmount, TokenAddress},
};

/// Smallest units deducted from an exposed native balance.
///
/// Some wallet software rejects a "max amount" native transfer that would
/// drain the account to exactly zero, so the native entry is reported with
/// this much headroom held back. Contract tokens are never adjusted.
pub const NATIVE_BALANCE_HEADROOM: u64 = 2;

/// Per-account fetch bookkeeping, scoped to the session.
///
/// Presence of an entry in the registry means a fetch has been dispatched
/// for that account; it is never removed, so a failed fetch is not retried
/// within the session.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchState {
    /// Whether the provider response has been stored.
    pub stored: bool,
}

#[derive(Debug, Default)]
struct ClassStore {
    raw: DashMap<String, Vec<Balance>>,
    fetched: DashMap<String, FetchState>,
}

/// Deduplicated per-account balance fetcher with merge semantics.
///
/// Holds one raw store and one fetch registry per account-class. Raw stores
/// are only mutated here, on fetch completion; every consumer reads the
/// derived [`BalanceMap`] instead.
#[derive(Debug, Default)]
pub struct BalanceCache {
    evm: ClassStore,
    alt: ClassStore,
}

impl BalanceCache {
    pub fn new() -> Self { Self::default() }

    fn class(&self, class: AccountClass) -> &ClassStore {
        match class {
            AccountClass::Evm => &self.evm,
            AccountClass::Alt => &self.alt,
        }
    }

    /// Fetch state for `account`, if a fetch was ever dispatched.
    pub fn fetch_state(&self, class: AccountClass, account: &str) -> Option<FetchState> {
        self.class(class).fetched.get(account).map(|state| *state)
    }

    /// Dispatches a balance fetch for `account` unless one was already
    /// dispatched this session. Returns whether this call dispatched it.
    ///
    /// The registry entry is claimed atomically before the provider is
    /// invoked, so concurrent or rapid re-invocation with the same account
    /// issues exactly one provider call. A provider failure is absorbed: the
    /// entry stays claimed (no automatic retry) and the raw store stays
    /// empty, so lookups resolve to absent rather than erroring.
    pub async fn ensure_fetched<P: BalanceProvider>(
        &self,
        class: AccountClass,
        account: &str,
        provider: &P,
    ) -> bool {
        let store = self.class(class);
        match store.fetched.entry(account.to_owned()) {
            Entry::Occupied(_) => return false,
            Entry::Vacant(slot) => {
                slot.insert(FetchState::default());
            },
        }

        debug!(target: "balances", %class, account, "dispatching balance fetch");
        match provider.get_balances(account).await {
            Ok(records) => {
                store.raw.insert(account.to_owned(), records);
                if let Some(mut state) = store.fetched.get_mut(account) {
                    state.stored = true;
                }
            },
            Err(err) => {
                warn!(
                    target: "balances",
                    %class, account, %err,
                    "balance fetch failed; balances stay absent for this session"
                );
            },
        }
        true
    }

    /// Merges the raw stores of the currently connected accounts into one
    /// balance map.
    ///
    /// A pure derivation over the raw stores, recomputed on demand. If both
    /// accounts hold a balance for the same (chain, address) the last merged
    /// wins; in the real deployment the two account namespaces do not
    /// overlap chains.
    pub fn balance_map(
        &self,
        evm_account: Option<&str>,
        alt_account: Option<&str>,
    ) -> BalanceMap {
        let mut map = BalanceMap::default();
        for (store, account) in [(&self.evm, evm_account), (&self.alt, alt_account)] {
            let Some(account) = account else { continue };
            let Some(records) = store.raw.get(account) else { continue };
            for record in records.iter() {
                map.insert_record(record);
            }
        }
        map
    }
}

/// Derived balance lookup table: chain -> canonical address -> amount.
#[derive(Clone, Debug, Default)]
pub struct BalanceMap {
    map: HashMap<ChainId, HashMap<TokenAddress, CurrencyAmount>>,
}

impl BalanceMap {
    fn insert_record(&mut self, record: &Balance) {
        let amount = match record.amount() {
            Ok(amount) => amount,
            Err(err) => {
                warn!(target: "balances", chain = record.chain_id, address = %record.address, %err, "skipping malformed balance record");
                return;
            },
        };

        let address = record.address.canonical();
        let (amount, currency) = if address.is_native() {
            // Headroom deduction applies to the native entry only; balances
            // below the headroom expose zero, never underflow.
            (
                amount.saturating_sub(U256::from(NATIVE_BALANCE_HEADROOM)),
                Currency::Native {
                    chain_id: record.chain_id,
                    decimals: record.decimals,
                    symbol: record.symbol.clone(),
                    name: record.name.clone(),
                },
            )
        } else {
            (
                amount,
                Currency::Token(crate::types::TokenDescriptor {
                    chain_id: record.chain_id,
                    address: address.clone(),
                    decimals: record.decimals,
                    symbol: record.symbol.clone(),
                    name: record.name.clone(),
                }),
            )
        };

        self.map
            .entry(record.chain_id)
            .or_default()
            .insert(address, CurrencyAmount::from_raw(currency, amount));
    }

    pub fn is_empty(&self) -> bool { self.map.is_empty() }

    /// Amount held of `currency`. `None` means not yet fetched or not held.
    pub fn lookup(&self, currency: &Currency) -> Option<&CurrencyAmount> {
        let per_chain = self.map.get(&currency.chain_id())?;
        match currency {
            Currency::Native { .. } => per_chain.get(&TokenAddress::native()),
            Currency::Token(token) => per_chain.get(&token.address),
        }
    }

    /// Amount stored under `(chain_id, address)`.
    pub fn get(&self, chain_id: ChainId, address: &TokenAddress) -> Option<&CurrencyAmount> {
        self.map.get(&chain_id)?.get(&address.canonical())
    }

    /// All (chain, address, amount) entries, order not significant.
    pub fn iter(&self) -> impl Iterator<Item = (ChainId, &TokenAddress, &CurrencyAmount)> {
        self.map.iter().flat_map(|(chain_id, per_chain)| {
            per_chain.iter().map(move |(address, amount)| (*chain_id, address, amount))
        })
    }
}

#[cfg(feature = "display")]
impl std::fmt::Display for BalanceMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use colored::Colorize;
        use tabled::{builder::Builder, settings::Style};

        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by_key(|(chain_id, address, _)| (*chain_id, address.as_str().to_owned()));

        let mut builder = Builder::default();
        builder.push_record(["Chain", "Symbol", "Address", "Balance"]);
        for (chain_id, address, amount) in entries {
            builder.push_record([
                chain_id.to_string(),
                amount.currency().symbol().to_owned(),
                address.to_string(),
                amount.to_string().green().to_string(),
            ]);
        }
        let mut table = builder.build();
        table.with(Style::sharp());
        table.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        testing::{StaticBalances, balance},
        types::NATIVE_SENTINEL,
    };

    #[tokio::test]
    async fn second_dispatch_is_a_no_op() {
        let cache = BalanceCache::new();
        let provider =
            StaticBalances::new().with_account("0xabc", vec![balance(1, "0xAAA", "100", 6, "USDC")]);

        assert!(cache.ensure_fetched(AccountClass::Evm, "0xabc", &provider).await);
        assert!(!cache.ensure_fetched(AccountClass::Evm, "0xabc", &provider).await);
        assert_eq!(provider.calls(), 1);

        let map = cache.balance_map(Some("0xabc"), None);
        assert_eq!(
            map.get(1, &TokenAddress::new("0xaaa")).unwrap().raw(),
            U256::from(100u64)
        );
    }

    #[tokio::test]
    async fn failed_fetch_is_absorbed_and_not_retried() {
        let cache = BalanceCache::new();
        let provider = StaticBalances::failing();

        assert!(cache.ensure_fetched(AccountClass::Evm, "0xabc", &provider).await);
        assert!(!cache.ensure_fetched(AccountClass::Evm, "0xabc", &provider).await);
        assert_eq!(provider.calls(), 1);

        let state = cache.fetch_state(AccountClass::Evm, "0xabc").unwrap();
        assert!(!state.stored);
        assert!(cache.balance_map(Some("0xabc"), None).is_empty());
    }

    #[tokio::test]
    async fn native_headroom_is_deducted_saturating() {
        let cache = BalanceCache::new();
        let provider = StaticBalances::new().with_account(
            "0xabc",
            vec![
                balance(1, NATIVE_SENTINEL, "1000", 18, "ETH"),
                balance(137, NATIVE_SENTINEL, "1", 18, "MATIC"),
                balance(1, "0xAAA", "2", 6, "USDC"),
            ],
        );
        cache.ensure_fetched(AccountClass::Evm, "0xabc", &provider).await;
        let map = cache.balance_map(Some("0xabc"), None);

        let native = Currency::Native {
            chain_id: 1,
            decimals: 18,
            symbol: "ETH".to_owned(),
            name: String::new(),
        };
        assert_eq!(map.lookup(&native).unwrap().raw(), U256::from(998u64));

        // Below the headroom the exposed amount saturates at zero.
        assert_eq!(map.get(137, &TokenAddress::native()).unwrap().raw(), U256::ZERO);

        // Contract tokens are never adjusted.
        assert_eq!(map.get(1, &TokenAddress::new("0xAAA")).unwrap().raw(), U256::from(2u64));
    }

    #[tokio::test]
    async fn malformed_record_degrades_to_absent() {
        let cache = BalanceCache::new();
        let provider = StaticBalances::new().with_account(
            "0xabc",
            vec![
                balance(1, "0xAAA", "not a number", 6, "BAD"),
                balance(1, "0xBBB", "7", 6, "OK"),
            ],
        );
        cache.ensure_fetched(AccountClass::Evm, "0xabc", &provider).await;
        let map = cache.balance_map(Some("0xabc"), None);
        assert!(map.get(1, &TokenAddress::new("0xAAA")).is_none());
        assert_eq!(map.get(1, &TokenAddress::new("0xBBB")).unwrap().raw(), U256::from(7u64));
    }

    #[tokio::test]
    async fn map_reflects_account_set_changes_without_refetch() {
        let cache = BalanceCache::new();
        let provider = StaticBalances::new()
            .with_account("0xone", vec![balance(1, "0xAAA", "1", 6, "USDC")])
            .with_account("0xtwo", vec![balance(1, "0xAAA", "2", 6, "USDC")]);

        cache.ensure_fetched(AccountClass::Evm, "0xone", &provider).await;
        cache.ensure_fetched(AccountClass::Evm, "0xtwo", &provider).await;
        assert_eq!(provider.calls(), 2);

        let map = cache.balance_map(Some("0xone"), None);
        assert_eq!(map.get(1, &TokenAddress::new("0xaaa")).unwrap().raw(), U256::from(1u64));

        // Switching the active account switches the derived view; the raw
        // store for the previous account is retained.
        let map = cache.balance_map(Some("0xtwo"), None);
        assert_eq!(map.get(1, &TokenAddress::new("0xaaa")).unwrap().raw(), U256::from(2u64));
        assert!(!cache.ensure_fetched(AccountClass::Evm, "0xone", &provider).await);
    }
}
