use std::collections::HashMap;

use crate::{
    chains,
    types::{ChainId, Currency, TokenAddress, TokenDescriptor},
};

/// Per-chain, per-address token lookup table.
///
/// Built from the flat token-list feed. Native-asset entries are always
/// stored under [`TokenAddress::native`], whatever sentinel the feed used,
/// so balance lookups cannot tell native assets from contract tokens.
#[derive(Clone, Debug, Default)]
pub struct ChainTokenMap {
    map: HashMap<ChainId, HashMap<TokenAddress, TokenDescriptor>>,
}

impl ChainTokenMap {
    /// Builds the catalog from a token-list feed.
    ///
    /// Catalog completeness is best effort: a descriptor with a missing
    /// chain ID or an empty address is skipped, the rest of the list still
    /// loads. Overall list integrity is validated upstream.
    pub fn from_tokens<I>(tokens: I) -> Self
    where
        I: IntoIterator<Item = TokenDescriptor>,
    {
        let mut map: HashMap<ChainId, HashMap<TokenAddress, TokenDescriptor>> = HashMap::new();
        for mut token in tokens {
            if token.chain_id == 0 || token.address.is_empty() {
                continue;
            }
            token.address = token.address.canonical();
            map.entry(token.chain_id)
                .or_default()
                .insert(token.address.clone(), token);
        }
        Self { map }
    }

    pub fn is_empty(&self) -> bool { self.map.is_empty() }

    /// Number of tokens across all chains.
    pub fn len(&self) -> usize { self.map.values().map(HashMap::len).sum() }

    /// Token stored under `(chain_id, address)`; the feed sentinel resolves
    /// to the native entry.
    pub fn get(&self, chain_id: ChainId, address: &TokenAddress) -> Option<&TokenDescriptor> {
        self.map.get(&chain_id)?.get(&address.canonical())
    }

    /// Catalog descriptor backing `currency`, if any.
    pub fn resolve(&self, currency: &Currency) -> Option<&TokenDescriptor> {
        let per_chain = self.map.get(&currency.chain_id())?;
        match currency {
            Currency::Native { .. } => per_chain.get(&TokenAddress::native()),
            Currency::Token(token) => per_chain.get(&token.address),
        }
    }

    /// All tokens of one chain.
    pub fn chain_tokens(&self, chain_id: ChainId) -> impl Iterator<Item = &TokenDescriptor> {
        self.map.get(&chain_id).into_iter().flat_map(HashMap::values)
    }

    /// Flattened catalog, order not significant.
    pub fn all_tokens(&self) -> impl Iterator<Item = &TokenDescriptor> {
        self.map.values().flat_map(HashMap::values)
    }

    /// Tokens restricted to the visible-chain allow-list, used to bound the
    /// default pickers to supported chains.
    pub fn visible_tokens(&self) -> Vec<&TokenDescriptor> {
        self.all_tokens()
            .filter(|token| chains::VISIBLE_CHAIN_IDS.contains(&token.chain_id))
            .collect()
    }

    /// Resolves an externally supplied preset list.
    ///
    /// Unresolvable pairs are dropped. A non-empty preset fully replaces the
    /// default visible view (a configuration override, not a merge); an
    /// empty preset falls back to [`Self::visible_tokens`].
    pub fn select_tokens(&self, presets: &[(ChainId, TokenAddress)]) -> Vec<&TokenDescriptor> {
        if presets.is_empty() {
            return self.visible_tokens();
        }
        presets
            .iter()
            .filter_map(|(chain_id, address)| self.get(*chain_id, address))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NATIVE_SENTINEL;

    fn token(chain_id: ChainId, address: &str, decimals: u8, symbol: &str) -> TokenDescriptor {
        TokenDescriptor {
            chain_id,
            address: TokenAddress::new(address),
            decimals,
            symbol: symbol.to_owned(),
            name: symbol.to_owned(),
        }
    }

    #[test]
    fn sentinel_is_rewritten_to_native_key() {
        let catalog = ChainTokenMap::from_tokens([
            token(1, NATIVE_SENTINEL, 18, "ETH"),
            token(1, "0xAAA", 6, "USDC"),
        ]);

        let native = catalog.get(1, &TokenAddress::native()).unwrap();
        assert_eq!(native.symbol, "ETH");
        assert_eq!(native.decimals, 18);
        assert_eq!(native.address, TokenAddress::native());

        // The sentinel never appears as a stored key, but resolves to the
        // native entry.
        assert!(catalog.all_tokens().all(|t| !t.address.is_sentinel()));
        assert_eq!(catalog.get(1, &TokenAddress::new(NATIVE_SENTINEL)).unwrap().symbol, "ETH");

        assert_eq!(catalog.get(1, &TokenAddress::new("0xaaa")).unwrap().symbol, "USDC");
    }

    #[test]
    fn malformed_descriptors_are_skipped() {
        let catalog = ChainTokenMap::from_tokens([
            token(0, "0xAAA", 6, "NOCHAIN"),
            token(1, "", 6, "NOADDR"),
            token(1, "0xBBB", 8, "OK"),
        ]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(1, &TokenAddress::new("0xBBB")).unwrap().symbol, "OK");
    }

    #[test]
    fn addresses_are_case_insensitive() {
        let catalog = ChainTokenMap::from_tokens([token(1, "0xAbCd", 6, "MIXED")]);
        assert!(catalog.get(1, &TokenAddress::new("0xABCD")).is_some());
        assert!(catalog.get(1, &TokenAddress::new("0xabcd")).is_some());
    }

    #[test]
    fn visible_view_is_bounded_by_allow_list() {
        let catalog = ChainTokenMap::from_tokens([
            token(chains::MAINNET, "0xAAA", 6, "USDC"),
            token(999_999, "0xBBB", 6, "HIDDEN"),
        ]);
        let visible = catalog.visible_tokens();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].symbol, "USDC");
        assert_eq!(catalog.all_tokens().count(), 2);
    }

    #[test]
    fn presets_replace_the_visible_view() {
        let catalog = ChainTokenMap::from_tokens([
            token(chains::MAINNET, "0xAAA", 6, "USDC"),
            token(chains::POLYGON, "0xBBB", 18, "WMATIC"),
            token(999_999, "0xCCC", 6, "OFFLIST"),
        ]);

        // Unresolvable presets are dropped, resolvable ones override the
        // visible view entirely.
        let selected = catalog.select_tokens(&[
            (999_999, TokenAddress::new("0xCCC")),
            (chains::MAINNET, TokenAddress::new("0xMISSING")),
        ]);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].symbol, "OFFLIST");

        // Empty preset falls back to the visible view.
        assert_eq!(catalog.select_tokens(&[]).len(), 2);
    }
}
