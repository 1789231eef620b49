use std::{collections::HashMap, path::Path};

use anyhow::Context;
use colored::Colorize;
use crosswap_sdk::{
    state::BalanceCache,
    testing::StaticBalances,
    types::{AccountClass, Balance},
};

/// Balance export: account-class ("evm"/"alt") -> account -> records.
type BalanceExport = HashMap<String, HashMap<String, Vec<Balance>>>;

pub(crate) async fn render(
    path: &Path,
    evm_account: Option<&str>,
    alt_account: Option<&str>,
) -> anyhow::Result<()> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("reading balance export {}", path.display()))?;
    let export: BalanceExport =
        serde_json::from_slice(&bytes).context("parsing balance export")?;

    let provider_for = |class: &str| {
        export
            .get(class)
            .into_iter()
            .flatten()
            .fold(StaticBalances::new(), |provider, (account, records)| {
                provider.with_account(account, records.clone())
            })
    };
    let evm_provider = provider_for("evm");
    let alt_provider = provider_for("alt");

    let cache = BalanceCache::new();
    if let Some(account) = evm_account {
        cache.ensure_fetched(AccountClass::Evm, account, &evm_provider).await;
    }
    if let Some(account) = alt_account {
        cache.ensure_fetched(AccountClass::Alt, account, &alt_provider).await;
    }

    let map = cache.balance_map(evm_account, alt_account);
    if map.is_empty() {
        println!("{}", "no balances for the given accounts".yellow());
        return Ok(());
    }
    println!("{map}");

    Ok(())
}
