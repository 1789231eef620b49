use colored::Colorize;
use crosswap_sdk::state::ChainTokenMap;
use itertools::Itertools;
use tabled::{Table, settings::Style};

pub(crate) fn render(catalog: &ChainTokenMap, chain: Option<u64>, all: bool) {
    let tokens = if let Some(chain_id) = chain {
        catalog.chain_tokens(chain_id).collect::<Vec<_>>()
    } else if all {
        catalog.all_tokens().collect()
    } else {
        catalog.visible_tokens()
    };

    println!(
        "{}",
        format!("{} token(s) of {} in catalog", tokens.len(), catalog.len()).bold()
    );

    let rows = tokens
        .into_iter()
        .sorted_by_key(|token| (token.chain_id, token.symbol.clone()))
        .cloned()
        .collect::<Vec<_>>();
    let mut table = Table::new(rows);
    table.with(Style::sharp());
    println!("{table}");
}
