pub mod args;
mod balances;
mod quote;
mod tokens;

use std::path::Path;

use anyhow::Context;
use args::Cli;
use crosswap_sdk::{state::ChainTokenMap, types::TokenDescriptor};

use crate::args::Commands;

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Tokens { chain, all } => {
            tokens::render(&load_catalog(&cli.tokens)?, chain, all)
        },
        Commands::Balances { balances, evm, alt } => {
            balances::render(&balances, evm.as_deref(), alt.as_deref()).await?
        },
        Commands::Quote { quote, slippage } => {
            quote::render(&load_catalog(&cli.tokens)?, &quote, slippage.as_deref())?
        },
    }

    Ok(())
}

fn load_catalog(path: &Path) -> anyhow::Result<ChainTokenMap> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("reading token list {}", path.display()))?;
    let tokens: Vec<TokenDescriptor> =
        serde_json::from_slice(&bytes).context("parsing token list")?;
    Ok(ChainTokenMap::from_tokens(tokens))
}
