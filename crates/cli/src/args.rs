use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "crosswap-cli", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Exported token list to build the catalog from (JSON, as returned by
    /// the token-list service)
    #[arg(long, global = true, default_value = "tokens.json")]
    pub tokens: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the token catalog and show the default picker view
    Tokens {
        /// Restrict to a single chain ID
        #[arg(long)]
        chain: Option<u64>,

        /// Show every catalog entry, not just the visible chains
        #[arg(long, default_value_t = false)]
        all: bool,
    },
    /// Merge exported per-account balance records into one balance table
    Balances {
        /// Balance export (JSON: {"evm": {account: [records]}, "alt": {...}})
        #[arg(long)]
        balances: PathBuf,

        /// Active EVM account address
        #[arg(long)]
        evm: Option<String>,

        /// Active alternate-chain account address
        #[arg(long)]
        alt: Option<String>,
    },
    /// Inspect a quote payload: route, minimum received, price impact
    Quote {
        /// Quote payload (JSON, as returned by the routing service)
        #[arg(long)]
        quote: PathBuf,

        /// Max slippage percent, e.g. `0.5` [default: protocol default]
        #[arg(long)]
        slippage: Option<String>,
    },
}
