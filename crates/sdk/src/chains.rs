//! Identifiers of the ledgers the aggregator knows about.
//!
//! Chain IDs are only unique within their namespace: the alternate-chain
//! account class claims IDs from a range that does not collide with the EVM
//! networks in the current deployment, but nothing enforces that globally.

use crate::types::ChainId;

pub const MAINNET: ChainId = 1;
pub const OPTIMISM: ChainId = 10;
pub const BSC: ChainId = 56;
pub const POLYGON: ChainId = 137;
pub const FANTOM: ChainId = 250;
pub const BASE: ChainId = 8453;
pub const STARKNET: ChainId = 15366;
pub const ARBITRUM_ONE: ChainId = 42161;
pub const AVALANCHE: ChainId = 43114;

/// Chains whose tokens appear in the default picker views.
/// Tokens on other chains stay resolvable through the catalog but are not
/// listed unless selected through a preset.
pub const VISIBLE_CHAIN_IDS: [ChainId; 9] = [
    MAINNET,
    POLYGON,
    STARKNET,
    ARBITRUM_ONE,
    OPTIMISM,
    FANTOM,
    BSC,
    AVALANCHE,
    BASE,
];
