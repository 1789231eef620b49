use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use super::{ChainId, TokenAddress};
use crate::error::Error;

/// One raw balance record as returned by a balance provider, one per
/// (account, chain, address) tuple.
///
/// The amount arrives as an arbitrary-precision unsigned integer string in
/// the token's smallest unit; it is parsed only when records are merged into
/// the derived balance map, so one malformed record degrades to absent
/// instead of failing the whole fetch.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    pub chain_id: ChainId,
    pub address: TokenAddress,
    pub balance: String,
    pub decimals: u8,
    pub symbol: String,
    #[serde(default)]
    pub name: String,
}

impl Balance {
    /// Parses the raw amount string.
    pub fn amount(&self) -> Result<U256, Error> {
        self.balance
            .parse::<U256>()
            .map_err(|err| Error::Parse(format!("balance {:?}: {err}", self.balance)))
    }
}
