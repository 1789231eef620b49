mod amount;
mod balance;
mod token;
mod trade;

pub use amount::*;
pub use balance::*;
pub use token::*;
pub use trade::*;

/// Numeric identifier of a ledger/network.
///
/// Only unique within its account-class namespace: the alternate-chain IDs
/// and the EVM IDs happen not to collide in the current deployment, but the
/// type does not enforce that.
pub type ChainId = u64;

/// Wallet namespace a connected account belongs to. Each class has its own
/// address space and its own balance provider; their raw balance stores are
/// kept separate and only merged in derived views.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccountClass {
    /// EVM-style account (20-byte hex address).
    Evm,
    /// Alternate-chain account (address space independent of EVM).
    Alt,
}

impl std::fmt::Display for AccountClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountClass::Evm => write!(f, "evm"),
            AccountClass::Alt => write!(f, "alt"),
        }
    }
}
