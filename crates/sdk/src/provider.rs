//! External collaborator interfaces.
//!
//! The aggregation core never talks to the network itself; it is handed
//! implementations of these traits. The quote/routing service has no trait
//! here: its payload arrives pre-fetched as [`crate::types::QuotePayload`].

use std::future::Future;

use crate::{
    error::Error,
    types::{Balance, TokenDescriptor},
};

/// Balance indexer for one account-class.
pub trait BalanceProvider {
    /// Fetches all token balances held by `account` across the chains this
    /// provider covers. A failure is reportable but non-fatal to the cache:
    /// the account's balances simply stay absent for the session.
    fn get_balances(
        &self,
        account: &str,
    ) -> impl Future<Output = Result<Vec<Balance>, Error>> + Send;
}

/// Authoritative token-list service.
pub trait TokenListProvider {
    fn get_supported_tokens(
        &self,
    ) -> impl Future<Output = Result<Vec<TokenDescriptor>, Error>> + Send;
}

/// ENS-style name resolution. Only usable on mainnet; see
/// [`crate::state::Session::name_resolver`] for the precondition check.
pub trait NameResolver {
    fn resolve_content_hash(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<String, Error>> + Send;
}
