use thiserror::Error;

/// Errors produced by the SDK.
///
/// Balance-path fetch and parse failures are absorbed by the balance cache
/// (lookups degrade to absent); errors on the authoritative token-catalog
/// fetch propagate to the caller, since an empty catalog disables trading
/// altogether.
#[derive(Debug, Error)]
pub enum Error {
    /// Network or provider failure while fetching external data.
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// Malformed persisted or provider data.
    #[error("malformed data: {0}")]
    Parse(String),

    /// Invalid caller-supplied argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An operation was invoked without its preconditions, e.g. name
    /// resolution off the supported network. Fatal to that operation only.
    #[error("configuration error: {0}")]
    Configuration(String),
}
