//! Crosswap aggregation SDK.
//!
//! # Overview
//!
//! Convenient in-memory cache of per-account token balances across multiple
//! independent ledgers, plus the numeric trade metrics derived from a quote
//! returned by the external routing service.
//!
//! Use [`state::Session`] to warm-start the token catalog from a
//! [`storage::KeyValueStore`] and reconcile it with the authoritative list
//! from a [`provider::TokenListProvider`]. Connected accounts are registered
//! on the session and their balances fetched (once per account per session)
//! through a [`provider::BalanceProvider`].
//!
//! Use [`metrics::minimum_amount_out`] and [`metrics::price_impact`] to turn
//! a [`types::Trade`] plus the user's slippage setting into the figures the
//! presentation layer renders.
//!
//! See `./tests` for examples.
//!
//! # Limitations/follow-ups
//!
//! * A failed balance fetch is never retried within a session; the affected
//!   account's balances stay absent. A retry/backoff policy is to follow.
//!
//! * Quote requests themselves are out of scope; the SDK only consumes the
//!   payload the routing service returns.
//!
//! # Features
//!
//! | Feature | Default | Description |
//! | --- | --- | --- |
//! | `display` | yes | Enables [`tabled::Tabled`] implementations for catalog types. |
//! | `testing` | yes | Enables [`testing`] module. |
//!
//! # Testing
//!
//! [`testing`] module provides scripted in-memory providers and a key-value
//! store so the whole session lifecycle can be driven without a network.

pub mod chains;
pub mod error;
pub mod metrics;
pub mod num;
pub mod provider;
pub mod state;
pub mod storage;
#[cfg(feature = "testing")]
pub mod testing;
pub mod types;
