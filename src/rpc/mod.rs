// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # RPC Provider Pool
//!
//! Supplies a ready-to-use client bound to one of several configured ledger
//! RPC endpoints, spreading load across nodes. See [`pool::RpcPool`] for the
//! selection contract.

pub mod client;
pub mod pool;

pub use client::{format_balance, LedgerClient};
pub use pool::RpcPool;

/// Errors from the RPC pool and its clients.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// Endpoint URL did not parse.
    #[error("Invalid RPC URL: {0}")]
    InvalidUrl(String),

    /// Caller-supplied address did not parse.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// The underlying JSON-RPC call failed. Propagated as-is; the pool does
    /// not retry against another endpoint.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// The pool has zero usable endpoints (operational/configuration fault).
    #[error("No available RPC provider")]
    NoProviderAvailable,
}
