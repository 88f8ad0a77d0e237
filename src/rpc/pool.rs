// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Pool of configured ledger RPC endpoints.
//!
//! The pool is built once at process start from a comma-separated URL list
//! minus a configured denylist, and is immutable afterwards: no dynamic
//! add/remove and no health-based eviction. Selection is an independent
//! uniform random draw on every call, with no memory across calls and no
//! failover — an error from the selected client propagates to the caller.
//! Bounded retry across the remaining pool is a deliberate extension point,
//! not implemented here.

use rand::Rng;

use super::client::LedgerClient;
use super::RpcError;

/// Process-wide pool of ledger RPC clients.
pub struct RpcPool {
    clients: Vec<LedgerClient>,
}

impl RpcPool {
    /// Build a pool from a comma-separated URL string.
    ///
    /// URLs present in `denylist` (exact match) are dropped, as are URLs
    /// that fail to parse. An empty surviving set is recorded without
    /// failing; selection then fails closed with
    /// [`RpcError::NoProviderAvailable`].
    pub fn from_config(urls: &str, denylist: &[String]) -> Self {
        let mut clients = Vec::new();

        for url in urls.split(',').map(str::trim).filter(|u| !u.is_empty()) {
            if denylist.iter().any(|d| d == url) {
                tracing::warn!(%url, "skipping denylisted RPC endpoint");
                continue;
            }

            match LedgerClient::connect(url) {
                Ok(client) => clients.push(client),
                Err(e) => {
                    tracing::warn!(%url, error = %e, "skipping unparseable RPC endpoint");
                }
            }
        }

        if clients.is_empty() {
            tracing::warn!("RPC pool initialized with zero usable endpoints");
        } else {
            tracing::info!(size = clients.len(), "RPC pool initialized");
        }

        Self { clients }
    }

    /// Number of usable endpoints.
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// URLs of the surviving endpoints, in configuration order.
    pub fn urls(&self) -> Vec<&str> {
        self.clients.iter().map(LedgerClient::url).collect()
    }

    /// Select a client for one request.
    ///
    /// Uniform random draw among the surviving endpoints; every call is
    /// independent. Fails with [`RpcError::NoProviderAvailable`] when the
    /// pool is empty.
    pub fn select(&self) -> Result<&LedgerClient, RpcError> {
        if self.clients.is_empty() {
            return Err(RpcError::NoProviderAvailable);
        }

        let idx = rand::rng().random_range(0..self.clients.len());
        Ok(&self.clients[idx])
    }
}
