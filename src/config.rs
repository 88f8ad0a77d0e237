// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names and the loaded gateway
//! configuration. Configuration is read from the environment once at startup
//! and injected into components explicitly, so tests can supply distinct
//! configurations without process-wide side effects.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `AUTH_JWKS_URL` | Identity provider JWKS endpoint for token verification | Required for production |
//! | `AUTH_ISSUER` | Expected token issuer claim | Optional |
//! | `AUTH_AUDIENCE` | Expected token audience claim (client identifier) | Optional |
//! | `EDITOR_ALLOWLIST` | Comma-separated emails granted the `editor` role | Empty (everyone is `viewer`) |
//! | `RPC_URLS` | Comma-separated JSON-RPC endpoint URLs | Empty (pool fails closed) |
//! | `RPC_DENYLIST` | Comma-separated endpoint URLs excluded from the pool | Empty |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::env;

/// Environment variable name for the identity provider JWKS endpoint.
pub const AUTH_JWKS_URL_ENV: &str = "AUTH_JWKS_URL";

/// Environment variable name for the expected token issuer.
pub const AUTH_ISSUER_ENV: &str = "AUTH_ISSUER";

/// Environment variable name for the expected token audience (client identifier).
pub const AUTH_AUDIENCE_ENV: &str = "AUTH_AUDIENCE";

/// Environment variable name for the editor allow-list.
///
/// The value is split on commas into a set of email addresses. Membership is
/// exact-string and case-sensitive; no normalization is performed.
pub const EDITOR_ALLOWLIST_ENV: &str = "EDITOR_ALLOWLIST";

/// Environment variable name for the RPC endpoint list.
pub const RPC_URLS_ENV: &str = "RPC_URLS";

/// Environment variable name for the RPC endpoint denylist.
///
/// Endpoints listed here are dropped from the pool at construction time
/// (known-unreliable or decommissioned nodes).
pub const RPC_DENYLIST_ENV: &str = "RPC_DENYLIST";

/// Environment variable name for the server bind address.
pub const HOST_ENV: &str = "HOST";

/// Environment variable name for the server bind port.
pub const PORT_ENV: &str = "PORT";

/// Environment variable name for the logging format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Gateway configuration loaded from the environment at startup.
#[derive(Debug, Clone, Default)]
pub struct GatewayConfig {
    /// JWKS endpoint of the identity provider. When absent, the verifier
    /// runs in development mode (no signature verification).
    pub jwks_url: Option<String>,
    /// Expected issuer claim, if enforced.
    pub issuer: Option<String>,
    /// Expected audience claim (the configured client identifier), if enforced.
    pub audience: Option<String>,
    /// Raw comma-separated editor allow-list.
    pub editor_allowlist: String,
    /// Raw comma-separated RPC endpoint URLs.
    pub rpc_urls: String,
    /// RPC endpoints excluded from the pool.
    pub rpc_denylist: Vec<String>,
    /// Server bind address.
    pub host: String,
    /// Server bind port.
    pub port: u16,
}

impl GatewayConfig {
    /// Load configuration from process environment variables.
    ///
    /// Missing variables fall back to defaults; this never fails. A pool
    /// configured with zero endpoints is recorded as empty and fails closed
    /// at selection time, not at startup.
    pub fn from_env() -> Self {
        Self {
            jwks_url: env::var(AUTH_JWKS_URL_ENV).ok(),
            issuer: env::var(AUTH_ISSUER_ENV).ok(),
            audience: env::var(AUTH_AUDIENCE_ENV).ok(),
            editor_allowlist: env::var(EDITOR_ALLOWLIST_ENV).unwrap_or_default(),
            rpc_urls: env::var(RPC_URLS_ENV).unwrap_or_default(),
            rpc_denylist: env::var(RPC_DENYLIST_ENV)
                .unwrap_or_default()
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(|s| s.trim().to_string())
                .collect(),
            host: env::var(HOST_ENV).unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var(PORT_ENV)
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_empty() {
        let config = GatewayConfig::default();
        assert!(config.jwks_url.is_none());
        assert!(config.editor_allowlist.is_empty());
        assert!(config.rpc_denylist.is_empty());
    }
}
