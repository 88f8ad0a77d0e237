// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Registry Gateway - Authorization & RPC Access Gateway
//!
//! Verifies externally-issued identity tokens, derives the caller's role
//! from an email allow-list, and serves ledger reads through a pool of
//! configured JSON-RPC endpoints.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Token verification and role resolution
//! - `rpc` - RPC provider pool and ledger client
//! - `config` - Environment-driven configuration
//! - `error` - Response envelope and API error type

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod rpc;
pub mod state;
