// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token claims and the resolved identity handed to callers.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::roles::Role;

/// Claims deserialized from an identity-provider token.
///
/// Standard OIDC claims plus whatever custom claims the provider attaches;
/// unknown claims are preserved in `extra` so the raw claim set survives
/// into [`ResolvedIdentity`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdTokenClaims {
    /// Verified email address. Required for role derivation.
    #[serde(default)]
    pub email: Option<String>,

    /// Subject (provider-assigned user identifier).
    #[serde(default)]
    pub sub: Option<String>,

    /// Expiration timestamp (Unix seconds).
    #[serde(default)]
    pub exp: i64,

    /// Issued at timestamp.
    #[serde(default)]
    pub iat: i64,

    /// Issuer.
    #[serde(default)]
    pub iss: String,

    /// Audience (validated by the jsonwebtoken crate, kept for the raw claim set).
    #[serde(default)]
    pub aud: Option<serde_json::Value>,

    /// Any remaining provider-specific claims.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl IdTokenClaims {
    /// The full claim set as an opaque JSON payload.
    pub fn to_raw(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Output of a successful token verification.
///
/// Request-scoped: created per verification call, owned by the caller for
/// the duration of the request, never persisted or cached. The role is
/// recomputed from the allow-list on every verification.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ResolvedIdentity {
    /// Verified email address from the token.
    pub email: String,

    /// Caller's derived role.
    pub role: Role,

    /// Raw claim set, for callers that need provider-specific claims.
    #[serde(skip)]
    pub claims: serde_json::Value,
}
