// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractors for verified callers.
//!
//! Use `Auth` in handlers to require a verified bearer token:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(identity): Auth) -> impl IntoResponse {
//!     // identity is ResolvedIdentity
//! }
//! ```
//!
//! `EditorOnly` additionally requires the `editor` role. Every mutating
//! route must use one of these — the session path is for page rendering
//! only and never gates state changes.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use super::claims::ResolvedIdentity;
use super::error::AuthError;
use crate::state::AppState;

/// Extractor requiring a verified bearer token.
///
/// The token is re-verified on every request; nothing is cached. A missing
/// or malformed `Authorization` header is treated exactly like a failed
/// verification (`InvalidToken`), never as an anonymous viewer.
pub struct Auth(pub ResolvedIdentity);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Middleware or a test may have resolved the identity already.
        if let Some(identity) = parts.extensions.get::<ResolvedIdentity>().cloned() {
            return Ok(Auth(identity));
        }

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::InvalidToken)?
            .to_str()
            .map_err(|_| AuthError::InvalidToken)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidToken)?;

        let identity = state.verifier.verify(token).await?;

        Ok(Auth(identity))
    }
}

/// Extractor requiring the `editor` role.
pub struct EditorOnly(pub ResolvedIdentity);

impl FromRequestParts<AppState> for EditorOnly {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Auth(identity) = Auth::from_request_parts(parts, state).await?;

        if !identity.role.can_edit() {
            return Err(AuthError::Unauthorized);
        }

        Ok(EditorOnly(identity))
    }
}
