// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication and authorization errors.
//!
//! The taxonomy is deliberately small. Every verification failure (missing,
//! malformed, expired, wrong audience, bad signature, provider unreachable)
//! collapses into `InvalidToken`; the sub-reason is logged internally and
//! never returned to the caller, to avoid leaking verification internals or
//! allow-list membership.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::Envelope;

/// Authentication error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Token missing or failed verification, for any reason.
    #[error("Invalid token")]
    InvalidToken,

    /// Verified identity lacks the required role. A caller-side policy
    /// decision; the verifier itself never raises this.
    #[error("Insufficient permissions for this operation")]
    Unauthorized,
}

impl AuthError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
            AuthError::Unauthorized => StatusCode::FORBIDDEN,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = Json(Envelope::<()> {
            message: self.to_string(),
            data: None,
        });
        (self.status_code(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn invalid_token_returns_401() {
        let response = AuthError::InvalidToken.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(body["message"], "Invalid token");
        assert!(body.get("data").is_none());
    }

    #[tokio::test]
    async fn unauthorized_returns_403() {
        let response = AuthError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
