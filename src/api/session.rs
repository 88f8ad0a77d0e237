// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session sign-in exchange and session reads (dashboard flow).
//!
//! Sign-in verifies the ID token cryptographically once and stores the
//! claims with the embedded expiry. Reads recompute the role from the
//! current allow-list and flag expiry without re-verifying the signature.
//! Nothing here gates mutating registry state; that is the bearer path's
//! job.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    auth::{AuthError, EditorOnly, Role, Session, SessionIdentity},
    error::{ApiError, Envelope},
    state::AppState,
};

/// Sign-in exchange request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SignInRequest {
    /// Identity-provider ID token obtained from the OAuth flow.
    pub id_token: String,
}

/// Sign-in exchange result.
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionCreated {
    /// Identifier for subsequent session reads.
    pub session_id: Uuid,
    /// Email the session was established for.
    pub email: String,
    /// Role at sign-in time (informational; reads recompute it).
    pub role: Role,
}

/// Establish a session from a verified ID token.
#[utoipa::path(
    post,
    path = "/v1/session",
    tag = "Session",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Session established", body = Envelope<SessionCreated>),
        (status = 401, description = "Invalid token")
    )
)]
pub async fn sign_in(
    State(state): State<AppState>,
    Json(request): Json<SignInRequest>,
) -> Result<Json<Envelope<SessionCreated>>, AuthError> {
    // The one cryptographic verification this session will ever get.
    let identity = state.verifier.verify(&request.id_token).await?;

    let expires_at = identity.claims["exp"].as_i64().unwrap_or(0);
    let session = Session {
        email: identity.email.clone(),
        claims: identity.claims,
        expires_at,
        created_at: Utc::now(),
    };

    let session_id = state.sessions.write().await.insert(session);
    tracing::info!(%session_id, "session established");

    Ok(Json(Envelope::ok(SessionCreated {
        session_id,
        email: identity.email,
        role: identity.role,
    })))
}

/// Read a session: current role and expiry state.
#[utoipa::path(
    get,
    path = "/v1/session/{session_id}",
    tag = "Session",
    params(
        ("session_id" = Uuid, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Session state", body = Envelope<SessionIdentity>),
        (status = 404, description = "Session not found")
    )
)]
pub async fn read_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Envelope<SessionIdentity>>, ApiError> {
    let sessions = state.sessions.read().await;
    let session = sessions
        .get(&session_id)
        .ok_or_else(|| ApiError::not_found("Session not found"))?;

    let identity = SessionIdentity::read(
        session,
        state.verifier.allow_list(),
        Utc::now().timestamp(),
    );

    Ok(Json(Envelope::ok(identity)))
}

/// Revoke a session. Requires the `editor` role on the bearer path.
#[utoipa::path(
    delete,
    path = "/v1/session/{session_id}",
    tag = "Session",
    params(
        ("session_id" = Uuid, Path, description = "Session ID")
    ),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Session revoked"),
        (status = 401, description = "Invalid token"),
        (status = 403, description = "Insufficient permissions"),
        (status = 404, description = "Session not found")
    )
)]
pub async fn revoke_session(
    EditorOnly(identity): EditorOnly,
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Envelope<()>>, ApiError> {
    let removed = state.sessions.write().await.remove(&session_id);
    if !removed {
        return Err(ApiError::not_found("Session not found"));
    }

    tracing::info!(%session_id, revoked_by = %identity.email, "session revoked");

    Ok(Json(Envelope::with_message("Session revoked", ())))
}
