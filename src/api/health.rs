// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

/// Health check response with individual component status.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReadyResponse {
    /// Overall health status ("ok" or "degraded").
    pub status: String,
    /// Individual health checks and their results.
    pub checks: HealthChecks,
}

/// Individual health check results.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthChecks {
    /// Whether the service process is running.
    pub service: String,
    /// RPC pool status ("ok" with a non-empty pool, "empty" otherwise).
    pub rpc_pool: String,
    /// JWKS (token signing keys) status.
    /// Only present in production mode (AUTH_JWKS_URL configured).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jwks: Option<String>,
}

/// Simple health check response for liveness probes.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Check whether the pool has at least one usable endpoint.
fn check_rpc_pool(state: &AppState) -> String {
    if state.rpc.is_empty() {
        "empty".to_string()
    } else {
        "ok".to_string()
    }
}

/// Check whether the identity provider's keys are reachable (production mode).
async fn check_jwks(state: &AppState) -> Option<String> {
    let jwks = state.verifier.jwks()?;

    if jwks.is_cached().await {
        return Some("ok".to_string());
    }

    match jwks.refresh().await {
        Ok(_) => Some("ok".to_string()),
        Err(_) => Some("unavailable".to_string()),
    }
}

/// Health check endpoint handler.
///
/// Returns 200 if all checks pass, 503 if any check fails.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = ReadyResponse),
        (status = 503, description = "Service is unhealthy", body = ReadyResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<ReadyResponse>) {
    let rpc_pool = check_rpc_pool(&state);
    let jwks = check_jwks(&state).await;

    let rpc_ok = rpc_pool == "ok";
    let jwks_ok = jwks.as_deref().map(|s| s == "ok").unwrap_or(true);
    let all_ok = rpc_ok && jwks_ok;

    let response = ReadyResponse {
        status: if all_ok { "ok" } else { "degraded" }.to_string(),
        checks: HealthChecks {
            service: "ok".to_string(),
            rpc_pool,
            jwks,
        },
    };

    let status = if all_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}

/// Liveness probe handler.
///
/// Always returns 200 if the process is running.
#[utoipa::path(
    get,
    path = "/health/live",
    tag = "Health",
    responses(
        (status = 200, description = "Service is alive", body = HealthResponse)
    )
)]
pub async fn liveness() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{TokenVerifier, VerifierConfig};
    use crate::rpc::RpcPool;

    fn state_with_pool(urls: &str) -> AppState {
        AppState::new(
            TokenVerifier::new(VerifierConfig::default()),
            RpcPool::from_config(urls, &[]),
        )
    }

    #[tokio::test]
    async fn empty_pool_reports_degraded() {
        let (status, Json(body)) = health(State(state_with_pool(""))).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.status, "degraded");
        assert_eq!(body.checks.rpc_pool, "empty");
    }

    #[tokio::test]
    async fn populated_pool_reports_ok() {
        let (status, Json(body)) = health(State(state_with_pool("https://ok1"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.status, "ok");
        // Development mode: no JWKS check reported.
        assert!(body.checks.jwks.is_none());
    }
}
