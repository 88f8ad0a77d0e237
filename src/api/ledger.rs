// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Ledger read endpoints served through the RPC pool.

use std::str::FromStr;

use alloy::eips::BlockNumberOrTag;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    auth::Auth,
    error::{ApiError, Envelope},
    rpc::{format_balance, RpcError},
    state::AppState,
};

/// Query parameters for a balance read.
#[derive(Debug, Deserialize, IntoParams)]
pub struct BalanceQuery {
    /// Block tag to read at ("latest", "earliest", "pending", or a number).
    /// Defaults to "latest".
    pub block: Option<String>,
}

/// Balance read result.
#[derive(Debug, Serialize, ToSchema)]
pub struct BalanceData {
    /// Queried address.
    pub address: String,
    /// Endpoint that served the read.
    pub rpc_url: String,
    /// Balance in wei.
    pub balance_wei: String,
    /// Balance formatted in whole tokens.
    pub balance: String,
}

/// Get the native balance of an address.
///
/// The read is served by one endpoint drawn uniformly at random from the
/// configured pool. A failing endpoint is not retried; the error propagates.
#[utoipa::path(
    get,
    path = "/v1/ledger/{address}/balance",
    tag = "Ledger",
    params(
        ("address" = String, Path, description = "Account address (0x-prefixed)"),
        BalanceQuery
    ),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Balance retrieved successfully", body = Envelope<BalanceData>),
        (status = 400, description = "Invalid address or block tag"),
        (status = 401, description = "Invalid token"),
        (status = 503, description = "No RPC provider available")
    )
)]
pub async fn get_balance(
    Auth(_identity): Auth,
    State(state): State<AppState>,
    Path(address): Path<String>,
    Query(query): Query<BalanceQuery>,
) -> Result<Json<Envelope<BalanceData>>, ApiError> {
    let block_tag = query
        .block
        .as_deref()
        .map(BlockNumberOrTag::from_str)
        .transpose()
        .map_err(|_| ApiError::bad_request("Invalid block tag"))?;

    let client = state.rpc.select().map_err(|e| {
        tracing::error!(error = %e, "balance read failed: pool exhausted");
        ApiError::service_unavailable("No RPC provider available")
    })?;

    let balance = client
        .get_balance(&address, block_tag)
        .await
        .map_err(|e| match e {
            RpcError::InvalidAddress(_) => ApiError::bad_request("Invalid address"),
            other => {
                tracing::error!(rpc_url = client.url(), error = %other, "balance read failed");
                ApiError::internal("Failed to query balance")
            }
        })?;

    Ok(Json(Envelope::ok(BalanceData {
        address,
        rpc_url: client.url().to_string(),
        balance_wei: balance.to_string(),
        balance: format_balance(balance, 18),
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{ResolvedIdentity, Role, TokenVerifier, VerifierConfig};
    use crate::rpc::RpcPool;
    use axum::http::StatusCode;

    fn viewer() -> Auth {
        Auth(ResolvedIdentity {
            email: "v@x.com".to_string(),
            role: Role::Viewer,
            claims: serde_json::Value::Null,
        })
    }

    fn state_with_pool(urls: &str) -> AppState {
        AppState::new(
            TokenVerifier::new(VerifierConfig::default()),
            RpcPool::from_config(urls, &[]),
        )
    }

    #[tokio::test]
    async fn empty_pool_returns_503() {
        let err = get_balance(
            viewer(),
            State(state_with_pool("")),
            Path("0x0000000000000000000000000000000000000000".to_string()),
            Query(BalanceQuery { block: None }),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn invalid_block_tag_returns_400() {
        let err = get_balance(
            viewer(),
            State(state_with_pool("https://ok1")),
            Path("0x0000000000000000000000000000000000000000".to_string()),
            Query(BalanceQuery {
                block: Some("not-a-tag".to_string()),
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }
}
