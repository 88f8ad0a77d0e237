// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use relational_registry_gateway::{
    api::router,
    auth::{TokenVerifier, VerifierConfig},
    config::{GatewayConfig, LOG_FORMAT_ENV},
    rpc::RpcPool,
    state::AppState,
};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    let json = std::env::var(LOG_FORMAT_ENV)
        .map(|f| f.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() {
    init_tracing();

    let config = GatewayConfig::from_env();

    let verifier = TokenVerifier::new(VerifierConfig {
        jwks_url: config.jwks_url.clone(),
        issuer: config.issuer.clone(),
        audience: config.audience.clone(),
        editor_allowlist: config.editor_allowlist.clone(),
    });

    let pool = RpcPool::from_config(&config.rpc_urls, &config.rpc_denylist);

    let state = AppState::new(verifier, pool);
    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Failed to parse bind address");

    tracing::info!("Registry gateway listening on http://{addr} (docs at /docs)");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutdown signal received");
        })
        .await
        .expect("HTTP server failed");
}
