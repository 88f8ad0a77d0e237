// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{Role, SessionIdentity},
    error::Envelope,
    state::AppState,
};

pub mod health;
pub mod ledger;
pub mod session;

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route("/ledger/{address}/balance", get(ledger::get_balance))
        .route("/session", post(session::sign_in))
        .route(
            "/session/{session_id}",
            get(session::read_session).delete(session::revoke_session),
        )
        .with_state(state.clone());

    Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .with_state(state)
        .nest("/v1", v1_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        health::liveness,
        ledger::get_balance,
        session::sign_in,
        session::read_session,
        session::revoke_session
    ),
    components(
        schemas(
            Role,
            SessionIdentity,
            health::ReadyResponse,
            health::HealthResponse,
            ledger::BalanceData,
            session::SignInRequest,
            session::SessionCreated,
            Envelope<ledger::BalanceData>,
            Envelope<session::SessionCreated>,
            Envelope<SessionIdentity>
        )
    ),
    tags(
        (name = "Health", description = "Liveness and readiness probes"),
        (name = "Ledger", description = "Ledger reads through the RPC pool"),
        (name = "Session", description = "Dashboard session flow")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{TokenVerifier, VerifierConfig};
    use crate::rpc::RpcPool;

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let state = AppState::new(
            TokenVerifier::new(VerifierConfig::default()),
            RpcPool::from_config("https://ok1", &[]),
        );
        let app = router(state);
        // Ensure the router can be converted into a service without panicking.
        let _ = app.into_make_service();
    }
}
