//! # attest-api — Axum API Services for the Attest Stack
//!
//! HTTP surface over the identity registry: subject registration with DID
//! generation, issuer-signed credential issuance, and boolean credential
//! verification.
//!
//! ## API Surface
//!
//! | Method | Path                                   | Module                  |
//! |--------|----------------------------------------|-------------------------|
//! | POST   | `/v1/identities`                       | [`routes::identities`]  |
//! | GET    | `/v1/identities/:subject_id`           | [`routes::identities`]  |
//! | POST   | `/v1/identities/:subject_id/credentials` | [`routes::credentials`] |
//! | POST   | `/v1/credentials/verify`               | [`routes::credentials`] |
//!
//! ## OpenAPI
//!
//! Auto-generated OpenAPI spec via utoipa derive macros at `/openapi.json`.

pub mod error;
pub mod extractors;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
///
/// Health probes (`/health/*`) are mounted outside the API router so they
/// remain accessible under any future middleware.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::identities::router())
        .merge(routes::credentials::router())
        .merge(openapi::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    Router::new().merge(health).merge(api)
}

/// Liveness probe — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe — returns 200 when the application is ready to serve.
async fn readiness() -> &'static str {
    "ready"
}
