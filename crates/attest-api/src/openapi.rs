//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI spec,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attest API",
        version = "0.1.0",
        description = "Credential issuance and verification: subject registration with DID generation, issuer-signed credentials over canonical JSON, and boolean signature verification.",
        license(name = "Apache-2.0")
    ),
    paths(
        // Identities
        crate::routes::identities::register_identity,
        crate::routes::identities::get_identity,
        // Credentials
        crate::routes::credentials::issue_credential,
        crate::routes::credentials::verify_credential,
    ),
    components(schemas(
        // Error types
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        // Identity DTOs
        crate::routes::identities::RegisterRequest,
        crate::routes::identities::RegisterResponse,
        crate::routes::identities::IdentityResponse,
        // Credential DTOs
        crate::routes::credentials::IssueRequest,
        crate::routes::credentials::VerifyResponse,
    )),
    tags(
        (name = "identities", description = "Subject registration and lookup"),
        (name = "credentials", description = "Credential issuance and verification"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
///
/// Serves the OpenAPI JSON spec at `/openapi.json`.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_spec_contains_all_paths() {
        let spec = ApiDoc::openapi();
        let paths = &spec.paths.paths;
        assert!(paths.contains_key("/v1/identities"));
        assert!(paths.contains_key("/v1/identities/{subject_id}"));
        assert!(paths.contains_key("/v1/identities/{subject_id}/credentials"));
        assert!(paths.contains_key("/v1/credentials/verify"));
    }
}
