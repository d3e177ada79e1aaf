//! # Identity Registration and Lookup
//!
//! Endpoints for registering subjects with the identity registry and
//! retrieving a subject's DID and latest credential.
//!
//! ## Endpoints
//!
//! - `POST /v1/identities` — Register a subject, generating a key pair
//!   and DID.
//! - `GET /v1/identities/:subject_id` — Look up a subject's DID and
//!   latest credential.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use attest_core::SubjectId;

use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / Response types
// ---------------------------------------------------------------------------

/// Request body for subject registration.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    /// Opaque subject identifier chosen by the caller.
    pub subject_id: String,
}

impl Validate for RegisterRequest {
    fn validate(&self) -> Result<(), String> {
        let trimmed = self.subject_id.trim();
        if trimmed.is_empty() {
            return Err("subject_id must not be empty".to_string());
        }
        if trimmed.len() > 255 {
            return Err("subject_id must not exceed 255 characters".to_string());
        }
        Ok(())
    }
}

/// Response from the registration endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    /// The subject identifier as registered.
    pub subject_id: String,
    /// The DID derived from the subject's freshly generated public key.
    pub did: String,
}

/// Response from the identity lookup endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IdentityResponse {
    /// The subject identifier.
    pub subject_id: String,
    /// The subject's DID.
    pub did: String,
    /// The most recently issued credential, or null if none has been
    /// issued.
    pub credential: Option<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the identities router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/identities", post(register_identity))
        .route("/v1/identities/:subject_id", get(get_identity))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /v1/identities — Register a subject.
///
/// Generates a fresh Ed25519 key pair for the subject, derives its DID
/// from the public key, and stores the record. Registering the same
/// subject twice is a conflict; the original record is left untouched.
#[utoipa::path(
    post,
    path = "/v1/identities",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Subject registered", body = RegisterResponse),
        (status = 409, description = "Subject already registered", body = crate::error::ErrorBody),
        (status = 422, description = "Invalid subject identifier", body = crate::error::ErrorBody),
    ),
    tag = "identities"
)]
pub async fn register_identity(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let req = extract_validated_json(body)?;
    let subject = SubjectId::new(req.subject_id)?;
    let did = state.registry.register(&subject)?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            subject_id: subject.as_str().to_string(),
            did: did.to_string(),
        }),
    ))
}

/// GET /v1/identities/:subject_id — Look up a subject.
///
/// Returns the subject's DID and its latest credential (null until one is
/// issued). The subject's private key is never exposed over the API.
#[utoipa::path(
    get,
    path = "/v1/identities/{subject_id}",
    params(("subject_id" = String, Path, description = "Subject identifier")),
    responses(
        (status = 200, description = "Subject record", body = IdentityResponse),
        (status = 404, description = "Subject not registered", body = crate::error::ErrorBody),
        (status = 422, description = "Invalid subject identifier", body = crate::error::ErrorBody),
    ),
    tag = "identities"
)]
pub async fn get_identity(
    State(state): State<AppState>,
    Path(subject_id): Path<String>,
) -> Result<Json<IdentityResponse>, AppError> {
    let subject = SubjectId::new(subject_id)?;
    let record = state.registry.record(&subject)?;

    let credential = match &record.latest {
        Some(cred) => Some(
            serde_json::to_value(cred)
                .map_err(|e| AppError::Internal(format!("credential serialization failed: {e}")))?,
        ),
        None => None,
    };

    Ok(Json(IdentityResponse {
        subject_id: subject.as_str().to_string(),
        did: record.did.to_string(),
        credential,
    }))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use attest_registry::IssuerIdentity;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_app() -> Router {
        let state = AppState::with_issuer(IssuerIdentity::from_seed(&[9u8; 32]));
        router().with_state(state)
    }

    async fn body_json<T: serde::de::DeserializeOwned>(resp: axum::response::Response) -> T {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn register_request(subject_id: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/v1/identities")
            .header("content-type", "application/json")
            .body(Body::from(format!(r#"{{"subject_id":"{subject_id}"}}"#)))
            .unwrap()
    }

    #[tokio::test]
    async fn register_returns_created_with_did() {
        let app = test_app();
        let resp = app.oneshot(register_request("alice")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: RegisterResponse = body_json(resp).await;
        assert_eq!(body.subject_id, "alice");
        assert!(body.did.starts_with("did:example:"), "got: {}", body.did);
    }

    #[tokio::test]
    async fn register_twice_returns_conflict() {
        let app = test_app();
        let first = app.clone().oneshot(register_request("alice")).await.unwrap();
        assert_eq!(first.status(), StatusCode::CREATED);

        let second = app.oneshot(register_request("alice")).await.unwrap();
        assert_eq!(second.status(), StatusCode::CONFLICT);

        let body: crate::error::ErrorBody = body_json(second).await;
        assert_eq!(body.error.code, "CONFLICT");
    }

    #[tokio::test]
    async fn register_empty_subject_returns_validation_error() {
        let app = test_app();
        let resp = app.oneshot(register_request("")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn register_malformed_body_returns_bad_request() {
        let app = test_app();
        let req = Request::builder()
            .method("POST")
            .uri("/v1/identities")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn get_identity_returns_did_and_null_credential() {
        let app = test_app();
        let created = app.clone().oneshot(register_request("alice")).await.unwrap();
        let registered: RegisterResponse = body_json(created).await;

        let req = Request::builder()
            .uri("/v1/identities/alice")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body: IdentityResponse = body_json(resp).await;
        assert_eq!(body.subject_id, "alice");
        assert_eq!(body.did, registered.did);
        assert!(body.credential.is_none());
    }

    #[tokio::test]
    async fn get_unknown_identity_returns_not_found() {
        let app = test_app();
        let req = Request::builder()
            .uri("/v1/identities/nobody")
            .body(Body::empty())
            .unwrap();

        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: crate::error::ErrorBody = body_json(resp).await;
        assert_eq!(body.error.code, "NOT_FOUND");
    }

    #[test]
    fn register_request_validation() {
        assert!(RegisterRequest {
            subject_id: "alice".into()
        }
        .validate()
        .is_ok());
        assert!(RegisterRequest {
            subject_id: "  ".into()
        }
        .validate()
        .is_err());
        assert!(RegisterRequest {
            subject_id: "x".repeat(256)
        }
        .validate()
        .is_err());
    }
}
