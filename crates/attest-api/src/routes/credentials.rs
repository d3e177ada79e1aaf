//! # Credential Issuance and Verification
//!
//! Endpoints for issuing signed credentials to registered subjects and
//! verifying credentials presented by callers.
//!
//! Verification is a boolean judgment, not an exception path: a
//! credential whose signature does not check out yields `{"valid": false}`
//! with status 200. Only structurally broken input (missing fields, a
//! body the canonicalizer rejects) produces an error status.
//!
//! ## Endpoints
//!
//! - `POST /v1/identities/:subject_id/credentials` — Issue a credential.
//! - `POST /v1/credentials/verify` — Verify a presented credential.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use attest_core::SubjectId;
use attest_vc::Credential;

use crate::error::AppError;
use crate::extractors::extract_json;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / Response types
// ---------------------------------------------------------------------------

/// Request body for credential issuance.
#[derive(Debug, Deserialize, ToSchema)]
pub struct IssueRequest {
    /// Arbitrary claim payload to sign into the credential.
    #[schema(value_type = Object)]
    pub claim: serde_json::Value,
}

/// Response from the verification endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VerifyResponse {
    /// Whether the credential's signature is valid for its body.
    pub valid: bool,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the credentials router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/v1/identities/:subject_id/credentials",
            post(issue_credential),
        )
        .route("/v1/credentials/verify", post(verify_credential))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /v1/identities/:subject_id/credentials — Issue a credential.
///
/// Signs the claim with the process-wide issuer key, binds it to the
/// subject's DID, and stores it as the subject's latest credential,
/// replacing any previous one. Returns the full signed credential.
#[utoipa::path(
    post,
    path = "/v1/identities/{subject_id}/credentials",
    params(("subject_id" = String, Path, description = "Subject identifier")),
    request_body = IssueRequest,
    responses(
        (status = 201, description = "Credential issued", body = Object),
        (status = 404, description = "Subject not registered", body = crate::error::ErrorBody),
        (status = 400, description = "Request body could not be parsed", body = crate::error::ErrorBody),
        (status = 422, description = "Claim cannot be canonicalized", body = crate::error::ErrorBody),
    ),
    tag = "credentials"
)]
pub async fn issue_credential(
    State(state): State<AppState>,
    Path(subject_id): Path<String>,
    body: Result<Json<IssueRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let req = extract_json(body)?;
    let subject = SubjectId::new(subject_id)?;

    let credential = state.registry.issue_for(&subject, req.claim)?;
    let value = serde_json::to_value(&credential)
        .map_err(|e| AppError::Internal(format!("credential serialization failed: {e}")))?;

    Ok((StatusCode::CREATED, Json(value)))
}

/// POST /v1/credentials/verify — Verify a presented credential.
///
/// Checks the credential's signature against the issuer's public key over
/// the canonical form of its body. A wrong, missing, or garbled signature
/// is `{"valid": false}`, never an error status.
#[utoipa::path(
    post,
    path = "/v1/credentials/verify",
    request_body = Object,
    responses(
        (status = 200, description = "Verification verdict", body = VerifyResponse),
        (status = 400, description = "Credential is structurally malformed", body = crate::error::ErrorBody),
        (status = 422, description = "Credential body cannot be canonicalized", body = crate::error::ErrorBody),
    ),
    tag = "credentials"
)]
pub async fn verify_credential(
    State(state): State<AppState>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<VerifyResponse>, AppError> {
    let value = extract_json(body)?;
    let credential = Credential::from_value(value)?;
    let valid = state.registry.verify(&credential)?;

    Ok(Json(VerifyResponse { valid }))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
