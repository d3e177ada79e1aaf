#![deny(missing_docs)]

//! # attest-vc — Signed Credentials for the Attest Stack
//!
//! Implements the credential record: a claim payload bound to a subject
//! DID, signed by a trusted issuer, and verifiable by anyone holding the
//! issuer's public key.
//!
//! ## Security Invariants
//!
//! - All signature computation uses
//!   [`CanonicalBytes`](attest_core::CanonicalBytes) for payload
//!   canonicalization — never raw `serde_json::to_vec()`.
//! - The `signature` field is never part of the signed input.
//! - An invalid signature is a `false` verification result, not an error.
//!   Errors are reserved for structural defects (missing fields, bodies
//!   that cannot be canonicalized).

pub mod credential;

// Re-export primary types.
pub use credential::{Credential, VcError};
