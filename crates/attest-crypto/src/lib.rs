#![deny(missing_docs)]

//! # attest-crypto — Cryptographic Primitives for the Attest Stack
//!
//! Ed25519 key generation, signing, verification, and DID derivation.
//!
//! ## Security Invariants
//!
//! - Signing input MUST be `&CanonicalBytes` — you cannot sign raw bytes.
//!   This enforces that all signed data has been canonicalized through the
//!   JCS pipeline.
//! - Private keys are never serialized or logged. [`Ed25519KeyPair`] does
//!   not implement `Serialize` and its `Debug` output is redacted.
//! - Key generation draws OS entropy through a checked path: an entropy
//!   failure surfaces as [`CryptoError::KeyGeneration`], never a panic.

pub mod did;
pub mod ed25519;
pub mod error;

// Re-export primary types.
pub use did::{derive_did, DID_METHOD};
pub use ed25519::{verify, verify_with_public_key, Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};
pub use error::CryptoError;
