#![deny(missing_docs)]

//! # attest-registry — Identity Registry for the Attest Stack
//!
//! Maps opaque subject identifiers to their DID, key material, and most
//! recently issued credential. Owns the process-wide issuer identity and
//! is the only shared mutable resource in the stack.
//!
//! ## Concurrency
//!
//! The record map is guarded by a `parking_lot::RwLock`. Check-and-insert
//! (registration) and read-modify-write (issuance, which overwrites the
//! latest credential) each run under a single write lock, so concurrent
//! calls for the same subject cannot lose updates. All critical sections
//! are synchronous; the lock is never held across `.await`.

pub mod error;
pub mod issuer;
pub mod registry;

// Re-export primary types.
pub use error::RegistryError;
pub use issuer::IssuerIdentity;
pub use registry::{IdentityRecord, IdentityRegistry};
