#![deny(missing_docs)]

//! # attest-core — Foundational Types for the Attest Stack
//!
//! This crate defines the types every other crate in the workspace depends
//! on. It has no internal crate dependencies — only `serde`, `serde_json`,
//! `serde_jcs`, `thiserror`, and `chrono` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** Every identifier is a
//!    distinct type. You cannot pass a [`SubjectId`] where a [`Did`] is
//!    expected.
//!
//! 2. **[`CanonicalBytes`] is the sole path to signing input.** All bytes
//!    that get signed or verified flow through `CanonicalBytes::new()`,
//!    which applies JCS canonicalization with float rejection.
//!
//! 3. **[`Timestamp`] pins the wire format.** UTC, second precision, `Z`
//!    suffix — so a credential that round-trips through JSON canonicalizes
//!    to the same bytes it was signed over.
//!
//! 4. **Structured errors with `thiserror`.** No `Box<dyn Error>`, no
//!    `.unwrap()` outside tests.

pub mod canonical;
pub mod error;
pub mod identity;
pub mod temporal;

// Re-export primary types at crate root for ergonomic imports.
pub use canonical::CanonicalBytes;
pub use error::{CanonicalizationError, ValidationError};
pub use identity::{Did, SubjectId};
pub use temporal::Timestamp;
