//! # Route Modules
//!
//! One module per API domain. Each module exposes a `router()` that the
//! application assembly in [`crate::app`] merges.

pub mod credentials;
pub mod identities;
