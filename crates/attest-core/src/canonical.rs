//! # Canonical Serialization — JCS-Compatible Byte Production
//!
//! Defines [`CanonicalBytes`], the sole construction path for bytes used in
//! credential signing and verification.
//!
//! ## Security Invariant
//!
//! The `CanonicalBytes` newtype has a private inner field. The only way to
//! construct it is through `CanonicalBytes::new()`, which rejects floats
//! and then serializes via RFC 8785 (JSON Canonicalization Scheme). Any
//! function that signs or verifies must accept `&CanonicalBytes`, so the
//! "signed over a different serialization than was verified" defect class
//! is structurally impossible.
//!
//! ## Rules
//!
//! 1. **Reject floats** — non-integer numbers have serialization edge
//!    cases that break cross-implementation determinism; claim values must
//!    be strings or integers.
//! 2. **Sorted keys, compact separators** — via `serde_jcs`, matching
//!    `json.dumps(obj, sort_keys=True, separators=(",", ":"))` with
//!    `ensure_ascii=False`.
//! 3. **UTF-8 output** — non-ASCII characters pass through unescaped.
//!
//! Datetime normalization happens at the `Serialize` boundary: the
//! [`Timestamp`](crate::Timestamp) type guarantees the Z-suffix and
//! second-precision invariants before values reach this module.

use serde::Serialize;
use serde_json::Value;

use crate::error::CanonicalizationError;

/// Bytes produced exclusively by JCS canonicalization with float rejection.
///
/// # Invariants
///
/// - The only constructor is `CanonicalBytes::new()`.
/// - All numbers are integers, never floats.
/// - Serialization uses sorted keys with compact separators (RFC 8785).
///
/// These invariants are enforced by the constructor and cannot be violated
/// by downstream code because the inner `Vec<u8>` is private.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Construct canonical bytes from any serializable value.
    ///
    /// This is the ONLY way to construct `CanonicalBytes`. All signing
    /// input in the stack must flow through this constructor.
    ///
    /// # Errors
    ///
    /// Returns `CanonicalizationError::FloatRejected` if the value contains
    /// non-integer numbers. Returns
    /// `CanonicalizationError::SerializationFailed` if JCS serialization
    /// fails.
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let value = serde_json::to_value(obj)?;
        reject_floats(&value)?;
        let s = serde_jcs::to_string(&value)?;
        Ok(Self(s.into_bytes()))
    }

    /// Access the canonical bytes for signing or verification.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the canonical byte sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Recursively reject float values anywhere in a JSON value tree.
///
/// Integers stored as `i64`/`u64` pass through; a number representable
/// only as `f64` is rejected.
fn reject_floats(value: &Value) -> Result<(), CanonicalizationError> {
    match value {
        Value::Null | Value::Bool(_) | Value::String(_) => Ok(()),
        Value::Number(n) => {
            if n.is_f64() && !n.is_i64() && !n.is_u64() {
                if let Some(f) = n.as_f64() {
                    return Err(CanonicalizationError::FloatRejected(f));
                }
            }
            Ok(())
        }
        Value::Object(map) => {
            for v in map.values() {
                reject_floats(v)?;
            }
            Ok(())
        }
        Value::Array(arr) => {
            for v in arr {
                reject_floats(v)?;
            }
            Ok(())
        }
    }
}
