//! # Cryptographic Error Types
//!
//! Structured errors for all cryptographic operations in `attest-crypto`.

use thiserror::Error;

/// Errors from cryptographic operations.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// The operating system's entropy source could not produce key material.
    #[error("key generation failed: {0}")]
    KeyGeneration(String),

    /// The signing primitive rejected the input.
    #[error("signing failed: {0}")]
    Signing(String),

    /// Signature verification failed.
    #[error("signature verification failed: {0}")]
    VerificationFailed(String),

    /// Key parsing or encoding failed.
    #[error("key error: {0}")]
    KeyError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_generation_display() {
        let err = CryptoError::KeyGeneration("entropy exhausted".to_string());
        assert!(format!("{err}").contains("entropy exhausted"));
    }

    #[test]
    fn signing_display() {
        let err = CryptoError::Signing("bad key".to_string());
        assert!(format!("{err}").contains("bad key"));
    }

    #[test]
    fn verification_failed_display() {
        let err = CryptoError::VerificationFailed("bad sig".to_string());
        assert!(format!("{err}").contains("bad sig"));
    }

    #[test]
    fn key_error_display() {
        let err = CryptoError::KeyError("too short".to_string());
        assert!(format!("{err}").contains("too short"));
    }

    #[test]
    fn all_variants_are_debug() {
        let variants = vec![
            CryptoError::KeyGeneration("a".to_string()),
            CryptoError::Signing("b".to_string()),
            CryptoError::VerificationFailed("c".to_string()),
            CryptoError::KeyError("d".to_string()),
        ];
        for v in variants {
            assert!(!format!("{v:?}").is_empty());
        }
    }
}
