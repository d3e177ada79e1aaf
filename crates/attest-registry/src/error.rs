//! # Registry Error Types

use thiserror::Error;

/// Errors from identity registry operations.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The subject identifier already has a record. Re-registration is an
    /// error rather than a no-op: silently replacing the record would
    /// orphan the previous key pair.
    #[error("subject \"{0}\" is already registered")]
    AlreadyRegistered(String),

    /// The subject identifier was never registered.
    #[error("subject \"{0}\" is not registered")]
    UnknownSubject(String),

    /// A cryptographic operation failed (key generation, signing).
    #[error(transparent)]
    Crypto(#[from] attest_crypto::CryptoError),

    /// A credential operation failed (canonicalization, malformed input).
    #[error(transparent)]
    Credential(#[from] attest_vc::VcError),
}
