//! # Issuer Identity
//!
//! The process-wide issuer: one key pair and its derived DID, created once
//! at startup and held for the process lifetime (no rotation). Modeled as
//! explicit owned state injected into the registry at construction, never
//! accessed as ambient globals.

use attest_core::Did;
use attest_crypto::{derive_did, CryptoError, Ed25519KeyPair, Ed25519PublicKey};

/// The trusted issuer's signing identity.
///
/// Does not implement `Clone` or `Serialize`: there is exactly one issuer
/// key in the process and it does not leave it.
pub struct IssuerIdentity {
    key: Ed25519KeyPair,
    did: Did,
}

impl IssuerIdentity {
    /// Create an issuer identity with a freshly generated key pair.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::KeyGeneration`] if the OS entropy source
    /// fails.
    pub fn generate() -> Result<Self, CryptoError> {
        let key = Ed25519KeyPair::generate()?;
        Ok(Self::from_key_pair(key))
    }

    /// Create an issuer identity from a 32-byte private key seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self::from_key_pair(Ed25519KeyPair::from_seed(seed))
    }

    /// Create an issuer identity from an existing key pair.
    pub fn from_key_pair(key: Ed25519KeyPair) -> Self {
        let did = derive_did(&key.public_key());
        Self { key, did }
    }

    /// The issuer's DID.
    pub fn did(&self) -> &Did {
        &self.did
    }

    /// The issuer's public key, for verification.
    pub fn public_key(&self) -> Ed25519PublicKey {
        self.key.public_key()
    }

    /// The issuer's key pair, for signing.
    pub fn key_pair(&self) -> &Ed25519KeyPair {
        &self.key
    }
}

impl std::fmt::Debug for IssuerIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssuerIdentity")
            .field("did", &self.did)
            .field("key", &"<private>")
            .finish()
    }
}
