//! # Identity Registry
//!
//! In-memory map from [`SubjectId`] to [`IdentityRecord`], plus the
//! registry-owned issuer identity. This is the boundary the surrounding
//! API layer consumes; the cryptographic core underneath is pure.
//!
//! Storage is process memory only. The registry is an ordinary struct
//! behind `Arc` at the API layer, so a durable backing store could be
//! substituted without touching the cryptographic core.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use attest_core::{Did, SubjectId};
use attest_crypto::{derive_did, Ed25519KeyPair, Ed25519PublicKey};
use attest_vc::{Credential, VcError};
use parking_lot::RwLock;

use crate::error::RegistryError;
use crate::issuer::IssuerIdentity;

/// A registered subject: its DID, key pair, and most recent credential.
///
/// The key pair is behind `Arc` because `Ed25519KeyPair` is deliberately
/// not `Clone`; the record itself clones cheaply for read access.
/// `latest` is overwritten, not merged, on each issuance.
#[derive(Debug, Clone)]
pub struct IdentityRecord {
    /// The subject's DID, derived from its public key.
    pub did: Did,
    key: Arc<Ed25519KeyPair>,
    /// The most recently issued credential, if any.
    pub latest: Option<Credential>,
}

impl IdentityRecord {
    /// The subject's public key.
    pub fn public_key(&self) -> Ed25519PublicKey {
        self.key.public_key()
    }
}

/// The identity registry: the only shared mutable resource in the stack.
///
/// All operations for one subject are serialized by taking the write lock
/// across the whole check-then-mutate sequence; operations on different
/// subjects do not interfere beyond lock contention. The lock is
/// `parking_lot` (non-poisoning) and all critical sections are
/// synchronous.
pub struct IdentityRegistry {
    issuer: IssuerIdentity,
    records: RwLock<HashMap<SubjectId, IdentityRecord>>,
}

impl IdentityRegistry {
    /// Create an empty registry owning the given issuer identity.
    pub fn new(issuer: IssuerIdentity) -> Self {
        Self {
            issuer,
            records: RwLock::new(HashMap::new()),
        }
    }

    /// The issuer's DID.
    pub fn issuer_did(&self) -> &Did {
        self.issuer.did()
    }

    /// The issuer's public key.
    pub fn issuer_public_key(&self) -> Ed25519PublicKey {
        self.issuer.public_key()
    }

    /// Register a subject: generate a fresh key pair, derive its DID, and
    /// store the record.
    ///
    /// Key generation happens before the lock is taken; the loser of a
    /// concurrent race for the same subject discards its key and errors.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::AlreadyRegistered`] if the subject has a record.
    ///   The existing record (and its DID) is left untouched.
    /// - [`RegistryError::Crypto`] if key generation fails.
    pub fn register(&self, subject: &SubjectId) -> Result<Did, RegistryError> {
        let key = Ed25519KeyPair::generate()?;
        let did = derive_did(&key.public_key());

        let mut records = self.records.write();
        match records.entry(subject.clone()) {
            Entry::Occupied(_) => Err(RegistryError::AlreadyRegistered(
                subject.as_str().to_string(),
            )),
            Entry::Vacant(slot) => {
                slot.insert(IdentityRecord {
                    did: did.clone(),
                    key: Arc::new(key),
                    latest: None,
                });
                Ok(did)
            }
        }
    }

    /// Issue a credential for a registered subject and store it as the
    /// subject's latest credential, replacing any previous one.
    ///
    /// Lookup, signing, and the latest-credential overwrite run under one
    /// write lock: concurrent issuance for the same subject cannot
    /// interleave between "look up" and "store".
    ///
    /// # Errors
    ///
    /// - [`RegistryError::UnknownSubject`] if the subject was never
    ///   registered.
    /// - [`RegistryError::Credential`] if the claim cannot be
    ///   canonicalized or signing fails.
    pub fn issue_for(
        &self,
        subject: &SubjectId,
        claim: serde_json::Value,
    ) -> Result<Credential, RegistryError> {
        let mut records = self.records.write();
        let record = records
            .get_mut(subject)
            .ok_or_else(|| RegistryError::UnknownSubject(subject.as_str().to_string()))?;

        let credential = Credential::issue(
            self.issuer.key_pair(),
            self.issuer.did().clone(),
            record.did.clone(),
            claim,
        )?;
        record.latest = Some(credential.clone());
        Ok(credential)
    }

    /// The most recently issued credential for a subject, or `None` if
    /// nothing has been issued yet.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownSubject`] if the subject was never
    /// registered. Absence of a credential is not an error.
    pub fn latest(&self, subject: &SubjectId) -> Result<Option<Credential>, RegistryError> {
        let records = self.records.read();
        records
            .get(subject)
            .map(|r| r.latest.clone())
            .ok_or_else(|| RegistryError::UnknownSubject(subject.as_str().to_string()))
    }

    /// A snapshot of the subject's record.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownSubject`] if the subject was never
    /// registered.
    pub fn record(&self, subject: &SubjectId) -> Result<IdentityRecord, RegistryError> {
        let records = self.records.read();
        records
            .get(subject)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownSubject(subject.as_str().to_string()))
    }

    /// Verify a credential against the process-wide issuer public key.
    ///
    /// An invalid signature is `Ok(false)`; only an uncanonicalizable body
    /// is an error.
    pub fn verify(&self, credential: &Credential) -> Result<bool, VcError> {
        credential.verify(&self.issuer.public_key())
    }

    /// Number of registered subjects.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Whether no subjects are registered.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl std::fmt::Debug for IdentityRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityRegistry")
            .field("issuer", &self.issuer)
            .field("subjects", &self.len())
            .finish()
    }
}
