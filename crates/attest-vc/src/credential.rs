//! # Credential Structure, Issuance, and Verification
//!
//! The wire format is a flat JSON object:
//!
//! ```json
//! {
//!   "id": "did:example:<subject>",
//!   "issuer": "did:example:<issuer>",
//!   "issued": "2026-01-15T12:00:00Z",
//!   "credential": { "type": "AgeCredential", "claim": "over 18" },
//!   "signature": "<hex>"
//! }
//! ```
//!
//! The signature is computed over the JCS canonicalization of the object
//! with the `signature` key absent. The signature travels as a hex string
//! rather than a typed field so that undecodable hex is an ordinary
//! `false` verification outcome instead of a parse error.

use attest_core::{CanonicalBytes, CanonicalizationError, Did, Timestamp};
use attest_crypto::{verify_with_public_key, Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from credential operations.
#[derive(Error, Debug)]
pub enum VcError {
    /// A required non-signature field is absent or has the wrong shape.
    /// This is a protocol-level defect, distinct from an untrusted
    /// signature (which verifies to `false`).
    #[error("malformed credential: {0}")]
    Malformed(String),

    /// The credential body could not be canonicalized.
    #[error("canonicalization failed: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// Signing the canonical body failed.
    #[error("signing failed: {0}")]
    Signing(#[from] attest_crypto::CryptoError),
}

/// A claim bound to a subject DID, signed by an issuer.
///
/// Immutable after issuance: a new claim requires a new credential, not an
/// update. The `issued` timestamp is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Credential {
    /// The subject this credential is about.
    #[serde(rename = "id")]
    pub subject: Did,
    /// The issuer that signed this credential.
    pub issuer: Did,
    /// Issuance time, UTC, second precision.
    pub issued: Timestamp,
    /// The claim payload. Arbitrary structured data; no schema validation.
    #[serde(rename = "credential")]
    pub claim: serde_json::Value,
    /// Hex-encoded Ed25519 signature over the canonical body.
    /// Absent until the credential is signed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

impl Credential {
    /// Issue a signed credential.
    ///
    /// Builds the body with the current UTC time, canonicalizes it with
    /// the `signature` key absent, signs with the issuer's private key,
    /// and attaches the hex-encoded signature.
    ///
    /// Pure computation: persistence is the caller's responsibility.
    ///
    /// # Errors
    ///
    /// - [`VcError::Canonicalization`] if the claim contains floats or
    ///   cannot be serialized.
    /// - [`VcError::Signing`] if the signing primitive rejects the input.
    pub fn issue(
        issuer_key: &Ed25519KeyPair,
        issuer: Did,
        subject: Did,
        claim: serde_json::Value,
    ) -> Result<Self, VcError> {
        let mut credential = Self {
            subject,
            issuer,
            issued: Timestamp::now(),
            claim,
            signature: None,
        };
        let input = credential.signing_input()?;
        let signature = issuer_key.sign(&input)?;
        credential.signature = Some(signature.to_hex());
        Ok(credential)
    }

    /// Parse a credential from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`VcError::Malformed`] if required non-signature fields are
    /// absent or malformed, or if the object carries fields outside the
    /// wire format. Unknown fields would not be covered by the signature,
    /// so accepting them would let unsigned data ride under a valid
    /// verdict. A missing or garbled `signature` is NOT an error here:
    /// the credential parses and later verifies to `false`.
    pub fn from_value(value: serde_json::Value) -> Result<Self, VcError> {
        serde_json::from_value(value).map_err(|e| VcError::Malformed(e.to_string()))
    }

    /// Compute the canonical signing input: the credential serialized to a
    /// JSON value with the `signature` key removed, then canonicalized.
    ///
    /// Both issuance and verification flow through this method, so the two
    /// sides always compute identical bytes for identical bodies.
    pub fn signing_input(&self) -> Result<CanonicalBytes, VcError> {
        let mut value = serde_json::to_value(self)
            .map_err(CanonicalizationError::SerializationFailed)?;
        if let Some(obj) = value.as_object_mut() {
            obj.remove("signature");
        }
        Ok(CanonicalBytes::new(&value)?)
    }

    /// Verify this credential's signature against an issuer public key.
    ///
    /// Returns `Ok(false)` — never an error — for a missing signature,
    /// undecodable signature hex, or any cryptographic mismatch. Checking
    /// untrusted input and finding it untrustworthy is an expected
    /// outcome, not a failure.
    ///
    /// # Errors
    ///
    /// Returns [`VcError::Canonicalization`] only if the body itself
    /// cannot be canonicalized. That indicates a protocol defect and must
    /// not be folded into `false`.
    pub fn verify(&self, issuer_public_key: &Ed25519PublicKey) -> Result<bool, VcError> {
        let hex = match &self.signature {
            Some(hex) => hex,
            None => return Ok(false),
        };
        let signature = match Ed25519Signature::from_hex(hex) {
            Ok(sig) => sig,
            Err(_) => return Ok(false),
        };
        let input = self.signing_input()?;
        Ok(verify_with_public_key(&input, &signature, issuer_public_key).is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn issuer_key() -> Ed25519KeyPair {
        Ed25519KeyPair::from_seed(&[1u8; 32])
    }

    fn issuer_did() -> Did {
        attest_crypto::derive_did(&issuer_key().public_key())
    }

    fn subject_did() -> Did {
        Did::new("did:example:00112233445566778899aabbccddeeff").unwrap()
    }

    fn age_claim() -> serde_json::Value {
        json!({"type": "AgeCredential", "claim": "over 18"})
    }

    fn issue_sample() -> Credential {
        Credential::issue(&issuer_key(), issuer_did(), subject_did(), age_claim()).unwrap()
    }

    // -- issuance -------------------------------------------------------------

    #[test]
    fn issue_attaches_signature() {
        let cred = issue_sample();
        let sig = cred.signature.as_deref().unwrap();
        assert_eq!(sig.len(), 128);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn issue_binds_subject_and_issuer() {
        let cred = issue_sample();
        assert_eq!(cred.subject, subject_did());
        assert_eq!(cred.issuer, issuer_did());
        assert_eq!(cred.claim, age_claim());
    }

    #[test]
    fn issue_rejects_float_claim() {
        let result = Credential::issue(
            &issuer_key(),
            issuer_did(),
            subject_did(),
            json!({"score": 0.95}),
        );
        assert!(matches!(result, Err(VcError::Canonicalization(_))));
    }

    // -- signing input --------------------------------------------------------

    #[test]
    fn signing_input_excludes_signature() {
        let mut cred = issue_sample();
        let with_sig = cred.signing_input().unwrap();
        cred.signature = None;
        let without_sig = cred.signing_input().unwrap();
        assert_eq!(with_sig, without_sig);
    }

    #[test]
    fn signing_input_is_deterministic() {
        let cred = issue_sample();
        assert_eq!(cred.signing_input().unwrap(), cred.signing_input().unwrap());
    }

    #[test]
    fn signing_input_uses_wire_field_names() {
        let cred = issue_sample();
        let input = cred.signing_input().unwrap();
        let s = std::str::from_utf8(input.as_bytes()).unwrap();
        assert!(s.contains(r#""id":"#));
        assert!(s.contains(r#""issuer":"#));
        assert!(s.contains(r#""issued":"#));
        assert!(s.contains(r#""credential":"#));
        assert!(!s.contains("signature"));
    }

    // -- verification ---------------------------------------------------------

    #[test]
    fn round_trip_verifies() {
        let cred = issue_sample();
        let pk = issuer_key().public_key();
        assert!(cred.verify(&pk).unwrap());
    }

    #[test]
    fn wrong_key_verifies_false() {
        let cred = issue_sample();
        let other = Ed25519KeyPair::from_seed(&[2u8; 32]);
        assert!(!cred.verify(&other.public_key()).unwrap());
    }

    #[test]
    fn missing_signature_verifies_false() {
        let mut cred = issue_sample();
        cred.signature = None;
        assert!(!cred.verify(&issuer_key().public_key()).unwrap());
    }

    #[test]
    fn garbled_signature_hex_verifies_false() {
        let mut cred = issue_sample();
        cred.signature = Some("zz".repeat(64));
        assert!(!cred.verify(&issuer_key().public_key()).unwrap());

        cred.signature = Some("abcd".to_string()); // wrong length
        assert!(!cred.verify(&issuer_key().public_key()).unwrap());
    }

    #[test]
    fn multibyte_signature_hex_verifies_false() {
        // 128 bytes long, so it passes the length check, but the leading
        // 3-byte character must not panic the hex decoder.
        let mut cred = issue_sample();
        let mut sig = String::from("\u{20ac}");
        sig.push_str(&"a".repeat(125));
        assert_eq!(sig.len(), 128);
        cred.signature = Some(sig);
        assert!(!cred.verify(&issuer_key().public_key()).unwrap());
    }

    #[test]
    fn flipped_signature_character_verifies_false() {
        let mut cred = issue_sample();
        let sig = cred.signature.take().unwrap();
        let mut chars: Vec<char> = sig.chars().collect();
        chars[0] = if chars[0] == '0' { '1' } else { '0' };
        cred.signature = Some(chars.into_iter().collect());
        assert!(!cred.verify(&issuer_key().public_key()).unwrap());
    }

    #[test]
    fn tampered_claim_verifies_false() {
        let mut cred = issue_sample();
        cred.claim = json!({"type": "AgeCredential", "claim": "over 21"});
        assert!(!cred.verify(&issuer_key().public_key()).unwrap());
    }

    #[test]
    fn tampered_subject_verifies_false() {
        let mut cred = issue_sample();
        cred.subject = Did::new("did:example:ffeeddccbbaa99887766554433221100").unwrap();
        assert!(!cred.verify(&issuer_key().public_key()).unwrap());
    }

    #[test]
    fn tampered_issuer_verifies_false() {
        let mut cred = issue_sample();
        cred.issuer = Did::new("did:example:ffeeddccbbaa99887766554433221100").unwrap();
        assert!(!cred.verify(&issuer_key().public_key()).unwrap());
    }

    #[test]
    fn tampered_timestamp_verifies_false() {
        let mut cred = issue_sample();
        cred.issued = Timestamp::parse("2001-01-01T00:00:00Z").unwrap();
        assert!(!cred.verify(&issuer_key().public_key()).unwrap());
    }

    #[test]
    fn float_in_tampered_claim_is_an_error_not_false() {
        // A body that cannot even be canonicalized is a protocol defect,
        // surfaced as an error rather than folded into `false`.
        let mut cred = issue_sample();
        cred.claim = json!({"score": 0.5});
        assert!(matches!(
            cred.verify(&issuer_key().public_key()),
            Err(VcError::Canonicalization(_))
        ));
    }

    // -- wire format ----------------------------------------------------------

    #[test]
    fn serializes_with_wire_field_names() {
        let cred = issue_sample();
        let value = serde_json::to_value(&cred).unwrap();
        let obj = value.as_object().unwrap();
        let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["credential", "id", "issued", "issuer", "signature"]);
    }

    #[test]
    fn json_round_trip_still_verifies() {
        let cred = issue_sample();
        let json = serde_json::to_string(&cred).unwrap();
        let back: Credential = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cred);
        assert!(back.verify(&issuer_key().public_key()).unwrap());
    }

    #[test]
    fn from_value_accepts_unsigned_credential() {
        let value = json!({
            "id": "did:example:00112233445566778899aabbccddeeff",
            "issuer": issuer_did().as_str(),
            "issued": "2026-01-15T12:00:00Z",
            "credential": {"type": "AgeCredential"}
        });
        let cred = Credential::from_value(value).unwrap();
        assert!(cred.signature.is_none());
        assert!(!cred.verify(&issuer_key().public_key()).unwrap());
    }

    #[test]
    fn from_value_rejects_missing_fields() {
        let value = json!({"id": "did:example:abc"});
        assert!(matches!(
            Credential::from_value(value),
            Err(VcError::Malformed(_))
        ));
    }

    #[test]
    fn from_value_rejects_unknown_fields() {
        // An appended field sits outside the signing input, so a credential
        // carrying one must be rejected before it can verify as valid.
        let cred = issue_sample();
        let mut value = serde_json::to_value(&cred).unwrap();
        value
            .as_object_mut()
            .unwrap()
            .insert("role".to_string(), json!("admin"));
        assert!(matches!(
            Credential::from_value(value),
            Err(VcError::Malformed(_))
        ));
    }

    #[test]
    fn from_value_rejects_invalid_did() {
        let value = json!({
            "id": "not-a-did",
            "issuer": issuer_did().as_str(),
            "issued": "2026-01-15T12:00:00Z",
            "credential": {}
        });
        assert!(matches!(
            Credential::from_value(value),
            Err(VcError::Malformed(_))
        ));
    }
}
