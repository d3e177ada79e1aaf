//! # Identity Newtypes
//!
//! Domain-primitive newtypes for the two identifiers in the stack. Each is
//! a distinct type — you cannot pass a [`SubjectId`] where a [`Did`] is
//! expected — and each validates its format at construction time.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;

/// W3C Decentralized Identifier (DID).
///
/// Format: `did:<method>:<method-specific-id>`
/// where method is lowercase alphanumeric and method-specific-id is non-empty.
///
/// # Validation
///
/// - Must start with `did:`
/// - Method name must be at least 1 character, lowercase alphanumeric
/// - Must have a `:` separator after method
/// - Method-specific identifier must be non-empty
///
/// Reference: <https://www.w3.org/TR/did-core/#did-syntax>
///
/// Deserialization validates: a wire value that is not a well-formed DID
/// is a deserialization error, so malformed identifiers cannot enter the
/// system through JSON.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Did(String);

impl<'de> Deserialize<'de> for Did {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(serde::de::Error::custom)
    }
}

impl Did {
    /// Create a DID from a string, validating format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDid`] if the string does not
    /// match the `did:method:identifier` format.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    /// Validate DID format without constructing.
    fn validate(s: &str) -> Result<(), ValidationError> {
        if !s.starts_with("did:") {
            return Err(ValidationError::InvalidDid(s.to_string()));
        }

        let rest = &s[4..]; // after "did:"
        match rest.find(':') {
            None => return Err(ValidationError::InvalidDid(s.to_string())),
            Some(pos) => {
                let method = &rest[..pos];
                let identifier = &rest[pos + 1..];

                // Method must be non-empty and lowercase alphanumeric
                if method.is_empty()
                    || !method
                        .chars()
                        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
                {
                    return Err(ValidationError::InvalidDid(s.to_string()));
                }

                // Identifier must be non-empty
                if identifier.is_empty() {
                    return Err(ValidationError::InvalidDid(s.to_string()));
                }
            }
        }

        Ok(())
    }

    /// Access the DID string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Return the DID method (the part between the first and second colons).
    pub fn method(&self) -> &str {
        let rest = &self.0[4..]; // after "did:"
        let colon_pos = rest.find(':').expect("validated at construction");
        &rest[..colon_pos]
    }

    /// Return the method-specific identifier (everything after `did:method:`).
    pub fn method_specific_id(&self) -> &str {
        let rest = &self.0[4..]; // after "did:"
        let colon_pos = rest.find(':').expect("validated at construction");
        &rest[colon_pos + 1..]
    }
}

impl std::fmt::Display for Did {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An opaque subject identifier supplied by the caller at registration.
///
/// This is the registry key, not a DID: it names the subject in the
/// caller's own namespace (e.g. `"alice"` or an account number).
///
/// # Validation
///
/// - Trimmed of surrounding whitespace, stored in trimmed form
/// - Must be non-empty after trimming
/// - Must not exceed 255 characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SubjectId(String);

impl<'de> Deserialize<'de> for SubjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(serde::de::Error::custom)
    }
}

impl SubjectId {
    /// Create a subject identifier, validating format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidSubjectId`] if the value is empty
    /// after trimming or exceeds 255 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.len() > 255 {
            return Err(ValidationError::InvalidSubjectId(raw));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Access the subject identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SubjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
