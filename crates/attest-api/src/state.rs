//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! The state is the identity registry (which owns the issuer identity)
//! plus configuration. There is exactly one issuer key per process; it is
//! loaded from the environment at startup or generated ephemerally for
//! development.

use std::sync::Arc;

use attest_registry::{IdentityRegistry, IssuerIdentity};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { port: 8080 }
    }
}

/// Decode a hex string into bytes.
fn hex_decode(s: &str) -> Result<Vec<u8>, String> {
    let s = s.trim();
    if s.len() % 2 != 0 {
        return Err(format!("hex string has odd length: {}", s.len()));
    }
    // Guard before slicing: a multi-byte character would make byte-offset
    // indexing panic on a char boundary.
    if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err("hex string contains non-hex characters".to_string());
    }
    (0..s.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&s[i..i + 2], 16)
                .map_err(|e| format!("invalid hex at position {i}: {e}"))
        })
        .collect()
}

/// Error loading the issuer signing key at startup.
#[derive(Debug)]
pub enum IssuerKeyError {
    /// `ISSUER_SIGNING_KEY_HEX` contained invalid hex characters.
    InvalidHex(String),
    /// `ISSUER_SIGNING_KEY_HEX` decoded to the wrong number of bytes.
    InvalidLength {
        /// Required seed length in bytes.
        expected: usize,
        /// Decoded length in bytes.
        actual: usize,
    },
    /// Fresh key generation failed (OS entropy source unavailable).
    Generation(attest_crypto::CryptoError),
}

impl std::fmt::Display for IssuerKeyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidHex(msg) => write!(f, "ISSUER_SIGNING_KEY_HEX invalid hex: {msg}"),
            Self::InvalidLength { expected, actual } => write!(
                f,
                "ISSUER_SIGNING_KEY_HEX must be exactly {} hex chars ({expected} bytes), got {actual} bytes",
                expected * 2
            ),
            Self::Generation(err) => write!(f, "issuer key generation failed: {err}"),
        }
    }
}

impl std::error::Error for IssuerKeyError {}

/// Load the issuer identity from the environment, or generate one for
/// development.
///
/// In production, `ISSUER_SIGNING_KEY_HEX` provides the 64-character
/// hex-encoded Ed25519 seed (32 bytes). In development (when the variable
/// is absent), a fresh key is generated and a warning is logged.
///
/// Returns `Err` if the environment variable is set but contains invalid
/// data, rather than panicking the server on startup.
fn load_or_generate_issuer() -> Result<IssuerIdentity, IssuerKeyError> {
    if let Ok(hex) = std::env::var("ISSUER_SIGNING_KEY_HEX") {
        let bytes = hex_decode(&hex).map_err(IssuerKeyError::InvalidHex)?;
        if bytes.len() != 32 {
            return Err(IssuerKeyError::InvalidLength {
                expected: 32,
                actual: bytes.len(),
            });
        }
        let mut seed = [0u8; 32];
        seed.copy_from_slice(&bytes);
        Ok(IssuerIdentity::from_seed(&seed))
    } else {
        tracing::warn!(
            "ISSUER_SIGNING_KEY_HEX not set — generating ephemeral key. \
             Credentials signed with this key will not be verifiable after restart."
        );
        IssuerIdentity::generate().map_err(IssuerKeyError::Generation)
    }
}

/// Shared application state accessible to all route handlers.
///
/// Clone-friendly: the registry is behind `Arc` and shared across clones.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The identity registry, owning the process-wide issuer identity.
    pub registry: Arc<IdentityRegistry>,
    /// Application configuration.
    pub config: AppConfig,
}

impl AppState {
    /// Create application state with default configuration.
    ///
    /// # Panics
    ///
    /// Panics if `ISSUER_SIGNING_KEY_HEX` is set but contains invalid data.
    /// In production, prefer [`AppState::try_new`] for graceful error
    /// handling.
    pub fn new() -> Self {
        Self::try_new().expect("failed to initialize AppState (check ISSUER_SIGNING_KEY_HEX)")
    }

    /// Create application state, returning `Err` if issuer key loading
    /// fails.
    pub fn try_new() -> Result<Self, IssuerKeyError> {
        Self::try_with_config(AppConfig::default())
    }

    /// Create application state with the given configuration.
    pub fn try_with_config(config: AppConfig) -> Result<Self, IssuerKeyError> {
        let issuer = load_or_generate_issuer()?;
        Ok(Self {
            registry: Arc::new(IdentityRegistry::new(issuer)),
            config,
        })
    }

    /// Create application state around an existing issuer identity.
    ///
    /// Used by tests that need a deterministic issuer key.
    pub fn with_issuer(issuer: IssuerIdentity) -> Self {
        Self {
            registry: Arc::new(IdentityRegistry::new(issuer)),
            config: AppConfig::default(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_decode_valid() {
        let result = super::hex_decode("deadbeef").unwrap();
        assert_eq!(result, vec![0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn hex_decode_odd_length_fails() {
        assert!(super::hex_decode("abc").is_err());
    }

    #[test]
    fn hex_decode_invalid_chars_fails() {
        assert!(super::hex_decode("zzzz").is_err());
    }

    #[test]
    fn hex_decode_multibyte_chars_fail_without_panic() {
        // 3-byte UTF-8 character padded to an even byte length.
        let mut s = String::from("\u{20ac}");
        s.push_str(&"a".repeat(61));
        assert_eq!(s.len(), 64);
        assert!(super::hex_decode(&s).is_err());
    }

    #[test]
    fn app_state_starts_with_empty_registry() {
        let state = AppState::with_issuer(IssuerIdentity::from_seed(&[7u8; 32]));
        assert!(state.registry.is_empty());
        assert_eq!(state.config.port, 8080);
    }

    #[test]
    fn app_state_issuer_did_is_well_formed() {
        let state = AppState::with_issuer(IssuerIdentity::from_seed(&[7u8; 32]));
        assert_eq!(state.registry.issuer_did().method(), "example");
    }

    #[test]
    fn issuer_key_error_display() {
        let err = IssuerKeyError::InvalidLength {
            expected: 32,
            actual: 16,
        };
        let msg = format!("{err}");
        assert!(msg.contains("64 hex chars"));
        assert!(msg.contains("16 bytes"));
    }
}
