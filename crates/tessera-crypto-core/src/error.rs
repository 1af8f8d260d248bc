//! Cryptographic error types for `tessera-crypto-core`.

use thiserror::Error;

/// Errors produced by the derivation engine.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Raw assertion is too short or fails the configured structural checks.
    #[error("malformed assertion: {0}")]
    MalformedAssertion(String),

    /// HKDF rejected its inputs (empty key material, empty salt, bad version).
    #[error("seed derivation failed: {0}")]
    Derivation(String),

    /// Codename dictionary failed validation at load time.
    #[error("invalid dictionary: {0}")]
    InvalidDictionary(String),

    /// Output formatting was asked for something it cannot produce
    /// (seed too short, length out of range).
    #[error("formatting error: {0}")]
    Formatting(String),

    /// Secure memory allocation failure (mlock, guard pages).
    #[error("secure memory error: {0}")]
    SecureMemory(String),
}
