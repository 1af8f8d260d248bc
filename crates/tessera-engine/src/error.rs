//! Error types for `tessera-engine`.
//!
//! Each failure the caller may want to treat differently gets its own
//! variant: an absent authenticator, a cancelled prompt, a timeout, a
//! concurrent call, a broken assertion, and a failed derivation are never
//! folded into one another.

use tessera_crypto_core::CryptoError;
use thiserror::Error;

use crate::authenticator::AuthenticatorError;

/// Errors returned by [`crate::GenerationCoordinator::generate`].
#[derive(Debug, Error)]
pub enum GenerationError {
    /// No authenticator is present or the capability is unavailable.
    #[error("no authenticator available")]
    NoAuthenticator,

    /// The user dismissed or refused the authenticator prompt.
    #[error("authenticator prompt cancelled by user")]
    UserCancelled,

    /// The authenticator gave up waiting for the user.
    #[error("authenticator timed out")]
    Timeout,

    /// Another generation is in flight and the coordinator rejects overlap.
    #[error("authenticator busy: another generation is in progress")]
    Busy,

    /// The authenticator returned bytes that cannot be normalized.
    #[error("malformed assertion: {0}")]
    MalformedAssertion(String),

    /// Seed derivation or output formatting failed.
    #[error("derivation error: {0}")]
    Derivation(String),

    /// Caller passed an unusable service string or version.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Authenticator failed for a platform reason other than cancel/timeout.
    #[error("authenticator error: {0}")]
    Authenticator(String),

    /// Engine configuration or dictionary file could not be used.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl GenerationError {
    /// Short stable name for logs and metrics labels.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NoAuthenticator => "no_authenticator",
            Self::UserCancelled => "user_cancelled",
            Self::Timeout => "timeout",
            Self::Busy => "busy",
            Self::MalformedAssertion(_) => "malformed_assertion",
            Self::Derivation(_) => "derivation",
            Self::InvalidRequest(_) => "invalid_request",
            Self::Authenticator(_) => "authenticator",
            Self::Configuration(_) => "configuration",
        }
    }

    /// Whether simply asking again (after user action) may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::UserCancelled | Self::Timeout | Self::Busy)
    }
}

impl From<CryptoError> for GenerationError {
    fn from(err: CryptoError) -> Self {
        match err {
            CryptoError::MalformedAssertion(msg) => Self::MalformedAssertion(msg),
            CryptoError::InvalidDictionary(msg) => Self::Configuration(msg),
            CryptoError::Derivation(msg)
            | CryptoError::Formatting(msg)
            | CryptoError::SecureMemory(msg) => Self::Derivation(msg),
        }
    }
}

impl From<AuthenticatorError> for GenerationError {
    fn from(err: AuthenticatorError) -> Self {
        match err {
            AuthenticatorError::NotAvailable => Self::NoAuthenticator,
            AuthenticatorError::NotAllowed | AuthenticatorError::Aborted => Self::UserCancelled,
            AuthenticatorError::Timeout => Self::Timeout,
            AuthenticatorError::Platform(msg) => Self::Authenticator(msg),
        }
    }
}
