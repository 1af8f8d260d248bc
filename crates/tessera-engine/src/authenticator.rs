//! Authenticator capability — the hardware collaborator behind generation.
//!
//! The engine never talks to hardware itself. It hands a 32-byte challenge to
//! an [`Authenticator`] and awaits signed bytes back.
//!
//! # Implementations
//!
//! ```text
//! Authenticator (trait)
//! ├── SoftwareAuthenticator  (HMAC-SHA256 over a local secret — demo/testing)
//! └── NullAuthenticator      (always NotAvailable — fallback)
//! ```
//!
//! Platform providers (FIDO2 over HID, Secure Enclave, TPM) implement the same
//! trait outside this crate.

use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU32, Ordering};

use ring::{digest, hmac};
use tessera_crypto_core::assertion::FLAG_USER_PRESENT;
use tessera_crypto_core::{Challenge, SecretBytes};

// ---------------------------------------------------------------------------
// Credential handle
// ---------------------------------------------------------------------------

/// Opaque identifier of a registered hardware credential.
///
/// Owned by the caller; the engine only reads it.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CredentialHandle(Box<[u8]>);

impl CredentialHandle {
    #[must_use]
    pub fn new(bytes: impl Into<Box<[u8]>>) -> Self {
        Self(bytes.into())
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for CredentialHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CredentialHandle({} bytes)", self.0.len())
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors an authenticator may report for a signing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticatorError {
    /// No authenticator present on this device.
    NotAvailable,
    /// The user refused or dismissed the prompt.
    NotAllowed,
    /// The request was aborted before completion.
    Aborted,
    /// The authenticator's own timeout elapsed.
    Timeout,
    /// Platform-specific failure.
    Platform(String),
}

impl fmt::Display for AuthenticatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAvailable => write!(f, "authenticator not available"),
            Self::NotAllowed => write!(f, "operation not allowed"),
            Self::Aborted => write!(f, "operation aborted"),
            Self::Timeout => write!(f, "operation timed out"),
            Self::Platform(msg) => write!(f, "platform error: {msg}"),
        }
    }
}

impl std::error::Error for AuthenticatorError {}

// ---------------------------------------------------------------------------
// Capability trait
// ---------------------------------------------------------------------------

/// Signs challenges with a registered credential.
///
/// Repeated calls with the same credential and challenge must return
/// assertions that differ at most in the signature counter field.
pub trait Authenticator: Send + Sync {
    /// Whether the capability is present at all.
    fn is_available(&self) -> bool;

    /// Human-readable provider name (e.g. "Software", "FIDO2").
    fn provider_name(&self) -> &'static str;

    /// Ask the authenticator to sign `challenge` with `credential`.
    ///
    /// This is the one suspend point of a generation. Timeouts and user
    /// prompts are the implementation's business.
    fn sign(
        &self,
        credential: &CredentialHandle,
        challenge: &Challenge,
    ) -> impl Future<Output = Result<Vec<u8>, AuthenticatorError>> + Send;
}

// ---------------------------------------------------------------------------
// Null provider (fallback)
// ---------------------------------------------------------------------------

/// Fallback when no authenticator is present.
pub struct NullAuthenticator;

impl Authenticator for NullAuthenticator {
    fn is_available(&self) -> bool {
        false
    }

    fn provider_name(&self) -> &'static str {
        "None"
    }

    async fn sign(
        &self,
        _credential: &CredentialHandle,
        _challenge: &Challenge,
    ) -> Result<Vec<u8>, AuthenticatorError> {
        Err(AuthenticatorError::NotAvailable)
    }
}

// ---------------------------------------------------------------------------
// Software provider
// ---------------------------------------------------------------------------

/// Flags reported by the software provider: user present + user verified.
const SOFTWARE_FLAGS: u8 = FLAG_USER_PRESENT | 0x04;

/// Authenticator backed by a 32-byte secret held in process memory.
///
/// Produces WebAuthn-shaped assertions:
///
/// ```text
/// SHA-256(credential) | flags 0x05 | counter (BE u32) | HMAC-SHA256(secret, credential ‖ challenge)
/// ```
///
/// The counter increments on every call, like a real authenticator. There is
/// no hardware protection here: the secret is only as safe as this process.
pub struct SoftwareAuthenticator {
    secret: SecretBytes<32>,
    counter: AtomicU32,
}

impl SoftwareAuthenticator {
    #[must_use]
    pub fn new(secret: SecretBytes<32>) -> Self {
        Self {
            secret,
            counter: AtomicU32::new(0),
        }
    }

    /// Demo-mode provider keyed with `SHA-256("DEMO_KEY")`.
    ///
    /// Anyone can reproduce passwords generated this way.
    #[must_use]
    pub fn demo() -> Self {
        let mut secret = [0u8; 32];
        secret.copy_from_slice(digest::digest(&digest::SHA256, b"DEMO_KEY").as_ref());
        Self::new(SecretBytes::new(secret))
    }

    /// Number of signatures produced so far.
    #[must_use]
    pub fn sign_count(&self) -> u32 {
        self.counter.load(Ordering::SeqCst)
    }

    fn assemble(&self, credential: &CredentialHandle, challenge: &Challenge) -> Vec<u8> {
        let count = self
            .counter
            .fetch_add(1, Ordering::SeqCst)
            .wrapping_add(1);

        let key = hmac::Key::new(hmac::HMAC_SHA256, self.secret.expose());
        let mut ctx = hmac::Context::with_key(&key);
        ctx.update(credential.as_bytes());
        ctx.update(challenge.as_ref());
        let tag = ctx.sign();

        let rp_id_hash = digest::digest(&digest::SHA256, credential.as_bytes());

        let mut out = Vec::with_capacity(69);
        out.extend_from_slice(rp_id_hash.as_ref());
        out.push(SOFTWARE_FLAGS);
        out.extend_from_slice(&count.to_be_bytes());
        out.extend_from_slice(tag.as_ref());
        out
    }
}

impl Authenticator for SoftwareAuthenticator {
    fn is_available(&self) -> bool {
        true
    }

    fn provider_name(&self) -> &'static str {
        "Software"
    }

    async fn sign(
        &self,
        credential: &CredentialHandle,
        challenge: &Challenge,
    ) -> Result<Vec<u8>, AuthenticatorError> {
        Ok(self.assemble(credential, challenge))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
