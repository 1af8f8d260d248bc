#![allow(dead_code, clippy::unwrap_used, clippy::arithmetic_side_effects)]

//! Scripted authenticators shared by the integration suites.

use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::{Notify, Semaphore};

use tessera_crypto_core::{Challenge, COUNTER_OFFSET};
use tessera_engine::{Authenticator, AuthenticatorError, CredentialHandle};

/// 37-byte assertion: rpIdHash = 00..1f, flags = 0x05, signCount = 0.
pub const FIXTURE_A: [u8; 37] = [
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e,
    0x0f, 0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1a, 0x1b, 0x1c, 0x1d,
    0x1e, 0x1f, 0x05, 0x00, 0x00, 0x00, 0x00,
];

pub fn credential() -> CredentialHandle {
    CredentialHandle::new(vec![0xc7; 32])
}

/// `FIXTURE_A` with the signature counter bumped on every call.
fn fixture_with_counter(count: u32) -> Vec<u8> {
    let mut out = FIXTURE_A.to_vec();
    out[COUNTER_OFFSET..COUNTER_OFFSET + 4].copy_from_slice(&count.to_be_bytes());
    out
}

// ---------------------------------------------------------------------------
// Fixture authenticator
// ---------------------------------------------------------------------------

/// Always answers with `FIXTURE_A`, ignoring the challenge, with a live counter.
#[derive(Default)]
pub struct FixtureAuthenticator {
    counter: AtomicU32,
}

impl FixtureAuthenticator {
    pub fn calls(&self) -> u32 {
        self.counter.load(Ordering::SeqCst)
    }
}

impl Authenticator for FixtureAuthenticator {
    fn is_available(&self) -> bool {
        true
    }

    fn provider_name(&self) -> &'static str {
        "Fixture"
    }

    async fn sign(
        &self,
        _credential: &CredentialHandle,
        _challenge: &Challenge,
    ) -> Result<Vec<u8>, AuthenticatorError> {
        let count = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(fixture_with_counter(count))
    }
}

// ---------------------------------------------------------------------------
// Scripted authenticator
// ---------------------------------------------------------------------------

/// Returns a fixed response for every call.
pub struct ScriptedAuthenticator {
    response: Result<Vec<u8>, AuthenticatorError>,
    calls: AtomicU32,
}

impl ScriptedAuthenticator {
    pub fn failing(err: AuthenticatorError) -> Self {
        Self {
            response: Err(err),
            calls: AtomicU32::new(0),
        }
    }

    pub fn returning(bytes: Vec<u8>) -> Self {
        Self {
            response: Ok(bytes),
            calls: AtomicU32::new(0),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Authenticator for ScriptedAuthenticator {
    fn is_available(&self) -> bool {
        true
    }

    fn provider_name(&self) -> &'static str {
        "Scripted"
    }

    async fn sign(
        &self,
        _credential: &CredentialHandle,
        _challenge: &Challenge,
    ) -> Result<Vec<u8>, AuthenticatorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response.clone()
    }
}

// ---------------------------------------------------------------------------
// Gated authenticator
// ---------------------------------------------------------------------------

/// Blocks inside `sign` until the test releases a permit.
///
/// Tracks how many calls are inside `sign` at once.
#[derive(Clone)]
pub struct GatedAuthenticator {
    pub entered: Arc<Notify>,
    pub release: Arc<Semaphore>,
    active: Arc<AtomicUsize>,
    max_active: Arc<AtomicUsize>,
    calls: Arc<AtomicU32>,
}

impl Default for GatedAuthenticator {
    fn default() -> Self {
        Self {
            entered: Arc::new(Notify::new()),
            release: Arc::new(Semaphore::new(0)),
            active: Arc::new(AtomicUsize::new(0)),
            max_active: Arc::new(AtomicUsize::new(0)),
            calls: Arc::new(AtomicU32::new(0)),
        }
    }
}

impl GatedAuthenticator {
    pub fn max_active(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Authenticator for GatedAuthenticator {
    fn is_available(&self) -> bool {
        true
    }

    fn provider_name(&self) -> &'static str {
        "Gated"
    }

    async fn sign(
        &self,
        _credential: &CredentialHandle,
        _challenge: &Challenge,
    ) -> Result<Vec<u8>, AuthenticatorError> {
        let count = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(now, Ordering::SeqCst);
        self.entered.notify_one();

        let permit = self.release.acquire().await.unwrap();
        permit.forget();

        self.active.fetch_sub(1, Ordering::SeqCst);
        Ok(fixture_with_counter(count))
    }
}
