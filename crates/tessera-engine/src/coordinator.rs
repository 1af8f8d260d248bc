//! Generation coordinator — the single public entry point.
//!
//! One call runs the whole pipeline under the authenticator lock:
//!
//! ```text
//! validate ─► lock ─► challenge ─► sign (await) ─► normalize ─► derive ─► format ─► unlock
//! ```
//!
//! The lock is held for the full call so two authenticator prompts never
//! overlap. Dropping the returned future releases the lock; the
//! authenticator is left to time out or abandon its own prompt.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use tessera_crypto_core::{
    challenge_for_label, derive_seed, generate_password, normalize_assertion, select_codename,
    AssertionPolicy, Dictionary,
};

use crate::authenticator::{Authenticator, CredentialHandle};
use crate::config::{BusyPolicy, EngineConfig};
use crate::error::GenerationError;
use crate::request::{FormattingStrategy, GeneratedArtifact, ServiceRequest};

/// Serializes generation requests against one authenticator.
pub struct GenerationCoordinator<A> {
    authenticator: A,
    dictionary: Arc<Dictionary>,
    busy_policy: BusyPolicy,
    assertion_policy: AssertionPolicy,
    gate: Mutex<()>,
}

impl<A: Authenticator> GenerationCoordinator<A> {
    /// Coordinator with default policies (queue, permissive).
    pub fn new(authenticator: A, dictionary: impl Into<Arc<Dictionary>>) -> Self {
        Self {
            authenticator,
            dictionary: dictionary.into(),
            busy_policy: BusyPolicy::default(),
            assertion_policy: AssertionPolicy::default(),
            gate: Mutex::new(()),
        }
    }

    /// Build from configuration, loading the configured dictionary.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Configuration`] if the dictionary cannot be
    /// loaded or validated.
    pub fn from_config(authenticator: A, config: &EngineConfig) -> Result<Self, GenerationError> {
        let dictionary = config.load_dictionary()?;
        debug!(
            entries = dictionary.len(),
            busy_policy = ?config.busy_policy,
            assertion_policy = ?config.assertion_policy,
            "coordinator configured"
        );
        Ok(Self::new(authenticator, dictionary)
            .with_busy_policy(config.busy_policy)
            .with_assertion_policy(config.assertion_policy))
    }

    #[must_use]
    pub const fn with_busy_policy(mut self, policy: BusyPolicy) -> Self {
        self.busy_policy = policy;
        self
    }

    #[must_use]
    pub const fn with_assertion_policy(mut self, policy: AssertionPolicy) -> Self {
        self.assertion_policy = policy;
        self
    }

    pub const fn authenticator(&self) -> &A {
        &self.authenticator
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// `true` while a generation holds the authenticator.
    pub fn is_busy(&self) -> bool {
        self.gate.try_lock().is_err()
    }

    /// Generate the artifact for `service_input` at `version`.
    ///
    /// Triggers exactly one authenticator interaction. On any failure no
    /// artifact is produced.
    ///
    /// # Errors
    ///
    /// - [`GenerationError::InvalidRequest`] — blank service, version 0
    /// - [`GenerationError::Busy`] — another call is in flight under [`BusyPolicy::Reject`]
    /// - [`GenerationError::NoAuthenticator`], [`GenerationError::UserCancelled`],
    ///   [`GenerationError::Timeout`], [`GenerationError::Authenticator`] — from the authenticator
    /// - [`GenerationError::MalformedAssertion`], [`GenerationError::Derivation`] — pipeline failures
    pub async fn generate(
        &self,
        credential: &CredentialHandle,
        service_input: &str,
        version: u32,
        strategy: FormattingStrategy,
    ) -> Result<GeneratedArtifact, GenerationError> {
        let request = ServiceRequest::new(service_input, version)?;
        self.generate_request(credential, &request, strategy).await
    }

    /// [`Self::generate`] for an already-validated request.
    ///
    /// # Errors
    ///
    /// Same as [`Self::generate`], minus request validation.
    pub async fn generate_request(
        &self,
        credential: &CredentialHandle,
        request: &ServiceRequest,
        strategy: FormattingStrategy,
    ) -> Result<GeneratedArtifact, GenerationError> {
        let _guard = self.acquire(request).await?;

        if !self.authenticator.is_available() {
            warn!(provider = self.authenticator.provider_name(), "no authenticator");
            return Err(GenerationError::NoAuthenticator);
        }

        let challenge = challenge_for_label(request.label());
        debug!(
            service = request.label(),
            version = request.version(),
            provider = self.authenticator.provider_name(),
            "awaiting authenticator"
        );

        let raw = self
            .authenticator
            .sign(credential, &challenge)
            .await
            .map(Zeroizing::new)
            .map_err(|e| {
                let err = GenerationError::from(e);
                warn!(service = request.label(), kind = err.kind(), "authenticator failed");
                err
            })?;

        let artifact = self.derive_artifact(&raw, request, strategy).map_err(|err| {
            warn!(service = request.label(), kind = err.kind(), "generation failed");
            err
        })?;

        info!(
            service = request.label(),
            version = request.version(),
            strategy = %strategy,
            "artifact generated"
        );
        Ok(artifact)
    }

    async fn acquire(&self, request: &ServiceRequest) -> Result<MutexGuard<'_, ()>, GenerationError> {
        match self.busy_policy {
            BusyPolicy::Queue => Ok(self.gate.lock().await),
            BusyPolicy::Reject => self.gate.try_lock().map_err(|_| {
                warn!(service = request.label(), "rejected: authenticator busy");
                GenerationError::Busy
            }),
        }
    }

    /// Everything after the authenticator: pure and synchronous.
    fn derive_artifact(
        &self,
        raw: &[u8],
        request: &ServiceRequest,
        strategy: FormattingStrategy,
    ) -> Result<GeneratedArtifact, GenerationError> {
        let normalized = normalize_assertion(raw, self.assertion_policy)?;
        let seed = derive_seed(normalized.expose(), request.label(), request.version())?;

        let (value, annotation) = match strategy {
            FormattingStrategy::Password => (generate_password(seed.expose())?, None),
            FormattingStrategy::Codename => {
                let codename = select_codename(seed.expose(), &self.dictionary)?;
                (codename.value, Some(codename.annotation))
            }
        };

        Ok(GeneratedArtifact {
            service_name: request.label().to_owned(),
            version: request.version(),
            value,
            annotation,
            strategy,
        })
    }
}
