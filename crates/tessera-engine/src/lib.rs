//! `tessera-engine` — generation coordinator for TESSERA.
//!
//! Wires an [`Authenticator`] to the pure derivation functions of
//! `tessera-crypto-core` and enforces one authenticator interaction at a
//! time. Callers (CLI, desktop shell) own display, persistence, and retry.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod authenticator;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod request;

pub use authenticator::{
    Authenticator, AuthenticatorError, CredentialHandle, NullAuthenticator, SoftwareAuthenticator,
};
pub use config::{BusyPolicy, EngineConfig};
pub use coordinator::GenerationCoordinator;
pub use error::GenerationError;
pub use request::{FormattingStrategy, GeneratedArtifact, ServiceRequest};
