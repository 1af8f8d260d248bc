//! `tessera-crypto-core` — deterministic secret derivation for TESSERA.
//!
//! This crate is the audit target: zero network, zero async, zero I/O.
//! Every function is pure; the only state is the secret buffers it returns.
//!
//! ```text
//! service ──► challenge ──► [authenticator] ──► assertion
//!                                                  │ normalize
//!                                                  ▼
//!                           label, version ──► HKDF-SHA256 ──► 64-byte seed
//!                                                  │
//!                                 ┌────────────────┴───────────────┐
//!                                 ▼                                ▼
//!                         password (94-char)               codename (dictionary)
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;
pub mod memory;

pub mod challenge;

pub mod assertion;

pub mod seed;

pub mod password;

pub mod codename;

pub use assertion::{normalize_assertion, AssertionPolicy, COUNTER_OFFSET, MIN_ASSERTION_LEN};
pub use challenge::{build_challenge, canonical_label, challenge_for_label, Challenge};
pub use codename::{select_codename, Codename, Dictionary, DictionaryEntry};
pub use error::CryptoError;
pub use memory::{disable_core_dumps, SecretBuffer, SecretBytes};
pub use password::{generate_password, stretch_password, ALPHABET, DEFAULT_PASSWORD_LENGTH};
pub use seed::{derive_seed, DerivedSeed, SEED_LEN};
