//! Seed derivation: normalized assertion → 64-byte seed.
//!
//! ```text
//! IKM  = normalized assertion
//! salt = canonical service label (UTF-8)
//! info = "tessera/seed/" ‖ "v{version}"
//!
//! HKDF-SHA256(IKM, salt, info) ──► 64 bytes
//! ```
//!
//! The label is the salt and the version is the context, so two services or
//! two versions never share a seed even for identical key material.

use ring::hkdf;
use zeroize::Zeroize;

use crate::error::CryptoError;
use crate::memory::SecretBytes;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Derived seed length (512 bits).
pub const SEED_LEN: usize = 64;

/// Fixed prefix of the HKDF info string; the version tag follows it.
pub const SEED_CONTEXT: &[u8] = b"tessera/seed/";

/// Ephemeral seed; zeroized on drop.
pub type DerivedSeed = SecretBytes<SEED_LEN>;

/// Marker type for `ring::hkdf::Prk::expand` — requests 64-byte output.
struct SeedKeyType;

impl hkdf::KeyType for SeedKeyType {
    fn len(&self) -> usize {
        SEED_LEN
    }
}

/// Render the version tag used in the HKDF info (`3` → `"v3"`).
#[must_use]
pub fn version_tag(version: u32) -> String {
    format!("v{version}")
}

/// Derive the 64-byte seed for one (assertion, label, version) triple.
///
/// Fully deterministic: no randomness enters the derivation.
///
/// # Errors
///
/// Returns [`CryptoError::Derivation`] if the key material or label is empty,
/// if `version` is 0, or if HKDF refuses the output length.
pub fn derive_seed(
    normalized_assertion: &[u8],
    service_label: &str,
    version: u32,
) -> Result<DerivedSeed, CryptoError> {
    if normalized_assertion.is_empty() {
        return Err(CryptoError::Derivation("key material is empty".into()));
    }
    if service_label.is_empty() {
        return Err(CryptoError::Derivation("service label is empty".into()));
    }
    if version == 0 {
        return Err(CryptoError::Derivation("version must be at least 1".into()));
    }

    let tag = version_tag(version);
    let info: [&[u8]; 2] = [SEED_CONTEXT, tag.as_bytes()];

    let salt = hkdf::Salt::new(hkdf::HKDF_SHA256, service_label.as_bytes());
    let prk = salt.extract(normalized_assertion);
    let okm = prk
        .expand(&info, SeedKeyType)
        .map_err(|_| CryptoError::Derivation("HKDF expand failed".into()))?;

    let mut seed = [0u8; SEED_LEN];
    okm.fill(&mut seed)
        .map_err(|_| CryptoError::Derivation("HKDF fill failed".into()))?;

    let out = SecretBytes::new(seed);
    seed.zeroize();
    Ok(out)
}
