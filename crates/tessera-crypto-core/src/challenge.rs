//! Service canonicalization and challenge construction.
//!
//! The challenge presented to the authenticator is the SHA-256 digest of the
//! canonical service label. Because it is content-derived rather than a
//! random nonce, the authenticator's signature over it is reproducible.
//!
//! ```text
//! "accounts.example.com" ──► "example" ──► SHA-256 ──► 32-byte challenge
//! ```

use ring::digest;

use crate::error::CryptoError;

/// Challenge length in bytes (SHA-256 output).
pub const CHALLENGE_LEN: usize = 32;

/// Fixed-size challenge handed to the authenticator.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Challenge([u8; CHALLENGE_LEN]);

impl Challenge {
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; CHALLENGE_LEN] {
        &self.0
    }
}

impl AsRef<[u8]> for Challenge {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for Challenge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Challenge(")?;
        for b in &self.0[..4] {
            write!(f, "{b:02x}")?;
        }
        write!(f, "..)")
    }
}

/// Reduce a service or domain string to its canonical label.
///
/// Input is trimmed, then split on `.`. With more than one segment the
/// second-to-last segment wins (`accounts.example.com` → `example`);
/// otherwise the whole trimmed string is the label. No case folding.
///
/// # Errors
///
/// Returns [`CryptoError::Derivation`] if the resulting label is empty
/// (blank input, or input such as `".com"`).
pub fn canonical_label(service_input: &str) -> Result<&str, CryptoError> {
    let trimmed = service_input.trim();
    let mut segments = trimmed.rsplit('.');
    let last = segments.next();
    let label = match (last, segments.next()) {
        (Some(_), Some(second_to_last)) => second_to_last,
        _ => trimmed,
    };

    if label.is_empty() {
        return Err(CryptoError::Derivation(format!(
            "service input {service_input:?} has no usable label"
        )));
    }
    Ok(label)
}

/// Build the authenticator challenge for an already-canonical label.
#[must_use]
pub fn challenge_for_label(label: &str) -> Challenge {
    let digest = digest::digest(&digest::SHA256, label.as_bytes());
    let mut out = [0u8; CHALLENGE_LEN];
    out.copy_from_slice(digest.as_ref());
    Challenge(out)
}

/// Canonicalize `service_input` and build its challenge in one step.
///
/// # Errors
///
/// See [`canonical_label`].
pub fn build_challenge(service_input: &str) -> Result<(String, Challenge), CryptoError> {
    let label = canonical_label(service_input)?;
    Ok((label.to_owned(), challenge_for_label(label)))
}
