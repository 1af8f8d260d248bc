//! Assertion normalization.
//!
//! Authenticators bump a signature counter on every use, so two assertions
//! over the same challenge differ in exactly those four bytes. Zeroing them
//! yields byte-identical key material across invocations.
//!
//! # Layout
//!
//! ```text
//! offset  0..32   rpIdHash
//! offset 32       flags        (bit 0 = user present)
//! offset 33..37   signCount    (big-endian u32)  ◄── zeroed
//! offset 37..     extensions / signature         (passed through)
//! ```

use zeroize::Zeroize;

use crate::error::CryptoError;
use crate::memory::SecretBuffer;

/// Byte offset of the flags field.
pub const FLAGS_OFFSET: usize = 32;

/// Byte offset of the 4-byte signature counter.
pub const COUNTER_OFFSET: usize = 33;

/// Length of the signature counter field.
pub const COUNTER_LEN: usize = 4;

/// Smallest structure that still contains the whole counter field.
pub const MIN_ASSERTION_LEN: usize = COUNTER_OFFSET + COUNTER_LEN;

/// User-present flag bit.
pub const FLAG_USER_PRESENT: u8 = 0x01;

/// How much structure to check before normalizing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AssertionPolicy {
    /// Length check only.
    #[default]
    Permissive,
    /// Also require the user-present flag bit.
    RequireUserPresence,
}

/// Return a copy of `raw` with the signature counter zeroed.
///
/// `raw` is never modified. All bytes outside `COUNTER_OFFSET..COUNTER_OFFSET + 4`
/// are copied unchanged.
///
/// # Errors
///
/// Returns [`CryptoError::MalformedAssertion`] if `raw` is shorter than
/// [`MIN_ASSERTION_LEN`], or if `policy` requires user presence and the flag
/// is clear.
pub fn normalize_assertion(
    raw: &[u8],
    policy: AssertionPolicy,
) -> Result<SecretBuffer, CryptoError> {
    if raw.len() < MIN_ASSERTION_LEN {
        return Err(CryptoError::MalformedAssertion(format!(
            "assertion too short: {} bytes (minimum {MIN_ASSERTION_LEN})",
            raw.len()
        )));
    }

    if policy == AssertionPolicy::RequireUserPresence
        && raw[FLAGS_OFFSET] & FLAG_USER_PRESENT == 0
    {
        return Err(CryptoError::MalformedAssertion(
            "user-present flag not set".into(),
        ));
    }

    let mut normalized = raw.to_vec();
    normalized[COUNTER_OFFSET..MIN_ASSERTION_LEN].zeroize();
    Ok(SecretBuffer::from_vec(normalized))
}

/// Read the signature counter out of a raw assertion, for diagnostics.
///
/// Returns `None` if the assertion is too short to contain one.
#[must_use]
pub fn sign_count(raw: &[u8]) -> Option<u32> {
    let field = raw.get(COUNTER_OFFSET..MIN_ASSERTION_LEN)?;
    let bytes: [u8; COUNTER_LEN] = field.try_into().ok()?;
    Some(u32::from_be_bytes(bytes))
}
