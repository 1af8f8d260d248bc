//! Containers for key material that must not outlive a generation call.
//!
//! [`SecretBuffer`] holds normalized assertions, [`SecretBytes`] holds derived
//! seeds and authenticator secrets. Contents are wiped on drop, pages are
//! pinned with `mlock` when the OS allows it, and formatting never shows a byte.

use std::fmt;

use secrecy::{ExposeSecret, SecretSlice};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::CryptoError;

const MASK: &str = "***";

// ---------------------------------------------------------------------------
// Page pinning
// ---------------------------------------------------------------------------

/// Best-effort `mlock` of a byte range, released on drop.
struct Pin {
    addr: *const u8,
    len: usize,
    held: bool,
}

// SAFETY: `addr` is never dereferenced; it is only passed back to munlock.
unsafe impl Send for Pin {}
unsafe impl Sync for Pin {}

impl Pin {
    fn over(bytes: &[u8]) -> Self {
        Self {
            addr: bytes.as_ptr(),
            len: bytes.len(),
            held: sys::lock(bytes.as_ptr(), bytes.len()),
        }
    }

    const fn none() -> Self {
        Self {
            addr: std::ptr::null(),
            len: 0,
            held: false,
        }
    }
}

impl Drop for Pin {
    fn drop(&mut self) {
        if self.held {
            sys::unlock(self.addr, self.len);
        }
    }
}

// ---------------------------------------------------------------------------
// SecretBuffer
// ---------------------------------------------------------------------------

/// Heap secret of any length.
pub struct SecretBuffer {
    bytes: SecretSlice<u8>,
    pin: Pin,
}

impl SecretBuffer {
    /// Take ownership of `data`; it is wiped when the buffer drops.
    #[must_use]
    pub fn from_vec(data: Vec<u8>) -> Self {
        let bytes: SecretSlice<u8> = data.into();
        let pin = Pin::over(bytes.expose_secret());
        Self { bytes, pin }
    }

    /// Copy `data` into a fresh buffer. Wiping `data` is the caller's job.
    #[must_use]
    pub fn copy_from(data: &[u8]) -> Self {
        Self::from_vec(data.to_vec())
    }

    #[must_use]
    pub fn expose(&self) -> &[u8] {
        self.bytes.expose_secret()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.expose().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expose().is_empty()
    }

    /// Whether `mlock` succeeded for this allocation.
    #[must_use]
    pub const fn is_pinned(&self) -> bool {
        self.pin.held
    }
}

impl fmt::Debug for SecretBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretBuffer[{}]({MASK})", self.len())
    }
}

// ---------------------------------------------------------------------------
// SecretBytes<N>
// ---------------------------------------------------------------------------

/// Inline secret of fixed size.
///
/// The pin is taken at the construction address; after a move it refers to
/// stale memory and unlocking it is a no-op. Wiping does not depend on it.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SecretBytes<const N: usize> {
    bytes: [u8; N],
    #[zeroize(skip)]
    pin: Pin,
}

impl<const N: usize> SecretBytes<N> {
    #[must_use]
    pub fn new(data: [u8; N]) -> Self {
        let mut secret = Self {
            bytes: data,
            pin: Pin::none(),
        };
        secret.pin = Pin::over(&secret.bytes);
        secret
    }

    #[must_use]
    pub const fn expose(&self) -> &[u8; N] {
        &self.bytes
    }
}

impl<const N: usize> From<[u8; N]> for SecretBytes<N> {
    fn from(data: [u8; N]) -> Self {
        Self::new(data)
    }
}

impl<const N: usize> fmt::Debug for SecretBytes<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretBytes<{N}>({MASK})")
    }
}

// ---------------------------------------------------------------------------
// Process hardening
// ---------------------------------------------------------------------------

/// Set `RLIMIT_CORE` to zero so a crash cannot dump a seed to disk.
///
/// Does nothing on non-Unix targets.
///
/// # Errors
///
/// Returns [`CryptoError::SecureMemory`] if the limit cannot be set.
pub fn disable_core_dumps() -> Result<(), CryptoError> {
    if sys::zero_core_limit() {
        Ok(())
    } else {
        Err(CryptoError::SecureMemory(
            "setrlimit(RLIMIT_CORE, 0) failed".into(),
        ))
    }
}

mod sys {
    #[cfg(unix)]
    pub(super) fn lock(addr: *const u8, len: usize) -> bool {
        // SAFETY: mlock only inspects the range; a bad range returns an error.
        len == 0 || unsafe { libc::mlock(addr.cast(), len) == 0 }
    }

    #[cfg(unix)]
    pub(super) fn unlock(addr: *const u8, len: usize) {
        if len > 0 {
            // SAFETY: as for mlock; the result is ignored.
            unsafe {
                libc::munlock(addr.cast(), len);
            }
        }
    }

    #[cfg(unix)]
    pub(super) fn zero_core_limit() -> bool {
        let limit = libc::rlimit {
            rlim_cur: 0,
            rlim_max: 0,
        };
        // SAFETY: plain POSIX call on a stack value.
        unsafe { libc::setrlimit(libc::RLIMIT_CORE, &raw const limit) == 0 }
    }

    #[cfg(not(unix))]
    pub(super) const fn lock(_addr: *const u8, _len: usize) -> bool {
        false
    }

    #[cfg(not(unix))]
    pub(super) const fn unlock(_addr: *const u8, _len: usize) {}

    #[cfg(not(unix))]
    pub(super) const fn zero_core_limit() -> bool {
        true
    }
}
