//! Fixed-alphabet password stretching.
//!
//! Maps seed bytes onto a 94-character printable alphabet, one byte per
//! output character (`byte mod 94`). When the seed runs out, it is extended
//! by hash-chain refill:
//!
//! ```text
//! block_k = SHA-256(seed ‖ [k])     k = 0, 1, 2, ...  (one byte, refill count)
//! ```
//!
//! Every block hashes the *original* seed, never the previous block. With
//! the 64-byte derived seed and the default length of 20 no refill happens;
//! shorter seeds or longer outputs take the refill path.
//!
//! Output is reproducible, not policy-shaped: there is no guarantee that
//! every character class appears.

use ring::digest;
use zeroize::Zeroize;

use crate::error::CryptoError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Password length used for generated artifacts.
pub const DEFAULT_PASSWORD_LENGTH: usize = 20;

/// Maximum allowed stretch length.
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Ordered output alphabet. The order is part of the output format: changing
/// it changes every password ever generated.
pub const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
abcdefghijklmnopqrstuvwxyz\
0123456789\
!@#$%^&*()_+=-`~[]\\{}|;':\",./<>?";

/// Number of characters in [`ALPHABET`].
pub const ALPHABET_LEN: usize = 94;

const _: () = assert!(ALPHABET.len() == ALPHABET_LEN);

/// Refill block size (SHA-256 output).
const REFILL_BLOCK_LEN: usize = 32;

// ---------------------------------------------------------------------------
// Byte source
// ---------------------------------------------------------------------------

/// Yields the seed bytes, then refill blocks, in order.
struct ByteStream<'a> {
    seed: &'a [u8],
    block: [u8; REFILL_BLOCK_LEN],
    pos: usize,
    in_refill: bool,
    refills: u8,
}

impl<'a> ByteStream<'a> {
    const fn new(seed: &'a [u8]) -> Self {
        Self {
            seed,
            block: [0u8; REFILL_BLOCK_LEN],
            pos: 0,
            in_refill: false,
            refills: 0,
        }
    }

    fn refill(&mut self) -> Result<(), CryptoError> {
        if self.in_refill && self.refills == u8::MAX {
            return Err(CryptoError::Formatting("refill counter exhausted".into()));
        }
        let counter = if self.in_refill {
            self.refills.wrapping_add(1)
        } else {
            0
        };

        let mut ctx = digest::Context::new(&digest::SHA256);
        ctx.update(self.seed);
        ctx.update(&[counter]);
        self.block.copy_from_slice(ctx.finish().as_ref());

        self.refills = counter;
        self.in_refill = true;
        self.pos = 0;
        Ok(())
    }

    fn next_byte(&mut self) -> Result<u8, CryptoError> {
        let current: &[u8] = if self.in_refill { &self.block } else { self.seed };
        if let Some(&b) = current.get(self.pos) {
            self.pos = self.pos.wrapping_add(1);
            return Ok(b);
        }
        self.refill()?;
        let b = self.block[0];
        self.pos = 1;
        Ok(b)
    }
}

impl Drop for ByteStream<'_> {
    fn drop(&mut self) {
        self.block.zeroize();
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Stretch `seed` into a password of exactly `length` characters from
/// [`ALPHABET`].
///
/// # Errors
///
/// Returns [`CryptoError::Formatting`] if `seed` is empty or `length` is
/// outside `1..=`[`MAX_PASSWORD_LENGTH`].
pub fn stretch_password(seed: &[u8], length: usize) -> Result<String, CryptoError> {
    if seed.is_empty() {
        return Err(CryptoError::Formatting("seed is empty".into()));
    }
    if !(1..=MAX_PASSWORD_LENGTH).contains(&length) {
        return Err(CryptoError::Formatting(format!(
            "length must be between 1 and {MAX_PASSWORD_LENGTH}, got {length}"
        )));
    }

    let mut stream = ByteStream::new(seed);
    let mut out = String::with_capacity(length);
    for _ in 0..length {
        let b = stream.next_byte()?;
        let idx = usize::from(b) % ALPHABET_LEN;
        out.push(char::from(ALPHABET[idx]));
    }
    Ok(out)
}

/// Stretch with the default length of [`DEFAULT_PASSWORD_LENGTH`].
///
/// # Errors
///
/// See [`stretch_password`].
pub fn generate_password(seed: &[u8]) -> Result<String, CryptoError> {
    stretch_password(seed, DEFAULT_PASSWORD_LENGTH)
}
