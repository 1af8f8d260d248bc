//! Dictionary-index codename selection.
//!
//! The first 12 seed bytes are read as three big-endian `u32`s; each picks
//! a dictionary entry by `value mod M`. The selected characters form the
//! codename and their readings form the annotation:
//!
//! ```text
//! seed[0..4]  ──► idx0 ─┐
//! seed[4..8]  ──► idx1 ─┼─► "山龙雨"  +  "shan1 long2 yu3"
//! seed[8..12] ──► idx2 ─┘
//! ```
//!
//! Seed bytes 12.. are not read.

pub mod dictionary;

use crate::error::CryptoError;

pub use dictionary::{Dictionary, DictionaryEntry};

/// Characters per codename.
pub const CODENAME_CHARS: usize = 3;

/// Seed bytes consumed per character.
const BYTES_PER_INDEX: usize = 4;

/// Seed bytes consumed in total.
pub const CODENAME_SEED_BYTES: usize = 12;

/// A selected codename with its pronunciation guide.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Codename {
    /// Concatenated characters, e.g. `"山龙雨"`.
    pub value: String,
    /// Space-separated readings with tone digits, e.g. `"shan1 long2 yu3"`.
    pub annotation: String,
}

/// Dictionary indices selected by `seed` for a dictionary of `dict_len` entries.
///
/// # Errors
///
/// Returns [`CryptoError::Formatting`] if `seed` holds fewer than
/// [`CODENAME_SEED_BYTES`] bytes or `dict_len` is zero.
pub fn codename_indices(
    seed: &[u8],
    dict_len: usize,
) -> Result<[usize; CODENAME_CHARS], CryptoError> {
    let head = seed.get(..CODENAME_SEED_BYTES).ok_or_else(|| {
        CryptoError::Formatting(format!(
            "seed too short for codename: {} bytes (need {CODENAME_SEED_BYTES})",
            seed.len()
        ))
    })?;
    let modulus = u32::try_from(dict_len)
        .ok()
        .filter(|&m| m > 0)
        .ok_or_else(|| CryptoError::Formatting(format!("unusable dictionary size {dict_len}")))?;

    let mut indices = [0usize; CODENAME_CHARS];
    for (slot, chunk) in indices.iter_mut().zip(head.chunks_exact(BYTES_PER_INDEX)) {
        let mut word = [0u8; BYTES_PER_INDEX];
        word.copy_from_slice(chunk);
        let value = u32::from_be_bytes(word);
        let idx = value.checked_rem(modulus).unwrap_or_default();
        *slot = usize::try_from(idx).unwrap_or_default();
    }
    Ok(indices)
}

/// Select a codename from `dictionary` using the head of `seed`.
///
/// # Errors
///
/// See [`codename_indices`].
pub fn select_codename(seed: &[u8], dictionary: &Dictionary) -> Result<Codename, CryptoError> {
    let indices = codename_indices(seed, dictionary.len())?;

    let mut value = String::new();
    let mut readings = Vec::with_capacity(CODENAME_CHARS);
    for idx in indices {
        let entry = dictionary.get(idx).ok_or_else(|| {
            CryptoError::Formatting(format!("dictionary index {idx} out of range"))
        })?;
        value.push(entry.character);
        readings.push(entry.annotation());
    }

    Ok(Codename {
        value,
        annotation: readings.join(" "),
    })
}
