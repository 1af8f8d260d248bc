//! Codename dictionary loading and validation.
//!
//! The default dictionary is embedded at compile time via `include_str!`.
//! External dictionaries use the same line format:
//!
//! ```text
//! # comment
//! 山<TAB>shan<TAB>1
//! ```
//!
//! Every entry is validated once at load. A malformed file fails fast instead
//! of silently shifting indices.

use crate::error::CryptoError;

/// Lowest accepted tone number.
pub const MIN_TONE: u8 = 1;

/// Highest accepted tone number (5 = neutral tone).
pub const MAX_TONE: u8 = 5;

const EMBEDDED_RAW: &str = include_str!("wordlists/hanzi.tsv");

/// One dictionary entry: a single character with its reading.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryEntry {
    pub character: char,
    pub transliteration: String,
    pub tone: u8,
}

impl DictionaryEntry {
    #[must_use]
    pub fn new(character: char, transliteration: impl Into<String>, tone: u8) -> Self {
        Self {
            character,
            transliteration: transliteration.into(),
            tone,
        }
    }

    /// Transliteration followed by its tone digit, e.g. `"shan1"`.
    #[must_use]
    pub fn annotation(&self) -> String {
        format!("{}{}", self.transliteration, self.tone)
    }

    fn validate(&self, index: usize) -> Result<(), CryptoError> {
        if self.transliteration.is_empty()
            || !self
                .transliteration
                .bytes()
                .all(|b| b.is_ascii_lowercase())
        {
            return Err(CryptoError::InvalidDictionary(format!(
                "entry {index}: transliteration {:?} must be non-empty lowercase ASCII",
                self.transliteration
            )));
        }
        if !(MIN_TONE..=MAX_TONE).contains(&self.tone) {
            return Err(CryptoError::InvalidDictionary(format!(
                "entry {index}: tone {} outside {MIN_TONE}..={MAX_TONE}",
                self.tone
            )));
        }
        Ok(())
    }
}

/// Read-only, validated, ordered dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dictionary {
    entries: Box<[DictionaryEntry]>,
}

impl Dictionary {
    /// Validate and wrap an ordered list of entries.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidDictionary`] if the list is empty or any
    /// entry has a bad transliteration or tone.
    pub fn new(entries: Vec<DictionaryEntry>) -> Result<Self, CryptoError> {
        if entries.is_empty() {
            return Err(CryptoError::InvalidDictionary(
                "dictionary has no entries".into(),
            ));
        }
        if u32::try_from(entries.len()).is_err() {
            return Err(CryptoError::InvalidDictionary(
                "dictionary exceeds u32 index range".into(),
            ));
        }
        for (i, entry) in entries.iter().enumerate() {
            entry.validate(i)?;
        }
        Ok(Self {
            entries: entries.into_boxed_slice(),
        })
    }

    /// Parse the tab-separated line format.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidDictionary`] naming the first bad line.
    pub fn parse(text: &str) -> Result<Self, CryptoError> {
        let mut entries = Vec::new();
        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            entries.push(parse_line(line).map_err(|reason| {
                CryptoError::InvalidDictionary(format!(
                    "line {}: {reason}",
                    line_no.saturating_add(1)
                ))
            })?);
        }
        Self::new(entries)
    }

    /// The dictionary shipped with the crate.
    ///
    /// # Errors
    ///
    /// Only if the embedded file itself is malformed.
    pub fn embedded() -> Result<Self, CryptoError> {
        Self::parse(EMBEDDED_RAW)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false` for a constructed dictionary; kept for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&DictionaryEntry> {
        self.entries.get(index)
    }

    #[must_use]
    pub fn entries(&self) -> &[DictionaryEntry] {
        &self.entries
    }
}

fn parse_line(line: &str) -> Result<DictionaryEntry, String> {
    let mut fields = line.split('\t');
    let (Some(character), Some(transliteration), Some(tone), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err("expected exactly three tab-separated fields".into());
    };

    let mut chars = character.chars();
    let (Some(ch), None) = (chars.next(), chars.next()) else {
        return Err(format!("character field {character:?} must be one character"));
    };

    let tone: u8 = tone
        .trim()
        .parse()
        .map_err(|_| format!("tone {tone:?} is not a number"))?;

    Ok(DictionaryEntry::new(ch, transliteration.trim(), tone))
}
