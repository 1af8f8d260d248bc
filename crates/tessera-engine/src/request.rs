//! Request and result types exchanged with the caller.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use tessera_crypto_core::canonical_label;

use crate::error::GenerationError;

// ---------------------------------------------------------------------------
// Formatting strategy
// ---------------------------------------------------------------------------

/// Which formatter turns the seed into the artifact value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormattingStrategy {
    /// 20 characters over the 94-character printable alphabet.
    #[default]
    Password,
    /// Three dictionary characters plus their readings.
    Codename,
}

impl FormattingStrategy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Password => "password",
            Self::Codename => "codename",
        }
    }
}

impl fmt::Display for FormattingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FormattingStrategy {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "password" => Ok(Self::Password),
            "codename" => Ok(Self::Codename),
            other => Err(GenerationError::InvalidRequest(format!(
                "unknown strategy {other:?} (expected \"password\" or \"codename\")"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Service request
// ---------------------------------------------------------------------------

/// A validated generation request.
///
/// Construction trims the input, rejects blank strings and version 0, and
/// resolves the canonical label up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRequest {
    service_input: String,
    label: String,
    version: u32,
}

impl ServiceRequest {
    /// # Errors
    ///
    /// Returns [`GenerationError::InvalidRequest`] if `service_input` is blank
    /// or has no usable label, or if `version` is 0.
    pub fn new(service_input: &str, version: u32) -> Result<Self, GenerationError> {
        let trimmed = service_input.trim();
        if trimmed.is_empty() {
            return Err(GenerationError::InvalidRequest(
                "service input is empty".into(),
            ));
        }
        if version == 0 {
            return Err(GenerationError::InvalidRequest(
                "version must be at least 1".into(),
            ));
        }
        let label = canonical_label(trimmed)
            .map_err(|e| GenerationError::InvalidRequest(e.to_string()))?
            .to_owned();
        Ok(Self {
            service_input: trimmed.to_owned(),
            label,
            version,
        })
    }

    /// The trimmed input as typed.
    #[must_use]
    pub fn service_input(&self) -> &str {
        &self.service_input
    }

    /// Canonical service label (derivation salt).
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }
}

// ---------------------------------------------------------------------------
// Generated artifact
// ---------------------------------------------------------------------------

/// Result of one successful generation.
///
/// `Debug` masks `value` and the value is zeroized on drop. Persisting the
/// artifact is the caller's decision.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedArtifact {
    /// Canonical service label the value was derived for.
    pub service_name: String,
    pub version: u32,
    /// The password or codename.
    pub value: String,
    /// Pronunciation guide; codenames only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
    pub strategy: FormattingStrategy,
}

impl fmt::Debug for GeneratedArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratedArtifact")
            .field("service_name", &self.service_name)
            .field("version", &self.version)
            .field("value", &"***")
            .field("annotation", &self.annotation.as_ref().map(|_| "***"))
            .field("strategy", &self.strategy)
            .finish()
    }
}

impl Drop for GeneratedArtifact {
    fn drop(&mut self) {
        self.value.zeroize();
        if let Some(annotation) = self.annotation.as_mut() {
            annotation.zeroize();
        }
    }
}
