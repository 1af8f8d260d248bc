//! Engine configuration — plain JSON, no secrets.
//!
//! Read once at startup from `{data_dir}/config.json`. A missing or corrupt
//! file yields defaults so a fresh install works without setup.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tessera_crypto_core::{AssertionPolicy, Dictionary};

use crate::error::GenerationError;
use crate::request::FormattingStrategy;

/// What to do when `generate` is called while another call is in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BusyPolicy {
    /// Wait for the in-flight call to finish.
    #[default]
    Queue,
    /// Fail immediately with [`GenerationError::Busy`].
    Reject,
}

/// Engine settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    /// Overlapping-call behaviour.
    #[serde(default)]
    pub busy_policy: BusyPolicy,

    /// Structural checks applied to assertions before normalization.
    #[serde(default)]
    pub assertion_policy: AssertionPolicy,

    /// External codename dictionary; the embedded one is used when unset.
    #[serde(default)]
    pub dictionary_path: Option<PathBuf>,

    /// Strategy the caller uses when none is specified.
    #[serde(default)]
    pub default_strategy: FormattingStrategy,
}

const CONFIG_FILE: &str = "config.json";

impl EngineConfig {
    /// Load `{data_dir}/config.json`, falling back to defaults when the file
    /// is missing or unparsable.
    #[must_use]
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join(CONFIG_FILE);
        fs::read_to_string(&path).map_or_else(
            |_| Self::default(),
            |contents| {
                serde_json::from_str(&contents).unwrap_or_else(|e| {
                    tracing::warn!(path = %path.display(), "ignoring corrupt config: {e}");
                    Self::default()
                })
            },
        )
    }

    /// Persist to `{data_dir}/config.json` via write-to-tmp-then-rename.
    ///
    /// # Errors
    ///
    /// Returns an `io::Error` if the directory does not exist or the
    /// file system rejects the write/rename.
    pub fn save(&self, data_dir: &Path) -> std::io::Result<()> {
        let path = data_dir.join(CONFIG_FILE);
        let tmp = data_dir.join(".config.json.tmp");

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        fs::write(&tmp, &json)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp, fs::Permissions::from_mode(0o600))?;
        }

        fs::rename(&tmp, &path)?;

        Ok(())
    }

    /// Load and validate the configured dictionary.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Configuration`] if the external file cannot
    /// be read or fails validation.
    pub fn load_dictionary(&self) -> Result<Dictionary, GenerationError> {
        match &self.dictionary_path {
            Some(path) => {
                let text = fs::read_to_string(path).map_err(|e| {
                    GenerationError::Configuration(format!(
                        "cannot read dictionary {}: {e}",
                        path.display()
                    ))
                })?;
                Ok(Dictionary::parse(&text)?)
            }
            None => Ok(Dictionary::embedded()?),
        }
    }
}
