//! Persisted accessibility preferences.
//!
//! Stored as `{"highContrast": bool, "largeText": bool}` in
//! `pdfSplitterAccessibility.json` inside the config directory. A missing
//! or unreadable file means defaults; loading never fails.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Storage key, used as the file stem.
pub const PREFERENCES_KEY: &str = "pdfSplitterAccessibility";

/// Overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "PDFSPLITTER_CONFIG_DIR";

/// Display preferences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub high_contrast: bool,
    pub large_text: bool,
}

/// Reads and writes [`Preferences`] at a fixed path.
#[derive(Debug, Clone)]
pub struct PreferencesStore {
    path: PathBuf,
}

impl PreferencesStore {
    /// Store inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{PREFERENCES_KEY}.json")),
        }
    }

    /// Store in `$PDFSPLITTER_CONFIG_DIR`, or `<config dir>/pdfsplitter`.
    ///
    /// Returns `None` when neither is available.
    pub fn from_env() -> Option<Self> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|dir| !dir.is_empty()) {
            return Some(Self::in_dir(PathBuf::from(dir)));
        }
        dirs::config_dir().map(|base| Self::in_dir(base.join("pdfsplitter")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load preferences, falling back to defaults on any problem.
    pub fn load(&self) -> Preferences {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Preferences::default(),
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "cannot read preferences"
                );
                return Preferences::default();
            }
        };
        serde_json::from_str(&data).unwrap_or_else(|err| {
            tracing::warn!(
                path = %self.path.display(),
                error = %err,
                "invalid preferences, using defaults"
            );
            Preferences::default()
        })
    }

    /// Write preferences, creating the directory if needed.
    pub fn save(&self, prefs: &Preferences) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(prefs).map_err(io::Error::other)?;
        fs::write(&self.path, json)?;
        tracing::debug!(path = %self.path.display(), "saved preferences");
        Ok(())
    }
}
