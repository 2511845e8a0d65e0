//! User configuration
//!
//! Stores defaults for the command line in `~/.config/keyremap/config.yaml`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::keymap::OutputFormat;

/// Configuration read at startup; command-line flags take precedence
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemapConfig {
    /// Output document format
    #[serde(default)]
    pub format: OutputFormat,
    /// Drop bindings with unknown keys instead of failing
    #[serde(default)]
    pub skip_unknown_keys: bool,
    /// Extra rule layer applied after the user rules file
    #[serde(default)]
    pub rules: Option<PathBuf>,
}

impl RemapConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        Self::load_from(&path)
    }

    /// Load config from a specific file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}
