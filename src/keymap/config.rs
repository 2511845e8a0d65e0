//! Parsing of default keybinding documents
//!
//! Reads the JSON table an editor exports (`[{ key, command, when?, args? }]`)
//! into Keybinding structs.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::binding::{present_value, Keybinding};
use super::types::KeyStroke;

/// A single binding entry as written in the document
#[derive(Debug, Deserialize)]
pub struct BindingConfig {
    pub key: String,
    pub command: String,
    #[serde(default)]
    pub when: Option<String>,
    #[serde(default, deserialize_with = "present_value")]
    pub args: Option<Value>,
}

impl BindingConfig {
    fn into_binding(self) -> Result<Keybinding, KeymapError> {
        let key: KeyStroke = self.key.parse()?;
        Ok(Keybinding {
            key,
            command: self.command,
            when: self.when,
            args: self.args,
        })
    }
}

/// Load keybindings from a JSON file
pub fn load_keybindings_file(
    path: &Path,
    skip_unknown_keys: bool,
) -> Result<Vec<Keybinding>, KeymapError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| KeymapError::IoError(format!("{}: {}", path.display(), e)))?;

    parse_keybindings_json(&content, skip_unknown_keys)
}

/// Parse keybindings from a JSON string
///
/// Full-line `//` comments are ignored. With `skip_unknown_keys`, bindings
/// whose key string cannot be parsed are dropped with a warning instead of
/// failing the whole document.
pub fn parse_keybindings_json(
    json: &str,
    skip_unknown_keys: bool,
) -> Result<Vec<Keybinding>, KeymapError> {
    let entries: Vec<BindingConfig> = serde_json::from_str(&strip_line_comments(json))
        .map_err(|e| KeymapError::ParseError(e.to_string()))?;

    let mut bindings = Vec::with_capacity(entries.len());
    for entry in entries {
        let command = entry.command.clone();
        match entry.into_binding() {
            Ok(binding) => bindings.push(binding),
            Err(KeymapError::InvalidKey(reason)) if skip_unknown_keys => {
                tracing::warn!("Skipping binding for {}: {}", command, reason);
            }
            Err(e) => return Err(e),
        }
    }

    Ok(bindings)
}

fn strip_line_comments(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim_start().starts_with("//"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Errors that can occur when loading keymaps and rule sets
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeymapError {
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Invalid key: {0}")]
    InvalidKey(String),
    #[error("Invalid rules: {0}")]
    InvalidRules(String),
    #[error("Serialize error: {0}")]
    SerializeError(String),
}
