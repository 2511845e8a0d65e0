//! Rendering of binding lists back into keybinding documents

use serde::{Deserialize, Serialize};

use super::binding::Keybinding;
use super::config::KeymapError;

/// Output document format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON array, ready to paste into keybindings.json
    #[default]
    Json,
    /// YAML sequence
    Yaml,
}

/// Render bindings in order; keys use `+` within a chord and a space between chords
pub fn render(bindings: &[Keybinding], format: OutputFormat) -> Result<String, KeymapError> {
    match format {
        OutputFormat::Json => to_json(bindings),
        OutputFormat::Yaml => to_yaml(bindings),
    }
}

pub fn to_json(bindings: &[Keybinding]) -> Result<String, KeymapError> {
    serde_json::to_string_pretty(bindings).map_err(|e| KeymapError::SerializeError(e.to_string()))
}

pub fn to_yaml(bindings: &[Keybinding]) -> Result<String, KeymapError> {
    serde_yaml::to_string(bindings).map_err(|e| KeymapError::SerializeError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::config::parse_keybindings_json;
    use crate::keymap::types::{Chord, Key};
    use serde_json::{json, Value};

    #[test]
    fn test_json_field_layout() {
        let bindings = vec![
            Keybinding::sequence(
                Chord::from_keys([Key::Ctrl, Key::Oem7]),
                Chord::from_keys([Key::J, Key::Alt]),
                "cursorDown",
            )
            .when("textInputFocus"),
            Keybinding::new(Chord::single(Key::F1), "showCommands").args(json!({ "a": 1 })),
        ];

        let value: Value = serde_json::from_str(&to_json(&bindings).unwrap()).unwrap();
        assert_eq!(
            value,
            json!([
                { "key": "ctrl+oem_7 alt+j", "command": "cursorDown", "when": "textInputFocus" },
                { "key": "f1", "command": "showCommands", "args": { "a": 1 } }
            ])
        );
    }

    #[test]
    fn test_json_uses_two_space_indent() {
        let bindings = vec![Keybinding::new(Chord::single(Key::Tab), "tab")];
        let json = to_json(&bindings).unwrap();
        assert!(json.contains("\n  {\n    \"key\": \"tab\""));
    }

    #[test]
    fn test_rendered_json_parses_back() {
        let bindings = vec![
            Keybinding::new(Chord::from_keys([Key::Shift, Key::Backspace]), "deleteRight")
                .when("textInputFocus && !editorReadonly"),
            Keybinding::sequence(
                Chord::from_keys([Key::Ctrl, Key::K]),
                Chord::from_keys([Key::Shift, Key::Alt, Key::J]),
                "editor.action.moveLinesDown",
            ),
        ];

        let reparsed = parse_keybindings_json(&to_json(&bindings).unwrap(), false).unwrap();
        assert_eq!(reparsed, bindings);
    }

    #[test]
    fn test_yaml_output() {
        let bindings = vec![Keybinding::new(Chord::from_keys([Key::Alt, Key::H]), "cursorLeft")];
        let yaml = render(&bindings, OutputFormat::Yaml).unwrap();
        assert!(yaml.contains("key: alt+h"));
        assert!(yaml.contains("command: cursorLeft"));
        assert!(!yaml.contains("when"));
    }
}
