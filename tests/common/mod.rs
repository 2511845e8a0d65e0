//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use keyremap::keymap::{parse_keybindings_json, KeyStroke, Keybinding};

/// Sample default table shipped with the repository
pub const SAMPLE_BINDINGS_JSON: &str = include_str!("../../samples/default_keybindings.json");

/// Parse the sample default table
pub fn sample_bindings() -> Vec<Keybinding> {
    parse_keybindings_json(SAMPLE_BINDINGS_JSON, false).expect("sample table should parse")
}

/// Create a binding from a key string like "ctrl+k down"
pub fn binding(key: &str, command: &str) -> Keybinding {
    Keybinding::with_stroke(stroke(key), command)
}

pub fn stroke(key: &str) -> KeyStroke {
    key.parse().expect("valid keystroke")
}

/// Find the first binding for a command
pub fn find<'a>(bindings: &'a [Keybinding], command: &str) -> Option<&'a Keybinding> {
    bindings.iter().find(|b| b.command == command)
}

/// All keystrokes bound to a command, in order
pub fn keys_for(bindings: &[Keybinding], command: &str) -> Vec<KeyStroke> {
    bindings
        .iter()
        .filter(|b| b.command == command)
        .map(|b| b.key)
        .collect()
}
