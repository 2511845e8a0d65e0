//! Keybinding struct representing a mapping from a keystroke to a command

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::types::{Chord, KeyStroke};

/// A single keybinding as found in an editor's keybinding document
///
/// `when` and `args` are carried verbatim; absence is preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keybinding {
    /// One chord, or a prefix chord plus a trailing chord
    pub key: KeyStroke,
    /// Command identifier, never interpreted
    pub command: String,
    /// Context predicate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<String>,
    /// Command arguments, insertion order preserved; an explicit `null` is kept
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub args: Option<Value>,
}

/// A field that is present deserializes to `Some`, even when it is `null`
pub(crate) fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl Keybinding {
    /// Create a single-chord binding
    pub fn new(chord: Chord, command: impl Into<String>) -> Self {
        Self::with_stroke(KeyStroke::Single(chord), command)
    }

    /// Create a two-chord binding
    pub fn sequence(first: Chord, second: Chord, command: impl Into<String>) -> Self {
        Self::with_stroke(KeyStroke::Sequence(first, second), command)
    }

    pub fn with_stroke(key: KeyStroke, command: impl Into<String>) -> Self {
        Self {
            key,
            command: command.into(),
            when: None,
            args: None,
        }
    }

    /// Add a context predicate (builder pattern)
    pub fn when(mut self, when: impl Into<String>) -> Self {
        self.when = Some(when.into());
        self
    }

    /// Attach command arguments (builder pattern)
    pub fn args(mut self, args: Value) -> Self {
        self.args = Some(args);
        self
    }

    /// Same command, predicate and arguments under a different keystroke
    pub fn rebound(&self, key: KeyStroke) -> Self {
        Self {
            key,
            ..self.clone()
        }
    }

    /// Check if this is a two-chord binding
    pub fn is_sequence(&self) -> bool {
        self.key.is_sequence()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::types::Key;
    use serde_json::json;

    #[test]
    fn test_single_binding() {
        let binding = Keybinding::new(Chord::single(Key::Down), "cursorDown");
        assert!(!binding.is_sequence());
        assert_eq!(binding.key.len(), 1);
        assert!(binding.when.is_none());
        assert!(binding.args.is_none());
    }

    #[test]
    fn test_sequence_binding() {
        let ctrl_k = Chord::from_keys([Key::Ctrl, Key::K]);
        let ctrl_c = Chord::from_keys([Key::Ctrl, Key::C]);
        let binding = Keybinding::sequence(ctrl_k, ctrl_c, "editor.action.addCommentLine");
        assert!(binding.is_sequence());
        assert_eq!(binding.key.first(), ctrl_k);
    }

    #[test]
    fn test_rebound_keeps_when_and_args() {
        let binding = Keybinding::new(Chord::single(Key::Down), "cursorDown")
            .when("textInputFocus")
            .args(json!({ "to": "down", "by": "line" }));
        let moved = binding.rebound(Chord::from_keys([Key::Alt, Key::J]).into());

        assert_eq!(moved.command, "cursorDown");
        assert_eq!(moved.when, binding.when);
        assert_eq!(moved.args, binding.args);
        assert_ne!(moved.key, binding.key);
    }

    #[test]
    fn test_serialize_omits_absent_fields() {
        let binding = Keybinding::new(Chord::single(Key::F1), "workbench.action.showCommands");
        let json = serde_json::to_value(&binding).unwrap();
        assert_eq!(
            json,
            json!({ "key": "f1", "command": "workbench.action.showCommands" })
        );
    }

    #[test]
    fn test_null_args_survive_round_trip() {
        let binding: Keybinding =
            serde_json::from_value(json!({ "key": "f1", "command": "x", "args": null })).unwrap();
        assert_eq!(binding.args, Some(Value::Null));

        let back = serde_json::to_value(&binding).unwrap();
        assert_eq!(back, json!({ "key": "f1", "command": "x", "args": null }));

        let absent: Keybinding =
            serde_json::from_value(json!({ "key": "f1", "command": "x" })).unwrap();
        assert!(absent.args.is_none());
    }
}
