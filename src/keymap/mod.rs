//! Keybinding documents and substitution rules
//!
//! This module provides the data side of the remapper:
//! - Keys, chords and keystrokes with set-based equality
//! - Parsing of default keybinding documents (JSON)
//! - Layered substitution rule tables (YAML)
//! - Rendering the final binding list back into a document
//!
//! # Loading
//!
//! ```ignore
//! let bindings = load_keybindings_file(Path::new("default.json"), false)?;
//! let rules = load_rules(None)?;
//! ```

mod binding;
mod config;
mod defaults;
mod export;
mod rules;
mod types;

pub use binding::Keybinding;
pub use config::{load_keybindings_file, parse_keybindings_json, BindingConfig, KeymapError};
pub use defaults::{default_rules, get_default_rules_yaml, load_rules};
pub use export::{render, to_json, to_yaml, OutputFormat};
pub use rules::{
    load_rules_file, parse_rules_yaml, ChordRule, ExactRule, KeyRule, RuleEntry, RuleSet,
    RulesConfig, Substitution,
};
pub use types::{Chord, Key, KeyStroke};
