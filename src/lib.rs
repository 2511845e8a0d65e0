//! keyremap - derive a remapped keybinding table from a default one
//!
//! This crate provides the keybinding types, the layered substitution rules
//! and the remap engine that rewrites a default table while keeping commands
//! reachable when a rewrite lands on a keystroke that is still in use.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod keymap;
pub mod remap;
pub mod tracing;

// Re-export commonly used types
pub use config::RemapConfig;
pub use keymap::{Keybinding, RuleSet};
pub use remap::{remap, RemapError, RemapOutput};
