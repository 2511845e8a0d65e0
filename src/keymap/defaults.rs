//! Default substitution rules
//!
//! The rules that ship with the tool. Loaded from the embedded rules.yaml, or
//! falls back to the hardcoded tables below.

use std::path::Path;

use super::config::KeymapError;
use super::rules::{load_rules_file, parse_rules_yaml, RuleSet, Substitution};
use super::types::{Chord, Key, KeyStroke};

/// Default rules YAML embedded at compile time
const DEFAULT_RULES_YAML: &str = include_str!("../../rules.yaml");

/// Project-local rule layer, looked up in the current directory
const LOCAL_RULES_FILE: &str = "rules.yaml";

/// Get the embedded default rules YAML
pub fn get_default_rules_yaml() -> &'static str {
    DEFAULT_RULES_YAML
}

/// Load and merge rule layers
///
/// Loading order (each layer overrides the previous):
/// 1. Embedded default rules (compiled into binary)
/// 2. rules.yaml in current directory (project-local overrides)
/// 3. User rules at ~/.config/keyremap/rules.yaml
/// 4. `explicit`, typically from `--rules`
///
/// Broken optional layers are logged and skipped; a broken explicit layer is an
/// error. The merged set is validated before it is returned.
pub fn load_rules(explicit: Option<&Path>) -> Result<RuleSet, KeymapError> {
    let mut rules = embedded_rules();

    let local = Path::new(LOCAL_RULES_FILE);
    if local.exists() {
        rules = apply_optional_layer(rules, local);
    }

    if let Some(user_path) = crate::config_paths::rules_file() {
        if user_path.exists() {
            rules = apply_optional_layer(rules, &user_path);
        }
    }

    if let Some(path) = explicit {
        rules = apply_layer_file(&rules, path)?;
        tracing::info!("Merged rules from {}", path.display());
    }

    rules.validate()?;
    Ok(rules)
}

fn embedded_rules() -> RuleSet {
    let mut rules = RuleSet::default();
    match parse_rules_yaml(DEFAULT_RULES_YAML).and_then(|layer| rules.apply_layer(layer)) {
        Ok(()) => {
            tracing::info!(
                "Loaded embedded default rules ({} exact, {} prefixed, {} general)",
                rules.exact.len(),
                rules.prefixed.len(),
                rules.general.len()
            );
            rules
        }
        Err(e) => {
            tracing::warn!("Failed to parse embedded rules: {}, using hardcoded defaults", e);
            default_rules()
        }
    }
}

fn apply_optional_layer(rules: RuleSet, path: &Path) -> RuleSet {
    match apply_layer_file(&rules, path) {
        Ok(merged) => {
            tracing::info!("Merged rules from {}", path.display());
            merged
        }
        Err(e) => {
            tracing::warn!("Failed to load rules from {}: {}", path.display(), e);
            rules
        }
    }
}

/// Layers are all-or-nothing: a failing layer leaves `rules` untouched
fn apply_layer_file(rules: &RuleSet, path: &Path) -> Result<RuleSet, KeymapError> {
    let layer = load_rules_file(path)?;
    let mut merged = rules.clone();
    merged.apply_layer(layer)?;
    Ok(merged)
}

/// Hardcoded default rules, identical to the embedded rules.yaml
pub fn default_rules() -> RuleSet {
    use Key::*;

    let leader = chord(&[Ctrl, Oem7]);

    RuleSet {
        leader,
        prefix: chord(&[Ctrl, K]),
        exact: vec![
            Substitution {
                from: KeyStroke::Sequence(chord(&[Alt, Home]), chord(&[Alt, Home])),
                to: KeyStroke::Sequence(leader, chord(&[Alt, A])),
            },
            Substitution {
                from: KeyStroke::Sequence(chord(&[Alt, End]), chord(&[Alt, End])),
                to: KeyStroke::Sequence(leader, chord(&[Alt, D])),
            },
        ],
        prefixed: vec![
            swap(&[Ctrl, Alt, Down], &[Ctrl, Alt, J]),
            swap(&[Ctrl, Down], &[Alt, J]),
            swap(&[Down], &[J]),
            swap(&[Ctrl, PageDown], &[Shift, Alt, J]),
            swap(&[Ctrl, Alt, Up], &[Ctrl, Alt, K]),
            swap(&[Ctrl, Up], &[Alt, K]),
            swap(&[Up], &[K]),
            swap(&[Ctrl, PageUp], &[Shift, Alt, K]),
            swap(&[Left], &[H]),
            swap(&[Right], &[L]),
        ],
        general: vec![
            Substitution { from: Left, to: chord(&[Alt, H]) },
            Substitution { from: Right, to: chord(&[Alt, L]) },
            Substitution { from: Up, to: chord(&[Alt, K]) },
            Substitution { from: Down, to: chord(&[Alt, J]) },
            Substitution { from: PageUp, to: chord(&[Alt, W]) },
            Substitution { from: PageDown, to: chord(&[Alt, S]) },
            Substitution { from: Home, to: chord(&[Alt, A]) },
            Substitution { from: End, to: chord(&[Alt, D]) },
            Substitution { from: Escape, to: chord(&[Ctrl, Oem102]) },
            Substitution { from: Delete, to: chord(&[Shift, Backspace]) },
            Substitution { from: Insert, to: chord(&[Alt, Oem5]) },
            Substitution { from: F1, to: chord(&[Alt, Digit1]) },
            Substitution { from: F2, to: chord(&[Alt, Digit2]) },
            Substitution { from: F3, to: chord(&[Alt, Digit3]) },
            Substitution { from: F4, to: chord(&[Alt, Digit4]) },
            Substitution { from: F5, to: chord(&[Alt, Digit5]) },
            Substitution { from: F6, to: chord(&[Alt, Digit6]) },
            Substitution { from: F7, to: chord(&[Alt, Digit7]) },
            Substitution { from: F8, to: chord(&[Alt, Digit8]) },
            Substitution { from: F9, to: chord(&[Alt, Digit9]) },
            Substitution { from: F10, to: chord(&[Alt, Digit0]) },
            Substitution { from: F11, to: chord(&[Alt, OemMinus]) },
            Substitution { from: F12, to: chord(&[Alt, Oem7]) },
        ],
    }
}

fn chord(keys: &[Key]) -> Chord {
    Chord::from_keys(keys.iter().copied())
}

fn swap(from: &[Key], to: &[Key]) -> Substitution<Chord, Chord> {
    Substitution {
        from: chord(from),
        to: chord(to),
    }
}
