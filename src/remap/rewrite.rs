//! The three rewrite strategies, one per partition

use crate::keymap::{Chord, KeyStroke, Keybinding, RuleSet};

use super::leader::inject_leader;
use super::RemapError;

/// Replace whole keystrokes through the exact table
///
/// A binding without a rule is dropped; classification guarantees one exists.
pub fn rewrite_exact(bindings: &[&Keybinding], rules: &RuleSet) -> Vec<Keybinding> {
    bindings
        .iter()
        .filter_map(|binding| match rules.exact_for(binding.key) {
            Some(rule) => Some(binding.rebound(rule.to)),
            None => {
                tracing::warn!("No exact rule for {} ({})", binding.key, binding.command);
                None
            }
        })
        .collect()
}

/// Replace the trailing chord of prefixed sequences
///
/// One output per matching rule; bindings matching no rule are dropped.
pub fn rewrite_prefixed(bindings: &[&Keybinding], rules: &RuleSet) -> Vec<Keybinding> {
    let mut result = Vec::new();

    for binding in bindings {
        let Some(trailing) = binding.key.trailing() else {
            tracing::debug!("Dropping {} ({}): no trailing chord", binding.key, binding.command);
            continue;
        };

        let before = result.len();
        for rule in rules.prefixed.iter().filter(|rule| rule.from == trailing) {
            result.push(binding.rebound(KeyStroke::Sequence(binding.key.first(), rule.to)));
        }

        if result.len() == before {
            tracing::debug!("Dropping {} ({}): no prefixed rule", binding.key, binding.command);
        }
    }

    result
}

/// Whether the prefixed table has a rule for this binding's trailing chord
pub fn has_prefixed_rule(binding: &Keybinding, rules: &RuleSet) -> bool {
    binding
        .key
        .trailing()
        .is_some_and(|trailing| rules.prefixed.iter().any(|rule| rule.from == trailing))
}

/// Apply every general rule to every binding
///
/// Each (binding, rule) pair that changes the keystroke yields one binding.
/// When the original first chord already holds a key of the replacement, the
/// rewritten binding is only reachable behind the leader chord.
pub fn rewrite_general(
    bindings: &[&Keybinding],
    rules: &RuleSet,
) -> Result<Vec<Keybinding>, RemapError> {
    let mut result = Vec::new();

    for binding in bindings {
        for rule in &rules.general {
            let candidate = binding.key.replace(Chord::single(rule.from), rule.to);
            if candidate == binding.key {
                continue;
            }

            let rewritten = binding.rebound(candidate);
            if binding.key.first().intersects(rule.to) {
                tracing::debug!(
                    "{} → {} overlaps existing modifiers, adding leader ({})",
                    binding.key,
                    candidate,
                    binding.command
                );
                result.push(inject_leader(&rewritten, rules.leader)?);
            } else {
                tracing::debug!("{} → {} ({})", binding.key, candidate, binding.command);
                result.push(rewritten);
            }
        }
    }

    Ok(result)
}
