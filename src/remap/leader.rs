//! Leader injection and collision backfill
//!
//! A rewritten binding may land on a keystroke that an untouched binding still
//! uses. Backfill keeps both reachable by aliasing the rewritten command behind
//! the leader chord.

use std::collections::HashMap;

use crate::keymap::{Chord, KeyStroke, Keybinding};

use super::RemapError;

/// Prefix a single-chord binding with the leader chord
///
/// Two-chord bindings cannot take a third chord; that is a rule-table bug and
/// is reported as [`RemapError::LeaderOnSequence`].
pub fn inject_leader(binding: &Keybinding, leader: Chord) -> Result<Keybinding, RemapError> {
    match binding.key.with_leader(leader) {
        Some(key) => Ok(binding.rebound(key)),
        None => Err(RemapError::LeaderOnSequence {
            command: binding.command.clone(),
            key: binding.key,
        }),
    }
}

/// Leader aliases for rewritten bindings that collide with original keystrokes
///
/// For every binding in `original` (in order), each distinct binding of
/// `rewritten` that now sits on the same keystroke gets one leader alias.
pub fn backfill(
    original: &[&Keybinding],
    rewritten: &[Keybinding],
    leader: Chord,
) -> Result<Vec<Keybinding>, RemapError> {
    let mut by_key: HashMap<KeyStroke, Vec<&Keybinding>> = HashMap::new();
    for binding in rewritten {
        let occupants = by_key.entry(binding.key).or_default();
        if !occupants.contains(&binding) {
            occupants.push(binding);
        }
    }

    let mut result = Vec::new();
    for binding in original {
        let Some(occupants) = by_key.get(&binding.key) else {
            continue;
        };

        for occupant in occupants {
            tracing::debug!(
                "{} is still bound to {}, aliasing {} behind the leader",
                binding.key,
                binding.command,
                occupant.command
            );
            result.push(inject_leader(occupant, leader)?);
        }
    }

    Ok(result)
}
