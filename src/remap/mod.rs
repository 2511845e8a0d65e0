//! The remap engine
//!
//! Derives a new binding table from a default one:
//!
//! ```text
//! bindings → classify ─┬─ exact    → rewrite_exact    ─────────────┐
//!                      ├─ prefixed → rewrite_prefixed ─────────────┤
//!                      └─ other    → rewrite_general ──┬───────────┤ → concat
//!                                                      └─ backfill ┘
//! ```
//!
//! Every stage is a pure function of its input list and the [`RuleSet`]. The
//! only failure is a leader chord that would have to be added to a two-chord
//! keystroke, which aborts the whole run.

mod classify;
mod leader;
mod rewrite;

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::keymap::{KeyStroke, Keybinding, RuleSet};

pub use classify::{categorize, classify, Category, Partitions};
pub use leader::{backfill, inject_leader};
pub use rewrite::{has_prefixed_rule, rewrite_exact, rewrite_general, rewrite_prefixed};

/// Errors that abort a remap run
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemapError {
    /// A two-chord keystroke cannot be prefixed with the leader chord
    #[error("cannot add the leader to two-chord keystroke \"{key}\" of {command}")]
    LeaderOnSequence { command: String, key: KeyStroke },
}

/// Counts gathered while remapping
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RemapStats {
    pub input: usize,
    pub exact_matched: usize,
    pub prefixed_matched: usize,
    pub other: usize,
    /// Prefixed bindings with no rule for their trailing chord
    pub prefixed_dropped: usize,
    pub exact_out: usize,
    pub prefixed_out: usize,
    pub general_out: usize,
    pub backfill_out: usize,
}

impl RemapStats {
    pub fn output(&self) -> usize {
        self.exact_out + self.prefixed_out + self.general_out + self.backfill_out
    }
}

impl fmt::Display for RemapStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "input bindings:  {}", self.input)?;
        writeln!(
            f,
            "  exact: {}  prefixed: {} ({} dropped)  other: {}",
            self.exact_matched, self.prefixed_matched, self.prefixed_dropped, self.other
        )?;
        writeln!(f, "output bindings: {}", self.output())?;
        write!(
            f,
            "  exact: {}  prefixed: {}  general: {}  backfill: {}",
            self.exact_out, self.prefixed_out, self.general_out, self.backfill_out
        )
    }
}

/// Result lists of each stage, in output order
#[derive(Debug, Clone, Default)]
pub struct RemapOutput {
    pub exact: Vec<Keybinding>,
    pub prefixed: Vec<Keybinding>,
    pub general: Vec<Keybinding>,
    pub backfill: Vec<Keybinding>,
    stats: RemapStats,
}

impl RemapOutput {
    pub fn stats(&self) -> &RemapStats {
        &self.stats
    }

    /// All bindings: exact, prefixed, general, then backfill
    pub fn iter(&self) -> impl Iterator<Item = &Keybinding> {
        self.exact
            .iter()
            .chain(&self.prefixed)
            .chain(&self.general)
            .chain(&self.backfill)
    }

    pub fn len(&self) -> usize {
        self.exact.len() + self.prefixed.len() + self.general.len() + self.backfill.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_bindings(self) -> Vec<Keybinding> {
        let mut bindings = self.exact;
        bindings.extend(self.prefixed);
        bindings.extend(self.general);
        bindings.extend(self.backfill);
        bindings
    }
}

/// Run the full pipeline over a default binding table
pub fn remap(bindings: &[Keybinding], rules: &RuleSet) -> Result<RemapOutput, RemapError> {
    let partitions = classify(bindings, rules);
    tracing::info!(
        "Classified {} bindings: {} exact, {} prefixed, {} other",
        bindings.len(),
        partitions.exact.len(),
        partitions.prefixed.len(),
        partitions.other.len()
    );

    let exact = rewrite_exact(&partitions.exact, rules);
    let prefixed = rewrite_prefixed(&partitions.prefixed, rules);
    let general = rewrite_general(&partitions.other, rules)?;
    // Only general rewrites are checked for collisions
    let aliases = backfill(&partitions.other, &general, rules.leader)?;

    let stats = RemapStats {
        input: bindings.len(),
        exact_matched: partitions.exact.len(),
        prefixed_matched: partitions.prefixed.len(),
        other: partitions.other.len(),
        prefixed_dropped: partitions
            .prefixed
            .iter()
            .filter(|binding| !has_prefixed_rule(binding, rules))
            .count(),
        exact_out: exact.len(),
        prefixed_out: prefixed.len(),
        general_out: general.len(),
        backfill_out: aliases.len(),
    };
    tracing::info!(
        "Remapped into {} bindings ({} exact, {} prefixed, {} general, {} backfill)",
        stats.output(),
        stats.exact_out,
        stats.prefixed_out,
        stats.general_out,
        stats.backfill_out
    );

    Ok(RemapOutput {
        exact,
        prefixed,
        general,
        backfill: aliases,
        stats,
    })
}
