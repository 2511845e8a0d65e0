//! Substitution rule tables
//!
//! A [`RuleSet`] is the static configuration of the remap engine: the three
//! substitution tables plus the prefix chord that scopes the prefixed table and
//! the leader chord used to disambiguate collisions. Rule sets are built in
//! layers from YAML files, each layer overriding the one before it.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::config::KeymapError;
use super::types::{Chord, Key, KeyStroke};

/// Replace `from` with `to`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Substitution<F, T> {
    pub from: F,
    pub to: T,
}

/// Replaces a whole keystroke
pub type ExactRule = Substitution<KeyStroke, KeyStroke>;
/// Replaces the trailing chord of a prefixed sequence
pub type ChordRule = Substitution<Chord, Chord>;
/// Replaces one key, wherever it appears, with a chord
pub type KeyRule = Substitution<Key, Chord>;

/// The complete static configuration consumed by the remap engine
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    /// Reserved chord prepended to single chords to avoid collisions
    pub leader: Chord,
    /// First chord of the sequences the prefixed table applies to
    pub prefix: Chord,
    pub exact: Vec<ExactRule>,
    pub prefixed: Vec<ChordRule>,
    pub general: Vec<KeyRule>,
}

impl RuleSet {
    /// Exact rule whose source is the given keystroke
    pub fn exact_for(&self, stroke: KeyStroke) -> Option<&ExactRule> {
        self.exact.iter().find(|rule| rule.from == stroke)
    }

    /// Merge a configuration layer on top of this rule set
    ///
    /// Entries whose `from` matches an existing rule replace it in place,
    /// entries without `to` remove it, anything else is appended.
    pub fn apply_layer(&mut self, layer: RulesConfig) -> Result<(), KeymapError> {
        if let Some(leader) = layer.leader {
            self.leader = leader.parse()?;
        }
        if let Some(prefix) = layer.prefix {
            self.prefix = prefix.parse()?;
        }
        merge_table(&mut self.exact, layer.exact)?;
        merge_table(&mut self.prefixed, layer.prefixed)?;
        merge_table(&mut self.general, layer.general)?;
        Ok(())
    }

    /// Check that the leader chord can never be produced or consumed by a rewrite
    pub fn validate(&self) -> Result<(), KeymapError> {
        if self.leader.is_empty() {
            return Err(KeymapError::InvalidRules("no leader chord set".to_string()));
        }
        if self.prefix.is_empty() {
            return Err(KeymapError::InvalidRules("no prefix chord set".to_string()));
        }
        if self.leader == self.prefix {
            return Err(KeymapError::InvalidRules(format!(
                "leader and prefix are both {}",
                self.leader
            )));
        }
        if let Some(rule) = self.general.iter().find(|r| self.leader.contains(r.from)) {
            return Err(KeymapError::InvalidRules(format!(
                "general rule for {} would rewrite the leader {}",
                rule.from, self.leader
            )));
        }
        if let Some(rule) = self.prefixed.iter().find(|r| r.from == self.leader) {
            return Err(KeymapError::InvalidRules(format!(
                "prefixed rule rewrites the leader {}",
                rule.from
            )));
        }
        if let Some(rule) = self
            .exact
            .iter()
            .find(|r| r.from.chords().any(|c| c == self.leader))
        {
            return Err(KeymapError::InvalidRules(format!(
                "exact rule for {} rewrites the leader {}",
                rule.from, self.leader
            )));
        }
        Ok(())
    }

    /// Render this rule set back into its file representation
    pub fn to_config(&self) -> RulesConfig {
        fn entries<F: ToString, T: ToString>(table: &[Substitution<F, T>]) -> Vec<RuleEntry> {
            table
                .iter()
                .map(|rule| RuleEntry {
                    from: rule.from.to_string(),
                    to: Some(rule.to.to_string()),
                })
                .collect()
        }

        RulesConfig {
            leader: Some(self.leader.to_string()),
            prefix: Some(self.prefix.to_string()),
            exact: entries(&self.exact),
            prefixed: entries(&self.prefixed),
            general: entries(&self.general),
        }
    }
}

fn merge_table<F, T>(
    table: &mut Vec<Substitution<F, T>>,
    entries: Vec<RuleEntry>,
) -> Result<(), KeymapError>
where
    F: FromStr<Err = KeymapError> + PartialEq,
    T: FromStr<Err = KeymapError>,
{
    for entry in entries {
        let from: F = entry.from.parse()?;
        let existing = table.iter().position(|rule| rule.from == from);

        match (entry.to, existing) {
            (Some(to), Some(idx)) => table[idx].to = to.parse()?,
            (Some(to), None) => table.push(Substitution {
                from,
                to: to.parse()?,
            }),
            (None, Some(idx)) => {
                table.remove(idx);
            }
            (None, None) => {
                tracing::debug!("Nothing to remove for rule {}", entry.from);
            }
        }
    }
    Ok(())
}

/// Root structure of a rules YAML file
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RulesConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exact: Vec<RuleEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prefixed: Vec<RuleEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub general: Vec<RuleEntry>,
}

/// A single `from → to` entry; a missing `to` removes an inherited rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleEntry {
    pub from: String,
    #[serde(default)]
    pub to: Option<String>,
}

/// Parse a rule layer from YAML
pub fn parse_rules_yaml(yaml: &str) -> Result<RulesConfig, KeymapError> {
    serde_yaml::from_str(yaml).map_err(|e| KeymapError::ParseError(e.to_string()))
}

/// Load a rule layer from a YAML file
pub fn load_rules_file(path: &Path) -> Result<RulesConfig, KeymapError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| KeymapError::IoError(format!("{}: {}", path.display(), e)))?;

    parse_rules_yaml(&content)
}
